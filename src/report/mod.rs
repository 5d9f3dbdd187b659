// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for scan results.
//!
//! Supports multiple output formats:
//! - Text: findings grouped by file and severity, with WCAG references
//! - JSON: the scan reports as serialized by serde
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::catalog::Catalog;
use crate::finding::{Severity, Summary};
use crate::scanner::FileReport;
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render the reports of one or more scanned files
pub fn generate_report(catalog: &Catalog, files: &[FileReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(catalog, files),
        OutputFormat::Json => generate_json_report(files),
        OutputFormat::Sarif => generate_sarif_report(catalog, files),
    }
}

fn total_summary(files: &[FileReport]) -> Summary {
    let findings: Vec<_> = files
        .iter()
        .flat_map(|f| f.report.result.findings.iter().cloned())
        .collect();
    Summary::from_findings(&findings)
}

fn generate_text_report(catalog: &Catalog, files: &[FileReport]) -> String {
    let mut output = String::new();

    output.push_str("=== accessguard WCAG 2.2 Report ===\n\n");

    let summary = total_summary(files);
    if summary.total == 0 {
        output.push_str(&format!(
            "Scanned {} file(s). No accessibility issues found.\n",
            files.len()
        ));
        return output;
    }

    output.push_str(&format!(
        "Found {} issue(s) in {} file(s): {} error(s), {} warning(s), {} notice(s)\n\n",
        summary.total,
        files.len(),
        summary.error,
        summary.warning,
        summary.notice
    ));

    for file in files.iter().filter(|f| !f.report.result.is_empty()) {
        output.push_str(&format!("## {}\n\n", file.path.display()));

        for severity in Severity::ALL {
            let findings = file.report.result.by_severity(severity);
            if findings.is_empty() {
                continue;
            }

            output.push_str(&format!("--- {} ({}) ---\n", severity, findings.len()));

            for finding in findings {
                output.push_str(&format!("[{}] {}\n", finding.check_id, finding.message));
                let title = catalog.definition(finding.check_id).title;
                output.push_str(&format!(
                    "  WCAG: {} (Level {}) {}\n",
                    finding.wcag, finding.level, title
                ));
                if !finding.element.is_empty() {
                    output.push_str(&format!("  Element: {}\n", one_line(&finding.element)));
                }
                output.push('\n');
            }
        }
    }

    if summary.error > 0 {
        output.push_str("RESULT: FAIL (errors found)\n");
    } else {
        output.push_str("RESULT: PASS (no errors)\n");
    }

    output
}

/// Collapse runs of whitespace so snippets print on one line
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A single file renders as its report object, several as an array
fn generate_json_report(files: &[FileReport]) -> String {
    let rendered = match files {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize findings: {}\"}}", e))
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    #[serde(rename = "fullDescription")]
    full_description: SarifMessage,
    properties: SarifRuleProperties,
}

#[derive(Debug, Serialize)]
struct SarifRuleProperties {
    tags: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<SarifRegion>,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifRegion {
    snippet: SarifMessage,
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Notice => "note",
    }
}

fn generate_sarif_report(catalog: &Catalog, files: &[FileReport]) -> String {
    let rules = catalog
        .iter()
        .map(|def| SarifRule {
            id: def.id.to_string(),
            name: def.title.to_string(),
            short_description: SarifMessage {
                text: def.title.to_string(),
            },
            full_description: SarifMessage {
                text: def.description.to_string(),
            },
            properties: SarifRuleProperties {
                tags: vec![
                    "accessibility".to_string(),
                    format!("wcag{}", def.wcag.replace('.', "")),
                    format!("wcag2{}", def.level.to_string().to_lowercase()),
                ],
            },
        })
        .collect();

    let results = files
        .iter()
        .flat_map(|file| {
            let uri = file.path.display().to_string();
            file.report.result.findings.iter().map(move |f| SarifResult {
                rule_id: f.check_id.to_string(),
                level: sarif_level(f.severity).to_string(),
                message: SarifMessage {
                    text: f.message.clone(),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation { uri: uri.clone() },
                        region: (!f.element.is_empty()).then(|| SarifRegion {
                            snippet: SarifMessage {
                                text: f.element.clone(),
                            },
                        }),
                    },
                }],
            })
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "accessguard".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
