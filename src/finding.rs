// SPDX-License-Identifier: PMPL-1.0-or-later
//! Finding, severity and summary types produced by a scan.

use crate::catalog::CheckId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a check, ordered by user-facing urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the success criterion
    Error,
    /// Likely barrier, needs review
    Warning,
    /// Best-practice advice
    Notice,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Notice];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Notice => write!(f, "NOTICE"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            other => Err(format!("Unknown severity: {}", other)),
        }
    }
}

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// One reported accessibility problem.
///
/// `severity`, `wcag` and `level` are always copied from the check
/// definition; build findings with [`crate::catalog::CheckDefinition::finding`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Catalog key of the check that produced this finding
    pub check_id: CheckId,
    pub severity: Severity,
    /// Dotted success criterion, e.g. "1.1.1"
    pub wcag: String,
    pub level: WcagLevel,
    /// Human-readable description of this occurrence
    pub message: String,
    /// Offending element's markup (at most 500 characters), empty for
    /// document-level omissions
    pub element: String,
}

/// Finding counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub error: usize,
    pub warning: usize,
    pub notice: usize,
    pub total: usize,
}

impl Summary {
    /// Count findings. The summary is always derived, never kept separately.
    pub fn from_findings(findings: &[Finding]) -> Self {
        findings.iter().fold(Summary::default(), |mut summary, f| {
            match f.severity {
                Severity::Error => summary.error += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Notice => summary.notice += 1,
            }
            summary.total += 1;
            summary
        })
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Notice => self.notice,
        }
    }
}

/// Ordered findings of one scan plus their summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Findings in check-execution order
    pub findings: Vec<Finding>,
    pub summary: Summary,
}

impl ScanResult {
    pub fn new(findings: Vec<Finding>) -> Self {
        let summary = Summary::from_findings(&findings);
        Self { findings, summary }
    }

    /// Findings with the given severity, in scan order
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    /// Findings produced by one check, in scan order
    pub fn by_check(&self, check: CheckId) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.check_id == check).collect()
    }

    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.summary.error > 0
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

/// A scan result tagged for the caller's own bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Caller-supplied identifier (URL, path, post id); never interpreted
    pub document_id: Option<String>,
    pub scanned_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: ScanResult,
}

impl ScanReport {
    pub fn new(document_id: Option<String>, result: ScanResult) -> Self {
        Self {
            document_id,
            scanned_at: Utc::now(),
            result,
        }
    }
}
