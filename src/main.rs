// SPDX-License-Identifier: PMPL-1.0-or-later
//! accessguard CLI - WCAG 2.2 HTML accessibility scanner and auto-fixer

use accessguard::config::{default_config_path, load_config, write_default_config, Config};
use accessguard::report::{generate_report, OutputFormat};
use accessguard::scanner;
use accessguard::{AutoFixer, Catalog, Severity};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// WCAG 2.2 HTML accessibility scanner and auto-fixer
#[derive(Parser)]
#[command(name = "accessguard")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan an HTML file or a directory of HTML files
    Scan {
        /// File or directory to scan
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file (defaults to .accessguard.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Document identifier reported instead of the file path (single files only)
        #[arg(long)]
        id: Option<String>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Apply the enabled content fixes to an HTML fragment
    Fix {
        /// Fragment file to fix
        file: PathBuf,

        /// Config file (defaults to .accessguard.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the check catalog
    Checks {
        /// Only list checks of this severity
        #[arg(long)]
        severity: Option<SeverityArg>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write it
        path: PathBuf,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

/// Severity CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeverityArg {
    Error,
    Warning,
    Notice,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Error => Severity::Error,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Notice => Severity::Notice,
        }
    }
}

/// `RUST_LOG` wins; otherwise debug with `--verbose`, else the configured level
fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose { "debug" } else { config.log.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("accessguard={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = path.unwrap_or_else(default_config_path);
    load_config(&path).with_context(|| format!("loading config from {}", path.display()))
}

/// `--id` names one document, so it cannot be combined with a directory
fn check_id_target(path: &Path, id: Option<&str>) -> anyhow::Result<()> {
    if id.is_some() && path.is_dir() {
        anyhow::bail!("--id applies to a single file, not to directory {}", path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { path, format, output, config, id, verbose } => {
            let config = load(config)?;
            init_logging(verbose, &config);
            let catalog = Catalog::wcag22();

            check_id_target(&path, id.as_deref())?;

            let files = if path.is_dir() {
                scanner::scan_directory(&catalog, &path, &config.scan)?.files
            } else {
                let mut file = scanner::scan_file(&catalog, &path, &config.scan)?;
                if id.is_some() {
                    file.report.document_id = id;
                }
                vec![file]
            };

            let report = generate_report(&catalog, &files, format.into());
            write_output(&report, output.as_deref())?;

            if files.iter().any(|f| f.report.result.has_errors()) {
                std::process::exit(1);
            }
        }

        Commands::Fix { file, config, output, verbose } => {
            let config = load(config)?;
            init_logging(verbose, &config);

            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let outcome = AutoFixer::new(config.fixes).fix_content(&html);

            if outcome.applied.is_empty() {
                eprintln!("No fixes applied");
            } else {
                let names: Vec<_> = outcome.applied.iter().map(|k| k.as_str()).collect();
                eprintln!("Applied fixes: {}", names.join(", "));
            }
            write_output(&outcome.html, output.as_deref())?;
        }

        Commands::Checks { severity } => {
            let catalog = Catalog::wcag22();
            let checks = match severity {
                Some(s) => catalog.by_severity(s.into()),
                None => catalog.iter().collect(),
            };
            for check in checks {
                println!(
                    "{:<26} {:<8} {:<7} {:<3} {}{}",
                    check.id.as_str(),
                    check.severity.to_string(),
                    check.wcag,
                    check.level.to_string(),
                    check.title,
                    if check.auto_fixable { " (auto-fix)" } else { "" }
                );
            }
        }

        Commands::InitConfig { path } => {
            write_default_config(&path)
                .with_context(|| format!("writing config to {}", path.display()))?;
            eprintln!("Default configuration written to {}", path.display());
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Output written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
