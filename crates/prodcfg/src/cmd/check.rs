//! Shared implementation for the prodcfg-check command.

use crate::snapshot::Snapshot;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use prodcfg_core::ConfigKind;
use prodcfg_validate::{
    check_chart, check_ledger_account, open_count, validate_configuration, CatalogView, Severity,
    ValidationError,
};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Output format for diagnostics.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output for tooling integration
    Json,
}

/// A diagnostic message in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Severity: "error" or "warning"
    pub severity: String,
    /// Error code (e.g., "M2003")
    pub code: String,
    /// Error message
    pub message: String,
    /// Form field the finding attaches to, if field-level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// JSON output structure for all diagnostics.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// List of diagnostics
    pub diagnostics: Vec<JsonDiagnostic>,
    /// Total error count
    pub error_count: usize,
    /// Total warning count
    pub warning_count: usize,
}

/// Validate a configuration snapshot and report findings.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The snapshot file to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Date to evaluate effective windows against (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub as_of: Option<String>,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also print the currently-effective row count per kind
    #[arg(long)]
    pub summary: bool,
}

/// Main entry point for the check command.
pub fn main() -> ExitCode {
    crate::cmd::init_logging();
    let args = Args::parse();
    match run(&args) {
        Ok(exit) => exit,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Run the check command.
pub fn run(args: &Args) -> Result<ExitCode> {
    let snapshot = Snapshot::load(&args.file)?;
    let as_of = match &args.as_of {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {date}"))?,
        None => Local::now().date_naive(),
    };

    let findings = collect_findings(&snapshot);

    let error_count = findings
        .iter()
        .filter(|f| f.severity() == Severity::Error)
        .count();
    let warning_count = findings.len() - error_count;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match args.format {
        OutputFormat::Text => {
            for finding in &findings {
                let severity = match finding.severity() {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                };
                match finding.field {
                    Some(field) => writeln!(
                        handle,
                        "[{}] {severity}: {} (field: {field})",
                        finding.code, finding.message
                    )?,
                    None => writeln!(
                        handle,
                        "[{}] {severity}: {}",
                        finding.code, finding.message
                    )?,
                }
            }
            if args.summary {
                print_summary(&mut handle, &snapshot, as_of)?;
            }
            writeln!(
                handle,
                "{error_count} error(s), {warning_count} warning(s)"
            )?;
        }
        OutputFormat::Json => {
            let output = JsonOutput {
                diagnostics: findings
                    .iter()
                    .map(|f| JsonDiagnostic {
                        severity: match f.severity() {
                            Severity::Error => "error".to_string(),
                            Severity::Warning => "warning".to_string(),
                        },
                        code: f.code.to_string(),
                        message: f.message.clone(),
                        field: f.field.map(str::to_string),
                    })
                    .collect(),
                error_count,
                warning_count,
            };
            writeln!(handle, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }

    Ok(if error_count > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

/// Run every rule group over the snapshot.
#[must_use]
pub fn collect_findings(snapshot: &Snapshot) -> Vec<ValidationError> {
    let mut findings = check_chart(&snapshot.chart_of_accounts);

    let catalog = CatalogView {
        chart_of_accounts: &snapshot.chart_of_accounts,
        ledger_accounts: &snapshot.ledger_accounts,
    };

    for account in &snapshot.ledger_accounts {
        findings.extend(check_ledger_account(
            account,
            catalog.chart_entry(&account.chart_of_account_code),
        ));
    }

    findings.extend(validate_configuration(&snapshot.configuration, &catalog));
    findings
}

fn print_summary(handle: &mut impl Write, snapshot: &Snapshot, as_of: NaiveDate) -> Result<()> {
    let config = &snapshot.configuration;
    let counts: [(ConfigKind, usize); 6] = [
        (
            ConfigKind::InterestRates,
            open_count(&config.interest_rates, as_of),
        ),
        (ConfigKind::Fees, open_count(&config.fees, as_of)),
        (ConfigKind::Limits, open_count(&config.limits, as_of)),
        (ConfigKind::Periods, open_count(&config.periods, as_of)),
        (ConfigKind::Penalties, open_count(&config.penalties, as_of)),
        (
            ConfigKind::EligibilityRules,
            open_count(&config.eligibility_rules, as_of),
        ),
    ];
    writeln!(handle, "effective on {as_of}:")?;
    for (kind, count) in counts {
        writeln!(handle, "  {kind}: {count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::parse_from(["check", "snapshot.json"]);
        assert_eq!(args.file, PathBuf::from("snapshot.json"));
        assert!(args.as_of.is_none());
        assert!(!args.summary);
    }

    #[test]
    fn args_parse_with_options() {
        let args = Args::parse_from([
            "check",
            "--as-of",
            "2024-06-30",
            "--format",
            "json",
            "--summary",
            "snapshot.json",
        ]);
        assert_eq!(args.as_of.as_deref(), Some("2024-06-30"));
        assert!(args.summary);
        assert!(matches!(args.format, OutputFormat::Json));
    }
}
