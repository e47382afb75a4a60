//! Linkograph CLI
//!
//! Command-line interface for the cross-domain link integrity checker:
//! - load the per-domain collections (all domains or a filtered one),
//! - run structural + forward + backward validation,
//! - print the terminal report and optionally export machine-readable
//!   findings for downstream tooling (e.g. a CI gate).
//!
//! Exit codes: `0` no errors (warnings allowed), `1` at least one
//! error-severity finding, `2` fatal load failure (e.g. dataset directory
//! not found).

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use linkograph_model::{Domain, PathTemplateRegistry, RelationshipMap};
use linkograph_validate::{render_text, validate_dataset, IntegrityReportV1, RenderOptions};

#[derive(Parser)]
#[command(name = "linkograph")]
#[command(
    author,
    version,
    about = "Cross-domain relationship integrity checker for denormalized content datasets"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate relationship integrity across the dataset.
    Check {
        /// Dataset directory containing the per-domain JSON files.
        dataset: PathBuf,

        /// Validate only one domain (materials|contaminants|compounds|settings).
        ///
        /// Entities outside the filter are absent from the index, so edges
        /// pointing at them surface as missing targets.
        #[arg(long)]
        domain: Option<String>,

        /// Print every finding instead of capped per-category examples.
        #[arg(long)]
        details: bool,

        /// Example findings shown per category (ignored with --details).
        #[arg(long, default_value_t = 5)]
        max_examples: usize,

        /// Stdout format.
        #[arg(long, default_value = "text")]
        format: String,

        /// Export the full machine-readable JSON report to this path.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Alternate path-template registry (JSON, keyed by domain slug).
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Alternate relationship-type map (JSON object, forward -> reverse).
        #[arg(long)]
        relmap: Option<PathBuf>,

        /// Always exit 0 unless loading fails entirely (CI escape hatch).
        #[arg(long)]
        no_fail: bool,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_json_config<T: serde::de::DeserializeOwned>(path: &PathBuf, what: &str) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid {what} in {}", path.display()))
}

#[allow(clippy::too_many_arguments)]
fn cmd_check(
    dataset: &PathBuf,
    domain: Option<&str>,
    details: bool,
    max_examples: usize,
    format: &str,
    out: Option<&PathBuf>,
    templates: Option<&PathBuf>,
    relmap: Option<&PathBuf>,
) -> Result<IntegrityReportV1> {
    let format = format.trim().to_ascii_lowercase();
    if !matches!(format.as_str(), "text" | "json") {
        return Err(anyhow!("unknown --format `{format}` (expected text|json)"));
    }

    let filter = domain
        .map(|s| s.parse::<Domain>())
        .transpose()
        .map_err(|e| anyhow!(e))?;

    let templates = match templates {
        Some(path) => load_json_config::<PathTemplateRegistry>(path, "path-template registry")?,
        None => PathTemplateRegistry::default(),
    };
    let relmap = match relmap {
        Some(path) => load_json_config::<RelationshipMap>(path, "relationship map")?,
        None => RelationshipMap::default(),
    };

    let load = linkograph_ingest::load_dataset(dataset, filter)?;
    let report = validate_dataset(&load, &templates, &relmap, filter);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!(
            "{}",
            render_text(
                &report,
                &RenderOptions {
                    details,
                    max_examples,
                },
            )
        ),
    }

    if let Some(path) = out {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        eprintln!(
            "{} {}",
            "wrote".green().bold(),
            path.display().to_string().bold()
        );
    }

    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            dataset,
            domain,
            details,
            max_examples,
            format,
            out,
            templates,
            relmap,
            no_fail,
        } => {
            let report = match cmd_check(
                &dataset,
                domain.as_deref(),
                details,
                max_examples,
                &format,
                out.as_ref(),
                templates.as_ref(),
                relmap.as_ref(),
            ) {
                Ok(report) => report,
                Err(err) => {
                    eprintln!("{} {err:#}", "error:".red().bold());
                    return ExitCode::from(2);
                }
            };

            if report.has_errors() {
                eprintln!(
                    "{} {} error(s), {} warning(s)",
                    "FAIL".red().bold(),
                    report.summary.error_count,
                    report.summary.warning_count
                );
                if no_fail {
                    return ExitCode::SUCCESS;
                }
                ExitCode::from(1)
            } else {
                eprintln!(
                    "{} {} warning(s)",
                    "PASS".green().bold(),
                    report.summary.warning_count
                );
                ExitCode::SUCCESS
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn unknown_format_is_rejected_before_loading() {
        let err = cmd_check(
            &PathBuf::from("/nonexistent"),
            None,
            false,
            5,
            "yaml",
            None,
            None,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown --format"));
    }

    #[test]
    fn unknown_domain_filter_is_rejected() {
        let err = cmd_check(
            &PathBuf::from("/nonexistent"),
            Some("minerals"),
            false,
            5,
            "text",
            None,
            None,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown domain"));
    }
}
