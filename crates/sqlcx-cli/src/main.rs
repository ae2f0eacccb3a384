//! sqlcx CLI: estimate query complexity from EXPLAIN plan fixtures.

use clap::{Parser, Subcommand, ValueEnum};
use sqlcx_analyzer::{parse_fixture, AnalysisResult, ComplexityAnalyzer, FixtureConfig};
use sqlcx_core::complexity::ComplexityClass;
use sqlcx_core::config::AnalyzerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Exit code when the dominant class is worse than `--fail-above`.
const EXIT_THRESHOLD: i32 = 2;

#[derive(Parser)]
#[command(name = "sqlcx")]
#[command(about = "Estimate SQL query complexity from execution plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a plan fixture and print the complexity report
    Analyze {
        /// Path to the plan fixture (YAML or JSON)
        #[arg(short, long)]
        plan: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Maximum subquery nesting depth (overrides config)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Exit with status 2 if the dominant class is worse than this, e.g. "O(log n)"
        #[arg(long)]
        fail_above: Option<ComplexityClass>,
    },

    /// Validate a plan fixture (syntax and required step fields)
    Validate {
        /// Path to the plan fixture (YAML or JSON)
        #[arg(short, long)]
        plan: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Analyze {
            plan,
            format,
            max_depth,
            fail_above,
        } => match analyze_fixture(&plan, format, max_depth) {
            Ok(result) => {
                if let Some(threshold) = fail_above {
                    if result.exceeds(threshold) {
                        eprintln!(
                            "Dominant complexity {} exceeds threshold {}",
                            result.dominant(), threshold
                        );
                        std::process::exit(EXIT_THRESHOLD);
                    }
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Validate { plan } => {
            if let Err(e) = validate_fixture(&plan) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Plan fixture is valid");
        }
    }
}

/// Analyzer events go to stderr, filtered by `SQLCX_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SQLCX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn analyze_fixture(
    plan_path: &Path,
    format: OutputFormat,
    max_depth: Option<usize>,
) -> Result<AnalysisResult, Box<dyn std::error::Error>> {
    let src = fs::read_to_string(plan_path)?;
    let parsed = parse_fixture(&src)?;

    let config = resolve_config(AnalyzerConfig::from_env(), &parsed.config, max_depth);
    let analyzer = ComplexityAnalyzer::new(config);
    let result = analyzer.estimate_complexity(&parsed.plan, &parsed.provider)?;

    match format {
        OutputFormat::Text => print!("{}", result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(result)
}

fn validate_fixture(plan_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let src = fs::read_to_string(plan_path)?;
    let parsed = parse_fixture(&src)?;
    parsed.validate()?;
    Ok(())
}

/// Environment, then the fixture's `config:` section, then CLI flags.
fn resolve_config(
    mut cfg: AnalyzerConfig,
    doc: &FixtureConfig,
    max_depth: Option<usize>,
) -> AnalyzerConfig {
    doc.apply(&mut cfg);
    if let Some(depth) = max_depth {
        cfg.max_depth = depth;
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::{resolve_config, AnalyzerConfig, FixtureConfig};

    #[test]
    fn fixture_config_overrides_env_defaults() {
        let doc = FixtureConfig { max_depth: Some(4) };
        let cfg = resolve_config(AnalyzerConfig::with_max_depth(16), &doc, None);
        assert_eq!(cfg.max_depth, 4);
    }

    #[test]
    fn cli_overrides_higher_priority_than_config() {
        let doc = FixtureConfig { max_depth: Some(4) };
        let cfg = resolve_config(AnalyzerConfig::default(), &doc, Some(1));
        assert_eq!(cfg.max_depth, 1);
    }
}
