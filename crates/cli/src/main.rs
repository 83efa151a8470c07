// safra CLI - harvest calendar and sentiment report views

mod analyses;
mod calendar;
mod exit_codes;
mod products;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use safra_config::Settings;
use safra_io::{JsonFileSource, SnapshotCache, SourceError};
use safra_recon::Snapshot;

use exit_codes::{source_exit_code, EXIT_CONFIG, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "safra")]
#[command(about = "Harvest calendar and market sentiment reports")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Settings file (default: ~/.config/safra/settings.toml)
    #[arg(long, global = true, env = "SAFRA_CONFIG")]
    config: Option<PathBuf>,

    /// Product rows JSON (overrides settings)
    #[arg(long, global = true)]
    products: Option<PathBuf>,

    /// Analysis rows JSON (overrides settings)
    #[arg(long, global = true)]
    analyses: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Month-by-month harvest calendar
    #[command(after_help = "\
Examples:
  safra calendar
  safra calendar --month DEZ
  safra calendar --json")]
    Calendar {
        /// Show a single month (JAN, FEV, ..., DEZ)
        #[arg(long)]
        month: Option<String>,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Headline numbers: products, tracked products, analyses by sentiment
    Metrics {
        #[arg(long)]
        json: bool,
    },

    /// Products with a negative outlook
    #[command(after_help = "\
Examples:
  safra alerts
  safra alerts --fail-on-alert   # exit 20 when any alert exists")]
    Alerts {
        #[arg(long)]
        json: bool,

        /// Exit with a non-zero code when alerts exist
        #[arg(long)]
        fail_on_alert: bool,
    },

    /// Detailed analyses grouped by sentiment, with distributions
    #[command(after_help = "\
Examples:
  safra analyses
  safra analyses --sentiment NEGATIVO --country Brasil")]
    Analyses {
        #[command(flatten)]
        filter: analyses::FilterArgs,

        #[arg(long)]
        json: bool,
    },

    /// Sentiment and country distributions
    Stats {
        #[command(flatten)]
        filter: analyses::FilterArgs,

        #[arg(long)]
        json: bool,
    },

    /// Register and list monitored products
    #[command(subcommand)]
    Products(products::ProductsCommands),

    /// Show which months a harvest window expression covers
    #[command(after_help = "\
Examples:
  safra window DEZ-MAR
  safra window jun-jun")]
    Window {
        /// Window expression, e.g. DEZ-MAR
        expr: String,
    },

    /// Print the effective settings as TOML
    Config,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  safra-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: safra <command> [options]");
            eprintln!("       safra --help for more information");
            Ok(())
        }
        Some(Commands::Calendar { month, json }) => calendar::cmd_calendar(&cli.global, month, json),
        Some(Commands::Metrics { json }) => calendar::cmd_metrics(&cli.global, json),
        Some(Commands::Alerts { json, fail_on_alert }) => analyses::cmd_alerts(&cli.global, json, fail_on_alert),
        Some(Commands::Analyses { filter, json }) => analyses::cmd_analyses(&cli.global, filter, json),
        Some(Commands::Stats { filter, json }) => analyses::cmd_stats(&cli.global, filter, json),
        Some(Commands::Products(cmd)) => products::cmd_products(&cli.global, cmd),
        Some(Commands::Window { expr }) => calendar::cmd_window(&expr),
        Some(Commands::Config) => cmd_config(&cli.global),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(err: safra_config::ConfigError) -> Self {
        Self { code: EXIT_CONFIG, message: err.to_string(), hint: None }
    }

    /// Create error from a data source error with the proper exit code.
    pub fn source(err: SourceError) -> Self {
        let code = source_exit_code(&err);
        let hint = match &err {
            SourceError::Io { .. } => Some("set [data] paths in settings.toml or pass --products/--analyses".to_string()),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: exit_codes::EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Settings plus the data source built from them.
///
/// The snapshot cache lives here so commands that modify the product file
/// can invalidate it and reload within the same run.
pub struct Context {
    pub settings: Settings,
    pub source: JsonFileSource,
    cache: SnapshotCache,
}

impl Context {
    pub fn load(global: &GlobalArgs) -> Result<Self, CliError> {
        let mut settings = Settings::load(global.config.as_deref()).map_err(CliError::config)?;
        if let Some(ref path) = global.products {
            settings.data.products = path.clone();
        }
        if let Some(ref path) = global.analyses {
            settings.data.analyses = path.clone();
        }

        let source = JsonFileSource::new(settings.data.products.clone(), settings.data.analyses.clone());
        Ok(Self {
            settings,
            source,
            cache: SnapshotCache::new(),
        })
    }

    pub fn snapshot(&mut self) -> Result<Arc<Snapshot>, CliError> {
        if self.cache.is_fresh() {
            log::debug!("reusing snapshot (generation {})", self.cache.generation());
        }
        self.cache.get_or_load(&self.source).map_err(CliError::source)
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}

/// Serialize `value` as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
    println!("{json}");
    Ok(())
}

fn cmd_config(global: &GlobalArgs) -> Result<(), CliError> {
    let ctx = Context::load(global)?;
    let toml = ctx.settings.to_toml().map_err(CliError::config)?;
    print!("{toml}");
    Ok(())
}
