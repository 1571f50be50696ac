//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use briefparse_core::{
    BriefParser, SavedResult, SourceDescriptor, export_csv, extraction_stats, validate_extraction,
};
use briefparse_shared::{AppConfig, ProjectBatch, init_config, load_config};

/// Brief used by `briefparse demo`.
const DEMO_BRIEF: &str = include_str!("../../../fixtures/briefs/healthcare-email.txt");

/// Default CSV path for `briefparse demo`.
const DEMO_EXPORT_PATH: &str = "demo_projects.csv";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// briefparse: turn loosely formatted project briefs into structured records.
#[derive(Parser)]
#[command(
    name = "briefparse",
    version,
    about = "Extract structured project records from briefs, emails, webhooks and pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract a project from a text file (`-` reads stdin).
    Text {
        /// Input file, or `-` for stdin.
        input: String,

        /// Source label (defaults to `[defaults] text_source`).
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Extract a project from an email body (`-` reads stdin).
    Email {
        /// Input file, or `-` for stdin.
        input: String,
    },

    /// Extract a project from a CRM webhook JSON payload.
    Webhook {
        /// JSON file holding the payload object.
        file: PathBuf,
    },

    /// Extract a project from a document page URL (served by the offline stub).
    Notion {
        /// Page URL.
        url: String,
    },

    /// Extract from a JSON list of `{type, data}` source descriptors and combine.
    Aggregate {
        /// JSON file holding the descriptor list.
        file: PathBuf,
    },

    /// Print a validation report for a saved extraction or aggregate result.
    Validate {
        /// Result JSON file.
        file: PathBuf,
    },

    /// Print coverage and distribution statistics for a saved result.
    Stats {
        /// Result JSON file.
        file: PathBuf,
    },

    /// Write a saved extraction or aggregate result to CSV.
    Export {
        /// Result JSON file.
        file: PathBuf,

        /// Output CSV path (defaults to `[defaults] export_path`).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Run the bundled sample brief through extract, validate, stats and export.
    Demo {
        /// Output CSV path.
        #[arg(short, long, default_value = DEMO_EXPORT_PATH)]
        out: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "briefparse=info",
        1 => "briefparse=debug",
        _ => "briefparse=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    // logs on stderr, command output on stdout
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Text { input, source } => cmd_text(&input, source.as_deref()),
        Command::Email { input } => cmd_email(&input),
        Command::Webhook { file } => cmd_webhook(&file),
        Command::Notion { url } => cmd_notion(&url),
        Command::Aggregate { file } => cmd_aggregate(&file),
        Command::Validate { file } => cmd_validate(&file),
        Command::Stats { file } => cmd_stats(&file),
        Command::Export { file, out } => cmd_export(&file, out.as_deref()),
        Command::Demo { out } => cmd_demo(&out),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Extraction commands
// ---------------------------------------------------------------------------

fn parser(config: &AppConfig) -> BriefParser {
    BriefParser::from_config(config)
}

fn cmd_text(input: &str, source: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let text = read_input(input)?;
    let source = source.unwrap_or(config.defaults.text_source.as_str());
    print_json(&parser(&config).extract_from_text(&text, source))
}

fn cmd_email(input: &str) -> Result<()> {
    let config = load_config()?;
    let body = read_input(input)?;
    print_json(&parser(&config).extract_from_email(&body))
}

fn cmd_webhook(file: &Path) -> Result<()> {
    let config = load_config()?;
    let payload: serde_json::Value = read_json(file)?;
    print_json(&parser(&config).extract_from_webhook(&payload))
}

fn cmd_notion(url: &str) -> Result<()> {
    let config = load_config()?;
    print_json(&parser(&config).extract_from_url(url))
}

fn cmd_aggregate(file: &Path) -> Result<()> {
    let config = load_config()?;
    let sources: Vec<SourceDescriptor> = read_json(file)?;
    info!(count = sources.len(), "aggregating sources");
    print_json(&parser(&config).aggregate(&sources))
}

// ---------------------------------------------------------------------------
// Result commands
// ---------------------------------------------------------------------------

fn cmd_validate(file: &Path) -> Result<()> {
    let result: SavedResult = read_json(file)?;
    print_json(&validate_extraction(&result))
}

fn cmd_stats(file: &Path) -> Result<()> {
    let result: SavedResult = read_json(file)?;
    print_json(&extraction_stats(&result)?)
}

fn cmd_export(file: &Path, out: Option<&Path>) -> Result<()> {
    let result: SavedResult = read_json(file)?;
    let out = match out {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(load_config()?.defaults.export_path),
    };

    write_export(&result, &out)?;
    println!("Exported {} project(s) to {}", result.projects().len(), out.display());
    Ok(())
}

fn cmd_demo(out: &Path) -> Result<()> {
    let parser = BriefParser::new();

    let result = parser.extract_from_text(DEMO_BRIEF, "demo");
    println!("1. TEXT PARSING RESULT:");
    print_json(&result)?;

    println!("\n2. VALIDATION RESULT:");
    print_json(&validate_extraction(&result))?;

    println!("\n3. EXTRACTION STATISTICS:");
    print_json(&extraction_stats(&result)?)?;

    let exported = export_csv(&result, out);
    println!(
        "\n4. CSV EXPORT: {}",
        if exported { "Success" } else { "Failed" }
    );
    Ok(())
}

fn write_export(result: &SavedResult, out: &Path) -> Result<()> {
    if export_csv(result, out) {
        Ok(())
    } else {
        Err(eyre!("CSV export to {} failed", out.display()))
    }
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// I/O helpers
// ---------------------------------------------------------------------------

/// Read a file, or stdin when `input` is `-`.
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        return std::io::read_to_string(std::io::stdin()).wrap_err("failed to read stdin");
    }
    std::fs::read_to_string(input).wrap_err_with(|| format!("failed to read {input}"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
