//! briefparse CLI: deterministic project-record extraction from free text.
//!
//! Reads briefs, emails, CRM webhook payloads and (stubbed) document pages,
//! prints structured JSON, and validates, summarizes or exports saved results.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
