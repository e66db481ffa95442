//! salvage-extract: extract one analyzer's settings template from a
//! session `meta.json`.
//!
//! Usage:
//!   # List analyzers found in meta.json
//!   salvage-extract --meta /tmp/meta.json --list
//!
//!   # Extract a specific analyzer (by nodeId) as YAML
//!   salvage-extract --meta /tmp/meta.json --node-id 10028 --format yaml
//!
//!   # Extract as JSON without the settings: wrapper
//!   salvage-extract --meta /tmp/meta.json --node-id 10028 --format json --wrapper none
//!
//!   # Emit numeric dropdown codes instead of dropdownText strings
//!   salvage-extract --meta /tmp/meta.json --node-id 10028 --dropdown numeric

use anyhow::Result;
use clap::{CommandFactory, Parser};
use salvage::template::{analyzers, find_analyzer, load_json};
use salvage::{extract_template, DropdownMode, OutputFormat, RowPolicy, TemplateOptions, WrapperMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "salvage-extract")]
#[command(about = "Extract analyzer settings from meta.json into YAML/JSON templates", long_about = None)]
struct Args {
    /// Path to meta.json extracted from a .sal session
    #[arg(long)]
    meta: PathBuf,

    /// List analyzers found in meta.json and exit
    #[arg(long)]
    list: bool,

    /// Analyzer nodeId to extract (see --list)
    #[arg(long)]
    node_id: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,

    /// Emit with `settings:` wrapper (recommended) or the bare mapping
    #[arg(long, value_enum, default_value_t = WrapperMode::Settings)]
    wrapper: WrapperMode,

    /// How to emit dropdown values: UI dropdown text (default) or numeric codes
    #[arg(long, value_enum, default_value_t = DropdownMode::Text)]
    dropdown: DropdownMode,

    /// Fail on the first unresolvable setting row instead of skipping it
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let doc = load_json(&args.meta)?;
    let records = analyzers(&doc)?;

    if args.list {
        for record in &records {
            println!("{}", record.summary());
        }
        return Ok(());
    }

    let Some(node_id) = args.node_id else {
        Args::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "--node-id is required unless --list is provided",
            )
            .exit();
    };

    let analyzer = find_analyzer(&records, node_id)?;

    let options = TemplateOptions {
        dropdown: args.dropdown,
        policy: if args.strict {
            RowPolicy::Strict
        } else {
            RowPolicy::Lenient
        },
        format: args.format,
        wrapper: args.wrapper,
    };

    let (template, warnings) = extract_template(&doc, node_id, &options)?;
    for warning in &warnings {
        eprintln!("warning: {warning}");
    }

    // Provenance goes to stderr so stdout stays machine-consumable.
    if args.format == OutputFormat::Yaml {
        eprintln!("# extracted from {}", args.meta.display());
        eprintln!("# {}", analyzer.summary());
    }

    print!("{template}");
    Ok(())
}
