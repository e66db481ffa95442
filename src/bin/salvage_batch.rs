//! salvage-batch: generate one YAML template per analyzer from a Logic 2
//! `.sal` session archive.
//!
//! Usage:
//!   salvage-batch --sal "/tmp/Session 6.sal" \
//!       --out-dir ./configs/analyzers \
//!       --prefix session6
//!
//! The output directory must already exist; it is never created. Exit
//! codes: 0 with at least one template written, 1 when the session holds
//! no analyzers, 2 for missing archive / missing output directory.

use anyhow::Result;
use clap::Parser;
use salvage::template::{
    analyzers, default_prefix, load_session_archive, session_name, write_templates,
};
use salvage::{DropdownMode, RowPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "salvage-batch")]
#[command(about = "Generate YAML analyzer templates from a .sal session", long_about = None)]
struct Args {
    /// Path to the .sal session file
    #[arg(long)]
    sal: PathBuf,

    /// Existing output directory to write YAML templates into
    #[arg(long)]
    out_dir: PathBuf,

    /// Filename prefix (e.g. session6). If empty, derived from the session name
    #[arg(long, default_value = "")]
    prefix: String,

    /// Emit dropdown selections as text or numeric codes
    #[arg(long, value_enum, default_value_t = DropdownMode::Text)]
    dropdown: DropdownMode,

    /// Fail on the first unresolvable setting row instead of skipping it
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    if !args.sal.is_file() {
        eprintln!("error: --sal does not exist: {}", args.sal.display());
        return Ok(ExitCode::from(2));
    }
    if !args.out_dir.is_dir() {
        eprintln!(
            "error: --out-dir is not a directory (and will not be created): {}",
            args.out_dir.display()
        );
        return Ok(ExitCode::from(2));
    }

    let doc = load_session_archive(&args.sal)?;
    let fallback = args
        .sal
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let session = session_name(&doc, &fallback);

    let prefix = match args.prefix.trim() {
        "" => default_prefix(&session),
        trimmed => trimmed.to_string(),
    };

    let records = analyzers(&doc)?;
    if records.is_empty() {
        eprintln!("no analyzers found in meta.json");
        return Ok(ExitCode::from(1));
    }

    let policy = if args.strict {
        RowPolicy::Strict
    } else {
        RowPolicy::Lenient
    };

    let written = write_templates(
        &records,
        &args.sal,
        &session,
        &args.out_dir,
        &prefix,
        args.dropdown,
        policy,
    )?;

    println!(
        "wrote {} templates to {} (prefix={:?})",
        written,
        args.out_dir.display(),
        prefix
    );
    Ok(ExitCode::SUCCESS)
}
