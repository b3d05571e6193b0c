//! `export` command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{ActualError, ActualResult};
use crate::export::{export_json, export_transactions_csv};
use crate::models::BudgetSnapshot;
use crate::session::BudgetSession;

/// Export format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Full budget snapshot
    #[default]
    Json,
    /// Transactions only
    Csv,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file (stdout when omitted)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short = 'f', long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Write the downloaded budget, then report `ok`
///
/// With no output file the export goes to stdout and `ok` to stderr, so the
/// export can be piped.
pub fn handle_export_command(session: &dyn BudgetSession, args: &ExportArgs) -> ActualResult<()> {
    let snapshot = session.export_budget()?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                ActualError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(&snapshot, args, &mut writer)?;
            writer
                .flush()
                .map_err(|e| ActualError::Export(e.to_string()))?;
            log::info!("exported budget {} to {}", snapshot.sync_id, path.display());
            println!("ok");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(&snapshot, args, &mut writer)?;
            eprintln!("ok");
        }
    }
    Ok(())
}

fn write_export<W: Write>(
    snapshot: &BudgetSnapshot,
    args: &ExportArgs,
    writer: &mut W,
) -> ActualResult<()> {
    match args.format {
        ExportFormat::Json => export_json(snapshot, writer, !args.compact),
        ExportFormat::Csv => export_transactions_csv(snapshot, writer),
    }
}
