//! Export CLI command

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{CostError, CostResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV (cost records, or group totals with --summary)
    Csv,
    /// JSON (everything)
    Json,
    /// YAML (everything, human-readable)
    Yaml,
}

/// Arguments for `overhead export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path, or "-" for stdout
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// CSV only: export group totals instead of cost records
    #[arg(long)]
    pub summary: bool,

    /// JSON only: write on a single line
    #[arg(long)]
    pub compact: bool,
}

fn write_export<W: Write>(storage: &Storage, args: &ExportArgs, writer: W) -> CostResult<()> {
    match args.format {
        ExportFormat::Csv if args.summary => csv::export_summary_csv(storage, writer),
        ExportFormat::Csv => csv::export_costs_csv(storage, writer),
        ExportFormat::Json => json::export_full_json(storage, writer, !args.compact),
        ExportFormat::Yaml => yaml::export_full_yaml(storage, writer),
    }
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> CostResult<()> {
    if args.summary && args.format != ExportFormat::Csv {
        return Err(CostError::Validation(
            "--summary only applies to --format csv".into(),
        ));
    }

    if args.output.as_os_str() == "-" {
        let stdout = io::stdout();
        return write_export(storage, &args, stdout.lock());
    }

    let file = File::create(&args.output).map_err(|e| {
        CostError::Export(format!(
            "Failed to create file {}: {}",
            args.output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);
    write_export(storage, &args, &mut writer)?;
    writer
        .flush()
        .map_err(|e| CostError::Export(e.to_string()))?;

    tracing::info!(path = %args.output.display(), format = ?args.format, "export written");
    println!(
        "Exported {} cost(s) to: {}",
        storage.costs.count()?,
        args.output.display()
    );
    Ok(())
}
