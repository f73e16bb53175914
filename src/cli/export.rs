//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{BasketError, BasketResult};
use crate::export::{csv, json, yaml};
use crate::services::Basket;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON (full data with totals)
    Json,
    /// YAML (full data with totals, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export everything, including totals and the shopping list
    All {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export budget items to CSV
    Items {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Export the shopping list to CSV
    #[command(alias = "list")]
    Shopping {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(basket: &Basket, cmd: ExportCommands) -> BasketResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => write_to(output.as_deref(), |w| match format {
            ExportFormat::Json => json::export_full_json(basket, w, pretty),
            ExportFormat::Yaml => yaml::export_full_yaml(basket, w),
        }),
        ExportCommands::Items { output } => {
            write_to(output.as_deref(), |w| csv::export_items_csv(basket, w))
        }
        ExportCommands::Shopping { output } => {
            write_to(output.as_deref(), |w| csv::export_shopping_list_csv(basket, w))
        }
    }
}

fn write_to<F>(output: Option<&Path>, export: F) -> BasketResult<()>
where
    F: FnOnce(&mut dyn Write) -> BasketResult<()>,
{
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BasketError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export(&mut writer)?;
            writer
                .flush()
                .map_err(|e| BasketError::Export(e.to_string()))?;
            eprintln!("Exported to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export(&mut writer)?;
            writeln!(writer).map_err(|e| BasketError::Export(e.to_string()))?;
        }
    }
    Ok(())
}
