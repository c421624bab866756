use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use scheduler::{Step, Summary};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One compact JSON document per line
    Json,
    /// Indented JSON, one document after the other
    Pretty,
}

/// A message for observers of a run
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Message<'a> {
    SimulationUpdate(&'a Step),
    SimulationEnd(Summary),
    Error(String),
}

pub fn emit(out: &mut dyn Write, format: OutputFormat, message: &Message<'_>) -> Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer(&mut *out, message)?,
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, message)?,
    }
    writeln!(out)?;
    Ok(())
}
