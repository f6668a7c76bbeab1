use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use polars::{
    frame::DataFrame,
    io::SerReader,
    prelude::{CsvReader, ParquetReader, ParquetWriter},
};

/// Reads a CSV file from `path` into a Polars DataFrame.
pub fn read_from_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    let df = CsvReader::new(file).finish()?;
    Ok(df)
}

/// Reads a Parquet file from `path` into a Polars DataFrame.
pub fn read_from_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open Parquet file: {}", path.display()))?;
    let df = ParquetReader::new(file).finish()?;
    Ok(df)
}

/// Writes a Polars DataFrame to a Parquet file at `path`.
pub fn write_to_parquet(mut df: DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create Parquet file: {}", path.display()))?;
    let writer: BufWriter<File> = BufWriter::new(file);
    ParquetWriter::new(writer).finish(&mut df)?;
    Ok(())
}
