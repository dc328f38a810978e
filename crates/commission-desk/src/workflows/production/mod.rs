//! Production report ingestion.
//!
//! Turns an uploaded CSV export into [`OperatorRecord`]s: the delimiter is
//! sniffed from the header line, headers are matched against known aliases,
//! and numeric fields are coerced leniently. Missing required columns are the
//! only hard failure.

mod mapping;
mod normalizer;
mod parser;

pub use normalizer::parse_number;

use crate::workflows::commission::OperatorRecord;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum ProductionImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumns(Vec<&'static str>),
}

impl std::fmt::Display for ProductionImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductionImportError::Io(err) => {
                write!(f, "failed to read production report: {}", err)
            }
            ProductionImportError::Csv(err) => write!(f, "invalid production CSV data: {}", err),
            ProductionImportError::MissingColumns(columns) => write!(
                f,
                "production report is missing required columns: {}",
                columns.join(", ")
            ),
        }
    }
}

impl std::error::Error for ProductionImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProductionImportError::Io(err) => Some(err),
            ProductionImportError::Csv(err) => Some(err),
            ProductionImportError::MissingColumns(_) => None,
        }
    }
}

impl From<std::io::Error> for ProductionImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProductionImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ProductionImporter;

impl ProductionImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<OperatorRecord>, ProductionImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<OperatorRecord>, ProductionImportError> {
        let records = parser::parse_records(reader)?;
        info!(rows = records.len(), "production report imported");
        Ok(records)
    }
}
