mod export;
mod parser;

use crate::workflows::scoring::Lead;
use std::io::Read;
use std::path::Path;

pub use export::export_results;

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    Empty,
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead file: {}", err),
            LeadImportError::Csv(err) => write!(f, "Failed to parse CSV: {}", err),
            LeadImportError::MissingColumn(column) => {
                write!(f, "Missing column in CSV: {}", column)
            }
            LeadImportError::Empty => f.write_str("Failed to parse CSV: no header row found"),
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
            LeadImportError::MissingColumn(_) | LeadImportError::Empty => None,
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads lead uploads in the `name,role,company,industry,location,linkedin_bio` layout.
pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Lead>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Lead>, LeadImportError> {
        parser::parse_leads(reader)
    }
}
