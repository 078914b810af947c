use super::LeadImportError;
use crate::workflows::scoring::Lead;
use std::io::Read;

const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "role",
    "company",
    "industry",
    "location",
    "linkedin_bio",
];

pub(crate) fn parse_leads<R: Read>(reader: R) -> Result<Vec<Lead>, LeadImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() {
        return Err(LeadImportError::Empty);
    }

    let mut indices = [0usize; 6];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|header| header == column)
            .ok_or(LeadImportError::MissingColumn(column))?;
    }

    let mut leads = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let field = |index: usize| record.get(index).unwrap_or_default().to_string();

        leads.push(Lead {
            name: field(indices[0]),
            role: field(indices[1]),
            company: field(indices[2]),
            industry: field(indices[3]),
            location: field(indices[4]),
            linkedin_bio: field(indices[5]),
        });
    }

    Ok(leads)
}

fn normalize_header(value: &str) -> String {
    value.replace('\u{feff}', "").trim().to_string()
}
