use crate::workflows::scoring::ScoredResult;

/// Serialize results as CSV, header row first.
pub fn export_results(results: &[ScoredResult]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for result in results {
        writer.serialize(result)?;
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
