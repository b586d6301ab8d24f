//! Tabular export of stored grilse probabilities.

use super::ProbabilityRecord;
use crate::error::CoreError;

/// Export column order.
pub const EXPORT_HEADERS: [&str; 4] = ["Season", "Month", "Weight", "Probability"];

/// Render records as comma-delimited text, one line per record, in the
/// order given. Months are written as 1-based ordinals and probabilities in
/// their shortest exact decimal form.
pub fn export_csv(records: &[ProbabilityRecord]) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS).map_err(write_failed)?;
    for record in records {
        writer
            .write_record([
                record.season.to_string(),
                record.month.to_string(),
                record.mass_lbs.to_string(),
                record.probability.normalize().to_string(),
            ])
            .map_err(write_failed)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("Failed to finish export: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Internal(format!("Export is not UTF-8: {e}")))
}

fn write_failed(err: csv::Error) -> CoreError {
    CoreError::Internal(format!("Failed to write export: {err}"))
}
