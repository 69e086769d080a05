//! Whole-dataset processing.

use crate::io::DatasetReport;
use crate::record::RowRecord;
use crate::validator::{RowData, RowError, RowValidator};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Validate every row, in input order. A failing row never stops the others.
pub fn process_rows(
    validator: &RowValidator,
    rows: &[RowRecord],
) -> Vec<Result<RowData, RowError>> {
    #[cfg(feature = "rayon")]
    let results = rows.par_iter().map(|r| validator.process(r)).collect();
    #[cfg(not(feature = "rayon"))]
    let results = rows.iter().map(|r| validator.process(r)).collect();
    results
}

/// [`process_rows`] folded into a report, logging a one-line summary.
pub fn validate_dataset(validator: &RowValidator, rows: &[RowRecord]) -> DatasetReport {
    let results = process_rows(validator, rows);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        log::warn!("{err}");
    }
    let report = DatasetReport::from_results(&results);
    let s = &report.summary;
    log::info!(
        "{} rows: {} valid, {} usable rotations, {} usable translations, {} aborted ({} unsupported)",
        s.rows,
        s.valid,
        s.usable_rotation,
        s.usable_translation,
        s.errors,
        s.unsupported
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_gives_empty_report() {
        let report = validate_dataset(&RowValidator::default(), &[]);
        assert_eq!(report.summary.rows, 0);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn unknown_joint_row_is_reported_not_fatal() {
        let rows = vec![
            RowRecord {
                author: "A".into(),
                joint: "elbow".into(),
                ..RowRecord::default()
            },
            RowRecord {
                author: "B".into(),
                joint: "glenohumeral".into(),
                ..RowRecord::default()
            },
        ];
        let results = process_rows(&RowValidator::default(), &rows);
        assert_eq!(results.len(), 2);
        let report = DatasetReport::from_results(&results);
        assert_eq!(report.rows[0].author, "A");
        assert_eq!(report.rows[1].author, "B");
        assert!(!report.rows[0].valid);
    }
}
