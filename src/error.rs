//! Failures that can occur while trimming or annotating a single report

use thiserror::Error;

/// Record indices are zero based data row indices, matching the index column
/// of the annotated output
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PileupError {
    #[error("Header marker '{marker}' not found")]
    MissingMarker { marker: String },

    #[error("Malformed INFO field at record {record}: {msg}")]
    MalformedInfoField { record: usize, msg: String },

    #[error("Non numeric depth '{token}' at record {record}")]
    NonNumericDepth { record: usize, token: String },

    #[error("Depth '{token}' at record {record} is too large")]
    DepthTooLarge { record: usize, token: String },

    #[error("Total depth is zero at record {record}")]
    ZeroTotalDepth { record: usize },

    #[error("Required column {column} missing from header")]
    MissingColumn { column: String },

    #[error("Record {record} has {seen} fields (expected at least {expected})")]
    ShortRecord {
        record: usize,
        expected: usize,
        seen: usize,
    },

    #[error("No data records found")]
    EmptyTable,
}
