//! Error types for region lookup, input validation, and geometry repair.

use thiserror::Error;

use crate::types::RegionId;

/// Errors surfaced by the prediction core.
///
/// Geometry failures are collected per region during normalization and never
/// abort the batch; the other variants abort a single build request and leave
/// the loaded tables and geometry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Region geometry was unrepairable and was excluded from the
    /// normalized output.
    #[error("Unrepairable geometry for region '{region}'")]
    GeometryInvalid { region: RegionId },

    /// Requested region is absent from the region table.
    #[error("Region not found: '{region}'")]
    RegionNotFound { region: String },

    /// Region name matches more than one table row. Duplicate names are a
    /// data-integrity violation in the loaded dataset, not a usage error.
    #[error("Region '{region}' matches {count} rows in the region table")]
    AmbiguousRegion { region: String, count: usize },

    /// User-supplied scalar was non-finite or outside its declared range.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },
}
