//! Error types for catalog construction and loading.
//!
//! Every way a catalog can be malformed maps to a [`CatalogError`] variant.
//! Viewport misses (clicks outside the plot, angles outside the sky) and
//! empty catalogs are not errors and never produce one.

use thiserror::Error;

/// A catalog that cannot be turned into a valid [`StarCatalog`](crate::StarCatalog).
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A right ascension field is outside its legal range.
    #[error("record {index} (id {catalog_id}): right ascension {field} out of range: {value}")]
    RightAscensionOutOfRange {
        index: usize,
        catalog_id: u64,
        field: &'static str,
        value: f64,
    },

    /// A declination field is outside its legal range.
    #[error("record {index} (id {catalog_id}): declination {field} out of range: {value}")]
    DeclinationOutOfRange {
        index: usize,
        catalog_id: u64,
        field: &'static str,
        value: f64,
    },

    /// A floating-point field is NaN or infinite.
    #[error("record {index} (id {catalog_id}): {field} is not finite")]
    NonFiniteField {
        index: usize,
        catalog_id: u64,
        field: &'static str,
    },

    /// Records are not in ascending right ascension order.
    #[error("catalog not sorted by right ascension at record {index}: {previous} > {current}")]
    Unsorted {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// A raw input record could not be decoded.
    #[error("record {index}: {message}")]
    Decode { index: usize, message: String },

    /// The input as a whole could not be read as a catalog.
    #[error("malformed catalog document: {message}")]
    Format { message: String },
}

/// Convenience alias for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Index of the offending record in the input sequence, if any.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            Self::RightAscensionOutOfRange { index, .. }
            | Self::DeclinationOutOfRange { index, .. }
            | Self::NonFiniteField { index, .. }
            | Self::Unsorted { index, .. }
            | Self::Decode { index, .. } => Some(*index),
            Self::Format { .. } => None,
        }
    }
}
