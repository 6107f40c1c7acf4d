//! Loaders for raw star catalog formats.
//!
//! Each loader turns its input into [`StarRecord`](crate::StarRecord)s and
//! hands them to [`StarCatalog::new`](crate::StarCatalog::new), which
//! validates and orders them.

pub mod delimited;
pub mod sao;

pub use delimited::{load_delimited_catalog, load_delimited_catalog_from_file};
pub use sao::{load_sao_catalog, load_sao_catalog_from_file};
