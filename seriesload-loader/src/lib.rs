//! Series loader for dataset catalogs.
//!
//! Takes records produced by a feed parser and reconciles each one with the
//! catalog: a record that matches nothing is created, a record that matches
//! exactly one live entry is merged into it, and a record that matches
//! several is reported and skipped.
//!
//! # Architecture
//!
//! - **Matcher**: [`FieldMatcher`] turns identity fields into search options
//! - **Catalog**: [`CatalogSearch`] / [`CatalogWriter`] abstract the backend;
//!   [`InMemoryCatalog`] is a complete in-process implementation
//! - **Loader**: [`SeriesLoader`] runs search, merge and persist per record
//! - **Batch**: [`BatchResult`] aggregates outcomes and per-record errors
//!
//! Merging itself (dates and resources) lives in `seriesload-merge`.
//!
//! # Example
//!
//! ```
//! use seriesload_loader::{InMemoryCatalog, SeriesLoader};
//! use seriesload_model::{LoaderProfile, Record};
//!
//! let catalog = InMemoryCatalog::new();
//! let loader = SeriesLoader::new(&catalog, LoaderProfile::ons_hub()).unwrap();
//!
//! let mut record = Record::new("crime-stats", "Crime statistics");
//! record.set_extra("published_by", "Home Office");
//!
//! let result = loader.load_records([record]);
//! assert_eq!(result.num_created, 1);
//! assert!(result.is_clean());
//! ```

mod batch;
mod catalog;
mod error;
mod loader;
mod matcher;
mod memory;

pub use batch::{BatchResult, RecordError};
pub use catalog::{CatalogSearch, CatalogWriter, SearchOptions};
pub use error::{CatalogError, CatalogResult, LoadError, LoadErrorKind, LoadResult};
pub use loader::{LoadOutcome, MatchDecision, SeriesLoader};
pub use matcher::FieldMatcher;
pub use memory::InMemoryCatalog;
