//! Catalog collaborator abstraction.
//!
//! The loader never owns catalog storage. It reads through [`CatalogSearch`]
//! and writes through [`CatalogWriter`], so any backend (an HTTP API client,
//! a database, the [`InMemoryCatalog`](crate::InMemoryCatalog)) can sit behind it.
//! Calls are synchronous; retries and timeouts belong to the implementation.

use crate::error::CatalogResult;
use seriesload_model::Record;
use std::collections::BTreeMap;

/// Field values a candidate record must carry, keyed by field name.
///
/// Keys name top-level fields or extras; see [`Record::field`].
pub type SearchOptions = BTreeMap<String, String>;

/// Read side of the catalog.
pub trait CatalogSearch {
    /// Returns candidate records matching the option values.
    ///
    /// Backends may be fuzzy and may include deleted records; the loader
    /// confirms and filters candidates itself.
    fn search(&self, options: &SearchOptions) -> CatalogResult<Vec<Record>>;

    /// Looks up a record by its unique name, whatever its state.
    fn get(&self, name: &str) -> CatalogResult<Option<Record>>;
}

/// Write side of the catalog.
pub trait CatalogWriter {
    /// Stores a new record and returns it as stored.
    fn create(&self, record: &Record) -> CatalogResult<Record>;

    /// Replaces the record called `name` and returns it as stored.
    fn update(&self, name: &str, record: &Record) -> CatalogResult<Record>;
}

impl<T: CatalogSearch + ?Sized> CatalogSearch for &T {
    fn search(&self, options: &SearchOptions) -> CatalogResult<Vec<Record>> {
        (**self).search(options)
    }

    fn get(&self, name: &str) -> CatalogResult<Option<Record>> {
        (**self).get(name)
    }
}

impl<T: CatalogWriter + ?Sized> CatalogWriter for &T {
    fn create(&self, record: &Record) -> CatalogResult<Record> {
        (**self).create(record)
    }

    fn update(&self, name: &str, record: &Record) -> CatalogResult<Record> {
        (**self).update(name, record)
    }
}
