//! In-memory [`CatalogSearch`] / [`CatalogWriter`] implementation.
//!
//! Records live in a `BTreeMap` keyed by name behind `std::sync::RwLock`.
//! Search is an exact, non-blank comparison of every option field and,
//! like most catalog APIs, includes deleted records in its results.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use seriesload_model::{Record, RecordState};

use crate::catalog::{CatalogSearch, CatalogWriter, SearchOptions};
use crate::error::{CatalogError, CatalogResult};

/// In-memory catalog for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    records: RwLock<BTreeMap<String, Record>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog pre-populated with `records`, keyed by name.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let map = records.into_iter().map(|r| (r.name.clone(), r)).collect();
        Self {
            records: RwLock::new(map),
        }
    }

    /// Inserts or replaces a record without any validation.
    pub fn insert(&self, record: Record) -> CatalogResult<()> {
        self.write()?.insert(record.name.clone(), record);
        Ok(())
    }

    /// Marks a record deleted. The record keeps its name.
    pub fn delete(&self, name: &str) -> CatalogResult<()> {
        let mut records = self.write()?;
        let record = records
            .get_mut(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;
        record.state = RecordState::Deleted;
        Ok(())
    }

    pub fn len(&self) -> CatalogResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> CatalogResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Names of every stored record, in ascending order.
    pub fn names(&self) -> CatalogResult<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, BTreeMap<String, Record>>> {
        self.records
            .read()
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".into()))
    }

    fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, BTreeMap<String, Record>>> {
        self.records
            .write()
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".into()))
    }
}

fn matches(record: &Record, options: &SearchOptions) -> bool {
    options
        .iter()
        .all(|(key, wanted)| record.non_blank_field(key) == Some(wanted.as_str()))
}

impl CatalogSearch for InMemoryCatalog {
    fn search(&self, options: &SearchOptions) -> CatalogResult<Vec<Record>> {
        if options.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .read()?
            .values()
            .filter(|r| matches(r, options))
            .cloned()
            .collect())
    }

    fn get(&self, name: &str) -> CatalogResult<Option<Record>> {
        Ok(self.read()?.get(name).cloned())
    }
}

impl CatalogWriter for InMemoryCatalog {
    fn create(&self, record: &Record) -> CatalogResult<Record> {
        if record.name.trim().is_empty() {
            return Err(CatalogError::Rejected("record name must not be blank".into()));
        }
        let mut records = self.write()?;
        if records.contains_key(&record.name) {
            return Err(CatalogError::Rejected(format!(
                "name '{}' is already in use",
                record.name
            )));
        }
        records.insert(record.name.clone(), record.clone());
        Ok(record.clone())
    }

    fn update(&self, name: &str, record: &Record) -> CatalogResult<Record> {
        let mut records = self.write()?;
        let slot = records
            .get_mut(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;
        let mut stored = record.clone();
        stored.name = name.to_string();
        *slot = stored.clone();
        Ok(stored)
    }
}
