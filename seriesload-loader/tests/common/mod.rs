//! Shared fixtures for loader integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use seriesload_loader::{
    CatalogError, CatalogResult, CatalogSearch, CatalogWriter, InMemoryCatalog, SearchOptions,
};
use seriesload_model::{Record, Resource};

pub const HUB_ID: &str = "hub-id";
pub const TREASURY: &str = "Her Majesty's Treasury [12]";
pub const ONS: &str = "Office for National Statistics [8]";
pub const DEFRA: &str = "Department for Environment, Food and Rural Affairs [14]";

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn resource(hub_id: &str, description: &str) -> Resource {
    Resource::new("http://www.hm-treasury.gov.uk/national_statistics.htm", description)
        .with_extra(HUB_ID, hub_id)
}

/// A feed record shaped like an ONS hub entry, with `date_updated` left
/// blank as the feed delivers it.
pub fn ons_record(
    name: &str,
    title: &str,
    published_by: &str,
    date_released: &str,
    resources: Vec<Resource>,
) -> Record {
    let mut record = Record::new(name, title);
    record.set_field("author", "Her Majesty's Treasury");
    record.set_field("license_id", "uk-ogl");
    record.set_extra("published_by", published_by);
    record.set_extra("published_via", "");
    record.set_extra("geographic_coverage", "111100: United Kingdom (England, Scotland, Wales, Northern Ireland)");
    record.set_extra("geographical_granularity", "UK and GB");
    record.set_extra("external_reference", "ONSHUB");
    record.set_extra("date_released", date_released);
    record.set_extra("date_updated", "");
    record.resources = resources;
    record
}

pub fn reserves(date_released: &str, resources: Vec<Resource>) -> Record {
    ons_record(
        "uk_official_holdings_of_international_reserves",
        "UK Official Holdings of International Reserves",
        TREASURY,
        date_released,
        resources,
    )
}

pub fn hub_ids(record: &Record) -> Vec<&str> {
    record
        .resources
        .iter()
        .filter_map(|r| r.extra(HUB_ID))
        .collect()
}

pub fn stored(catalog: &InMemoryCatalog, name: &str) -> Record {
    catalog
        .get(name)
        .unwrap()
        .unwrap_or_else(|| panic!("record '{name}' not in catalog"))
}

/// Wraps an in-memory catalog and fails selected operations on demand.
#[derive(Default)]
pub struct FlakyCatalog {
    pub inner: InMemoryCatalog,
    pub fail_search: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FlakyCatalog {
    pub fn new(inner: InMemoryCatalog) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn set_fail_search(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl CatalogSearch for FlakyCatalog {
    fn search(&self, options: &SearchOptions) -> CatalogResult<Vec<Record>> {
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("search index offline".into()));
        }
        self.inner.search(options)
    }

    fn get(&self, name: &str) -> CatalogResult<Option<Record>> {
        self.inner.get(name)
    }
}

impl CatalogWriter for FlakyCatalog {
    fn create(&self, record: &Record) -> CatalogResult<Record> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CatalogError::Rejected("write access denied".into()));
        }
        self.inner.create(record)
    }

    fn update(&self, name: &str, record: &Record) -> CatalogResult<Record> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CatalogError::Rejected("write access denied".into()));
        }
        self.inner.update(name, record)
    }
}

/// Returns every candidate regardless of the query, like a fuzzy text search.
pub struct FuzzyCatalog(pub InMemoryCatalog);

impl CatalogSearch for FuzzyCatalog {
    fn search(&self, _options: &SearchOptions) -> CatalogResult<Vec<Record>> {
        let mut all = Vec::new();
        for name in self.0.names()? {
            if let Some(record) = self.0.get(&name)? {
                all.push(record);
            }
        }
        Ok(all)
    }

    fn get(&self, name: &str) -> CatalogResult<Option<Record>> {
        self.0.get(name)
    }
}

impl CatalogWriter for FuzzyCatalog {
    fn create(&self, record: &Record) -> CatalogResult<Record> {
        self.0.create(record)
    }

    fn update(&self, name: &str, record: &Record) -> CatalogResult<Record> {
        self.0.update(name, record)
    }
}
