mod common;

use common::{reserves, resource, TREASURY};
use pretty_assertions::assert_eq;
use seriesload_loader::{CatalogError, CatalogSearch, CatalogWriter, InMemoryCatalog, SearchOptions};
use seriesload_model::{Record, RecordState};

fn by_title(title: &str) -> SearchOptions {
    [("title".to_string(), title.to_string())].into_iter().collect()
}

// ── Search ───────────────────────────────────────────────────────

#[test]
fn search_matches_every_option_exactly() {
    let catalog = InMemoryCatalog::with_records([
        reserves("2010-01-06", vec![]),
        Record::new("other", "UK Official Holdings of International Reserves (revised)"),
    ]);

    let mut options = by_title("UK Official Holdings of International Reserves");
    options.insert("published_by".into(), TREASURY.into());

    let found = catalog.search(&options).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "uk_official_holdings_of_international_reserves");

    options.insert("published_by".into(), "Ministry of Justice".into());
    assert!(catalog.search(&options).unwrap().is_empty());
}

#[test]
fn search_includes_deleted_records() {
    let catalog = InMemoryCatalog::with_records([reserves("2010-01-06", vec![])]);
    catalog
        .delete("uk_official_holdings_of_international_reserves")
        .unwrap();

    let found = catalog
        .search(&by_title("UK Official Holdings of International Reserves"))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].state, RecordState::Deleted);
}

#[test]
fn empty_options_match_nothing() {
    let catalog = InMemoryCatalog::with_records([reserves("2010-01-06", vec![])]);
    assert!(catalog.search(&SearchOptions::new()).unwrap().is_empty());
}

// ── Writes ───────────────────────────────────────────────────────

#[test]
fn create_then_get() {
    let catalog = InMemoryCatalog::new();
    let record = reserves("2010-01-06", vec![resource("119-36345", "December 2009")]);

    let stored = catalog.create(&record).unwrap();

    assert_eq!(stored, record);
    assert_eq!(catalog.get(&record.name).unwrap(), Some(record));
    assert_eq!(catalog.len().unwrap(), 1);
}

#[test]
fn create_rejects_taken_and_blank_names() {
    let catalog = InMemoryCatalog::with_records([Record::new("taken", "Taken")]);

    assert!(matches!(
        catalog.create(&Record::new("taken", "Again")),
        Err(CatalogError::Rejected(_))
    ));
    assert!(matches!(
        catalog.create(&Record::new("  ", "Blank")),
        Err(CatalogError::Rejected(_))
    ));
    assert_eq!(catalog.names().unwrap(), vec!["taken".to_string()]);
}

#[test]
fn update_keeps_the_stored_name() {
    let catalog = InMemoryCatalog::with_records([Record::new("kept", "Old title")]);

    let stored = catalog
        .update("kept", &Record::new("renamed", "New title"))
        .unwrap();

    assert_eq!(stored.name, "kept");
    assert_eq!(stored.title, "New title");
    assert_eq!(catalog.get("renamed").unwrap(), None);
}

#[test]
fn update_and_delete_of_unknown_record_fail() {
    let catalog = InMemoryCatalog::new();

    assert_eq!(
        catalog.update("ghost", &Record::new("ghost", "Ghost")),
        Err(CatalogError::NotFound("ghost".into()))
    );
    assert_eq!(catalog.delete("ghost"), Err(CatalogError::NotFound("ghost".into())));
    assert!(catalog.is_empty().unwrap());
}
