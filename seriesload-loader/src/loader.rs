//! Series loader: matches incoming records against the catalog and either
//! creates them or merges them into their existing counterpart.
//!
//! Each record goes through `SEARCHING -> {CREATING | MERGING | AMBIGUOUS}`.
//! Search and persistence go through the catalog collaborator; everything
//! in between is pure and works on copies of the records involved.

use std::collections::BTreeMap;

use seriesload_merge::{apply_date_rules, check_resources, merge_resources, MergeError};
use seriesload_model::{LoaderProfile, ProfileResult, Record};
use tracing::{debug, info, warn};

use crate::batch::BatchResult;
use crate::catalog::{CatalogSearch, CatalogWriter, SearchOptions};
use crate::error::{LoadError, LoadResult};
use crate::matcher::FieldMatcher;

/// Suffix appended to a taken name until a free one is found.
const NAME_SUFFIX: char = '_';

/// What the search step decided for one incoming record.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchDecision {
    /// No live record matches; the incoming record is new.
    Create,
    /// Exactly one live record matches.
    Merge(Record),
    /// Several live records match; holds their names.
    Ambiguous(Vec<String>),
}

/// Result of successfully loading one record.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Created(Record),
    Updated(Record),
}

impl LoadOutcome {
    /// The record as stored by the catalog.
    pub fn record(&self) -> &Record {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }

    pub fn into_record(self) -> Record {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }
}

/// Reconciles incoming records against a catalog using one [`LoaderProfile`].
pub struct SeriesLoader<C> {
    catalog: C,
    profile: LoaderProfile,
    matcher: FieldMatcher,
}

impl<C> SeriesLoader<C>
where
    C: CatalogSearch + CatalogWriter,
{
    /// Creates a loader, rejecting an unusable profile up front.
    pub fn new(catalog: C, profile: LoaderProfile) -> ProfileResult<Self> {
        profile.validate()?;
        let matcher = FieldMatcher::from_profile(&profile);
        Ok(Self {
            catalog,
            profile,
            matcher,
        })
    }

    pub fn profile(&self) -> &LoaderProfile {
        &self.profile
    }

    pub fn matcher(&self) -> &FieldMatcher {
        &self.matcher
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Loads a sequence of records in order.
    ///
    /// Per-record failures are logged and collected; they never stop the
    /// batch.
    pub fn load_records<I>(&self, records: I) -> BatchResult
    where
        I: IntoIterator<Item = Record>,
    {
        let mut result = BatchResult::new();
        for record in records {
            match self.load_record(&record) {
                Ok(outcome) => result.record_outcome(&outcome),
                Err(e) => {
                    warn!(record = %record.name, title = %record.title, error = %e, "record not loaded");
                    result.record_error(&record, &e);
                }
            }
        }

        info!(
            records = result.num_records,
            created = result.num_created,
            updated = result.num_updated,
            errors = result.num_errors,
            "batch loaded"
        );
        result
    }

    /// Loads a single record, creating or updating its catalog entry.
    pub fn load_record(&self, record: &Record) -> LoadResult<LoadOutcome> {
        match self.classify(record)? {
            MatchDecision::Create => {
                let new_record = self.prepare_new(record)?;
                let stored = self
                    .catalog
                    .create(&new_record)
                    .map_err(LoadError::transport(&record.name))?;
                info!(record = %stored.name, resources = stored.resources.len(), "created record");
                Ok(LoadOutcome::Created(stored))
            }
            MatchDecision::Merge(existing) => {
                let merged = self.merge(&existing, record)?;
                let stored = self
                    .catalog
                    .update(&existing.name, &merged)
                    .map_err(LoadError::transport(&record.name))?;
                info!(
                    record = %stored.name,
                    incoming = %record.name,
                    resources = stored.resources.len(),
                    "updated record"
                );
                Ok(LoadOutcome::Updated(stored))
            }
            MatchDecision::Ambiguous(candidates) => Err(LoadError::AmbiguousMatch {
                record: record.name.clone(),
                candidates,
            }),
        }
    }

    /// Searches the catalog with each option set in priority order.
    ///
    /// Deleted candidates and candidates that do not carry every option
    /// value exactly are discarded. The first option set with exactly one
    /// match decides; otherwise any set with several matches makes the
    /// record ambiguous.
    pub fn classify(&self, record: &Record) -> LoadResult<MatchDecision> {
        let mut ambiguous: Option<Vec<String>> = None;

        for options in self.matcher.build_search_options(record) {
            let mut candidates = self.confirmed_candidates(record, &options)?;
            debug!(record = %record.name, candidates = candidates.len(), "searched catalog");

            match candidates.len() {
                0 => {}
                1 => {
                    if let Some(existing) = candidates.pop() {
                        debug!(record = %record.name, existing = %existing.name, "matched record");
                        return Ok(MatchDecision::Merge(existing));
                    }
                }
                _ => {
                    if ambiguous.is_none() {
                        ambiguous = Some(candidates.into_iter().map(|c| c.name).collect());
                    }
                }
            }
        }

        Ok(match ambiguous {
            Some(names) => MatchDecision::Ambiguous(names),
            None => MatchDecision::Create,
        })
    }

    fn confirmed_candidates(
        &self,
        record: &Record,
        options: &SearchOptions,
    ) -> LoadResult<Vec<Record>> {
        let found = self
            .catalog
            .search(options)
            .map_err(LoadError::transport(&record.name))?;

        let mut by_name = BTreeMap::new();
        for candidate in found {
            let confirmed = !candidate.is_deleted()
                && options
                    .iter()
                    .all(|(key, value)| candidate.non_blank_field(key) == Some(value.as_str()));
            if confirmed {
                by_name.entry(candidate.name.clone()).or_insert(candidate);
            }
        }
        Ok(by_name.into_values().collect())
    }

    /// Builds a brand-new record from `incoming`.
    ///
    /// Resources must carry unique identifiers so later loads can merge into
    /// the record. Date rules run against an empty existing record, so the
    /// stored dates are already resolved and a reload leaves them unchanged.
    fn prepare_new(&self, incoming: &Record) -> LoadResult<Record> {
        check_resources(&incoming.resources, &self.profile.resource_identifier_field)
            .map_err(|e| resource_error(&incoming.name, e))?;

        let mut new_record = incoming.clone();
        apply_date_rules(&Record::default(), &mut new_record, &self.profile.date_rules);
        new_record.name = self.unique_name(&incoming.name)?;
        Ok(new_record)
    }

    /// Builds the next state of `existing` from `incoming`.
    ///
    /// The result keeps the existing name and state. Extras and other
    /// scalars are the existing values overlaid with the incoming ones,
    /// with date rules applied and resources merged by identifier.
    pub fn merge(&self, existing: &Record, incoming: &Record) -> LoadResult<Record> {
        self.check_invariants(existing, incoming)?;

        let mut incoming = incoming.clone();
        apply_date_rules(existing, &mut incoming, &self.profile.date_rules);

        let resources = merge_resources(
            &existing.resources,
            &incoming.resources,
            &self.profile.resource_identifier_field,
        )
        .map_err(|e| resource_error(&incoming.name, e))?;

        let mut extras = existing.extras.clone();
        extras.extend(incoming.extras);
        let mut fields = existing.fields.clone();
        fields.extend(incoming.fields);

        Ok(Record {
            name: existing.name.clone(),
            title: incoming.title,
            state: existing.state,
            extras,
            resources,
            fields,
        })
    }

    fn check_invariants(&self, existing: &Record, incoming: &Record) -> LoadResult<()> {
        for field in &self.profile.invariant_fields {
            if let (Some(old), Some(new)) =
                (existing.non_blank_field(field), incoming.non_blank_field(field))
            {
                if old != new {
                    return Err(LoadError::InvariantMismatch {
                        record: incoming.name.clone(),
                        field: field.clone(),
                        existing: old.to_string(),
                        incoming: new.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns `name`, or `name` followed by as many `_` as needed to be
    /// free in the catalog. Deleted records still hold their names.
    pub fn unique_name(&self, name: &str) -> LoadResult<String> {
        let mut candidate = name.to_string();
        while self
            .catalog
            .get(&candidate)
            .map_err(LoadError::transport(name))?
            .is_some()
        {
            candidate.push(NAME_SUFFIX);
        }
        if candidate != name {
            debug!(record = %name, assigned = %candidate, "name taken, using suffixed name");
        }
        Ok(candidate)
    }
}

fn resource_error(record: &str, error: MergeError) -> LoadError {
    match error {
        MergeError::IdentifierMissing { resource, .. } => LoadError::IdentifierMissing {
            record: record.to_string(),
            resource,
        },
        MergeError::DuplicateIdentifier { identifier, .. } => LoadError::DuplicateIdentifier {
            record: record.to_string(),
            identifier,
        },
    }
}
