//! Identity search construction.

use seriesload_model::{FallbackRule, LoaderProfile, Record};
use tracing::debug;

use crate::catalog::SearchOptions;

/// Builds catalog search options from a record's identity fields.
///
/// Blank fields are left out of the query. When the fallback's primary
/// field is blank, its secondary field is queried in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatcher {
    identity_fields: Vec<String>,
    fallback: Option<FallbackRule>,
}

impl FieldMatcher {
    pub fn new(identity_fields: Vec<String>, fallback: Option<FallbackRule>) -> Self {
        Self {
            identity_fields,
            fallback,
        }
    }

    pub fn from_profile(profile: &LoaderProfile) -> Self {
        Self::new(profile.identity_fields.clone(), profile.fallback.clone())
    }

    pub fn identity_fields(&self) -> &[String] {
        &self.identity_fields
    }

    /// Returns the search option sets for `record`, in priority order.
    ///
    /// A record with no usable identity value yields no option sets, which
    /// the loader treats as "nothing to match".
    pub fn build_search_options(&self, record: &Record) -> Vec<SearchOptions> {
        let mut options = SearchOptions::new();
        for field in &self.identity_fields {
            let key = self.resolve_field(field, record);
            if let Some(value) = record.non_blank_field(key) {
                options.insert(key.to_string(), value.to_string());
            }
        }

        debug!(record = %record.name, ?options, "built identity search");
        if options.is_empty() {
            Vec::new()
        } else {
            vec![options]
        }
    }

    fn resolve_field<'a>(&'a self, field: &'a str, record: &Record) -> &'a str {
        match &self.fallback {
            Some(rule) if rule.primary == field && record.non_blank_field(field).is_none() => {
                &rule.secondary
            }
            _ => field,
        }
    }
}
