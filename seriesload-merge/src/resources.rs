//! Resource list reconciliation keyed by a stable external identifier.

use crate::error::{MergeError, MergeResult};
use seriesload_model::Resource;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A resource identifier ordered naturally: digit runs compare as numbers,
/// everything else compares as text.
///
/// `"77-27942" < "119-31784" < "119-37085"`. Identifiers that are equal
/// run-by-run (e.g. `"7"` and `"07"`) fall back to plain string order, so
/// the ordering is total and only identical strings compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey(String);

impl ResourceKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for ResourceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for ResourceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares two identifiers in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = runs(a);
    let mut right = runs(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_runs(x, y) {
                Ordering::Equal => {}
                ord => return ord,
            },
        }
    }
}

/// Splits a string into maximal runs of ASCII digits and non-digits.
fn runs(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let digit = rest.chars().next()?.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(run)
    })
}

fn compare_runs(x: &str, y: &str) -> Ordering {
    let both_numeric = x.as_bytes()[0].is_ascii_digit() && y.as_bytes()[0].is_ascii_digit();
    if !both_numeric {
        return x.cmp(y);
    }
    // Arbitrary-length numbers: fewer significant digits is smaller.
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Returns the identifier of a resource, or an error naming the resource.
pub fn resource_identifier<'r>(resource: &'r Resource, field: &str) -> MergeResult<&'r str> {
    resource
        .extra(field)
        .ok_or_else(|| MergeError::IdentifierMissing {
            field: field.to_string(),
            resource: describe(resource),
        })
}

fn describe(resource: &Resource) -> String {
    match (resource.description.is_empty(), resource.url.is_empty()) {
        (false, false) => format!("'{}' <{}>", resource.description, resource.url),
        (false, true) => format!("'{}'", resource.description),
        (true, false) => format!("<{}>", resource.url),
        (true, true) => "<unnamed resource>".to_string(),
    }
}

/// Checks that every resource has an identifier and that no two share one.
///
/// A list that passes can later serve as the existing side of
/// [`merge_resources`].
pub fn check_resources(resources: &[Resource], identifier_field: &str) -> MergeResult<()> {
    keyed_unique(resources, identifier_field).map(|_| ())
}

fn keyed_unique<'r>(
    resources: &'r [Resource],
    identifier_field: &str,
) -> MergeResult<BTreeMap<ResourceKey, &'r Resource>> {
    let mut keyed = BTreeMap::new();
    for resource in resources {
        let key = ResourceKey::new(resource_identifier(resource, identifier_field)?);
        if keyed.contains_key(&key) {
            return Err(MergeError::DuplicateIdentifier {
                field: identifier_field.to_string(),
                identifier: key.0,
            });
        }
        keyed.insert(key, resource);
    }
    Ok(keyed)
}

/// Merges `incoming` resources into `existing` by identifier.
///
/// Every resource on both sides is checked for an identifier before any
/// merging happens. An incoming resource whose identifier is already present
/// replaces that entry wholesale; otherwise it is added. The result is sorted
/// by [`ResourceKey`] and never holds two resources with one identifier.
///
/// Two existing resources sharing an identifier is reported as
/// [`MergeError::DuplicateIdentifier`] rather than silently collapsed.
pub fn merge_resources(
    existing: &[Resource],
    incoming: &[Resource],
    identifier_field: &str,
) -> MergeResult<Vec<Resource>> {
    let mut merged: BTreeMap<ResourceKey, Resource> = keyed_unique(existing, identifier_field)?
        .into_iter()
        .map(|(key, resource)| (key, resource.clone()))
        .collect();

    let keyed_incoming = incoming
        .iter()
        .map(|r| resource_identifier(r, identifier_field).map(|id| (ResourceKey::new(id), r)))
        .collect::<MergeResult<Vec<_>>>()?;

    for (key, resource) in keyed_incoming {
        merged.insert(key, resource.clone());
    }

    Ok(merged.into_values().collect())
}
