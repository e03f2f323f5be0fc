//! Date conflict resolution between two merge generations.
//!
//! Dates are compared as points in time but the winner is returned as the
//! original raw string, so a merge never rewrites a publisher's formatting.

use crate::flexidate::FlexiDate;
use seriesload_model::{DatePolicy, DateRule, Record};

/// Picks the earliest or latest of an existing and an incoming raw date.
///
/// Missing, blank or unparseable values have no opinion. If neither side
/// parses the result is `None`; if one side parses it wins unchanged. When
/// both parse and denote the same instant the incoming value wins.
#[must_use]
pub fn choose_date<'a>(
    existing: Option<&'a str>,
    incoming: Option<&'a str>,
    policy: DatePolicy,
) -> Option<&'a str> {
    let parsed = |raw: Option<&'a str>| raw.and_then(|r| FlexiDate::parse(r).map(|d| (r, d)));

    match (parsed(existing), parsed(incoming)) {
        (None, None) => None,
        (Some((raw, _)), None) | (None, Some((raw, _))) => Some(raw),
        (Some((existing_raw, existing_date)), Some((incoming_raw, incoming_date))) => {
            let existing_wins = match policy {
                DatePolicy::Earliest => existing_date.as_datetime() < incoming_date.as_datetime(),
                DatePolicy::Latest => existing_date.as_datetime() > incoming_date.as_datetime(),
            };
            Some(if existing_wins { existing_raw } else { incoming_raw })
        }
    }
}

/// Applies every date rule to `incoming`, writing the chosen values into its
/// extras.
///
/// All candidates are read before anything is written, so a rule whose
/// candidate field is another rule's target still sees the feed's value.
/// A rule with no known date writes an empty string.
pub fn apply_date_rules(existing: &Record, incoming: &mut Record, rules: &[DateRule]) {
    let chosen: Vec<(String, String)> = rules
        .iter()
        .map(|rule| {
            let value = choose_date(
                existing.extras.get(&rule.field).map(String::as_str),
                incoming.extras.get(&rule.candidate_field).map(String::as_str),
                rule.policy,
            );
            (rule.field.clone(), value.unwrap_or_default().to_string())
        })
        .collect();

    for (field, value) in chosen {
        incoming.extras.insert(field, value);
    }
}
