use crate::error::{ProfileError, ProfileResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Describes how one feed is reconciled against the catalog.
///
/// A single loader engine is parameterized by a profile instead of being
/// specialized per feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderProfile {
    /// Fields used, in order, to build search criteria for an existing record.
    pub identity_fields: Vec<String>,
    /// Fields that must not change between the existing and incoming record.
    #[serde(default)]
    pub invariant_fields: Vec<String>,
    /// Substitute identity field used when the primary one is blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackRule>,
    /// Resource extras key holding the stable external identifier.
    pub resource_identifier_field: String,
    /// Scalar date fields resolved across merge generations.
    #[serde(default)]
    pub date_rules: Vec<DateRule>,
}

/// Replaces `primary` with `secondary` in the identity fields when the
/// incoming record leaves `primary` blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRule {
    pub primary: String,
    pub secondary: String,
}

impl FallbackRule {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

/// Which of two known dates survives a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// Keep the older date (e.g. first release).
    #[serde(alias = "earlier")]
    Earliest,
    /// Keep the newer date (e.g. last update).
    #[serde(alias = "later")]
    Latest,
}

/// Resolves extras `field` by comparing the existing record's `field`
/// against the incoming record's `candidate_field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRule {
    pub field: String,
    pub candidate_field: String,
    pub policy: DatePolicy,
}

impl DateRule {
    pub fn new(field: impl Into<String>, candidate_field: impl Into<String>, policy: DatePolicy) -> Self {
        Self {
            field: field.into(),
            candidate_field: candidate_field.into(),
            policy,
        }
    }
}

const ONS_INVARIANT_FIELDS: &[&str] = &[
    "geographical_granularity",
    "geographic_coverage",
    "temporal_granularity",
    "precision",
    "url",
    "taxonomy_url",
    "agency",
    "author",
    "author_email",
    "license_id",
];

impl LoaderProfile {
    /// Profile for the ONS publication hub feed.
    pub fn ons_hub() -> Self {
        Self {
            identity_fields: vec!["title".into(), "published_by".into()],
            invariant_fields: ONS_INVARIANT_FIELDS.iter().map(|f| (*f).to_string()).collect(),
            fallback: Some(FallbackRule::new("published_by", "published_via")),
            resource_identifier_field: "hub-id".into(),
            date_rules: vec![
                DateRule::new("date_released", "date_released", DatePolicy::Earliest),
                DateRule::new("date_updated", "date_released", DatePolicy::Latest),
            ],
        }
    }

    /// Parses and validates a TOML profile.
    pub fn from_toml_str(contents: &str) -> ProfileResult<Self> {
        let profile: Self = toml::from_str(contents)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reads, parses and validates a TOML profile file.
    pub fn load_from(path: &Path) -> ProfileResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Checks the profile is usable by a loader.
    pub fn validate(&self) -> ProfileResult<()> {
        if self.identity_fields.is_empty() {
            return Err(ProfileError::Invalid("identity_fields must not be empty".into()));
        }
        if self.identity_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ProfileError::Invalid("identity_fields contains a blank name".into()));
        }
        if self.resource_identifier_field.trim().is_empty() {
            return Err(ProfileError::Invalid(
                "resource_identifier_field must not be blank".into(),
            ));
        }
        if let Some(rule) = &self.fallback {
            if !self.identity_fields.contains(&rule.primary) {
                return Err(ProfileError::Invalid(format!(
                    "fallback primary '{}' is not an identity field",
                    rule.primary
                )));
            }
            if rule.secondary.trim().is_empty() || rule.secondary == rule.primary {
                return Err(ProfileError::Invalid(format!(
                    "fallback secondary for '{}' must be a different, non-blank field",
                    rule.primary
                )));
            }
        }
        for rule in &self.date_rules {
            if rule.field.trim().is_empty() || rule.candidate_field.trim().is_empty() {
                return Err(ProfileError::Invalid("date rule with a blank field name".into()));
            }
        }
        Ok(())
    }
}
