use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle state of a catalog record.
///
/// The loader never deletes records, but it observes deletions made by
/// the catalog and skips deleted records when looking for matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordState {
    #[default]
    Active,
    Deleted,
}

/// One catalog entry: scalar metadata, free-form extras and a resource list.
///
/// Top-level scalars other than `name` and `title` (notes, url, author,
/// license_id, tags, ...) are kept in `fields`, which is flattened so the
/// serialized form is the plain catalog mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: RecordState,
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl Record {
    /// Creates an active record with no extras or resources.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Reads a string field, looking at top-level fields before `extras`.
    ///
    /// Non-string top-level values (e.g. `null`, tag arrays) are treated as
    /// absent rather than stringified.
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "name" => return Some(self.name.as_str()),
            "title" => return Some(self.title.as_str()),
            _ => {}
        }
        if let Some(value) = self.fields.get(key) {
            return value.as_str();
        }
        self.extras.get(key).map(String::as_str)
    }

    /// Like [`Record::field`], but whitespace-only values count as absent.
    pub fn non_blank_field(&self, key: &str) -> Option<&str> {
        self.field(key).filter(|v| !v.trim().is_empty())
    }

    /// Sets an extras value, returning the previous one.
    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.extras.insert(key.into(), value.into())
    }

    /// Sets a top-level string field.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields
            .insert(key.into(), serde_json::Value::String(value.into()));
    }

    pub fn is_deleted(&self) -> bool {
        self.state == RecordState::Deleted
    }
}

/// A downloadable artifact attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub format: String,
    /// Extension fields; the stable external identifier lives here.
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
}

impl Resource {
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper for attaching an extension field.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Returns the non-blank value of an extension field.
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}
