//! Catalog record model for dataset series loading.
//!
//! Defines the types every other crate in the workspace depends on:
//! - [`Record`]: one catalog entry (name, title, extras, resources, other scalars)
//! - [`Resource`]: a downloadable artifact keyed by a stable external identifier
//! - [`LoaderProfile`]: per-feed identity fields, invariants, fallback and date rules
//! - [`DatePolicy`]: how a date conflict between two merge generations is resolved
//!
//! Records serialize to the plain mapping shape the catalog API uses, so a
//! feed parser can hand over `serde_json` values directly.

mod error;
mod profile;
mod record;

pub use error::{ProfileError, ProfileResult};
pub use profile::{DatePolicy, DateRule, FallbackRule, LoaderProfile};
pub use record::{Record, RecordState, Resource};
