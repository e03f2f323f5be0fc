//! Merge algorithms for dataset series.
//!
//! This crate holds the pure, I/O-free parts of reconciling an incoming feed
//! record with the catalog's copy:
//!
//! - [`FlexiDate`]: parses loosely formatted feed dates into comparable instants
//! - [`choose_date`] / [`apply_date_rules`]: keep the earliest or latest date
//!   across two merge generations
//! - [`merge_resources`]: add or replace resources by stable identifier and
//!   order them by [`ResourceKey`]
//!
//! The merge results satisfy the following properties:
//! - **Idempotent**: merging the same incoming list twice gives the same list
//! - **Order-independent**: output order depends only on identifiers
//! - **Format-preserving**: a chosen date is returned exactly as it was written

mod date;
mod error;
mod flexidate;
mod resources;

pub use date::{apply_date_rules, choose_date};
pub use error::{MergeError, MergeResult};
pub use flexidate::{FlexiDate, Precision};
pub use resources::{check_resources, merge_resources, natural_cmp, resource_identifier, ResourceKey};
