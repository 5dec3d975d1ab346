//! geoprofile
//!
//! Census profile statistics for nested geographies (ward, municipality,
//! district, province, country). Pairs with the `geoprofile` CLI.
//!
//! ### Features
//! - Aggregate raw `(category, count)` rows into ordered distributions with percentages
//! - Recode fine-grained census labels into display categories
//! - Cap long distributions with an "Other" bucket
//! - Merge province and country values next to a geography's own, with indices
//! - Build topical profile sections from an explicit registry
//!
//! ### Example
//! ```no_run
//! use geoprofile::{GeoLevel, ProfileBuilder, ProfileConfig};
//!
//! let source = geoprofile::storage::load_dir("data/")?;
//! let builder = ProfileBuilder::new(&source, ProfileConfig::default());
//! let profile = builder.build(GeoLevel::Municipality, "CPT")?;
//! geoprofile::storage::save_json(&profile, "cpt.json")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod config;
pub mod distribution;
pub mod error;
pub mod format;
pub mod merge;
pub mod models;
pub mod profile;
pub mod recode;
pub mod remainder;
pub mod section;
pub mod source;
pub mod stats;
pub mod storage;

pub use aggregate::{AggregateOptions, CategoryOrder, aggregate};
pub use config::{ProfileConfig, RemainderRule};
pub use distribution::{Distribution, LevelValues, Metadata, Stat};
pub use error::{ProfileError, StatsError};
pub use merge::{add_parent_indices, merge_section};
pub use models::{GeoLevel, GeoRef, Geography, RawRow};
pub use profile::{Profile, ProfileBuilder, SectionId, build_section};
pub use recode::{RecodeTable, recode};
pub use remainder::group_remainder;
pub use section::{Section, SectionItem};
pub use source::{DataSource, FieldSet, MemorySource, TableRegistry};
