//! Profile building: per-topic section builders, dispatched through an
//! explicit registry, and the orchestration that merges ancestor levels in.
//!
//! ```no_run
//! use geoprofile::profile::ProfileBuilder;
//! use geoprofile::{GeoLevel, ProfileConfig};
//!
//! let source = geoprofile::storage::load_dir("data/")?;
//! let profile = ProfileBuilder::new(&source, ProfileConfig::default())
//!     .build(GeoLevel::Ward, "19100001")?;
//! println!("{}", serde_json::to_string_pretty(&profile)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod categories;
mod demographics;
mod ecd_centres;
mod economics;
mod education;
mod elections;
mod facilities;
mod households;
mod service_delivery;
mod youth;

use crate::aggregate::{AggregateOptions, aggregate};
use crate::config::ProfileConfig;
use crate::distribution::{Distribution, Metadata, Stat};
use crate::error::Result;
use crate::merge::{add_parent_indices, merge_section};
use crate::models::{GeoLevel, Geography, RawRow};
use crate::remainder::group_remainder;
use crate::section::Section;
use crate::source::{DataSource, FieldSet, Record};
use crate::stats;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Topical sections a profile can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Demographics,
    Economics,
    Education,
    Households,
    ServiceDelivery,
    Schools,
    Hospitals,
    EcdCentres,
    Elections,
    Youth,
}

impl SectionId {
    pub const ALL: [SectionId; 10] = [
        SectionId::Demographics,
        SectionId::Economics,
        SectionId::Education,
        SectionId::Households,
        SectionId::ServiceDelivery,
        SectionId::Schools,
        SectionId::Hospitals,
        SectionId::EcdCentres,
        SectionId::Elections,
        SectionId::Youth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Demographics => "demographics",
            SectionId::Economics => "economics",
            SectionId::Education => "education",
            SectionId::Households => "households",
            SectionId::ServiceDelivery => "service_delivery",
            SectionId::Schools => "schools",
            SectionId::Hospitals => "hospitals",
            SectionId::EcdCentres => "ecd_centres",
            SectionId::Elections => "elections",
            SectionId::Youth => "youth",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| format!("unknown section: {s}"))
    }
}

/// Everything a section builder needs for one geography.
pub struct SectionContext<'a> {
    pub source: &'a dyn DataSource,
    pub level: GeoLevel,
    pub code: &'a str,
}

impl<'a> SectionContext<'a> {
    pub fn new(source: &'a dyn DataSource, level: GeoLevel, code: &'a str) -> Self {
        Self {
            source,
            level,
            code,
        }
    }

    pub fn rows(&self, fields: &FieldSet) -> Result<Vec<RawRow>> {
        self.source.fetch_rows(fields, self.level, self.code)
    }

    /// Fetch rows and aggregate them in one step.
    pub fn stat_data(
        &self,
        fields: &FieldSet,
        options: &AggregateOptions<'_>,
    ) -> Result<(Distribution, f64)> {
        let rows = self.rows(fields)?;
        Ok(aggregate(&rows, options)?)
    }

    /// A wide dataset record; absent records read as all zeros.
    pub fn record(&self, dataset: &str) -> Result<Record> {
        Ok(self
            .source
            .fetch_record(dataset, self.level, self.code)?
            .unwrap_or_default())
    }

    pub fn geography(&self) -> Result<Geography> {
        self.source.get_geography(self.level, self.code)
    }

    /// Total population, from the population group table.
    pub fn total_population(&self) -> Result<f64> {
        let rows = self.rows(&FieldSet::single("population group"))?;
        Ok(rows.iter().map(|r| r.count).sum())
    }
}

/// Metadata naming the universe and the wide dataset a breakdown came from.
pub(crate) fn dataset_metadata(universe: &str, dataset: &str) -> Metadata {
    Metadata {
        universe: universe.to_string(),
        table: Some(dataset.to_string()),
    }
}

/// Column of a wide record, `0.0` when missing.
pub(crate) fn column(record: &Record, name: &str) -> f64 {
    record.get(name).copied().unwrap_or(0.0)
}

/// Treat a missing table as absent data rather than a failure.
pub(crate) fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_not_found() => {
            log::debug!("optional data missing: {e}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Breakdown of selected record columns, keyed by column in the given order.
///
/// `columns` pairs a column with its display name. Values are counts, or
/// percentages of `percent_of` when given. Returns the distribution and the
/// sum of the selected columns.
pub(crate) fn record_distribution(
    record: &Record,
    columns: &[(&str, &str)],
    percent_of: Option<f64>,
) -> (Distribution, f64) {
    let mut dist = Distribution::new();
    let mut total = 0.0;
    for (key, name) in columns {
        let count = column(record, key);
        total += count;
        let value = match percent_of {
            Some(denominator) => stats::percent(count, denominator),
            None => count,
        };
        dist.insert(*key, Stat::with_numerator(*name, count, value));
    }
    (dist, total)
}

pub type SectionBuildFn = fn(&SectionContext<'_>) -> Result<Section>;

/// One registry entry.
#[derive(Clone, Copy)]
pub struct SectionSpec {
    pub id: SectionId,
    pub build: SectionBuildFn,
}

impl SectionSpec {
    const fn new(id: SectionId, build: SectionBuildFn) -> Self {
        Self { id, build }
    }
}

/// Section builders, in default output order.
pub const REGISTRY: &[SectionSpec] = &[
    SectionSpec::new(SectionId::Demographics, demographics::build),
    SectionSpec::new(SectionId::Economics, economics::build),
    SectionSpec::new(SectionId::Education, education::build),
    SectionSpec::new(SectionId::Households, households::build),
    SectionSpec::new(SectionId::ServiceDelivery, service_delivery::build),
    SectionSpec::new(SectionId::Schools, facilities::build_schools),
    SectionSpec::new(SectionId::Hospitals, facilities::build_hospitals),
    SectionSpec::new(SectionId::EcdCentres, ecd_centres::build),
    SectionSpec::new(SectionId::Elections, elections::build),
    SectionSpec::new(SectionId::Youth, youth::build),
];

pub fn builder_for(id: SectionId) -> SectionBuildFn {
    REGISTRY
        .iter()
        .find(|spec| spec.id == id)
        .map(|spec| spec.build)
        .unwrap_or_else(|| unreachable!("every SectionId is registered"))
}

/// Build one section for one geography.
pub fn build_section(
    source: &dyn DataSource,
    id: SectionId,
    level: GeoLevel,
    code: &str,
) -> Result<Section> {
    let ctx = SectionContext::new(source, level, code);
    builder_for(id)(&ctx)
}

/// All sections for one geography, ancestor values merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub geography: Geography,
    sections: Vec<(SectionId, Section)>,
}

impl Profile {
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|(s, _)| *s == id).map(|(_, v)| v)
    }

    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|(s, _)| *s == id)
            .map(|(_, v)| v)
    }

    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections.iter().map(|(id, s)| (*id, s))
    }
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len() + 1))?;
        map.serialize_entry("geography", &self.geography)?;
        for (id, section) in &self.sections {
            map.serialize_entry(id.as_str(), section)?;
        }
        map.end()
    }
}

/// Builds [`Profile`]s from a data source according to a [`ProfileConfig`].
pub struct ProfileBuilder<'a> {
    source: &'a dyn DataSource,
    config: ProfileConfig,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(source: &'a dyn DataSource, config: ProfileConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Build every configured section for the target geography.
    ///
    /// Each section is also built for every comparative ancestor and merged
    /// in under that ancestor's level. A missing geography is an error for
    /// the target but only skips the merge for an ancestor. Remainder
    /// grouping and parent indices run last.
    pub fn build(&self, level: GeoLevel, code: &str) -> Result<Profile> {
        let geography = self.source.get_geography(level, code)?;
        let ancestors = geography.summary_levels(&self.config.comparative_levels);
        log::info!(
            "building profile for {} ({} sections, {} comparative levels)",
            geography.geo_ref(),
            self.config.sections.len(),
            ancestors.len()
        );

        let mut sections = Vec::with_capacity(self.config.sections.len());
        for &id in &self.config.sections {
            let mut section = build_section(self.source, id, level, code)?;
            for ancestor in &ancestors {
                match build_section(self.source, id, ancestor.level, &ancestor.code) {
                    Ok(parent) => {
                        let merged = merge_section(&mut section, &parent, ancestor.level);
                        log::debug!("{id}: merged {merged} values from {ancestor}");
                    }
                    Err(e) if e.is_not_found() => {
                        log::debug!("{id}: no data for {ancestor}, skipping merge: {e}");
                    }
                    Err(e) => return Err(e),
                }
            }
            sections.push((id, section));
        }

        let mut profile = Profile {
            geography,
            sections,
        };

        for rule in &self.config.remainder_groups {
            match profile
                .section_mut(rule.section)
                .and_then(|s| s.distribution_mut(&rule.key))
            {
                Some(dist) => group_remainder(dist, rule.keep),
                None => log::debug!("remainder rule {}.{} matched nothing", rule.section, rule.key),
            }
        }

        if self.config.parent_indices {
            for (_, section) in profile.sections.iter_mut() {
                add_parent_indices(section);
            }
        }

        Ok(profile)
    }
}
