//! Profile configuration: which sections to build, which ancestor levels to
//! compare against, and which distributions to cap with an "Other" bucket.

use crate::models::GeoLevel;
use crate::profile::SectionId;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Collapse one distribution of a section to its `keep` largest categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainderRule {
    pub section: SectionId,
    /// Key of the distribution inside the section.
    pub key: String,
    pub keep: usize,
}

impl RemainderRule {
    pub fn new(section: SectionId, key: &str, keep: usize) -> Self {
        Self {
            section,
            key: key.to_string(),
            keep,
        }
    }
}

/// Sections built when none are configured: the census and facility topics,
/// which are published for every level. Elections and youth data only exist
/// for some levels and have to be asked for.
pub const DEFAULT_SECTIONS: &[SectionId] = &[
    SectionId::Demographics,
    SectionId::Economics,
    SectionId::Education,
    SectionId::Households,
    SectionId::ServiceDelivery,
    SectionId::Schools,
    SectionId::Hospitals,
    SectionId::EcdCentres,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Sections to build, in output order.
    pub sections: Vec<SectionId>,
    /// Ancestor levels merged in for comparison.
    pub comparative_levels: Vec<GeoLevel>,
    /// Applied after merging.
    pub remainder_groups: Vec<RemainderRule>,
    /// Add `<level>_index` next to merged ancestor values.
    pub parent_indices: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            sections: DEFAULT_SECTIONS.to_vec(),
            comparative_levels: vec![GeoLevel::Province, GeoLevel::Country],
            remainder_groups: vec![
                RemainderRule::new(SectionId::Households, "type_of_dwelling_distribution", 5),
                RemainderRule::new(SectionId::ServiceDelivery, "water_source_distribution", 5),
                RemainderRule::new(
                    SectionId::ServiceDelivery,
                    "toilet_facilities_distribution",
                    5,
                ),
                RemainderRule::new(
                    SectionId::ServiceDelivery,
                    "refuse_disposal_distribution",
                    5,
                ),
                RemainderRule::new(SectionId::Elections, "party_distribution", 5),
            ],
            parent_indices: true,
        }
    }
}

impl ProfileConfig {
    /// Load from a JSON file; missing keys take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
    }

    /// Only build `sections`, keeping the rest of the configuration.
    pub fn with_sections(mut self, sections: Vec<SectionId>) -> Self {
        self.sections = sections;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ProfileConfig =
            serde_json::from_str(r#"{"sections":["demographics"],"parent_indices":false}"#)
                .unwrap();
        assert_eq!(cfg.sections, vec![SectionId::Demographics]);
        assert!(!cfg.parent_indices);
        assert_eq!(
            cfg.comparative_levels,
            vec![GeoLevel::Province, GeoLevel::Country]
        );
    }

    #[test]
    fn defaults_leave_out_partial_coverage_sections() {
        let cfg = ProfileConfig::default();
        assert!(!cfg.sections.contains(&SectionId::Youth));
        assert!(!cfg.sections.contains(&SectionId::Elections));
        assert!(cfg.sections.contains(&SectionId::Demographics));
    }
}
