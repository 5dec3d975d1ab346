//! Category recoding: collapse fine-grained raw labels into coarser display labels.

use crate::distribution::{Distribution, LevelValues, Stat};
use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lookup table from raw category label to display label.
///
/// The table is strict: every raw label that can appear in source data must be
/// listed, since a silently dropped category would corrupt the total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecodeTable {
    map: HashMap<String, String>,
}

impl RecodeTable {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs.iter().copied().collect()
    }

    /// Display label for `raw`.
    pub fn lookup(&self, raw: &str) -> Result<&str, StatsError> {
        self.map
            .get(raw)
            .map(String::as_str)
            .ok_or_else(|| StatsError::UnknownCategory {
                label: raw.to_string(),
            })
    }

    /// Distinct display labels, sorted.
    pub fn display_labels(&self) -> impl Iterator<Item = &str> {
        let mut seen: Vec<&str> = self.map.values().map(String::as_str).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.into_iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RecodeTable {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

fn empty_stat(name: &str) -> Stat {
    Stat {
        name: name.to_string(),
        values: LevelValues::new(0.0),
        numerators: Some(LevelValues::new(0.0)),
        error: 0.0,
    }
}

/// Recode a distribution keyed by raw label into one keyed by display label.
///
/// Each entry's `name` is looked up in `table`; numerators and values of all
/// raw labels that share a display label are summed into one entry. With
/// `key_order` the output is seeded with those keys (at zero) in that order,
/// so absent categories still appear; otherwise keys follow discovery order.
/// Metadata is carried over unchanged.
pub fn recode(
    distribution: &Distribution,
    table: &RecodeTable,
    key_order: Option<&[&str]>,
) -> Result<Distribution, StatsError> {
    let mut out = Distribution::new();
    for key in key_order.unwrap_or_default() {
        out.insert(*key, empty_stat(key));
    }

    for (_, stat) in distribution.iter() {
        let display = table.lookup(&stat.name)?;
        let target = out.entry_or_insert_with(display, || empty_stat(display));
        let numerators = target
            .numerators
            .get_or_insert_with(|| LevelValues::new(0.0));
        numerators.this = Some(numerators.this.unwrap_or(0.0) + stat.numerator());
        target.values.this = Some(target.values.this.unwrap_or(0.0) + stat.this().unwrap_or(0.0));
    }

    out.metadata = distribution.metadata.clone();
    out.zero_total = distribution.zero_total;
    Ok(out)
}
