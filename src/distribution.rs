//! Statistical entries and ordered distributions.
//!
//! A [`Distribution`] keeps its entries in a `Vec` so that insertion order is
//! preserved, and holds provenance in a separate [`Metadata`] field. Only the
//! JSON form places metadata next to the entries, under the `"metadata"` key.

use crate::models::GeoLevel;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Key under which the serialized form carries [`Metadata`].
pub const METADATA_KEY: &str = "metadata";

/// A numeric value for the target geography plus sibling values for ancestor levels.
///
/// Serialized as a flat map: `{"this": 12.5, "province": 10.1, "province_index": 124.0}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelValues {
    pub this: Option<f64>,
    parents: BTreeMap<GeoLevel, f64>,
    indices: BTreeMap<GeoLevel, f64>,
}

impl LevelValues {
    pub fn new(this: f64) -> Self {
        Self::maybe(Some(this))
    }

    pub fn maybe(this: Option<f64>) -> Self {
        Self {
            this,
            ..Self::default()
        }
    }

    /// Value copied in from an ancestor level, if merged.
    pub fn get(&self, level: GeoLevel) -> Option<f64> {
        self.parents.get(&level).copied()
    }

    pub fn set(&mut self, level: GeoLevel, value: f64) {
        self.parents.insert(level, value);
    }

    /// Ancestor levels merged into this value, broadest last.
    pub fn levels(&self) -> impl Iterator<Item = GeoLevel> + '_ {
        self.parents.keys().copied()
    }

    pub fn index(&self, level: GeoLevel) -> Option<f64> {
        self.indices.get(&level).copied()
    }

    pub fn set_index(&mut self, level: GeoLevel, index: f64) {
        self.indices.insert(level, index);
    }

    /// Add `other` into `self`: `this` is summed, and so is every ancestor
    /// level both sides carry. Levels missing on either side are dropped.
    pub fn accumulate(&mut self, other: &LevelValues) {
        self.this = Some(self.this.unwrap_or(0.0) + other.this.unwrap_or(0.0));
        self.parents.retain(|level, _| other.parents.contains_key(level));
        for (level, v) in self.parents.iter_mut() {
            *v += other.parents[level];
        }
        self.indices.clear();
    }
}

impl Serialize for LevelValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map =
            serializer.serialize_map(Some(1 + self.parents.len() + self.indices.len()))?;
        map.serialize_entry("this", &self.this)?;
        for (level, v) in &self.parents {
            map.serialize_entry(level.as_str(), v)?;
        }
        for (level, v) in &self.indices {
            map.serialize_entry(&format!("{}_index", level), v)?;
        }
        map.end()
    }
}

/// One statistic: a display name, its value(s), and optionally the raw numerator(s).
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub name: String,
    /// Percentage of total, or a raw count / ratio depending on the producer.
    pub values: LevelValues,
    pub numerators: Option<LevelValues>,
    /// Reserved margin of error.
    pub error: f64,
}

impl Stat {
    /// A stat carrying only a value.
    pub fn value(name: impl Into<String>, value: f64) -> Self {
        Self::maybe(name, Some(value))
    }

    /// A stat whose value may be undefined (e.g. a ratio over zero facilities).
    pub fn maybe(name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            values: LevelValues::maybe(value),
            numerators: None,
            error: 0.0,
        }
    }

    /// A value together with the numerator it was derived from.
    pub fn with_numerator(name: impl Into<String>, numerator: f64, value: f64) -> Self {
        Self {
            numerators: Some(LevelValues::new(numerator)),
            ..Self::value(name, value)
        }
    }

    /// A stat that is legitimately unavailable for this geography.
    pub fn not_available(name: impl Into<String>) -> Self {
        Self::maybe(name, None)
    }

    /// Numerator for the target geography, `0.0` when absent.
    pub fn numerator(&self) -> f64 {
        self.numerators
            .as_ref()
            .and_then(|n| n.this)
            .unwrap_or(0.0)
    }

    pub fn this(&self) -> Option<f64> {
        self.values.this
    }
}

impl Serialize for Stat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.numerators.is_some() { 4 } else { 3 };
        let mut st = serializer.serialize_struct("Stat", fields)?;
        st.serialize_field("name", &self.name)?;
        st.serialize_field("values", &self.values)?;
        if let Some(n) = &self.numerators {
            st.serialize_field("numerators", n)?;
        } else {
            st.skip_field("numerators")?;
        }
        st.serialize_field("error", &LevelValues::new(self.error))?;
        st.end()
    }
}

/// Provenance attached to a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Population the statistics are drawn over, e.g. "Workers 15 and over".
    pub universe: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub table: Option<String>,
}

impl Metadata {
    pub fn universe(universe: impl Into<String>) -> Self {
        Self {
            universe: universe.into(),
            table: None,
        }
    }
}

/// Ordered mapping from category key to [`Stat`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    entries: Vec<(String, Stat)>,
    pub metadata: Option<Metadata>,
    /// Set when percentages were requested over a zero total; every value is then `0.0`.
    pub zero_total: bool,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Stat> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Stat> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, s)| s)
    }

    /// Insert or replace. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, stat: Stat) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1 = stat,
            None => self.entries.push((key, stat)),
        }
    }

    /// Existing entry for `key`, or a new one appended at the end.
    pub fn entry_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> Stat) -> &mut Stat {
        let i = match self.position(key) {
            Some(i) => i,
            None => {
                self.entries.push((key.to_string(), make()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    pub fn remove(&mut self, key: &str) -> Option<Stat> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Stat)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Stat)> {
        self.entries.iter_mut().map(|(k, s)| (k.as_str(), s))
    }

    /// Sum of all entries' numerators.
    pub fn total_numerator(&self) -> f64 {
        self.entries.iter().map(|(_, s)| s.numerator()).sum()
    }

    /// Sum of all entries' values for the target geography.
    pub fn total_value(&self) -> f64 {
        self.entries.iter().filter_map(|(_, s)| s.this()).sum()
    }

    /// Stable sort, largest numerator first.
    pub fn sort_by_numerator_desc(&mut self) {
        self.entries
            .sort_by(|(_, a), (_, b)| b.numerator().total_cmp(&a.numerator()));
    }

    pub(crate) fn take_entries(&mut self) -> Vec<(String, Stat)> {
        std::mem::take(&mut self.entries)
    }
}

impl FromIterator<(String, Stat)> for Distribution {
    fn from_iter<T: IntoIterator<Item = (String, Stat)>>(iter: T) -> Self {
        let mut d = Distribution::new();
        for (k, s) in iter {
            d.insert(k, s);
        }
        d
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.entries.len() + usize::from(self.metadata.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (k, s) in &self.entries {
            map.serialize_entry(k, s)?;
        }
        if let Some(meta) = &self.metadata {
            map.serialize_entry(METADATA_KEY, meta)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_is_serialized_after_entries() {
        let mut d = Distribution::new().with_metadata(Metadata::universe("Households"));
        d.insert("A", Stat::with_numerator("A", 3.0, 100.0));
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.starts_with(r#"{"A":"#));
        assert!(json.ends_with(r#""metadata":{"universe":"Households"}}"#));
        assert_eq!(d.len(), 1);
        assert_eq!(d.total_numerator(), 3.0);
    }

    #[test]
    fn level_values_serialize_flat() {
        let mut v = LevelValues::new(12.5);
        v.set(GeoLevel::Province, 10.0);
        v.set_index(GeoLevel::Province, 130.0);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["this"], 12.5);
        assert_eq!(json["province"], 10.0);
        assert_eq!(json["province_index"], 130.0);
    }

    #[test]
    fn accumulate_keeps_only_shared_levels() {
        let mut a = LevelValues::new(1.0);
        a.set(GeoLevel::Province, 2.0);
        a.set(GeoLevel::Country, 3.0);
        let mut b = LevelValues::new(4.0);
        b.set(GeoLevel::Country, 5.0);
        a.accumulate(&b);
        assert_eq!(a.this, Some(5.0));
        assert_eq!(a.get(GeoLevel::Province), None);
        assert_eq!(a.get(GeoLevel::Country), Some(8.0));
    }
}
