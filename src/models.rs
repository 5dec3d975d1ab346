use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One rung of the nested administrative hierarchy.
///
/// Ordered from finest to broadest, so `GeoLevel::Ward < GeoLevel::Country`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoLevel {
    Ward,
    Municipality,
    District,
    Province,
    Country,
}

impl GeoLevel {
    pub const ALL: [GeoLevel; 5] = [
        GeoLevel::Ward,
        GeoLevel::Municipality,
        GeoLevel::District,
        GeoLevel::Province,
        GeoLevel::Country,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeoLevel::Ward => "ward",
            GeoLevel::Municipality => "municipality",
            GeoLevel::District => "district",
            GeoLevel::Province => "province",
            GeoLevel::Country => "country",
        }
    }
}

impl fmt::Display for GeoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeoLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeoLevel::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProfileError::InvalidGeoLevel(s.to_string()))
    }
}

/// A (level, code) pair identifying one geography.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GeoRef {
    pub level: GeoLevel,
    pub code: String,
}

impl GeoRef {
    pub fn new(level: GeoLevel, code: impl Into<String>) -> Self {
        Self {
            level,
            code: code.into(),
        }
    }
}

impl fmt::Display for GeoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.level, self.code)
    }
}

/// Geography record as returned by the lookup collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geography {
    pub level: GeoLevel,
    pub code: String,
    pub name: String,
    /// Land area, used for density derivations.
    pub square_kms: Option<f64>,
    /// Containing geographies, finest first.
    pub parents: Vec<GeoRef>,
}

impl Geography {
    pub fn geo_ref(&self) -> GeoRef {
        GeoRef::new(self.level, self.code.clone())
    }

    /// Ancestors whose level is one of `comparative`, broadest last.
    ///
    /// The geography's own level is never included.
    pub fn summary_levels(&self, comparative: &[GeoLevel]) -> Vec<GeoRef> {
        let mut out: Vec<GeoRef> = self
            .parents
            .iter()
            .filter(|p| p.level != self.level && comparative.contains(&p.level))
            .cloned()
            .collect();
        out.sort_by_key(|p| p.level);
        out.dedup_by_key(|p| p.level);
        out
    }
}

/// One raw observation: a category tuple (one value per requested field) and its count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub categories: Vec<String>,
    pub count: f64,
}

impl RawRow {
    pub fn new(category: impl Into<String>, count: f64) -> Self {
        Self {
            categories: vec![category.into()],
            count,
        }
    }

    pub fn multi<I, S>(categories: I, count: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            count,
        }
    }

    /// Display label of the row: the single category, or the tuple joined with `" / "`.
    pub fn label(&self) -> String {
        self.categories.join(" / ")
    }

    /// Category value of the `idx`-th requested field.
    pub fn category(&self, idx: usize) -> Option<&str> {
        self.categories.get(idx).map(String::as_str)
    }
}

/// Build raw rows from `(label, count)` pairs.
pub fn rows<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Vec<RawRow> {
    pairs.into_iter().map(|(l, c)| RawRow::new(l, c)).collect()
}
