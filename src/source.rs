//! Data access: table naming, the [`DataSource`] trait, and an in-memory implementation.
//!
//! Census tables are named after the fields they cross-tabulate and the
//! geography level they are summarised at, e.g. `gender_populationgroup_ward`.
//! The naming rules live in an immutable [`TableRegistry`] that is handed to
//! the data source when it is constructed.

use crate::error::{ProfileError, Result};
use crate::models::{GeoLevel, GeoRef, Geography, RawRow};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Postgres' default identifier limit.
pub const MAX_TABLE_NAME_LENGTH: usize = 63;

/// Census fields known to the default registry.
pub const CENSUS_FIELDS: &[&str] = &[
    "age groups in 5 years",
    "age in completed years",
    "electricity for cooking",
    "electricity for heating",
    "electricity for lighting",
    "gender",
    "gender of head of household",
    "gender of household head",
    "highest educational level",
    "individual monthly income",
    "official employment status",
    "population group",
    "refuse disposal",
    "source of water",
    "toilet facilities",
    "type of dwelling",
    "type of sector",
];

/// The fields to fetch, optionally from a universe-specific table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    pub fields: Vec<String>,
    /// Table stem replacing the generated one, e.g. `genderunder9`. The
    /// level suffix is still appended.
    pub table: Option<String>,
}

impl FieldSet {
    pub fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            table: None,
        }
    }

    pub fn single(field: &str) -> Self {
        Self::new(&[field])
    }

    pub fn from_table(mut self, stem: &str) -> Self {
        self.table = Some(stem.to_string());
        self
    }
}

/// Immutable table-naming rules.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    fields: BTreeSet<String>,
    max_len: usize,
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new(CENSUS_FIELDS.iter().copied())
    }
}

impl TableRegistry {
    pub fn new<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            fields: fields.into_iter().map(str::to_string).collect(),
            max_len: MAX_TABLE_NAME_LENGTH,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Table holding `fields` summarised at `level`.
    ///
    /// Field names are sorted, stripped of spaces, lower-cased and joined with
    /// `_`; the level is appended. Over-long names lose characters from the
    /// end of the field part. Fails with [`ProfileError::TableNameTooLong`]
    /// when even the truncated name would not fit.
    pub fn table_name(&self, fields: &[String], level: GeoLevel) -> Result<String> {
        if let Some(bad) = fields.iter().find(|f| !self.fields.contains(f.as_str())) {
            return Err(ProfileError::InvalidField(bad.clone()));
        }
        if fields.is_empty() {
            return Err(ProfileError::InvalidField(String::new()));
        }

        let mut sorted: Vec<&String> = fields.iter().collect();
        sorted.sort();
        let mut name = sorted
            .iter()
            .map(|f| f.to_lowercase().split_whitespace().collect::<String>())
            .collect::<Vec<_>>()
            .join("_");

        let full_len = name.len() + level.as_str().len() + 1;
        if full_len > self.max_len {
            let last_len = sorted.last().map(|f| f.len()).unwrap_or(0);
            if full_len - last_len + 1 > self.max_len {
                return Err(ProfileError::TableNameTooLong {
                    fields: fields.to_vec(),
                    limit: self.max_len,
                });
            }
            name.truncate(self.max_len - level.as_str().len() - 1);
        }
        Ok(format!("{}_{}", name, level))
    }

    /// Resolve a [`FieldSet`] to its table name.
    pub fn resolve(&self, fields: &FieldSet, level: GeoLevel) -> Result<String> {
        match &fields.table {
            Some(stem) => Ok(format!("{}_{}", stem, level)),
            None => self.table_name(&fields.fields, level),
        }
    }
}

/// A wide per-geography record, e.g. facility counts, keyed by column.
pub type Record = BTreeMap<String, f64>;

/// Read access to census rows, wide datasets, and geographies.
///
/// Implementations do the I/O; everything built on top of them is pure.
pub trait DataSource {
    /// Rows of `(category tuple, count)` for `fields` at one geography.
    ///
    /// Fails with [`ProfileError::LocationNotFound`] when no rows exist.
    fn fetch_rows(&self, fields: &FieldSet, level: GeoLevel, code: &str) -> Result<Vec<RawRow>>;

    /// The record of a wide dataset for one geography, if there is one.
    fn fetch_record(&self, dataset: &str, level: GeoLevel, code: &str) -> Result<Option<Record>>;

    fn get_geography(&self, level: GeoLevel, code: &str) -> Result<Geography>;
}

/// A table of rows keyed by geography.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub fields: Vec<String>,
    rows: HashMap<GeoRef, Vec<RawRow>>,
}

impl Table {
    pub fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            rows: HashMap::new(),
        }
    }

    pub fn push(&mut self, geo: GeoRef, row: RawRow) {
        self.rows.entry(geo).or_default().push(row);
    }

    pub fn rows(&self, geo: &GeoRef) -> Option<&[RawRow]> {
        self.rows.get(geo).map(Vec::as_slice)
    }
}

/// [`DataSource`] over tables held in memory. Immutable once built, so one
/// instance can serve concurrent profile builds.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    registry: TableRegistry,
    tables: HashMap<String, Table>,
    datasets: HashMap<String, HashMap<GeoRef, Record>>,
    geographies: HashMap<GeoRef, Geography>,
}

impl MemorySource {
    pub fn new(registry: TableRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    pub fn add_geography(&mut self, geo: Geography) {
        self.geographies.insert(geo.geo_ref(), geo);
    }

    pub fn add_table(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    /// Append rows for `fields` at one geography, creating the table if needed.
    pub fn add_rows(
        &mut self,
        fields: &FieldSet,
        level: GeoLevel,
        code: &str,
        rows: impl IntoIterator<Item = RawRow>,
    ) -> Result<()> {
        let name = self.registry.resolve(fields, level)?;
        let table = self.tables.entry(name).or_insert_with(|| Table {
            fields: fields.fields.clone(),
            rows: HashMap::new(),
        });
        let geo = GeoRef::new(level, code);
        for row in rows {
            table.push(geo.clone(), row);
        }
        Ok(())
    }

    pub fn add_record(&mut self, dataset: &str, level: GeoLevel, code: &str, record: Record) {
        self.datasets
            .entry(dataset.to_string())
            .or_default()
            .insert(GeoRef::new(level, code), record);
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl DataSource for MemorySource {
    fn fetch_rows(&self, fields: &FieldSet, level: GeoLevel, code: &str) -> Result<Vec<RawRow>> {
        let table = self.registry.resolve(fields, level)?;
        let rows = self
            .tables
            .get(&table)
            .and_then(|t| t.rows(&GeoRef::new(level, code)))
            .unwrap_or_default();
        if rows.is_empty() {
            return Err(ProfileError::LocationNotFound {
                table,
                level,
                code: code.to_string(),
            });
        }
        log::trace!("{table}: {} rows for {level}-{code}", rows.len());
        Ok(rows.to_vec())
    }

    fn fetch_record(&self, dataset: &str, level: GeoLevel, code: &str) -> Result<Option<Record>> {
        Ok(self
            .datasets
            .get(dataset)
            .and_then(|d| d.get(&GeoRef::new(level, code)))
            .cloned())
    }

    fn get_geography(&self, level: GeoLevel, code: &str) -> Result<Geography> {
        self.geographies
            .get(&GeoRef::new(level, code))
            .cloned()
            .ok_or_else(|| ProfileError::LocationNotFound {
                table: "geography".into(),
                level,
                code: code.to_string(),
            })
    }
}
