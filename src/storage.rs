use crate::models::{GeoLevel, GeoRef, Geography, RawRow};
use crate::profile::Profile;
use crate::source::{MemorySource, Record, Table, TableRegistry};
use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Deserialize;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct GeographyRow {
    level: GeoLevel,
    code: String,
    name: String,
    square_kms: Option<f64>,
    #[serde(default)]
    parents: String,
}

/// Parse `province:WC;country:ZA` into parent references.
fn parse_parents(s: &str) -> Result<Vec<GeoRef>> {
    s.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let (level, code) = p
                .split_once(':')
                .with_context(|| format!("parent {p:?} is not level:code"))?;
            Ok(GeoRef::new(level.parse::<GeoLevel>()?, code.trim()))
        })
        .collect()
}

fn csv_files(dir: &Path) -> Result<Vec<(String, std::path::PathBuf)>> {
    if !dir.is_dir() {
        log::warn!("{} does not exist, skipping", dir.display());
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == "csv") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                out.push((stem.to_string(), path.clone()));
            }
        }
    }
    out.sort();
    Ok(out)
}

fn geo_of(record: &StringRecord) -> Result<GeoRef> {
    let level = record.get(0).unwrap_or_default().parse::<GeoLevel>()?;
    let code = record.get(1).unwrap_or_default().trim();
    if code.is_empty() {
        bail!("empty geo_code");
    }
    Ok(GeoRef::new(level, code))
}

fn load_table(path: &Path) -> Result<Table> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let headers = rdr.headers()?.clone();
    if headers.len() < 4 {
        bail!("expected geo_level,geo_code,<fields...>,total");
    }
    let fields: Vec<&str> = headers.iter().skip(2).take(headers.len() - 3).collect();
    let mut table = Table::new(&fields);
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let geo = geo_of(&record).with_context(|| format!("row {}", i + 1))?;
        let count: f64 = record
            .get(record.len() - 1)
            .unwrap_or_default()
            .parse()
            .with_context(|| format!("row {}: total is not a number", i + 1))?;
        let categories = record.iter().skip(2).take(fields.len());
        table.push(geo, RawRow::multi(categories, count));
    }
    Ok(table)
}

fn load_dataset(path: &Path) -> Result<Vec<(GeoRef, Record)>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let geo = geo_of(&record).with_context(|| format!("row {}", i + 1))?;
        let mut values = Record::new();
        for (col, raw) in headers.iter().zip(record.iter()).skip(2) {
            // Blank cells are missing, not zero.
            if raw.is_empty() {
                continue;
            }
            let v: f64 = raw
                .parse()
                .with_context(|| format!("row {}: {col} is not a number", i + 1))?;
            values.insert(col.to_string(), v);
        }
        out.push((geo, values));
    }
    Ok(out)
}

/// Load a data directory into a [`MemorySource`] with the default table registry.
///
/// ### Layout
/// - `geographies.csv`: `level,code,name,square_kms,parents`
/// - `tables/<table name>.csv`: `geo_level,geo_code,<fields...>,total`
/// - `datasets/<dataset>.csv`: `geo_level,geo_code,<numeric columns...>`
pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<MemorySource> {
    load_dir_with(dir, TableRegistry::default())
}

pub fn load_dir_with<P: AsRef<Path>>(dir: P, registry: TableRegistry) -> Result<MemorySource> {
    let dir = dir.as_ref();
    let mut source = MemorySource::new(registry);

    let geo_path = dir.join("geographies.csv");
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&geo_path)
        .with_context(|| format!("open {}", geo_path.display()))?;
    let mut n_geos = 0;
    for row in rdr.deserialize::<GeographyRow>() {
        let row = row.with_context(|| format!("parse {}", geo_path.display()))?;
        source.add_geography(Geography {
            level: row.level,
            code: row.code,
            name: row.name,
            square_kms: row.square_kms,
            parents: parse_parents(&row.parents)?,
        });
        n_geos += 1;
    }

    let tables = csv_files(&dir.join("tables"))?;
    for (name, path) in &tables {
        let table = load_table(path).with_context(|| format!("load {}", path.display()))?;
        source.add_table(name.clone(), table);
    }

    let datasets = csv_files(&dir.join("datasets"))?;
    for (name, path) in &datasets {
        let records =
            load_dataset(path).with_context(|| format!("load {}", path.display()))?;
        for (geo, record) in records {
            source.add_record(name, geo.level, &geo.code, record);
        }
    }

    log::info!(
        "loaded {} geographies, {} tables, {} datasets from {}",
        n_geos,
        tables.len(),
        datasets.len(),
        dir.display()
    );
    Ok(source)
}

/// Save a profile as pretty JSON.
pub fn save_json<P: AsRef<Path>>(profile: &Profile, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(profile)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Quote cells that a spreadsheet would evaluate as a formula.
fn csv_safe(s: &str) -> Cow<'_, str> {
    if s.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{s}"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Save a profile as long-format CSV: one row per stat and level.
pub fn save_csv<P: AsRef<Path>>(profile: &Profile, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("section", "key", "name", "level", "value", "numerator"))?;
    for (id, section) in profile.sections() {
        for (key_path, stat) in section.walk() {
            let key = csv_safe(&key_path.join(".")).into_owned();
            let name = csv_safe(&stat.name);
            let numerators = stat.numerators.as_ref();
            wtr.serialize((
                id.as_str(),
                &key,
                &name,
                "this",
                stat.values.this,
                numerators.and_then(|n| n.this),
            ))?;
            for level in stat.values.levels() {
                wtr.serialize((
                    id.as_str(),
                    &key,
                    &name,
                    level.as_str(),
                    stat.values.get(level),
                    numerators.and_then(|n| n.get(level)),
                ))?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}
