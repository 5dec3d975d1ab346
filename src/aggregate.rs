//! Stat aggregation: raw `(category, count)` rows to a [`Distribution`] plus total.

use crate::distribution::{Distribution, LevelValues, Metadata, Stat};
use crate::error::StatsError;
use crate::models::RawRow;
use crate::recode::{RecodeTable, recode};
use crate::stats::percent;

/// Order of the entries in an aggregated distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryOrder {
    /// Order in which categories are first seen in the rows.
    #[default]
    Insertion,
    /// Largest numerator first; ties keep first-seen order.
    CountDescending,
    /// Ascending by display label.
    Label,
    /// These keys first, in this order, seeded at zero. Unlisted keys follow in discovery order.
    Explicit(Vec<String>),
}

impl CategoryOrder {
    pub fn explicit(keys: &[&str]) -> Self {
        CategoryOrder::Explicit(keys.iter().map(|k| k.to_string()).collect())
    }
}

/// Options for [`aggregate`]. Defaults: percent mode, numerators included,
/// insertion order, no filtering.
#[derive(Debug, Clone)]
pub struct AggregateOptions<'a> {
    pub total_override: Option<f64>,
    pub recode: Option<&'a RecodeTable>,
    pub only: Option<&'a [&'a str]>,
    /// Raw labels dropped before accumulation; applied after `only`.
    pub exclude: Option<&'a [&'a str]>,
    pub exclude_zero: bool,
    pub order: CategoryOrder,
    pub percent: bool,
    /// Emit `numerators`; `false` gives the percent-only shape.
    pub numerators: bool,
    pub metadata: Option<Metadata>,
}

impl Default for AggregateOptions<'_> {
    fn default() -> Self {
        Self {
            total_override: None,
            recode: None,
            only: None,
            exclude: None,
            exclude_zero: false,
            order: CategoryOrder::Insertion,
            percent: true,
            numerators: true,
            metadata: None,
        }
    }
}

impl<'a> AggregateOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recode(mut self, table: &'a RecodeTable) -> Self {
        self.recode = Some(table);
        self
    }

    pub fn only(mut self, keys: &'a [&'a str]) -> Self {
        self.only = Some(keys);
        self
    }

    pub fn exclude(mut self, keys: &'a [&'a str]) -> Self {
        self.exclude = Some(keys);
        self
    }

    pub fn exclude_zero(mut self) -> Self {
        self.exclude_zero = true;
        self
    }

    pub fn order(mut self, order: CategoryOrder) -> Self {
        self.order = order;
        self
    }

    pub fn counts(mut self) -> Self {
        self.percent = false;
        self
    }

    pub fn without_numerators(mut self) -> Self {
        self.numerators = false;
        self
    }

    pub fn total(mut self, total: f64) -> Self {
        self.total_override = Some(total);
        self
    }

    pub fn universe(mut self, universe: impl Into<String>) -> Self {
        self.metadata = Some(Metadata::universe(universe));
        self
    }
}

fn count_stat(name: &str, count: f64) -> Stat {
    Stat {
        name: name.to_string(),
        values: LevelValues::new(count),
        numerators: Some(LevelValues::new(count)),
        error: 0.0,
    }
}

/// Aggregate raw rows for one field combination at one geography.
///
/// Returns the distribution and its total: the sum of the kept rows' counts,
/// or `total_override` when given. With a zero total in percent mode every
/// value is `0.0` and [`Distribution::zero_total`] is set.
pub fn aggregate(
    rows: &[RawRow],
    options: &AggregateOptions<'_>,
) -> Result<(Distribution, f64), StatsError> {
    let mut raw = Distribution::new();
    let mut total = 0.0;
    for row in rows {
        let label = row.label();
        if let Some(only) = options.only {
            if !only.contains(&label.as_str()) {
                continue;
            }
        }
        if options.exclude.is_some_and(|ex| ex.contains(&label.as_str())) {
            continue;
        }
        if options.exclude_zero && row.count == 0.0 {
            continue;
        }
        total += row.count;
        let stat = raw.entry_or_insert_with(&label, || count_stat(&label, 0.0));
        if let Some(n) = stat.numerators.as_mut() {
            n.this = Some(n.this.unwrap_or(0.0) + row.count);
        }
        stat.values.this = Some(stat.values.this.unwrap_or(0.0) + row.count);
    }

    let explicit: Option<Vec<&str>> = match &options.order {
        CategoryOrder::Explicit(keys) => Some(keys.iter().map(String::as_str).collect()),
        _ => None,
    };

    let mut dist = match options.recode {
        Some(table) => recode(&raw, table, explicit.as_deref())?,
        None => match explicit.as_deref() {
            Some(keys) => {
                let mut seeded = Distribution::new();
                for key in keys {
                    seeded.insert(*key, count_stat(key, 0.0));
                }
                for (key, stat) in raw.take_entries() {
                    seeded.insert(key, stat);
                }
                seeded
            }
            None => raw,
        },
    };

    match options.order {
        CategoryOrder::CountDescending => dist.sort_by_numerator_desc(),
        CategoryOrder::Label => {
            let mut entries = dist.take_entries();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, stat) in entries {
                dist.insert(key, stat);
            }
        }
        _ => {}
    }

    let total = options.total_override.unwrap_or(total);
    if options.percent {
        if total == 0.0 {
            log::debug!("aggregating {} categories over a zero total", dist.len());
            dist.zero_total = true;
        }
        for (_, stat) in dist.iter_mut() {
            stat.values.this = Some(percent(stat.numerator(), total));
        }
    }
    if !options.numerators {
        for (_, stat) in dist.iter_mut() {
            stat.numerators = None;
        }
    }

    dist.metadata = options.metadata.clone();
    Ok((dist, total))
}
