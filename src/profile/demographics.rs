//! Population, age, and density statistics.

use super::categories::{AGE_DECADE, AGE_DECADE_ORDER, ECD_AGE};
use super::{SectionContext, optional};
use crate::aggregate::{AggregateOptions, CategoryOrder, aggregate};
use crate::distribution::{Distribution, Stat};
use crate::error::{ProfileError, Result};
use crate::section::Section;
use crate::source::FieldSet;
use crate::stats::{median_of_binned, per_square_km, percent};

const ECD_AGES: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8"];

pub(super) fn build(ctx: &SectionContext<'_>) -> Result<Section> {
    let (population_groups, total_pop) =
        ctx.stat_data(&FieldSet::single("population group"), &AggregateOptions::new())?;

    let (age_groups, _) = ctx.stat_data(
        &FieldSet::single("age groups in 5 years"),
        &AggregateOptions::new()
            .recode(&AGE_DECADE)
            .order(CategoryOrder::explicit(AGE_DECADE_ORDER)),
    )?;

    let mut section = Section::new()
        .with("total_population", Stat::value("People", total_pop))
        .with("population_group_distribution", population_groups)
        .with("age_group_distribution", age_groups);

    // Single-year ages are not published for every level.
    match optional(ctx.rows(&FieldSet::single("age in completed years")))? {
        Some(rows) => {
            let bins = age_bins(&rows)?;
            section.insert("median_age", median_age(&bins));
            section.insert("age_category_distribution", age_categories(&bins));
        }
        None => {
            section.insert("median_age", Stat::not_available("Median age"));
            section.insert(
                "age_category_distribution",
                Distribution::from_iter([(String::new(), Stat::value("N/A", 0.0))]),
            );
        }
    }

    let ecd = optional(ctx.stat_data(
        &FieldSet::single("age in completed years"),
        &AggregateOptions::new()
            .only(ECD_AGES)
            .recode(&ECD_AGE)
            .universe("Children under the age of 9 years"),
    ))?;
    if let Some((ecd_age_groups, ecd_children)) = &ecd {
        section.insert("ecd_age_groups", ecd_age_groups.clone());
        section.insert(
            "ecd_children",
            Stat::value("Children under the age of 9 years", *ecd_children),
        );
    }

    if let Some((ecd_gender, _)) = optional(ctx.stat_data(
        &FieldSet::single("gender").from_table("genderunder9"),
        &AggregateOptions::new().universe("Children under the age of 9 years"),
    ))? {
        section.insert("ecd_gender", ecd_gender);
    }

    if let Some(rows) = optional(ctx.rows(
        &FieldSet::single("age groups in 5 years").from_table("womenagegroupsin5years15to44"),
    ))? {
        let (women, total_women) = aggregate(
            &rows,
            &AggregateOptions::new()
                .order(CategoryOrder::Label)
                .universe("Women between the age of 15-44 years"),
        )?;
        section.insert("women_child_bearing_age", women);
        section.insert(
            "total_women_child_bearing_age",
            Stat::value("Women between the age of 15-44 years", total_women),
        );
    }

    let geo = ctx.geography()?;
    if let Some(density) = per_square_km(total_pop, geo.square_kms) {
        section.insert(
            "population_density",
            Stat::value("people per square kilometre", density),
        );
        if let Some((ecd_age_groups, ecd_children)) = &ecd {
            if let Some(child_density) = per_square_km(*ecd_children, geo.square_kms) {
                section.insert(
                    "child_population_density",
                    Stat::value("Children (0-9 years) per square kilometre", child_density),
                );
            }
            let mut densities = Distribution::new();
            for (key, group) in ecd_age_groups.iter() {
                let count = group.numerator();
                let value = per_square_km(count, geo.square_kms).unwrap_or(0.0);
                densities.insert(key, Stat::with_numerator(group.name.clone(), count, value));
            }
            densities.metadata = ecd_age_groups.metadata.clone();
            section.insert("ecd_pop_density", densities);
        }
    }

    Ok(section)
}

/// `(age, count)` bins sorted by age.
fn age_bins(rows: &[crate::models::RawRow]) -> Result<Vec<(f64, f64)>> {
    let mut bins = rows
        .iter()
        .map(|row| {
            let label = row.label();
            label
                .trim()
                .parse::<f64>()
                .map(|age| (age, row.count))
                .map_err(|_| ProfileError::Source(format!("non-numeric age: {label:?}")))
        })
        .collect::<Result<Vec<_>>>()?;
    bins.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(bins)
}

fn median_age(bins: &[(f64, f64)]) -> Stat {
    let total: f64 = bins.iter().map(|(_, count)| count).sum();
    match median_of_binned(bins, total) {
        Ok(median) => Stat::value("Median age", median),
        Err(e) => {
            log::debug!("median age unavailable: {e}");
            Stat::not_available("Median age")
        }
    }
}

fn age_categories(bins: &[(f64, f64)]) -> Distribution {
    let (mut under_18, mut working, mut over_65, mut total) = (0.0, 0.0, 0.0, 0.0);
    for &(age, count) in bins {
        total += count;
        if age < 18.0 {
            under_18 += count;
        } else if age >= 65.0 {
            over_65 += count;
        } else {
            working += count;
        }
    }
    let mut dist = Distribution::new();
    dist.insert("under_18", Stat::value("Under 18", percent(under_18, total)));
    dist.insert("18_to_64", Stat::value("18 to 64", percent(working, total)));
    dist.insert("65_and_over", Stat::value("65 and over", percent(over_65, total)));
    dist
}
