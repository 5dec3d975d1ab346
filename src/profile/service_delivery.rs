//! Water, refuse, electricity, and sanitation access.

use super::SectionContext;
use super::categories::{REFUSE_DISPOSAL, TOILET, WATER_SOURCE};
use crate::aggregate::{AggregateOptions, CategoryOrder};
use crate::distribution::{Distribution, Metadata, Stat};
use crate::error::Result;
use crate::models::RawRow;
use crate::section::Section;
use crate::source::FieldSet;
use crate::stats::percent;

const ELECTRICITY_FIELDS: &[&str] = &[
    "electricity for cooking",
    "electricity for heating",
    "electricity for lighting",
];

pub(super) fn build(ctx: &SectionContext<'_>) -> Result<Section> {
    let (water, total_water) = ctx.stat_data(
        &FieldSet::single("source of water"),
        &AggregateOptions::new()
            .recode(&WATER_SOURCE)
            .order(CategoryOrder::CountDescending),
    )?;
    let water_sp = water
        .get("Service provider")
        .map(Stat::numerator)
        .unwrap_or(0.0);

    let (refuse, total_refuse) = ctx.stat_data(
        &FieldSet::single("refuse disposal"),
        &AggregateOptions::new()
            .recode(&REFUSE_DISPOSAL)
            .order(CategoryOrder::CountDescending),
    )?;
    let refuse_sp: f64 = refuse
        .iter()
        .filter(|(key, _)| key.starts_with("Service provider"))
        .map(|(_, s)| s.numerator())
        .sum();

    let elec_rows = ctx.rows(&FieldSet::new(ELECTRICITY_FIELDS))?;
    let (electricity, some_elec, total_elec) = electricity_access(&elec_rows);

    let (toilets, total_toilet) = ctx.stat_data(
        &FieldSet::single("toilet facilities"),
        &AggregateOptions::new()
            .exclude_zero()
            .recode(&TOILET)
            .order(CategoryOrder::CountDescending),
    )?;
    let (mut flush, mut no_toilet) = (0.0, 0.0);
    for (key, stat) in toilets.iter() {
        if key.starts_with("Flush") || key.starts_with("Chemical") {
            flush += stat.numerator();
        }
        if key == "None" {
            no_toilet += stat.numerator();
        }
    }

    Ok(Section::new()
        .with("water_source_distribution", water)
        .with(
            "percentage_water_from_service_provider",
            Stat::with_numerator(
                "Are getting water from a regional or local service provider",
                water_sp,
                percent(water_sp, total_water),
            ),
        )
        .with("refuse_disposal_distribution", refuse)
        .with(
            "percentage_ref_disp_from_service_provider",
            Stat::with_numerator(
                "Are getting refuse disposal from a local authority or private company",
                refuse_sp,
                percent(refuse_sp, total_refuse),
            ),
        )
        .with(
            "percentage_electricity_access",
            Stat::with_numerator(
                "Have electricity for at least one of cooking, heating or lighting",
                some_elec,
                percent(some_elec, total_elec),
            ),
        )
        .with("electricity_access_distribution", electricity)
        .with(
            "percentage_flush_toilet_access",
            Stat::with_numerator(
                "Have access to flush or chemical toilets",
                flush,
                percent(flush, total_toilet),
            ),
        )
        .with(
            "percentage_no_toilet_access",
            Stat::with_numerator(
                "Have no access to any toilets",
                no_toilet,
                percent(no_toilet, total_toilet),
            ),
        )
        .with("toilet_facilities_distribution", toilets))
}

/// Classify households by how many of the electricity uses they have.
///
/// A category value starting with "no " means the use is not electric.
/// Returns the distribution, the count with at least one use, and the total.
fn electricity_access(rows: &[RawRow]) -> (Distribution, f64, f64) {
    let (mut all, mut some_not_all, mut none) = (0.0, 0.0, 0.0);
    let mut total = 0.0;
    for row in rows {
        total += row.count;
        let has: Vec<bool> = row
            .categories
            .iter()
            .map(|c| !c.trim().to_lowercase().starts_with("no "))
            .collect();
        if has.iter().all(|h| *h) {
            all += row.count;
        } else if has.iter().any(|h| *h) {
            some_not_all += row.count;
        } else {
            none += row.count;
        }
    }

    let mut dist = Distribution::new().with_metadata(Metadata::universe("Households"));
    for (key, name, count) in [
        ("total_all_elec", "Have electricity for everything", all),
        ("total_some_not_all_elec", "Have electricity for some things", some_not_all),
        ("total_no_elec", "No electricity", none),
    ] {
        dist.insert(key, Stat::with_numerator(name, count, percent(count, total)));
    }
    (dist, all + some_not_all, total)
}
