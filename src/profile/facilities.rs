//! School and hospital counts, and people per facility.

use super::{SectionContext, dataset_metadata, optional, record_distribution};
use crate::aggregate::AggregateOptions;
use crate::distribution::Stat;
use crate::error::Result;
use crate::section::Section;
use crate::source::FieldSet;
use crate::stats::ratio;

const SCHOOLS_DATASET: &str = "schools_2015";
const HOSPITALS_DATASET: &str = "hospitals_2012";

const SCHOOL_COLUMNS: &[(&str, &str)] = &[
    ("primary_schools", "Primary schools"),
    ("combined_schools", "Combined schools"),
    ("intermediate_schools", "Intermediate schools"),
    ("secondary_schools", "Secondary schools"),
];

const HOSPITAL_COLUMNS: &[(&str, &str)] = &[
    ("regional_hospital", "Regional hospitals"),
    ("central_hospital", "Central hospitals"),
    ("district_hospital", "District hospitals"),
    ("clinic", "Clinics"),
    ("chc", "Community health centre"),
];

const PRIMARY_SCHOOL_AGES: &[&str] = &["6", "7", "8", "9", "10", "11", "12", "13"];
const SECONDARY_SCHOOL_AGES: &[&str] = &["14", "15", "16", "17", "18"];

/// Children in the given single-year ages; `None` without age data.
fn children_aged(ctx: &SectionContext<'_>, ages: &'static [&'static str]) -> Result<Option<f64>> {
    let total = optional(ctx.stat_data(
        &FieldSet::single("age in completed years"),
        &AggregateOptions::new().only(ages).counts(),
    ))?;
    Ok(total.map(|(_, total)| total))
}

pub(super) fn build_schools(ctx: &SectionContext<'_>) -> Result<Section> {
    let record = ctx.record(SCHOOLS_DATASET)?;
    let (mut breakdown, total_schools) = record_distribution(&record, SCHOOL_COLUMNS, None);
    breakdown.metadata = Some(dataset_metadata("Schools", SCHOOLS_DATASET));

    let per_school = |children: Option<f64>, key: &str| {
        let schools = breakdown.get(key).map(Stat::numerator).unwrap_or(0.0);
        children.and_then(|c| ratio(c, schools))
    };
    let primary = per_school(children_aged(ctx, PRIMARY_SCHOOL_AGES)?, "primary_schools");
    let secondary = per_school(children_aged(ctx, SECONDARY_SCHOOL_AGES)?, "secondary_schools");

    Ok(Section::new()
        .with("total_schools", Stat::value("Schools", total_schools))
        .with("school_breakdown", breakdown)
        .with(
            "children_per_primary_school",
            Stat::maybe("Children (6-13 years) in the region for each primary school", primary),
        )
        .with(
            "children_per_secondary_school",
            Stat::maybe("Children (14-18 years) for each secondary school", secondary),
        ))
}

pub(super) fn build_hospitals(ctx: &SectionContext<'_>) -> Result<Section> {
    let total_pop = ctx.total_population()?;
    let record = ctx.record(HOSPITALS_DATASET)?;
    let (mut breakdown, total_hospitals) = record_distribution(&record, HOSPITAL_COLUMNS, None);
    breakdown.metadata = Some(dataset_metadata("Hospitals and clinics", HOSPITALS_DATASET));

    Ok(Section::new()
        .with("total_hospitals", Stat::value("Hospitals / Clinics", total_hospitals))
        .with("hospital_breakdown", breakdown)
        .with(
            "people_per_hospital",
            Stat::maybe(
                "People living in the region for each hospital / clinic",
                ratio(total_pop, total_hospitals),
            ),
        ))
}
