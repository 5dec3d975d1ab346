//! Early childhood development centres: registration status and children per centre.

use super::categories::ECD_AGE;
use super::{SectionContext, column, dataset_metadata, record_distribution};
use crate::aggregate::AggregateOptions;
use crate::distribution::{Distribution, Stat};
use crate::error::Result;
use crate::section::Section;
use crate::source::FieldSet;
use crate::stats::{percent, ratio};

const DATASET: &str = "ecd_centres_2014";

const REGISTRATION_COLUMNS: &[(&str, &str)] = &[
    ("reg_full", "Registered"),
    ("reg_conditional", "Conditionally registered"),
    ("reg_not_registered", "Unregistered"),
    ("reg_in_process", "Registration in process"),
    ("reg_unspecified", "Unspecified"),
];

const UNDER_SIX: &[&str] = &["0", "1", "2", "3", "4", "5"];

pub(super) fn build(ctx: &SectionContext<'_>) -> Result<Section> {
    let (age_groups, children) = ctx.stat_data(
        &FieldSet::single("age in completed years"),
        &AggregateOptions::new().only(UNDER_SIX).recode(&ECD_AGE).counts(),
    )?;
    let group = |key: &str| age_groups.get(key).and_then(Stat::this).unwrap_or(0.0);
    let (children_0_to_2, children_3_to_5) = (group("0-2"), group("3-5"));

    let record = ctx.record(DATASET)?;
    let total_ecd = column(&record, "total_ecd_centres");
    let (mut registration, registered) =
        record_distribution(&record, REGISTRATION_COLUMNS, Some(total_ecd));

    // Centres not in any registration column.
    let incomplete = total_ecd - registered;
    registration.insert(
        "reg_incomplete",
        Stat::with_numerator("Registration incomplete", incomplete, percent(incomplete, total_ecd)),
    );
    registration.metadata = Some(dataset_metadata("ECD centres", DATASET));

    let learners_count = column(&record, "total_learners_accomodated");
    let mut learners = Distribution::new().with_metadata(dataset_metadata("ECD centres", DATASET));
    learners.insert(
        "total_learners_accomodated",
        Stat::with_numerator(
            "Learners accomodated in ECD centres in the region",
            learners_count,
            learners_count,
        ),
    );

    Ok(Section::new()
        .with("total_ecd_centres", Stat::value("ECD centres", total_ecd))
        .with("ecd_centre_breakdown", registration)
        .with("ecd_learners", learners)
        .with(
            "children_per_ecd_centre",
            Stat::maybe(
                "Children (0-5 years) living in the region for each ECD Centre",
                ratio(children, total_ecd),
            ),
        )
        .with(
            "children_0_to_2_per_ecd_centre",
            Stat::maybe(
                "Children (0-2 years) living in the region for each ECD Centre",
                ratio(children_0_to_2, total_ecd),
            ),
        )
        .with(
            "children_3_to_5_per_ecd_centre",
            Stat::maybe(
                "Children (3-5 years) living in the region for each ECD Centre",
                ratio(children_3_to_5, total_ecd),
            ),
        ))
}
