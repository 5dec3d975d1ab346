//! Youth population and educational deprivation.

use super::{SectionContext, column};
use crate::distribution::Stat;
use crate::error::{ProfileError, Result};
use crate::section::Section;

const DATASET: &str = "youth";

pub(super) fn build(ctx: &SectionContext<'_>) -> Result<Section> {
    // Unlike facility counts, a missing youth record is not a zero.
    let record = ctx
        .source
        .fetch_record(DATASET, ctx.level, ctx.code)?
        .ok_or_else(|| ProfileError::LocationNotFound {
            table: DATASET.to_string(),
            level: ctx.level,
            code: ctx.code.to_string(),
        })?;

    Ok(Section::new()
        .with(
            "youth_pop",
            Stat::value("Youth population (age 15-24)", column(&record, "youth_pop")),
        )
        .with(
            "youth_prop",
            Stat::value(
                "Youth (age 15-24) as a percentage of total population",
                column(&record, "youth_proportion"),
            ),
        )
        .with(
            "edu_dep",
            Stat::value(
                "of youth deprived in educational attainment",
                column(&record, "edu_dep"),
            ),
        ))
}
