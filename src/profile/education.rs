//! Educational attainment of adults 25 and over.

use super::SectionContext;
use super::categories::{
    EDUCATION, EDUCATION_FET_OR_HIGHER, EDUCATION_GET_OR_HIGHER, EDUCATION_ORDER,
};
use crate::aggregate::{AggregateOptions, CategoryOrder, aggregate};
use crate::distribution::{Distribution, Metadata, Stat};
use crate::error::Result;
use crate::section::Section;
use crate::source::FieldSet;
use crate::stats::percent;

const UNIVERSE: &str = "Individuals 25 and over";

pub(super) fn build(ctx: &SectionContext<'_>) -> Result<Section> {
    let rows = ctx.rows(
        &FieldSet::single("highest educational level")
            .from_table("highesteducationallevel_25andover"),
    )?;

    let (attainment, total) = aggregate(
        &rows,
        &AggregateOptions::new()
            .recode(&EDUCATION)
            .order(CategoryOrder::explicit(EDUCATION_ORDER))
            .universe(UNIVERSE),
    )?;

    let (mut get_or_higher, mut fet_or_higher) = (0.0, 0.0);
    for row in &rows {
        let label = row.label();
        if EDUCATION_GET_OR_HIGHER.contains(&label.as_str()) {
            get_or_higher += row.count;
        }
        if EDUCATION_FET_OR_HIGHER.contains(&label.as_str()) {
            fet_or_higher += row.count;
        }
    }

    let mut split = Distribution::new().with_metadata(Metadata::universe(UNIVERSE));
    split.insert(
        "percent_get_or_higher",
        Stat::with_numerator(
            "Completed GET or higher",
            get_or_higher,
            percent(get_or_higher, total),
        ),
    );
    split.insert(
        "percent_fet_or_higher",
        Stat::with_numerator(
            "Completed FET or higher",
            fet_or_higher,
            percent(fet_or_higher, total),
        ),
    );

    Ok(Section::new()
        .with("educational_attainment_distribution", attainment)
        .with("educational_attainment", split))
}
