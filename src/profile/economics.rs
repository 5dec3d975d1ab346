//! Income, employment, and sector breakdowns.

use super::SectionContext;
use super::categories::{INCOME, INCOME_ORDER};
use crate::aggregate::{AggregateOptions, CategoryOrder};
use crate::error::Result;
use crate::section::Section;
use crate::source::FieldSet;

pub(super) fn build(ctx: &SectionContext<'_>) -> Result<Section> {
    let (income, _) = ctx.stat_data(
        &FieldSet::single("individual monthly income")
            .from_table("individualmonthlyincome_employedonly"),
        &AggregateOptions::new()
            .exclude(&["Not applicable"])
            .recode(&INCOME)
            .order(CategoryOrder::explicit(INCOME_ORDER))
            .universe("Officially employed individuals"),
    )?;

    let (employment, _) = ctx.stat_data(
        &FieldSet::single("official employment status"),
        &AggregateOptions::new()
            .exclude(&["Age less than 15 years", "Not applicable"])
            .universe("Workers 15 and over"),
    )?;

    let (sectors, _) = ctx.stat_data(
        &FieldSet::single("type of sector"),
        &AggregateOptions::new()
            .exclude(&["Not applicable"])
            .exclude_zero()
            .order(CategoryOrder::Label),
    )?;

    Ok(Section::new()
        .with("individual_income_distribution", income)
        .with("employment_status", employment)
        .with("sector_type_distribution", sectors))
}
