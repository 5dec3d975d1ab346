//! Household heads and dwelling types.

use super::categories::TYPE_OF_DWELLING;
use super::{SectionContext, optional};
use crate::aggregate::{AggregateOptions, CategoryOrder};
use crate::distribution::Stat;
use crate::error::Result;
use crate::section::Section;
use crate::source::FieldSet;
use crate::stats::percent;

pub(super) fn build(ctx: &SectionContext<'_>) -> Result<Section> {
    let (head_gender, total_households) = ctx.stat_data(
        &FieldSet::single("gender of household head"),
        &AggregateOptions::new().order(CategoryOrder::Label),
    )?;
    let female_heads = head_gender.get("Female").map(Stat::numerator).unwrap_or(0.0);

    let (dwellings, _) = ctx.stat_data(
        &FieldSet::single("type of dwelling"),
        &AggregateOptions::new()
            .recode(&TYPE_OF_DWELLING)
            .order(CategoryOrder::CountDescending),
    )?;
    let informal = dwellings.get("Shack").map(Stat::numerator).unwrap_or(0.0);

    let mut head = Section::new()
        .with("gender_distribution", head_gender)
        .with(
            "female",
            Stat::with_numerator(
                "Households with women as their head",
                female_heads,
                percent(female_heads, total_households),
            ),
        );
    if let Some(rows) = optional(ctx.rows(
        &FieldSet::single("gender of head of household")
            .from_table("genderofheadofhouseholdunder18"),
    ))? {
        let under_18: f64 = rows.iter().map(|r| r.count).sum();
        head.insert(
            "under_18",
            Stat::value("Households with heads under 18 years old", under_18),
        );
    }

    Ok(Section::new()
        .with("total_households", Stat::value("Households", total_households))
        .with("type_of_dwelling_distribution", dwellings)
        .with(
            "informal",
            Stat::with_numerator(
                "Households that are informal dwellings (shacks)",
                informal,
                percent(informal, total_households),
            ),
        )
        .with("head_of_household", head))
}
