//! Municipal election results: party support and turnout.

use super::{SectionContext, column, dataset_metadata};
use crate::aggregate::{AggregateOptions, CategoryOrder};
use crate::distribution::Stat;
use crate::error::Result;
use crate::section::Section;
use crate::source::FieldSet;
use crate::stats::percent;

const PARTY_TABLE: &str = "partyvotes_municipal2011";
const TURNOUT_DATASET: &str = "voter_turnout_municipal2011";

pub(super) fn build(ctx: &SectionContext<'_>) -> Result<Section> {
    let (mut parties, valid_votes) = ctx.stat_data(
        &FieldSet::single("party").from_table(PARTY_TABLE),
        &AggregateOptions::new().order(CategoryOrder::CountDescending),
    )?;
    parties.metadata = Some(dataset_metadata("Valid votes", PARTY_TABLE));

    let turnout = ctx.record(TURNOUT_DATASET)?;
    if turnout.is_empty() {
        log::debug!("{TURNOUT_DATASET}: no record for {}-{}", ctx.level, ctx.code);
    }
    let registered = column(&turnout, "registered_voters");
    let total_votes = column(&turnout, "total_votes");
    let spoilt = column(&turnout, "spoilt_votes");

    let summary = Section::new()
        .with("registered_voters", Stat::value("Registered voters", registered))
        .with("total_votes", Stat::value("Votes cast", total_votes))
        .with("valid_votes", Stat::value("Valid votes", valid_votes))
        .with(
            "voter_turnout",
            Stat::with_numerator(
                "Registered voters who cast a ballot",
                total_votes,
                percent(total_votes, registered),
            ),
        )
        .with(
            "spoilt_votes",
            Stat::with_numerator("Spoilt ballots", spoilt, percent(spoilt, total_votes)),
        );

    Ok(Section::new()
        .with("party_distribution", parties)
        .with("turnout", summary))
}
