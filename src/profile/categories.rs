//! Recode tables from raw census category labels to display labels.
//!
//! Each table must list every label the census publishes for its field.

use crate::recode::RecodeTable;
use std::sync::LazyLock;

pub static ECD_AGE: LazyLock<RecodeTable> = LazyLock::new(|| {
    RecodeTable::from_pairs(&[
        ("0", "0-2"),
        ("1", "0-2"),
        ("2", "0-2"),
        ("3", "3-5"),
        ("4", "3-5"),
        ("5", "3-5"),
        ("6", "6-9"),
        ("7", "6-9"),
        ("8", "6-9"),
    ])
});

pub const AGE_DECADE_ORDER: &[&str] = &[
    "0-9", "10-19", "20-29", "30-39", "40-49", "50-59", "60-69", "70-79", "80+",
];

pub static AGE_DECADE: LazyLock<RecodeTable> = LazyLock::new(|| {
    RecodeTable::from_pairs(&[
        ("00 - 04", "0-9"),
        ("05 - 09", "0-9"),
        ("10 - 14", "10-19"),
        ("15 - 19", "10-19"),
        ("20 - 24", "20-29"),
        ("25 - 29", "20-29"),
        ("30 - 34", "30-39"),
        ("35 - 39", "30-39"),
        ("40 - 44", "40-49"),
        ("45 - 49", "40-49"),
        ("50 - 54", "50-59"),
        ("55 - 59", "50-59"),
        ("60 - 64", "60-69"),
        ("65 - 69", "60-69"),
        ("70 - 74", "70-79"),
        ("75 - 79", "70-79"),
        ("80 - 84", "80+"),
        ("85+", "80+"),
    ])
});

pub const INCOME_ORDER: &[&str] = &[
    "Unspec.", "0k", "0.8k", "1.6k", "3.2k", "6.4k", "12.8k", "51.2k", "102.4k", "> 102.4k",
];

pub static INCOME: LazyLock<RecodeTable> = LazyLock::new(|| {
    RecodeTable::from_pairs(&[
        ("No income", "0k"),
        ("Not applicable", "N/A"),
        ("R 102 401 - R 204 800", "> 102.4k"),
        ("R 12 801 - R 25 600", "51.2k"),
        ("R 1 601 - R 3 200", "3.2k"),
        ("R 1 - R 400", "0.8k"),
        ("R 204 801 or more", "> 102.4k"),
        ("R 25 601 - R 51 200", "51.2k"),
        ("R 3 201 - R 6 400", "6.4k"),
        ("R 401 - R 800", "0.8k"),
        ("R 51 201 - R 102 400", "102.4k"),
        ("R 6 401 - R 12 800", "12.8k"),
        ("R 801 - R 1 600", "1.6k"),
        ("Unspecified", "Unspec."),
    ])
});

pub const EDUCATION_ORDER: &[&str] = &[
    "None", "Other", "<= Gr 3", "GET", "FET", "HET", "Post-grad",
];

pub static EDUCATION: LazyLock<RecodeTable> = LazyLock::new(|| {
    RecodeTable::from_pairs(&[
        ("Gade 0", "<= Gr 3"),
        ("Grade 1 / Sub A", "<= Gr 3"),
        ("Grade 2 / Sub B", "<= Gr 3"),
        ("Grade 3 / Std 1/ABET 1Kha Ri Gude;SANLI", "<= Gr 3"),
        ("Grade 4 / Std 2", "GET"),
        ("Grade 5 / Std 3/ABET 2", "GET"),
        ("Grade 6 / Std 4", "GET"),
        ("Grade 7 / Std 5/ ABET 3", "GET"),
        ("Grade 8 / Std 6 / Form 1", "GET"),
        ("Grade 9 / Std 7 / Form 2/ ABET 4", "GET"),
        ("Grade 10 / Std 8 / Form 3", "FET"),
        ("Grade 11 / Std 9 / Form 4", "FET"),
        ("Grade 12 / Std 10 / Form 5", "FET"),
        ("NTC I / N1/ NIC/ V Level 2", "FET"),
        ("NTC II / N2/ NIC/ V Level 3", "FET"),
        ("NTC III /N3/ NIC/ V Level 4", "FET"),
        ("N4 / NTC 4", "FET"),
        ("N5 /NTC 5", "HET"),
        ("N6 / NTC 6", "HET"),
        ("Certificate with less than Grade 12 / Std 10", "FET"),
        ("Diploma with less than Grade 12 / Std 10", "FET"),
        ("Certificate with Grade 12 / Std 10", "HET"),
        ("Diploma with Grade 12 / Std 10", "HET"),
        ("Higher Diploma", "HET"),
        ("Post Higher Diploma Masters; Doctoral Diploma", "Post-grad"),
        ("Bachelors Degree", "HET"),
        ("Bachelors Degree and Post graduate Diploma", "Post-grad"),
        ("Honours degree", "Post-grad"),
        ("Higher Degree Masters / PhD", "Post-grad"),
        ("Other", "Other"),
        ("No schooling", "None"),
        ("Unspecified", "Other"),
        ("Not applicable", "Other"),
    ])
});

/// Raw education labels counting as "completed GET or higher".
pub const EDUCATION_GET_OR_HIGHER: &[&str] = &[
    "Grade 9 / Std 7 / Form 2/ ABET 4",
    "Grade 10 / Std 8 / Form 3",
    "Grade 11 / Std 9 / Form 4",
    "Grade 12 / Std 10 / Form 5",
    "NTC I / N1/ NIC/ V Level 2",
    "NTC II / N2/ NIC/ V Level 3",
    "NTC III /N3/ NIC/ V Level 4",
    "N4 / NTC 4",
    "N5 /NTC 5",
    "N6 / NTC 6",
    "Certificate with less than Grade 12 / Std 10",
    "Diploma with less than Grade 12 / Std 10",
    "Certificate with Grade 12 / Std 10",
    "Diploma with Grade 12 / Std 10",
    "Higher Diploma",
    "Post Higher Diploma Masters; Doctoral Diploma",
    "Bachelors Degree",
    "Bachelors Degree and Post graduate Diploma",
    "Honours degree",
    "Higher Degree Masters / PhD",
];

/// Raw education labels counting as "completed FET or higher".
pub const EDUCATION_FET_OR_HIGHER: &[&str] = &[
    "Grade 12 / Std 10 / Form 5",
    "N4 / NTC 4",
    "N5 /NTC 5",
    "N6 / NTC 6",
    "Certificate with Grade 12 / Std 10",
    "Diploma with Grade 12 / Std 10",
    "Higher Diploma",
    "Post Higher Diploma Masters; Doctoral Diploma",
    "Bachelors Degree",
    "Bachelors Degree and Post graduate Diploma",
    "Honours degree",
    "Higher Degree Masters / PhD",
];

pub static TYPE_OF_DWELLING: LazyLock<RecodeTable> = LazyLock::new(|| {
    RecodeTable::from_pairs(&[
        (
            "House or brick/concrete block structure on a separate stand or yard or on a farm",
            "House",
        ),
        (
            "Traditional dwelling/hut/structure made of traditional materials",
            "Traditional",
        ),
        ("Flat or apartment in a block of flats", "Apartment"),
        ("Cluster house in complex", "Cluster house"),
        ("Townhouse (semi-detached house in a complex)", "Townhouse"),
        ("Semi-detached house", "Semi-detached house"),
        ("House/flat/room in backyard", "Backyard in flat"),
        ("Informal dwelling (shack; in backyard)", "Shack"),
        (
            "Informal dwelling (shack; not in backyard; e.g. in an informal/squatter settlement or on a farm)",
            "Shack",
        ),
        (
            "Room/flatlet on a property or larger dwelling/servants quarters/granny flat",
            "Room or flatlet",
        ),
        ("Caravan/tent", "Caravan/tent"),
        ("Other", "Other"),
        ("Unspecified", "Unspecified"),
        ("Not applicable", "N/A"),
    ])
});

pub static WATER_SOURCE: LazyLock<RecodeTable> = LazyLock::new(|| {
    RecodeTable::from_pairs(&[
        (
            "Regional/local water scheme (operated by municipality or other water services provider)",
            "Service provider",
        ),
        ("Water tanker", "Tanker"),
        ("Spring", "Spring"),
        ("Other", "Other"),
        ("Dam/pool/stagnant water", "Dam"),
        ("River/stream", "River"),
        ("Not applicable", "N/A"),
        ("Borehole", "Borehole"),
        ("Rain water tank", "Rainwater tank"),
        ("Water vendor", "Vendor"),
    ])
});

pub static REFUSE_DISPOSAL: LazyLock<RecodeTable> = LazyLock::new(|| {
    RecodeTable::from_pairs(&[
        (
            "Removed by local authority/private company less often",
            "Service provider (not regularly)",
        ),
        ("Own refuse dump", "Own dump"),
        ("Communal refuse dump", "Communal dump"),
        ("Other", "Other"),
        ("Not applicable", "N/A"),
        ("No rubbish disposal", "None"),
        ("Unspecified", "Unspecified"),
        (
            "Removed by local authority/private company at least once a week",
            "Service provider (regularly)",
        ),
    ])
});

pub static TOILET: LazyLock<RecodeTable> = LazyLock::new(|| {
    RecodeTable::from_pairs(&[
        ("Flush toilet (connected to sewerage system)", "Flush toilet"),
        ("Flush toilet (with septic tank)", "Flush toilet"),
        ("Chemical toilet", "Chemical toilet"),
        ("Pit toilet with ventilation (VIP)", "Pit toilet"),
        ("Pit toilet without ventilation", "Pit toilet"),
        ("Bucket toilet", "Bucket toilet"),
        ("Other", "Other"),
        ("None", "None"),
        ("Unspecified", "Unspecified"),
        ("Not applicable", "N/A"),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_tables_only_produce_ordered_labels() {
        for (table, order) in [
            (&*AGE_DECADE, AGE_DECADE_ORDER),
            (&*EDUCATION, EDUCATION_ORDER),
        ] {
            for label in table.display_labels() {
                assert!(order.contains(&label), "{label} missing from key order");
            }
        }
        assert_eq!(EDUCATION.lookup("No schooling").unwrap(), "None");
        assert_eq!(INCOME.lookup("R 204 801 or more").unwrap(), "> 102.4k");
    }
}
