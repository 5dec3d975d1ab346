use geoprofile::models::{RawRow, rows};
use geoprofile::remainder::OTHER;
use geoprofile::{
    AggregateOptions, CategoryOrder, RecodeTable, StatsError, aggregate, group_remainder,
};

fn water_table() -> RecodeTable {
    RecodeTable::from_pairs(&[
        ("Borehole", "Well"),
        ("Spring", "Well"),
        ("Regional/local water scheme", "Service provider"),
        ("River/stream", "River"),
    ])
}

#[test]
fn male_female_percentages() {
    let r = rows([("Male", 40.0), ("Female", 60.0)]);
    let (d, total) = aggregate(&r, &AggregateOptions::new()).unwrap();
    assert_eq!(total, 100.0);
    assert_eq!(d.keys().collect::<Vec<_>>(), ["Male", "Female"]);

    let female = d.get("Female").unwrap();
    assert_eq!(female.name, "Female");
    assert_eq!(female.numerator(), 60.0);
    assert_eq!(female.this(), Some(60.0));

    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["Male"]["values"]["this"], 40.0);
    assert_eq!(json["Male"]["numerators"]["this"], 40.0);
    assert_eq!(json["Male"]["error"]["this"], 0.0);
}

#[test]
fn male_female_grouped_to_one_category() {
    let r = rows([("Male", 40.0), ("Female", 60.0)]);
    let (mut d, _) = aggregate(&r, &AggregateOptions::new()).unwrap();
    group_remainder(&mut d, 1);

    assert_eq!(d.keys().collect::<Vec<_>>(), ["Female", OTHER]);
    let female = d.get("Female").unwrap();
    assert_eq!(female.numerator(), 60.0);
    assert_eq!(female.this(), Some(60.0));
    let other = d.get(OTHER).unwrap();
    assert_eq!(other.name, OTHER);
    assert_eq!(other.numerator(), 40.0);
    assert_eq!(other.this(), Some(40.0));
}

#[test]
fn recoded_numerators_sum_to_total() {
    let r = rows([
        ("Borehole", 12.0),
        ("Regional/local water scheme", 70.0),
        ("Spring", 3.0),
        ("River/stream", 15.0),
    ]);
    let table = water_table();
    let (d, total) = aggregate(&r, &AggregateOptions::new().recode(&table)).unwrap();
    assert_eq!(total, 100.0);
    assert_eq!(d.total_numerator(), total);
    assert_eq!(d.get("Well").unwrap().numerator(), 15.0);
    // first-seen order of display labels
    assert_eq!(d.keys().collect::<Vec<_>>(), ["Well", "Service provider", "River"]);
}

#[test]
fn percentages_sum_to_about_one_hundred() {
    let r = rows([("a", 1.0), ("b", 1.0), ("c", 1.0), ("d", 4.0), ("e", 6.0)]);
    let (d, _) = aggregate(&r, &AggregateOptions::new()).unwrap();
    let sum = d.total_value();
    // at most 0.005 rounding per entry
    assert!((sum - 100.0).abs() <= 0.005 * d.len() as f64, "{sum}");
}

#[test]
fn unknown_label_is_an_error() {
    let r = rows([("Borehole", 1.0), ("Dam", 2.0)]);
    let table = water_table();
    let err = aggregate(&r, &AggregateOptions::new().recode(&table)).unwrap_err();
    assert_eq!(
        err,
        StatsError::UnknownCategory {
            label: "Dam".into()
        }
    );
}

#[test]
fn only_restricts_rows_and_total() {
    let r = rows([("0", 5.0), ("1", 5.0), ("2", 10.0), ("30", 80.0)]);
    let (d, total) = aggregate(&r, &AggregateOptions::new().only(&["0", "1", "2"])).unwrap();
    assert_eq!(total, 20.0);
    assert!(!d.contains_key("30"));
    assert_eq!(d.get("2").unwrap().this(), Some(50.0));
}

#[test]
fn exclude_zero_drops_empty_categories() {
    let r = rows([("Flush", 10.0), ("Bucket", 0.0)]);
    let (with_zero, _) = aggregate(&r, &AggregateOptions::new()).unwrap();
    let (without, _) = aggregate(&r, &AggregateOptions::new().exclude_zero()).unwrap();
    assert!(with_zero.contains_key("Bucket"));
    assert!(!without.contains_key("Bucket"));
}

#[test]
fn exclude_drops_named_labels() {
    let r = rows([("Employed", 30.0), ("Not applicable", 50.0), ("Unemployed", 10.0)]);
    let (d, total) = aggregate(&r, &AggregateOptions::new().exclude(&["Not applicable"])).unwrap();
    assert_eq!(total, 40.0);
    assert_eq!(d.get("Employed").unwrap().this(), Some(75.0));
}

#[test]
fn explicit_order_seeds_missing_keys_with_zero() {
    let table = RecodeTable::from_pairs(&[("00 - 04", "0-9"), ("05 - 09", "0-9"), ("85+", "80+")]);
    let r = rows([("85+", 2.0), ("00 - 04", 3.0), ("05 - 09", 5.0)]);
    let opts = AggregateOptions::new()
        .recode(&table)
        .order(CategoryOrder::explicit(&["0-9", "10-19", "80+"]));
    let (d, total) = aggregate(&r, &opts).unwrap();
    assert_eq!(total, 10.0);
    assert_eq!(d.keys().collect::<Vec<_>>(), ["0-9", "10-19", "80+"]);
    assert_eq!(d.get("10-19").unwrap().numerator(), 0.0);
    assert_eq!(d.get("10-19").unwrap().this(), Some(0.0));
    assert_eq!(d.get("0-9").unwrap().this(), Some(80.0));
}

#[test]
fn descending_order_is_stable_on_ties() {
    let r = rows([("x", 1.0), ("tie_a", 5.0), ("y", 9.0), ("tie_b", 5.0)]);
    let opts = AggregateOptions::new().order(CategoryOrder::CountDescending);
    let (d, _) = aggregate(&r, &opts).unwrap();
    assert_eq!(d.keys().collect::<Vec<_>>(), ["y", "tie_a", "tie_b", "x"]);
}

#[test]
fn label_order_sorts_ascending() {
    let r = rows([("Male", 1.0), ("Female", 2.0)]);
    let (d, _) = aggregate(&r, &AggregateOptions::new().order(CategoryOrder::Label)).unwrap();
    assert_eq!(d.keys().collect::<Vec<_>>(), ["Female", "Male"]);
}

#[test]
fn counts_mode_reports_raw_numbers() {
    let r = rows([("a", 3.0), ("b", 4.0)]);
    let (d, total) = aggregate(&r, &AggregateOptions::new().counts()).unwrap();
    assert_eq!(total, 7.0);
    assert_eq!(d.get("b").unwrap().this(), Some(4.0));
}

#[test]
fn zero_total_yields_zero_percentages() {
    let r = rows([("a", 0.0), ("b", 0.0)]);
    let (d, total) = aggregate(&r, &AggregateOptions::new()).unwrap();
    assert_eq!(total, 0.0);
    assert!(d.zero_total);
    for (_, stat) in d.iter() {
        assert_eq!(stat.this(), Some(0.0));
    }
}

#[test]
fn total_override_is_used_as_denominator() {
    let r = rows([("Registered", 20.0)]);
    let (d, total) = aggregate(&r, &AggregateOptions::new().total(80.0)).unwrap();
    assert_eq!(total, 80.0);
    assert_eq!(d.get("Registered").unwrap().this(), Some(25.0));
}

#[test]
fn percent_only_shape_drops_numerators() {
    let r = rows([("a", 1.0)]);
    let (d, _) = aggregate(&r, &AggregateOptions::new().without_numerators()).unwrap();
    let json = serde_json::to_value(&d).unwrap();
    assert!(json["a"].get("numerators").is_none());
}

#[test]
fn universe_lands_under_metadata_key() {
    let r = rows([("a", 1.0)]);
    let (d, _) = aggregate(&r, &AggregateOptions::new().universe("Households")).unwrap();
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["metadata"]["universe"], "Households");
}

#[test]
fn multi_field_rows_use_joined_labels() {
    let r = vec![
        RawRow::multi(["Female", "Black African"], 3.0),
        RawRow::multi(["Male", "Black African"], 1.0),
    ];
    let (d, _) = aggregate(&r, &AggregateOptions::new()).unwrap();
    assert_eq!(d.get("Female / Black African").unwrap().this(), Some(75.0));
}
