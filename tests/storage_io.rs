mod common;

use geoprofile::models::GeoLevel;
use geoprofile::source::DataSource;
use geoprofile::storage::{load_dir, save_csv, save_json};
use geoprofile::{ProfileBuilder, ProfileConfig, SectionId};
use std::fs;
use tempfile::tempdir;

#[test]
fn data_dir_loads_into_a_source() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());

    let src = load_dir(dir.path()).unwrap();
    let ward = src.get_geography(GeoLevel::Ward, "W1").unwrap();
    assert_eq!(ward.name, "Ward 1");
    assert_eq!(ward.square_kms, Some(2.0));
    assert_eq!(ward.parents.len(), 3);
    let za = src.get_geography(GeoLevel::Country, "ZA").unwrap();
    assert!(za.parents.is_empty());
}

#[test]
fn profile_from_disk_matches_in_memory_profile() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let on_disk = load_dir(dir.path()).unwrap();
    let in_memory = common::fixture();

    let config = ProfileConfig::default().with_sections(vec![
        SectionId::Demographics,
        SectionId::ServiceDelivery,
        SectionId::Elections,
    ]);
    let a = ProfileBuilder::new(&on_disk, config.clone())
        .build(GeoLevel::Ward, "W1")
        .unwrap();
    let b = ProfileBuilder::new(&in_memory, config)
        .build(GeoLevel::Ward, "W1")
        .unwrap();
    assert_eq!(
        serde_json::to_value(&a).unwrap(),
        serde_json::to_value(&b).unwrap()
    );
}

#[test]
fn missing_dataset_dir_is_tolerated() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    fs::remove_dir_all(dir.path().join("datasets")).unwrap();

    let src = load_dir(dir.path()).unwrap();
    let config = ProfileConfig::default().with_sections(vec![SectionId::Hospitals]);
    let profile = ProfileBuilder::new(&src, config)
        .build(GeoLevel::Ward, "W1")
        .unwrap();
    // absent records read as zeros
    let hospitals = profile.section(SectionId::Hospitals).unwrap();
    assert_eq!(hospitals.stat("total_hospitals").unwrap().this(), Some(0.0));
}

#[test]
fn non_numeric_total_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("geographies.csv"),
        "level,code,name,square_kms,parents\nward,W1,Ward 1,,\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("tables")).unwrap();
    fs::write(
        dir.path().join("tables").join("populationgroup_ward.csv"),
        "geo_level,geo_code,population group,total\nward,W1,White,lots\n",
    )
    .unwrap();
    let err = load_dir(dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("total is not a number"), "{err:#}");
}

#[test]
fn profile_saves_as_json_and_csv() {
    let dir = tempdir().unwrap();
    let src = common::fixture();
    let config = ProfileConfig::default().with_sections(vec![SectionId::Youth]);
    let profile = ProfileBuilder::new(&src, config)
        .build(GeoLevel::Ward, "W1")
        .unwrap();

    let json_path = dir.path().join("w1.json");
    save_json(&profile, &json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["geography"]["code"], "W1");
    assert_eq!(json["youth"]["youth_pop"]["values"]["this"], 20.0);

    let csv_path = dir.path().join("w1.csv");
    save_csv(&profile, &csv_path).unwrap();
    let text = fs::read_to_string(&csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("section,key,name,level,value,numerator")
    );
    assert!(text.contains("youth,youth_pop,"), "{text}");
    assert!(text.lines().any(|l| l.starts_with("youth,youth_pop,") && l.contains(",country,2000")));
}
