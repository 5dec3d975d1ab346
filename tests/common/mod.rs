#![allow(dead_code)]

use geoprofile::models::{GeoLevel, GeoRef, Geography, RawRow};
use geoprofile::source::{FieldSet, MemorySource, Record, TableRegistry};

/// `(field set, rows)` published for every fixture geography; counts are
/// multiplied by the geography's scale.
pub fn census_tables() -> Vec<(FieldSet, Vec<RawRow>)> {
    let single = |field: &str, rows: &[(&str, f64)]| {
        (
            FieldSet::single(field),
            rows.iter().map(|(l, c)| RawRow::new(*l, *c)).collect::<Vec<_>>(),
        )
    };
    let from = |field: &str, stem: &str, rows: &[(&str, f64)]| {
        (
            FieldSet::single(field).from_table(stem),
            rows.iter().map(|(l, c)| RawRow::new(*l, *c)).collect::<Vec<_>>(),
        )
    };
    vec![
        single(
            "population group",
            &[("Black African", 60.0), ("Coloured", 30.0), ("White", 10.0)],
        ),
        single(
            "age groups in 5 years",
            &[("00 - 04", 20.0), ("05 - 09", 20.0), ("25 - 29", 30.0), ("85+", 30.0)],
        ),
        single(
            "age in completed years",
            &[("0", 5.0), ("3", 5.0), ("7", 10.0), ("15", 10.0), ("30", 40.0), ("70", 30.0)],
        ),
        from("gender", "genderunder9", &[("Female", 10.0), ("Male", 10.0)]),
        from(
            "age groups in 5 years",
            "womenagegroupsin5years15to44",
            &[("20 - 24", 5.0), ("15 - 19", 5.0)],
        ),
        from(
            "individual monthly income",
            "individualmonthlyincome_employedonly",
            &[("No income", 10.0), ("R 1 - R 400", 30.0), ("Not applicable", 50.0)],
        ),
        single(
            "official employment status",
            &[("Employed", 30.0), ("Unemployed", 10.0), ("Not applicable", 60.0)],
        ),
        single(
            "type of sector",
            &[("In the formal sector", 25.0), ("Not applicable", 75.0)],
        ),
        from(
            "highest educational level",
            "highesteducationallevel_25andover",
            &[
                ("No schooling", 10.0),
                ("Grade 12 / Std 10 / Form 5", 20.0),
                ("Bachelors Degree", 10.0),
            ],
        ),
        single("gender of household head", &[("Male", 60.0), ("Female", 40.0)]),
        from(
            "gender of head of household",
            "genderofheadofhouseholdunder18",
            &[("Female", 1.0)],
        ),
        single(
            "type of dwelling",
            &[
                (
                    "House or brick/concrete block structure on a separate stand or yard or on a farm",
                    70.0,
                ),
                ("Informal dwelling (shack; in backyard)", 20.0),
                (
                    "Traditional dwelling/hut/structure made of traditional materials",
                    10.0,
                ),
            ],
        ),
        single(
            "source of water",
            &[
                (
                    "Regional/local water scheme (operated by municipality or other water services provider)",
                    80.0,
                ),
                ("Borehole", 20.0),
            ],
        ),
        single(
            "refuse disposal",
            &[
                (
                    "Removed by local authority/private company at least once a week",
                    60.0,
                ),
                ("Own refuse dump", 40.0),
            ],
        ),
        (
            FieldSet::new(&[
                "electricity for cooking",
                "electricity for heating",
                "electricity for lighting",
            ]),
            vec![
                RawRow::multi(["Electricity", "Electricity", "Electricity"], 70.0),
                RawRow::multi(["Gas", "No electricity", "Electricity"], 20.0),
                RawRow::multi(["No electricity", "No electricity", "No electricity"], 10.0),
            ],
        ),
        single(
            "toilet facilities",
            &[
                ("Flush toilet (connected to sewerage system)", 60.0),
                ("None", 40.0),
                ("Bucket toilet", 0.0),
            ],
        ),
        from(
            "party",
            "partyvotes_municipal2011",
            &[
                ("ANC", 50.0),
                ("DA", 30.0),
                ("EFF", 10.0),
                ("IFP", 5.0),
                ("COPE", 3.0),
                ("ACDP", 2.0),
            ],
        ),
    ]
}

/// `(dataset, columns)` published for every fixture geography, scaled.
pub fn datasets() -> Vec<(&'static str, Vec<(&'static str, f64)>)> {
    vec![
        (
            "schools_2015",
            vec![("primary_schools", 2.0), ("secondary_schools", 1.0)],
        ),
        ("hospitals_2012", vec![("clinic", 2.0), ("chc", 1.0)]),
        (
            "ecd_centres_2014",
            vec![
                ("total_ecd_centres", 5.0),
                ("reg_full", 2.0),
                ("reg_conditional", 1.0),
                ("total_learners_accomodated", 100.0),
            ],
        ),
        (
            "voter_turnout_municipal2011",
            vec![
                ("registered_voters", 200.0),
                ("total_votes", 120.0),
                ("spoilt_votes", 2.0),
            ],
        ),
        ("youth", vec![("youth_pop", 20.0)]),
    ]
}

pub fn geographies() -> Vec<(Geography, f64)> {
    vec![
        (
            Geography {
                level: GeoLevel::Ward,
                code: "W1".into(),
                name: "Ward 1".into(),
                square_kms: Some(2.0),
                parents: vec![
                    GeoRef::new(GeoLevel::Municipality, "CPT"),
                    GeoRef::new(GeoLevel::Province, "WC"),
                    GeoRef::new(GeoLevel::Country, "ZA"),
                ],
            },
            1.0,
        ),
        (
            Geography {
                level: GeoLevel::Province,
                code: "WC".into(),
                name: "Western Cape".into(),
                square_kms: Some(100.0),
                parents: vec![GeoRef::new(GeoLevel::Country, "ZA")],
            },
            10.0,
        ),
        (
            Geography {
                level: GeoLevel::Country,
                code: "ZA".into(),
                name: "South Africa".into(),
                square_kms: Some(1000.0),
                parents: vec![],
            },
            100.0,
        ),
    ]
}

/// Ward W1 in province WC in country ZA, each with every table and dataset.
/// Ward W2 has data but a country parent ("XX") that has none.
pub fn fixture() -> MemorySource {
    let mut src = MemorySource::new(TableRegistry::default());
    let mut geos = geographies();
    geos.push((
        Geography {
            level: GeoLevel::Ward,
            code: "W2".into(),
            name: "Ward 2".into(),
            square_kms: None,
            parents: vec![
                GeoRef::new(GeoLevel::Province, "WC"),
                GeoRef::new(GeoLevel::Country, "XX"),
            ],
        },
        2.0,
    ));

    for (geo, scale) in geos {
        for (fields, rows) in census_tables() {
            let scaled = rows.into_iter().map(|r| RawRow {
                count: r.count * scale,
                ..r
            });
            src.add_rows(&fields, geo.level, &geo.code, scaled).unwrap();
        }
        for (dataset, columns) in datasets() {
            let record: Record = columns
                .iter()
                .map(|(c, v)| (c.to_string(), v * scale))
                .collect();
            src.add_record(dataset, geo.level, &geo.code, record);
        }
        src.add_geography(geo);
    }
    src
}

/// Write the W1/WC/ZA fixture as a data directory readable by `storage::load_dir`.
pub fn write_data_dir(dir: &std::path::Path) {
    use std::fs;
    use std::io::Write;

    let registry = TableRegistry::default();
    let geos = geographies();

    let mut f = fs::File::create(dir.join("geographies.csv")).unwrap();
    writeln!(f, "level,code,name,square_kms,parents").unwrap();
    for (g, _) in &geos {
        let parents: Vec<String> = g
            .parents
            .iter()
            .map(|p| format!("{}:{}", p.level, p.code))
            .collect();
        let area = g.square_kms.map(|a| a.to_string()).unwrap_or_default();
        let parents = parents.join(";");
        writeln!(f, "{},{},{},{},{}", g.level, g.code, g.name, area, parents).unwrap();
    }

    fs::create_dir_all(dir.join("tables")).unwrap();
    for (fields, rows) in census_tables() {
        for (g, scale) in &geos {
            let name = registry.resolve(&fields, g.level).unwrap();
            let path = dir.join("tables").join(format!("{name}.csv"));
            let mut w = csv::Writer::from_path(path).unwrap();
            let mut header = vec!["geo_level".to_string(), "geo_code".to_string()];
            header.extend(fields.fields.iter().cloned());
            header.push("total".into());
            w.write_record(&header).unwrap();
            for r in &rows {
                let mut rec = vec![g.level.to_string(), g.code.clone()];
                rec.extend(r.categories.iter().cloned());
                rec.push((r.count * scale).to_string());
                w.write_record(&rec).unwrap();
            }
            w.flush().unwrap();
        }
    }

    fs::create_dir_all(dir.join("datasets")).unwrap();
    for (dataset, columns) in datasets() {
        let path = dir.join("datasets").join(format!("{dataset}.csv"));
        let mut w = csv::Writer::from_path(path).unwrap();
        let mut header = vec!["geo_level", "geo_code"];
        header.extend(columns.iter().map(|(c, _)| *c));
        w.write_record(&header).unwrap();
        for (g, scale) in &geos {
            let mut rec = vec![g.level.to_string(), g.code.clone()];
            rec.extend(columns.iter().map(|(_, v)| (v * scale).to_string()));
            w.write_record(&rec).unwrap();
        }
        w.flush().unwrap();
    }
}
