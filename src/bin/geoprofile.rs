use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use geoprofile::format::{format_value, map_locale};
use geoprofile::profile::REGISTRY;
use geoprofile::{GeoLevel, Profile, ProfileBuilder, ProfileConfig, SectionId, TableRegistry};
use geoprofile::storage;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "geoprofile",
    version,
    about = "Build census statistics profiles for wards, municipalities, provinces & countries"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a profile for one geography (and optionally save and print it).
    Profile(ProfileArgs),
    /// Print the table name for a set of census fields at a level.
    TableName(TableNameArgs),
    /// List the available profile sections.
    Sections,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Data directory (geographies.csv, tables/, datasets/).
    #[arg(long)]
    data: PathBuf,
    /// Geography level (ward, municipality, district, province, country).
    #[arg(short, long)]
    level: GeoLevel,
    /// Geography code, e.g. CPT or 19100001.
    #[arg(short, long)]
    code: String,
    /// JSON profile configuration; defaults are used for missing keys.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Sections separated by comma (e.g., demographics,youth). Overrides the config;
    /// without either, elections and youth are left out.
    #[arg(long)]
    sections: Option<String>,
    /// Save the profile to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Skip `<level>_index` values.
    #[arg(long, default_value_t = false)]
    no_index: bool,
    /// Print a readable summary to stdout.
    #[arg(long, default_value_t = false)]
    print: bool,
    /// Locale for printed numbers (en, de, fr, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct TableNameArgs {
    /// Census fields separated by comma (e.g., "gender,population group").
    #[arg(short, long)]
    fields: String,
    #[arg(short, long)]
    level: GeoLevel,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Profile(args) => cmd_profile(args),
        Command::TableName(args) => cmd_table_name(args),
        Command::Sections => {
            for spec in REGISTRY {
                println!("{}", spec.id);
            }
            Ok(())
        }
    }
}

fn cmd_profile(args: ProfileArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ProfileConfig::from_json_file(path)?,
        None => ProfileConfig::default(),
    };
    if let Some(list) = &args.sections {
        let sections = parse_list(list)
            .iter()
            .map(|s| s.parse::<SectionId>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?;
        config = config.with_sections(sections);
    }
    if args.no_index {
        config.parent_indices = false;
    }

    let source = storage::load_dir(&args.data)?;
    let profile = ProfileBuilder::new(&source, config)
        .build(args.level, &args.code)
        .with_context(|| format!("building profile for {}-{}", args.level, args.code))?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("json"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&profile, path)?,
            "json" => storage::save_json(&profile, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved profile to {}", path.display());
    }

    if args.print {
        print_profile(&profile, &args.locale);
    } else if args.out.is_none() {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    }

    Ok(())
}

fn print_profile(profile: &Profile, locale_tag: &str) {
    let (locale, sep) = map_locale(locale_tag);
    let geo = &profile.geography;
    println!("{} ({} {})", geo.name, geo.level, geo.code);
    for (id, section) in profile.sections() {
        println!("\n[{}]", id);
        for (path, stat) in section.walk() {
            let mut line = format!(
                "  {} • {}  this={}",
                path.join("."),
                stat.name,
                format_value(stat.values.this, locale, sep)
            );
            for level in stat.values.levels() {
                line.push_str(&format!(
                    " {}={}",
                    level,
                    format_value(stat.values.get(level), locale, sep)
                ));
            }
            println!("{line}");
        }
    }
}

fn cmd_table_name(args: TableNameArgs) -> Result<()> {
    let fields = parse_list(&args.fields);
    let name = TableRegistry::default().table_name(&fields, args.level)?;
    println!("{name}");
    Ok(())
}
