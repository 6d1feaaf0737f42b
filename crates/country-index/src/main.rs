//! Builds the persisted country name index from a country dataset
//!
//! The dataset is a JSON array of country records (`cca2`, `name`,
//! `altSpellings`, `translations`). Extra names come from a file in the
//! persisted index format and win over translated names.

use address_core::{CountryIndexBuilder, CountryNameIndex};
use clap::{Arg, Command};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("build-country-index")
        .version("1.0.0")
        .about("Build the country name index used for address extraction")
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .short('d')
                .value_name("FILE")
                .help("Country dataset (JSON array of country records)")
                .required(true),
        )
        .arg(
            Arg::new("extra")
                .long("extra")
                .short('e')
                .value_name("FILE")
                .help("Extra names per country code, in the index format"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Where to write the index")
                .default_value("crates/address-core/data/countries.json"),
        )
        .arg(
            Arg::new("min-name-len")
                .long("min-name-len")
                .value_name("CHARS")
                .help("Shortest name to keep")
                .value_parser(clap::value_parser!(usize))
                .default_value("2"),
        )
        .get_matches();

    let dataset = matches
        .get_one::<String>("dataset")
        .ok_or("--dataset is required")?;
    let output = matches
        .get_one::<String>("output")
        .ok_or("--output is required")?;
    let extra = matches.get_one::<String>("extra");
    let min_name_len = matches.get_one::<usize>("min-name-len").copied().unwrap_or(2);

    let index = build_index(Path::new(dataset), extra.map(Path::new), min_name_len)?;
    index.write_to_file(output)?;

    log::info!(
        "{} countries with {} names written to {}",
        index.len(),
        index.name_count(),
        output
    );
    Ok(())
}

fn build_index(
    dataset: &Path,
    extra: Option<&Path>,
    min_name_len: usize,
) -> address_core::Result<CountryNameIndex> {
    log::info!("Reading country dataset from {}", dataset.display());
    let mut builder = CountryIndexBuilder::new()
        .min_name_len(min_name_len)
        .add_dataset_json(&std::fs::read_to_string(dataset)?)?;

    if let Some(extra) = extra {
        log::info!("Reading extra country names from {}", extra.display());
        builder = builder.add_extra_names_json(&std::fs::read_to_string(extra)?)?;
    }

    builder.build()
}
