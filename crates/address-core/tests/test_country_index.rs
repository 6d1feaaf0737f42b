use address_core::config::ExtractorConfig;
use address_core::{AddressError, AddressExtractor, CountryIndexBuilder, CountryNameIndex};

const DATASET: &str = r#"[
    {
        "cca2": "NL",
        "name": {
            "common": "Netherlands",
            "official": "Kingdom of the Netherlands",
            "nativeName": {"nld": {"official": "Koninkrijk der Nederlanden", "common": "Nederland"}}
        },
        "altSpellings": ["NL", "Holland", "Nederland"],
        "translations": {"fra": {"official": "Royaume des Pays-Bas", "common": "Pays-Bas"}}
    },
    {
        "cca2": "GB",
        "name": {"common": "United Kingdom", "official": "United Kingdom of Great Britain and Northern Ireland"},
        "altSpellings": ["GB", "UK", "Great Britain"],
        "translations": {"deu": {"official": "Vereinigtes Königreich", "common": "Vereinigtes Königreich"}}
    }
]"#;

#[test]
fn test_built_index_persists_and_reloads() {
    let index = CountryIndexBuilder::new()
        .add_dataset_json(DATASET)
        .expect("Failed to parse dataset")
        .with_extra_names("GB", ["Verenigd Koninkrijk"])
        .build()
        .expect("Failed to build index");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json");
    index.write_to_file(&path).expect("Failed to write index");

    let reloaded = CountryNameIndex::from_file(&path).expect("Failed to reload index");
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.name_count(), index.name_count());
    assert_eq!(reloaded.lookup("Vereinigtes Königreich"), Some("GB"));
    assert_eq!(reloaded.lookup("verenigd koninkrijk"), Some("GB"));
    assert_eq!(reloaded.lookup("PAYS-BAS"), Some("NL"));
}

#[test]
fn test_extractor_uses_configured_index_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json");
    std::fs::write(&path, r#"{"GB": ["blighty"]}"#).unwrap();

    let config = ExtractorConfig {
        country_index_path: Some(path),
        ..ExtractorConfig::default()
    };
    let extractor = AddressExtractor::from_config(config).unwrap();
    assert_eq!(extractor.index().len(), 1);

    let address = extractor
        .extract("Karel J.G. Van Oosterom\n38 Hyde Park Gate\nLonden SW75DP\nBlighty")
        .unwrap();
    assert_eq!(address.country().code(), "GB");
    assert_eq!(address.street(), "Hyde Park Gate");
    assert_eq!(address.postalcode(), "SW75DP");
}

#[test]
fn test_missing_index_file() {
    let result = CountryNameIndex::from_file("/nonexistent/countries.json");
    assert!(matches!(result, Err(AddressError::Io(_))));
}

#[test]
fn test_malformed_index_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"[\"not a map\"]").unwrap();

    let result = CountryNameIndex::from_file(file.path());
    assert!(matches!(result, Err(AddressError::Json(_))));
}
