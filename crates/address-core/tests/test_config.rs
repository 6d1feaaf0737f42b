use address_core::config::ExtractorConfig;
use address_core::AddressExtractor;
use std::io::Write;

#[test]
fn test_parse_full_config() {
    let json = r#"{
        "default_country": "be",
        "return_marker": "Expéditeur",
        "min_lines": 4,
        "countries_file": "/srv/address/countries.json",
        "ascii_fallback": false,
        "infer_country_from_postalcode": false
    }"#;

    let config = ExtractorConfig::from_json_str(json).expect("Failed to parse config");

    assert_eq!(config.default_country, "BE", "Country code should be uppercased");
    assert_eq!(config.return_marker, "Expéditeur");
    assert_eq!(config.min_lines, 4);
    assert_eq!(
        config.country_index_path.as_deref(),
        Some(std::path::Path::new("/srv/address/countries.json")),
        "countries_file should map to country_index_path"
    );
    assert!(!config.ascii_fallback);
    assert!(!config.infer_country_from_postalcode);
}

#[test]
fn test_parse_minimal_config() {
    let config = ExtractorConfig::from_json_str("{}").expect("Failed to parse minimal config");

    assert_eq!(config, ExtractorConfig::default(), "Empty config should use all defaults");
}

#[test]
fn test_validate_config() {
    let result = ExtractorConfig::from_json_str(r#"{"min_lines": 0}"#);
    assert!(result.is_err(), "Parsing should fail with zero min_lines");

    let result = ExtractorConfig::from_json_str(r#"{"return_marker": "  "}"#);
    assert!(result.is_err(), "Parsing should fail with an empty marker");
    assert!(result.unwrap_err().to_string().contains("required"), "Error should mention required fields");
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"default_country": "DE", "min_lines": 2}}"#).unwrap();

    let config = ExtractorConfig::from_file(file.path()).expect("Failed to load config file");
    assert_eq!(config.default_country, "DE");

    // two lines are enough now, and the German dialect applies by default
    let extractor = AddressExtractor::from_config(config).unwrap();
    let address = extractor.extract("Klosterstraße 50\n10179 Berlin").unwrap();
    assert_eq!(address.postalcode(), "10179");
    assert_eq!(address.city(), "Berlin");
    assert_eq!(address.country().code(), "DE");
}

#[test]
fn test_missing_config_file() {
    let result = ExtractorConfig::from_file("/nonexistent/extractor.json");
    assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
}
