//! Offline construction of the country name index from a country dataset
//!
//! Accepts records in the layout used by the common open country datasets
//! (`cca2`, `name.common`, `name.official`, `name.nativeName`,
//! `altSpellings`, `translations`).

use super::index::{is_usable_name, CountryNameIndex};
use crate::constants::MIN_COUNTRY_NAME_LEN;
use crate::error::Result;
use crate::normalize::{folds_to_ascii, normalize_ascii};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// A common/official name pair
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamePair {
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub official: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryNames {
    pub common: String,
    #[serde(default)]
    pub official: Option<String>,
    #[serde(rename = "nativeName", default)]
    pub native: BTreeMap<String, NamePair>,
}

/// One country of the source dataset
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRecord {
    pub cca2: String,
    pub name: CountryNames,
    #[serde(rename = "altSpellings", default)]
    pub alt_spellings: Vec<String>,
    #[serde(default)]
    pub translations: BTreeMap<String, NamePair>,
}

impl CountryRecord {
    /// Every name this record offers, unnormalized
    pub fn candidate_names(&self) -> Vec<&str> {
        self.primary_names().chain(self.translated_names()).collect()
    }

    /// Names in English or one of the country's own languages
    fn primary_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.common.as_str())
            .chain(self.name.official.as_deref())
            .chain(self.alt_spellings.iter().map(String::as_str))
            .chain(self.name.native.values().flat_map(NamePair::names))
    }

    fn translated_names(&self) -> impl Iterator<Item = &str> {
        self.translations.values().flat_map(NamePair::names)
    }
}

impl NamePair {
    fn names(&self) -> impl Iterator<Item = &str> {
        self.common.as_deref().into_iter().chain(self.official.as_deref())
    }
}

/// Where a country got a name from, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum NameSource {
    Translation,
    Primary,
}

/// How strongly a country claims a name: source first, then how many
/// entries of the dataset named it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Claim {
    source: NameSource,
    votes: usize,
}

/// Collects country records and produces a [`CountryNameIndex`].
///
/// Translation catalogs contain mistakes, so a name claimed by several
/// countries goes to the strongest claim; names with equally strong claims
/// are left out.
#[derive(Debug, Clone)]
pub struct CountryIndexBuilder {
    min_name_len: usize,
    names: BTreeMap<String, BTreeMap<String, Claim>>,
}

impl Default for CountryIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryIndexBuilder {
    pub fn new() -> Self {
        Self {
            min_name_len: MIN_COUNTRY_NAME_LEN,
            names: BTreeMap::new(),
        }
    }

    /// Names shorter than this are dropped; never below the index minimum
    pub fn min_name_len(mut self, len: usize) -> Self {
        self.min_name_len = len.max(MIN_COUNTRY_NAME_LEN);
        self
    }

    /// Parse a whole dataset (a JSON array of records)
    pub fn add_dataset_json(self, json: &str) -> Result<Self> {
        let records: Vec<CountryRecord> = serde_json::from_str(json)?;
        Ok(records.iter().fold(self, |builder, record| builder.add_record(record)))
    }

    pub fn add_record(self, record: &CountryRecord) -> Self {
        self.claim(&record.cca2, record.primary_names(), NameSource::Primary)
            .claim(&record.cca2, record.translated_names(), NameSource::Translation)
    }

    /// Names the dataset lacks, such as exonyms in the operator's language
    pub fn with_extra_names<I, S>(self, code: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.claim(code, names, NameSource::Primary)
    }

    /// Add every entry of a persisted index (`{"NL": [...], ...}`) as extra names
    pub fn add_extra_names_json(self, json: &str) -> Result<Self> {
        let extra: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(extra
            .iter()
            .fold(self, |builder, (code, names)| builder.with_extra_names(code, names)))
    }

    fn claim<I, S>(mut self, code: &str, names: I, source: NameSource) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let min_len = self.min_name_len;
        let entry = self.names.entry(code.trim().to_ascii_uppercase()).or_default();
        for name in names {
            // Names in scripts without an ASCII folding would only leave
            // punctuation behind
            if !folds_to_ascii(name.as_ref()) {
                continue;
            }
            let name = normalize_ascii(name.as_ref());
            if !is_usable_name(&name, min_len) {
                continue;
            }

            let claim = entry.entry(name).or_insert(Claim { source, votes: 0 });
            claim.source = claim.source.max(source);
            claim.votes += 1;
        }
        self
    }

    pub fn build(self) -> Result<CountryNameIndex> {
        log::info!("Building country index from {} countries", self.names.len());

        let mut claims: HashMap<&str, Vec<(&str, Claim)>> = HashMap::new();
        for (code, names) in &self.names {
            for (name, claim) in names {
                claims.entry(name.as_str()).or_default().push((code.as_str(), *claim));
            }
        }

        let mut resolved: BTreeMap<String, Vec<String>> =
            self.names.keys().map(|code| (code.clone(), Vec::new())).collect();
        for (name, claimants) in claims {
            let Some(strongest) = claimants.iter().map(|(_, claim)| *claim).max() else {
                continue;
            };
            let mut winners = claimants.iter().filter(|(_, claim)| *claim == strongest);
            match (winners.next(), winners.next()) {
                (Some((code, _)), None) => {
                    if let Some(names) = resolved.get_mut(*code) {
                        names.push(name.to_string());
                    }
                }
                _ => log::debug!("Country name '{}' is ambiguous, skipping", name),
            }
        }

        CountryNameIndex::from_names(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {
            "cca2": "BE",
            "name": {
                "common": "Belgium",
                "official": "Kingdom of Belgium",
                "nativeName": {
                    "nld": {"official": "Koninkrijk België", "common": "België"},
                    "fra": {"official": "Royaume de Belgique", "common": "Belgique"}
                }
            },
            "altSpellings": ["BE", "België", "Belgie"],
            "translations": {
                "deu": {"official": "Königreich Belgien", "common": "Belgien"},
                "spa": {"official": "Reino de Bélgica", "common": "Bélgica"}
            }
        },
        {
            "cca2": "DE",
            "name": {"common": "Germany", "official": "Federal Republic of Germany"},
            "altSpellings": ["DE", "Bundesrepublik Deutschland"],
            "translations": {}
        }
    ]"#;

    #[test]
    fn test_builds_normalized_deduplicated_names() {
        let index = CountryIndexBuilder::new()
            .add_dataset_json(DATASET)
            .unwrap()
            .build()
            .unwrap();

        let be: Vec<&str> = index.names("BE").collect();
        assert!(be.contains(&"belgie"));
        assert!(be.contains(&"belgica"));
        assert!(be.contains(&"konigreich belgien"));
        assert_eq!(be.iter().filter(|n| **n == "belgie").count(), 1);
        assert_eq!(index.lookup("Bélgica"), Some("BE"));
    }

    #[test]
    fn test_conflicting_names_go_to_the_strongest_claim() {
        let dataset = r#"[
            {"cca2": "WS", "name": {"common": "Samoa"}},
            {
                "cca2": "AS",
                "name": {"common": "American Samoa"},
                "translations": {"fin": {"common": "Samoa"}}
            },
            {
                "cca2": "DO",
                "name": {"common": "Dominican Republic"},
                "translations": {
                    "spa": {"common": "República Dominicana"},
                    "por": {"common": "República Dominicana"}
                }
            },
            {
                "cca2": "AF",
                "name": {"common": "Afghanistan"},
                "translations": {"xyz": {"common": "República Dominicana"}}
            },
            {"cca2": "LT", "name": {"common": "Lithuania"}, "translations": {"xyz": {"common": "Litwiya"}}},
            {"cca2": "LV", "name": {"common": "Latvia"}, "translations": {"xyz": {"common": "Litwiya"}}}
        ]"#;
        let index = CountryIndexBuilder::new()
            .add_dataset_json(dataset)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(index.lookup("Samoa"), Some("WS"));
        assert_eq!(index.lookup("República Dominicana"), Some("DO"));
        assert_eq!(index.lookup("Litwiya"), None);
        assert_eq!(index.lookup("Lithuania"), Some("LT"));
    }

    #[test]
    fn test_names_without_ascii_form_are_skipped() {
        let index = CountryIndexBuilder::new()
            .with_extra_names("CI", ["Кот-д'Ивуар", "Côte d’Ivoire"])
            .build()
            .unwrap();
        let names: Vec<&str> = index.names("CI").collect();
        assert_eq!(names, vec!["cote d'ivoire"]);
    }

    #[test]
    fn test_extra_names_file_format() {
        let index = CountryIndexBuilder::new()
            .add_extra_names_json(r#"{"nz": ["Nieuw-Zeeland", "Aotearoa"]}"#)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(index.lookup("nieuw-zeeland"), Some("NZ"));
        assert_eq!(index.lookup("AOTEAROA"), Some("NZ"));
    }

    #[test]
    fn test_extra_names_and_min_length() {
        let index = CountryIndexBuilder::new()
            .min_name_len(3)
            .add_dataset_json(DATASET)
            .unwrap()
            .with_extra_names("de", ["Duitsland", "12345"])
            .build()
            .unwrap();

        assert_eq!(index.lookup("Duitsland"), Some("DE"));
        assert_eq!(index.lookup("DE"), None);
        assert_eq!(index.lookup("12345"), None);
    }
}
