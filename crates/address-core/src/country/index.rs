//! Country name index: country code to the names that identify it

use crate::constants::MIN_COUNTRY_NAME_LEN;
use crate::error::{AddressError, Result};
use crate::normalize::{normalize, normalize_ascii};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

const BUNDLED_COUNTRIES: &str = include_str!("../../data/countries.json");

static BUNDLED_INDEX: Lazy<Arc<CountryNameIndex>> = Lazy::new(|| {
    let index =
        CountryNameIndex::from_json_str(BUNDLED_COUNTRIES).expect("valid bundled country index");
    Arc::new(index)
});

/// Read-only lookup from country code to normalized country names.
///
/// Every name belongs to exactly one country. When two countries claim the
/// same name, the one with the lower country code keeps it.
#[derive(Debug, Clone, Default)]
pub struct CountryNameIndex {
    names: BTreeMap<String, BTreeSet<String>>,
    lookup: HashMap<String, String>,
    ascii_lookup: HashMap<String, String>,
}

impl CountryNameIndex {
    /// Build an index from raw name lists, normalizing every entry
    pub fn from_names<I, N>(countries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, N)>,
        N: IntoIterator<Item = String>,
    {
        let mut sorted: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (code, names) in countries {
            let code = code.trim().to_ascii_uppercase();
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(AddressError::Index(format!("Invalid country code '{}'", code)));
            }
            sorted.entry(code).or_default().extend(names);
        }

        let mut index = Self::default();
        for (code, names) in sorted {
            let entry = index.names.entry(code.clone()).or_default();
            for name in names {
                let name = normalize(&name);
                if !is_usable_name(&name, MIN_COUNTRY_NAME_LEN) {
                    continue;
                }

                let ascii = normalize_ascii(&name);
                if let Some(owner) = index.lookup.get(&name) {
                    if owner != &code {
                        log::debug!(
                            "Country name '{}' already belongs to {}, skipping for {}",
                            name,
                            owner,
                            code
                        );
                    }
                    continue;
                }

                index.lookup.insert(name.clone(), code.clone());
                index.ascii_lookup.entry(ascii).or_insert_with(|| code.clone());
                entry.insert(name);
            }
        }

        Ok(index)
    }

    /// Load an index persisted as `{"NL": ["nederland", ...], ...}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_names(raw)
    }

    /// Load an index from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let index = Self::from_json_str(&content)?;
        log::info!(
            "Loaded {} countries ({} names) from {}",
            index.len(),
            index.name_count(),
            path.display()
        );
        Ok(index)
    }

    /// The index shipped with the library, loaded once per process
    pub fn bundled() -> Arc<Self> {
        Arc::clone(&BUNDLED_INDEX)
    }

    /// Country code for a whole line, compared case- and accent-insensitively
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.lookup.get(&normalize(text)).map(String::as_str)
    }

    /// Country code for a line after ASCII folding and encoding repair
    pub fn lookup_ascii(&self, text: &str) -> Option<&str> {
        self.ascii_lookup.get(&normalize_ascii(text)).map(String::as_str)
    }

    /// Names registered for a country
    pub fn names(&self, code: &str) -> impl Iterator<Item = &str> {
        self.names
            .get(&code.to_ascii_uppercase())
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    pub fn contains_country(&self, code: &str) -> bool {
        self.names.contains_key(&code.to_ascii_uppercase())
    }

    /// Country codes in ascending order
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Number of countries
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Total number of names across all countries
    pub fn name_count(&self) -> usize {
        self.names.values().map(BTreeSet::len).sum()
    }

    /// Serialize back to the persisted format
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.names)?)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

/// Names must reach the minimum length and contain at least one letter
pub(crate) fn is_usable_name(name: &str, min_len: usize) -> bool {
    name.chars().count() >= min_len && name.chars().any(char::is_alphabetic)
}
