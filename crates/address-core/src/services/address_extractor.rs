//! Address extraction service

use crate::config::ExtractorConfig;
use crate::country::CountryNameIndex;
use crate::dialect::{
    dialect_for, Dialect, Layout, PostalMatch, StreetMatch, DIALECTS, GENERIC_POSTALCODE,
};
use crate::error::{AddressError, Result};
use crate::normalize::{normalize, repair_legacy_encoding};
use address_types::{AddressParts, ParsedAddress};
use regex::Regex;
use std::borrow::Cow;
use std::sync::Arc;

/// Extracts recipient, street, postal code, city and country from free-form
/// address text.
///
/// The extractor is immutable once built and can be shared between threads;
/// every call to [`extract`](Self::extract) works on its own state.
pub struct AddressExtractor {
    index: Arc<CountryNameIndex>,
    config: ExtractorConfig,
    return_address: Regex,
    return_marker: String,
}

impl AddressExtractor {
    pub fn new(index: Arc<CountryNameIndex>, config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        let return_address = return_address_regex(&config.default_country)?;
        let return_marker = normalize(&config.return_marker);

        Ok(Self {
            index,
            config,
            return_address,
            return_marker,
        })
    }

    /// Build an extractor with the index named by the configuration
    pub fn from_config(config: ExtractorConfig) -> Result<Self> {
        let index = config.load_index()?;
        Self::new(index, config)
    }

    /// Build an extractor on top of the bundled country index
    pub fn with_bundled_index(config: ExtractorConfig) -> Result<Self> {
        Self::new(CountryNameIndex::bundled(), config)
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn index(&self) -> &CountryNameIndex {
        &self.index
    }

    /// Extract an address, assuming the configured default country
    pub fn extract(&self, text: &str) -> Result<ParsedAddress> {
        self.extract_with_country(text, &self.config.default_country)
    }

    /// Extract an address, assuming `default_country` when the text names none
    pub fn extract_with_country(&self, text: &str, default_country: &str) -> Result<ParsedAddress> {
        let lines = address_lines(text);
        if lines.len() < self.config.min_lines {
            return Err(AddressError::InsufficientInput {
                found: lines.len(),
                required: self.config.min_lines,
            });
        }

        let default_country = default_country.trim().to_ascii_uppercase();
        let return_address = if default_country == self.config.default_country {
            Cow::Borrowed(&self.return_address)
        } else {
            Cow::Owned(return_address_regex(&default_country)?)
        };

        let state = match self.determine_country(&lines) {
            Some((code, name)) => {
                log::debug!("Country {} detected from line '{}'", code, name);
                ParseState::new(code, Some(name))
            }
            None => {
                log::debug!("No country line found, assuming {}", default_country);
                ParseState::new(default_country, None)
            }
        };

        let classifier = LineClassifier {
            return_address: &*return_address,
            return_marker: &self.return_marker,
            infer_country: self.config.infer_country_from_postalcode,
        };

        let state = lines
            .iter()
            .fold(state, |state, line| classifier.classify(state, line));

        Ok(state.finish())
    }

    /// Find the line naming a country: its code and the line as written.
    ///
    /// Lines are compared whole against the index, first case- and
    /// accent-insensitively, then (if enabled) after ASCII folding with
    /// encoding repair.
    pub fn determine_country(&self, lines: &[&str]) -> Option<(String, String)> {
        let exact = lines.iter().find_map(|line| {
            self.index
                .lookup(line)
                .map(|code| (code.to_string(), line.to_string()))
        });
        if exact.is_some() || !self.config.ascii_fallback {
            return exact;
        }

        lines.iter().find_map(|line| {
            self.index
                .lookup_ascii(line)
                .map(|code| (code.to_string(), repair_legacy_encoding(line).into_owned()))
        })
    }
}

impl Default for AddressExtractor {
    /// Bundled country index with the default configuration
    fn default() -> Self {
        Self::with_bundled_index(ExtractorConfig::default())
            .expect("default configuration is valid")
    }
}

/// Non-empty, trimmed lines of `text`
pub fn address_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// `free text <number>, <postal code> <city>`, e.g. `Postbus 8090, 3300AA Dordrecht`
fn return_address_regex(country: &str) -> Result<Regex> {
    let postalcode = dialect_for(country)
        .map(|d| d.postalcode)
        .unwrap_or(GENERIC_POSTALCODE);
    Ok(Regex::new(&format!(
        r"(?i)^[^,]*?\d+(?:\.\d+)?\s*[a-z\-]*\s*,\s*(?:{postalcode})[,.]?\s*\p{{L}}[^,]*$"
    ))?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    ReturnAddress,
    Street,
    Recipient,
    PostalCode,
    Other,
}

/// Everything gathered so far while walking the address lines
#[derive(Debug, Clone)]
struct ParseState {
    country_code: String,
    country_name: Option<String>,
    recipient: Vec<String>,
    street: Option<StreetMatch>,
    postal: Option<PostalMatch>,
}

impl ParseState {
    fn new(country_code: String, country_name: Option<String>) -> Self {
        Self {
            country_code,
            country_name,
            recipient: Vec::new(),
            street: None,
            postal: None,
        }
    }

    fn street_matched(&self) -> bool {
        self.street.is_some()
    }

    fn dialect(&self) -> Option<&'static Dialect> {
        dialect_for(&self.country_code)
    }

    fn finish(self) -> ParsedAddress {
        let (street, house_number, house_number_addition) = match self.street {
            Some(m) => (Some(m.street), Some(m.house_number), Some(m.house_number_addition)),
            None => (None, None, None),
        };
        let (postalcode, city) = match self.postal {
            Some(m) => (Some(m.postalcode), Some(m.city)),
            None => (None, None),
        };

        ParsedAddress::from(AddressParts {
            recipient: self.recipient,
            street,
            house_number,
            house_number_addition,
            postalcode,
            city,
            country_code: self.country_code,
            country_name: self.country_name,
        })
    }
}

/// Per-line heuristics applied during one extraction
struct LineClassifier<'a> {
    return_address: &'a Regex,
    return_marker: &'a str,
    infer_country: bool,
}

impl LineClassifier<'_> {
    fn classify(&self, mut state: ParseState, line: &str) -> ParseState {
        let kind = if self.is_return_address(line) {
            LineKind::ReturnAddress
        } else if let Some(street) = self.determine_street(&state, line) {
            log::debug!(
                "Street '{}' number '{}' from '{}'",
                street.street,
                street.house_number,
                line
            );
            state.street = Some(street);
            LineKind::Street
        } else {
            let postal = self.determine_postalcode(&mut state, line);
            let recipient = postal.is_none() && self.determine_recipient(&state, line);
            match postal {
                Some(postal) => {
                    log::debug!(
                        "Postal code '{}' city '{}' from '{}'",
                        postal.postalcode,
                        postal.city,
                        line
                    );
                    state.postal = Some(postal);
                    LineKind::PostalCode
                }
                None if recipient => {
                    state.recipient.push(line.to_string());
                    LineKind::Recipient
                }
                None => LineKind::Other,
            }
        };

        log::trace!("{:?}: {}", kind, line);
        state
    }

    fn is_return_address(&self, line: &str) -> bool {
        self.return_address.is_match(line) || normalize(line).contains(self.return_marker)
    }

    /// Only the first street line counts, and only once a recipient is known
    fn determine_street(&self, state: &ParseState, line: &str) -> Option<StreetMatch> {
        if state.street_matched() || state.recipient.is_empty() {
            return None;
        }

        match state.dialect() {
            Some(dialect) => dialect.match_street(line),
            None => Layout::Normal.match_street(line),
        }
    }

    fn determine_recipient(&self, state: &ParseState, line: &str) -> bool {
        !state.street_matched()
            && !state
                .dialect()
                .map(|d| d.contains_postalcode(line))
                .unwrap_or(false)
    }

    /// First postal code line wins. Without a country line the other
    /// dialects get a chance once the street is known; the country changes
    /// only when exactly one of them accepts the line.
    fn determine_postalcode(&self, state: &mut ParseState, line: &str) -> Option<PostalMatch> {
        if state.postal.is_some() {
            return None;
        }

        match state.dialect() {
            Some(dialect) => {
                if let Some(postal) = dialect.match_postalcode(line) {
                    return Some(postal);
                }
            }
            None => log::debug!("No postal code dialect for {}", state.country_code),
        }

        if !self.infer_country || state.country_name.is_some() || !state.street_matched() {
            return None;
        }

        let mut candidates = DIALECTS
            .iter()
            .filter(|d| d.code != state.country_code)
            .filter_map(|d| d.match_postalcode(line).map(|postal| (d.code, postal)));
        let (code, postal) = match (candidates.next(), candidates.next()) {
            (Some(candidate), None) => candidate,
            (Some((first, _)), Some((second, _))) => {
                log::debug!(
                    "Postal code line '{}' fits both {} and {}, keeping {}",
                    line,
                    first,
                    second,
                    state.country_code
                );
                return None;
            }
            _ => return None,
        };
        log::debug!("Country {} inferred from postal code '{}'", code, postal.postalcode);
        state.country_code = code.to_string();
        Some(postal)
    }
}
