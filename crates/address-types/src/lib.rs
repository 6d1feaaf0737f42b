//! Shared types for the address extraction engine

use serde::{Deserialize, Serialize};

/// Country of a parsed address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    code: String,
    name: Option<String>,
}

impl Country {
    pub fn new(code: impl Into<String>, name: Option<String>) -> Self {
        Self {
            code: code.into().trim().to_ascii_uppercase(),
            name: name
                .map(|n| title_case(n.trim()))
                .filter(|n| !n.is_empty()),
        }
    }

    /// ISO 3166-1 alpha-2 code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The country line as it appeared in the text, title-cased
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Raw values captured while scanning the address lines.
///
/// Nothing here is cleaned up yet; converting into [`ParsedAddress`] applies
/// trimming, whitespace removal and house number coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub recipient: Vec<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub house_number_addition: Option<String>,
    pub postalcode: Option<String>,
    pub city: Option<String>,
    pub country_code: String,
    pub country_name: Option<String>,
}

/// Structured result of one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    recipient: Vec<String>,
    street: String,
    house_number: u32,
    house_number_addition: String,
    postalcode: String,
    city: String,
    country: Country,
}

impl ParsedAddress {
    pub fn recipient(&self) -> &[String] {
        &self.recipient
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    /// House number with separators removed, `0` when absent
    pub fn house_number(&self) -> u32 {
        self.house_number
    }

    pub fn house_number_addition(&self) -> &str {
        &self.house_number_addition
    }

    /// Postal code without any whitespace
    pub fn postalcode(&self) -> &str {
        &self.postalcode
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country(&self) -> &Country {
        &self.country
    }

    /// True when nothing beyond the country code was extracted
    pub fn is_empty(&self) -> bool {
        self.recipient.is_empty()
            && self.street.is_empty()
            && self.house_number == 0
            && self.postalcode.is_empty()
            && self.city.is_empty()
    }
}

impl From<AddressParts> for ParsedAddress {
    fn from(parts: AddressParts) -> Self {
        Self {
            recipient: parts
                .recipient
                .into_iter()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
            street: trimmed(parts.street),
            house_number: parts
                .house_number
                .as_deref()
                .map(parse_house_number)
                .unwrap_or(0),
            house_number_addition: trimmed(parts.house_number_addition),
            postalcode: parts
                .postalcode
                .map(|code| code.chars().filter(|c| !c.is_whitespace()).collect())
                .unwrap_or_default(),
            city: trimmed(parts.city),
            country: Country::new(parts.country_code, parts.country_name),
        }
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Drop every non-digit and parse what is left; `"17.500"` becomes `17500`.
/// Empty or out of range input yields `0`.
pub fn parse_house_number(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Title-case every word. Short all-caps tokens such as `NL` or `UK` are
/// kept as written.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let letters = word.chars().filter(|c| c.is_alphabetic()).count();
            if letters > 0 && letters <= 3 && word.chars().all(|c| !c.is_lowercase()) {
                return word.to_string();
            }

            let mut out = String::with_capacity(word.len());
            let mut at_start = true;
            for c in word.chars() {
                if at_start {
                    out.extend(c.to_uppercase());
                } else {
                    out.extend(c.to_lowercase());
                }
                at_start = !c.is_alphanumeric() && c != '\'';
            }
            out
        })
        .collect::<Vec<_>>()
        .join(" ")
}
