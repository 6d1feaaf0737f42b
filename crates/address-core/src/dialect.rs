//! Per-country address dialects
//!
//! A dialect describes how the postal code line and the street line of a
//! country look. Countries are looked up in a fixed table; supporting a new
//! country means adding one entry to [`DIALECTS`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Postal code grammars, without anchors or groups
const NL_POSTALCODE: &str =
    r"(?:NL-)?[1-9][0-9]{3} ?(?:[A-EGHJ-NPRTVWXZ][A-EGHJ-NPRSTVWXZ]|S[BCEGHJ-NPRTVWXZ])";
const BE_POSTALCODE: &str = r"(?:B-)?[1-9][0-9]{3}";
const DE_POSTALCODE: &str = r"[1-9][0-9]{4}";
const FR_POSTALCODE: &str = r"(?:0[1-9]|[1-8][0-9]|9[0-578])[0-9]{3}";
const ES_POSTALCODE: &str = r"(?:0[1-9]|[1-4][0-9]|5[0-2])[0-9]{3}";
const GB_POSTALCODE: &str =
    r"(?:GIR ?0AA|[A-PR-UWYZ](?:[0-9]{1,2}|[A-HK-Y][0-9]{1,2}|[0-9][A-HJKPSTUW]|[A-HK-Y][0-9][ABEHMNPRV-Y]) ?[0-9][ABD-HJLNP-UW-Z]{2})";

/// Used for return addresses when the default country has no dialect
pub const GENERIC_POSTALCODE: &str = r"[0-9]{4,5}(?: ?[A-Z]{2})?";

const CITY: &str = r"\p{L}[\p{L} \-'.]*";
const CITY_LAZY: &str = r"\p{L}[\p{L} \-'.]*?";

/// Order of house number and street name on the street line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `Pieter Zeemanweg 175 A`
    Normal,
    /// `38 Hyde Park Gate`
    NumberFirst,
}

/// Postal code and street conventions of one country
#[derive(Debug)]
pub struct Dialect {
    pub code: &'static str,
    /// Bare postal code grammar, reused for return address detection
    pub postalcode: &'static str,
    /// Anchored pattern for a whole postal code line
    pub pattern: Regex,
    pub postal_group: usize,
    pub city_group: usize,
    pub layout: Layout,
    postal_like: Regex,
}

/// Postal code and city found on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalMatch {
    pub postalcode: String,
    pub city: String,
}

/// Street name and house number found on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetMatch {
    pub street: String,
    pub house_number: String,
    pub house_number_addition: String,
}

impl Dialect {
    fn code_first(code: &'static str, postalcode: &'static str) -> Self {
        Self::new(
            code,
            postalcode,
            format!(r"(?i)^({postalcode})[,.]?\s*({CITY})"),
            1,
            2,
            Layout::Normal,
        )
    }

    fn new(
        code: &'static str,
        postalcode: &'static str,
        pattern: String,
        postal_group: usize,
        city_group: usize,
        layout: Layout,
    ) -> Self {
        Self {
            code,
            postalcode,
            pattern: Regex::new(&pattern).expect("valid postal code pattern"),
            postal_group,
            city_group,
            layout,
            postal_like: Regex::new(&format!(r"(?i)\b(?:{postalcode})\b"))
                .expect("valid postal code pattern"),
        }
    }

    /// Postal code and city when `line` is a postal code line
    pub fn match_postalcode(&self, line: &str) -> Option<PostalMatch> {
        let caps = self.pattern.captures(line)?;
        Some(PostalMatch {
            postalcode: group(&caps, self.postal_group)?,
            city: group(&caps, self.city_group).unwrap_or_default(),
        })
    }

    /// Whether a postal code appears anywhere in `line`
    pub fn contains_postalcode(&self, line: &str) -> bool {
        self.postal_like.is_match(line)
    }

    /// Street, house number and addition when `line` is a street line
    pub fn match_street(&self, line: &str) -> Option<StreetMatch> {
        self.layout.street_pattern().extract(line)
    }
}

pub static DIALECTS: Lazy<Vec<Dialect>> = Lazy::new(|| {
    vec![
        Dialect::code_first("NL", NL_POSTALCODE),
        Dialect::code_first("BE", BE_POSTALCODE),
        Dialect::code_first("DE", DE_POSTALCODE),
        Dialect::code_first("FR", FR_POSTALCODE),
        Dialect::code_first("ES", ES_POSTALCODE),
        Dialect::new(
            "GB",
            GB_POSTALCODE,
            format!(r"(?i)^({CITY_LAZY})[,.]?\s+({GB_POSTALCODE})\b"),
            2,
            1,
            Layout::NumberFirst,
        ),
    ]
});

/// Dialect registered for a country code
pub fn dialect_for(code: &str) -> Option<&'static Dialect> {
    DIALECTS.iter().find(|d| d.code.eq_ignore_ascii_case(code))
}

/// Country codes with a dialect, in table order
pub fn supported_countries() -> impl Iterator<Item = &'static str> {
    DIALECTS.iter().map(|d| d.code)
}

struct StreetPattern {
    regex: Regex,
    street_group: usize,
    number_group: usize,
    addition_group: usize,
}

impl StreetPattern {
    fn extract(&self, line: &str) -> Option<StreetMatch> {
        let caps = self.regex.captures(line)?;
        Some(StreetMatch {
            street: group(&caps, self.street_group)?,
            house_number: group(&caps, self.number_group)?,
            house_number_addition: group(&caps, self.addition_group).unwrap_or_default(),
        })
    }
}

// The street is the shortest prefix ending in a letter (or punctuation) that
// is followed by the number, so "1e Kruisweg 36" keeps its leading digit.
static NORMAL_STREET: Lazy<StreetPattern> = Lazy::new(|| StreetPattern {
    regex: Regex::new(r"^(.*?[^\d\s])\s+(\d+(?:\.\d+)?)\s*(.*)$").expect("valid street pattern"),
    street_group: 1,
    number_group: 2,
    addition_group: 3,
});

static NUMBER_FIRST_STREET: Lazy<StreetPattern> = Lazy::new(|| StreetPattern {
    regex: Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*([a-z]\b|[a-z]?-\d+[a-z]?)?[,.]?\s+([^\d\s].*?)\s*$")
        .expect("valid street pattern"),
    street_group: 3,
    number_group: 1,
    addition_group: 2,
});

impl Layout {
    fn street_pattern(self) -> &'static StreetPattern {
        match self {
            Layout::Normal => &*NORMAL_STREET,
            Layout::NumberFirst => &*NUMBER_FIRST_STREET,
        }
    }

    /// Street, house number and addition for this layout
    pub fn match_street(self, line: &str) -> Option<StreetMatch> {
        self.street_pattern().extract(line)
    }
}

fn group(caps: &Captures<'_>, index: usize) -> Option<String> {
    caps.get(index).map(|m| m.as_str().trim().to_string())
}
