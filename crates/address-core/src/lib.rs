//! Address extraction core library
//!
//! Turns free-form address text (envelopes, shipping labels, pasted form
//! fields) into recipient lines, street, house number, postal code, city and
//! country. Country detection uses a [`CountryNameIndex`]; postal code and
//! street recognition follow per-country dialects for NL, BE, DE, FR, ES
//! and GB.
//!
//! ```rust,ignore
//! use address_core::{AddressExtractor, ExtractorConfig};
//!
//! let extractor = AddressExtractor::with_bundled_index(ExtractorConfig::default())?;
//! let address = extractor.extract("M. Hameetman\nPieter Zeemanweg 175\n3316DD Dordrecht")?;
//! assert_eq!(address.postalcode(), "3316DD");
//! ```

pub mod config;
pub mod constants;
pub mod country;
pub mod dialect;
pub mod error;
pub mod normalize;
pub mod services;

// Re-export main types for easy access
pub use config::ExtractorConfig;
pub use country::{CountryIndexBuilder, CountryNameIndex, CountryRecord};
pub use error::{AddressError, Result};
pub use services::AddressExtractor;

pub use address_types::{Country, ParsedAddress};
