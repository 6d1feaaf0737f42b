//! Service modules for address extraction

pub mod address_extractor;

// Re-export service types
pub use address_extractor::AddressExtractor;
