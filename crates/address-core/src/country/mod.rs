//! Country name lookup used to detect the country of an address

pub mod builder;
pub mod index;

pub use builder::{CountryIndexBuilder, CountryRecord};
pub use index::CountryNameIndex;
