/// Extraction defaults

/// Country assumed when the text names none
pub const DEFAULT_COUNTRY_CODE: &str = "NL";

/// Word marking a sender line on Dutch mail ("return address")
pub const DEFAULT_RETURN_MARKER: &str = "retouradres";

/// Fewer non-empty lines than this cannot be an address
pub const MIN_ADDRESS_LINES: usize = 3;

/// Shortest country name kept in the index
pub const MIN_COUNTRY_NAME_LEN: usize = 2;
