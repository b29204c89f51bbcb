/// Provider identifiers accepted on the command line
pub const VODAFONE: &str = "vodafone";
pub const TMOBILE: &str = "tmobile";
pub const SPRINT: &str = "sprint";

/// Source delimiters
pub const COMMA: u8 = b',';
pub const TAB: u8 = b'\t';

/// Delimiter of the normalized output file
pub const OUTPUT_DELIMITER: u8 = b'|';

/// Canonical database date format
pub const TARGET_DATE_FORMAT: &str = "%Y%m%d";

// Source date formats
pub const VODAFONE_DATE_FORMAT: &str = "%d-%b-%Y";
pub const TMOBILE_DATE_FORMAT: &str = "%m/%d/%Y";
pub const SPRINT_DATE_FORMAT: &str = "%b_%d_%Y";

pub const DEFAULT_LOG_FILE: &str = "convert.log";
