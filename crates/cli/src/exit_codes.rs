//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 3-9     | source           | Snapshot files and product registration  |
//! | 10-19   | config           | Settings file                            |
//! | 20-29   | report           | Report verdicts (alerts present)         |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use safra_io::SourceError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown month code.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Source (3-9)
// =============================================================================

/// Snapshot file missing or unreadable, or cannot be written.
pub const EXIT_SOURCE_IO: u8 = 3;

/// Snapshot file is not a JSON array of rows.
pub const EXIT_SOURCE_PARSE: u8 = 4;

/// Product already registered for that origin.
pub const EXIT_PRODUCT_DUPLICATE: u8 = 5;

/// Product name or origin empty.
pub const EXIT_PRODUCT_INVALID: u8 = 6;

// =============================================================================
// Config (10-19)
// =============================================================================

/// Settings file unreadable or invalid.
pub const EXIT_CONFIG: u8 = 10;

// =============================================================================
// Report (20-29)
// =============================================================================

/// `alerts --fail-on-alert` found negative analyses.
pub const EXIT_ALERTS_PRESENT: u8 = 20;

/// Map a SourceError to its exit code.
pub fn source_exit_code(err: &SourceError) -> u8 {
    match err {
        SourceError::Io { .. } => EXIT_SOURCE_IO,
        SourceError::Parse { .. } => EXIT_SOURCE_PARSE,
        SourceError::DuplicateProduct { .. } => EXIT_PRODUCT_DUPLICATE,
        SourceError::InvalidProduct(_) => EXIT_PRODUCT_INVALID,
    }
}
