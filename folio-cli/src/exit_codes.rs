//! Exit code constants for CLI commands
//!
//! - 0: Success
//! - 1: General failure, including records that cannot be found or decoded
//! - 2: Validation failure

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// General or resolution failure
pub const EXIT_FAILURE: i32 = 1;

/// Invalid user input: missing title, bad date, ordinal exhaustion,
/// existing record or unusable domain
pub const EXIT_VALIDATION: i32 = 2;
