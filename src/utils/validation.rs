//! Input validation utilities
//!
//! Guards command arguments before they are written to a control connection.

/// Longest argument accepted on a single command line.
pub const MAX_ARGUMENT_LENGTH: usize = 1024;

/// Validate that a command argument is not empty and cannot break the line
/// framing of the control connection.
pub fn is_valid_argument(input: &str) -> bool {
    !input.trim().is_empty()
        && input.len() <= MAX_ARGUMENT_LENGTH
        && !input.contains(['\0', '\r', '\n'])
}
