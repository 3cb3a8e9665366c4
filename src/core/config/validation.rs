//! Validation helper functions for configuration types.

use crate::core::errors::{Result, TabdiffError};

/// Validate that a usize value is greater than zero.
pub fn validate_positive_usize(value: usize, field: &str) -> Result<()> {
    if value == 0 {
        return Err(TabdiffError::validation_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that a string holds something other than whitespace.
pub fn validate_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TabdiffError::validation_field(
            format!("{} cannot be empty", field),
            field,
        ));
    }
    Ok(())
}
