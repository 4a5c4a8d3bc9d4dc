// Validation utilities
use crate::error::{Error, Result};
use tracing::warn;

/// Validate the raw `have` query before it reaches the matcher
pub fn validate_query(have: &str, max_len: usize) -> Result<&str> {
    let have = have.trim();

    if have.is_empty() {
        return Err(Error::Validation("missing 'have' query param".to_string()));
    }

    if have.chars().count() > max_len {
        warn!(
            "Rejected ingredient query of {} characters (limit {})",
            have.chars().count(),
            max_len
        );
        return Err(Error::Validation(format!(
            "'have' query param is too long (max {max_len} characters)"
        )));
    }

    Ok(have)
}
