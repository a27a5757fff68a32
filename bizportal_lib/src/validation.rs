//! Minimal input guards applied before a request is sent.
//!
//! Real form validation belongs to the backend; these only catch input that
//! would make a request meaningless.

use bizportal_api::types::RecordId;

use crate::error::PortalError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_STATUS_LENGTH: usize = 40;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, PortalError> {
    if input.len() > max_len {
        return Err(PortalError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(PortalError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, PortalError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a status value such as `approved` or `in-progress`.
pub fn validate_status(input: &str) -> Result<String, PortalError> {
    sanitize_text(input, MAX_STATUS_LENGTH)
}

/// Validate a record id: non-blank after trimming.
pub fn validate_id(input: &str) -> Result<RecordId, PortalError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PortalError::InvalidInput("id must not be empty".to_string()));
    }
    Ok(RecordId::from(trimmed))
}

/// Validate a money amount: must parse as a finite number of at least 1.
pub fn validate_amount(input: &str) -> Result<f64, PortalError> {
    let amount = input.trim().parse::<f64>().map_err(|_| {
        PortalError::InvalidInput(format!("amount '{}' is not a number", input.trim()))
    })?;
    check_amount(amount)
}

/// Numeric form of [`validate_amount`].
pub fn check_amount(amount: f64) -> Result<f64, PortalError> {
    if !amount.is_finite() || amount < 1.0 {
        return Err(PortalError::InvalidInput(
            "amount must be at least 1".to_string(),
        ));
    }
    Ok(amount)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: u64) -> Result<u64, PortalError> {
    if page < 1 {
        return Err(PortalError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: u64) -> Result<u64, PortalError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(PortalError::InvalidInput(format!(
            "page size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Amount guard --

    #[test]
    fn amount_valid() {
        assert_eq!(validate_amount("250").unwrap(), 250.0);
        assert_eq!(validate_amount(" 1.5 ").unwrap(), 1.5);
        assert_eq!(validate_amount("1").unwrap(), 1.0);
    }

    #[test]
    fn amount_non_numeric() {
        assert!(validate_amount("ten").is_err());
        assert!(validate_amount("").is_err());
    }

    #[test]
    fn amount_below_one() {
        assert!(validate_amount("0.99").is_err());
        assert!(validate_amount("-5").is_err());
        assert!(check_amount(f64::NAN).is_err());
        assert!(check_amount(f64::INFINITY).is_err());
    }

    // -- Text --

    #[test]
    fn search_strips_control_chars() {
        assert_eq!(validate_search("ac\u{7}me\n").unwrap(), "acme");
    }

    #[test]
    fn search_too_long() {
        assert!(validate_search(&"x".repeat(MAX_SEARCH_LENGTH + 1)).is_err());
    }

    #[test]
    fn status_blank() {
        assert!(validate_status("   ").is_err());
        assert_eq!(validate_status(" approved ").unwrap(), "approved");
    }

    // -- Ids and paging --

    #[test]
    fn id_numeric_and_text() {
        assert_eq!(validate_id("12").unwrap(), RecordId::Int(12));
        assert_eq!(
            validate_id(" a1b2 ").unwrap(),
            RecordId::Text("a1b2".to_string())
        );
        assert!(validate_id("  ").is_err());
    }

    #[test]
    fn page_bounds() {
        assert!(validate_page(0).is_err());
        assert_eq!(validate_page(3).unwrap(), 3);
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(101).is_err());
        assert_eq!(validate_page_size(100).unwrap(), 100);
    }
}
