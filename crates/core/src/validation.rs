//! Validation layer.
//!
//! Pure checks run before any store access on a mutating path. Every failure
//! is an `InvalidPayload` naming the offending field, except the age rule
//! which has its own error tag.

use crate::error::{LedgerError, LedgerResult};

/// Bounds applied to every free-text field that can end up on a display.
pub const MIN_TEXT_LEN: usize = 1;
pub const MAX_TEXT_LEN: usize = 100;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 20;

/// Alcohol content is a percentage.
pub const MAX_ALCOHOL_CONTENT: u64 = 100;

/// Trim and bounds-check a required text field. Returns the trimmed value.
pub fn required_text(field: &str, value: &str) -> LedgerResult<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();

    if len < MIN_TEXT_LEN {
        return Err(LedgerError::invalid(format!("{field} is required")));
    }
    if len > MAX_TEXT_LEN {
        return Err(LedgerError::invalid(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }

    Ok(trimmed.to_string())
}

/// Like [`required_text`], but `None` passes through untouched.
pub fn optional_text(field: &str, value: Option<&str>) -> LedgerResult<Option<String>> {
    value.map(|v| required_text(field, v)).transpose()
}

/// Usernames: 3-20 characters of letters, digits, `_` or `-`.
pub fn username(value: &str) -> LedgerResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::invalid("username is required"));
    }

    let len = trimmed.chars().count();
    let charset_ok = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) || !charset_ok {
        return Err(LedgerError::invalid(format!(
            "username must be {MIN_USERNAME_LEN}-{MAX_USERNAME_LEN} characters long and contain only letters, numbers, underscores, and hyphens"
        )));
    }

    Ok(trimmed.to_string())
}

/// Reject negative numbers; converts to the unsigned storage type.
pub fn non_negative(field: &str, value: i64) -> LedgerResult<u64> {
    u64::try_from(value)
        .map_err(|_| LedgerError::invalid(format!("{field} cannot be negative (got {value})")))
}

/// Reject zero and negative numbers.
pub fn positive(field: &str, value: i64) -> LedgerResult<u64> {
    if value <= 0 {
        return Err(LedgerError::invalid(format!(
            "{field} must be greater than zero (got {value})"
        )));
    }
    non_negative(field, value)
}

pub fn alcohol_content(value: i64) -> LedgerResult<u64> {
    let content = non_negative("alcohol_content", value)?;
    if content > MAX_ALCOHOL_CONTENT {
        return Err(LedgerError::invalid(format!(
            "alcohol_content must be at most {MAX_ALCOHOL_CONTENT} (got {content})"
        )));
    }
    Ok(content)
}

/// Age rule for sales.
pub fn legal_age(customer_age: u32, threshold: u32) -> LedgerResult<()> {
    if customer_age < threshold {
        return Err(LedgerError::age_restriction(format!(
            "customer must be at least {threshold} years old to purchase alcohol (got {customer_age})"
        )));
    }
    Ok(())
}

/// `quantity * unit_price`, rejecting overflow.
pub fn checked_total(quantity: u64, unit_price: u64) -> LedgerResult<u64> {
    quantity.checked_mul(unit_price).ok_or_else(|| {
        LedgerError::invalid(format!(
            "total price overflows ({quantity} x {unit_price})"
        ))
    })
}

/// `stock + delta`, rejecting results below zero.
pub fn apply_delta(stock: u64, delta: i64) -> LedgerResult<u64> {
    let next = i128::from(stock) + i128::from(delta);
    if next < 0 {
        return Err(LedgerError::invalid(format!(
            "adjustment of {delta} would result in negative stock (current stock {stock})"
        )));
    }
    u64::try_from(next)
        .map_err(|_| LedgerError::invalid(format!("adjustment of {delta} overflows stock")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_bounds() {
        assert_eq!(required_text("name", "  Glenfiddich 12 ").unwrap(), "Glenfiddich 12");

        let err = required_text("name", "   ").unwrap_err();
        assert_eq!(err, LedgerError::invalid("name is required"));

        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let err = required_text("reason", &long).unwrap_err();
        assert!(err.detail().starts_with("reason must be at most"));

        let exact = "x".repeat(MAX_TEXT_LEN);
        assert!(required_text("reason", &exact).is_ok());
    }

    #[test]
    fn optional_text_passes_none_through() {
        assert_eq!(optional_text("vintage_year", None).unwrap(), None);
        assert_eq!(
            optional_text("vintage_year", Some(" 1998 ")).unwrap(),
            Some("1998".to_string())
        );
        assert!(optional_text("vintage_year", Some("")).is_err());
    }

    #[test]
    fn username_rules() {
        assert_eq!(username("cellar_admin").unwrap(), "cellar_admin");
        assert!(username("ab").is_err());
        assert!(username(&"a".repeat(21)).is_err());
        assert!(username("has space").is_err());
        assert!(username("").is_err());
    }

    #[test]
    fn numeric_checks_cite_the_field() {
        assert_eq!(non_negative("cost_price", 0).unwrap(), 0);
        let err = non_negative("cost_price", -1).unwrap_err();
        assert_eq!(err.kind(), "InvalidPayload");
        assert!(err.detail().contains("cost_price"));

        assert!(positive("quantity", 0).is_err());
        assert_eq!(positive("quantity", 3).unwrap(), 3);

        assert_eq!(alcohol_content(40).unwrap(), 40);
        assert!(alcohol_content(101).is_err());
        assert!(alcohol_content(-5).is_err());
    }

    #[test]
    fn age_rule_uses_threshold() {
        assert!(legal_age(18, 18).is_ok());
        let err = legal_age(17, 18).unwrap_err();
        assert_eq!(err.kind(), "AgeRestriction");
        assert!(legal_age(20, 21).is_err());
    }

    #[test]
    fn stock_arithmetic() {
        assert_eq!(apply_delta(3, 4).unwrap(), 7);
        assert_eq!(apply_delta(3, -3).unwrap(), 0);
        let err = apply_delta(3, -5).unwrap_err();
        assert!(err.detail().contains("negative stock"));

        assert_eq!(checked_total(3, 50).unwrap(), 150);
        assert!(checked_total(u64::MAX, 2).is_err());
    }
}
