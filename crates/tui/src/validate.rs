//! Form-level validation. These checks run before any request is built;
//! whatever passes here is still re-validated by the backend.

use api_types::transaction::TransactionKind;
use store::Amount;

const REQUIRED: &str = "This field is required";

/// Mirrors the sign-up email check: `local@domain.tld`, no whitespace.
#[must_use]
pub fn email_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some(REQUIRED);
    }
    if value.contains(char::is_whitespace) {
        return Some("Please enter a valid email address");
    }
    let mut parts = value.split('@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if parts.next().is_some() || local.is_empty() || domain.is_empty() {
        return Some("Please enter a valid email address");
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => None,
        _ => Some("Please enter a valid email address"),
    }
}

#[must_use]
pub fn username_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some(REQUIRED);
    }
    if value.len() < 3 {
        return Some("Username must be at least 3 characters");
    }
    if value.len() > 20 {
        return Some("Username must be less than 20 characters");
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("Username can only contain letters, numbers, and underscores");
    }
    None
}

#[must_use]
pub fn password_error(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some(REQUIRED);
    }
    if value.len() < 8 {
        return Some("Password must be at least 8 characters");
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("Password must contain at least one uppercase letter");
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain at least one number");
    }
    None
}

/// Parses the amount field of the transaction form.
///
/// A `+` prefix marks income, everything else is an expense (matching the
/// quick-entry convention); the magnitude must be a positive decimal with at
/// most two fractional digits.
pub fn parse_signed_amount(input: &str) -> Result<(TransactionKind, Amount), &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Amount is required");
    }

    let (kind, rest) = if let Some(stripped) = trimmed.strip_prefix('+') {
        (TransactionKind::Income, stripped.trim_start())
    } else if let Some(stripped) = trimmed.strip_prefix('-') {
        (TransactionKind::Expense, stripped.trim_start())
    } else {
        (TransactionKind::Expense, trimmed)
    };

    let amount: Amount = rest.parse().map_err(|_| "Enter a valid amount")?;
    if !amount.is_positive() {
        return Err("Amount must be greater than zero");
    }
    Ok((kind, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(email_error("homiak@example.com").is_none());
        assert_eq!(email_error(""), Some(REQUIRED));
        assert!(email_error("no-at-sign").is_some());
        assert!(email_error("two@@example.com").is_some());
        assert!(email_error("a@nodot").is_some());
        assert!(email_error("a b@example.com").is_some());
        assert!(email_error("a@.com").is_some());
    }

    #[test]
    fn username_rules() {
        assert!(username_error("homiak_1").is_none());
        assert!(username_error("ab").is_some());
        assert!(username_error("a".repeat(21).as_str()).is_some());
        assert!(username_error("with space").is_some());
        assert!(username_error("dash-ed").is_some());
    }

    #[test]
    fn password_rules() {
        assert!(password_error("Secret123").is_none());
        assert!(password_error("short1A").is_some());
        assert!(password_error("alllowercase1").is_some());
        assert!(password_error("NoDigitsHere").is_some());
    }

    #[test]
    fn signed_amount_parses_kind_from_prefix() {
        assert_eq!(
            parse_signed_amount("+120.50"),
            Ok((TransactionKind::Income, Amount::new(120_50)))
        );
        assert_eq!(
            parse_signed_amount("-45"),
            Ok((TransactionKind::Expense, Amount::new(45_00)))
        );
        assert_eq!(
            parse_signed_amount("3,20"),
            Ok((TransactionKind::Expense, Amount::new(3_20)))
        );
        assert!(parse_signed_amount("").is_err());
        assert!(parse_signed_amount("0").is_err());
        assert!(parse_signed_amount("12.345").is_err());
    }
}
