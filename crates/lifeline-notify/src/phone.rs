//! Phone number normalization.

/// Minimum digits in a dialable number.
pub const MIN_DIGITS: usize = 10;

/// Strip whitespace, hyphens and parentheses.
pub fn format(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// A number is valid when, once formatted, it is at least
/// [`MIN_DIGITS`] ASCII digits and nothing else.
pub fn is_valid(phone: &str) -> bool {
    let cleaned = format(phone);
    cleaned.len() >= MIN_DIGITS && cleaned.chars().all(|c| c.is_ascii_digit())
}
