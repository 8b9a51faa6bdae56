//! Account field validation

use once_cell::sync::Lazy;
use regex::Regex;

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]{3,}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// bcrypt only hashes the first 72 bytes
pub const PASSWORD_MAX_LENGTH: usize = 72;

/// Display names: at least three of letters, digits and `._%+-`
pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

/// Email addresses: `local@domain.tld` with a two-letter minimum TLD
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Passwords: ASCII letters and digits only, with at least one lowercase
/// letter, one uppercase letter and one digit
pub fn is_valid_password(password: &str) -> bool {
    if password.len() < PASSWORD_MIN_LENGTH || password.len() > PASSWORD_MAX_LENGTH {
        return false;
    }
    if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}
