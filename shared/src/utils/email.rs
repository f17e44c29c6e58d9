//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Same acceptance rule the chat front end applies before a session starts
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Check if an email address has an acceptable format
///
/// The address is checked exactly as supplied; no trimming or case folding
/// is applied since email keys are case-sensitive throughout the gate.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask an email address for logging (e.g., a***@example.com)
///
/// Keeps the first character of the local part and the full domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            if first.is_empty() {
                format!("***@{}", domain)
            } else {
                format!("{}***@{}", first, domain)
            }
        }
        None => "***".to_string(),
    }
}
