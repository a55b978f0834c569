//! Utility functions and helpers.

pub mod http;

/// Mask a secret for logs, keeping a short prefix to tell tokens apart.
pub fn redact(secret: &str) -> String {
    const VISIBLE: usize = 4;

    if secret.chars().count() <= VISIBLE * 2 {
        return "***".to_string();
    }
    let prefix: String = secret.chars().take(VISIBLE).collect();
    format!("{prefix}***")
}

/// Replace every occurrence of `secret` in `text` with its redacted form.
pub fn scrub(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, &redact(secret))
}
