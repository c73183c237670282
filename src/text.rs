//! Free-text place name cleaning

/// Keep only ASCII letters, ASCII digits and spaces, in their original order.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}
