use sha2::{Digest, Sha256};

/// Length of the short hash used to bucket terms.
pub const HASH8_LEN: usize = 8;

/// Width of zero-padded line numbers in position keys.
pub const POSITION_PAD_WIDTH: usize = 6;

/// Non-unique, constant-length hash of a string (first 8 hex chars of SHA-256)
pub fn hash8(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(HASH8_LEN);
    hex
}

/// Left-pad a line number with zeros so that lexicographic order matches
/// numeric order (`"000002" < "000011"`).
pub fn pad_position(line: u32) -> String {
    format!("{:0width$}", line, width = POSITION_PAD_WIDTH)
}

/// Anchor id for a heading: lowercase, alphanumerics kept, whitespace and
/// dashes turned into `-`, everything else dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() || ch == '_' {
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            slug.push('-');
        }
    }
    slug
}
