//! Shannon entropy heuristics for high-randomness secrets.
//!
//! Catches keys that match no known provider format: random material
//! sits well above 4 bits per character (base64 ~5-6, hex ~3.5-4),
//! while English identifiers and words stay below ~3.5.

use std::sync::LazyLock;

use regex::Regex;

/// Values bound in an assignment (`key = value`, `key: "value"`),
/// restricted to the base64/hex-ish alphabet secrets are written in.
/// Bare high-entropy blobs with no binding name are deliberately not
/// candidates (UUIDs and content hashes are everywhere in normal source).
static ASSIGNED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)[a-z_][a-z0-9_.-]*\s*[:=]\s*["']?([A-Za-z0-9+/=_-]{16,})["']?"#)
        .expect("assigned-value pattern is valid")
});

/// Yield `(byte_offset, token)` for every assignment-shaped candidate.
pub fn candidate_tokens(text: &str) -> Vec<(usize, &str)> {
    ASSIGNED_VALUE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| (m.start(), m.as_str()))
        .collect()
}

/// Shannon entropy of a string in bits per character, computed over the
/// byte distribution.
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let len = s.len() as f64;
    let mut freq = [0u32; 256];
    for &byte in s.as_bytes() {
        freq[byte as usize] += 1;
    }

    freq.iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}
