//! Constant-time comparison helpers for secret material.

use subtle::ConstantTimeEq;

/// Compare two byte slices without early exit on the first mismatch.
///
/// Slices of different length compare unequal.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// String convenience wrapper around [`constant_time_eq`].
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_inputs() {
        assert!(constant_time_eq(b"digest", b"digest"));
        assert!(constant_time_str_eq("", ""));
    }

    #[test]
    fn test_different_inputs() {
        assert!(!constant_time_str_eq("digest-a", "digest-b"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }
}
