//! Log hygiene helpers.
//!
//! Debug logging of raw envelopes is useful, but response bodies can run to
//! many kilobytes (TLD lists, pricing tables) and request parameters carry
//! the API key. Everything logged goes through here first.

/// Maximum number of bytes of a response body to include in debug logs.
const BODY_LIMIT: usize = 512;

/// MSRV-compatible replacement for `str::floor_char_boundary`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for debug logging, noting the original size.
pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= BODY_LIMIT {
        body.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &body[..floor_char_boundary(body, BODY_LIMIT)],
            body.len()
        )
    }
}

/// Mask a secret down to its first two characters.
pub(crate) fn mask_secret(secret: &str) -> String {
    let visible = floor_char_boundary(secret, 2.min(secret.len()));
    format!("{}***", &secret[..visible])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        assert_eq!(truncate_body("<ApiResponse/>"), "<ApiResponse/>");
    }

    #[test]
    fn body_at_limit_unchanged() {
        let body = "x".repeat(BODY_LIMIT);
        assert_eq!(truncate_body(&body), body);
    }

    #[test]
    fn long_body_truncated_with_size() {
        let body = "x".repeat(BODY_LIMIT * 4);
        let logged = truncate_body(&body);
        assert!(logged.len() < body.len());
        assert!(logged.ends_with(&format!("[truncated, total {} bytes]", BODY_LIMIT * 4)));
    }

    #[test]
    fn multibyte_body_not_split_mid_char() {
        let body = "ü".repeat(BODY_LIMIT);
        let logged = truncate_body(&body);
        assert!(logged.contains("[truncated"));
    }

    #[test]
    fn secret_is_masked() {
        assert_eq!(mask_secret("0123456789abcdef"), "01***");
        assert_eq!(mask_secret("a"), "a***");
        assert_eq!(mask_secret(""), "***");
    }
}
