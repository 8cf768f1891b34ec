//! Registrable-name splitting.
//!
//! Most vendor endpoints take the registered domain as separate `SLD` and
//! `TLD` parameters. Splitting at the last dot would mangle multi-label
//! suffixes (`example.co.uk` must split as `example` + `co.uk`), so the
//! split goes through the compiled Public Suffix List.

use crate::error::{ApiError, Result};

/// Split a domain into its `(sld, tld)` pair for the vendor API.
///
/// Input is normalized (lowercased, trailing dot stripped) first. Extra
/// left-hand labels are discarded: `shop.example.co.uk` splits to
/// `("example", "co.uk")`, matching what the registrar actually manages.
pub fn split_domain(domain: &str) -> Result<(String, String)> {
    let normalized = domain.trim().trim_end_matches('.').to_ascii_lowercase();
    if normalized.is_empty() {
        return Err(ApiError::validation("domain name is empty"));
    }

    let parsed = psl::domain(normalized.as_bytes()).ok_or_else(|| {
        ApiError::validation(format!("'{domain}' is not a registrable domain name"))
    })?;

    let registrable = std::str::from_utf8(parsed.as_bytes())
        .map_err(|_| ApiError::validation(format!("'{domain}' is not valid UTF-8")))?;
    let suffix_len = parsed.suffix().as_bytes().len();
    if suffix_len + 1 >= registrable.len() {
        return Err(ApiError::validation(format!(
            "'{domain}' has no label before its public suffix"
        )));
    }

    let sld = registrable[..registrable.len() - suffix_len - 1].to_string();
    let tld = registrable[registrable.len() - suffix_len..].to_string();
    Ok((sld, tld))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_com_domain() {
        assert_eq!(
            split_domain("example.com").unwrap(),
            ("example".to_string(), "com".to_string())
        );
    }

    #[test]
    fn multi_label_public_suffix() {
        assert_eq!(
            split_domain("example.co.uk").unwrap(),
            ("example".to_string(), "co.uk".to_string())
        );
    }

    #[test]
    fn subdomains_are_discarded() {
        assert_eq!(
            split_domain("shop.example.co.uk").unwrap(),
            ("example".to_string(), "co.uk".to_string())
        );
    }

    #[test]
    fn input_is_normalized() {
        assert_eq!(
            split_domain("  Example.COM.  ").unwrap(),
            ("example".to_string(), "com".to_string())
        );
    }

    #[test]
    fn bare_suffix_is_rejected() {
        assert!(split_domain("com").is_err());
        assert!(split_domain("co.uk").is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(split_domain("").is_err());
        assert!(split_domain("   ").is_err());
        assert!(split_domain(".").is_err());
    }
}
