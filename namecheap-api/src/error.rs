use serde::{Deserialize, Serialize};

/// Unified error type for all Namecheap API operations.
///
/// All variants are serializable for structured error reporting. Callers can
/// branch on the variant to distinguish local validation failures from errors
/// the vendor reported, and both of those from transport or envelope-shape
/// problems.
///
/// None of these are retried automatically: DNS mutations are full-replace
/// operations, so a blind retry could resurrect state the caller never saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A local precondition failed before any network call was made
    /// (malformed domain name, CNAME at the zone apex, nameserver count out
    /// of bounds, renewal years out of range, and so on).
    Validation {
        /// What was wrong with the input.
        detail: String,
    },

    /// The vendor answered with `Status="ERROR"` and an error list.
    Api {
        /// Vendor error number (e.g. `"2030166"`), empty if absent.
        number: String,
        /// Vendor error message.
        message: String,
    },

    /// The envelope parsed cleanly but the expected result node was missing.
    ///
    /// This signals a vendor contract change or a malformed call, and is
    /// deliberately distinct from [`Api`](Self::Api).
    Schema {
        /// Dotted path that could not be resolved.
        path: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, etc.).
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The response body was not a well-formed vendor envelope.
    Parse {
        /// Details about the parse failure.
        detail: String,
    },
}

impl ApiError {
    pub(crate) fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    pub(crate) fn schema(path: impl Into<String>) -> Self {
        Self::Schema { path: path.into() }
    }

    pub(crate) fn parse(detail: impl ToString) -> Self {
        Self::Parse {
            detail: detail.to_string(),
        }
    }

    /// Whether this error is expected behavior (bad user input, vendor
    /// rejecting a request) rather than something broken. `true` should log
    /// at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Api { .. })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { detail } => write!(f, "Validation error: {detail}"),
            Self::Api { number, message } => {
                if number.is_empty() {
                    write!(f, "API error: {message}")
                } else {
                    write!(f, "API error {number}: {message}")
                }
            }
            Self::Schema { path } => {
                write!(f, "Unexpected response shape: missing '{path}'")
            }
            Self::Network { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::Parse { detail } => write!(f, "Parse error: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_validation() {
        let e = ApiError::validation("years must be between 1 and 9");
        assert_eq!(
            e.to_string(),
            "Validation error: years must be between 1 and 9"
        );
    }

    #[test]
    fn display_api_with_number() {
        let e = ApiError::Api {
            number: "2030166".to_string(),
            message: "Domain is invalid".to_string(),
        };
        assert_eq!(e.to_string(), "API error 2030166: Domain is invalid");
    }

    #[test]
    fn display_api_without_number() {
        let e = ApiError::Api {
            number: String::new(),
            message: "Unknown error".to_string(),
        };
        assert_eq!(e.to_string(), "API error: Unknown error");
    }

    #[test]
    fn display_schema() {
        let e = ApiError::schema("DomainGetListResult.Domain");
        assert_eq!(
            e.to_string(),
            "Unexpected response shape: missing 'DomainGetListResult.Domain'"
        );
    }

    #[test]
    fn display_network() {
        let e = ApiError::Network {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "Network error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let e = ApiError::Timeout {
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "Request timeout: 30s elapsed");
    }

    #[test]
    fn display_parse() {
        let e = ApiError::parse("unexpected end of document");
        assert_eq!(e.to_string(), "Parse error: unexpected end of document");
    }

    #[test]
    fn expected_variants() {
        assert!(ApiError::validation("x").is_expected());
        assert!(ApiError::Api {
            number: "1".into(),
            message: "m".into(),
        }
        .is_expected());
        assert!(!ApiError::schema("x").is_expected());
        assert!(!ApiError::Network { detail: "x".into() }.is_expected());
        assert!(!ApiError::Timeout { detail: "x".into() }.is_expected());
        assert!(!ApiError::parse("x").is_expected());
    }

    #[test]
    fn serialize_json_tag() {
        let e = ApiError::Api {
            number: "1011102".to_string(),
            message: "API Key is invalid".to_string(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"Api\""));
        assert!(json.contains("\"number\":\"1011102\""));
    }

    #[test]
    fn deserialize_round_trip() {
        let original = ApiError::schema("Tlds");
        let json = serde_json::to_string(&original).unwrap();
        let back: ApiError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), original.to_string());
    }
}
