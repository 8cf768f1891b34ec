//! Endpoint groups, one per vendor command namespace.

mod dns;
mod domains;
mod users;
mod whoisguard;

pub use dns::{DeleteFilter, DnsApi};
pub use domains::{DomainsApi, RegisterOptions};
pub use users::UsersApi;
pub use whoisguard::{WhoisguardApi, WhoisguardListType};

use serde_json::Value;

use crate::envelope;
use crate::error::{ApiError, Result};

/// Some mutation results carry a success flag even inside a `Status="OK"`
/// envelope. An unset flag is a vendor-side refusal without an error list,
/// so it surfaces as an API error rather than a silent no-op.
pub(crate) fn ensure_acknowledged(entry: &Value, flag: &str, what: &str) -> Result<()> {
    if envelope::attr_bool(entry, flag) {
        Ok(())
    } else {
        Err(ApiError::Api {
            number: String::new(),
            message: format!("{what} was not acknowledged by the registrar"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn acknowledged_flag_accepted() {
        let entry = json!({"@IsSuccess": "true"});
        assert!(ensure_acknowledged(&entry, "IsSuccess", "update").is_ok());
    }

    #[test]
    fn missing_or_false_flag_is_an_api_error() {
        for entry in [json!({"@IsSuccess": "false"}), json!({})] {
            let err = ensure_acknowledged(&entry, "IsSuccess", "update").unwrap_err();
            assert!(matches!(err, ApiError::Api { .. }));
            assert!(err.to_string().contains("update"));
        }
    }
}
