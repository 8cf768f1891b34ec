//! HTTP transport and credential handling.

use std::time::Duration;

use serde_json::Value;

use crate::api::{DnsApi, DomainsApi, UsersApi, WhoisguardApi};
use crate::envelope;
use crate::error::{ApiError, Result};
use crate::log_util;

const PRODUCTION_URL: &str = "https://api.namecheap.com/xml.response";
const SANDBOX_URL: &str = "https://api.sandbox.namecheap.com/xml.response";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The four credential values every API call must carry.
///
/// `api_user` and `username` are usually the same account name; the vendor
/// keeps them separate for reseller setups. `client_ip` must match an IP on
/// the account's API whitelist.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_user: String,
    pub api_key: String,
    pub username: String,
    pub client_ip: String,
}

impl Credentials {
    #[must_use]
    pub fn new(
        api_user: impl Into<String>,
        api_key: impl Into<String>,
        username: impl Into<String>,
        client_ip: impl Into<String>,
    ) -> Self {
        Self {
            api_user: api_user.into(),
            api_key: api_key.into(),
            username: username.into(),
            client_ip: client_ip.into(),
        }
    }

    /// Read credentials from `NAMECHEAP_API_USER`, `NAMECHEAP_API_KEY`,
    /// `NAMECHEAP_USERNAME` and `NAMECHEAP_CLIENT_IP`.
    ///
    /// The error names every missing variable at once, so a user fixing
    /// their environment does not get them one failure at a time.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        const VARS: [&str; 4] = [
            "NAMECHEAP_API_USER",
            "NAMECHEAP_API_KEY",
            "NAMECHEAP_USERNAME",
            "NAMECHEAP_CLIENT_IP",
        ];

        let values: Vec<Option<String>> = VARS
            .iter()
            .map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
            .collect();

        let missing: Vec<&str> = VARS
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ApiError::validation(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )));
        }

        let mut values = values.into_iter().flatten();
        // All four are present, checked above.
        let (api_user, api_key, username, client_ip) = (
            values.next().unwrap_or_default(),
            values.next().unwrap_or_default(),
            values.next().unwrap_or_default(),
            values.next().unwrap_or_default(),
        );
        Ok(Self::new(api_user, api_key, username, client_ip))
    }
}

/// Entry point for all API operations.
///
/// Holds one connection-pooled [`reqwest::Client`]; endpoint groups are
/// borrowed views, so the usual shape is:
///
/// ```no_run
/// # async fn demo() -> namecheap_api::Result<()> {
/// let credentials = namecheap_api::Credentials::from_env()?;
/// let client = namecheap_api::NamecheapClient::new(credentials, false)?;
/// let records = client.dns().get("example.com").await?;
/// # let _ = records;
/// # Ok(())
/// # }
/// ```
pub struct NamecheapClient {
    http: reqwest::Client,
    credentials: Credentials,
    base_url: &'static str,
}

impl NamecheapClient {
    /// Build a client against the production endpoint, or the sandbox when
    /// `sandbox` is set.
    pub fn new(credentials: Credentials, sandbox: bool) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network {
                detail: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            credentials,
            base_url: if sandbox { SANDBOX_URL } else { PRODUCTION_URL },
        })
    }

    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.base_url == SANDBOX_URL
    }

    /// Domain registration, lookup and contact operations.
    #[must_use]
    pub fn domains(&self) -> DomainsApi<'_> {
        DomainsApi::new(self)
    }

    /// Hosted-DNS record, nameserver and email-forwarding operations.
    #[must_use]
    pub fn dns(&self) -> DnsApi<'_> {
        DnsApi::new(self)
    }

    /// Account balance and pricing operations.
    #[must_use]
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// Domain-privacy (WhoisGuard) operations.
    #[must_use]
    pub fn whoisguard(&self) -> WhoisguardApi<'_> {
        WhoisguardApi::new(self)
    }

    /// Issue one API call and return the flattened `<CommandResponse>` tree.
    ///
    /// Each call is a single GET; there is no retry. DNS writes are
    /// full-replace, so replaying a request whose response was lost could
    /// clobber state the caller never observed.
    pub(crate) async fn request(&self, command: &str, params: &[(String, String)]) -> Result<Value> {
        let mut query: Vec<(&str, &str)> = vec![
            ("ApiUser", &self.credentials.api_user),
            ("ApiKey", &self.credentials.api_key),
            ("UserName", &self.credentials.username),
            ("ClientIp", &self.credentials.client_ip),
            ("Command", command),
        ];
        query.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        log::debug!(
            "GET {} command={command} api_key={} params={}",
            self.base_url,
            log_util::mask_secret(&self.credentials.api_key),
            params.len()
        );

        let response = self
            .http
            .get(self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        log::debug!(
            "{command} -> HTTP {status}, body: {}",
            log_util::truncate_body(&body)
        );

        if !status.is_success() {
            return Err(ApiError::Network {
                detail: format!("HTTP {status} from {}", self.base_url),
            });
        }

        envelope::parse_response(&body)
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            detail: err.to_string(),
        }
    } else {
        ApiError::Network {
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn credentials_from_complete_environment() {
        let creds = Credentials::from_lookup(lookup_from(&[
            ("NAMECHEAP_API_USER", "acme"),
            ("NAMECHEAP_API_KEY", "0123456789abcdef"),
            ("NAMECHEAP_USERNAME", "acme"),
            ("NAMECHEAP_CLIENT_IP", "203.0.113.9"),
        ]))
        .unwrap();
        assert_eq!(creds.api_user, "acme");
        assert_eq!(creds.client_ip, "203.0.113.9");
    }

    #[test]
    fn missing_variables_are_all_reported() {
        let err = Credentials::from_lookup(lookup_from(&[("NAMECHEAP_API_USER", "acme")]))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("NAMECHEAP_API_KEY"));
        assert!(message.contains("NAMECHEAP_USERNAME"));
        assert!(message.contains("NAMECHEAP_CLIENT_IP"));
        assert!(!message.contains("NAMECHEAP_API_USER,"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = Credentials::from_lookup(lookup_from(&[
            ("NAMECHEAP_API_USER", "acme"),
            ("NAMECHEAP_API_KEY", "   "),
            ("NAMECHEAP_USERNAME", "acme"),
            ("NAMECHEAP_CLIENT_IP", "203.0.113.9"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("NAMECHEAP_API_KEY"));
    }

    #[test]
    fn sandbox_flag_selects_endpoint() {
        let creds = Credentials::new("u", "k", "u", "127.0.0.1");
        let sandbox = NamecheapClient::new(creds.clone(), true).unwrap();
        assert!(sandbox.is_sandbox());
        let production = NamecheapClient::new(creds, false).unwrap();
        assert!(!production.is_sandbox());
    }
}
