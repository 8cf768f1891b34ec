//! Shared helpers for live sandbox tests.

#![allow(dead_code)]

use std::env;

use namecheap_api::{Credentials, NamecheapClient, Result};

/// Skip the test (with a note on stderr) when any env var is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Live-test context: a sandbox client plus the domain under test.
pub struct TestContext {
    pub client: NamecheapClient,
    pub domain: String,
}

impl TestContext {
    /// Build a sandbox client from the standard credential variables plus
    /// `TEST_DOMAIN` (a domain registered in the sandbox account).
    pub fn sandbox() -> Result<Self> {
        let credentials = Credentials::from_env()?;
        let client = NamecheapClient::new(credentials, true)?;
        let domain = env::var("TEST_DOMAIN").unwrap_or_else(|_| "example.com".to_string());
        Ok(Self { client, domain })
    }
}
