//! Typed async client for the Namecheap registrar XML API.
//!
//! Covers domain availability and registration, hosted-DNS record
//! management, nameservers, email forwarding, account balances, pricing and
//! domain privacy (WhoisGuard). The vendor's attribute-heavy XML envelopes
//! are flattened internally; callers only see typed models and [`ApiError`].
//!
//! ```no_run
//! use namecheap_api::{Credentials, NamecheapClient, RecordBuilder};
//!
//! # async fn demo() -> namecheap_api::Result<()> {
//! let client = NamecheapClient::new(Credentials::from_env()?, false)?;
//!
//! let checks = client.domains().check(&["example.com"], true).await?;
//! println!("{checks:?}");
//!
//! let records = RecordBuilder::new()
//!     .a("@", "192.0.2.1", None)
//!     .cname("www", "example.com.", None)?
//!     .mx("@", "mail.example.com.", None, None)
//!     .build();
//! client.dns().set("example.com", records).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Every operation issues its HTTP requests strictly one at a time; there is
//! no automatic retry, because the vendor's DNS writes are full-replace and
//! replaying one blindly could clobber unseen state.

pub mod api;
mod client;
mod domain_name;
mod envelope;
mod error;
mod log_util;
mod record;
mod types;

pub use api::{
    DeleteFilter, DnsApi, DomainsApi, RegisterOptions, UsersApi, WhoisguardApi, WhoisguardListType,
};
pub use client::{Credentials, NamecheapClient};
pub use domain_name::split_domain;
pub use error::{ApiError, Result};
pub use record::{
    DnsRecord, RecordBuilder, RecordType, RedirectKind, DEFAULT_TTL, MAX_TTL, MIN_TTL,
};
pub use types::{
    AccountBalance, Contact, Domain, DomainCheck, DomainContacts, DomainInfo, EmailForward,
    EmailRotation, Nameservers, ProductPrice, RegistrationResult, RenewalResult, Tld,
    WhoisguardEntry, WhoisguardRenewal,
};
