//! Domain-privacy operations (`namecheap.whoisguard.*`).
//!
//! The vendor keys everything here by subscription ID, not domain name.
//! Every domain-taking method resolves the ID first via the account's
//! ALLOTED subscription list; an unknown domain fails with a descriptive
//! validation error before any action call is made.

use crate::client::NamecheapClient;
use crate::envelope;
use crate::error::{ApiError, Result};
use crate::types::{EmailRotation, WhoisguardEntry, WhoisguardRenewal};

use super::ensure_acknowledged;

const MAX_PAGE_SIZE: u32 = 100;

/// Subscription-list filter for [`WhoisguardApi::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhoisguardListType {
    #[default]
    All,
    /// Subscriptions attached to a domain.
    Alloted,
    /// Purchased but unattached subscriptions.
    Free,
    /// Discarded subscriptions.
    Discard,
}

impl WhoisguardListType {
    fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Alloted => "ALLOTED",
            Self::Free => "FREE",
            Self::Discard => "DISCARD",
        }
    }
}

/// Domain-privacy (WhoisGuard) operations.
pub struct WhoisguardApi<'a> {
    client: &'a NamecheapClient,
}

impl<'a> WhoisguardApi<'a> {
    pub(crate) fn new(client: &'a NamecheapClient) -> Self {
        Self { client }
    }

    /// List privacy subscriptions on the account.
    pub async fn list(
        &self,
        list_type: WhoisguardListType,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<WhoisguardEntry>> {
        let response = self
            .client
            .request(
                "namecheap.whoisguard.getList",
                &[
                    ("ListType".into(), list_type.as_str().to_string()),
                    ("Page".into(), page.max(1).to_string()),
                    ("PageSize".into(), page_size.min(MAX_PAGE_SIZE).to_string()),
                ],
            )
            .await?;
        let result = envelope::resolve_path(&response, "WhoisguardGetListResult")?;
        envelope::coerce_list(result.get("Whoisguard"))
            .iter()
            .map(WhoisguardEntry::from_entry)
            .collect()
    }

    /// Resolve a domain name to its subscription ID.
    ///
    /// Matching is case-insensitive. A miss is a validation error naming the
    /// domain, returned before any mutation call goes out.
    pub async fn resolve_id(&self, domain: &str) -> Result<u64> {
        let entries = self
            .list(WhoisguardListType::Alloted, 1, MAX_PAGE_SIZE)
            .await?;
        entries
            .iter()
            .find(|e| e.domain.eq_ignore_ascii_case(domain))
            .map(|e| e.id)
            .ok_or_else(|| {
                ApiError::validation(format!(
                    "no privacy subscription found for {domain}; \
                     the domain must have one allotted before it can be managed"
                ))
            })
    }

    /// Turn privacy on, forwarding masked contact email to `forwarded_to`.
    pub async fn enable(&self, domain: &str, forwarded_to: &str) -> Result<()> {
        let id = self.resolve_id(domain).await?;
        let response = self
            .client
            .request(
                "namecheap.whoisguard.enable",
                &[
                    ("WhoisguardID".into(), id.to_string()),
                    ("ForwardedToEmail".into(), forwarded_to.to_string()),
                ],
            )
            .await?;
        let result = envelope::resolve_path(&response, "WhoisguardEnableResult")?;
        ensure_acknowledged(result, "IsSuccess", "privacy enable")
    }

    /// Turn privacy off for a domain.
    pub async fn disable(&self, domain: &str) -> Result<()> {
        let id = self.resolve_id(domain).await?;
        let response = self
            .client
            .request(
                "namecheap.whoisguard.disable",
                &[("WhoisguardID".into(), id.to_string())],
            )
            .await?;
        let result = envelope::resolve_path(&response, "WhoisguardDisableResult")?;
        ensure_acknowledged(result, "IsSuccess", "privacy disable")
    }

    /// Renew the privacy subscription for 1 to 9 years.
    pub async fn renew(&self, domain: &str, years: u32) -> Result<WhoisguardRenewal> {
        if !(1..=9).contains(&years) {
            return Err(ApiError::validation(format!(
                "renewal years must be between 1 and 9, got {years}"
            )));
        }
        let id = self.resolve_id(domain).await?;
        let response = self
            .client
            .request(
                "namecheap.whoisguard.renew",
                &[
                    ("WhoisguardID".into(), id.to_string()),
                    ("Years".into(), years.to_string()),
                ],
            )
            .await?;
        let result = envelope::resolve_path(&response, "WhoisguardRenewResult")?;
        Ok(WhoisguardRenewal::from_entry(result, id, years))
    }

    /// Rotate the masked forwarding address. The vendor mints the new
    /// address itself; the response carries both old and new.
    pub async fn change_email(&self, domain: &str) -> Result<EmailRotation> {
        let id = self.resolve_id(domain).await?;
        let response = self
            .client
            .request(
                "namecheap.whoisguard.changeEmailAddress",
                &[("WhoisguardID".into(), id.to_string())],
            )
            .await?;
        let result = envelope::resolve_path(&response, "WhoisguardChangeEmailAddressResult")?;
        Ok(EmailRotation::from_entry(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_type_wire_spelling() {
        assert_eq!(WhoisguardListType::All.as_str(), "ALL");
        assert_eq!(WhoisguardListType::Alloted.as_str(), "ALLOTED");
        assert_eq!(WhoisguardListType::Free.as_str(), "FREE");
        assert_eq!(WhoisguardListType::Discard.as_str(), "DISCARD");
        assert_eq!(WhoisguardListType::default(), WhoisguardListType::All);
    }
}
