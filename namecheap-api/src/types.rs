//! Typed models projected out of the flattened vendor envelope.
//!
//! The vendor sends everything stringly (booleans as `"true"`, prices as
//! `"10.98"`, dates as `MM/DD/YYYY`); each model owns its projection from a
//! flattened entry so the parsing quirks stay in one place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope;
use crate::error::{ApiError, Result};

/// One availability result from `domains.check`.
///
/// Pricing fields are only populated when the caller asked for pricing and
/// the per-TLD lookup succeeded; an available domain with `your_price: None`
/// means the price could not be fetched, not that it is free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainCheck {
    pub domain: String,
    pub available: bool,
    pub premium: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_registration_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<f64>,
}

impl DomainCheck {
    pub(crate) fn from_entry(entry: &Value) -> Result<Self> {
        Ok(Self {
            domain: envelope::attr(entry, "Domain")
                .ok_or_else(|| ApiError::schema("DomainCheckResult.@Domain"))?
                .to_string(),
            available: envelope::attr_bool(entry, "Available"),
            premium: envelope::attr_bool(entry, "IsPremiumName"),
            premium_registration_price: envelope::attr_f64(entry, "PremiumRegistrationPrice"),
            regular_price: None,
            your_price: None,
            retail_price: None,
        })
    }
}

/// One row of `domains.getList`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: u64,
    pub name: String,
    pub user: String,
    pub created: Option<NaiveDate>,
    pub expires: Option<NaiveDate>,
    pub is_expired: bool,
    pub is_locked: bool,
    pub auto_renew: bool,
    /// Vendor reports this as `"ENABLED"` / `"NOTPRESENT"`.
    pub whoisguard: String,
    pub is_premium: bool,
    pub is_our_dns: bool,
}

impl Domain {
    pub(crate) fn from_entry(entry: &Value) -> Result<Self> {
        Ok(Self {
            id: envelope::attr_u64(entry, "ID").unwrap_or_default(),
            name: envelope::attr(entry, "Name")
                .ok_or_else(|| ApiError::schema("Domain.@Name"))?
                .to_string(),
            user: envelope::attr_string(entry, "User"),
            created: envelope::attr_date(entry, "Created"),
            expires: envelope::attr_date(entry, "Expires"),
            is_expired: envelope::attr_bool(entry, "IsExpired"),
            is_locked: envelope::attr_bool(entry, "IsLocked"),
            auto_renew: envelope::attr_bool(entry, "AutoRenew"),
            whoisguard: envelope::attr_string(entry, "WhoisGuard"),
            is_premium: envelope::attr_bool(entry, "IsPremium"),
            is_our_dns: envelope::attr_bool(entry, "IsOurDNS"),
        })
    }
}

/// Flattened `domains.getInfo` result.
///
/// The vendor scatters this over `DomainDetails`, `Whoisguard` and
/// `DnsDetails` subtrees; the projection flattens them into one struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainInfo {
    pub id: u64,
    pub domain: String,
    pub owner: String,
    pub is_owner: bool,
    pub is_premium: bool,
    pub status: String,
    pub created: Option<NaiveDate>,
    pub expires: Option<NaiveDate>,
    pub whoisguard_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_provider: Option<String>,
}

impl DomainInfo {
    pub(crate) fn from_entry(entry: &Value) -> Result<Self> {
        let details = entry.get("DomainDetails");
        let date_of = |key: &str| {
            details
                .and_then(|d| d.get(key))
                .and_then(envelope::node_text)
                .and_then(envelope::parse_vendor_date)
        };
        Ok(Self {
            id: envelope::attr_u64(entry, "ID").unwrap_or_default(),
            domain: envelope::attr(entry, "DomainName")
                .ok_or_else(|| ApiError::schema("DomainGetInfoResult.@DomainName"))?
                .to_string(),
            owner: envelope::attr_string(entry, "OwnerName"),
            is_owner: envelope::attr_bool(entry, "IsOwner"),
            is_premium: envelope::attr_bool(entry, "IsPremium"),
            status: envelope::attr_string(entry, "Status"),
            created: date_of("CreatedDate"),
            expires: date_of("ExpiredDate"),
            whoisguard_enabled: entry
                .get("Whoisguard")
                .is_some_and(|wg| envelope::attr_bool(wg, "Enabled")),
            dns_provider: entry
                .get("DnsDetails")
                .and_then(|dns| envelope::attr(dns, "ProviderType"))
                .map(ToString::to_string),
        })
    }
}

/// A registrant/tech/admin/billing contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub state_province: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub(crate) fn from_entry(entry: &Value) -> Self {
        let text_of = |key: &str| {
            entry
                .get(key)
                .and_then(envelope::node_text)
                .unwrap_or_default()
                .to_string()
        };
        let optional = |key: &str| {
            entry
                .get(key)
                .and_then(envelope::node_text)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };
        Self {
            first_name: text_of("FirstName"),
            last_name: text_of("LastName"),
            organization: optional("Organization"),
            address1: text_of("Address1"),
            address2: optional("Address2"),
            city: text_of("City"),
            state_province: text_of("StateProvince"),
            postal_code: text_of("PostalCode"),
            country: text_of("Country"),
            phone: text_of("Phone"),
            email: text_of("EmailAddress"),
        }
    }

    /// Expand this contact into the vendor's per-role parameter names
    /// (`RegistrantFirstName`, `TechFirstName`, ...).
    pub(crate) fn push_params(&self, role: &str, params: &mut Vec<(String, String)>) {
        let mut push = |field: &str, value: &str| {
            if !value.is_empty() {
                params.push((format!("{role}{field}"), value.to_string()));
            }
        };
        push("FirstName", &self.first_name);
        push("LastName", &self.last_name);
        push("Organization", self.organization.as_deref().unwrap_or(""));
        push("Address1", &self.address1);
        push("Address2", self.address2.as_deref().unwrap_or(""));
        push("City", &self.city);
        push("StateProvince", &self.state_province);
        push("PostalCode", &self.postal_code);
        push("Country", &self.country);
        push("Phone", &self.phone);
        push("EmailAddress", &self.email);
    }
}

/// The four contact roles attached to every registered domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainContacts {
    pub registrant: Contact,
    pub tech: Contact,
    pub admin: Contact,
    pub aux_billing: Contact,
}

impl DomainContacts {
    pub(crate) fn from_entry(entry: &Value) -> Self {
        let role = |key: &str| {
            entry
                .get(key)
                .map(Contact::from_entry)
                .unwrap_or_default()
        };
        Self {
            registrant: role("Registrant"),
            tech: role("Tech"),
            admin: role("Admin"),
            aux_billing: role("AuxBilling"),
        }
    }
}

/// One entry of `domains.getTldList`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tld {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub min_register_years: u32,
    pub max_register_years: u32,
    pub is_api_registerable: bool,
    pub is_api_renewable: bool,
    pub is_api_transferable: bool,
}

impl Tld {
    pub(crate) fn from_entry(entry: &Value) -> Result<Self> {
        Ok(Self {
            name: envelope::attr(entry, "Name")
                .ok_or_else(|| ApiError::schema("Tlds.Tld.@Name"))?
                .to_string(),
            description: envelope::node_text(entry)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string),
            min_register_years: envelope::attr_u32(entry, "MinRegisterYears").unwrap_or(1),
            max_register_years: envelope::attr_u32(entry, "MaxRegisterYears").unwrap_or(10),
            is_api_registerable: envelope::attr_bool(entry, "IsApiRegisterable"),
            is_api_renewable: envelope::attr_bool(entry, "IsApiRenewable"),
            is_api_transferable: envelope::attr_bool(entry, "IsApiTransferable"),
        })
    }
}

/// `users.getBalances` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    pub currency: String,
    pub available_balance: f64,
    pub account_balance: f64,
    pub earned_amount: f64,
    pub withdrawable_amount: f64,
    pub funds_required_for_auto_renew: f64,
}

impl AccountBalance {
    pub(crate) fn from_entry(entry: &Value) -> Self {
        Self {
            currency: envelope::attr_string(entry, "Currency"),
            available_balance: envelope::attr_f64(entry, "AvailableBalance").unwrap_or_default(),
            account_balance: envelope::attr_f64(entry, "AccountBalance").unwrap_or_default(),
            earned_amount: envelope::attr_f64(entry, "EarnedAmount").unwrap_or_default(),
            withdrawable_amount: envelope::attr_f64(entry, "WithdrawableAmount")
                .unwrap_or_default(),
            funds_required_for_auto_renew: envelope::attr_f64(entry, "FundsRequiredForAutoRenew")
                .unwrap_or_default(),
        }
    }
}

/// One `<Price>` row of `users.getPricing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPrice {
    /// The product this price belongs to, e.g. the TLD name.
    pub product: String,
    pub duration: u32,
    pub duration_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<f64>,
    pub currency: String,
}

impl ProductPrice {
    pub(crate) fn from_entry(product: &str, entry: &Value) -> Self {
        Self {
            product: product.to_string(),
            duration: envelope::attr_u32(entry, "Duration").unwrap_or(1),
            duration_type: envelope::attr_string(entry, "DurationType"),
            price: envelope::attr_f64(entry, "Price"),
            regular_price: envelope::attr_f64(entry, "RegularPrice"),
            your_price: envelope::attr_f64(entry, "YourPrice"),
            retail_price: envelope::attr_f64(entry, "RetailPrice"),
            currency: envelope::attr_string(entry, "Currency"),
        }
    }
}

/// One `whoisguard.getList` subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoisguardEntry {
    pub id: u64,
    /// Empty for subscriptions not yet attached to a domain.
    pub domain: String,
    pub status: String,
    pub created: Option<NaiveDate>,
    pub expires: Option<NaiveDate>,
}

impl WhoisguardEntry {
    pub(crate) fn from_entry(entry: &Value) -> Result<Self> {
        Ok(Self {
            id: envelope::attr_u64(entry, "ID")
                .ok_or_else(|| ApiError::schema("Whoisguard.@ID"))?,
            domain: envelope::attr_string(entry, "DomainName"),
            status: envelope::attr_string(entry, "Status"),
            created: envelope::attr_date(entry, "Created"),
            expires: envelope::attr_date(entry, "Expires"),
        })
    }
}

/// `whoisguard.renew` outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoisguardRenewal {
    pub whoisguard_id: u64,
    pub years: u32,
    pub renewed: bool,
    pub order_id: u64,
    pub transaction_id: u64,
    pub charged_amount: f64,
}

impl WhoisguardRenewal {
    pub(crate) fn from_entry(entry: &Value, fallback_id: u64, fallback_years: u32) -> Self {
        Self {
            whoisguard_id: envelope::attr_u64(entry, "WhoisguardId").unwrap_or(fallback_id),
            years: envelope::attr_u32(entry, "Years").unwrap_or(fallback_years),
            renewed: envelope::attr_bool(entry, "Renew"),
            order_id: envelope::attr_u64(entry, "OrderId").unwrap_or_default(),
            transaction_id: envelope::attr_u64(entry, "TransactionId").unwrap_or_default(),
            charged_amount: envelope::attr_f64(entry, "ChargedAmount").unwrap_or_default(),
        }
    }
}

/// `whoisguard.changeEmailAddress` outcome: the vendor retires the old
/// masked address and mints a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRotation {
    pub new_email: String,
    pub old_email: String,
}

impl EmailRotation {
    pub(crate) fn from_entry(entry: &Value) -> Self {
        Self {
            new_email: envelope::attr_string(entry, "WGEmail"),
            old_email: envelope::attr_string(entry, "WGOldEmail"),
        }
    }
}

/// `domains.dns.getList` result: which nameservers serve the domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nameservers {
    /// Whether the domain uses the vendor's default DNS.
    pub is_default: bool,
    pub hosts: Vec<String>,
}

/// One email-forwarding rule: `mailbox@domain` delivered to `forward_to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailForward {
    pub mailbox: String,
    pub forward_to: String,
}

impl EmailForward {
    #[must_use]
    pub fn new(mailbox: impl Into<String>, forward_to: impl Into<String>) -> Self {
        Self {
            mailbox: mailbox.into(),
            forward_to: forward_to.into(),
        }
    }
}

/// `domains.create` outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResult {
    pub domain: String,
    pub registered: bool,
    pub charged_amount: f64,
    pub domain_id: u64,
    pub order_id: u64,
    pub transaction_id: u64,
    pub whoisguard_enabled: bool,
    pub non_real_time: bool,
}

impl RegistrationResult {
    pub(crate) fn from_entry(entry: &Value) -> Result<Self> {
        Ok(Self {
            domain: envelope::attr(entry, "Domain")
                .ok_or_else(|| ApiError::schema("DomainCreateResult.@Domain"))?
                .to_string(),
            registered: envelope::attr_bool(entry, "Registered"),
            charged_amount: envelope::attr_f64(entry, "ChargedAmount").unwrap_or_default(),
            domain_id: envelope::attr_u64(entry, "DomainID").unwrap_or_default(),
            order_id: envelope::attr_u64(entry, "OrderID").unwrap_or_default(),
            transaction_id: envelope::attr_u64(entry, "TransactionID").unwrap_or_default(),
            whoisguard_enabled: envelope::attr_bool(entry, "WhoisguardEnable"),
            non_real_time: envelope::attr_bool(entry, "NonRealTimeDomain"),
        })
    }
}

/// `domains.renew` outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewalResult {
    pub domain: String,
    pub domain_id: u64,
    pub renewed: bool,
    pub charged_amount: f64,
    pub order_id: u64,
    pub transaction_id: u64,
    pub expires: Option<NaiveDate>,
}

impl RenewalResult {
    pub(crate) fn from_entry(entry: &Value) -> Result<Self> {
        let expires = entry
            .get("DomainDetails")
            .and_then(|d| d.get("ExpiredDate"))
            .and_then(envelope::node_text)
            .and_then(envelope::parse_vendor_date);
        Ok(Self {
            domain: envelope::attr(entry, "DomainName")
                .ok_or_else(|| ApiError::schema("DomainRenewResult.@DomainName"))?
                .to_string(),
            domain_id: envelope::attr_u64(entry, "DomainID").unwrap_or_default(),
            renewed: envelope::attr_bool(entry, "Renew"),
            charged_amount: envelope::attr_f64(entry, "ChargedAmount").unwrap_or_default(),
            order_id: envelope::attr_u64(entry, "OrderID").unwrap_or_default(),
            transaction_id: envelope::attr_u64(entry, "TransactionID").unwrap_or_default(),
            expires,
        })
    }
}
