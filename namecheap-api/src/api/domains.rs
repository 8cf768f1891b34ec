//! Domain registration and lookup operations (`namecheap.domains.*`).

use crate::client::NamecheapClient;
use crate::domain_name::split_domain;
use crate::envelope;
use crate::error::{ApiError, Result};
use crate::types::{
    Contact, Domain, DomainCheck, DomainContacts, DomainInfo, ProductPrice, RegistrationResult,
    RenewalResult, Tld,
};

use super::ensure_acknowledged;
use super::users::UsersApi;

const CONTACT_ROLES: [&str; 4] = ["Registrant", "Tech", "Admin", "AuxBilling"];
const MAX_PAGE_SIZE: u32 = 100;
const MAX_NAMESERVERS: usize = 5;

/// Options for [`DomainsApi::register`].
///
/// `contact` is replicated across all four vendor contact roles; when it is
/// `None` the account's default contact profile applies.
#[derive(Debug, Clone)]
pub struct RegisterOptions {
    pub years: u32,
    pub contact: Option<Contact>,
    pub nameservers: Vec<String>,
    pub whois_protection: bool,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self {
            years: 1,
            contact: None,
            nameservers: Vec::new(),
            whois_protection: true,
        }
    }
}

/// Domain registration, lookup and contact operations.
pub struct DomainsApi<'a> {
    client: &'a NamecheapClient,
}

impl<'a> DomainsApi<'a> {
    pub(crate) fn new(client: &'a NamecheapClient) -> Self {
        Self { client }
    }

    /// Check availability of one or more domains.
    ///
    /// With `include_pricing`, available domains get 1-year registration
    /// prices attached, fetched once per distinct public suffix. A failed
    /// price lookup never fails the check: those domains just come back
    /// priced `None`, with a warning logged.
    pub async fn check(&self, domains: &[&str], include_pricing: bool) -> Result<Vec<DomainCheck>> {
        if domains.is_empty() {
            return Ok(Vec::new());
        }
        let response = self
            .client
            .request(
                "namecheap.domains.check",
                &[("DomainList".into(), domains.join(","))],
            )
            .await?;
        let mut checks: Vec<DomainCheck> = envelope::coerce_list(response.get("DomainCheckResult"))
            .iter()
            .map(DomainCheck::from_entry)
            .collect::<Result<_>>()?;

        if include_pricing {
            self.attach_pricing(&mut checks).await;
        }
        Ok(checks)
    }

    /// One pricing query per distinct suffix among the available, unpriced
    /// results. Sequential on purpose.
    async fn attach_pricing(&self, checks: &mut [DomainCheck]) {
        for tld in pricing_suffixes(checks) {
            match self.one_year_register_price(&tld).await {
                Ok(Some(price)) => apply_tld_price(checks, &tld, &price),
                Ok(None) => {}
                Err(e) => log::warn!("could not fetch pricing for .{tld}: {e}"),
            }
        }
    }

    async fn one_year_register_price(&self, tld: &str) -> Result<Option<ProductPrice>> {
        let prices = UsersApi::new(self.client)
            .get_pricing("DOMAIN", "REGISTER", Some(tld))
            .await?;
        Ok(prices
            .into_iter()
            .find(|p| p.product.eq_ignore_ascii_case(tld) && p.duration == 1))
    }

    /// List domains in the account, one page at a time. Page size is capped
    /// at the vendor maximum of 100.
    pub async fn list(&self, page: u32, page_size: u32) -> Result<Vec<Domain>> {
        let response = self
            .client
            .request(
                "namecheap.domains.getList",
                &[
                    ("Page".into(), page.max(1).to_string()),
                    ("PageSize".into(), page_size.min(MAX_PAGE_SIZE).to_string()),
                ],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainGetListResult")?;
        envelope::coerce_list(result.get("Domain"))
            .iter()
            .map(Domain::from_entry)
            .collect()
    }

    /// Detailed status for one domain.
    pub async fn get_info(&self, domain: &str) -> Result<DomainInfo> {
        let response = self
            .client
            .request(
                "namecheap.domains.getInfo",
                &[("DomainName".into(), domain.to_string())],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainGetInfoResult")?;
        DomainInfo::from_entry(result)
    }

    /// The four contact roles registered for a domain.
    pub async fn get_contacts(&self, domain: &str) -> Result<DomainContacts> {
        let response = self
            .client
            .request(
                "namecheap.domains.getContacts",
                &[("DomainName".into(), domain.to_string())],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainContactsResult")?;
        Ok(DomainContacts::from_entry(result))
    }

    /// All TLDs the vendor supports, with their API capabilities. This
    /// response is large and changes rarely; callers doing repeated lookups
    /// should hold on to it.
    pub async fn get_tld_list(&self) -> Result<Vec<Tld>> {
        let response = self
            .client
            .request("namecheap.domains.getTldList", &[])
            .await?;
        let result = envelope::resolve_path(&response, "Tlds")?;
        envelope::coerce_list(result.get("Tld"))
            .iter()
            .map(Tld::from_entry)
            .collect()
    }

    /// Register a new domain.
    pub async fn register(
        &self,
        domain: &str,
        options: &RegisterOptions,
    ) -> Result<RegistrationResult> {
        if options.nameservers.len() > MAX_NAMESERVERS {
            return Err(ApiError::validation(format!(
                "at most {MAX_NAMESERVERS} nameservers are supported, got {}",
                options.nameservers.len()
            )));
        }
        let protection = if options.whois_protection { "yes" } else { "no" };
        let mut params = vec![
            ("DomainName".to_string(), domain.to_string()),
            ("Years".to_string(), options.years.to_string()),
            ("AddFreeWhoisguard".to_string(), protection.to_string()),
            ("WGEnabled".to_string(), protection.to_string()),
        ];
        if let Some(contact) = &options.contact {
            for role in CONTACT_ROLES {
                contact.push_params(role, &mut params);
            }
        }
        if !options.nameservers.is_empty() {
            params.push(("Nameservers".to_string(), options.nameservers.join(",")));
        }

        let response = self
            .client
            .request("namecheap.domains.create", &params)
            .await?;
        let result = envelope::resolve_path(&response, "DomainCreateResult")?;
        RegistrationResult::from_entry(result)
    }

    /// Renew an existing domain.
    pub async fn renew(&self, domain: &str, years: u32) -> Result<RenewalResult> {
        let response = self
            .client
            .request(
                "namecheap.domains.renew",
                &[
                    ("DomainName".into(), domain.to_string()),
                    ("Years".into(), years.to_string()),
                ],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainRenewResult")?;
        RenewalResult::from_entry(result)
    }

    /// Replace the contact information on a domain, using the same contact
    /// for all four roles.
    pub async fn set_contacts(&self, domain: &str, contact: &Contact) -> Result<()> {
        let (sld, tld) = split_domain(domain)?;
        let mut params = vec![("SLD".to_string(), sld), ("TLD".to_string(), tld)];
        for role in CONTACT_ROLES {
            contact.push_params(role, &mut params);
        }
        let response = self
            .client
            .request("namecheap.domains.setContacts", &params)
            .await?;
        let result = envelope::resolve_path(&response, "DomainSetContactResult")?;
        ensure_acknowledged(result, "IsSuccess", "contact update")
    }

    /// Lock the domain against transfers.
    pub async fn lock(&self, domain: &str) -> Result<()> {
        self.set_registrar_lock(domain, "LOCK").await
    }

    /// Unlock the domain for transfer.
    pub async fn unlock(&self, domain: &str) -> Result<()> {
        self.set_registrar_lock(domain, "UNLOCK").await
    }

    async fn set_registrar_lock(&self, domain: &str, action: &str) -> Result<()> {
        let response = self
            .client
            .request(
                "namecheap.domains.setRegistrarLock",
                &[
                    ("DomainName".into(), domain.to_string()),
                    ("LockAction".into(), action.to_string()),
                ],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainSetRegistrarLockResult")?;
        ensure_acknowledged(result, "IsSuccess", "registrar lock change")
    }
}

/// Distinct public suffixes among the available results still missing a
/// price, in first-seen order. One pricing query goes out per entry.
fn pricing_suffixes(checks: &[DomainCheck]) -> Vec<String> {
    let mut suffixes: Vec<String> = Vec::new();
    for check in checks {
        if !(check.available && check.your_price.is_none()) {
            continue;
        }
        if let Ok((_, tld)) = split_domain(&check.domain) {
            if !suffixes.contains(&tld) {
                suffixes.push(tld);
            }
        }
    }
    suffixes
}

/// Fold one TLD's registration price into every available check under that
/// suffix. Other suffixes are untouched, so a lookup that failed for one TLD
/// still leaves the rest of the batch priced.
fn apply_tld_price(checks: &mut [DomainCheck], tld: &str, price: &ProductPrice) {
    for check in checks.iter_mut() {
        let same_tld = split_domain(&check.domain).is_ok_and(|(_, t)| t == tld);
        if check.available && same_tld {
            check.regular_price = price.regular_price;
            check.your_price = price.your_price.or(price.price);
            check.retail_price = price.retail_price;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(domain: &str, available: bool) -> DomainCheck {
        DomainCheck {
            domain: domain.to_string(),
            available,
            premium: false,
            premium_registration_price: None,
            regular_price: None,
            your_price: None,
            retail_price: None,
        }
    }

    fn com_price(your_price: Option<f64>, price: Option<f64>) -> ProductPrice {
        ProductPrice {
            product: "com".to_string(),
            duration: 1,
            duration_type: "YEAR".to_string(),
            price,
            regular_price: Some(10.98),
            your_price,
            retail_price: Some(12.98),
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn register_options_default_to_one_protected_year() {
        let options = RegisterOptions::default();
        assert_eq!(options.years, 1);
        assert!(options.whois_protection);
        assert!(options.contact.is_none());
        assert!(options.nameservers.is_empty());
    }

    #[test]
    fn one_pricing_query_per_distinct_suffix() {
        let checks = vec![
            check("a.com", true),
            check("b.com", true),
            check("c.io", true),
        ];
        assert_eq!(pricing_suffixes(&checks), vec!["com", "io"]);
    }

    #[test]
    fn priced_and_unavailable_checks_need_no_query() {
        let mut already_priced = check("a.com", true);
        already_priced.your_price = Some(6.98);
        let checks = vec![already_priced, check("taken.net", false)];
        assert!(pricing_suffixes(&checks).is_empty());
    }

    #[test]
    fn failed_suffix_lookup_leaves_other_suffixes_priced() {
        let mut checks = vec![
            check("a.com", true),
            check("b.com", true),
            check("c.io", true),
        ];
        // The .io lookup failed upstream, so only the .com price arrives.
        apply_tld_price(&mut checks, "com", &com_price(Some(6.98), None));

        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].your_price, Some(6.98));
        assert_eq!(checks[0].regular_price, Some(10.98));
        assert_eq!(checks[1].your_price, Some(6.98));
        assert_eq!(checks[2].your_price, None);
        assert_eq!(checks[2].regular_price, None);
    }

    #[test]
    fn price_only_attaches_to_available_checks() {
        let mut checks = vec![check("a.com", true), check("taken.com", false)];
        apply_tld_price(&mut checks, "com", &com_price(Some(6.98), None));
        assert_eq!(checks[0].your_price, Some(6.98));
        assert_eq!(checks[1].your_price, None);
    }

    #[test]
    fn your_price_falls_back_to_list_price() {
        let mut checks = vec![check("a.com", true)];
        apply_tld_price(&mut checks, "com", &com_price(None, Some(8.48)));
        assert_eq!(checks[0].your_price, Some(8.48));
    }
}
