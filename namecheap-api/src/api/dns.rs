//! Hosted-DNS record, nameserver and email-forwarding operations
//! (`namecheap.domains.dns.*`).

use crate::client::NamecheapClient;
use crate::domain_name::split_domain;
use crate::envelope;
use crate::error::{ApiError, Result};
use crate::record::{DnsRecord, RecordType};
use crate::types::{EmailForward, Nameservers};

use super::ensure_acknowledged;

/// Criteria for [`DnsApi::delete`]. All set fields must match (conjunctive);
/// an empty filter matches every record.
#[derive(Debug, Clone, Default)]
pub struct DeleteFilter {
    pub name: Option<String>,
    pub record_type: Option<RecordType>,
    pub value: Option<String>,
}

impl DeleteFilter {
    fn matches(&self, record: &DnsRecord) -> bool {
        self.name.as_deref().is_none_or(|n| n == record.name)
            && self
                .record_type
                .is_none_or(|t| t == record.record_type)
            && self.value.as_deref().is_none_or(|v| v == record.value)
    }
}

/// DNS operations for domains using the vendor's hosted DNS.
///
/// The vendor has no per-record mutation: `setHosts` always replaces the
/// whole record set. [`add`](Self::add) and [`delete`](Self::delete) are
/// read-merge-write conveniences on top of that, so they are not atomic
/// against concurrent writers.
pub struct DnsApi<'a> {
    client: &'a NamecheapClient,
}

impl<'a> DnsApi<'a> {
    pub(crate) fn new(client: &'a NamecheapClient) -> Self {
        Self { client }
    }

    /// Fetch all host records for a domain.
    pub async fn get(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let (sld, tld) = split_domain(domain)?;
        let response = self
            .client
            .request(
                "namecheap.domains.dns.getHosts",
                &[("SLD".into(), sld), ("TLD".into(), tld)],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainDNSGetHostsResult")?;
        envelope::coerce_list(result.get("host"))
            .iter()
            .map(DnsRecord::from_host_entry)
            .collect()
    }

    /// Replace the domain's entire record set. Every record is validated
    /// locally first; an invalid one fails the call before any write.
    pub async fn set(&self, domain: &str, records: impl Into<Vec<DnsRecord>>) -> Result<()> {
        let records = records.into();
        for record in &records {
            record.validate()?;
        }
        let (sld, tld) = split_domain(domain)?;
        let mut params = vec![("SLD".to_string(), sld), ("TLD".to_string(), tld)];
        push_host_params(&records, &mut params);

        let response = self
            .client
            .request("namecheap.domains.dns.setHosts", &params)
            .await?;
        let result = envelope::resolve_path(&response, "DomainDNSSetHostsResult")?;
        ensure_acknowledged(result, "IsSuccess", "DNS record update")
    }

    /// Add one record, keeping everything else.
    ///
    /// An exact (name, type, value) duplicate makes this a successful no-op
    /// with no write issued, so re-running provisioning scripts is safe.
    pub async fn add(&self, domain: &str, record: DnsRecord) -> Result<()> {
        record.validate()?;
        let mut existing = self.get(domain).await?;
        let duplicate = existing.iter().any(|r| {
            r.name == record.name && r.record_type == record.record_type && r.value == record.value
        });
        if duplicate {
            log::debug!(
                "{} {} already present on {domain}, skipping write",
                record.record_type,
                record.name
            );
            return Ok(());
        }
        existing.push(record);
        self.set(domain, existing).await
    }

    /// Delete every record matching the filter, returning how many went.
    ///
    /// When nothing matches, no write is issued at all.
    pub async fn delete(&self, domain: &str, filter: &DeleteFilter) -> Result<usize> {
        let existing = self.get(domain).await?;
        let before = existing.len();
        let kept: Vec<DnsRecord> = existing
            .into_iter()
            .filter(|r| !filter.matches(r))
            .collect();
        let deleted = before - kept.len();
        if deleted > 0 {
            self.set(domain, kept).await?;
        }
        Ok(deleted)
    }

    /// Which nameservers currently serve the domain.
    pub async fn get_nameservers(&self, domain: &str) -> Result<Nameservers> {
        let (sld, tld) = split_domain(domain)?;
        let response = self
            .client
            .request(
                "namecheap.domains.dns.getList",
                &[("SLD".into(), sld), ("TLD".into(), tld)],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainDNSGetListResult")?;
        let hosts = envelope::coerce_list(result.get("Nameserver"))
            .iter()
            .filter_map(|v| envelope::node_text(v).map(ToString::to_string))
            .collect();
        Ok(Nameservers {
            is_default: envelope::attr_bool(result, "IsUsingOurDNS"),
            hosts,
        })
    }

    /// Point the domain at custom nameservers (1 to 5 hosts).
    pub async fn set_custom_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()> {
        if nameservers.is_empty() || nameservers.len() > 5 {
            return Err(ApiError::validation(format!(
                "expected between 1 and 5 nameservers, got {}",
                nameservers.len()
            )));
        }
        let (sld, tld) = split_domain(domain)?;
        let response = self
            .client
            .request(
                "namecheap.domains.dns.setCustom",
                &[
                    ("SLD".into(), sld),
                    ("TLD".into(), tld),
                    ("Nameservers".into(), nameservers.join(",")),
                ],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainDNSSetCustomResult")?;
        ensure_acknowledged(result, "Updated", "nameserver update")
    }

    /// Switch the domain back to the vendor's default DNS.
    pub async fn set_default_nameservers(&self, domain: &str) -> Result<()> {
        let (sld, tld) = split_domain(domain)?;
        let response = self
            .client
            .request(
                "namecheap.domains.dns.setDefault",
                &[("SLD".into(), sld), ("TLD".into(), tld)],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainDNSSetDefaultResult")?;
        ensure_acknowledged(result, "Updated", "nameserver reset")
    }

    /// Current email-forwarding rules.
    pub async fn get_email_forwarding(&self, domain: &str) -> Result<Vec<EmailForward>> {
        let response = self
            .client
            .request(
                "namecheap.domains.dns.getEmailForwarding",
                &[("DomainName".into(), domain.to_string())],
            )
            .await?;
        let result = envelope::resolve_path(&response, "DomainDNSGetEmailForwardingResult")?;
        Ok(envelope::coerce_list(result.get("Forward"))
            .iter()
            .map(|entry| EmailForward {
                // The forward target is the element text; the mailbox is a
                // lowercase attribute, unlike everything else in this API.
                mailbox: envelope::attr_string(entry, "mailbox"),
                forward_to: envelope::node_text(entry).unwrap_or_default().to_string(),
            })
            .collect())
    }

    /// Replace all email-forwarding rules. An empty rule list is rejected
    /// locally; use the vendor dashboard to turn forwarding off entirely.
    pub async fn set_email_forwarding(
        &self,
        domain: &str,
        rules: &[EmailForward],
    ) -> Result<()> {
        if rules.is_empty() {
            return Err(ApiError::validation(
                "at least one forwarding rule is required",
            ));
        }
        let mut params = vec![("DomainName".to_string(), domain.to_string())];
        for (i, rule) in rules.iter().enumerate() {
            let n = i + 1;
            params.push((format!("MailBox{n}"), rule.mailbox.clone()));
            params.push((format!("ForwardTo{n}"), rule.forward_to.clone()));
        }
        let response = self
            .client
            .request("namecheap.domains.dns.setEmailForwarding", &params)
            .await?;
        let result = envelope::resolve_path(&response, "DomainDNSSetEmailForwardingResult")?;
        ensure_acknowledged(result, "IsSuccess", "email forwarding update")
    }
}

/// Serialize records as the vendor's 1-based numbered parameters.
///
/// `MXPref{i}` is only sent for MX records; the vendor ignores it elsewhere
/// but echoes it back, which would make read-modify-write cycles noisy.
fn push_host_params(records: &[DnsRecord], params: &mut Vec<(String, String)>) {
    for (i, record) in records.iter().enumerate() {
        let n = i + 1;
        params.push((format!("HostName{n}"), record.name.clone()));
        params.push((
            format!("RecordType{n}"),
            record.record_type.as_str().to_string(),
        ));
        params.push((format!("Address{n}"), record.value.clone()));
        params.push((format!("TTL{n}"), record.ttl.to_string()));
        if record.record_type == RecordType::Mx {
            if let Some(priority) = record.priority {
                params.push((format!("MXPref{n}"), priority.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordBuilder;

    fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn host_params_are_one_based_and_ordered() {
        let records = RecordBuilder::new()
            .a("@", "192.0.2.1", Some(300))
            .cname("www", "example.com.", None)
            .unwrap()
            .build();
        let mut params = Vec::new();
        push_host_params(&records, &mut params);

        assert_eq!(lookup(&params, "HostName1"), Some("@"));
        assert_eq!(lookup(&params, "RecordType1"), Some("A"));
        assert_eq!(lookup(&params, "Address1"), Some("192.0.2.1"));
        assert_eq!(lookup(&params, "TTL1"), Some("300"));
        assert_eq!(lookup(&params, "HostName2"), Some("www"));
        assert_eq!(lookup(&params, "RecordType2"), Some("CNAME"));
        assert_eq!(lookup(&params, "HostName0"), None);
    }

    #[test]
    fn mxpref_only_sent_for_mx() {
        let records = RecordBuilder::new()
            .a("@", "192.0.2.1", None)
            .mx("@", "mail.example.com.", Some(20), None)
            .mxe("mail", "192.0.2.25", Some(15), None)
            .build();
        let mut params = Vec::new();
        push_host_params(&records, &mut params);

        assert_eq!(lookup(&params, "MXPref1"), None);
        assert_eq!(lookup(&params, "MXPref2"), Some("20"));
        // MXE keeps its priority locally but never serializes it.
        assert_eq!(records[2].priority, Some(15));
        assert_eq!(lookup(&params, "MXPref3"), None);
    }

    #[test]
    fn delete_filter_is_conjunctive() {
        let record = DnsRecord::new("www", RecordType::A, "192.0.2.1", 300, None);

        let name_only = DeleteFilter {
            name: Some("www".into()),
            ..DeleteFilter::default()
        };
        assert!(name_only.matches(&record));

        let wrong_type = DeleteFilter {
            name: Some("www".into()),
            record_type: Some(RecordType::Cname),
            ..DeleteFilter::default()
        };
        assert!(!wrong_type.matches(&record));

        let full = DeleteFilter {
            name: Some("www".into()),
            record_type: Some(RecordType::A),
            value: Some("192.0.2.1".into()),
        };
        assert!(full.matches(&record));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let record = DnsRecord::new("@", RecordType::Txt, "v=spf1 -all", 1799, None);
        assert!(DeleteFilter::default().matches(&record));
    }
}
