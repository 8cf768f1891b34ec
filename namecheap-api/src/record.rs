//! DNS record model and the fluent record-set builder.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope;
use crate::error::{ApiError, Result};

/// Lowest TTL the vendor accepts.
pub const MIN_TTL: u32 = 60;
/// Highest TTL the vendor accepts.
pub const MAX_TTL: u32 = 86_400;
/// Vendor default ("automatic") TTL.
pub const DEFAULT_TTL: u32 = 1799;

/// The record types the vendor stores.
///
/// This is a closed set: the hosted-DNS service rejects anything else, so the
/// library does too, at parse time rather than after a round trip. `URL301`,
/// `FRAME` and `URL` are redirect pseudo-records, not DNS RRtypes, but the
/// vendor stores them in the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
    #[serde(rename = "ALIAS")]
    Alias,
    #[serde(rename = "CAA")]
    Caa,
    #[serde(rename = "CNAME")]
    Cname,
    #[serde(rename = "MX")]
    Mx,
    #[serde(rename = "MXE")]
    Mxe,
    #[serde(rename = "NS")]
    Ns,
    #[serde(rename = "SRV")]
    Srv,
    #[serde(rename = "TXT")]
    Txt,
    #[serde(rename = "URL301")]
    Url301,
    #[serde(rename = "FRAME")]
    Frame,
    #[serde(rename = "URL")]
    Url,
}

impl RecordType {
    /// The vendor's wire spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Alias => "ALIAS",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Mxe => "MXE",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Url301 => "URL301",
            Self::Frame => "FRAME",
            Self::Url => "URL",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "ALIAS" => Ok(Self::Alias),
            "CAA" => Ok(Self::Caa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "MXE" => Ok(Self::Mxe),
            "NS" => Ok(Self::Ns),
            "SRV" => Ok(Self::Srv),
            "TXT" => Ok(Self::Txt),
            "URL301" => Ok(Self::Url301),
            "FRAME" => Ok(Self::Frame),
            "URL" => Ok(Self::Url),
            other => Err(ApiError::validation(format!(
                "unsupported record type '{other}'"
            ))),
        }
    }
}

/// How a redirect record should behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// Permanent HTTP 301 redirect (`URL301`).
    Permanent,
    /// Masked frame redirect (`FRAME`).
    Masked,
}

impl RedirectKind {
    fn record_type(self) -> RecordType {
        match self {
            Self::Permanent => RecordType::Url301,
            Self::Masked => RecordType::Frame,
        }
    }
}

/// One host record, as stored by the vendor.
///
/// `name` is relative to the zone; the apex is `"@"`. `priority` is only
/// meaningful for MX and MXE records — for SRV the priority is part of
/// `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub value: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl DnsRecord {
    /// Create a record, clamping the TTL into the vendor-accepted
    /// [`MIN_TTL`]..=[`MAX_TTL`] range.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        value: impl Into<String>,
        ttl: u32,
        priority: Option<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            value: value.into(),
            ttl: ttl.clamp(MIN_TTL, MAX_TTL),
            priority,
        }
    }

    /// Project a record out of a flattened `<host>` entry from
    /// `domains.dns.getHosts`.
    pub(crate) fn from_host_entry(entry: &Value) -> Result<Self> {
        let name = envelope::attr(entry, "Name")
            .filter(|n| !n.is_empty())
            .unwrap_or("@")
            .to_string();
        let record_type: RecordType = envelope::attr(entry, "Type")
            .ok_or_else(|| ApiError::schema("host.@Type"))?
            .parse()?;
        let value = envelope::attr(entry, "Address")
            .ok_or_else(|| ApiError::schema("host.@Address"))?
            .to_string();
        let ttl = envelope::attr_u32(entry, "TTL").unwrap_or(DEFAULT_TTL);
        // The vendor reports MXPref="10" on every record; it only means
        // anything for the mail types.
        let priority = if matches!(record_type, RecordType::Mx | RecordType::Mxe) {
            envelope::attr_u32(entry, "MXPref")
        } else {
            None
        };
        Ok(Self::new(name, record_type, value, ttl, priority))
    }

    /// Reject combinations the vendor's shared record table cannot hold.
    /// Every write path runs this before anything goes on the wire.
    pub fn validate(&self) -> Result<()> {
        if self.record_type == RecordType::Cname && (self.name.is_empty() || self.name == "@") {
            return Err(ApiError::validation(
                "CNAME records cannot be used at the zone apex ('@'); use ALIAS instead",
            ));
        }
        Ok(())
    }
}

/// Fluent accumulator for building a record set to pass to
/// [`set`](crate::api::DnsApi::set).
///
/// Methods take and return the builder by value so chains read naturally;
/// the only fallible step is [`cname`](Self::cname), which rejects a CNAME
/// at the zone apex before anything is sent:
///
/// ```no_run
/// # use namecheap_api::{RecordBuilder, Result};
/// # fn demo() -> Result<Vec<namecheap_api::DnsRecord>> {
/// let records = RecordBuilder::new()
///     .a("@", "192.0.2.1", None)
///     .cname("www", "example.com.", None)?
///     .mx("@", "mail.example.com.", None, None)
///     .build();
/// # Ok(records)
/// # }
/// ```
///
/// Insertion order is preserved through [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RecordBuilder {
    records: Vec<DnsRecord>,
}

impl RecordBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, record: DnsRecord) -> Self {
        self.records.push(record);
        self
    }

    /// IPv4 address record.
    #[must_use]
    pub fn a(self, name: &str, address: &str, ttl: Option<u32>) -> Self {
        self.push(DnsRecord::new(
            name,
            RecordType::A,
            address,
            ttl.unwrap_or(DEFAULT_TTL),
            None,
        ))
    }

    /// IPv6 address record.
    #[must_use]
    pub fn aaaa(self, name: &str, address: &str, ttl: Option<u32>) -> Self {
        self.push(DnsRecord::new(
            name,
            RecordType::Aaaa,
            address,
            ttl.unwrap_or(DEFAULT_TTL),
            None,
        ))
    }

    /// CNAME-like record the vendor flattens at resolution time, so it is
    /// legal at the apex.
    #[must_use]
    pub fn alias(self, name: &str, target: &str, ttl: Option<u32>) -> Self {
        self.push(DnsRecord::new(
            name,
            RecordType::Alias,
            target,
            ttl.unwrap_or(DEFAULT_TTL),
            None,
        ))
    }

    /// Canonical-name record. A CNAME at the zone apex would shadow the
    /// zone's SOA/NS set, so `"@"` (or an empty name) is rejected here.
    pub fn cname(self, name: &str, target: &str, ttl: Option<u32>) -> Result<Self> {
        let record = DnsRecord::new(
            name,
            RecordType::Cname,
            target,
            ttl.unwrap_or(DEFAULT_TTL),
            None,
        );
        record.validate()?;
        Ok(self.push(record))
    }

    /// Mail-exchanger record. Priority defaults to 10.
    #[must_use]
    pub fn mx(self, name: &str, mail_server: &str, priority: Option<u32>, ttl: Option<u32>) -> Self {
        self.push(DnsRecord::new(
            name,
            RecordType::Mx,
            mail_server,
            ttl.unwrap_or(DEFAULT_TTL),
            Some(priority.unwrap_or(10)),
        ))
    }

    /// Mail-easy record (vendor-specific MX-by-IP). Priority defaults to 10,
    /// like [`mx`](Self::mx).
    #[must_use]
    pub fn mxe(self, name: &str, address: &str, priority: Option<u32>, ttl: Option<u32>) -> Self {
        self.push(DnsRecord::new(
            name,
            RecordType::Mxe,
            address,
            ttl.unwrap_or(DEFAULT_TTL),
            Some(priority.unwrap_or(10)),
        ))
    }

    /// Nameserver delegation record.
    #[must_use]
    pub fn ns(self, name: &str, nameserver: &str, ttl: Option<u32>) -> Self {
        self.push(DnsRecord::new(
            name,
            RecordType::Ns,
            nameserver,
            ttl.unwrap_or(DEFAULT_TTL),
            None,
        ))
    }

    /// Text record.
    #[must_use]
    pub fn txt(self, name: &str, text: &str, ttl: Option<u32>) -> Self {
        self.push(DnsRecord::new(
            name,
            RecordType::Txt,
            text,
            ttl.unwrap_or(DEFAULT_TTL),
            None,
        ))
    }

    /// Service record. The vendor expects the whole RDATA in the value
    /// field, so this encodes `"{priority} {weight} {port} {target}"` and
    /// leaves the record's priority field unset.
    #[must_use]
    pub fn srv(
        self,
        name: &str,
        priority: u32,
        weight: u32,
        port: u16,
        target: &str,
        ttl: Option<u32>,
    ) -> Self {
        self.push(DnsRecord::new(
            name,
            RecordType::Srv,
            format!("{priority} {weight} {port} {target}"),
            ttl.unwrap_or(DEFAULT_TTL),
            None,
        ))
    }

    /// Certification-authority-authorization record, encoded as
    /// `{flags} {tag} "{target}"`.
    #[must_use]
    pub fn caa(self, name: &str, flags: u8, tag: &str, target: &str, ttl: Option<u32>) -> Self {
        self.push(DnsRecord::new(
            name,
            RecordType::Caa,
            format!("{flags} {tag} \"{target}\""),
            ttl.unwrap_or(DEFAULT_TTL),
            None,
        ))
    }

    /// HTTP redirect pseudo-record.
    #[must_use]
    pub fn url(self, name: &str, target: &str, kind: RedirectKind, ttl: Option<u32>) -> Self {
        self.push(DnsRecord::new(
            name,
            kind.record_type(),
            target,
            ttl.unwrap_or(DEFAULT_TTL),
            None,
        ))
    }

    /// Append an already-constructed record, e.g. one read back from
    /// [`get`](crate::api::DnsApi::get).
    #[must_use]
    pub fn record(self, record: DnsRecord) -> Self {
        self.push(record)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the builder, yielding records in insertion order.
    #[must_use]
    pub fn build(self) -> Vec<DnsRecord> {
        self.records
    }
}

impl From<RecordBuilder> for Vec<DnsRecord> {
    fn from(builder: RecordBuilder) -> Self {
        builder.build()
    }
}
