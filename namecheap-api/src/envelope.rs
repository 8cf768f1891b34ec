//! Vendor envelope handling.
//!
//! Every Namecheap API call answers with the same XML envelope:
//!
//! ```xml
//! <ApiResponse Status="OK">
//!   <Errors/>
//!   <CommandResponse Type="...">
//!     <SomeCommandResult ...attributes.../>
//!   </CommandResponse>
//! </ApiResponse>
//! ```
//!
//! The payload lives almost entirely in XML attributes, and repeated child
//! elements are how the vendor expresses lists. This module flattens the
//! `<CommandResponse>` subtree into a [`serde_json::Value`] tree so the rest
//! of the crate can navigate it uniformly: attributes become `"@Name"` keys,
//! child elements become keys by tag name, repeated tags collapse into
//! arrays, and text-only elements become plain strings (or a `"#text"` key
//! when the element also carries attributes).
//!
//! Everything here is pure: no I/O, no state.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

/// Parse a raw vendor envelope into the flattened `<CommandResponse>` tree.
///
/// `Status="ERROR"` envelopes become [`ApiError::Api`] carrying the first
/// `<Error Number="...">` entry. A well-formed document missing the
/// `CommandResponse` node is a schema error, not a parse error.
pub(crate) fn parse_response(xml: &str) -> Result<Value> {
    let doc = roxmltree::Document::parse(xml).map_err(ApiError::parse)?;
    let root = doc.root_element();

    let status = root.attribute("Status").unwrap_or_default();
    if status.eq_ignore_ascii_case("error") {
        return Err(extract_error(root));
    }

    let command_response = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "CommandResponse")
        .ok_or_else(|| ApiError::schema("CommandResponse"))?;

    Ok(element_to_value(command_response))
}

/// Pull the first `<Errors><Error Number="...">message</Error></Errors>`
/// entry out of an error envelope.
fn extract_error(root: roxmltree::Node<'_, '_>) -> ApiError {
    let error_node = root
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "Error");

    match error_node {
        Some(node) => ApiError::Api {
            number: node.attribute("Number").unwrap_or_default().to_string(),
            message: node.text().unwrap_or("Unknown error").trim().to_string(),
        },
        None => ApiError::Api {
            number: String::new(),
            message: "Unknown error".to_string(),
        },
    }
}

/// Recursively flatten one element.
fn element_to_value(node: roxmltree::Node<'_, '_>) -> Value {
    let mut map = Map::new();

    for attr in node.attributes() {
        map.insert(
            format!("@{}", attr.name()),
            Value::String(attr.value().to_string()),
        );
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        } else if child.is_element() {
            let key = child.tag_name().name().to_string();
            let value = element_to_value(child);
            match map.entry(key) {
                serde_json::map::Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                // Second and later siblings with the same tag: promote to array.
                serde_json::map::Entry::Occupied(mut slot) => match slot.get_mut() {
                    Value::Array(items) => items.push(value),
                    existing => {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                    }
                },
            }
        }
    }

    let text = text.trim();
    if map.is_empty() {
        Value::String(text.to_string())
    } else {
        if !text.is_empty() {
            map.insert("#text".to_string(), Value::String(text.to_string()));
        }
        Value::Object(map)
    }
}

/// Navigate a dotted path through the flattened tree.
///
/// A missing segment yields [`ApiError::Schema`] naming the full path, so a
/// vendor contract change surfaces as one descriptive error instead of a
/// generic lookup failure.
pub(crate) fn resolve_path<'a>(value: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.get(segment).ok_or_else(|| ApiError::schema(path))?;
    }
    Ok(current)
}

/// One-or-many normalization.
///
/// The flattening above cannot know that a single `<host>` element is a
/// one-element list; callers that expect a list pass the node through here.
pub(crate) fn coerce_list(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(single) => vec![single.clone()],
    }
}

// ─── Attribute accessors over flattened entries ────────────

pub(crate) fn attr<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry.get(format!("@{key}")).and_then(Value::as_str)
}

pub(crate) fn attr_string(entry: &Value, key: &str) -> String {
    attr(entry, key).unwrap_or_default().to_string()
}

/// Vendor booleans are the strings `"true"`/`"false"` (and occasionally
/// uppercased). Anything unrecognized reads as `false`.
pub(crate) fn attr_bool(entry: &Value, key: &str) -> bool {
    attr(entry, key).is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

pub(crate) fn attr_u32(entry: &Value, key: &str) -> Option<u32> {
    attr(entry, key).and_then(|v| v.trim().parse().ok())
}

pub(crate) fn attr_u64(entry: &Value, key: &str) -> Option<u64> {
    attr(entry, key).and_then(|v| v.trim().parse().ok())
}

/// Prices arrive as stringly decimals (`"10.98"`). An empty or absent
/// attribute is `None`, not zero.
pub(crate) fn attr_f64(entry: &Value, key: &str) -> Option<f64> {
    attr(entry, key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

/// Vendor dates are `MM/DD/YYYY`.
pub(crate) fn attr_date(entry: &Value, key: &str) -> Option<NaiveDate> {
    attr(entry, key).and_then(parse_vendor_date)
}

pub(crate) fn parse_vendor_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%m/%d/%Y").ok()
}

/// Text content of a flattened node, whether it collapsed to a plain string
/// or kept a `"#text"` key alongside attributes.
pub(crate) fn node_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("#text").and_then(Value::as_str),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_ENVELOPE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <RequestedCommand>namecheap.domains.dns.getHosts</RequestedCommand>
  <CommandResponse Type="namecheap.domains.dns.getHosts">
    <DomainDNSGetHostsResult Domain="example.com" IsUsingOurDNS="true">
      <host HostId="12" Name="@" Type="A" Address="192.0.2.1" MXPref="10" TTL="1799" />
      <host HostId="14" Name="www" Type="CNAME" Address="example.com." MXPref="10" TTL="300" />
    </DomainDNSGetHostsResult>
  </CommandResponse>
  <Server>PHX01APIEXT01</Server>
  <ExecutionTime>0.02</ExecutionTime>
</ApiResponse>"#;

    const ERROR_ENVELOPE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="ERROR" xmlns="http://api.namecheap.com/xml.response">
  <Errors>
    <Error Number="1011102">API Key is invalid or API access has not been enabled</Error>
  </Errors>
  <CommandResponse Type="namecheap.domains.check" />
</ApiResponse>"#;

    #[test]
    fn ok_envelope_flattens_attributes_and_repeated_children() {
        let value = parse_response(OK_ENVELOPE).unwrap();
        let result = resolve_path(&value, "DomainDNSGetHostsResult").unwrap();
        assert_eq!(result["@Domain"], "example.com");
        assert_eq!(result["@IsUsingOurDNS"], "true");

        let hosts = coerce_list(result.get("host"));
        assert_eq!(hosts.len(), 2);
        assert_eq!(attr(&hosts[0], "Name"), Some("@"));
        assert_eq!(attr(&hosts[1], "Type"), Some("CNAME"));
    }

    #[test]
    fn error_envelope_yields_api_error() {
        let err = parse_response(ERROR_ENVELOPE).unwrap_err();
        match err {
            ApiError::Api { number, message } => {
                assert_eq!(number, "1011102");
                assert!(message.starts_with("API Key is invalid"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn error_envelope_without_error_node() {
        let xml = r#"<ApiResponse Status="ERROR"><Errors /></ApiResponse>"#;
        let err = parse_response(xml).unwrap_err();
        match err {
            ApiError::Api { number, message } => {
                assert!(number.is_empty());
                assert_eq!(message, "Unknown error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = parse_response("<ApiResponse Status=\"OK\"").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn missing_command_response_is_a_schema_error() {
        let xml = r#"<ApiResponse Status="OK"><Errors /></ApiResponse>"#;
        let err = parse_response(xml).unwrap_err();
        match err {
            ApiError::Schema { path } => assert_eq!(path, "CommandResponse"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn text_only_element_collapses_to_string() {
        let xml = r#"<ApiResponse Status="OK">
            <CommandResponse><DomainDNSGetListResult>
                <Nameserver>dns1.example.net</Nameserver>
            </DomainDNSGetListResult></CommandResponse>
        </ApiResponse>"#;
        let value = parse_response(xml).unwrap();
        let ns = resolve_path(&value, "DomainDNSGetListResult.Nameserver").unwrap();
        assert_eq!(*ns, "dns1.example.net");
    }

    #[test]
    fn element_with_attributes_and_text_keeps_both() {
        let xml = r#"<ApiResponse Status="OK">
            <CommandResponse><Result>
                <Tld Name="com" IsApiRegisterable="true">Most popular TLD</Tld>
            </Result></CommandResponse>
        </ApiResponse>"#;
        let value = parse_response(xml).unwrap();
        let tld = resolve_path(&value, "Result.Tld").unwrap();
        assert_eq!(attr(tld, "Name"), Some("com"));
        assert_eq!(node_text(tld), Some("Most popular TLD"));
    }

    #[test]
    fn resolve_path_reports_full_path_on_miss() {
        let value = parse_response(OK_ENVELOPE).unwrap();
        let err = resolve_path(&value, "DomainDNSGetHostsResult.NoSuchNode").unwrap_err();
        match err {
            ApiError::Schema { path } => {
                assert_eq!(path, "DomainDNSGetHostsResult.NoSuchNode");
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn coerce_list_single_and_absent() {
        let single = serde_json::json!({"@Name": "x"});
        assert_eq!(coerce_list(Some(&single)).len(), 1);
        assert!(coerce_list(None).is_empty());
        assert!(coerce_list(Some(&Value::Null)).is_empty());

        let many = serde_json::json!([{"@Name": "a"}, {"@Name": "b"}]);
        assert_eq!(coerce_list(Some(&many)).len(), 2);
    }

    #[test]
    fn accessor_parsing() {
        let entry = serde_json::json!({
            "@Available": "TRUE",
            "@Price": "10.98",
            "@Empty": "",
            "@ID": "301214",
            "@Created": "02/15/2024",
        });
        assert!(attr_bool(&entry, "Available"));
        assert!(!attr_bool(&entry, "Missing"));
        assert_eq!(attr_f64(&entry, "Price"), Some(10.98));
        assert_eq!(attr_f64(&entry, "Empty"), None);
        assert_eq!(attr_u64(&entry, "ID"), Some(301_214));
        assert_eq!(
            attr_date(&entry, "Created"),
            NaiveDate::from_ymd_opt(2024, 2, 15)
        );
    }
}
