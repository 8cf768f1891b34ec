//! `dns` command group.

use chrono::Utc;
use namecheap_api::{DeleteFilter, DnsRecord, EmailForward, RecordType};
use serde_json::json;

use crate::cli::{DnsCommand, ExportFormat};
use crate::output::{self, confirm};

use super::Ctx;

fn record_rows(records: &[DnsRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.record_type.to_string(),
                r.name.clone(),
                r.value.clone(),
                r.ttl.to_string(),
                r.priority.map_or_else(|| "-".to_string(), |p| p.to_string()),
            ]
        })
        .collect()
}

const RECORD_HEADERS: [&str; 5] = ["TYPE", "NAME", "VALUE", "TTL", "PRIORITY"];

/// Parse a `mailbox=destination` rule argument.
fn parse_forward_rule(raw: &str) -> anyhow::Result<EmailForward> {
    let (mailbox, forward_to) = raw.split_once('=').ok_or_else(|| {
        anyhow::anyhow!("invalid rule '{raw}': expected mailbox=destination, e.g. info=me@example.net")
    })?;
    if mailbox.is_empty() || forward_to.is_empty() {
        anyhow::bail!("invalid rule '{raw}': mailbox and destination must be non-empty");
    }
    Ok(EmailForward::new(mailbox, forward_to))
}

pub async fn run(ctx: &Ctx, cmd: DnsCommand) -> anyhow::Result<()> {
    match cmd {
        DnsCommand::List {
            domain,
            record_type,
            name,
        } => {
            let type_filter = record_type
                .as_deref()
                .map(str::parse::<RecordType>)
                .transpose()?;
            let mut records = ctx.client.dns().get(&domain).await?;
            if let Some(t) = type_filter {
                records.retain(|r| r.record_type == t);
            }
            if let Some(n) = &name {
                records.retain(|r| &r.name == n);
            }
            output::print(ctx.format, &RECORD_HEADERS, &record_rows(&records), &records)
        }
        DnsCommand::Add {
            domain,
            record_type,
            name,
            value,
            ttl,
            priority,
        } => {
            let record_type: RecordType = record_type.parse()?;
            let priority = match record_type {
                RecordType::Mx | RecordType::Mxe => Some(priority.unwrap_or(10)),
                _ => None,
            };
            let record = DnsRecord::new(name, record_type, value, ttl, priority);
            ctx.client.dns().add(&domain, record.clone()).await?;
            if !ctx.quiet {
                output::print(ctx.format, &RECORD_HEADERS, &record_rows(&[record.clone()]), &record)?;
            }
            Ok(())
        }
        DnsCommand::Delete {
            domain,
            record_type,
            name,
            value,
            all,
            yes,
        } => {
            let filter = DeleteFilter {
                name,
                record_type: record_type
                    .as_deref()
                    .map(str::parse::<RecordType>)
                    .transpose()?,
                value,
            };
            let unfiltered = filter.name.is_none()
                && filter.record_type.is_none()
                && filter.value.is_none();
            if unfiltered && !all {
                anyhow::bail!(
                    "refusing to delete every record; pass --all if that is really what you want"
                );
            }
            if !yes {
                let scope = if unfiltered {
                    "ALL records".to_string()
                } else {
                    "matching records".to_string()
                };
                if !confirm(&format!("Delete {scope} on {domain}?"))? {
                    anyhow::bail!("cancelled");
                }
            }
            let deleted = ctx.client.dns().delete(&domain, &filter).await?;
            if !ctx.quiet {
                println!("{deleted} record(s) deleted");
            }
            Ok(())
        }
        DnsCommand::Nameservers { domain } => {
            let ns = ctx.client.dns().get_nameservers(&domain).await?;
            let rows: Vec<Vec<String>> = ns
                .hosts
                .iter()
                .map(|h| vec![h.clone(), if ns.is_default { "default" } else { "custom" }.to_string()])
                .collect();
            output::print(ctx.format, &["NAMESERVER", "SOURCE"], &rows, &ns)
        }
        DnsCommand::SetNameservers {
            domain,
            nameservers,
            yes,
        } => {
            if !yes
                && !confirm(&format!(
                    "Point {domain} at {}?",
                    nameservers.join(", ")
                ))?
            {
                anyhow::bail!("cancelled");
            }
            ctx.client
                .dns()
                .set_custom_nameservers(&domain, &nameservers)
                .await?;
            if !ctx.quiet {
                println!("nameservers updated for {domain}");
            }
            Ok(())
        }
        DnsCommand::ResetNameservers { domain, yes } => {
            if !yes && !confirm(&format!("Reset {domain} to default DNS?"))? {
                anyhow::bail!("cancelled");
            }
            ctx.client.dns().set_default_nameservers(&domain).await?;
            if !ctx.quiet {
                println!("{domain} now uses default DNS");
            }
            Ok(())
        }
        DnsCommand::Export { domain, format } => {
            let records = ctx.client.dns().get(&domain).await?;
            match format {
                ExportFormat::Bind => {
                    let stamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
                    println!("{}", output::bind_zone(&domain, &records, &stamp));
                }
                ExportFormat::Yaml => {
                    print!(
                        "{}",
                        serde_yaml::to_string(&json!({ "domain": domain, "records": records }))?
                    );
                }
                ExportFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(
                            &json!({ "domain": domain, "records": records })
                        )?
                    );
                }
            }
            Ok(())
        }
        DnsCommand::EmailForwarding { domain } => {
            let rules = ctx.client.dns().get_email_forwarding(&domain).await?;
            let rows: Vec<Vec<String>> = rules
                .iter()
                .map(|r| vec![format!("{}@{domain}", r.mailbox), r.forward_to.clone()])
                .collect();
            output::print(ctx.format, &["ADDRESS", "FORWARDS TO"], &rows, &rules)
        }
        DnsCommand::SetEmailForwarding { domain, rules } => {
            let rules = rules
                .iter()
                .map(|raw| parse_forward_rule(raw))
                .collect::<anyhow::Result<Vec<_>>>()?;
            ctx.client
                .dns()
                .set_email_forwarding(&domain, &rules)
                .await?;
            if !ctx.quiet {
                println!("{} forwarding rule(s) set for {domain}", rules.len());
            }
            Ok(())
        }
    }
}
