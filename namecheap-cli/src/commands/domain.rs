//! `domain` command group.

use chrono::{Duration, Utc};
use serde_json::json;

use crate::cli::DomainCommand;
use crate::output::{self, confirm};

use super::Ctx;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}

fn price_or_dash(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("{p:.2}"))
}

pub async fn run(ctx: &Ctx, cmd: DomainCommand) -> anyhow::Result<()> {
    match cmd {
        DomainCommand::List {
            page,
            page_size,
            expiring_in,
        } => {
            let mut domains = ctx.client.domains().list(page, page_size).await?;
            if let Some(days) = expiring_in {
                let cutoff = Utc::now().date_naive() + Duration::days(days);
                domains.retain(|d| d.expires.is_some_and(|e| e <= cutoff));
            }
            let rows: Vec<Vec<String>> = domains
                .iter()
                .map(|d| {
                    vec![
                        d.name.clone(),
                        date_or_dash(d.expires),
                        yes_no(d.auto_renew).to_string(),
                        yes_no(d.is_locked).to_string(),
                        d.whoisguard.clone(),
                    ]
                })
                .collect();
            output::print(
                ctx.format,
                &["DOMAIN", "EXPIRES", "AUTO-RENEW", "LOCKED", "WHOISGUARD"],
                &rows,
                &domains,
            )
        }
        DomainCommand::Check { domains, pricing } => {
            let refs: Vec<&str> = domains.iter().map(String::as_str).collect();
            let checks = ctx.client.domains().check(&refs, pricing).await?;
            let rows: Vec<Vec<String>> = checks
                .iter()
                .map(|c| {
                    vec![
                        c.domain.clone(),
                        yes_no(c.available).to_string(),
                        yes_no(c.premium).to_string(),
                        price_or_dash(c.your_price),
                    ]
                })
                .collect();
            output::print(
                ctx.format,
                &["DOMAIN", "AVAILABLE", "PREMIUM", "PRICE"],
                &rows,
                &checks,
            )
        }
        DomainCommand::Info { domain } => {
            let info = ctx.client.domains().get_info(&domain).await?;
            let rows = vec![
                vec!["domain".to_string(), info.domain.clone()],
                vec!["status".to_string(), info.status.clone()],
                vec!["owner".to_string(), info.owner.clone()],
                vec!["created".to_string(), date_or_dash(info.created)],
                vec!["expires".to_string(), date_or_dash(info.expires)],
                vec![
                    "whoisguard".to_string(),
                    yes_no(info.whoisguard_enabled).to_string(),
                ],
                vec![
                    "dns provider".to_string(),
                    info.dns_provider.clone().unwrap_or_else(|| "-".to_string()),
                ],
                vec!["premium".to_string(), yes_no(info.is_premium).to_string()],
            ];
            output::print(ctx.format, &["FIELD", "VALUE"], &rows, &info)
        }
        DomainCommand::Contacts { domain } => {
            let contacts = ctx.client.domains().get_contacts(&domain).await?;
            let rows: Vec<Vec<String>> = [
                ("registrant", &contacts.registrant),
                ("tech", &contacts.tech),
                ("admin", &contacts.admin),
                ("aux_billing", &contacts.aux_billing),
            ]
            .iter()
            .map(|(role, c)| {
                vec![
                    (*role).to_string(),
                    format!("{} {}", c.first_name, c.last_name),
                    c.email.clone(),
                    c.phone.clone(),
                    format!("{}, {}", c.city, c.country),
                ]
            })
            .collect();
            output::print(
                ctx.format,
                &["ROLE", "NAME", "EMAIL", "PHONE", "LOCATION"],
                &rows,
                &contacts,
            )
        }
        DomainCommand::Tlds { registerable } => {
            let mut tlds = ctx.client.domains().get_tld_list().await?;
            if registerable {
                tlds.retain(|t| t.is_api_registerable);
            }
            let rows: Vec<Vec<String>> = tlds
                .iter()
                .map(|t| {
                    vec![
                        t.name.clone(),
                        format!("{}-{}", t.min_register_years, t.max_register_years),
                        yes_no(t.is_api_registerable).to_string(),
                        yes_no(t.is_api_renewable).to_string(),
                        yes_no(t.is_api_transferable).to_string(),
                    ]
                })
                .collect();
            output::print(
                ctx.format,
                &["TLD", "YEARS", "REGISTER", "RENEW", "TRANSFER"],
                &rows,
                &tlds,
            )
        }
        DomainCommand::Renew { domain, years, yes } => {
            if !yes && !confirm(&format!("Renew {domain} for {years} year(s)?"))? {
                anyhow::bail!("cancelled");
            }
            let result = ctx.client.domains().renew(&domain, years).await?;
            if ctx.quiet {
                return Ok(());
            }
            output::print(
                ctx.format,
                &["DOMAIN", "RENEWED", "CHARGED", "EXPIRES"],
                &[vec![
                    result.domain.clone(),
                    yes_no(result.renewed).to_string(),
                    format!("{:.2}", result.charged_amount),
                    date_or_dash(result.expires),
                ]],
                &result,
            )
        }
        DomainCommand::Lock { domain } => {
            ctx.client.domains().lock(&domain).await?;
            if !ctx.quiet {
                output::print(
                    ctx.format,
                    &["DOMAIN", "LOCKED"],
                    &[vec![domain.clone(), "yes".to_string()]],
                    &json!({ "domain": domain, "locked": true }),
                )?;
            }
            Ok(())
        }
        DomainCommand::Unlock { domain } => {
            ctx.client.domains().unlock(&domain).await?;
            if !ctx.quiet {
                output::print(
                    ctx.format,
                    &["DOMAIN", "LOCKED"],
                    &[vec![domain.clone(), "no".to_string()]],
                    &json!({ "domain": domain, "locked": false }),
                )?;
            }
            Ok(())
        }
    }
}
