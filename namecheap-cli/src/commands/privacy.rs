//! `privacy` command group.

use serde_json::json;

use crate::cli::PrivacyCommand;
use crate::output::{self, confirm};

use super::Ctx;

pub async fn run(ctx: &Ctx, cmd: PrivacyCommand) -> anyhow::Result<()> {
    match cmd {
        PrivacyCommand::List { list_type } => {
            let entries = ctx
                .client
                .whoisguard()
                .list(list_type.into(), 1, 100)
                .await?;
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        if e.domain.is_empty() {
                            "-".to_string()
                        } else {
                            e.domain.clone()
                        },
                        e.status.clone(),
                        e.expires
                            .map_or_else(|| "-".to_string(), |d| d.to_string()),
                    ]
                })
                .collect();
            output::print(
                ctx.format,
                &["ID", "DOMAIN", "STATUS", "EXPIRES"],
                &rows,
                &entries,
            )
        }
        PrivacyCommand::Enable { domain, email } => {
            ctx.client.whoisguard().enable(&domain, &email).await?;
            if !ctx.quiet {
                println!("privacy enabled for {domain}, forwarding to {email}");
            }
            Ok(())
        }
        PrivacyCommand::Disable { domain, yes } => {
            if !yes && !confirm(&format!("Disable privacy for {domain}?"))? {
                anyhow::bail!("cancelled");
            }
            ctx.client.whoisguard().disable(&domain).await?;
            if !ctx.quiet {
                println!("privacy disabled for {domain}");
            }
            Ok(())
        }
        PrivacyCommand::Renew { domain, years, yes } => {
            if !yes && !confirm(&format!("Renew privacy for {domain} ({years} year(s))?"))? {
                anyhow::bail!("cancelled");
            }
            let renewal = ctx.client.whoisguard().renew(&domain, years).await?;
            if ctx.quiet {
                return Ok(());
            }
            output::print(
                ctx.format,
                &["DOMAIN", "RENEWED", "YEARS", "CHARGED", "ORDER"],
                &[vec![
                    domain.clone(),
                    if renewal.renewed { "yes" } else { "no" }.to_string(),
                    renewal.years.to_string(),
                    format!("{:.2}", renewal.charged_amount),
                    renewal.order_id.to_string(),
                ]],
                &renewal,
            )
        }
        PrivacyCommand::ChangeEmail { domain } => {
            let rotation = ctx.client.whoisguard().change_email(&domain).await?;
            if ctx.quiet {
                return Ok(());
            }
            output::print(
                ctx.format,
                &["OLD", "NEW"],
                &[vec![rotation.old_email.clone(), rotation.new_email.clone()]],
                &json!({
                    "domain": domain,
                    "old_email": rotation.old_email,
                    "new_email": rotation.new_email,
                }),
            )
        }
    }
}
