//! `account` command group.

use crate::cli::AccountCommand;
use crate::output;

use super::Ctx;

pub async fn run(ctx: &Ctx, cmd: AccountCommand) -> anyhow::Result<()> {
    match cmd {
        AccountCommand::Balance => {
            let balance = ctx.client.users().get_balances().await?;
            let rows = vec![
                vec![
                    "available".to_string(),
                    format!("{:.2} {}", balance.available_balance, balance.currency),
                ],
                vec![
                    "total".to_string(),
                    format!("{:.2} {}", balance.account_balance, balance.currency),
                ],
                vec![
                    "earned".to_string(),
                    format!("{:.2} {}", balance.earned_amount, balance.currency),
                ],
                vec![
                    "withdrawable".to_string(),
                    format!("{:.2} {}", balance.withdrawable_amount, balance.currency),
                ],
                vec![
                    "needed for auto-renew".to_string(),
                    format!(
                        "{:.2} {}",
                        balance.funds_required_for_auto_renew, balance.currency
                    ),
                ],
            ];
            output::print(ctx.format, &["FIELD", "VALUE"], &rows, &balance)
        }
        AccountCommand::Pricing { tld, action } => {
            let prices = ctx
                .client
                .users()
                .get_pricing("DOMAIN", &action, tld.as_deref())
                .await?;
            let rows: Vec<Vec<String>> = prices
                .iter()
                .map(|p| {
                    vec![
                        p.product.clone(),
                        format!("{} {}", p.duration, p.duration_type.to_lowercase()),
                        p.your_price
                            .or(p.price)
                            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}")),
                        p.regular_price
                            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}")),
                        p.currency.clone(),
                    ]
                })
                .collect();
            output::print(
                ctx.format,
                &["TLD", "DURATION", "YOUR PRICE", "REGULAR", "CURRENCY"],
                &rows,
                &prices,
            )
        }
    }
}
