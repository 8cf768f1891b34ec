//! Account-level operations (`namecheap.users.*`).

use serde_json::Value;

use crate::client::NamecheapClient;
use crate::envelope;
use crate::error::Result;
use crate::types::{AccountBalance, ProductPrice};

/// Account balance and pricing operations.
pub struct UsersApi<'a> {
    client: &'a NamecheapClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a NamecheapClient) -> Self {
        Self { client }
    }

    /// Current account balances.
    pub async fn get_balances(&self) -> Result<AccountBalance> {
        let response = self
            .client
            .request("namecheap.users.getBalances", &[])
            .await?;
        let result = envelope::resolve_path(&response, "UserGetBalancesResult")?;
        Ok(AccountBalance::from_entry(result))
    }

    /// Price table for a product type, filtered by action (`REGISTER`,
    /// `RENEW`, `TRANSFER`, ...) and optionally narrowed to one product
    /// (for `DOMAIN` that is the TLD).
    pub async fn get_pricing(
        &self,
        product_type: &str,
        action: &str,
        product_name: Option<&str>,
    ) -> Result<Vec<ProductPrice>> {
        let mut params = vec![
            ("ProductType".to_string(), product_type.to_string()),
            ("ActionName".to_string(), action.to_string()),
        ];
        if let Some(name) = product_name {
            params.push(("ProductName".to_string(), name.to_string()));
        }
        let response = self
            .client
            .request("namecheap.users.getPricing", &params)
            .await?;
        let result = envelope::resolve_path(&response, "UserGetPricingResult.ProductType")?;
        Ok(flatten_pricing(result, action))
    }
}

/// Walk `ProductType → ProductCategory → Product → Price`, keeping only
/// categories whose name matches the requested action. Every level can be a
/// single object or an array, so each gets one-or-many coercion.
fn flatten_pricing(product_type: &Value, action: &str) -> Vec<ProductPrice> {
    let mut prices = Vec::new();
    for category in envelope::coerce_list(product_type.get("ProductCategory")) {
        let name = envelope::attr_string(&category, "Name");
        if !name.eq_ignore_ascii_case(action) {
            continue;
        }
        for product in envelope::coerce_list(category.get("Product")) {
            let product_name = envelope::attr_string(&product, "Name");
            for price in envelope::coerce_list(product.get("Price")) {
                prices.push(ProductPrice::from_entry(&product_name, &price));
            }
        }
    }
    prices
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pricing_tree() -> Value {
        json!({
            "@Name": "DOMAIN",
            "ProductCategory": [
                {
                    "@Name": "REGISTER",
                    "Product": {
                        "@Name": "com",
                        "Price": [
                            {
                                "@Duration": "1",
                                "@DurationType": "YEAR",
                                "@Price": "6.98",
                                "@RegularPrice": "10.98",
                                "@YourPrice": "6.98",
                                "@Currency": "USD",
                            },
                            {
                                "@Duration": "2",
                                "@DurationType": "YEAR",
                                "@Price": "21.96",
                                "@Currency": "USD",
                            },
                        ],
                    },
                },
                {
                    "@Name": "RENEW",
                    "Product": {
                        "@Name": "com",
                        "Price": {
                            "@Duration": "1",
                            "@DurationType": "YEAR",
                            "@Price": "12.98",
                            "@Currency": "USD",
                        },
                    },
                },
            ],
        })
    }

    #[test]
    fn only_matching_action_categories_are_kept() {
        let register = flatten_pricing(&pricing_tree(), "REGISTER");
        assert_eq!(register.len(), 2);
        assert!(register.iter().all(|p| p.product == "com"));
        assert_eq!(register[0].duration, 1);
        assert_eq!(register[0].your_price, Some(6.98));

        let renew = flatten_pricing(&pricing_tree(), "renew");
        assert_eq!(renew.len(), 1);
        assert_eq!(renew[0].price, Some(12.98));
    }

    #[test]
    fn unknown_action_yields_nothing() {
        assert!(flatten_pricing(&pricing_tree(), "TRANSFER").is_empty());
    }

    #[test]
    fn single_category_object_is_coerced() {
        let tree = json!({
            "ProductCategory": {
                "@Name": "REGISTER",
                "Product": { "@Name": "io", "Price": { "@Duration": "1", "@Price": "32.98" } },
            },
        });
        let prices = flatten_pricing(&tree, "REGISTER");
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].product, "io");
    }
}
