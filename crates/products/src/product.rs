use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shelfscan_core::{ArticleId, ProductId};

/// One product of the upstream catalog feed.
///
/// Every field is optional: the feed routinely ships partial records and the
/// model must accept them as-is. Absent fields stay absent when the product is
/// serialized again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        rename = "descriptionText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<Article>>,
}

impl Product {
    /// Article variants in feed order.
    ///
    /// An absent `articles` field reads as an empty slice.
    pub fn articles(&self) -> &[Article] {
        self.articles.as_deref().unwrap_or(&[])
    }
}

/// One purchasable variant of a [`Product`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ArticleId>,

    /// Free text such as `"6 x 0,5l Flasche"`; pack counts are read from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Price in the feed's single currency.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Human-formatted composite such as `"(3,20 €/Liter)"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_unit_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
