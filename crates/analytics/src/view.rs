use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shelfscan_core::{ArticleId, ProductId};
use shelfscan_products::{Article, Product, extract_leading_count, try_parse_price_per_unit};

/// One (product, article) pair with its normalized values.
///
/// Borrowed from the snapshot; rebuilt for every query call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlattenedEntry<'a> {
    pub product: &'a Product,
    pub article: &'a Article,
    /// Parsed price-per-unit text; `None` when absent or unparseable.
    pub parsed_unit_price: Option<Decimal>,
    /// Leading pack count of the short description (`0` when none).
    pub bottle_count: i32,
}

impl<'a> FlattenedEntry<'a> {
    pub fn new(product: &'a Product, article: &'a Article) -> Self {
        Self {
            product,
            article,
            parsed_unit_price: try_parse_price_per_unit(article.price_per_unit_text.as_deref()),
            bottle_count: extract_leading_count(article.short_description.as_deref()),
        }
    }

    /// Normalized unit price with the "unparseable → zero" fallback applied.
    pub fn unit_price(&self) -> Decimal {
        self.parsed_unit_price.unwrap_or(Decimal::ZERO)
    }

    pub fn price(&self) -> Option<Decimal> {
        self.article.price
    }
}

/// Flattened view over every article of a catalog snapshot, in feed order.
#[derive(Debug, Clone, Default)]
pub struct CatalogView<'a> {
    entries: Vec<FlattenedEntry<'a>>,
}

impl<'a> CatalogView<'a> {
    /// Products with an absent or empty article list contribute nothing.
    pub fn flatten(products: &'a [Product]) -> Self {
        let entries: Vec<FlattenedEntry<'a>> = products
            .iter()
            .flat_map(|p| p.articles().iter().map(move |a| FlattenedEntry::new(p, a)))
            .collect();

        tracing::debug!(
            products = products.len(),
            entries = entries.len(),
            unparsed_unit_prices = entries.iter().filter(|e| e.parsed_unit_price.is_none()).count(),
            "flattened catalog snapshot"
        );

        Self { entries }
    }

    pub fn entries(&self) -> &[FlattenedEntry<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owned projection of a [`FlattenedEntry`] for output.
///
/// Fields absent in the feed are omitted rather than rendered as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<ArticleId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_unit_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    pub bottle_count: i32,
}

impl From<FlattenedEntry<'_>> for EntrySummary {
    fn from(entry: FlattenedEntry<'_>) -> Self {
        let FlattenedEntry {
            product, article, ..
        } = entry;

        Self {
            product_id: product.id,
            brand_name: product.brand_name.clone(),
            name: product.name.clone(),
            article_id: article.id,
            short_description: article.short_description.clone(),
            price: article.price,
            unit: article.unit.clone(),
            price_per_unit_text: article.price_per_unit_text.clone(),
            image: article.image.clone(),
            unit_price: entry.unit_price(),
            bottle_count: entry.bottle_count,
        }
    }
}
