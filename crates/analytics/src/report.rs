use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::query::{
    MostBottles, UnitPricePolicy, cheapest_by_unit_price, exact_price_match, most_bottles,
    most_expensive_by_unit_price,
};
use crate::view::{EntrySummary, FlattenedEntry};

/// Reference price for exact-match queries when the caller supplies none.
pub const DEFAULT_REFERENCE_PRICE: Decimal = Decimal::from_parts(1799, 0, 0, false, 2);

/// Knobs for [`combined_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub reference_price: Decimal,
    pub policy: UnitPricePolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            reference_price: DEFAULT_REFERENCE_PRICE,
            policy: UnitPricePolicy::default(),
        }
    }
}

impl ReportOptions {
    pub fn with_reference_price(mut self, reference_price: Decimal) -> Self {
        self.reference_price = reference_price;
        self
    }

    pub fn with_policy(mut self, policy: UnitPricePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Largest pack size and all entries sharing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostBottlesSummary {
    pub bottle_count: i32,
    pub entries: Vec<EntrySummary>,
}

impl From<MostBottles<'_>> for MostBottlesSummary {
    fn from(value: MostBottles<'_>) -> Self {
        Self {
            bottle_count: value.bottle_count,
            entries: value.entries.into_iter().map(EntrySummary::from).collect(),
        }
    }
}

/// Every aggregate of one snapshot in a single payload.
///
/// Single-result fields are omitted when the snapshot had no entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_expensive: Option<EntrySummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheapest: Option<EntrySummary>,

    #[serde(with = "rust_decimal::serde::float")]
    pub reference_price: Decimal,

    pub exact_price: Vec<EntrySummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_bottles: Option<MostBottlesSummary>,
}

/// Run every query over `entries` and bundle the answers.
pub fn combined_report(entries: &[FlattenedEntry<'_>], options: &ReportOptions) -> CombinedReport {
    CombinedReport {
        most_expensive: most_expensive_by_unit_price(entries, options.policy)
            .map(EntrySummary::from),
        cheapest: cheapest_by_unit_price(entries, options.policy).map(EntrySummary::from),
        reference_price: options.reference_price,
        exact_price: exact_price_match(entries, options.reference_price)
            .into_iter()
            .map(EntrySummary::from)
            .collect(),
        most_bottles: most_bottles(entries).map(MostBottlesSummary::from),
    }
}
