//! Aggregate queries over flattened catalog entries.

use core::str::FromStr;

use rust_decimal::Decimal;

use shelfscan_core::DomainError;

use crate::view::FlattenedEntry;

/// How entries whose price-per-unit text cannot be parsed take part in the
/// unit-price orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitPricePolicy {
    /// Unparseable text ranks as `0`, so malformed entries can win "cheapest".
    #[default]
    TreatAsZero,
    /// Unparseable entries are left out of cheapest / most-expensive.
    ExcludeUnparsed,
}

impl UnitPricePolicy {
    /// Ranking key of an entry, or `None` if the entry does not take part.
    fn ranking_key(self, entry: &FlattenedEntry<'_>) -> Option<Decimal> {
        match self {
            Self::TreatAsZero => Some(entry.unit_price()),
            Self::ExcludeUnparsed => entry.parsed_unit_price,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TreatAsZero => "zero",
            Self::ExcludeUnparsed => "exclude",
        }
    }
}

impl FromStr for UnitPricePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::TreatAsZero),
            "exclude" => Ok(Self::ExcludeUnparsed),
            other => Err(DomainError::validation(format!(
                "unknown unit price policy `{other}` (expected `zero` or `exclude`)"
            ))),
        }
    }
}

/// Entry with the lowest normalized unit price; first-seen wins ties.
pub fn cheapest_by_unit_price<'a>(
    entries: &[FlattenedEntry<'a>],
    policy: UnitPricePolicy,
) -> Option<FlattenedEntry<'a>> {
    first_ranked(entries, policy, |candidate, best| candidate < best)
}

/// Entry with the highest normalized unit price; first-seen wins ties.
pub fn most_expensive_by_unit_price<'a>(
    entries: &[FlattenedEntry<'a>],
    policy: UnitPricePolicy,
) -> Option<FlattenedEntry<'a>> {
    first_ranked(entries, policy, |candidate, best| candidate > best)
}

// Replaces the current pick only on a strict improvement, which keeps the
// earliest entry among equals.
fn first_ranked<'a>(
    entries: &[FlattenedEntry<'a>],
    policy: UnitPricePolicy,
    beats: impl Fn(Decimal, Decimal) -> bool,
) -> Option<FlattenedEntry<'a>> {
    let mut best: Option<(Decimal, FlattenedEntry<'a>)> = None;

    for entry in entries {
        let Some(key) = policy.ranking_key(entry) else {
            continue;
        };
        match best {
            Some((best_key, _)) if !beats(key, best_key) => {}
            _ => best = Some((key, *entry)),
        }
    }

    best.map(|(_, entry)| entry)
}

/// Every entry whose raw price equals `target`, ascending by unit price.
///
/// Decimal equality (`17.99 == 17.990`); absent prices never match. The sort is
/// stable, so equal unit prices keep feed order.
pub fn exact_price_match<'a>(
    entries: &[FlattenedEntry<'a>],
    target: Decimal,
) -> Vec<FlattenedEntry<'a>> {
    let mut matches: Vec<FlattenedEntry<'a>> = entries
        .iter()
        .filter(|e| e.price() == Some(target))
        .copied()
        .collect();
    matches.sort_by_key(|e| e.unit_price());
    matches
}

/// Largest extracted pack size, or `None` for an empty dataset.
///
/// `Some(0)` is a real answer (no description carried a count).
pub fn max_pack_size(entries: &[FlattenedEntry<'_>]) -> Option<i32> {
    entries.iter().map(|e| e.bottle_count).max()
}

/// Every entry whose extracted pack size equals `count`, in feed order.
pub fn all_with_pack_size<'a>(
    entries: &[FlattenedEntry<'a>],
    count: i32,
) -> Vec<FlattenedEntry<'a>> {
    entries
        .iter()
        .filter(|e| e.bottle_count == count)
        .copied()
        .collect()
}

/// The largest pack size together with every entry that has it.
#[derive(Debug, Clone, PartialEq)]
pub struct MostBottles<'a> {
    pub bottle_count: i32,
    pub entries: Vec<FlattenedEntry<'a>>,
}

pub fn most_bottles<'a>(entries: &[FlattenedEntry<'a>]) -> Option<MostBottles<'a>> {
    let bottle_count = max_pack_size(entries)?;
    Some(MostBottles {
        bottle_count,
        entries: all_with_pack_size(entries, bottle_count),
    })
}
