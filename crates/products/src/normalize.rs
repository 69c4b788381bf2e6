//! Text-to-number normalizers for the free-text fields of the feed.
//!
//! Both normalizers are total. Absent and malformed input collapse to the same
//! fallback (`0`), so callers never branch per entry.

use core::str::FromStr;

use rust_decimal::Decimal;

/// Currency/unit marker embedded in the feed's price-per-unit text.
pub const UNIT_PRICE_MARKER: &str = "€/Liter";

/// Parse a composite such as `"(3,20 €/Liter)"` into `3.20`.
///
/// Cleaning steps, in order: drop [`UNIT_PRICE_MARKER`], drop parentheses,
/// trim whitespace, turn a decimal comma into a period. Returns `None` when
/// the input is absent or the cleaned text is not a decimal.
pub fn try_parse_price_per_unit(text: Option<&str>) -> Option<Decimal> {
    let cleaned = text?
        .replace(UNIT_PRICE_MARKER, "")
        .replace(['(', ')'], "");
    let cleaned = cleaned.trim().replace(',', ".");

    if !is_plain_decimal(&cleaned) {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

// `[+-]?digits(.digits)?` only. `Decimal::from_str` also takes `_` digit
// separators and exponents, which the feed never means.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}

/// Like [`try_parse_price_per_unit`], with unparseable input normalized to `0`.
///
/// A genuine zero and a parse failure are indistinguishable here.
pub fn parse_price_per_unit(text: Option<&str>) -> Decimal {
    try_parse_price_per_unit(text).unwrap_or(Decimal::ZERO)
}

/// Extract the pack size from a description such as `"6 x 0,5l Flasche"`.
///
/// Reads the text before the first lowercase `x`. Descriptions without an `x`,
/// or whose prefix is not an integer, yield `0`.
pub fn extract_leading_count(description: Option<&str>) -> i32 {
    description
        .and_then(|d| d.split_once('x'))
        .and_then(|(prefix, _)| prefix.trim().parse::<i32>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn parses_comma_formatted_unit_price() {
        assert_eq!(parse_price_per_unit(Some("(3,20 €/Liter)")), dec("3.20"));
        assert_eq!(parse_price_per_unit(Some("(1,51 €/Liter)")), dec("1.51"));
    }

    #[test]
    fn parses_period_formatted_and_bare_values() {
        assert_eq!(parse_price_per_unit(Some("(2.75 €/Liter)")), dec("2.75"));
        assert_eq!(parse_price_per_unit(Some("  4,5  ")), dec("4.5"));
    }

    #[test]
    fn tolerates_non_breaking_space_before_marker() {
        assert_eq!(parse_price_per_unit(Some("(2,10\u{a0}€/Liter)")), dec("2.10"));
    }

    #[test]
    fn unparseable_unit_price_falls_back_to_zero() {
        for text in [
            None,
            Some(""),
            Some("()"),
            Some("(€/Liter)"),
            Some("(n/a)"),
            Some("(3,20 €/Kilogramm)"),
            Some("(1.234,56 €/Liter)"),
            Some("(3_20 €/Liter)"),
            Some("(1_000,50 €/Liter)"),
            Some("(1e2 €/Liter)"),
            Some("(2,5E-1 €/Liter)"),
            Some("(,50 €/Liter)"),
            Some("(3, €/Liter)"),
            Some("(- €/Liter)"),
        ] {
            assert_eq!(parse_price_per_unit(text), Decimal::ZERO, "input: {text:?}");
            assert_eq!(try_parse_price_per_unit(text), None, "input: {text:?}");
        }
    }

    #[test]
    fn signed_values_parse() {
        assert_eq!(try_parse_price_per_unit(Some("(-1,25 €/Liter)")), Some(dec("-1.25")));
        assert_eq!(try_parse_price_per_unit(Some("(+2 €/Liter)")), Some(dec("2")));
    }

    #[test]
    fn genuine_zero_parses_as_some() {
        assert_eq!(try_parse_price_per_unit(Some("(0,00 €/Liter)")), Some(Decimal::ZERO));
    }

    #[test]
    fn extracts_leading_pack_count() {
        assert_eq!(extract_leading_count(Some("6 x 0,5l Flasche")), 6);
        assert_eq!(extract_leading_count(Some("20 x 0,33l Flasche")), 20);
        assert_eq!(extract_leading_count(Some("24x0,33L (Glas)")), 24);
        assert_eq!(extract_leading_count(Some("  12   x 1,0L")), 12);
    }

    #[test]
    fn descriptions_without_count_yield_zero() {
        assert_eq!(extract_leading_count(None), 0);
        assert_eq!(extract_leading_count(Some("")), 0);
        assert_eq!(extract_leading_count(Some("0,5L Dose")), 0);
        assert_eq!(extract_leading_count(Some("12")), 0);
        assert_eq!(extract_leading_count(Some("Kiste x 20")), 0);
        assert_eq!(extract_leading_count(Some("6 X 0,5l")), 0);
        assert_eq!(extract_leading_count(Some("x 6")), 0);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: the well-formed feed shape parses to the same number.
            #[test]
            fn well_formed_unit_price_round_trips(units in 0u32..10_000, cents in 0u32..100) {
                let text = format!("({units},{cents:02} €/Liter)");
                let expected = Decimal::new(i64::from(units) * 100 + i64::from(cents), 2);
                prop_assert_eq!(parse_price_per_unit(Some(&text)), expected);
            }

            /// Property: parsing never panics and always yields a value.
            #[test]
            fn unit_price_parse_is_total(text in ".*") {
                let _ = parse_price_per_unit(Some(&text));
            }

            /// Property: `<N> x ...` extracts exactly N.
            #[test]
            fn leading_count_is_extracted(n in any::<i32>(), rest in "[^x]{0,20}") {
                let text = format!("{n} x {rest}");
                prop_assert_eq!(extract_leading_count(Some(&text)), n);
            }

            /// Property: text without any `x` never yields a count.
            #[test]
            fn no_separator_means_zero(text in "[^x]*") {
                prop_assert_eq!(extract_leading_count(Some(&text)), 0);
            }
        }
    }
}
