//! Currency mask and parser for peso amounts.
//!
//! Amounts are shown the way the es-CO locale writes them: `$ 1.234,5` while
//! the user is typing and `$ 1.234,50` once the field loses focus. The mask is
//! a small state machine over {sign, integer digits, separator, fraction
//! digits}; every character that does not drive a transition is dropped.
//!
//! ## Separator resolution
//!
//! Text reaching the parser may come from the mask, from the API (`150000,50`
//! or `100.000,00`) or from a paste (`1,234.56`). The fractional separator is
//! resolved as follows:
//!
//! - both `,` and `.` present: the last separator in the string is fractional
//! - a single display decimal separator (`,`): fractional
//! - a single grouping separator (`.`): fractional only when at most two
//!   digits follow it
//! - any separator kind occurring more than once: grouping

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Locale description used to render and read amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyFormat {
    pub currency_symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub max_fraction_digits: usize,
}

impl MoneyFormat {
    /// Colombian peso: `$ 1.234.567,89`.
    pub fn cop() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
            max_fraction_digits: 2,
        }
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::cop()
    }
}

/// How the scanner decides which separator, if any, starts the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeparatorPolicy {
    /// Only the locale decimal separator can start a fraction. Used for live
    /// edits, where the text is a masked display plus one keystroke.
    Locale,
    /// Resolve the separator from the text itself (see module docs).
    Infer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MaskState {
    Sign,
    Integer,
    Separator,
    Fraction,
}

/// Result of running the state machine over a piece of text.
#[derive(Debug, Default, PartialEq, Eq)]
struct Scanned {
    negative: bool,
    integer: String,
    separator: bool,
    fraction: String,
}

impl Scanned {
    fn has_digits(&self) -> bool {
        !self.integer.is_empty() || !self.fraction.is_empty()
    }

    /// Integer digits without leading zeros, `"0"` when nothing is left.
    fn integer_digits(&self) -> &str {
        let trimmed = self.integer.trim_start_matches('0');
        if trimmed.is_empty() {
            "0"
        } else {
            trimmed
        }
    }
}

/// Formats and parses amounts for one [`MoneyFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoneyMask {
    format: MoneyFormat,
}

impl MoneyMask {
    /// Mask for the default (COP) format.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: MoneyFormat) -> Self {
        Self { format }
    }

    pub fn money_format(&self) -> &MoneyFormat {
        &self.format
    }

    /// Format arbitrary text into a display string.
    ///
    /// Keeps the digits, one fractional separator (capped at the configured
    /// number of fraction digits) and a leading `-`. Idempotent: formatting a
    /// display string returns it unchanged.
    pub fn format(&self, raw: &str) -> String {
        let scanned = self.scan(
            raw,
            SeparatorPolicy::Infer,
            Some(self.format.max_fraction_digits),
        );
        self.render(&scanned)
    }

    /// Format a live edit of a masked field.
    ///
    /// Grouping separators are never read as a fraction here, so deleting a
    /// digit from `$ 1.000` gives `$ 100` and not `$ 1,00`. The sign is dropped
    /// because entry fields only take non-negative amounts.
    pub fn format_edit(&self, raw: &str) -> String {
        let mut scanned = self.scan(
            raw,
            SeparatorPolicy::Locale,
            Some(self.format.max_fraction_digits),
        );
        scanned.negative = false;
        self.render(&scanned)
    }

    /// Recover the numeric value of a display (or API) string.
    ///
    /// Returns zero for empty or unparseable input.
    pub fn parse(&self, text: &str) -> Decimal {
        let scanned = self.scan(text, SeparatorPolicy::Infer, None);
        if !scanned.has_digits() {
            return Decimal::ZERO;
        }

        let literal = if scanned.fraction.is_empty() {
            scanned.integer_digits().to_string()
        } else {
            format!("{}.{}", scanned.integer_digits(), scanned.fraction)
        };

        match Decimal::from_str(&literal) {
            Ok(value) if scanned.negative => -value,
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(input = text, error = %e, "unparseable amount, using zero");
                Decimal::ZERO
            }
        }
    }

    /// Full currency styling with a fixed number of fraction digits, as shown
    /// after a field loses focus and in summary tables.
    pub fn format_currency(&self, value: Decimal) -> String {
        let digits = self.format.max_fraction_digits as u32;
        let mut rounded = value
            .abs()
            .round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(digits);

        let plain = rounded.to_string();
        let (integer, fraction) = match plain.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (plain.as_str(), ""),
        };

        let mut out = String::new();
        if value.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&self.prefix());
        out.push_str(&self.group(integer));
        if !fraction.is_empty() {
            out.push(self.format.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Byte index of the separator that starts the fraction, if any.
    fn fraction_separator(&self, raw: &str, policy: SeparatorPolicy) -> Option<usize> {
        let decimal = self.format.decimal_separator;
        let grouping = self.format.thousands_separator;

        let decimals: Vec<usize> = raw.match_indices(decimal).map(|(i, _)| i).collect();
        if policy == SeparatorPolicy::Locale {
            return decimals.first().copied();
        }

        let groupings: Vec<usize> = raw.match_indices(grouping).map(|(i, _)| i).collect();
        match (decimals.as_slice(), groupings.as_slice()) {
            ([], []) => None,
            ([.., last_decimal], [.., last_grouping]) => Some((*last_decimal).max(*last_grouping)),
            ([only], []) => Some(*only),
            ([], [only]) => {
                let trailing_digits = raw[only + grouping.len_utf8()..]
                    .chars()
                    .filter(char::is_ascii_digit)
                    .count();
                (trailing_digits <= 2).then_some(*only)
            }
            _ => None,
        }
    }

    fn scan(&self, raw: &str, policy: SeparatorPolicy, fraction_cap: Option<usize>) -> Scanned {
        let separator_at = self.fraction_separator(raw, policy);
        let mut scanned = Scanned::default();
        let mut state = MaskState::Sign;

        for (idx, ch) in raw.char_indices() {
            state = match (state, ch) {
                (MaskState::Sign, '-') => {
                    scanned.negative = true;
                    MaskState::Sign
                }
                (MaskState::Sign | MaskState::Integer, c) if c.is_ascii_digit() => {
                    scanned.integer.push(c);
                    MaskState::Integer
                }
                (MaskState::Sign | MaskState::Integer, _) if Some(idx) == separator_at => {
                    scanned.separator = true;
                    MaskState::Separator
                }
                (MaskState::Separator | MaskState::Fraction, c) if c.is_ascii_digit() => {
                    if fraction_cap.map_or(true, |cap| scanned.fraction.len() < cap) {
                        scanned.fraction.push(c);
                    }
                    MaskState::Fraction
                }
                (state, _) => state,
            };
        }

        scanned
    }

    fn render(&self, scanned: &Scanned) -> String {
        if scanned.integer.is_empty() && !scanned.separator {
            return if scanned.negative {
                "-".to_string()
            } else {
                String::new()
            };
        }

        let mut out = String::new();
        if scanned.negative {
            out.push('-');
        }
        out.push_str(&self.prefix());
        out.push_str(&self.group(scanned.integer_digits()));
        if scanned.separator {
            out.push(self.format.decimal_separator);
            out.push_str(&scanned.fraction);
        }
        out
    }

    fn prefix(&self) -> String {
        if self.format.currency_symbol.is_empty() {
            String::new()
        } else {
            format!("{} ", self.format.currency_symbol)
        }
    }

    fn group(&self, digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.format.thousands_separator);
            }
            out.push(c);
        }
        out
    }
}

/// Format with the default (COP) mask.
pub fn format(raw: &str) -> String {
    MoneyMask::new().format(raw)
}

/// Parse with the default (COP) mask.
pub fn parse(display: &str) -> Decimal {
    MoneyMask::new().parse(display)
}

/// Currency styling with the default (COP) mask.
pub fn format_currency(value: Decimal) -> String {
    MoneyMask::new().format_currency(value)
}

/// The text value behind a money entry field.
///
/// Always holds either an empty string or a masked, non-negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoneyInput {
    mask: MoneyMask,
    display: String,
}

impl MoneyInput {
    pub fn new(mask: MoneyMask) -> Self {
        Self {
            mask,
            display: String::new(),
        }
    }

    /// Reformat after every keystroke.
    pub fn edit(&mut self, raw: &str) {
        self.display = self.mask.format_edit(raw);
    }

    /// Reformat with full currency styling when the field loses focus. A zero
    /// amount clears the field.
    pub fn blur(&mut self) {
        if self.display.is_empty() {
            return;
        }
        let value = self.value();
        self.display = if value > Decimal::ZERO {
            self.mask.format_currency(value)
        } else {
            String::new()
        };
    }

    pub fn clear(&mut self) {
        self.display.clear();
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn value(&self) -> Decimal {
        self.mask.parse(&self.display)
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_inserts_grouping() {
        assert_eq!(format("1234567"), "$ 1.234.567");
        assert_eq!(format("100"), "$ 100");
        assert_eq!(format("1000"), "$ 1.000");
    }

    #[test]
    fn test_format_caps_fraction_at_two_digits() {
        assert_eq!(format("1234,567"), "$ 1.234,56");
        assert_eq!(format("12,"), "$ 12,");
        assert_eq!(format(",5"), "$ 0,5");
    }

    #[test]
    fn test_format_strips_stray_symbols() {
        assert_eq!(format("abc 12x3$4"), "$ 1.234");
        assert_eq!(format("COP 5.000,00"), "$ 5.000,00");
        assert_eq!(format(""), "");
        assert_eq!(format("$ "), "");
    }

    #[test]
    fn test_format_keeps_only_one_fraction() {
        // the last separator wins when both kinds are present
        assert_eq!(format("1.234,5,6"), "$ 12.345,6");
        assert_eq!(format("1,234.56"), "$ 1.234,56");
    }

    #[test]
    fn test_format_preserves_leading_sign() {
        assert_eq!(format("-1500"), "-$ 1.500");
        assert_eq!(format("-"), "-");
        assert_eq!(format("15-00"), "$ 1.500");
    }

    #[test]
    fn test_format_drops_leading_zeros() {
        assert_eq!(format("007"), "$ 7");
        assert_eq!(format("0,05"), "$ 0,05");
    }

    #[test]
    fn test_format_is_idempotent() {
        let inputs = [
            "1234567,891",
            "-0,5",
            "12,",
            "1.000",
            "1000.5",
            "abc",
            "-",
            "99,9",
            "1,234.56",
            "0",
            "1.234.567",
        ];
        for raw in inputs {
            let once = format(raw);
            assert_eq!(format(&once), once, "not a fixed point for {raw:?}");
        }
    }

    #[test]
    fn test_parse_round_trips_formatted_values() {
        let values = [
            dec!(0),
            dec!(0.01),
            dec!(0.5),
            dec!(1),
            dec!(12.3),
            dec!(999),
            dec!(1000),
            dec!(1000.5),
            dec!(150000.50),
            dec!(1234567.89),
            dec!(100000000),
        ];
        for value in values {
            let display = format(&value.to_string());
            assert_eq!(parse(&display), value, "round trip through {display:?}");
        }
    }

    #[test]
    fn test_parse_round_trips_swept_amounts() {
        let mantissas = (0..10_000i64)
            .chain((1..=15).map(|e| 10i64.pow(e) - 1))
            .chain((1..=15).map(|e| 10i64.pow(e) + 7));
        for mantissa in mantissas {
            for scale in 0..=2 {
                let value = Decimal::new(mantissa, scale);
                let display = format(&value.to_string());
                assert_eq!(parse(&display), value, "round trip through {display:?}");
                assert_eq!(format(&display), display, "not a fixed point for {value}");
            }
        }
    }

    #[test]
    fn test_parse_api_amounts() {
        assert_eq!(parse("100.000,00"), dec!(100000.00));
        assert_eq!(parse("50.000,50"), dec!(50000.50));
        assert_eq!(parse("150000,50"), dec!(150000.50));
        assert_eq!(parse("1234.56"), dec!(1234.56));
        assert_eq!(parse("1.234.567"), dec!(1234567));
    }

    #[test]
    fn test_parse_later_separator_is_fractional() {
        assert_eq!(parse("1,234.5"), dec!(1234.5));
        assert_eq!(parse("1.234,5"), dec!(1234.5));
    }

    #[test]
    fn test_parse_invalid_input_is_zero() {
        assert_eq!(parse(""), Decimal::ZERO);
        assert_eq!(parse("abc"), Decimal::ZERO);
        assert_eq!(parse("$ "), Decimal::ZERO);
        assert_eq!(parse(&"9".repeat(40)), Decimal::ZERO);
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!(parse("-$ 1.500,25"), dec!(-1500.25));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234.5)), "$ 1.234,50");
        assert_eq!(format_currency(dec!(0)), "$ 0,00");
        assert_eq!(format_currency(dec!(150000.505)), "$ 150.000,51");
        assert_eq!(format_currency(dec!(-42)), "-$ 42,00");
    }

    #[test]
    fn test_format_edit_treats_grouping_as_grouping() {
        let mask = MoneyMask::new();
        // backspace over the last digit of "$ 1.000"
        assert_eq!(mask.format_edit("$ 1.00"), "$ 100");
        assert_eq!(mask.format_edit("$ 1.000,5"), "$ 1.000,5");
        assert_eq!(mask.format_edit("-5"), "$ 5");
    }

    #[test]
    fn test_money_input_edit_and_blur() {
        let mut input = MoneyInput::new(MoneyMask::new());
        input.edit("1");
        assert_eq!(input.display(), "$ 1");
        input.edit("$ 12345");
        assert_eq!(input.display(), "$ 12.345");
        input.edit("$ 12.345,");
        assert_eq!(input.display(), "$ 12.345,");
        input.edit("$ 12.345,678");
        assert_eq!(input.display(), "$ 12.345,67");
        input.blur();
        assert_eq!(input.display(), "$ 12.345,67");
        assert_eq!(input.value(), dec!(12345.67));
    }

    #[test]
    fn test_money_input_blur_clears_zero() {
        let mut input = MoneyInput::new(MoneyMask::new());
        input.edit("0");
        assert_eq!(input.display(), "$ 0");
        input.blur();
        assert!(input.is_empty());
        assert_eq!(input.value(), Decimal::ZERO);
    }

    #[test]
    fn test_money_input_blur_pads_fraction() {
        let mut input = MoneyInput::new(MoneyMask::new());
        input.edit("2500");
        input.blur();
        assert_eq!(input.display(), "$ 2.500,00");
        input.edit("$ 2.500,000");
        assert_eq!(input.display(), "$ 2.500,00");
    }

    #[test]
    fn test_custom_format() {
        let mask = MoneyMask::with_format(MoneyFormat {
            currency_symbol: String::new(),
            thousands_separator: ',',
            decimal_separator: '.',
            max_fraction_digits: 2,
        });
        assert_eq!(mask.format("1234567.891"), "1,234,567.89");
        assert_eq!(mask.parse("1,234,567.89"), dec!(1234567.89));
    }
}
