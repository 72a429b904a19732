//! Locale-aware money formatting.
//!
//! Formatting is a presentation concern: the cart core hands out decimal
//! [`Money`] values and callers inject a [`MoneyFormatter`] built from
//! configuration to turn them into display strings.

use crate::cart::PriceDisplay;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Highest scale a [`Decimal`] can carry.
const MAX_FRACTION_DIGITS: u32 = 28;

/// Per-currency display overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CurrencyRule {
    /// Digits after the decimal separator.
    pub fraction_digits: Option<u32>,
    /// Symbol replacing the currency's default one.
    pub symbol: Option<String>,
}

/// Number and currency display rules for one locale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
    /// BCP 47 tag, informational.
    pub locale: String,
    pub decimal_separator: char,
    pub group_separator: char,
    /// Integer parts shorter than `3 + min_grouping_digits` stay ungrouped.
    pub min_grouping_digits: u32,
    /// Place the symbol after the amount (`12 990 Ft`) instead of before.
    pub symbol_after: bool,
    /// Fraction digits for currencies without a rule. When unset, each
    /// currency uses its ISO 4217 minor units.
    pub default_fraction_digits: Option<u32>,
    /// Overrides keyed by ISO 4217 code.
    pub currencies: BTreeMap<String, CurrencyRule>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        let mut currencies = BTreeMap::new();
        currencies.insert(
            "HUF".to_string(),
            CurrencyRule {
                fraction_digits: Some(0),
                symbol: Some("Ft".to_string()),
            },
        );

        Self {
            locale: "hu-HU".to_string(),
            decimal_separator: ',',
            group_separator: '\u{a0}',
            min_grouping_digits: 1,
            symbol_after: true,
            default_fraction_digits: None,
            currencies,
        }
    }
}

impl FormatConfig {
    /// Check the rules are usable.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.decimal_separator == self.group_separator {
            return Err(CommerceError::InvalidConfig(format!(
                "decimal and group separators are both {:?}",
                self.decimal_separator
            )));
        }
        if let Some(digits) = self.default_fraction_digits {
            if digits > MAX_FRACTION_DIGITS {
                return Err(CommerceError::InvalidConfig(format!(
                    "default_fraction_digits {digits} exceeds {MAX_FRACTION_DIGITS}"
                )));
            }
        }
        for (code, rule) in &self.currencies {
            code.parse::<Currency>()?;
            if let Some(digits) = rule.fraction_digits {
                if digits > MAX_FRACTION_DIGITS {
                    return Err(CommerceError::InvalidConfig(format!(
                        "{code}: fraction_digits {digits} exceeds {MAX_FRACTION_DIGITS}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Display strings for a [`PriceDisplay`].
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FormattedPrice {
    pub current: Option<String>,
    pub original: Option<String>,
}

/// Formats money according to a [`FormatConfig`].
#[derive(Debug, Clone)]
pub struct MoneyFormatter {
    config: FormatConfig,
}

impl MoneyFormatter {
    /// Create a formatter, rejecting unusable rules.
    pub fn new(config: FormatConfig) -> Result<Self, CommerceError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The rules in use.
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    fn rule(&self, currency: &Currency) -> Option<&CurrencyRule> {
        self.config.currencies.get(currency.code())
    }

    /// Currency rule first, then the configured default, then the
    /// currency's minor units.
    fn fraction_digits(&self, currency: &Currency) -> u32 {
        self.rule(currency)
            .and_then(|r| r.fraction_digits)
            .or(self.config.default_fraction_digits)
            .unwrap_or_else(|| currency.minor_units())
    }

    fn symbol<'a>(&'a self, currency: &'a Currency) -> &'a str {
        self.rule(currency)
            .and_then(|r| r.symbol.as_deref())
            .unwrap_or_else(|| currency.symbol())
    }

    /// Format just the number, rounded half away from zero.
    pub fn format_number(&self, amount: Decimal, fraction_digits: u32) -> String {
        let mut rounded =
            amount.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        rounded = rounded.abs();
        rounded.rescale(fraction_digits);

        let digits = rounded.to_string();
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits.as_str(), None),
        };

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.group(int_part));
        if let Some(frac) = frac_part {
            out.push(self.config.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    fn group(&self, int_part: &str) -> String {
        let threshold = 3 + self.config.min_grouping_digits as usize;
        if int_part.len() < threshold {
            return int_part.to_string();
        }

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.config.group_separator);
            }
            grouped.push(ch);
        }
        grouped
    }

    /// Format a money value with its currency symbol.
    pub fn format(&self, money: &Money) -> String {
        let currency = &money.currency_code;
        let number = self.format_number(money.amount, self.fraction_digits(currency));
        let symbol = self.symbol(currency);

        if self.config.symbol_after {
            format!("{number}\u{a0}{symbol}")
        } else if let Some(unsigned) = number.strip_prefix('-') {
            format!("-{symbol}{unsigned}")
        } else {
            format!("{symbol}{number}")
        }
    }

    /// Format both slots of a price display.
    pub fn format_price(&self, price: &PriceDisplay) -> FormattedPrice {
        FormattedPrice {
            current: price.current().map(|m| self.format(m)),
            original: price.original().map(|m| self.format(m)),
        }
    }
}

impl Default for MoneyFormatter {
    fn default() -> Self {
        Self {
            config: FormatConfig::default(),
        }
    }
}
