//! Money type for representing monetary values.
//!
//! The backend sends amounts as decimal strings (`"12990.0"`, `"20.00"`).
//! They are kept as [`Decimal`] end to end so sums never pick up binary
//! float artifacts and the scale the backend sent survives arithmetic.

use crate::error::CommerceError;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ISO 4217 currency.
///
/// Currencies the storefront has symbols for get their own variant; any
/// other well-formed three-letter code is carried as [`Currency::Other`] so
/// a cart in an unexpected currency still decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    HUF,
    EUR,
    USD,
    GBP,
    CHF,
    CZK,
    PLN,
    RON,
    SEK,
    DKK,
    JPY,
    CAD,
    AUD,
    /// Any other code, stored upper-case.
    Other([u8; 3]),
}

impl Currency {
    /// Get the currency code (e.g., "HUF").
    pub fn code(&self) -> &str {
        match self {
            Currency::HUF => "HUF",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::CZK => "CZK",
            Currency::PLN => "PLN",
            Currency::RON => "RON",
            Currency::SEK => "SEK",
            Currency::DKK => "DKK",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            // Only built from ASCII letters in `from_code`.
            Currency::Other(code) => std::str::from_utf8(code).unwrap_or("XXX"),
        }
    }

    /// Get the default currency symbol (e.g., "Ft"); the code itself for
    /// currencies without a known symbol.
    pub fn symbol(&self) -> &str {
        match self {
            Currency::HUF => "Ft",
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
            Currency::GBP => "\u{00a3}",
            Currency::CHF => "CHF",
            Currency::CZK => "K\u{010d}",
            Currency::PLN => "z\u{0142}",
            Currency::RON => "lei",
            Currency::SEK | Currency::DKK => "kr",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
            Currency::Other(_) => self.code(),
        }
    }

    /// ISO 4217 minor units for this currency.
    pub fn minor_units(&self) -> u32 {
        match self.code() {
            "JPY" | "KRW" | "ISK" | "CLP" | "VND" | "PYG" | "UGX" | "XAF" | "XOF" => 0,
            "BHD" | "KWD" | "OMR" | "JOD" | "TND" | "IQD" | "LYD" => 3,
            _ => 2,
        }
    }

    /// Parse a currency code, case-insensitively.
    ///
    /// Returns `None` unless the code is exactly three ASCII letters.
    pub fn from_code(code: &str) -> Option<Self> {
        let upper = code.trim().to_ascii_uppercase();
        let known = match upper.as_str() {
            "HUF" => Currency::HUF,
            "EUR" => Currency::EUR,
            "USD" => Currency::USD,
            "GBP" => Currency::GBP,
            "CHF" => Currency::CHF,
            "CZK" => Currency::CZK,
            "PLN" => Currency::PLN,
            "RON" => Currency::RON,
            "SEK" => Currency::SEK,
            "DKK" => Currency::DKK,
            "JPY" => Currency::JPY,
            "CAD" => Currency::CAD,
            "AUD" => Currency::AUD,
            _ => {
                let bytes: [u8; 3] = upper.as_bytes().try_into().ok()?;
                if !bytes.iter().all(u8::is_ascii_uppercase) {
                    return None;
                }
                Currency::Other(bytes)
            }
        };
        Some(known)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| CommerceError::UnsupportedCurrency(s.to_string()))
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

/// A monetary value with currency, shaped like the backend's `MoneyV2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount, exchanged as a string.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// The currency.
    pub currency_code: Currency,
}

impl Money {
    /// Create a new Money value.
    pub fn new(amount: Decimal, currency_code: Currency) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a decimal string such as `"12990.00"`.
    ///
    /// ```
    /// use mosoris_commerce::money::{Currency, Money};
    /// let price = Money::parse("49.90", Currency::EUR).unwrap();
    /// assert_eq!(price.amount_string(), "49.90");
    /// ```
    pub fn parse(amount: &str, currency_code: Currency) -> Result<Self, CommerceError> {
        let amount = Decimal::from_str_exact(amount.trim()).map_err(|e| {
            CommerceError::InvalidAmount {
                value: amount.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::new(amount, currency_code))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency_code: Currency) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Add another Money value, refusing mixed currencies and overflow.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        if self.currency_code != other.currency_code {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency_code.code().to_string(),
                got: other.currency_code.code().to_string(),
            });
        }
        self.checked_add_amount(other.amount)
    }

    /// Add a bare decimal amount in this value's currency.
    pub fn checked_add_amount(&self, amount: Decimal) -> Result<Money, CommerceError> {
        let sum = self
            .amount
            .checked_add(amount)
            .ok_or(CommerceError::Overflow)?;
        Ok(Money::new(sum, self.currency_code))
    }

    /// The amount as the backend would send it, scale preserved.
    pub fn amount_string(&self) -> String {
        self.amount.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn huf(amount: &str) -> Money {
        Money::parse(amount, Currency::HUF).unwrap()
    }

    #[test]
    fn test_money_parse_keeps_scale() {
        assert_eq!(huf("100.00").amount_string(), "100.00");
        assert_eq!(huf("12990.0").amount_string(), "12990.0");
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        let err = Money::parse("12,99", Currency::EUR).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidAmount { .. }));
    }

    #[test]
    fn test_money_addition_is_exact() {
        let dime = huf("0.10");
        let sum = dime
            .checked_add(&dime)
            .and_then(|m| m.checked_add(&dime))
            .unwrap();
        assert_eq!(sum.amount_string(), "0.30");
    }

    #[test]
    fn test_money_currency_mismatch() {
        let a = huf("10.00");
        let b = Money::parse("10.00", Currency::EUR).unwrap();
        assert!(matches!(
            a.checked_add(&b),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_money_overflow() {
        let max = Money::new(Decimal::MAX, Currency::USD);
        assert!(matches!(
            max.checked_add_amount(Decimal::ONE),
            Err(CommerceError::Overflow)
        ));
    }

    #[test]
    fn test_money_json_shape() {
        let json = serde_json::json!({"amount": "20.00", "currencyCode": "HUF"});
        let money: Money = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(money, huf("20.00"));
        assert_eq!(serde_json::to_value(money).unwrap(), json);
    }

    #[test]
    fn test_malformed_currency_rejected_at_boundary() {
        for code in ["US$", "EURO", "", "H1F"] {
            let json = serde_json::json!({"amount": "1.00", "currencyCode": code});
            assert!(serde_json::from_value::<Money>(json).is_err(), "{code}");
        }
    }

    #[test]
    fn test_unlisted_currency_decodes() {
        let json = serde_json::json!({"amount": "149.50", "currencyCode": "NOK"});
        let money: Money = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(money.currency_code, Currency::Other(*b"NOK"));
        assert_eq!(money.currency_code.code(), "NOK");
        assert_eq!(money.currency_code.symbol(), "NOK");
        assert_eq!(money.currency_code.minor_units(), 2);
        assert_eq!(serde_json::to_value(money).unwrap(), json);
    }

    #[test]
    fn test_currency_code_is_case_insensitive_everywhere() {
        assert_eq!(Currency::from_code("huf"), Some(Currency::HUF));
        assert_eq!(Currency::from_code("nok"), Some(Currency::Other(*b"NOK")));

        let json = serde_json::json!({"amount": "10.00", "currencyCode": "huf"});
        let money: Money = serde_json::from_value(json).unwrap();
        assert_eq!(money.currency_code, Currency::HUF);
        assert_eq!(serde_json::to_value(money).unwrap()["currencyCode"], "HUF");
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(Currency::HUF.minor_units(), 2);
        assert_eq!(Currency::JPY.minor_units(), 0);
        assert_eq!("kwd".parse::<Currency>().unwrap().minor_units(), 3);
    }

    #[test]
    fn test_money_sign() {
        assert!(huf("0.01").is_positive());
        assert!(!huf("0.00").is_positive());
        assert!(!huf("-5").is_positive());
    }
}
