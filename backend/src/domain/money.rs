//! Monetary amounts with ISO 4217 currencies.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{InvalidValue, non_negative};

/// Supported ISO 4217 currency codes.
const CURRENCY_CODES: &[&str] = &[
    "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "HUF", "INR",
    "JPY", "MAD", "MXN", "NOK", "NZD", "PLN", "RON", "SEK", "SGD", "TND", "USD", "XAF", "XOF",
    "ZAR",
];

/// ISO 4217 currency code, matched exactly (uppercase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(&'static str);

impl Currency {
    pub const EUR: Self = Self("EUR");

    pub fn new(code: impl AsRef<str>) -> Result<Self, InvalidValue> {
        let code = code.as_ref();
        CURRENCY_CODES
            .iter()
            .find(|known| **known == code)
            .map(|known| Self(*known))
            .ok_or_else(|| InvalidValue::UnknownCurrency {
                code: code.to_owned(),
            })
    }

    pub fn code(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0.to_owned()
    }
}

impl TryFrom<String> for Currency {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-negative amount expressed in the currency's minor unit.
///
/// # Examples
/// ```
/// use profiles::domain::Money;
///
/// let price = Money::new(4_500, "EUR").expect("valid price");
/// assert_eq!(price.to_string(), "45.00 EUR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyDto", into = "MoneyDto")]
pub struct Money {
    amount_minor: i64,
    currency: Currency,
}

impl Money {
    pub fn new(amount_minor: i64, currency: impl AsRef<str>) -> Result<Self, InvalidValue> {
        let amount_minor = non_negative("amount", amount_minor)?;
        let currency = Currency::new(currency)?;
        Ok(Self {
            amount_minor,
            currency,
        })
    }

    pub fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02} {}",
            self.amount_minor / 100,
            self.amount_minor % 100,
            self.currency
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyDto {
    amount_minor: i64,
    currency: String,
}

impl From<Money> for MoneyDto {
    fn from(value: Money) -> Self {
        Self {
            amount_minor: value.amount_minor,
            currency: value.currency.code().to_owned(),
        }
    }
}

impl TryFrom<MoneyDto> for Money {
    type Error = InvalidValue;

    fn try_from(value: MoneyDto) -> Result<Self, Self::Error> {
        Self::new(value.amount_minor, value.currency)
    }
}
