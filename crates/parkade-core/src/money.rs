//! # Monetary Amounts
//!
//! `Money` is the amount type produced by pricing policies. It supports the
//! two operations pricing needs, addition and multiplication by a whole
//! number of hours, and nothing more.
//!
//! ## Representation
//!
//! Amounts are stored as `i64` minor units with two decimal places for every
//! currency (`5.00 EUR` is `500`). Floats never appear. The text form is
//! `"<amount> <CODE>"`, e.g. `"5.00 EUR"`, and is also the serde form.
//!
//! ## Invariant
//!
//! Arithmetic is checked. Combining two currencies returns
//! [`MoneyError::CurrencyMismatch`]; exceeding `i64` returns
//! [`MoneyError::Overflow`].

use serde::{Deserialize, Serialize};

use crate::error::MoneyError;

/// Three-letter currency code, upper case (e.g. `EUR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    /// Euro.
    pub const EUR: Currency = Currency(*b"EUR");
    /// US dollar.
    pub const USD: Currency = Currency(*b"USD");
    /// Pound sterling.
    pub const GBP: Currency = Currency(*b"GBP");

    /// Validate and normalise a currency code.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidCurrency`] unless `code` is exactly three
    /// ASCII letters.
    pub fn new(code: &str) -> Result<Self, MoneyError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(MoneyError::InvalidCurrency(code.to_string()));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
            bytes[2].to_ascii_uppercase(),
        ]))
    }

    /// The code as text.
    pub fn as_str(&self) -> &str {
        // Construction guarantees ASCII.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::new(&code)
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.as_str().to_string()
    }
}

/// A monetary amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money {
    minor_units: i64,
    currency: Currency,
}

impl Money {
    /// Amount of `major` whole units (e.g. `of(5, EUR)` is `5.00 EUR`).
    pub fn of(major: i64, currency: Currency) -> Result<Self, MoneyError> {
        let minor_units = major.checked_mul(MINOR_PER_MAJOR).ok_or(MoneyError::Overflow)?;
        Ok(Self {
            minor_units,
            currency,
        })
    }

    /// Amount given directly in minor units (cents).
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Zero in `currency`.
    pub fn zero(currency: Currency) -> Self {
        Self::from_minor(0, currency)
    }

    /// Parse `"5.00 EUR"`, `"5 EUR"` or `"-0.5 usd"`.
    ///
    /// # Errors
    ///
    /// [`MoneyError::InvalidAmount`] for malformed text or more than two
    /// decimals, [`MoneyError::InvalidCurrency`] for a bad code.
    pub fn parse(s: &str) -> Result<Self, MoneyError> {
        let mut parts = s.split_whitespace();
        let (amount, code) = match (parts.next(), parts.next(), parts.next()) {
            (Some(amount), Some(code), None) => (amount, code),
            _ => return Err(MoneyError::InvalidAmount(s.to_string())),
        };
        let currency = Currency::new(code)?;
        let minor_units =
            parse_minor_units(amount).ok_or_else(|| MoneyError::InvalidAmount(s.to_string()))?;
        Ok(Self::from_minor(minor_units, currency))
    }

    /// Amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// Currency of this amount.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Whether the amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Sum of two amounts in the same currency.
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.to_string(),
                right: other.currency.to_string(),
            });
        }
        let minor_units = self
            .minor_units
            .checked_add(other.minor_units)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::from_minor(minor_units, self.currency))
    }

    /// Amount multiplied by an integer factor.
    pub fn checked_mul(&self, factor: i64) -> Result<Money, MoneyError> {
        let minor_units = self
            .minor_units
            .checked_mul(factor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::from_minor(minor_units, self.currency))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        let per = MINOR_PER_MAJOR.unsigned_abs();
        write!(f, "{sign}{}.{:02} {}", abs / per, abs % per, self.currency)
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Money> for String {
    fn from(m: Money) -> Self {
        m.to_string()
    }
}

const MINOR_PER_MAJOR: i64 = 100;

/// `"12"`, `"12.5"`, `"12.50"`, `"-3.05"` to minor units.
fn parse_minor_units(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, frac) = match unsigned.split_once('.') {
        Some((_, "")) => return None,
        Some((whole, frac)) => (whole, frac),
        None => (unsigned, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || frac.len() > 2 || !all_digits(frac) {
        return None;
    }
    let whole: i64 = whole.parse().ok()?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    let minor = whole.checked_mul(MINOR_PER_MAJOR)?.checked_add(frac)?;
    Some(if negative { -minor } else { minor })
}
