//! Currency amounts with exact decimal semantics.

use std::fmt::{Display, Formatter, Result as FormatResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency code used by [`Money::euros`].
pub const EURO_CURRENCY_CODE: &str = "EUR";

/// An amount of some currency, as quoted in a marketplace offering.
///
/// Amounts are stored as [`Decimal`], never as a binary float: offering
/// prices range from fractions of a cent to token economies quoted in
/// magnitudes of 10^24, and every digit must survive into the compiled
/// query text. `Decimal` renders digit-for-digit and never falls back to
/// scientific notation.
///
/// The currency is a free-form code. Marketplaces list "EUR" next to
/// "Bitcoin", so no ISO enum is imposed.
///
/// `Money` is an immutable value. Changing a field produces a new value:
///
/// ```
/// use common::Money;
/// use rust_decimal::Decimal;
///
/// let base = Money::euros(Decimal::new(2, 3));
/// let in_bitcoin = base.clone().with_currency("Bitcoin");
/// assert_eq!(base.currency(), "EUR");
/// assert_eq!(in_bitcoin.currency(), "Bitcoin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    /// Create an amount of an arbitrary currency.
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Named constructor for euro amounts, the dominant marketplace currency.
    pub fn euros(amount: Decimal) -> Self {
        Self::new(amount, EURO_CURRENCY_CODE)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Replace the amount, keeping the currency.
    #[must_use]
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Replace the currency, keeping the amount.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl Display for Money {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{} {}", self.amount, self.currency)
    }
}
