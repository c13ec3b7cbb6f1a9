//! Prices: a currency amount bound to a billing unit.

use crate::money::Money;

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};

/// The billing unit governing how an offering's price is charged.
///
/// The symbolic names are part of the marketplace wire vocabulary: the
/// compiled query carries `PER_ACCESS`, never an ordinal. Names here are
/// stable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingModel {
    Free,
    PerAccess,
    PerMonth,
    PerMessage,
    PerByte,
}

impl PricingModel {
    /// The symbolic name as it appears in compiled query text.
    pub fn as_query_literal(&self) -> &'static str {
        match self {
            PricingModel::Free => "FREE",
            PricingModel::PerAccess => "PER_ACCESS",
            PricingModel::PerMonth => "PER_MONTH",
            PricingModel::PerMessage => "PER_MESSAGE",
            PricingModel::PerByte => "PER_BYTE",
        }
    }
}

impl Display for PricingModel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.as_query_literal())
    }
}

/// A full economic descriptor: this much [`Money`], per this billing unit.
///
/// Like [`Money`], a `Price` is an immutable value; staged population goes
/// through the `with_*` methods, each returning a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    money: Money,
    pricing_model: PricingModel,
}

impl Price {
    pub fn new(money: Money, pricing_model: PricingModel) -> Self {
        Self {
            money,
            pricing_model,
        }
    }

    pub fn money(&self) -> &Money {
        &self.money
    }

    pub fn pricing_model(&self) -> PricingModel {
        self.pricing_model
    }

    /// Replace the monetary amount, keeping the billing unit.
    #[must_use]
    pub fn with_money(mut self, money: Money) -> Self {
        self.money = money;
        self
    }

    /// Replace the billing unit, keeping the monetary amount.
    #[must_use]
    pub fn with_pricing_model(mut self, pricing_model: PricingModel) -> Self {
        self.pricing_model = pricing_model;
        self
    }
}

impl Display for Price {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{} {}", self.money, self.pricing_model)
    }
}
