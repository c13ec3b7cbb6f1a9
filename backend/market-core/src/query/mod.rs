//! Composition of offering discovery queries.
//!
//! An [`OfferingQuery`] accumulates search constraints through a fluent
//! chain and compiles them into the marketplace's textual query format.
//! Creation is the one fallible step (a query must have a name); every
//! chained call and the final compilation are infallible.

pub mod element;

pub use element::QueryElement;

use crate::error::query::OfferingQueryError;
use element::quote;

use common::{ErrorLocation, LicenseType, Price, PricingModel};

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;

/// A search for marketplace offerings, under construction.
///
/// Built once via [`OfferingQuery::create`], then extended through chained
/// calls that each consume and return the query. Consuming `self` makes the
/// chain a functional update: a builder reference cannot alias another
/// chain, and a query that is no longer extended is safe to compile from
/// any number of threads.
///
/// ```
/// use common::{LicenseType, Money, Price, PricingModel};
/// use market_core::OfferingQuery;
/// use rust_decimal::Decimal;
///
/// let query = OfferingQuery::create("TemperatureQuery")?
///     .with_name("Temperature sensor query")
///     .with_category("schema:temperature")
///     .in_region("Barcelona")
///     .with_max_price(Price::new(
///         Money::euros(Decimal::new(2, 3)),
///         PricingModel::PerAccess,
///     ))
///     .with_license_type(LicenseType::OpenDataLicense);
///
/// assert!(query.to_query_string().contains("Barcelona"));
/// # Ok::<(), market_core::error::OfferingQueryError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OfferingQuery {
    name: String,
    display_name: Option<String>,
    elements: Vec<QueryElement>,
}

impl OfferingQuery {
    /// Create a query identified by `name`.
    ///
    /// The name is the query's mandatory identity and the only hard
    /// invariant in this module; there is no terminal re-validation step.
    /// All filters are optional.
    ///
    /// # Errors
    ///
    /// Returns [`OfferingQueryError::Incomplete`] when `name` is empty.
    #[track_caller]
    pub fn create(name: impl Into<String>) -> Result<Self, OfferingQueryError> {
        let name = name.into();

        if name.is_empty() {
            return Err(OfferingQueryError::Incomplete {
                message: String::from("Offering query name is required"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            name,
            display_name: None,
            elements: Vec::new(),
        })
    }

    /// Set the marketplace-visible display name.
    ///
    /// A scalar field: repeated calls overwrite, last call wins.
    #[must_use]
    pub fn with_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Constrain results to a functional category.
    ///
    /// A filter: repeated calls append another category fragment.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.elements.push(QueryElement::Category(category.into()));
        self
    }

    /// Constrain results to a geographic region.
    ///
    /// A filter: repeated calls append another region fragment.
    #[must_use]
    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.elements.push(QueryElement::Region(region.into()));
        self
    }

    /// Constrain results to a billing unit.
    ///
    /// A filter: repeated calls append another pricing-model fragment.
    #[must_use]
    pub fn with_pricing_model(mut self, pricing_model: PricingModel) -> Self {
        self.elements
            .push(QueryElement::PricingModel(pricing_model));
        self
    }

    /// Constrain results to offerings costing at most `price`.
    ///
    /// A filter: repeated calls append another ceiling fragment.
    #[must_use]
    pub fn with_max_price(mut self, price: Price) -> Self {
        self.elements.push(QueryElement::MaxPrice(price));
        self
    }

    /// Constrain results to a license.
    ///
    /// A filter: repeated calls append another license fragment.
    #[must_use]
    pub fn with_license_type(mut self, license: LicenseType) -> Self {
        self.elements.push(QueryElement::License(license));
        self
    }

    /// The mandatory query name set at creation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The marketplace-visible display name, when one was set.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The accumulated filter elements, in insertion order.
    pub fn elements(&self) -> &[QueryElement] {
        &self.elements
    }

    /// Compile the query into the marketplace's textual format.
    ///
    /// The mandatory name renders first, the display name next when set,
    /// then each element's fragment in insertion order. A pure function of
    /// the current state: compiling twice yields identical text, and
    /// compilation never fails.
    pub fn to_query_string(&self) -> String {
        let mut fragments = Vec::with_capacity(self.elements.len() + 2);

        fragments.push(format!("id: {}", quote(&self.name)));
        if let Some(display_name) = &self.display_name {
            fragments.push(format!("name: {}", quote(display_name)));
        }
        fragments.extend(self.elements.iter().map(QueryElement::to_query_element));

        format!("{{ {} }}", fragments.join(", "))
    }
}

impl Display for OfferingQuery {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}", self.to_query_string())
    }
}
