//! Filter fragments of a compiled offering query.

use common::{LicenseType, Price, PricingModel};

/// One constraint contributing a fragment to the compiled query text.
///
/// The set of filter kinds is closed on purpose: rendering is a single
/// exhaustive match, and adding a kind means adding one variant and its
/// arm - nothing in [`crate::query::OfferingQuery`] or the other variants
/// changes. Each variant owns exactly the data its fragment needs.
///
/// Filters are not cross-validated. A query may combine constraints no
/// offering can satisfy; resolving that is the matcher's job, not ours.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryElement {
    /// Functional category, e.g. `schema:temperature`.
    Category(String),
    /// Geographic region the offering covers.
    Region(String),
    /// Acceptable billing unit.
    PricingModel(PricingModel),
    /// Price ceiling: match offerings costing at most this much.
    MaxPrice(Price),
    /// Acceptable license terms.
    License(LicenseType),
}

impl QueryElement {
    /// Render this element as a fragment of the structured query.
    ///
    /// Fragments concatenate in insertion order inside the query's braces;
    /// each is a key followed by a scalar, or a nested object for the
    /// composite price filter. Rendering is a pure function of the
    /// element's own payload and cannot fail.
    pub fn to_query_element(&self) -> String {
        match self {
            QueryElement::Category(category) => format!("category: {}", quote(category)),
            QueryElement::Region(region) => format!("region: {}", quote(region)),
            QueryElement::PricingModel(pricing_model) => {
                format!("pricingModel: {}", pricing_model.as_query_literal())
            }
            QueryElement::MaxPrice(price) => format!(
                "price: {{ money: {{ amount: {}, currency: {} }}, pricingModel: {} }}",
                price.money().amount(),
                quote(price.money().currency()),
                price.pricing_model().as_query_literal()
            ),
            QueryElement::License(license) => {
                format!("license: {}", license.as_query_literal())
            }
        }
    }
}

/// Quote a scalar for query text, escaping embedded backslashes and quotes.
pub(crate) fn quote(raw: &str) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for character in raw.chars() {
        if character == '"' || character == '\\' {
            quoted.push('\\');
        }
        quoted.push(character);
    }
    quoted.push('"');
    quoted
}
