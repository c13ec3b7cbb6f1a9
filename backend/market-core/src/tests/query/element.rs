use crate::query::QueryElement;

use common::{LicenseType, Money, Price, PricingModel};

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// **VALUE**: Verifies the nested structure of the price-ceiling fragment.
///
/// **WHY THIS MATTERS**: The price filter is the one composite fragment:
/// the matcher expects the literal keys `price`, `money`, `amount`,
/// `currency` and `pricingModel` in a nested object. A missing or renamed
/// key makes the whole query unparseable remotely.
///
/// **BUG THIS CATCHES**: Would catch any key drifting, the amount losing
/// digits, or the pricing model rendering as something other than its
/// symbolic name.
#[test]
fn given_max_price_filter_when_rendered_then_nested_keys_and_values_present() {
    // GIVEN: A ceiling of 0.002 EUR per access
    let element = QueryElement::MaxPrice(Price::new(
        Money::euros(dec!(0.002)),
        PricingModel::PerAccess,
    ));

    // WHEN: Rendering the fragment
    let fragment = element.to_query_element();

    // THEN: All structural keys and exact values are present
    assert!(fragment.contains("price"));
    assert!(fragment.contains("money"));
    assert!(fragment.contains("amount"));
    assert!(fragment.contains("currency"));
    assert!(fragment.contains("pricingModel"));
    assert!(fragment.contains("0.002"));
    assert!(fragment.contains("\"EUR\""));
    assert!(fragment.contains("PER_ACCESS"));
}

/// **VALUE**: Verifies that a typical monthly price renders its amount with
/// no floating artifacts.
///
/// **WHY THIS MATTERS**: 1000.01 has no exact binary representation; a
/// float-based render would constrain the ceiling to a subtly different
/// number than the caller wrote.
///
/// **BUG THIS CATCHES**: Would catch a lossy numeric type sneaking into the
/// rendering path.
#[test]
fn given_monthly_price_when_rendered_then_amount_is_exact() {
    // GIVEN: 1000.01 EUR per month
    let element = QueryElement::MaxPrice(Price::new(
        Money::new(dec!(1000.01), "EUR"),
        PricingModel::PerMonth,
    ));

    // WHEN: Rendering the fragment
    let fragment = element.to_query_element();

    // THEN: The exact digits and the billing unit
    assert!(fragment.contains("amount: 1000.01,"));
    assert!(fragment.contains("PER_MONTH"));
}

/// **VALUE**: Verifies a 25-digit amount survives rendering as a full
/// integer literal.
///
/// **WHY THIS MATTERS**: Token-economy prices exceed every native float's
/// precision. The query grammar has no exponent form; the fragment must
/// spell out all 25 digits.
///
/// **BUG THIS CATCHES**: Would catch scientific notation or digit loss for
/// magnitudes beyond 64-bit float precision.
#[test]
fn given_25_digit_amount_when_rendered_then_full_literal_present() {
    // GIVEN: 2 * 10^24 Bitcoin per message
    let amount = Decimal::from_str("2000000000000000000000000").expect("valid decimal literal");
    let element = QueryElement::MaxPrice(Price::new(
        Money::new(amount, "Bitcoin"),
        PricingModel::PerMessage,
    ));

    // WHEN: Rendering the fragment
    let fragment = element.to_query_element();

    // THEN: The full literal, the currency, and the billing unit
    assert!(fragment.contains("2000000000000000000000000"));
    assert!(fragment.contains("\"Bitcoin\""));
    assert!(fragment.contains("PER_MESSAGE"));
}

/// **VALUE**: Verifies the scalar fragments each carry their key and quoted
/// value.
///
/// **BUG THIS CATCHES**: Would catch a fragment key being renamed or the
/// quoting being dropped from string scalars.
#[test]
fn given_scalar_filters_when_rendered_then_key_value_fragments_produced() {
    assert_eq!(
        QueryElement::Category("schema:temperature".to_string()).to_query_element(),
        "category: \"schema:temperature\""
    );
    assert_eq!(
        QueryElement::Region("Barcelona".to_string()).to_query_element(),
        "region: \"Barcelona\""
    );
    assert_eq!(
        QueryElement::PricingModel(PricingModel::PerMonth).to_query_element(),
        "pricingModel: PER_MONTH"
    );
    assert_eq!(
        QueryElement::License(LicenseType::OpenDataLicense).to_query_element(),
        "license: OPEN_DATA_LICENSE"
    );
}

/// **VALUE**: Verifies quotes and backslashes inside scalars are escaped.
///
/// **WHY THIS MATTERS**: Region and category values are caller-supplied
/// free text. An unescaped quote would terminate the scalar early and
/// corrupt everything after it in the compiled query.
///
/// **BUG THIS CATCHES**: Would catch the escaping being dropped from the
/// quoting helper.
#[test]
fn given_embedded_quote_when_rendered_then_escaped() {
    // GIVEN: A region containing a quote
    let element = QueryElement::Region("Barcelona \"centre\"".to_string());

    // WHEN: Rendering the fragment
    let fragment = element.to_query_element();

    // THEN: The inner quotes are escaped
    assert_eq!(fragment, "region: \"Barcelona \\\"centre\\\"\"");
}

/// **VALUE**: Verifies rendering is repeatable on the same element.
///
/// **BUG THIS CATCHES**: Would catch rendering mutating the element or
/// depending on hidden state.
#[test]
fn given_same_element_when_rendered_twice_then_output_identical() {
    let element = QueryElement::Category("schema:noise".to_string());

    assert_eq!(element.to_query_element(), element.to_query_element());
}
