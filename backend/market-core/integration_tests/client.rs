use market_core::error::client::ClientError;
use market_core::{MarketplaceClient, OfferingQuery};

use common::{AccessToken, Money, Price, PricingModel};

use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DISCOVERY_PATH: &str = "/offering/search";

fn temperature_query() -> OfferingQuery {
    OfferingQuery::create("TemperatureQuery")
        .expect("non-empty name must be accepted")
        .with_category("schema:temperature")
        .in_region("Barcelona")
        .with_max_price(Price::new(Money::euros(dec!(0.002)), PricingModel::PerAccess))
}

/// **VALUE**: Verifies the happy path: compiled query text goes out, the
/// offering list comes back parsed.
///
/// **WHY THIS MATTERS**: This is the SDK's reason to exist - a fluent chain
/// on one side, typed offering descriptions on the other. It also pins the
/// wire contract: POST to the discovery endpoint, query text in the body.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The client stops sending the compiled text (matcher would miss)
/// - The endpoint path or verb drifts
/// - Response parsing loses fields
#[tokio::test]
async fn given_matching_offerings_when_discovering_then_descriptions_returned() {
    // GIVEN: A marketplace holding one matching offering
    let marketplace = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .and(body_string_contains("TemperatureQuery"))
        .and(body_string_contains("Barcelona"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "barcelona-temp-1",
                "name": "Old town temperature feed",
                "region": "Barcelona"
            }
        ])))
        .mount(&marketplace)
        .await;

    let client = MarketplaceClient::new(&marketplace.uri()).expect("mock URI must parse");

    // WHEN: Discovering
    let offerings = client
        .discover(&temperature_query())
        .await
        .expect("discovery must succeed");

    // THEN: The offering comes back typed
    assert_eq!(offerings.len(), 1);
    assert_eq!(offerings[0].id, "barcelona-temp-1");
    assert_eq!(
        offerings[0].name.as_deref(),
        Some("Old town temperature feed")
    );
    assert_eq!(offerings[0].region.as_deref(), Some("Barcelona"));
}

/// **VALUE**: Verifies a non-success response becomes the structured
/// submission-failure descriptor with the body captured verbatim.
///
/// **WHY THIS MATTERS**: The marketplace explains rejections in the
/// response body. Operators debugging a failed discovery need the status
/// code and that body, exactly as received, in one error value.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Non-2xx responses are surfaced as generic transport errors
/// - The body is dropped, truncated, or re-encoded
/// - The formatted message loses its marker/newline structure
#[tokio::test]
async fn given_rejection_with_body_when_discovering_then_marketplace_error_carries_body() {
    // GIVEN: A marketplace rejecting the query
    let marketplace = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("no offerings in this category"))
        .mount(&marketplace)
        .await;

    let client = MarketplaceClient::new(&marketplace.uri()).expect("mock URI must parse");

    // WHEN: Discovering
    let error = client
        .discover(&temperature_query())
        .await
        .expect_err("rejection must surface as an error");

    // THEN: The typed descriptor with status and verbatim body
    match error {
        ClientError::Marketplace(http_error) => {
            assert_eq!(http_error.status().as_u16(), 404);
            assert_eq!(
                http_error.response_body(),
                Some("no offerings in this category")
            );
            assert!(http_error.error_msg().contains("404"));
            assert!(http_error.error_msg().contains("Response body is"));
        }
        other => panic!("expected Marketplace error, got {other:?}"),
    }
}

/// **VALUE**: Verifies a bodyless rejection yields a descriptor without the
/// body marker.
///
/// **BUG THIS CATCHES**: Would catch an empty body being stored as
/// `Some("")`, which would emit a dangling marker and trailing newline in
/// the formatted message.
#[tokio::test]
async fn given_rejection_without_body_when_discovering_then_no_body_captured() {
    // GIVEN: A marketplace answering 500 with an empty body
    let marketplace = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&marketplace)
        .await;

    let client = MarketplaceClient::new(&marketplace.uri()).expect("mock URI must parse");

    // WHEN: Discovering
    let error = client
        .discover(&temperature_query())
        .await
        .expect_err("rejection must surface as an error");

    // THEN: No body, single-line message
    match error {
        ClientError::Marketplace(http_error) => {
            assert_eq!(http_error.status().as_u16(), 500);
            assert_eq!(http_error.response_body(), None);
            assert!(!http_error.error_msg().contains('\n'));
        }
        other => panic!("expected Marketplace error, got {other:?}"),
    }
}

/// **VALUE**: Verifies one transient failure is retried to success.
///
/// **WHY THIS MATTERS**: Marketplace maintenance windows answer 503 for
/// seconds at a time. Consumers should see a slow success, not a spurious
/// failure they then retry by hand.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The retry loop is removed or stops consulting is_retryable
/// - Retries re-send to a different endpoint
#[tokio::test]
async fn given_transient_503_when_discovering_then_retries_to_success() {
    // GIVEN: A marketplace that is briefly unavailable, then healthy
    let marketplace = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&marketplace)
        .await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&marketplace)
        .await;

    let client = MarketplaceClient::new(&marketplace.uri()).expect("mock URI must parse");

    // WHEN: Discovering
    let offerings = client
        .discover(&temperature_query())
        .await
        .expect("second attempt must succeed");

    // THEN: The transient failure was absorbed
    assert!(offerings.is_empty());
}

/// **VALUE**: Verifies non-retryable rejections are NOT retried.
///
/// **WHY THIS MATTERS**: A 404 cannot heal; retrying it would hammer the
/// marketplace and delay the caller's error by the full backoff budget.
///
/// **BUG THIS CATCHES**: Would catch the retry predicate widening beyond
/// the transient status set.
#[tokio::test]
async fn given_permanent_rejection_when_discovering_then_fails_without_retry() {
    // GIVEN: A marketplace that rejects exactly once, then would succeed
    let marketplace = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&marketplace)
        .await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&marketplace)
        .await;

    let client = MarketplaceClient::new(&marketplace.uri()).expect("mock URI must parse");

    // WHEN: Discovering
    let result = client.discover(&temperature_query()).await;

    // THEN: The 404 surfaced immediately; the healthy mock was never reached
    assert!(matches!(result, Err(ClientError::Marketplace(_))));
}

/// **VALUE**: Verifies the access token travels as a Bearer header.
///
/// **WHY THIS MATTERS**: Authenticated marketplaces reject tokenless
/// submissions; the token must arrive in the standard Authorization form
/// without ever appearing in logs (the AccessToken type redacts itself).
///
/// **BUG THIS CATCHES**: Would catch the header name or Bearer prefix
/// drifting, or the token silently not being attached.
#[tokio::test]
async fn given_access_token_when_discovering_then_bearer_header_sent() {
    // GIVEN: A marketplace requiring this exact bearer token
    let marketplace = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCOVERY_PATH))
        .and(header("Authorization", "Bearer test-token-12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&marketplace)
        .await;

    let client = MarketplaceClient::new(&marketplace.uri())
        .expect("mock URI must parse")
        .with_access_token(AccessToken::new("test-token-12345".to_string()));

    // WHEN / THEN: Discovery succeeds only because the header matched
    let offerings = client
        .discover(&temperature_query())
        .await
        .expect("authorized discovery must succeed");
    assert!(offerings.is_empty());
}
