use delivery_calc::adapters::LeapApiClient;
use delivery_calc::config::LeapApiConfig;
use delivery_calc::core::leap::LocalLeapYears;
use delivery_calc::domain::ports::LeapYearSource;
use delivery_calc::utils::retry::RetryPolicy;
use delivery_calc::CalcError;
use httpmock::prelude::*;

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay_ms: 1,
        max_delay_ms: 5,
        jitter_percent: 0,
    }
}

fn client_for(server: &MockServer) -> LeapApiClient {
    let config = LeapApiConfig {
        base_url: server.base_url(),
        timeout_seconds: 2,
    };
    LeapApiClient::new(config, fast_retry()).unwrap()
}

#[tokio::test]
async fn test_specific_year() {
    let server = MockServer::start_async().await;
    let leap_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/2024");
            then.status(200).json_body(serde_json::json!({ "result": true }));
        })
        .await;
    let common_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/2023");
            then.status(200).json_body(serde_json::json!({ "result": false }));
        })
        .await;

    let client = client_for(&server);
    assert!(client.is_leap_year(2024).await.unwrap());
    assert!(!client.is_leap_year(2023).await.unwrap());

    leap_mock.assert_async().await;
    common_mock.assert_async().await;
}

#[tokio::test]
async fn test_range_matches_local_computation() {
    let server = MockServer::start_async().await;
    let range_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/range/1990/2010");
            then.status(200)
                .json_body(serde_json::json!({ "result": [1992, 1996, 2000, 2004, 2008] }));
        })
        .await;

    let remote = client_for(&server).leap_years_between(1990, 2010).await.unwrap();
    let local = LocalLeapYears.leap_years_between(1990, 2010).await.unwrap();

    range_mock.assert_async().await;
    assert_eq!(remote, local);
}

#[tokio::test]
async fn test_server_errors_are_retried_then_reported() {
    let server = MockServer::start_async().await;
    let failing_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/2000");
            then.status(500);
        })
        .await;

    let result = client_for(&server).is_leap_year(2000).await;

    failing_mock.assert_hits_async(3).await;
    assert!(matches!(result, Err(CalcError::ApiError(_))));
}

#[tokio::test]
async fn test_missing_result_field() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/1900");
            then.status(200).json_body(serde_json::json!({ "year": 1900 }));
        })
        .await;

    let result = client_for(&server).is_leap_year(1900).await;

    mock.assert_hits_async(3).await;
    assert!(matches!(result, Err(CalcError::UnexpectedResponse { .. })));
}

#[tokio::test]
async fn test_reversed_range_never_hits_the_network() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(serde_json::json!({ "result": [] }));
        })
        .await;

    let result = client_for(&server).leap_years_between(2010, 1990).await;

    mock.assert_hits_async(0).await;
    assert!(matches!(result, Err(CalcError::InvalidInput { .. })));
}
