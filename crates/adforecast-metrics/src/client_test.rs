use super::*;

fn test_client(base_url: &str) -> AdsApiClient {
    AdsApiClient::with_base_url(base_url, 30, "adforecast-test", None)
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_to_root() {
    let client = test_client("https://ads.example.com");
    let url = client.endpoint(HISTORICAL_METRICS_PATH).unwrap();
    assert_eq!(
        url.as_str(),
        "https://ads.example.com/api/ai-campaign/get-historical-metrics"
    );
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = test_client("https://ads.example.com/v2/");
    let url = client.endpoint(KEYWORD_CPC_PATH).unwrap();
    assert_eq!(
        url.as_str(),
        "https://ads.example.com/v2/api/ai-campaign/get-keyword-cpc-data"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = AdsApiClient::with_base_url("not a url", 30, "ua", None).unwrap_err();
    assert!(matches!(err, MetricsError::InvalidBaseUrl { .. }));
}
