mod common;

use blog_admin::translation::{OpenAiClient, QUOTA_TOKEN_LIMIT, UsageGuard};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use common::{API_KEY, test_config};

async fn guard_with_usage(server: &MockServer, total_tokens: u64) -> UsageGuard {
    Mock::given(method("GET"))
        .and(path("/v1/usage"))
        .and(query_param("date", "2024-02-10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "total_tokens": total_tokens })),
        )
        .expect(1)
        .mount(server)
        .await;

    let config = test_config(&format!("{}/v1", server.uri()), Some(API_KEY));
    UsageGuard::new(OpenAiClient::from_config(reqwest::Client::new(), &config).unwrap())
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
}

#[tokio::test]
async fn usage_at_limit_is_permitted() {
    let server = MockServer::start().await;
    let guard = guard_with_usage(&server, QUOTA_TOKEN_LIMIT).await;

    let decision = guard.check_on(day()).await;

    assert!(decision.permitted);
    assert_eq!(decision.message, "번역 가능합니다.");
    let usage = decision.usage.unwrap();
    assert_eq!(usage.total_tokens, QUOTA_TOKEN_LIMIT);
    assert_eq!(usage.period_start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(usage.period_end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
}

#[tokio::test]
async fn usage_above_limit_is_denied_with_snapshot() {
    let server = MockServer::start().await;
    let guard = guard_with_usage(&server, QUOTA_TOKEN_LIMIT + 1).await;

    let decision = guard.check_on(day()).await;

    assert!(!decision.permitted);
    assert_eq!(decision.usage.unwrap().total_tokens, QUOTA_TOKEN_LIMIT + 1);
}

#[tokio::test]
async fn unreachable_usage_endpoint_is_denied() {
    let config = test_config("http://127.0.0.1:9/v1", Some(API_KEY));
    let guard =
        UsageGuard::new(OpenAiClient::from_config(reqwest::Client::new(), &config).unwrap());

    let decision = guard.check_on(day()).await;

    assert!(!decision.permitted);
    assert!(decision.usage.is_none());
}
