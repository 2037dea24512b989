/*
[INPUT]:  Mock token endpoint and Graph responses
[OUTPUT]: Test results for token acquisition and bearer handling
[POS]:    Integration tests - authentication
[UPDATE]: When auth endpoints or flow changes
*/

mod common;

use std::sync::Arc;

use common::{graph_client, setup_mock_server};
use msgraph_adapter::{
    AccessTokenProvider, ClientConfig, ClientCredentialsProvider, ErrorMappings, GraphError,
    GraphServiceClient, HttpMethod, RequestAdapterExt, RequestInformation,
};
use tokio_test::assert_ok;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, Request, ResponseTemplate};

fn provider_for(server: &wiremock::MockServer) -> ClientCredentialsProvider {
    assert_ok!(ClientCredentialsProvider::with_authority(
        &server.uri(),
        "contoso-tenant",
        "app-id",
        "app-secret",
    ))
}

#[tokio::test]
async fn test_client_credentials_token_is_cached() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/contoso-tenant/oauth2/v2.0/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=app-id"))
        .and(body_string_contains("scope=https%3A%2F%2Fgraph.microsoft.com%2F.default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "app-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    assert_eq!(assert_ok!(provider.access_token().await), "app-token");
    assert_eq!(assert_ok!(provider.access_token().await), "app-token");
    assert!(!provider.cache().is_expired());
}

#[tokio::test]
async fn test_out_of_range_expiry_is_capped() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/contoso-tenant/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "expires_in": u64::MAX,
            "access_token": "forever-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    assert_eq!(assert_ok!(provider.access_token().await), "forever-token");
    assert_eq!(assert_ok!(provider.access_token().await), "forever-token");
}

#[tokio::test]
async fn test_five_minute_token_is_not_refetched() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/contoso-tenant/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "expires_in": 300,
            "access_token": "short-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    for _ in 0..3 {
        assert_eq!(assert_ok!(provider.access_token().await), "short-token");
    }
}

#[tokio::test]
async fn test_concurrent_callers_share_one_refresh() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/contoso-tenant/oauth2/v2.0/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(100))
                .set_body_json(serde_json::json!({
                    "token_type": "Bearer",
                    "expires_in": 3599,
                    "access_token": "shared-token"
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = Arc::new(provider_for(&server));
    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move { provider.access_token().await })
        })
        .collect();

    for task in tasks {
        let token = assert_ok!(assert_ok!(task.await));
        assert_eq!(token, "shared-token");
    }
}

#[tokio::test]
async fn test_token_endpoint_error_is_authentication_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/contoso-tenant/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_client",
            "error_description": "AADSTS7000215: Invalid client secret provided."
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.access_token().await.unwrap_err();

    assert!(err.is_auth_error());
    match err {
        GraphError::Authentication { message } => {
            assert!(message.starts_with("invalid_client: AADSTS7000215"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(provider.cache().is_expired());
}

#[tokio::test]
async fn test_provider_token_reaches_graph() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/contoso-tenant/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "expires_in": 3599,
            "access_token": "app-token"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1.0/groups/g1"))
        .and(header("authorization", "Bearer app-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "g1",
            "displayName": "Sales"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::with_base_url(format!("{}/v1.0", server.uri()));
    let client = assert_ok!(GraphServiceClient::with_provider(
        config,
        Arc::new(provider_for(&server))
    ));
    let group = assert_ok!(client.groups().by_group_id("g1").get(None).await);
    assert_eq!(group.display_name.as_deref(), Some("Sales"));
}

#[tokio::test]
async fn test_token_not_sent_to_foreign_host() {
    let graph = setup_mock_server().await;
    let foreign = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(|request: &Request| {
            if request.headers.contains_key("authorization") {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": []}))
            }
        })
        .expect(1)
        .mount(&foreign)
        .await;

    let client = graph_client(&graph);
    // Same interface, different host name: outside the allow-list.
    let raw_url = format!("http://localhost:{}/v1.0/users", foreign.address().port());
    let request = RequestInformation::from_raw_url(HttpMethod::Get, raw_url);
    let page: Option<serde_json::Value> = assert_ok!(
        client
            .adapter()
            .send(request, &ErrorMappings::odata())
            .await
    );
    assert!(page.is_some());
}
