/*
[INPUT]:  Mock Graph responses
[OUTPUT]: Test results for CLI command execution
[POS]:    Integration tests - command layer
[UPDATE]: When subcommands change
*/

use std::sync::Arc;

use msgraph_adapter::{ClientConfig, GraphServiceClient, StaticTokenProvider};
use msgraph_cli::commands::execute;
use msgraph_cli::{Command, GroupCommand, ListArgs, UserCommand};
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GraphServiceClient {
    let config = ClientConfig::with_base_url(format!("{}/v1.0", server.uri()));
    assert_ok!(GraphServiceClient::with_provider(
        config,
        Arc::new(StaticTokenProvider::new("cli-token"))
    ))
}

#[tokio::test]
async fn user_count_prints_number() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/users/$count"))
        .and(header("consistencylevel", "eventual"))
        .and(header("authorization", "Bearer cli-token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("128", "text/plain"))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let command = Command::User(UserCommand::Count { filter: None });
    assert_ok!(execute(&client_for(&server), &command, &mut out).await);

    assert_eq!(String::from_utf8(out).unwrap(), "128\n");
}

#[tokio::test]
async fn group_members_all_follows_pages() {
    let server = MockServer::start().await;
    let base = format!("{}/v1.0", server.uri());
    Mock::given(method("GET"))
        .and(path("/v1.0/groups/g1/members"))
        .and(query_param("$top", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": [{"@odata.type": "#microsoft.graph.user", "id": "u1"}],
            "@odata.nextLink": format!("{base}/groups/g1/members?$skiptoken=next")
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1.0/groups/g1/members"))
        .and(query_param("$skiptoken", "next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": [{"@odata.type": "#microsoft.graph.group", "id": "g2"}]
        })))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let command = Command::Group(GroupCommand::Members {
        id: "g1".to_string(),
        list: ListArgs {
            top: Some(1),
            all: true,
            ..Default::default()
        },
    });
    assert_ok!(execute(&client_for(&server), &command, &mut out).await);

    let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed[0]["@odata.type"], "#microsoft.graph.user");
    assert_eq!(printed[1]["id"], "g2");
}

#[tokio::test]
async fn missing_group_reports_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/groups/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {"code": "Request_ResourceNotFound", "message": "Resource 'nope' does not exist"}
        })))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let command = Command::Group(GroupCommand::Get {
        id: "nope".to_string(),
        select: Vec::new(),
    });
    let err = execute(&client_for(&server), &command, &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "get group nope");
    assert!(format!("{err:#}").contains("Request_ResourceNotFound"));
}
