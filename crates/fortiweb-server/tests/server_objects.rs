//! End-to-end checks of server object requests against a mock appliance.

use fortiweb_core::request::RawRequest;
use fortiweb_core::types::ResourceKind;
use fortiweb_core::{FortiWebConfig, RawJson};
use fortiweb_server::{
    ConcatenateOperator, CreateContentRoutingPolicyRequest, CreateMatchRuleRequest,
    CreateServerPoolRequest, CreateServerPoolRuleRequest, MatchObject, PoolMode,
    ServerObjectsClient, ServerPoolType, ServerStatus,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(uri: String) -> ServerObjectsClient {
    let config = FortiWebConfig::new(uri, "admin", "").unwrap();
    ServerObjectsClient::from_config(&config).unwrap()
}

#[tokio::test]
async fn pool_with_member_is_created_parent_first() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/ServerObjects/Server/ServerPool"))
        .and(header("Authorization", "YWRtaW46"))
        .and(body_json(json!({
            "name": "Pool_One",
            "singleServerOrServerBalance": 2,
            "dissingleServerOrServerBalance": "Server Balance",
            "type": 1,
            "distype": "Reverse Proxy",
            "serverBalanceAlgo": 1,
            "disserverBalanceAlgo": "Round Robin",
            "can_delete": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(
            "/api/v1.0/ServerObjects/Server/ServerPool/Pool_One/EditServerPoolRule",
        ))
        .and(body_json(json!({
            "ip": "192.168.10.21",
            "port": 443,
            "status": 3,
            "weight": 5,
            "connectLimit": 100,
            "ssl": true,
            "comments": "draining"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(server.uri());

    client
        .create_server_pool(&CreateServerPoolRequest::new(
            "Pool/One",
            PoolMode::ServerBalance,
            ServerPoolType::ReverseProxy,
        ))
        .await
        .unwrap();

    let member = CreateServerPoolRuleRequest {
        status: ServerStatus::Maintenance,
        weight: 5,
        connection_limit: 100,
        ssl: true,
        comments: Some("draining".into()),
        ..CreateServerPoolRuleRequest::new("Pool/One", "192.168.10.21", 443)
    };
    client.create_server_pool_rule(&member).await.unwrap();
}

#[tokio::test]
async fn content_routing_rules_follow_call_order() {
    let server = MockServer::start().await;
    let rule_path = "/api/v1.0/ServerObjects/Server/HTTPContentRoutingPolicy/route/HTTPContentRoutingPolicyNewHTTPContentRouting";

    Mock::given(method("POST"))
        .and(path("/api/v1.0/ServerObjects/Server/HTTPContentRoutingPolicy"))
        .and(body_json(json!({
            "name": "route",
            "serverPool": "Pool_One",
            "can_delete": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(rule_path))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    client
        .create_content_routing_policy(&CreateContentRoutingPolicyRequest::new(
            "route", "Pool/One",
        ))
        .await
        .unwrap();

    client
        .create_match_rule(&CreateMatchRuleRequest::new(
            "route",
            MatchObject::HttpHost,
            "shop.example.com",
        ))
        .await
        .unwrap();
    client
        .create_match_rule(
            &CreateMatchRuleRequest::new("route", MatchObject::SourceIp, "10.1.0.0/16")
                .with_concatenate(ConcatenateOperator::Or),
        )
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let rules: Vec<serde_json::Value> = received
        .iter()
        .filter(|request| request.url.path() == rule_path)
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0]["matchObject"], json!(1));
    assert_eq!(rules[0]["hostCondition"], json!(1));
    assert_eq!(rules[1]["matchObject"], json!(7));
    assert_eq!(rules[1]["sourceIPCondition"], json!(1));
    assert_eq!(rules[1]["concatenate"], json!(3));
}

#[tokio::test]
async fn delete_content_routing_policy_reports_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(
            "/api/v1.0/ServerObjects/Server/HTTPContentRoutingPolicy/route_v2",
        ))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"error":"referenced by policy"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(server.uri())
        .delete_content_routing_policy("route/v2")
        .await
        .unwrap_err();

    assert!(err.is_rejected());
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.body(), Some(r#"{"error":"referenced by policy"}"#));
}

#[tokio::test]
async fn raw_create_uses_kind_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/ServerObjects/Server/VirtualServer"))
        .and(body_json(json!({ "name": "vs-raw", "interface": "port3" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = RawRequest::new(
        ResourceKind::VirtualServer,
        RawJson::from(json!({ "name": "vs-raw", "interface": "port3" })),
    );
    let response = client_for(server.uri())
        .create_raw(&request)
        .await
        .unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn unreachable_appliance_fails_without_status() {
    let err = client_for("http://127.0.0.1:9".to_string())
        .delete_server_pool("web")
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn url_syntax_in_names_stays_in_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    client.delete_server_pool("web?old").await.unwrap();
    client
        .create_server_pool_rule(&CreateServerPoolRuleRequest::new("web#1", "10.0.0.5", 80))
        .await
        .unwrap();
    client
        .create_match_rule(&CreateMatchRuleRequest::new(
            "50% off",
            MatchObject::HttpUrl,
            "^/sale/",
        ))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);

    assert_eq!(received[0].method.as_str(), "DELETE");
    assert_eq!(
        received[0].url.path(),
        "/api/v1.0/ServerObjects/Server/ServerPool/web%3Fold"
    );
    assert_eq!(received[0].url.query(), None);

    assert_eq!(
        received[1].url.path(),
        "/api/v1.0/ServerObjects/Server/ServerPool/web%231/EditServerPoolRule"
    );
    assert_eq!(received[1].url.fragment(), None);

    assert_eq!(
        received[2].url.path(),
        "/api/v1.0/ServerObjects/Server/HTTPContentRoutingPolicy/50%25%20off/HTTPContentRoutingPolicyNewHTTPContentRouting"
    );
}

#[tokio::test]
async fn dot_segment_names_are_refused_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    for name in ["..", ".", ""] {
        let err = client.delete_virtual_server(name).await.unwrap_err();
        assert!(!err.is_transport());
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn content_routing_policy_sends_match_sequence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/ServerObjects/Server/HTTPContentRoutingPolicy"))
        .and(body_json(json!({
            "name": "route",
            "serverPool": "Pool_One",
            "matchSeq": "1",
            "can_delete": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(server.uri())
        .create_content_routing_policy(
            &CreateContentRoutingPolicyRequest::new("route", "Pool/One").with_match_sequence("1"),
        )
        .await
        .unwrap();
}
