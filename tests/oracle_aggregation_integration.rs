//! Integration tests for batched oracle aggregation against a mocked subgraph

use std::collections::HashMap;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use uma_scout::common::errors::ScoutError;
use uma_scout::config::types::{OracleConfig, TransportConfig};
use uma_scout::oracle::aggregator::OracleAggregator;
use uma_scout::oracle::query::build_batch_query;
use uma_scout::transport::Transport;

fn aggregator_for(server: &MockServer) -> OracleAggregator {
    let transport = Transport::new(&TransportConfig::default()).expect("transport");
    let config = OracleConfig {
        endpoints: HashMap::from([(
            "polygon".to_string(),
            format!("{}/subgraph", server.uri()),
        )]),
        default_chain: "polygon".to_string(),
        batch_size: 8,
    };
    OracleAggregator::new(transport, config)
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_empty_input_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/subgraph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);
    let map = aggregator
        .fetch_proposals(&[], "polygon", 8, |_| panic!("no chunks expected"))
        .await
        .expect("empty run");
    assert!(map.is_empty());
}

#[tokio::test]
async fn test_chunks_arrive_in_submission_order_and_union_matches() {
    let server = MockServer::start().await;
    // Aliased fields the aggregator does not ask about are ignored, so one
    // canned body serves every batch size.
    Mock::given(method("POST"))
        .and(path("/subgraph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"m0": [], "m1": []}
        })))
        .expect(3)
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);
    let market_ids = ids(&["a", "b", "c", "d", "e"]);

    let mut chunk_keys: Vec<Vec<String>> = Vec::new();
    let map = aggregator
        .fetch_proposals(&market_ids, "polygon", 2, |chunk| {
            chunk_keys.push(chunk.keys().cloned().collect());
        })
        .await
        .expect("run");

    assert_eq!(chunk_keys.len(), 3);
    let mut seen: Vec<String> = chunk_keys.iter().flatten().cloned().collect();
    seen.sort();
    let mut expected = market_ids.clone();
    expected.sort();
    assert_eq!(seen, expected);
    // First batch carries the first two ids of the input sequence
    assert!(chunk_keys[0].contains(&"a".to_string()));
    assert!(chunk_keys[0].contains(&"b".to_string()));
    assert_eq!(map.len(), 5);
    assert!(map.values().all(Vec::is_empty));
}

#[tokio::test]
async fn test_request_body_is_the_built_batch_payload() {
    let server = MockServer::start().await;
    let batch = ids(&["7"]);
    let expected = serde_json::to_value(build_batch_query(&batch)).unwrap();

    Mock::given(method("POST"))
        .and(path("/subgraph"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"m0": [{
                "id": "0x1",
                "state": "proposed",
                "requestHash": "0xabc",
                "requestLogIndex": "3",
                "requestTimestamp": "1700000000"
            }]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);
    let map = aggregator
        .fetch_proposals(&batch, "polygon", 8, |_| {})
        .await
        .expect("run");

    let proposals = &map["7"];
    assert_eq!(proposals.len(), 1);
    // Non-requested state gets the general lookup URL form
    assert_eq!(
        proposals[0].portal_url().as_deref(),
        Some("https://oracle.uma.xyz/?transactionHash=0xabc&eventIndex=3")
    );
}

#[tokio::test]
async fn test_missing_alias_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/subgraph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"m0": [{"id": "0x1", "state": "requested"}]}
        })))
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);
    let map = aggregator
        .fetch_proposals(&ids(&["x", "y"]), "polygon", 8, |_| {})
        .await
        .expect("run");

    assert_eq!(map["x"].len(), 1);
    assert!(map["y"].is_empty());
}

#[tokio::test]
async fn test_404_endpoint_fails_the_run() {
    let server = MockServer::start().await;
    // A wrong or moved subgraph path answers 404 with a JSON error body;
    // that must surface as a transport failure, not an empty result set.
    Mock::given(method("POST"))
        .and(path("/subgraph"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "no such deployment"
        })))
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);
    let mut chunks = 0;
    let err = aggregator
        .fetch_proposals(&ids(&["7", "8"]), "polygon", 8, |_| chunks += 1)
        .await
        .expect_err("should fail");

    assert!(matches!(err, ScoutError::Transport(_)));
    assert_eq!(chunks, 0);
}

#[tokio::test]
async fn test_null_alias_counts_as_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/subgraph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"m0": null, "m1": [{"id": "0x1", "state": "requested"}]}
        })))
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);
    let mut chunks = 0;
    let map = aggregator
        .fetch_proposals(&ids(&["x", "y"]), "polygon", 8, |_| chunks += 1)
        .await
        .expect("run");

    assert!(map["x"].is_empty());
    assert_eq!(map["y"].len(), 1);
    assert_eq!(chunks, 1);
}

#[tokio::test]
async fn test_graphql_errors_abort_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/subgraph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errors": [{"message": "field does not exist"}]
        })))
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);
    let mut chunks = 0;
    let err = aggregator
        .fetch_proposals(&ids(&["a"]), "polygon", 8, |_| chunks += 1)
        .await
        .expect_err("should fail");

    assert!(matches!(err, ScoutError::GraphQl(_)));
    assert!(err.to_string().contains("field does not exist"));
    assert_eq!(chunks, 0);
}

#[tokio::test]
async fn test_unknown_chain_uses_default_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/subgraph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"m0": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server);
    let map = aggregator
        .fetch_proposals(&ids(&["a"]), "base", 8, |_| {})
        .await
        .expect("run");
    assert!(map.contains_key("a"));
}
