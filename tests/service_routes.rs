//! HTTP service routes, backed by a mocked Riot API.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lol_match_stats::service::router;
use lol_match_stats::{ApiKey, CatalogUrls, Hosts, RiotClient};

const BLUE: &str = "puuid-blue-player";
const RED: &str = "puuid-red-player";

fn sample_match() -> Value {
    serde_json::from_str(include_str!("fixtures/match.json")).unwrap()
}

async fn mock_riot() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/lol/match/v5/matches/by-puuid/{RED}/ids")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["NA1_5216932918"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lol/match/v5/matches/NA1_5216932918"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_match()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/perks.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/perks.json")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cdn/perkstyles.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/perkstyles.json")),
        )
        .mount(&server)
        .await;
    server
}

fn app(server: &MockServer) -> axum::Router {
    let client = RiotClient::new(
        &ApiKey::new("RGAPI-test-key"),
        Hosts {
            regional: server.uri(),
            platform: server.uri(),
        },
    )
    .unwrap()
    .with_catalogs(CatalogUrls {
        perks: format!("{}/cdn/perks.json", server.uri()),
        perk_styles: format!("{}/cdn/perkstyles.json", server.uri()),
    });
    router(Arc::new(client))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.expect("collect body").to_bytes();
    (status, bytes.to_vec())
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn rows_are_flattened_for_the_player() {
    let server = mock_riot().await;
    let (status, body) = get_json(app(&server), &format!("/matches/{RED}/rows")).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["champion"], "Ahri");
    assert_eq!(rows[0]["side"], "red");
    assert_eq!(rows[0]["perk_keystone"], 8112);
}

#[tokio::test]
async fn named_rows_use_catalog_names() {
    let server = mock_riot().await;
    let (status, body) = get_json(app(&server), &format!("/matches/{RED}/rows?named=true")).await;

    assert_eq!(status, StatusCode::OK);
    // 8112 is not in the fixture catalog, 5008 is
    assert_eq!(body[0]["perk_keystone"], 8112);
    assert_eq!(body[0]["perk_shard_flex"], "Adaptive Force");
}

#[tokio::test]
async fn rows_as_csv() {
    let server = mock_riot().await;
    let (status, body) = get(app(&server), &format!("/matches/{RED}/rows.csv")).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("match_id,participants,"));
    assert!(lines.next().unwrap().starts_with("NA1_5216932918,"));
    assert!(lines.next().is_none());
}

#[tokio::test]
async fn single_match_row_and_its_errors() {
    let server = mock_riot().await;

    let (status, body) = get_json(app(&server), &format!("/match/NA1_5216932918/{BLUE}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kills"], 12);
    assert_eq!(body["riot_tag"], "NA1");

    let (status, body) = get_json(app(&server), "/match/NA1_5216932918/stranger").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("stranger"));
}

#[tokio::test]
async fn malformed_match_is_unprocessable() {
    let server = mock_riot().await;
    let mut broken = sample_match();
    broken["info"]["participants"][0]
        .as_object_mut()
        .unwrap()
        .remove("goldEarned");
    Mock::given(method("GET"))
        .and(path("/lol/match/v5/matches/NA1_BROKEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(broken))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), &format!("/match/NA1_BROKEN/{BLUE}")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("goldEarned"));
}

#[tokio::test]
async fn upstream_not_found_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/riot/account/v1/accounts/by-riot-id/Nobody/000"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (status, _) = get_json(app(&server), "/account/Nobody/000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stream_emits_rows_then_done() {
    let server = mock_riot().await;
    let (status, body) = get(app(&server), &format!("/matches/{RED}/stream")).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    let row_at = text.find("event: row").unwrap();
    let done_at = text.find("event: done").unwrap();
    assert!(row_at < done_at);
    assert!(text.contains("\"champion\":\"Ahri\""));
}
