//! HTTP APIテスト
//!
//! GET / と POST /procesar のステータスとボディを検証

use actix_web::{test, App};
use malla_jobs::config::Config;
use malla_jobs::server::{self, models::ErrorResponse, models::HealthResponse};
use malla_common::{MatchOptions, ProcessResponse};
use serde_json::json;

fn tolerant_config() -> Config {
    Config::default()
}

fn strict_config() -> Config {
    Config {
        match_options: MatchOptions::strict(),
        ..Config::default()
    }
}

/// ヘルスチェック
#[actix_rt::test]
async fn test_health() {
    let config = tolerant_config();
    let app = test::init_service(App::new().configure(|cfg| server::configure(cfg, &config))).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, HealthResponse::ok());
}

/// 構造化データの照合
#[actix_rt::test]
async fn test_procesar_structured() {
    let config = tolerant_config();
    let app = test::init_service(App::new().configure(|cfg| server::configure(cfg, &config))).await;

    let req = test::TestRequest::post()
        .uri("/procesar")
        .set_json(json!({
            "nombreJob": "build,deploy",
            "jsonMalla": {"statuses": [
                {"name": "header"},
                {"name": "build", "jobId": "job-1"},
                {"name": "deploy", "jobId": "job-2"},
                {"name": "test", "jobId": "job-3"}
            ]}
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let response: ProcessResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.job_ids, vec!["job-1", "job-2"]);
}

/// 文字列マラの照合
#[actix_rt::test]
async fn test_procesar_loose_string() {
    let config = tolerant_config();
    let app = test::init_service(App::new().configure(|cfg| server::configure(cfg, &config))).await;

    let req = test::TestRequest::post()
        .uri("/procesar")
        .set_json(json!({
            "nombreJob": "deploy",
            "jsonMalla": "statuses=[{jobId=h,name=header},{jobId=j2,name=Deploy}]"
        }))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"jobIds": ["j2"]}));
}

/// マラ欠落は空配列
#[actix_rt::test]
async fn test_procesar_missing_malla_tolerant() {
    let config = tolerant_config();
    let app = test::init_service(App::new().configure(|cfg| server::configure(cfg, &config))).await;

    let req = test::TestRequest::post()
        .uri("/procesar")
        .set_json(json!({"nombreJob": "build"}))
        .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"jobIds": []}));
}

/// マラ欠落は400（厳格モード）
#[actix_rt::test]
async fn test_procesar_missing_malla_strict() {
    let config = strict_config();
    let app = test::init_service(App::new().configure(|cfg| server::configure(cfg, &config))).await;

    let req = test::TestRequest::post()
        .uri("/procesar")
        .set_json(json!({"nombreJob": "build", "jsonMalla": {"foo": 1}}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body = test::read_body(resp).await;
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("statuses"));
}

/// nombreJob 不正は400
#[actix_rt::test]
async fn test_procesar_invalid_filter() {
    let config = tolerant_config();
    let app = test::init_service(App::new().configure(|cfg| server::configure(cfg, &config))).await;

    for payload in [json!({"nombreJob": "   "}), json!({"nombreJob": 5}), json!({})] {
        let req = test::TestRequest::post()
            .uri("/procesar")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "payload: {}", payload);
        let body = test::read_body(resp).await;
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "nombreJob es requerido y debe ser string");
    }
}

/// 不正なJSONボディは400
#[actix_rt::test]
async fn test_procesar_malformed_body() {
    let config = tolerant_config();
    let app = test::init_service(App::new().configure(|cfg| server::configure(cfg, &config))).await;

    let req = test::TestRequest::post()
        .uri("/procesar")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

/// 上限を超えるボディは400
#[actix_rt::test]
async fn test_procesar_body_limit() {
    let config = Config {
        body_limit_bytes: 64,
        ..Config::default()
    };
    let app = test::init_service(App::new().configure(|cfg| server::configure(cfg, &config))).await;

    let req = test::TestRequest::post()
        .uri("/procesar")
        .set_json(json!({"nombreJob": "build", "jsonMalla": "x".repeat(500)}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
