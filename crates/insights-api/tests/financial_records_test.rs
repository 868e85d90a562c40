//! `/financial-records` API 통합 테스트.
//!
//! 인메모리 저장소(또는 실패하는 저장소)를 주입한 라우터에 직접 요청을 보냅니다.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use insights_api::{create_api_router, AppState};
use insights_core::{
    ApiConfig, InsightStore, MarketInsightRecord, MarketInsightValues, MemoryInsightStore,
    NewMarketInsight, Pagination, StoreError,
};

// ================================================================================================
// Helpers
// ================================================================================================

fn app_with_store(store: Arc<dyn InsightStore>, api: ApiConfig) -> Router {
    create_api_router().with_state(Arc::new(AppState::new(store, api)))
}

fn memory_app() -> Router {
    app_with_store(Arc::new(MemoryInsightStore::new()), ApiConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn scenario_record() -> Value {
    json!({
        "date": "2024-01-02",
        "spy": 470.5,
        "gld": 190.1,
        "amzn": 150.2,
        "goog": 140.3,
        "meta": 350.4,
        "tesla": 240.5,
        "msft": 410.6
    })
}

fn record_for(date: &str, spy: f64) -> Value {
    json!({
        "date": date,
        "spy": spy,
        "gld": null,
        "amzn": null,
        "goog": null,
        "meta": null,
        "tesla": null,
        "msft": null
    })
}

/// 모든 연산이 DB 에러를 내는 저장소.
struct BrokenStore;

const BROKEN_DETAIL: &str = "FATAL: password authentication failed for user \"insights\"";

#[async_trait]
impl InsightStore for BrokenStore {
    async fn list(&self, _: Pagination) -> Result<Vec<MarketInsightRecord>, StoreError> {
        Err(StoreError::Database(BROKEN_DETAIL.into()))
    }
    async fn insert(&self, _: NewMarketInsight) -> Result<MarketInsightRecord, StoreError> {
        Err(StoreError::Database(BROKEN_DETAIL.into()))
    }
    async fn update(
        &self,
        _: NaiveDate,
        _: MarketInsightValues,
    ) -> Result<Option<MarketInsightRecord>, StoreError> {
        Err(StoreError::Database(BROKEN_DETAIL.into()))
    }
    async fn delete(&self, _: NaiveDate) -> Result<Option<MarketInsightRecord>, StoreError> {
        Err(StoreError::Database(BROKEN_DETAIL.into()))
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(BROKEN_DETAIL.into()))
    }
    fn backend(&self) -> &'static str {
        "broken"
    }
}

// ================================================================================================
// Scenario
// ================================================================================================

#[tokio::test]
async fn test_full_record_lifecycle() {
    let app = memory_app();

    // 생성 → 201, 동일한 값 반환
    let (status, created) = send(&app, "POST", "/financial-records", Some(scenario_record())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, scenario_record());

    // 목록에 포함
    let (status, list) = send(&app, "GET", "/financial-records?page=1&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([scenario_record()]));

    // 수정 → 200, spy 변경
    let mut updated = scenario_record();
    updated["spy"] = json!(471.0);
    let mut update_body = updated.clone();
    update_body.as_object_mut().unwrap().remove("date");

    let (status, body) = send(
        &app,
        "PUT",
        "/financial-records/2024-01-02",
        Some(update_body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, updated);

    // 삭제 → 200, 마지막 값 반환
    let (status, body) = send(&app, "DELETE", "/financial-records/2024-01-02", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, updated);

    // 재삭제 → 404
    let (status, body) = send(&app, "DELETE", "/financial-records/2024-01-02", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Record not found");
}

// ================================================================================================
// List
// ================================================================================================

#[tokio::test]
async fn test_list_empty_returns_empty_array() {
    let app = memory_app();

    let (status, body) = send(&app, "GET", "/financial-records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_orders_by_date_and_pages() {
    let app = memory_app();
    for (date, spy) in [("2024-01-04", 3.0), ("2024-01-02", 1.0), ("2024-01-03", 2.0)] {
        let (status, _) = send(&app, "POST", "/financial-records", Some(record_for(date, spy))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, first) = send(&app, "GET", "/financial-records?page=1&limit=2", None).await;
    assert_eq!(
        first,
        json!([record_for("2024-01-02", 1.0), record_for("2024-01-03", 2.0)])
    );

    let (_, second) = send(&app, "GET", "/financial-records?page=2&limit=2", None).await;
    assert_eq!(second, json!([record_for("2024-01-04", 3.0)]));

    let (status, beyond) = send(&app, "GET", "/financial-records?page=5&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(beyond, json!([]));
}

#[tokio::test]
async fn test_list_limit_is_clamped() {
    let api = ApiConfig {
        default_page_size: 10,
        max_page_size: 2,
    };
    let app = app_with_store(Arc::new(MemoryInsightStore::new()), api);
    for date in ["2024-01-02", "2024-01-03", "2024-01-04"] {
        let (status, _) = send(&app, "POST", "/financial-records", Some(record_for(date, 1.0))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/financial-records?limit=500", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_rejects_invalid_paging() {
    let app = memory_app();

    for uri in [
        "/financial-records?page=0",
        "/financial-records?limit=0",
        "/financial-records?limit=abc",
        "/financial-records?page=-1",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "INVALID_INPUT");
    }
}

// ================================================================================================
// Create / Update / Delete
// ================================================================================================

#[tokio::test]
async fn test_create_missing_values_are_null() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        "POST",
        "/financial-records",
        Some(json!({ "date": "2024-01-02", "spy": 1.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, record_for("2024-01-02", 1.5));
}

#[tokio::test]
async fn test_create_accepts_explicit_nulls() {
    let app = memory_app();

    // 목록 응답과 같은 형태(명시적 null 포함)로 다시 생성할 수 있어야 함
    let body = json!({ "date": "2024-01-02", "spy": 470.5, "gld": null });
    let (status, created) = send(&app, "POST", "/financial-records", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, record_for("2024-01-02", 470.5));

    let (_, list) = send(&app, "GET", "/financial-records", None).await;
    assert_eq!(list, json!([record_for("2024-01-02", 470.5)]));

    let (status, _) = send(&app, "DELETE", "/financial-records/2024-01-02", None).await;
    assert_eq!(status, StatusCode::OK);

    let listed_shape = list[0].clone();
    let (status, recreated) = send(&app, "POST", "/financial-records", Some(listed_shape)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(recreated, record_for("2024-01-02", 470.5));
}

#[tokio::test]
async fn test_create_duplicate_date_conflicts() {
    let app = memory_app();

    let (status, _) = send(&app, "POST", "/financial-records", Some(scenario_record())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/financial-records", Some(scenario_record())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_create_rejects_bad_bodies() {
    let app = memory_app();

    let bodies = [
        json!({ "spy": 1.0 }),
        json!({ "date": "02/01/2024", "spy": 1.0 }),
        json!({ "date": "2024-01-02", "spy": "abc" }),
        json!({ "date": "2024-01-02", "gld": -3.0 }),
    ];
    for body in bodies {
        let (status, response) = send(&app, "POST", "/financial-records", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(response["code"], "INVALID_INPUT");
    }

    let (_, list) = send(&app, "GET", "/financial-records", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let app = memory_app();
    send(&app, "POST", "/financial-records", Some(scenario_record())).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/financial-records/2024-01-02",
        Some(json!({ "spy": 480.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, record_for("2024-01-02", 480.0));
}

#[tokio::test]
async fn test_update_keeps_date_from_path() {
    let app = memory_app();
    send(&app, "POST", "/financial-records", Some(scenario_record())).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/financial-records/2024-01-02",
        Some(json!({ "date": "2030-12-31", "spy": 480.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-01-02");

    let (_, list) = send(&app, "GET", "/financial-records", None).await;
    assert_eq!(list, json!([record_for("2024-01-02", 480.0)]));
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        "PUT",
        "/financial-records/2030-01-01",
        Some(json!({ "spy": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_date_path_is_bad_request() {
    let app = memory_app();

    let (status, body) = send(&app, "DELETE", "/financial-records/yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, _) = send(
        &app,
        "PUT",
        "/financial-records/2024-02-30",
        Some(json!({ "spy": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_padded_date_path_is_bad_request() {
    let app = memory_app();
    send(&app, "POST", "/financial-records", Some(scenario_record())).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/financial-records/%20%202024-01-02",
        Some(json!({ "spy": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (_, list) = send(&app, "GET", "/financial-records", None).await;
    assert_eq!(list, json!([scenario_record()]));
}

// ================================================================================================
// Storage failure
// ================================================================================================

#[tokio::test]
async fn test_storage_failure_returns_fixed_server_error() {
    let app = app_with_store(Arc::new(BrokenStore), ApiConfig::default());

    let requests = [
        ("GET", "/financial-records", None),
        ("POST", "/financial-records", Some(scenario_record())),
        ("PUT", "/financial-records/2024-01-02", Some(json!({ "spy": 1.0 }))),
        ("DELETE", "/financial-records/2024-01-02", None),
    ];

    for (method, uri, body) in requests {
        let (status, response) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(response["code"], "SERVER_ERROR");
        assert_eq!(response["message"], "Server error");
        assert!(!response.to_string().contains("password authentication"));
    }
}

#[tokio::test]
async fn test_health_ready_reports_broken_store() {
    let app = app_with_store(Arc::new(BrokenStore), ApiConfig::default());

    let (status, body) = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["store"]["backend"], "broken");
}
