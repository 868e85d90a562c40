//! Financial Records API 라우트
//!
//! 일별 시장 지표(`market_insights`) CRUD API를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `GET /financial-records?page=&limit=` - 날짜 오름차순 페이지 조회
//! - `POST /financial-records` - 새 레코드 생성
//! - `PUT /financial-records/{date}` - 7개 값 전체 덮어쓰기
//! - `DELETE /financial-records/{date}` - 레코드 삭제 후 삭제된 행 반환

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::IntoParams;
use validator::Validate;

use insights_core::{
    parse_record_date, InsightError, MarketInsightRecord, MarketInsightValues, NewMarketInsight,
    Pagination, StoreError,
};

use crate::error::{into_api_error, invalid_input, not_found, ApiErrorResponse, ApiResult};
use crate::metrics::record_mutation;
use crate::state::AppState;

// ================================================================================================
// Request Types
// ================================================================================================

/// 목록 조회 쿼리.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRecordsQuery {
    /// 페이지 번호 (1부터, 기본값: 1)
    pub page: Option<u32>,
    /// 페이지 크기 (기본값: 10, 최대값은 설정에 따름)
    pub limit: Option<u32>,
}

// ================================================================================================
// Helpers
// ================================================================================================

fn parse_date_param(path: Result<Path<String>, PathRejection>) -> ApiResult<NaiveDate> {
    let Path(raw) = path.map_err(|rejection| invalid_input(rejection.body_text()))?;
    parse_record_date(&raw)
        .map_err(|_| invalid_input(format!("날짜 형식이 올바르지 않습니다 (YYYY-MM-DD): {}", raw)))
}

fn mutation_outcome(err: &StoreError) -> &'static str {
    match err {
        StoreError::Conflict(_) => "conflict",
        StoreError::Database(_) => "error",
    }
}

// ================================================================================================
// Handlers
// ================================================================================================

/// 레코드 목록 조회.
///
/// GET /financial-records
#[utoipa::path(
    get,
    path = "/financial-records",
    tag = "financial-records",
    params(ListRecordsQuery),
    responses(
        (status = 200, description = "레코드 목록 (날짜 오름차순)", body = Vec<MarketInsightRecord>),
        (status = 400, description = "잘못된 페이지 파라미터", body = ApiErrorResponse),
        (status = 500, description = "서버 에러", body = ApiErrorResponse)
    )
)]
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListRecordsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<MarketInsightRecord>>> {
    let Query(query) = query.map_err(|rejection| invalid_input(rejection.body_text()))?;
    let page = Pagination::from_query(query.page, query.limit, &state.api)
        .map_err(into_api_error)?;

    debug!(page = page.page, limit = page.limit, "레코드 목록 조회");

    let records = state
        .store
        .list(page)
        .await
        .map_err(|e| into_api_error(e.into()))?;

    Ok(Json(records))
}

/// 레코드 생성.
///
/// POST /financial-records
#[utoipa::path(
    post,
    path = "/financial-records",
    tag = "financial-records",
    request_body = NewMarketInsight,
    responses(
        (status = 201, description = "생성된 레코드", body = MarketInsightRecord),
        (status = 400, description = "잘못된 요청 본문", body = ApiErrorResponse),
        (status = 409, description = "같은 날짜의 레코드가 이미 존재", body = ApiErrorResponse),
        (status = 500, description = "서버 에러", body = ApiErrorResponse)
    )
)]
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewMarketInsight>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MarketInsightRecord>)> {
    let Json(request) = body.map_err(|rejection| invalid_input(rejection.body_text()))?;
    request
        .validate()
        .map_err(|e| into_api_error(InsightError::from(e)))?;

    let date = request.date;
    match state.store.insert(request).await {
        Ok(record) => {
            info!(date = %date, "레코드 생성");
            record_mutation("create", "ok");
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => {
            record_mutation("create", mutation_outcome(&e));
            Err(into_api_error(e.into()))
        }
    }
}

/// 레코드 수정.
///
/// 7개 값 모두를 덮어씁니다. 본문에서 빠진 값은 `null`이 됩니다.
///
/// PUT /financial-records/{date}
#[utoipa::path(
    put,
    path = "/financial-records/{date}",
    tag = "financial-records",
    params(
        ("date" = String, Path, description = "레코드 날짜 (YYYY-MM-DD)")
    ),
    request_body = MarketInsightValues,
    responses(
        (status = 200, description = "수정된 레코드", body = MarketInsightRecord),
        (status = 400, description = "잘못된 날짜 또는 요청 본문", body = ApiErrorResponse),
        (status = 404, description = "레코드 없음", body = ApiErrorResponse),
        (status = 500, description = "서버 에러", body = ApiErrorResponse)
    )
)]
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<MarketInsightValues>, JsonRejection>,
) -> ApiResult<Json<MarketInsightRecord>> {
    let date = parse_date_param(path)?;
    let Json(values) = body.map_err(|rejection| invalid_input(rejection.body_text()))?;
    values
        .validate()
        .map_err(|e| into_api_error(InsightError::from(e)))?;

    match state.store.update(date, values).await {
        Ok(Some(record)) => {
            info!(date = %date, "레코드 수정");
            record_mutation("update", "ok");
            Ok(Json(record))
        }
        Ok(None) => {
            debug!(date = %date, "수정할 레코드 없음");
            record_mutation("update", "not_found");
            Err(not_found())
        }
        Err(e) => {
            record_mutation("update", mutation_outcome(&e));
            Err(into_api_error(e.into()))
        }
    }
}

/// 레코드 삭제.
///
/// 삭제 직전의 행을 그대로 반환합니다.
///
/// DELETE /financial-records/{date}
#[utoipa::path(
    delete,
    path = "/financial-records/{date}",
    tag = "financial-records",
    params(
        ("date" = String, Path, description = "레코드 날짜 (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "삭제된 레코드", body = MarketInsightRecord),
        (status = 400, description = "잘못된 날짜", body = ApiErrorResponse),
        (status = 404, description = "레코드 없음", body = ApiErrorResponse),
        (status = 500, description = "서버 에러", body = ApiErrorResponse)
    )
)]
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MarketInsightRecord>> {
    let date = parse_date_param(path)?;

    match state.store.delete(date).await {
        Ok(Some(record)) => {
            info!(date = %date, "레코드 삭제");
            record_mutation("delete", "ok");
            Ok(Json(record))
        }
        Ok(None) => {
            debug!(date = %date, "삭제할 레코드 없음");
            record_mutation("delete", "not_found");
            Err(not_found())
        }
        Err(e) => {
            record_mutation("delete", mutation_outcome(&e));
            Err(into_api_error(e.into()))
        }
    }
}

// ================================================================================================
// Router
// ================================================================================================

/// Financial Records 라우터 생성.
pub fn financial_records_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/financial-records", get(list_records).post(create_record))
        .route(
            "/financial-records/{date}",
            put(update_record).delete(delete_record),
        )
}
