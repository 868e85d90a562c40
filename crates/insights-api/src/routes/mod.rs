//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/financial-records` - 일별 시장 지표 CRUD

pub mod financial_records;
pub mod health;

pub use financial_records::{financial_records_router, ListRecordsQuery};
pub use health::{health_router, ComponentStatus, HealthResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// `/metrics`, Swagger UI, 미들웨어는 `main.rs`에서 추가합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health_router())
        .merge(financial_records_router())
}
