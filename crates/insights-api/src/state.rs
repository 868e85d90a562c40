//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//! 핸들러 자체는 가변 상태를 갖지 않으며, 동시성 제어는 저장소 구현에 맡깁니다.

use std::sync::Arc;

use insights_core::{ApiConfig, InsightStore};

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 시장 지표 저장소 (PostgreSQL 또는 인메모리)
    pub store: Arc<dyn InsightStore>,

    /// 페이지네이션 등 API 동작 설정
    pub api: ApiConfig,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(store: Arc<dyn InsightStore>, api: ApiConfig) -> Self {
        Self {
            store,
            api,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

/// 테스트용 AppState 생성 (빈 인메모리 저장소).
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(insights_core::MemoryInsightStore::new()),
        ApiConfig::default(),
    )
}
