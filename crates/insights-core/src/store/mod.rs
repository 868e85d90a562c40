//! 시장 지표 저장소 추상화.
//!
//! 라우트 핸들러는 이 trait를 통해서만 데이터에 접근합니다.
//! 운영 환경에서는 PostgreSQL 구현(`insights-api`의 `PgInsightStore`)을,
//! 테스트와 DB 없는 로컬 실행에서는 [`MemoryInsightStore`]를 주입합니다.

mod memory;

pub use memory::MemoryInsightStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{MarketInsightRecord, MarketInsightValues, NewMarketInsight, Pagination};

// =============================================================================
// 에러 타입
// =============================================================================

/// 저장소 에러.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// 동일한 날짜의 레코드가 이미 존재
    #[error("중복 레코드: {0}")]
    Conflict(String),

    /// 그 외 모든 데이터베이스 에러 (연결, 제약조건, 타입 등)
    #[error("데이터베이스 에러: {0}")]
    Database(String),
}

// =============================================================================
// InsightStore Trait
// =============================================================================

/// 시장 지표 저장소 trait.
///
/// 각 메서드는 단일 구문으로 실행되며 최대 한 행만 변경합니다.
/// 구현체는 여러 요청에서 동시에 안전하게 호출될 수 있어야 합니다.
#[async_trait]
pub trait InsightStore: Send + Sync {
    /// 날짜 오름차순으로 한 페이지를 조회합니다.
    ///
    /// # Returns
    ///
    /// 최대 `page.limit`개의 레코드. 범위를 벗어나면 빈 벡터 반환.
    async fn list(&self, page: Pagination) -> Result<Vec<MarketInsightRecord>, StoreError>;

    /// 레코드를 추가하고 저장된 값을 반환합니다.
    ///
    /// # Errors
    ///
    /// - `StoreError::Conflict`: 같은 날짜의 레코드가 이미 존재
    /// - `StoreError::Database`: 그 외 저장 실패
    async fn insert(&self, record: NewMarketInsight) -> Result<MarketInsightRecord, StoreError>;

    /// 날짜에 해당하는 레코드의 7개 값을 모두 덮어씁니다.
    ///
    /// 대상이 없으면 `Ok(None)`을 반환합니다.
    async fn update(
        &self,
        date: NaiveDate,
        values: MarketInsightValues,
    ) -> Result<Option<MarketInsightRecord>, StoreError>;

    /// 날짜에 해당하는 레코드를 삭제하고 삭제 직전 값을 반환합니다.
    ///
    /// 대상이 없으면 `Ok(None)`을 반환합니다.
    async fn delete(&self, date: NaiveDate) -> Result<Option<MarketInsightRecord>, StoreError>;

    /// 저장소 연결 상태 확인 (readiness 체크용).
    async fn ping(&self) -> Result<(), StoreError>;

    /// 백엔드 이름 반환.
    ///
    /// 로깅 및 헬스 체크 응답에 사용됩니다.
    fn backend(&self) -> &'static str;
}
