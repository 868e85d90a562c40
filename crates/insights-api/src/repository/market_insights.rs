//! Market Insights Repository
//!
//! `market_insights` 테이블에 대한 PostgreSQL 저장소 구현입니다.
//! 모든 연산은 단일 파라미터 바인딩 구문이며 `RETURNING`으로 결과 행을 돌려받습니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use insights_core::{
    InsightStore, MarketInsightRecord, MarketInsightValues, NewMarketInsight, Pagination,
    StoreError,
};

// ================================================================================================
// SQL
// ================================================================================================

/// 날짜 오름차순 페이지 조회. `$1` = limit, `$2` = offset
pub const SELECT_PAGE_SQL: &str = r#"
    SELECT date, spy, gld, amzn, goog, meta, tesla, msft
    FROM market_insights
    ORDER BY date
    LIMIT $1 OFFSET $2
"#;

/// 레코드 추가.
pub const INSERT_SQL: &str = r#"
    INSERT INTO market_insights (date, spy, gld, amzn, goog, meta, tesla, msft)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING date, spy, gld, amzn, goog, meta, tesla, msft
"#;

/// 7개 값 전체 덮어쓰기. `$8` = date
pub const UPDATE_SQL: &str = r#"
    UPDATE market_insights
    SET spy = $1, gld = $2, amzn = $3, goog = $4, meta = $5, tesla = $6, msft = $7
    WHERE date = $8
    RETURNING date, spy, gld, amzn, goog, meta, tesla, msft
"#;

/// 레코드 삭제.
pub const DELETE_SQL: &str = r#"
    DELETE FROM market_insights
    WHERE date = $1
    RETURNING date, spy, gld, amzn, goog, meta, tesla, msft
"#;

// ================================================================================================
// Repository
// ================================================================================================

/// PostgreSQL 기반 시장 지표 저장소.
///
/// 풀의 연결 체크아웃/반환과 동시성 제어는 sqlx에 맡깁니다.
#[derive(Debug, Clone)]
pub struct PgInsightStore {
    pool: PgPool,
}

impl PgInsightStore {
    /// 새 저장소 생성.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// sqlx 에러를 저장소 에러로 변환합니다.
///
/// 유니크 제약 위반만 `Conflict`로 구분하고 나머지는 모두 `Database`입니다.
pub fn map_db_error(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(db_err.message().to_string());
        }
    }
    StoreError::Database(err.to_string())
}

#[async_trait]
impl InsightStore for PgInsightStore {
    async fn list(&self, page: Pagination) -> Result<Vec<MarketInsightRecord>, StoreError> {
        sqlx::query_as::<_, MarketInsightRecord>(SELECT_PAGE_SQL)
            .bind(page.limit_i64())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn insert(&self, record: NewMarketInsight) -> Result<MarketInsightRecord, StoreError> {
        let NewMarketInsight { date, values } = record;

        sqlx::query_as::<_, MarketInsightRecord>(INSERT_SQL)
            .bind(date)
            .bind(values.spy)
            .bind(values.gld)
            .bind(values.amzn)
            .bind(values.goog)
            .bind(values.meta)
            .bind(values.tesla)
            .bind(values.msft)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn update(
        &self,
        date: NaiveDate,
        values: MarketInsightValues,
    ) -> Result<Option<MarketInsightRecord>, StoreError> {
        sqlx::query_as::<_, MarketInsightRecord>(UPDATE_SQL)
            .bind(values.spy)
            .bind(values.gld)
            .bind(values.amzn)
            .bind(values.goog)
            .bind(values.meta)
            .bind(values.tesla)
            .bind(values.msft)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn delete(&self, date: NaiveDate) -> Result<Option<MarketInsightRecord>, StoreError> {
        sqlx::query_as::<_, MarketInsightRecord>(DELETE_SQL)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_db_error)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
