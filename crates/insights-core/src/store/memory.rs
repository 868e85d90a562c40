//! 인메모리 저장소.
//!
//! `BTreeMap`의 키 순서가 곧 날짜 오름차순이므로 PostgreSQL의
//! `ORDER BY date LIMIT .. OFFSET ..`과 같은 결과를 냅니다.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{InsightStore, StoreError};
use crate::domain::{MarketInsightRecord, MarketInsightValues, NewMarketInsight, Pagination};

/// 프로세스 메모리에 레코드를 보관하는 저장소.
#[derive(Debug, Default)]
pub struct MemoryInsightStore {
    records: RwLock<BTreeMap<NaiveDate, MarketInsightRecord>>,
}

impl MemoryInsightStore {
    /// 빈 저장소 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 레코드로 채운 저장소 생성 (같은 날짜는 마지막 값 유지).
    pub fn with_records(records: impl IntoIterator<Item = MarketInsightRecord>) -> Self {
        let map = records.into_iter().map(|r| (r.date, r)).collect();
        Self {
            records: RwLock::new(map),
        }
    }

    /// 저장된 레코드 수.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// 비어 있는지 확인.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl InsightStore for MemoryInsightStore {
    async fn list(&self, page: Pagination) -> Result<Vec<MarketInsightRecord>, StoreError> {
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let records = self.records.read().await;

        Ok(records
            .values()
            .skip(offset)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: NewMarketInsight) -> Result<MarketInsightRecord, StoreError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.date) {
            return Err(StoreError::Conflict(format!(
                "market_insights.date = {}",
                record.date
            )));
        }

        let record = record.into_record();
        records.insert(record.date, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        date: NaiveDate,
        values: MarketInsightValues,
    ) -> Result<Option<MarketInsightRecord>, StoreError> {
        let mut records = self.records.write().await;

        Ok(records.get_mut(&date).map(|existing| {
            existing.values = values;
            existing.clone()
        }))
    }

    async fn delete(&self, date: NaiveDate) -> Result<Option<MarketInsightRecord>, StoreError> {
        Ok(self.records.write().await.remove(&date))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
