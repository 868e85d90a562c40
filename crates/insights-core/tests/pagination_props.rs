//! 페이지 조회 속성 테스트
//!
//! 임의의 레코드 집합과 page/limit 조합에 대해, 조회 결과가 날짜 오름차순
//! 전체 집합에서 `(page-1)*limit`개를 건너뛴 최대 `limit`개의 구간과
//! 같은지 검증합니다.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use insights_core::{InsightStore, MarketInsightValues, MemoryInsightStore, Pagination};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn list_returns_ordered_window(
        offsets in prop::collection::btree_set(0i64..2000, 0..60),
        page in 1u32..12,
        limit in 1u32..15,
    ) {
        let dates: Vec<NaiveDate> = offsets
            .iter()
            .map(|d| base_date() + Duration::days(*d))
            .collect();

        let store = MemoryInsightStore::with_records(
            dates.iter().rev().map(|d| MarketInsightValues::default().into_record(*d)),
        );

        let pagination = Pagination::new(page, limit).unwrap();
        let listed = runtime().block_on(store.list(pagination)).unwrap();

        let expected: Vec<NaiveDate> = dates
            .iter()
            .copied()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect();
        let actual: Vec<NaiveDate> = listed.iter().map(|r| r.date).collect();

        prop_assert!(actual.len() <= limit as usize);
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn consecutive_pages_do_not_overlap(
        offsets in prop::collection::btree_set(0i64..500, 1..40),
        limit in 1u32..8,
    ) {
        let store = MemoryInsightStore::with_records(
            offsets
                .iter()
                .map(|d| MarketInsightValues::default().into_record(base_date() + Duration::days(*d))),
        );
        let rt = runtime();

        let mut seen = BTreeSet::new();
        let mut page = 1;
        loop {
            let listed = rt
                .block_on(store.list(Pagination::new(page, limit).unwrap()))
                .unwrap();
            if listed.is_empty() {
                break;
            }
            for record in listed {
                prop_assert!(seen.insert(record.date));
            }
            page += 1;
        }

        prop_assert_eq!(seen.len(), offsets.len());
    }

    #[test]
    fn offset_matches_formula(page in 1u32..=u32::MAX, limit in 1u32..=u32::MAX) {
        let pagination = Pagination::new(page, limit).unwrap();
        let expected = (i128::from(page) - 1) * i128::from(limit);
        prop_assert_eq!(
            i128::from(pagination.offset()),
            expected.min(i128::from(i64::MAX))
        );
        prop_assert!(pagination.offset() >= 0);
    }
}
