//! 페이지 번호 기반 페이지네이션.

use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{InsightError, InsightResult};

/// 목록 조회 페이지.
///
/// `page`와 `limit`은 항상 1 이상입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// 1부터 시작하는 페이지 번호
    pub page: u32,
    /// 페이지당 레코드 수
    pub limit: u32,
}

impl Pagination {
    /// 기본 페이지 번호.
    pub const DEFAULT_PAGE: u32 = 1;

    /// 새 페이지 생성. 0은 허용하지 않습니다.
    pub fn new(page: u32, limit: u32) -> InsightResult<Self> {
        if page == 0 {
            return Err(InsightError::InvalidInput(
                "page는 1 이상이어야 합니다".to_string(),
            ));
        }
        if limit == 0 {
            return Err(InsightError::InvalidInput(
                "limit은 1 이상이어야 합니다".to_string(),
            ));
        }
        Ok(Self { page, limit })
    }

    /// 쿼리 파라미터로부터 생성합니다.
    ///
    /// 빠진 값은 기본값(`page=1`, `limit=api.default_page_size`)을 사용하고,
    /// `api.max_page_size`를 넘는 `limit`은 최대값으로 잘라냅니다.
    pub fn from_query(page: Option<u32>, limit: Option<u32>, api: &ApiConfig) -> InsightResult<Self> {
        let page = page.unwrap_or(Self::DEFAULT_PAGE);
        let limit = limit.unwrap_or(api.default_page_size);

        let pagination = Self::new(page, limit)?;
        Ok(Self {
            limit: pagination.limit.min(api.max_page_size),
            ..pagination
        })
    }

    /// 건너뛸 레코드 수: `(page - 1) * limit`. `i64` 범위를 넘으면 `i64::MAX`.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1).saturating_mul(i64::from(self.limit))
    }

    /// SQL `LIMIT` 바인딩 값.
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }
}
