//! 시장 지표 시스템의 에러 타입.
//!
//! 이 모듈은 API 서버 전반에서 사용되는 에러 타입을 정의합니다.
//! 저장소 계층 에러는 [`crate::store::StoreError`]를 참고하세요.

use thiserror::Error;

use crate::store::StoreError;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum InsightError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 중복 데이터
    #[error("중복 데이터: {0}")]
    Conflict(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type InsightResult<T> = Result<T, InsightError>;

impl From<StoreError> for InsightError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => InsightError::Conflict(msg),
            StoreError::Database(msg) => InsightError::Database(msg),
        }
    }
}

impl From<config::ConfigError> for InsightError {
    fn from(err: config::ConfigError) -> Self {
        InsightError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for InsightError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_validation_messages(&errors, &mut messages);
        messages.sort();

        InsightError::InvalidInput(messages.join(", "))
    }
}

/// 중첩 구조체를 포함한 필드 에러 메시지를 `필드: 메시지` 형태로 수집합니다.
fn collect_validation_messages(errors: &validator::ValidationErrors, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| format!("{}: {}", field, m))
                        .unwrap_or_else(|| format!("{}: 유효하지 않은 값", field))
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_validation_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_validation_messages(nested, out);
                }
            }
        }
    }
}
