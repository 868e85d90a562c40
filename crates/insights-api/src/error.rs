//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//! 서버 내부 에러는 상세 내용을 로그로만 남기고, 응답에는 고정 메시지만 담습니다.

use axum::http::StatusCode;
use axum::Json;
use insights_core::InsightError;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

/// 500 응답의 고정 메시지.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// 404 응답의 고정 메시지.
pub const NOT_FOUND_MESSAGE: &str = "Record not found";

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Record not found",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (INVALID_INPUT, NOT_FOUND, CONFLICT, SERVER_ERROR)
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    ///
    /// # Example
    ///
    /// ```
    /// use insights_api::error::ApiErrorResponse;
    ///
    /// let error = ApiErrorResponse::new("NOT_FOUND", "Record not found");
    /// assert_eq!(error.code(), "NOT_FOUND");
    /// ```
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 에러 코드 반환.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 에러 메시지 반환.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 에러 타입.
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// 400 INVALID_INPUT 에러.
pub fn invalid_input(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new("INVALID_INPUT", message)),
    )
}

/// 404 NOT_FOUND 에러 (고정 메시지).
pub fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new("NOT_FOUND", NOT_FOUND_MESSAGE)),
    )
}

/// 500 SERVER_ERROR 에러 (고정 메시지).
pub fn server_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiErrorResponse::new("SERVER_ERROR", SERVER_ERROR_MESSAGE)),
    )
}

/// 핵심 에러를 HTTP 에러로 변환합니다.
///
/// DB/내부 에러는 전체 내용을 `error!`로 기록하고 고정 메시지만 반환합니다.
pub fn into_api_error(err: InsightError) -> ApiError {
    match err {
        InsightError::InvalidInput(msg) => invalid_input(msg),
        InsightError::Conflict(detail) => {
            warn!(detail = %detail, "중복 레코드 생성 시도");
            (
                StatusCode::CONFLICT,
                Json(ApiErrorResponse::new(
                    "CONFLICT",
                    "Record for this date already exists",
                )),
            )
        }
        InsightError::Database(_) | InsightError::Config(_) => {
            error!(error = %err, "요청 처리 실패");
            server_error()
        }
    }
}
