//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use insights_core::{MarketInsightRecord, MarketInsightValues, NewMarketInsight};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::routes::{ComponentStatus, HealthResponse};

/// Market Insights API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Market Insights API",
        description = r#"
# Market Insights REST API

일별 시장 지표(SPY, GLD, AMZN, GOOG, META, TSLA, MSFT) 레코드를 관리합니다.

## 에러 응답

모든 에러는 `{ code, message, timestamp }` 형식입니다.
서버 에러(500)는 내부 상세 내용 없이 `"Server error"`만 반환합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 및 저장소 상태"),
        (name = "financial-records", description = "일별 시장 지표 CRUD")
    ),
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,

            // ===== Records =====
            MarketInsightRecord,
            MarketInsightValues,
            NewMarketInsight,
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        crate::routes::financial_records::list_records,
        crate::routes::financial_records::create_record,
        crate::routes::financial_records::update_record,
        crate::routes::financial_records::delete_record,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
