//! Market Insights API 서버 진입점.
//!
//! 설정을 로드하고 저장소를 연결한 뒤 HTTP 서버를 시작합니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use insights_api::metrics::setup_metrics_recorder;
use insights_api::middleware::metrics_layer;
use insights_api::openapi::swagger_ui_router;
use insights_api::repository::{connect_pool, PgInsightStore, MIGRATOR};
use insights_api::routes::create_api_router;
use insights_api::state::AppState;
use insights_core::{
    init_logging, AppConfig, DatabaseConfig, InsightStore, LogConfig, MemoryInsightStore,
    ServerConfig,
};

/// 설정에 따라 저장소 생성.
///
/// DB 설정이 없으면 인메모리 저장소를 사용합니다 (재시작 시 데이터 유실).
async fn create_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn InsightStore>> {
    if !config.is_configured() {
        warn!("Database not configured, using in-memory store (data is not persisted)");
        return Ok(Arc::new(MemoryInsightStore::new()));
    }

    info!(target_db = %config.display_target(), "Connecting to database...");
    let pool = connect_pool(config)
        .await
        .context("데이터베이스 연결 실패")?;
    info!("Database connected");

    if config.run_migrations {
        MIGRATOR
            .run(&pool)
            .await
            .context("마이그레이션 실행 실패")?;
        info!("Database migrations applied");
    }

    Ok(Arc::new(PgInsightStore::new(pool)))
}

/// CORS 레이어 생성.
///
/// `server.cors_origins`가 비어 있으면 모든 origin을 허용합니다.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        warn!("CORS origins not configured, allowing any origin");
        AllowOrigin::any()
    } else {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 생성.
fn create_router(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    server: &ServerConfig,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router().with_state(state))
        .merge(swagger_ui_router())
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(cors_layer(server))
}

/// OpenAPI 스펙 내보내기 처리.
///
/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI` 환경변수가 설정된 경우
/// OpenAPI JSON 스펙을 stdout으로 출력합니다. 출력했으면 `true`.
fn handle_export_openapi() -> anyhow::Result<bool> {
    use insights_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if export_flag || export_env {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
        println!("{}", json);
        return Ok(true);
    }

    Ok(false)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    if handle_export_openapi()? {
        return Ok(());
    }

    let config = AppConfig::load_default().context("설정 로드 실패")?;

    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!("Starting Market Insights API server...");

    let metrics_handle = setup_metrics_recorder().context("Prometheus 레코더 설치 실패")?;
    info!("Prometheus metrics recorder initialized");

    let AppConfig {
        server,
        database,
        api,
        ..
    } = config;

    let store = create_store(&database).await?;
    info!(backend = store.backend(), "Store ready");

    let state = Arc::new(AppState::new(store, api));
    let app = create_router(state, metrics_handle, &server);

    let addr = server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{} 바인딩 실패", addr))?;

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("서버 실행 실패")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
