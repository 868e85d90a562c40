//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 레코드 변경 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설정하고 핸들을 반환합니다.
///
/// 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 레코드 메트릭
// ============================================================================

/// 레코드 변경 카운터 증가.
///
/// `operation`: create / update / delete, `outcome`: ok / not_found / conflict / error
pub fn record_mutation(operation: &str, outcome: &str) {
    counter!(
        "market_insights_mutations_total",
        "operation" => operation.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

// ============================================================================
// 경로 정규화 유틸리티
// ============================================================================

/// 경로에서 날짜 파라미터를 정규화합니다.
///
/// 예: `/financial-records/2024-01-02` → `/financial-records/:date`
///
/// `financial-records` 바로 뒤 세그먼트는 형식과 무관하게 `:date`로 바뀌므로
/// 잘못된 날짜 요청도 라벨 카디널리티를 늘리지 않습니다.
pub fn normalize_path(path: &str) -> String {
    let mut previous = "";
    let normalized: Vec<String> = path
        .split('/')
        .map(|segment| {
            let replaced = if !segment.is_empty()
                && (previous == "financial-records" || looks_like_date(segment))
            {
                ":date".to_string()
            } else {
                segment.to_string()
            };
            previous = segment;
            replaced
        })
        .collect();
    normalized.join("/")
}

fn looks_like_date(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}
