//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 핸들러는 `InsightStore` trait만 알고, SQL은 이 모듈에만 존재합니다.

pub mod market_insights;

pub use market_insights::{map_db_error, PgInsightStore};

use std::str::FromStr;
use std::time::Duration;

use insights_core::DatabaseConfig;
use secrecy::ExposeSecret;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

/// `market_insights` 스키마 마이그레이션.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// 설정으로부터 연결 옵션 생성.
///
/// `url`이 있으면 URL을 우선 사용하고, 없으면 개별 필드(host/port/user/...)로 구성합니다.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let options = match config.url.as_ref().map(|u| u.expose_secret().to_string()) {
        Some(url) if !url.is_empty() => PgConnectOptions::from_str(&url)?,
        _ => {
            let mut options = PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .database(&config.name);
            if let Some(password) = &config.password {
                options = options.password(password.expose_secret());
            }
            options
        }
    };

    Ok(options.ssl_mode(parse_ssl_mode(&config.ssl_mode)))
}

fn parse_ssl_mode(raw: &str) -> PgSslMode {
    match raw.to_lowercase().as_str() {
        "disable" => PgSslMode::Disable,
        "require" => PgSslMode::Require,
        _ => PgSslMode::Prefer,
    }
}

/// 연결 풀 생성 및 연결 확인.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = connect_options(config)?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_parse_ssl_mode() {
        assert!(matches!(parse_ssl_mode("disable"), PgSslMode::Disable));
        assert!(matches!(parse_ssl_mode("REQUIRE"), PgSslMode::Require));
        assert!(matches!(parse_ssl_mode("prefer"), PgSslMode::Prefer));
    }

    #[test]
    fn test_connect_options_from_fields() {
        let config = DatabaseConfig {
            host: "db.internal".to_string(),
            port: 6543,
            user: "insights".to_string(),
            password: Some(SecretString::from("hunter2")),
            name: "markets".to_string(),
            ..Default::default()
        };

        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "insights");
        assert_eq!(options.get_database(), Some("markets"));
    }

    #[test]
    fn test_connect_options_prefers_url() {
        let config = DatabaseConfig {
            url: Some(SecretString::from("postgres://u:p@url-host:5433/from_url")),
            host: "ignored".to_string(),
            ..Default::default()
        };

        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "url-host");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_database(), Some("from_url"));
    }
}
