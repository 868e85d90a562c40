//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//!
//! 로드 순서 (뒤의 소스가 앞의 값을 덮어씀):
//! 1. 내장 기본값
//! 2. 설정 파일 (`config/default.toml`, 없으면 건너뜀)
//! 3. `INSIGHTS__` 접두사 환경변수 (예: `INSIGHTS__SERVER__PORT=9000`)
//! 4. 기존 배포 호환 환경변수 (`SERVER_PORT`, `DB_HOST`, `DB_PORT`, `DB_USER`,
//!    `DB_PASSWORD`, `DB_NAME`, `DATABASE_URL`)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;

use crate::error::{InsightError, InsightResult};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// API 동작 설정
    #[serde(default)]
    pub api: ApiConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// 허용할 CORS origin 목록 (비어 있으면 모든 origin 허용)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: default_request_timeout(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` 바인딩 주소 문자열.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// 전체 연결 URL. 설정되면 개별 필드보다 우선합니다.
    #[serde(default)]
    pub url: Option<SecretString>,
    /// 호스트 (비어 있으면 DB 미설정으로 간주)
    #[serde(default)]
    pub host: String,
    /// 포트
    #[serde(default = "default_db_port")]
    pub port: u16,
    /// 사용자
    #[serde(default)]
    pub user: String,
    /// 비밀번호
    #[serde(default)]
    pub password: Option<SecretString>,
    /// 데이터베이스 이름
    #[serde(default)]
    pub name: String,
    /// SSL 모드 (disable, prefer, require)
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    /// 최대 연결 수
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// 시작 시 마이그레이션 실행 여부
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_db_port() -> u16 {
    5432
}
fn default_ssl_mode() -> String {
    "prefer".to_string()
}
fn default_max_connections() -> u32 {
    10
}
fn default_acquire_timeout() -> u64 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: String::new(),
            port: default_db_port(),
            user: String::new(),
            password: None,
            name: String::new(),
            ssl_mode: default_ssl_mode(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    /// URL 또는 호스트가 지정되어 있는지 확인합니다.
    pub fn is_configured(&self) -> bool {
        self.url
            .as_ref()
            .map(|u| !u.expose_secret().is_empty())
            .unwrap_or(false)
            || !self.host.is_empty()
    }

    /// 로그 출력용 연결 대상 (비밀번호 제외).
    pub fn display_target(&self) -> String {
        if !self.host.is_empty() {
            format!("{}:{}/{}", self.host, self.port, self.name)
        } else {
            "DATABASE_URL".to_string()
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// span 진입/종료 이벤트 출력 여부
    #[serde(default)]
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
        }
    }
}

/// API 동작 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// `limit` 미지정 시 페이지 크기
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// 허용되는 최대 페이지 크기 (초과 요청은 잘라냄)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_page_size() -> u32 {
    10
}
fn default_max_page_size() -> u32 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 에러가 아닙니다.
    pub fn load<P: AsRef<Path>>(path: P) -> InsightResult<Self> {
        let legacy = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("INSIGHTS")
                    .separator("__")
                    .try_parsing(true),
            )
            // 기존 배포 환경변수 호환
            .set_override_option("server.port", legacy("SERVER_PORT"))?
            .set_override_option("database.url", legacy("DATABASE_URL"))?
            .set_override_option("database.host", legacy("DB_HOST"))?
            .set_override_option("database.port", legacy("DB_PORT"))?
            .set_override_option("database.user", legacy("DB_USER"))?
            .set_override_option("database.password", legacy("DB_PASSWORD"))?
            .set_override_option("database.name", legacy("DB_NAME"))?;

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// `INSIGHTS_CONFIG` 환경변수 또는 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> InsightResult<Self> {
        let path =
            std::env::var("INSIGHTS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// 값 범위 검증.
    pub fn validate(&self) -> InsightResult<()> {
        if self.api.default_page_size == 0 || self.api.max_page_size == 0 {
            return Err(InsightError::Config(
                "api.default_page_size와 api.max_page_size는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(InsightError::Config(
                "database.max_connections는 1 이상이어야 합니다".to_string(),
            ));
        }
        if !matches!(
            self.database.ssl_mode.to_lowercase().as_str(),
            "disable" | "prefer" | "require"
        ) {
            return Err(InsightError::Config(format!(
                "알 수 없는 database.ssl_mode: {}",
                self.database.ssl_mode
            )));
        }
        Ok(())
    }
}
