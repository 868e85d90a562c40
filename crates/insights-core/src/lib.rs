//! # Insights Core
//!
//! 시장 지표 API의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 API 서버 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일별 시장 지표 레코드 및 입력 타입
//! - 페이지네이션 계산
//! - 저장소 추상화 (`InsightStore`) 및 인메모리 구현
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod store;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use store::*;
