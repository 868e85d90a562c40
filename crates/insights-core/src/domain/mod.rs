//! 시장 지표 도메인 모델.

mod pagination;
mod record;

pub use pagination::*;
pub use record::*;
