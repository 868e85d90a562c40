//! 일별 시장 지표 레코드.
//!
//! `market_insights` 테이블의 한 행에 대응하며, 날짜가 기본 키입니다.
//! 종목 값은 데이터 수집 여부에 따라 비어 있을 수 있습니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// 추적 대상 종목 컬럼 (테이블 컬럼 순서와 동일).
pub const TICKER_COLUMNS: [&str; 7] = ["spy", "gld", "amzn", "goog", "meta", "tesla", "msft"];

/// 종목 값 검증 (0 이상).
///
/// 참고: Option<Decimal> 필드에 사용 시 validator가 Some일 때만 호출하므로 &Decimal을 받음
fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_price")
            .with_message("값은 0 이상이어야 합니다".into()));
    }
    Ok(())
}

/// 종목 값 역직렬화 (숫자 또는 `null`).
///
/// `#[serde(flatten)]` 안에서는 `null`이 unit으로 전달되므로
/// `Option` 역직렬화를 거쳐 `None`으로 받습니다.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer)
}

/// 7개 종목 값.
///
/// 수정 요청 본문으로도 사용됩니다. 모든 필드는 무조건 기록되므로
/// 요청에서 빠진 필드는 `null`로 저장됩니다 (부분 수정 없음).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct MarketInsightValues {
    /// SPDR S&P 500 ETF
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "deserialize_price"
    )]
    #[validate(custom(function = "validate_price"))]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Option<f64>, example = 470.5))]
    pub spy: Option<Decimal>,
    /// SPDR Gold Shares
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "deserialize_price"
    )]
    #[validate(custom(function = "validate_price"))]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Option<f64>, example = 190.1))]
    pub gld: Option<Decimal>,
    /// Amazon
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "deserialize_price"
    )]
    #[validate(custom(function = "validate_price"))]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Option<f64>, example = 150.2))]
    pub amzn: Option<Decimal>,
    /// Alphabet
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "deserialize_price"
    )]
    #[validate(custom(function = "validate_price"))]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Option<f64>, example = 140.3))]
    pub goog: Option<Decimal>,
    /// Meta Platforms
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "deserialize_price"
    )]
    #[validate(custom(function = "validate_price"))]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Option<f64>, example = 350.4))]
    pub meta: Option<Decimal>,
    /// Tesla
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "deserialize_price"
    )]
    #[validate(custom(function = "validate_price"))]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Option<f64>, example = 240.5))]
    pub tesla: Option<Decimal>,
    /// Microsoft
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "deserialize_price"
    )]
    #[validate(custom(function = "validate_price"))]
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Option<f64>, example = 410.6))]
    pub msft: Option<Decimal>,
}

impl MarketInsightValues {
    /// 날짜를 붙여 레코드로 변환합니다.
    pub fn into_record(self, date: NaiveDate) -> MarketInsightRecord {
        MarketInsightRecord { date, values: self }
    }
}

/// 일별 시장 지표 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct MarketInsightRecord {
    /// 관측 일자 (기본 키, 생성 후 변경 불가)
    #[cfg_attr(feature = "utoipa-support", schema(example = "2024-01-02"))]
    pub date: NaiveDate,
    /// 종목 값
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx-support", sqlx(flatten))]
    pub values: MarketInsightValues,
}

/// 레코드 생성 요청.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct NewMarketInsight {
    /// 관측 일자 (YYYY-MM-DD)
    #[cfg_attr(feature = "utoipa-support", schema(example = "2024-01-02"))]
    pub date: NaiveDate,
    /// 종목 값
    #[serde(flatten)]
    #[validate(nested)]
    pub values: MarketInsightValues,
}

impl NewMarketInsight {
    /// 저장될 레코드 형태로 변환합니다.
    pub fn into_record(self) -> MarketInsightRecord {
        self.values.into_record(self.date)
    }
}

/// 경로 파라미터의 날짜 문자열을 파싱합니다.
pub fn parse_record_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
}
