//! 생산성 추세 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time_range::TimeRange;

/// 추세 집계 단위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl TrendPeriod {
    /// 기간 길이로 단위 결정 (1일 이하 daily, 7일 이하 weekly, 그 외 monthly)
    pub fn from_range(range: &TimeRange) -> Self {
        let days = range.days();
        if days <= 1.0 {
            Self::Daily
        } else if days <= 7.0 {
            Self::Weekly
        } else {
            Self::Monthly
        }
    }
}

/// 추세 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    /// 한글 레이블
    pub fn label_ko(&self) -> &'static str {
        match self {
            Self::Improving => "개선",
            Self::Declining => "하락",
            Self::Stable => "유지",
        }
    }
}

/// 이전/현재 구간 비교값
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    pub current: f64,
    pub previous: f64,
    /// current - previous
    pub change: f64,
    /// 변화율 (%). previous가 0이면 0
    pub change_percent: f64,
}

impl MetricChange {
    pub fn between(previous: f64, current: f64) -> Self {
        let change = current - previous;
        let change_percent = if previous == 0.0 {
            0.0
        } else {
            change / previous * 100.0
        };
        Self {
            current,
            previous,
            change,
            change_percent,
        }
    }
}

/// 추세 지표 묶음
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendMetrics {
    /// 집중 시간 합계 (분)
    pub focus_time: MetricChange,
    /// 집중 세션 평균 신뢰도
    pub session_quality: MetricChange,
    /// 엔터테인먼트/휴식 시간 비율
    pub distraction_rate: MetricChange,
}

/// 단순 예측
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendForecast {
    /// 예상 집중 시간 (분)
    pub predicted_focus_time: f64,
    /// 예상 세션 품질 (최대 1.0)
    pub predicted_quality: f64,
    pub confidence: f64,
}

/// 생산성 추세
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityTrend {
    pub period: TrendPeriod,
    pub direction: TrendDirection,
    /// 신뢰도 (0.0 ~ 1.0)
    pub confidence: f64,
    pub metrics: TrendMetrics,
    pub forecast: TrendForecast,
    /// 분석 시각
    pub analyzed_at: DateTime<Utc>,
}
