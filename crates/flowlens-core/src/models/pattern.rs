//! 집중/방해 패턴 모델.
//!
//! 분석 요청마다 새로 계산되는 파생 값이며 저장하지 않는다.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::session::SessionType;

/// 집중 패턴 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusPatternType {
    /// 피크 집중 시간대
    PeakHours,
    /// 최적 세션 길이
    OptimalSessionLength,
    /// 주간 리듬
    ProductivityRhythm,
}

impl FocusPatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PeakHours => "peak_hours",
            Self::OptimalSessionLength => "optimal_session_length",
            Self::ProductivityRhythm => "productivity_rhythm",
        }
    }
}

/// 시간대별 평균 집중 시간
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyAverage {
    /// 시작 시각 (0-23, UTC)
    pub hour: u32,
    /// 평균 세션 길이 (분)
    pub average_minutes: f64,
    /// 세션 수
    pub session_count: usize,
}

/// 요일별 평균 집중 시간
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    /// 요일
    pub weekday: Weekday,
    /// 평균 세션 길이 (분)
    pub average_minutes: f64,
    /// 세션 수
    pub session_count: usize,
}

/// 패턴 종류별 데이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FocusPatternData {
    /// 피크 시간대 (오름차순, 중복 없음)
    PeakHours {
        hours: Vec<u32>,
        hourly_averages: Vec<HourlyAverage>,
    },
    /// 최적 세션 길이
    OptimalSessionLength {
        /// 중앙값 (분, 반올림)
        minutes: u32,
        /// 사분위 범위 (분)
        interquartile_range: f64,
    },
    /// 주간 리듬
    ProductivityRhythm {
        /// 일요일부터 채워진 요일만
        daily_averages: Vec<DailyAverage>,
        /// 평균 집중 시간이 가장 긴 요일
        strongest_day: Weekday,
    },
}

impl FocusPatternData {
    /// 판별자 반환
    pub fn pattern_type(&self) -> FocusPatternType {
        match self {
            Self::PeakHours { .. } => FocusPatternType::PeakHours,
            Self::OptimalSessionLength { .. } => FocusPatternType::OptimalSessionLength,
            Self::ProductivityRhythm { .. } => FocusPatternType::ProductivityRhythm,
        }
    }
}

/// 집중 패턴
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusPattern {
    /// 종류별 데이터 (`type` 태그 포함)
    #[serde(flatten)]
    pub data: FocusPatternData,
    /// 신뢰도 (0.0 ~ 1.0)
    pub confidence: f64,
    /// 분석 기간의 하루 평균 표본 세션 수
    pub frequency: f64,
    /// 표본 세션 수
    pub sample_size: usize,
    /// 도출 시각
    pub detected_at: DateTime<Utc>,
}

impl FocusPattern {
    pub fn pattern_type(&self) -> FocusPatternType {
        self.data.pattern_type()
    }
}

/// 닫힌 시간 구간 `[start_hour, end_hour]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub start_hour: u32,
    pub end_hour: u32,
}

/// 방해 직전 맥락
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistractionContext {
    /// 직전 세션에서 가장 많이 쓰인 앱 ("unknown" 가능)
    pub previous_activity: String,
    /// 직전 세션의 최빈 분류
    pub previous_session_type: SessionType,
    /// 직전 집중 세션 평균 길이 (분)
    pub focus_duration_before: f64,
}

/// 방해 패턴 (트리거 앱 단위)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistractionPattern {
    /// 트리거 앱 이름
    pub trigger: String,
    /// 평균 세션 길이 (분)
    pub average_duration: f64,
    /// 하루 평균 발생 횟수
    pub frequency_per_day: f64,
    /// 자주 발생하는 시간 구간
    pub common_time_ranges: Vec<HourRange>,
    /// 직전 맥락
    pub context: DistractionContext,
    /// 심각도 (0.0 ~ 1.0)
    pub severity: f64,
    /// 해당 앱이 등장한 방해 후보 세션 수
    pub session_count: usize,
    /// 도출 시각
    pub detected_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_pattern_serializes_with_type_tag() {
        let pattern = FocusPattern {
            data: FocusPatternData::OptimalSessionLength {
                minutes: 50,
                interquartile_range: 0.0,
            },
            confidence: 1.0,
            frequency: 2.0,
            sample_size: 15,
            detected_at: Utc::now(),
        };

        let value = serde_json::to_value(&pattern).unwrap();
        assert_eq!(value["type"], "optimal_session_length");
        assert_eq!(value["minutes"], 50);

        let back: FocusPattern = serde_json::from_value(value).unwrap();
        assert_eq!(back.pattern_type(), FocusPatternType::OptimalSessionLength);
    }
}
