//! 분석 설정 구조체.
//!
//! 표본 크기 하한, 심각도/신뢰도 임계값 등 분석 엔진의 튜닝 값을 정의한다.
//! 기본값은 엔진의 기준 동작이며, [`crate::config_manager::ConfigManager`]로
//! JSON 파일에서 덮어쓸 수 있다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 분석 엔진 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    // ============================================================
    // 표본 크기 하한
    // ============================================================
    /// 어떤 분석기든 실행하기 위한 전체 세션 최소 개수
    #[serde(default = "default_min_total_sessions")]
    pub min_total_sessions: usize,
    /// 피크 시간대 분석 최소 집중 세션 수
    #[serde(default = "default_peak_hours_min_sessions")]
    pub peak_hours_min_sessions: usize,
    /// 최적 세션 길이 분석 최소 집중 세션 수
    #[serde(default = "default_optimal_duration_min_sessions")]
    pub optimal_duration_min_sessions: usize,
    /// 주간 리듬 분석 최소 집중 세션 수
    #[serde(default = "default_weekly_rhythm_min_sessions")]
    pub weekly_rhythm_min_sessions: usize,

    // ============================================================
    // 집중 패턴
    // ============================================================
    /// 피크 시간대로 선택할 상위 비율 (채워진 시간대 기준)
    #[serde(default = "default_peak_hours_ratio")]
    pub peak_hours_ratio: f64,

    // ============================================================
    // 방해 패턴
    // ============================================================
    /// 방해 패턴으로 인정할 앱별 최소 세션 수
    #[serde(default = "default_distraction_min_sessions")]
    pub distraction_min_sessions: usize,
    /// 이 값 이하의 심각도는 버린다
    #[serde(default = "default_distraction_min_severity")]
    pub distraction_min_severity: f64,
    /// 자주 등장하는 시간대 판정 비율 (세션 수 대비)
    #[serde(default = "default_common_hour_ratio")]
    pub common_hour_ratio: f64,

    // ============================================================
    // 인사이트
    // ============================================================
    /// 집중 패턴 인사이트 최소 신뢰도 (초과해야 생성)
    #[serde(default = "default_insight_min_confidence")]
    pub insight_min_confidence: f64,
    /// 일정 조정 인사이트 최소 추세 신뢰도 (초과해야 생성)
    #[serde(default = "default_schedule_adjustment_min_confidence")]
    pub schedule_adjustment_min_confidence: f64,
    /// 방해 요소 인사이트 최대 개수
    #[serde(default = "default_max_distraction_insights")]
    pub max_distraction_insights: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_total_sessions: default_min_total_sessions(),
            peak_hours_min_sessions: default_peak_hours_min_sessions(),
            optimal_duration_min_sessions: default_optimal_duration_min_sessions(),
            weekly_rhythm_min_sessions: default_weekly_rhythm_min_sessions(),
            peak_hours_ratio: default_peak_hours_ratio(),
            distraction_min_sessions: default_distraction_min_sessions(),
            distraction_min_severity: default_distraction_min_severity(),
            common_hour_ratio: default_common_hour_ratio(),
            insight_min_confidence: default_insight_min_confidence(),
            schedule_adjustment_min_confidence: default_schedule_adjustment_min_confidence(),
            max_distraction_insights: default_max_distraction_insights(),
        }
    }
}

impl AnalysisConfig {
    /// 설정값 검증
    ///
    /// 비율/임계값은 [0, 1] 범위, 표본 하한은 1 이상이어야 한다.
    pub fn validate(&self) -> Result<(), CoreError> {
        let floors = [
            ("min_total_sessions", self.min_total_sessions),
            ("peak_hours_min_sessions", self.peak_hours_min_sessions),
            (
                "optimal_duration_min_sessions",
                self.optimal_duration_min_sessions,
            ),
            ("weekly_rhythm_min_sessions", self.weekly_rhythm_min_sessions),
            ("distraction_min_sessions", self.distraction_min_sessions),
        ];
        for (field, value) in floors {
            if value == 0 {
                return Err(CoreError::validation(field, "1 이상이어야 합니다"));
            }
        }

        let ratios = [
            ("peak_hours_ratio", self.peak_hours_ratio),
            ("distraction_min_severity", self.distraction_min_severity),
            ("common_hour_ratio", self.common_hour_ratio),
            ("insight_min_confidence", self.insight_min_confidence),
            (
                "schedule_adjustment_min_confidence",
                self.schedule_adjustment_min_confidence,
            ),
        ];
        for (field, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::validation(
                    field,
                    format!("0.0 ~ 1.0 범위여야 합니다 (현재 {value})"),
                ));
            }
        }

        Ok(())
    }
}

fn default_min_total_sessions() -> usize {
    10
}

fn default_peak_hours_min_sessions() -> usize {
    5
}

fn default_optimal_duration_min_sessions() -> usize {
    10
}

fn default_weekly_rhythm_min_sessions() -> usize {
    14
}

fn default_peak_hours_ratio() -> f64 {
    0.25
}

fn default_distraction_min_sessions() -> usize {
    3
}

fn default_distraction_min_severity() -> f64 {
    0.3
}

fn default_common_hour_ratio() -> f64 {
    0.3
}

fn default_insight_min_confidence() -> f64 {
    0.6
}

fn default_schedule_adjustment_min_confidence() -> f64 {
    0.6
}

fn default_max_distraction_insights() -> usize {
    3
}
