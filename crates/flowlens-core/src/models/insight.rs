//! 개인화 인사이트 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 인사이트 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// 집중 최적화
    FocusOptimization,
    /// 방해 요소 줄이기
    DistractionReduction,
    /// 일정 조정
    ScheduleAdjustment,
    /// 목표 조정
    GoalAdjustment,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FocusOptimization => "focus_optimization",
            Self::DistractionReduction => "distraction_reduction",
            Self::ScheduleAdjustment => "schedule_adjustment",
            Self::GoalAdjustment => "goal_adjustment",
        }
    }
}

/// 인사이트 우선순위
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightPriority {
    Low,
    Medium,
    High,
}

/// 근거 데이터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportingData {
    /// 지표 이름 → 값
    pub metrics: BTreeMap<String, f64>,
    /// 근거가 된 패턴 이름
    pub patterns: Vec<String>,
}

impl SupportingData {
    pub fn metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    pub fn pattern(mut self, name: impl Into<String>) -> Self {
        self.patterns.push(name.into());
        self
    }
}

/// 개인화 인사이트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedInsight {
    /// 인사이트 ID (유형 + 대상에서 결정적으로 생성)
    pub id: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    /// 권장 행동 (순서 유지)
    pub recommendations: Vec<String>,
    pub priority: InsightPriority,
    /// 신뢰도 (0.0 ~ 1.0)
    pub confidence: f64,
    pub supporting_data: SupportingData,
    /// 생성 시각
    pub generated_at: DateTime<Utc>,
}
