//! 통합 분석 결과 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::insight::PersonalizedInsight;
use super::pattern::{DistractionPattern, FocusPattern};
use super::time_range::TimeRange;
use super::trend::ProductivityTrend;

/// 기간 단위 패턴 분석 결과
///
/// 데이터가 부족하면 각 항목이 비어 있을 뿐 항상 유효한 값이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    /// 분석 기간
    pub range: TimeRange,
    /// 입력 세션 수
    pub session_count: usize,
    pub focus_patterns: Vec<FocusPattern>,
    pub distraction_patterns: Vec<DistractionPattern>,
    pub productivity_trend: Option<ProductivityTrend>,
    pub insights: Vec<PersonalizedInsight>,
    /// 분석 시각
    pub analyzed_at: DateTime<Utc>,
}

impl PatternAnalysis {
    /// 빈 결과 생성
    pub fn empty(range: TimeRange, session_count: usize) -> Self {
        Self {
            range,
            session_count,
            focus_patterns: Vec::new(),
            distraction_patterns: Vec::new(),
            productivity_trend: None,
            insights: Vec::new(),
            analyzed_at: Utc::now(),
        }
    }

    /// 도출된 항목이 하나도 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.focus_patterns.is_empty()
            && self.distraction_patterns.is_empty()
            && self.productivity_trend.is_none()
            && self.insights.is_empty()
    }
}
