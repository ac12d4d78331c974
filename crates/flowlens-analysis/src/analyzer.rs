//! 설정을 묶은 무상태 패턴 분석기.

use chrono::Utc;
use flowlens_core::config::AnalysisConfig;
use flowlens_core::models::analysis::PatternAnalysis;
use flowlens_core::models::insight::PersonalizedInsight;
use flowlens_core::models::pattern::{DistractionPattern, FocusPattern};
use flowlens_core::models::session::Session;
use flowlens_core::models::time_range::TimeRange;
use flowlens_core::models::trend::ProductivityTrend;
use tracing::debug;

use crate::ingestion::meets_global_floor;
use crate::{distraction, focus, insight, trend};

/// 패턴 분석기
///
/// 내부 상태 없이 설정만 보관하므로 여러 태스크에서 공유해도 된다.
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    config: AnalysisConfig,
}

impl PatternAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze_focus_patterns(
        &self,
        sessions: &[Session],
        range: &TimeRange,
    ) -> Vec<FocusPattern> {
        focus::analyze_focus_patterns(sessions, range, &self.config)
    }

    /// 앱별 하한만 적용 (전체 하한 없음)
    pub fn analyze_distraction_patterns(&self, sessions: &[Session]) -> Vec<DistractionPattern> {
        distraction::analyze_distraction_patterns(sessions, &self.config)
    }

    pub fn analyze_productivity_trends(
        &self,
        sessions: &[Session],
        range: &TimeRange,
    ) -> Option<ProductivityTrend> {
        trend::analyze_productivity_trends(sessions, range, &self.config)
    }

    pub fn generate_personalized_insights(
        &self,
        focus_patterns: &[FocusPattern],
        distraction_patterns: &[DistractionPattern],
        trend: Option<&ProductivityTrend>,
    ) -> Vec<PersonalizedInsight> {
        insight::generate_personalized_insights(
            focus_patterns,
            distraction_patterns,
            trend,
            &self.config,
        )
    }

    /// 전체 파이프라인 실행
    ///
    /// 전체 세션이 하한 미만이면 빈 결과.
    pub fn analyze(&self, sessions: &[Session], range: TimeRange) -> PatternAnalysis {
        if !meets_global_floor(sessions, &self.config) {
            debug!(
                "패턴 분석 생략: 세션 {}개 < 하한 {}",
                sessions.len(),
                self.config.min_total_sessions
            );
            return PatternAnalysis::empty(range, sessions.len());
        }

        let focus_patterns = self.analyze_focus_patterns(sessions, &range);
        let distraction_patterns = self.analyze_distraction_patterns(sessions);
        let productivity_trend = self.analyze_productivity_trends(sessions, &range);
        let insights = self.generate_personalized_insights(
            &focus_patterns,
            &distraction_patterns,
            productivity_trend.as_ref(),
        );

        PatternAnalysis {
            range,
            session_count: sessions.len(),
            focus_patterns,
            distraction_patterns,
            productivity_trend,
            insights,
            analyzed_at: Utc::now(),
        }
    }
}
