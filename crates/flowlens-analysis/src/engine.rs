//! 패턴 분석 오케스트레이터.
//!
//! 세션 저장소 포트에서 기간 내 세션을 가져와 [`PatternAnalyzer`]로 전체 분석을 실행한다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use flowlens_core::config::AnalysisConfig;
use flowlens_core::error::CoreError;
use flowlens_core::models::analysis::PatternAnalysis;
use flowlens_core::models::time_range::TimeRange;
use flowlens_core::ports::session_store::SessionStore;
use tracing::{debug, error, info};

use crate::analyzer::PatternAnalyzer;

/// 패턴 분석 엔진
///
/// 저장소와 분석기만 보관하며 요청 간 상태를 공유하지 않는다.
pub struct PatternAnalysisEngine {
    store: Arc<dyn SessionStore>,
    analyzer: PatternAnalyzer,
}

impl PatternAnalysisEngine {
    pub fn new(store: Arc<dyn SessionStore>, config: AnalysisConfig) -> Self {
        Self {
            store,
            analyzer: PatternAnalyzer::new(config),
        }
    }

    pub fn with_defaults(store: Arc<dyn SessionStore>) -> Self {
        Self::new(store, AnalysisConfig::default())
    }

    pub fn analyzer(&self) -> &PatternAnalyzer {
        &self.analyzer
    }

    /// `[start, end)` 기간 패턴 분석
    ///
    /// 빈 기간(`start == end`)은 빈 결과, 뒤집힌 기간은 `Validation`.
    /// 저장소 오류는 그대로 전파.
    pub async fn analyze_patterns(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PatternAnalysis, CoreError> {
        let range = TimeRange::new(start, end);
        if !range.is_valid() {
            if start == end {
                debug!("빈 분석 기간: {start}");
                return Ok(PatternAnalysis::empty(range, 0));
            }
            return Err(CoreError::validation(
                "range",
                format!("시작 시각({start})이 종료 시각({end})보다 늦습니다"),
            ));
        }

        let sessions = self.store.get_sessions(start, end).await.map_err(|e| {
            error!("세션 조회 실패: {e}");
            e
        })?;

        let analysis = self.analyzer.analyze(&sessions, range);
        info!(
            sessions = analysis.session_count,
            focus_patterns = analysis.focus_patterns.len(),
            distraction_patterns = analysis.distraction_patterns.len(),
            trend = analysis.productivity_trend.is_some(),
            insights = analysis.insights.len(),
            "패턴 분석 완료"
        );
        Ok(analysis)
    }
}
