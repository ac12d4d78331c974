//! 세션 수집 필터.
//!
//! 입력 세션을 집중 세션과 방해 후보 세션으로 나누고 전체 표본 하한을 판단한다.

use flowlens_core::config::AnalysisConfig;
use flowlens_core::models::session::Session;

/// 분류별로 나눈 세션 참조
#[derive(Debug, Default)]
pub struct SessionPartition<'a> {
    /// 집중 작업, 조사
    pub focus: Vec<&'a Session>,
    /// 엔터테인먼트, 휴식, 불명
    pub distraction_candidates: Vec<&'a Session>,
}

impl<'a> SessionPartition<'a> {
    /// 입력 순서를 유지하며 분리
    pub fn from_sessions(sessions: &'a [Session]) -> Self {
        let (focus, distraction_candidates): (Vec<&Session>, Vec<&Session>) = sessions
            .iter()
            .partition(|s| s.session_type.is_focus());
        Self {
            focus,
            distraction_candidates,
        }
    }
}

/// 전체 표본 하한 충족 여부
pub fn meets_global_floor(sessions: &[Session], config: &AnalysisConfig) -> bool {
    sessions.len() >= config.min_total_sessions
}
