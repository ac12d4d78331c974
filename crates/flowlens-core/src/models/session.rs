//! 집중 세션 입력 모델.
//!
//! 분류 단계가 만들어 낸 세션 기록. 분석 엔진은 이 값을 읽기만 한다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 세션 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SessionType {
    /// 집중 작업
    FocusedWork,
    /// 조사/학습
    Research,
    /// 엔터테인먼트
    Entertainment,
    /// 휴식
    Break,
    /// 분류 불명
    #[default]
    Unclear,
}

impl SessionType {
    /// 직렬화 이름 ("focused-work" 등)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FocusedWork => "focused-work",
            Self::Research => "research",
            Self::Entertainment => "entertainment",
            Self::Break => "break",
            Self::Unclear => "unclear",
        }
    }

    /// 집중 세션인지 확인 (집중 작업, 조사)
    pub fn is_focus(&self) -> bool {
        matches!(self, Self::FocusedWork | Self::Research)
    }

    /// 방해 후보 세션인지 확인 (엔터테인먼트, 휴식, 불명)
    pub fn is_distraction_candidate(&self) -> bool {
        !self.is_focus()
    }

    /// 추세 분석의 방해 비율에 포함되는지 확인
    ///
    /// 방해 패턴 분석기의 후보 집합보다 좁다. `Unclear`는 포함하지 않는다.
    pub fn counts_as_trend_distraction(&self) -> bool {
        matches!(self, Self::Entertainment | Self::Break)
    }

    /// 한글 레이블
    pub fn label_ko(&self) -> &'static str {
        match self {
            Self::FocusedWork => "집중 작업",
            Self::Research => "조사",
            Self::Entertainment => "엔터테인먼트",
            Self::Break => "휴식",
            Self::Unclear => "불명",
        }
    }
}

/// 세션 안의 앱 사용 기록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// 앱 이름
    pub app_name: String,
    /// 창 제목
    #[serde(default)]
    pub window_title: String,
    /// 사용 시간 (초)
    #[serde(default)]
    pub duration_secs: u64,
}

/// 분류된 세션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// 세션 ID
    pub id: String,
    /// 시작 시각
    pub start_time: DateTime<Utc>,
    /// 종료 시각
    pub end_time: DateTime<Utc>,
    /// 세션 분류
    pub session_type: SessionType,
    /// 분류 신뢰도 (0.0 ~ 1.0)
    #[serde(default)]
    pub confidence_score: f64,
    /// 앱 사용 기록
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Session {
    /// 세션 길이 (음수면 0)
    pub fn duration(&self) -> Duration {
        (self.end_time - self.start_time).max(Duration::zero())
    }

    /// 세션 길이 (분, 소수)
    pub fn duration_minutes(&self) -> f64 {
        self.duration().num_seconds() as f64 / 60.0
    }

    /// 가장 오래 사용한 앱 (동률이면 먼저 기록된 앱)
    pub fn dominant_app(&self) -> Option<&str> {
        let mut best: Option<&Activity> = None;
        for activity in &self.activities {
            match best {
                Some(current) if current.duration_secs >= activity.duration_secs => {}
                _ => best = Some(activity),
            }
        }
        best.map(|a| a.app_name.as_str())
    }
}
