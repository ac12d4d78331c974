//! 분석 기간 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 반개구간 `[start, end)` 분석 기간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// 시작 시각 (포함)
    pub start: DateTime<Utc>,
    /// 종료 시각 (미포함)
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// 시작이 종료보다 앞서는지 확인
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// 기간 길이 (일, 소수). 역전된 기간은 0
    pub fn days(&self) -> f64 {
        ((self.end - self.start).num_seconds().max(0)) as f64 / 86_400.0
    }

    /// 시각이 기간 안에 있는지 확인
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}
