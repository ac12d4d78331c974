//! 단위 테스트용 세션 생성 헬퍼.

use chrono::{DateTime, Duration, TimeZone, Utc};
use flowlens_core::models::session::{Activity, Session, SessionType};
use flowlens_core::models::time_range::TimeRange;

/// 2026-03-02 (월) 00:00 UTC 기준 시각
pub(crate) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
}

/// 기준일 + day일, hour시에 시작하는 세션
pub(crate) fn session(
    id: &str,
    day: i64,
    hour: u32,
    minutes: i64,
    session_type: SessionType,
    confidence: f64,
    apps: &[&str],
) -> Session {
    let start = base_time() + Duration::days(day) + Duration::hours(hour as i64);
    Session {
        id: id.to_string(),
        start_time: start,
        end_time: start + Duration::minutes(minutes),
        session_type,
        confidence_score: confidence,
        activities: apps
            .iter()
            .map(|app| Activity {
                app_name: app.to_string(),
                window_title: String::new(),
                duration_secs: (minutes.max(0) * 60) as u64,
            })
            .collect(),
    }
}

/// 집중 작업 세션
pub(crate) fn focus_session(id: &str, day: i64, hour: u32, minutes: i64) -> Session {
    session(
        id,
        day,
        hour,
        minutes,
        SessionType::FocusedWork,
        0.9,
        &["Visual Studio Code"],
    )
}

/// 기준일부터 30일 분석 기간
pub(crate) fn month_range() -> TimeRange {
    TimeRange::new(base_time(), base_time() + Duration::days(30))
}
