//! 방해 패턴 분석기.
//!
//! 방해 후보 세션(엔터테인먼트, 휴식, 불명)에 등장한 앱마다
//! 빈도, 평균 길이, 자주 발생하는 시간 구간, 직전 맥락을 계산해 심각도를 매긴다.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use flowlens_core::config::AnalysisConfig;
use flowlens_core::models::pattern::{DistractionContext, DistractionPattern, HourRange};
use flowlens_core::models::session::{Session, SessionType};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::stats::{clamp_unit, mean, mode};

/// 직전 세션 앱이 없을 때
const UNKNOWN_ACTIVITY: &str = "unknown";

// 심각도 가중치
const FREQUENCY_WEIGHT: f64 = 0.4;
const DURATION_WEIGHT: f64 = 0.3;
const CONTEXT_WEIGHT: f64 = 0.3;
/// 하루 10회에서 빈도 점수 포화
const FREQUENCY_SATURATION_PER_DAY: f64 = 10.0;
/// 60분에서 길이 점수 포화
const DURATION_SATURATION_MINS: f64 = 60.0;
const FOCUS_CONTEXT_SCORE: f64 = 0.8;
const OTHER_CONTEXT_SCORE: f64 = 0.3;

/// 방해 패턴 분석
///
/// 앱별 세션 하한과 심각도 하한을 모두 넘은 패턴만 심각도 내림차순으로 반환.
pub fn analyze_distraction_patterns(
    sessions: &[Session],
    config: &AnalysisConfig,
) -> Vec<DistractionPattern> {
    let detected_at = Utc::now();

    // 앱 → 방해 후보 세션 인덱스 (첫 등장 순서 유지)
    let mut app_order: Vec<&str> = Vec::new();
    let mut app_sessions: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, session) in sessions.iter().enumerate() {
        if !session.session_type.is_distraction_candidate() {
            continue;
        }
        for activity in &session.activities {
            let app = activity.app_name.as_str();
            let indices = app_sessions.entry(app).or_insert_with(|| {
                app_order.push(app);
                Vec::new()
            });
            if indices.last() != Some(&idx) {
                indices.push(idx);
            }
        }
    }

    let mut patterns: Vec<DistractionPattern> = app_order
        .into_iter()
        .filter_map(|app| {
            let indices = &app_sessions[app];
            if indices.len() < config.distraction_min_sessions {
                debug!("방해 패턴 생략: {} 세션 {}개", app, indices.len());
                return None;
            }
            let pattern = build_pattern(app, indices, sessions, config, detected_at);
            if pattern.severity <= config.distraction_min_severity {
                debug!("방해 패턴 생략: {} 심각도 {:.3}", app, pattern.severity);
                return None;
            }
            Some(pattern)
        })
        .collect();

    patterns.sort_by(|a, b| {
        b.severity
            .total_cmp(&a.severity)
            .then_with(|| a.trigger.cmp(&b.trigger))
    });

    debug!("방해 패턴 {}개 도출", patterns.len());
    patterns
}

/// 단일 앱 패턴 계산
fn build_pattern(
    app: &str,
    indices: &[usize],
    sessions: &[Session],
    config: &AnalysisConfig,
    detected_at: DateTime<Utc>,
) -> DistractionPattern {
    let qualifying: Vec<&Session> = indices.iter().map(|&i| &sessions[i]).collect();
    let count = qualifying.len();

    let minutes: Vec<f64> = qualifying.iter().map(|s| s.duration_minutes()).collect();
    let average_duration = mean(&minutes);

    let days: BTreeSet<NaiveDate> = qualifying.iter().map(|s| s.start_time.date_naive()).collect();
    let frequency_per_day = if days.is_empty() {
        0.0
    } else {
        count as f64 / days.len() as f64
    };

    let common_time_ranges = common_hour_ranges(&qualifying, config.common_hour_ratio);
    let context = preceding_context(indices, sessions);
    let severity = severity_score(frequency_per_day, average_duration, &context);

    DistractionPattern {
        trigger: app.to_string(),
        average_duration,
        frequency_per_day,
        common_time_ranges,
        context,
        severity,
        session_count: count,
        detected_at,
    }
}

/// 자주 발생하는 시작 시각을 연속 구간으로 병합
fn common_hour_ranges(qualifying: &[&Session], ratio: f64) -> Vec<HourRange> {
    let mut counts = [0_usize; 24];
    for session in qualifying {
        counts[session.start_time.hour() as usize] += 1;
    }
    let threshold = (ratio * qualifying.len() as f64).max(1.0);

    let mut ranges: Vec<HourRange> = Vec::new();
    for hour in (0..24_u32).filter(|&h| counts[h as usize] as f64 >= threshold) {
        match ranges.last_mut() {
            Some(range) if range.end_hour + 1 == hour => range.end_hour = hour,
            _ => ranges.push(HourRange {
                start_hour: hour,
                end_hour: hour,
            }),
        }
    }
    ranges
}

/// 목록상 바로 앞 세션으로 맥락 계산
///
/// 시간 간격은 보지 않는다. 긴 공백 뒤의 세션도 직전 세션으로 취급한다.
fn preceding_context(indices: &[usize], sessions: &[Session]) -> DistractionContext {
    let previous: Vec<&Session> = indices
        .iter()
        .filter(|&&i| i > 0)
        .map(|&i| &sessions[i - 1])
        .collect();

    let previous_activity = mode(previous.iter().filter_map(|s| s.dominant_app()))
        .unwrap_or(UNKNOWN_ACTIVITY)
        .to_string();
    let previous_session_type =
        mode(previous.iter().map(|s| s.session_type)).unwrap_or(SessionType::Unclear);

    let focus_minutes: Vec<f64> = previous
        .iter()
        .filter(|s| s.session_type.is_focus())
        .map(|s| s.duration_minutes())
        .collect();

    DistractionContext {
        previous_activity,
        previous_session_type,
        focus_duration_before: mean(&focus_minutes),
    }
}

/// 심각도 = 0.4·빈도 + 0.3·길이 + 0.3·맥락
fn severity_score(
    frequency_per_day: f64,
    average_duration: f64,
    context: &DistractionContext,
) -> f64 {
    let frequency_score = (frequency_per_day / FREQUENCY_SATURATION_PER_DAY).min(1.0);
    let duration_score = (average_duration / DURATION_SATURATION_MINS).min(1.0);
    let context_score = if context.previous_session_type.is_focus() {
        FOCUS_CONTEXT_SCORE
    } else {
        OTHER_CONTEXT_SCORE
    };

    clamp_unit(
        FREQUENCY_WEIGHT * frequency_score
            + DURATION_WEIGHT * duration_score
            + CONTEXT_WEIGHT * context_score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{focus_session, session};

    fn discord(id: &str, day: i64, hour: u32, minutes: i64) -> Session {
        session(id, day, hour, minutes, SessionType::Entertainment, 0.8, &["Discord"])
    }

    #[test]
    fn discord_after_deep_work() {
        let sessions = vec![
            focus_session("f1", 0, 9, 90),
            discord("d1", 0, 11, 45),
            focus_session("f2", 1, 9, 90),
            discord("d2", 1, 11, 45),
            focus_session("f3", 2, 9, 90),
            discord("d3", 2, 11, 45),
        ];

        let patterns = analyze_distraction_patterns(&sessions, &AnalysisConfig::default());
        assert_eq!(patterns.len(), 1);

        let pattern = &patterns[0];
        assert_eq!(pattern.trigger, "Discord");
        assert_eq!(pattern.session_count, 3);
        assert!((pattern.frequency_per_day - 1.0).abs() < 1e-9);
        assert!((pattern.average_duration - 45.0).abs() < 1e-9);
        assert_eq!(pattern.context.previous_session_type, SessionType::FocusedWork);
        assert_eq!(pattern.context.previous_activity, "Visual Studio Code");
        assert!((pattern.context.focus_duration_before - 90.0).abs() < 1e-9);
        // 0.04 + 0.225 + 0.24
        assert!((pattern.severity - 0.505).abs() < 1e-9);
        assert_eq!(
            pattern.common_time_ranges,
            vec![HourRange {
                start_hour: 11,
                end_hour: 11
            }]
        );
    }

    #[test]
    fn fewer_than_three_sessions_is_dropped() {
        let sessions = vec![
            focus_session("f1", 0, 9, 90),
            discord("d1", 0, 11, 45),
            focus_session("f2", 1, 9, 90),
            discord("d2", 1, 11, 45),
        ];
        assert!(analyze_distraction_patterns(&sessions, &AnalysisConfig::default()).is_empty());
    }

    #[test]
    fn low_severity_is_dropped() {
        // 짧고 드문 휴식, 직전 맥락도 휴식 → 0.04 + 0.025 + 0.09 = 0.155
        let sessions: Vec<_> = (0..3)
            .flat_map(|day| {
                vec![
                    session(&format!("b{day}a"), day, 10, 5, SessionType::Break, 0.9, &["Finder"]),
                    session(&format!("b{day}b"), day, 15, 5, SessionType::Break, 0.9, &["Music"]),
                ]
            })
            .collect();
        let patterns = analyze_distraction_patterns(&sessions, &AnalysisConfig::default());
        assert!(patterns.is_empty());
    }

    #[test]
    fn focus_sessions_do_not_qualify() {
        let sessions: Vec<_> = (0..5)
            .map(|i| {
                session(&format!("r{i}"), i, 10, 60, SessionType::Research, 0.9, &["Discord"])
            })
            .collect();
        assert!(analyze_distraction_patterns(&sessions, &AnalysisConfig::default()).is_empty());
    }

    #[test]
    fn sorted_by_severity_descending() {
        let mut sessions = Vec::new();
        for day in 0..3 {
            sessions.push(focus_session(&format!("f{day}"), day, 8, 60));
            sessions.push(session(
                &format!("y{day}"),
                day,
                9,
                60,
                SessionType::Entertainment,
                0.8,
                &["YouTube"],
            ));
            sessions.push(session(
                &format!("s{day}"),
                day,
                12,
                40,
                SessionType::Unclear,
                0.4,
                &["Slack"],
            ));
        }

        let patterns = analyze_distraction_patterns(&sessions, &AnalysisConfig::default());
        let triggers: Vec<_> = patterns.iter().map(|p| p.trigger.as_str()).collect();
        assert_eq!(triggers, vec!["YouTube", "Slack"]);
        assert!(patterns.windows(2).all(|w| w[0].severity >= w[1].severity));
        assert!(patterns.iter().all(|p| p.severity > 0.3 && p.severity <= 1.0));

        // Slack 직전은 YouTube 엔터테인먼트 세션
        assert_eq!(patterns[1].context.previous_activity, "YouTube");
        assert_eq!(
            patterns[1].context.previous_session_type,
            SessionType::Entertainment
        );
        assert_eq!(patterns[1].context.focus_duration_before, 0.0);
    }

    #[test]
    fn leading_session_has_no_predecessor() {
        let sessions = vec![
            discord("d1", 0, 11, 45),
            discord("d2", 1, 11, 45),
            discord("d3", 2, 11, 45),
        ];
        let patterns = analyze_distraction_patterns(&sessions, &AnalysisConfig::default());
        // 직전 분류 최빈값: entertainment 2회 → 0.04 + 0.225 + 0.09
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].context.previous_activity, "Discord");
        assert!((patterns[0].severity - 0.355).abs() < 1e-9);

        let lone = analyze_distraction_patterns(&sessions[..1], &AnalysisConfig::default());
        assert!(lone.is_empty());
    }

    #[test]
    fn adjacent_hours_are_merged() {
        let qualifying_sessions: Vec<Session> = [9_u32, 10, 10, 11, 15, 15, 22]
            .iter()
            .enumerate()
            .map(|(i, h)| discord(&format!("d{i}"), i as i64, *h, 30))
            .collect();
        let refs: Vec<&Session> = qualifying_sessions.iter().collect();

        // 임계값 max(1, 0.3 * 7) = 2.1 → 10시(2), 15시(2) 모두 미달
        assert!(common_hour_ranges(&refs, 0.3).is_empty());

        // 비율 0 → 임계값 1: 9-11, 15, 22
        let ranges = common_hour_ranges(&refs, 0.0);
        assert_eq!(
            ranges,
            vec![
                HourRange { start_hour: 9, end_hour: 11 },
                HourRange { start_hour: 15, end_hour: 15 },
                HourRange { start_hour: 22, end_hour: 22 },
            ]
        );
    }
}
