//! 집중 패턴 분석기.
//!
//! 집중 세션(집중 작업, 조사)에서 세 가지 패턴을 독립적으로 도출한다:
//! - 피크 시간대: 시작 시각별 평균 길이 상위 25%
//! - 최적 세션 길이: 길이 중앙값, IQR 기반 신뢰도
//! - 주간 리듬: 요일별 평균 길이, 변동계수 기반 신뢰도
//!
//! 각 분석은 자체 표본 하한을 가지며, 미달이면 결과에서 빠진다.

use chrono::{Datelike, Timelike, Utc, Weekday};
use flowlens_core::config::AnalysisConfig;
use flowlens_core::models::pattern::{DailyAverage, FocusPattern, FocusPatternData, HourlyAverage};
use flowlens_core::models::session::Session;
use flowlens_core::models::time_range::TimeRange;
use tracing::debug;

use crate::ingestion::{meets_global_floor, SessionPartition};
use crate::stats::{clamp_unit, mean, population_std_dev, quantile_at};

/// 일요일 기준 요일 순서
const WEEK_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// 신뢰도 하한 (최적 길이, 주간 리듬)
const MIN_SPREAD_CONFIDENCE: f64 = 0.1;

/// 집중 패턴 분석
///
/// 전체 세션이 하한 미만이면 빈 목록. 결과 순서는 피크 시간대, 최적 길이, 주간 리듬.
pub fn analyze_focus_patterns(
    sessions: &[Session],
    range: &TimeRange,
    config: &AnalysisConfig,
) -> Vec<FocusPattern> {
    if !meets_global_floor(sessions, config) {
        debug!(
            "집중 패턴 분석 생략: 세션 {}개 < 하한 {}",
            sessions.len(),
            config.min_total_sessions
        );
        return Vec::new();
    }

    let partition = SessionPartition::from_sessions(sessions);
    let focus = &partition.focus;
    let detected_at = Utc::now();
    let frequency = focus.len() as f64 / range.days().max(1.0);

    let detections = [
        detect_peak_hours(focus, config),
        detect_optimal_duration(focus, config),
        detect_weekly_rhythm(focus, config),
    ];

    let patterns: Vec<FocusPattern> = detections
        .into_iter()
        .flatten()
        .map(|(data, confidence)| FocusPattern {
            data,
            confidence: clamp_unit(confidence),
            frequency,
            sample_size: focus.len(),
            detected_at,
        })
        .collect();

    debug!(
        "집중 패턴 {}개 도출 (집중 세션 {}개)",
        patterns.len(),
        focus.len()
    );
    patterns
}

/// 피크 시간대
fn detect_peak_hours(
    focus: &[&Session],
    config: &AnalysisConfig,
) -> Option<(FocusPatternData, f64)> {
    if focus.len() < config.peak_hours_min_sessions {
        debug!("피크 시간대 생략: 집중 세션 {}개", focus.len());
        return None;
    }

    let mut totals = [0.0_f64; 24];
    let mut counts = [0_usize; 24];
    for session in focus {
        let hour = session.start_time.hour() as usize;
        totals[hour] += session.duration_minutes();
        counts[hour] += 1;
    }

    let hourly_averages: Vec<HourlyAverage> = (0..24)
        .filter(|&h| counts[h] > 0)
        .map(|h| HourlyAverage {
            hour: h as u32,
            average_minutes: totals[h] / counts[h] as f64,
            session_count: counts[h],
        })
        .collect();
    if hourly_averages.is_empty() {
        return None;
    }

    // 평균 내림차순, 동률이면 이른 시각 우선
    let mut ranked: Vec<&HourlyAverage> = hourly_averages.iter().collect();
    ranked.sort_by(|a, b| {
        b.average_minutes
            .total_cmp(&a.average_minutes)
            .then(a.hour.cmp(&b.hour))
    });

    let take = ((hourly_averages.len() as f64 * config.peak_hours_ratio).ceil() as usize).max(1);
    let selected = &ranked[..take.min(ranked.len())];

    let total: f64 = hourly_averages.iter().map(|h| h.average_minutes).sum();
    let selected_total: f64 = selected.iter().map(|h| h.average_minutes).sum();
    let confidence = if total > 0.0 {
        selected_total / total
    } else {
        0.0
    };

    let mut hours: Vec<u32> = selected.iter().map(|h| h.hour).collect();
    hours.sort_unstable();

    Some((
        FocusPatternData::PeakHours {
            hours,
            hourly_averages,
        },
        confidence,
    ))
}

/// 최적 세션 길이
fn detect_optimal_duration(
    focus: &[&Session],
    config: &AnalysisConfig,
) -> Option<(FocusPatternData, f64)> {
    if focus.is_empty() || focus.len() < config.optimal_duration_min_sessions {
        debug!("최적 세션 길이 생략: 집중 세션 {}개", focus.len());
        return None;
    }

    let mut minutes: Vec<f64> = focus.iter().map(|s| s.duration_minutes()).collect();
    minutes.sort_by(f64::total_cmp);

    let median = quantile_at(&minutes, 0.5);
    let iqr = quantile_at(&minutes, 0.75) - quantile_at(&minutes, 0.25);
    let confidence = if median > 0.0 {
        (1.0 - iqr / median).max(MIN_SPREAD_CONFIDENCE)
    } else {
        MIN_SPREAD_CONFIDENCE
    };

    Some((
        FocusPatternData::OptimalSessionLength {
            minutes: median.round() as u32,
            interquartile_range: iqr,
        },
        confidence,
    ))
}

/// 주간 리듬
///
/// 요일별 평균이 고를수록 신뢰도가 높다.
fn detect_weekly_rhythm(
    focus: &[&Session],
    config: &AnalysisConfig,
) -> Option<(FocusPatternData, f64)> {
    if focus.len() < config.weekly_rhythm_min_sessions {
        debug!("주간 리듬 생략: 집중 세션 {}개", focus.len());
        return None;
    }

    let mut totals = [0.0_f64; 7];
    let mut counts = [0_usize; 7];
    for session in focus {
        let day = session.start_time.weekday().num_days_from_sunday() as usize;
        totals[day] += session.duration_minutes();
        counts[day] += 1;
    }

    let daily_averages: Vec<DailyAverage> = (0..7)
        .filter(|&d| counts[d] > 0)
        .map(|d| DailyAverage {
            weekday: WEEK_FROM_SUNDAY[d],
            average_minutes: totals[d] / counts[d] as f64,
            session_count: counts[d],
        })
        .collect();

    let mut strongest: Option<&DailyAverage> = None;
    for day in &daily_averages {
        match strongest {
            Some(best) if best.average_minutes >= day.average_minutes => {}
            _ => strongest = Some(day),
        }
    }
    let strongest_day = strongest?.weekday;

    let means: Vec<f64> = daily_averages.iter().map(|d| d.average_minutes).collect();
    let avg = mean(&means);
    let confidence = if avg > 0.0 {
        (1.0 - population_std_dev(&means) / avg).max(MIN_SPREAD_CONFIDENCE)
    } else {
        MIN_SPREAD_CONFIDENCE
    };

    Some((
        FocusPatternData::ProductivityRhythm {
            daily_averages,
            strongest_day,
        },
        confidence,
    ))
}
