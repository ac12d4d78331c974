//! 생산성 추세 분석기.
//!
//! 세션을 시간순으로 정렬해 앞/뒤 절반을 비교하고, 방향을 분류한 뒤
//! 현재 구간 값에 고정 배율을 곱해 단순 예측을 만든다.

use chrono::Utc;
use flowlens_core::config::AnalysisConfig;
use flowlens_core::models::session::Session;
use flowlens_core::models::time_range::TimeRange;
use flowlens_core::models::trend::{
    MetricChange, ProductivityTrend, TrendDirection, TrendForecast, TrendMetrics, TrendPeriod,
};
use tracing::debug;

use crate::ingestion::meets_global_floor;
use crate::stats::{clamp_unit, mean};

const IMPROVING_FACTOR: f64 = 1.1;
const DECLINING_FACTOR: f64 = 0.9;
const STABLE_FORECAST_CONFIDENCE: f64 = 0.9;
const SHIFTING_FORECAST_CONFIDENCE: f64 = 0.7;
const BASE_TREND_CONFIDENCE: f64 = 0.5;

/// 절반 구간 요약
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct HalfSummary {
    /// 집중 시간 합계 (분)
    focus_time: f64,
    /// 집중 세션 평균 신뢰도
    session_quality: f64,
    /// 엔터테인먼트/휴식 시간 ÷ 전체 시간
    distraction_rate: f64,
}

impl HalfSummary {
    fn from_sessions(sessions: &[&Session]) -> Self {
        let focus: Vec<&Session> = sessions
            .iter()
            .copied()
            .filter(|s| s.session_type.is_focus())
            .collect();

        let focus_time = focus.iter().map(|s| s.duration_minutes()).sum();
        let qualities: Vec<f64> = focus.iter().map(|s| s.confidence_score).collect();

        let total: f64 = sessions.iter().map(|s| s.duration_minutes()).sum();
        let distracted: f64 = sessions
            .iter()
            .filter(|s| s.session_type.counts_as_trend_distraction())
            .map(|s| s.duration_minutes())
            .sum();
        let distraction_rate = if total > 0.0 { distracted / total } else { 0.0 };

        Self {
            focus_time,
            session_quality: mean(&qualities),
            distraction_rate,
        }
    }
}

/// 생산성 추세 분석
///
/// 전체 세션이 하한 미만이면 `None`.
pub fn analyze_productivity_trends(
    sessions: &[Session],
    range: &TimeRange,
    config: &AnalysisConfig,
) -> Option<ProductivityTrend> {
    if !meets_global_floor(sessions, config) {
        debug!(
            "추세 분석 생략: 세션 {}개 < 하한 {}",
            sessions.len(),
            config.min_total_sessions
        );
        return None;
    }

    let mut ordered: Vec<&Session> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.start_time);
    let (earlier, later) = ordered.split_at(ordered.len() / 2);

    let previous = HalfSummary::from_sessions(earlier);
    let current = HalfSummary::from_sessions(later);

    let metrics = TrendMetrics {
        focus_time: MetricChange::between(previous.focus_time, current.focus_time),
        session_quality: MetricChange::between(previous.session_quality, current.session_quality),
        distraction_rate: MetricChange::between(
            previous.distraction_rate,
            current.distraction_rate,
        ),
    };

    let direction = classify_direction(&metrics);
    let forecast = forecast(direction, &current);
    let confidence = clamp_unit(
        (metrics.focus_time.change.abs()
            + metrics.session_quality.change.abs()
            + metrics.distraction_rate.change.abs())
            / 3.0
            + BASE_TREND_CONFIDENCE,
    );

    debug!(
        "추세: {}, 집중 {:.1}→{:.1}분, 품질 {:.2}→{:.2}, 방해 {:.2}→{:.2}",
        direction.label_ko(),
        previous.focus_time,
        current.focus_time,
        previous.session_quality,
        current.session_quality,
        previous.distraction_rate,
        current.distraction_rate
    );

    Some(ProductivityTrend {
        period: TrendPeriod::from_range(range),
        direction,
        confidence,
        metrics,
        forecast,
        analyzed_at: Utc::now(),
    })
}

/// 지표별 신호 투표. 동률이면 유지
fn classify_direction(metrics: &TrendMetrics) -> TrendDirection {
    let mut improving = 0;
    let mut declining = 0;

    let signals = [
        metrics.focus_time.change,
        metrics.session_quality.change,
        // 방해 비율은 감소가 개선
        -metrics.distraction_rate.change,
    ];
    for signal in signals {
        if signal > 0.0 {
            improving += 1;
        } else if signal < 0.0 {
            declining += 1;
        }
    }

    match improving.cmp(&declining) {
        std::cmp::Ordering::Greater => TrendDirection::Improving,
        std::cmp::Ordering::Less => TrendDirection::Declining,
        std::cmp::Ordering::Equal => TrendDirection::Stable,
    }
}

fn forecast(direction: TrendDirection, current: &HalfSummary) -> TrendForecast {
    let (factor, confidence) = match direction {
        TrendDirection::Improving => (IMPROVING_FACTOR, SHIFTING_FORECAST_CONFIDENCE),
        TrendDirection::Declining => (DECLINING_FACTOR, SHIFTING_FORECAST_CONFIDENCE),
        TrendDirection::Stable => (1.0, STABLE_FORECAST_CONFIDENCE),
    };

    TrendForecast {
        predicted_focus_time: current.focus_time * factor,
        predicted_quality: (current.session_quality * factor).min(1.0),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{focus_session, month_range, session};
    use flowlens_core::models::session::SessionType;

    #[test]
    fn below_floor_is_none() {
        let sessions: Vec<_> = (0..9)
            .map(|i| focus_session(&format!("s{i}"), i, 9, 50))
            .collect();
        assert!(
            analyze_productivity_trends(&sessions, &month_range(), &AnalysisConfig::default())
                .is_none()
        );
        assert!(
            analyze_productivity_trends(&[], &month_range(), &AnalysisConfig::default()).is_none()
        );
    }

    #[test]
    fn doubled_focus_time_is_improving() {
        let sessions: Vec<_> = (0..20)
            .map(|i| {
                let minutes = if i < 10 { 30 } else { 60 };
                focus_session(&format!("s{i}"), i, 9, minutes)
            })
            .collect();

        let trend =
            analyze_productivity_trends(&sessions, &month_range(), &AnalysisConfig::default())
                .unwrap();
        assert_eq!(trend.direction, TrendDirection::Improving);
        assert_eq!(trend.period, TrendPeriod::Monthly);
        assert!((trend.metrics.focus_time.previous - 300.0).abs() < 1e-9);
        assert!((trend.metrics.focus_time.current - 600.0).abs() < 1e-9);
        assert!((trend.metrics.focus_time.change_percent - 100.0).abs() < 1e-9);
        assert_eq!(trend.metrics.session_quality.change, 0.0);
        assert_eq!(trend.metrics.distraction_rate.change, 0.0);
        assert!((trend.forecast.predicted_focus_time - 660.0).abs() < 1e-9);
        assert!((trend.forecast.predicted_quality - 0.99).abs() < 1e-9);
        assert_eq!(trend.forecast.confidence, 0.7);
        assert_eq!(trend.confidence, 1.0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut sessions: Vec<_> = (0..20)
            .map(|i| {
                let minutes = if i < 10 { 60 } else { 30 };
                focus_session(&format!("s{i}"), i, 9, minutes)
            })
            .collect();
        sessions.reverse();

        let trend =
            analyze_productivity_trends(&sessions, &month_range(), &AnalysisConfig::default())
                .unwrap();
        assert_eq!(trend.direction, TrendDirection::Declining);
        assert!((trend.forecast.predicted_focus_time - 270.0).abs() < 1e-9);
    }

    #[test]
    fn odd_count_gives_earlier_half_fewer_sessions() {
        // 11개 → 앞 5개, 뒤 6개. 모두 30분
        let sessions: Vec<_> = (0..11)
            .map(|i| focus_session(&format!("s{i}"), i, 9, 30))
            .collect();
        let trend =
            analyze_productivity_trends(&sessions, &month_range(), &AnalysisConfig::default())
                .unwrap();
        assert!((trend.metrics.focus_time.previous - 150.0).abs() < 1e-9);
        assert!((trend.metrics.focus_time.current - 180.0).abs() < 1e-9);
    }

    #[test]
    fn unclear_sessions_are_not_trend_distraction() {
        let mut sessions: Vec<_> = (0..5)
            .map(|i| focus_session(&format!("f{i}"), i, 9, 30))
            .collect();
        sessions.extend((5..10).map(|i| {
            session(&format!("u{i}"), i, 9, 30, SessionType::Unclear, 0.3, &["Finder"])
        }));

        let trend =
            analyze_productivity_trends(&sessions, &month_range(), &AnalysisConfig::default())
                .unwrap();
        assert_eq!(trend.metrics.distraction_rate.previous, 0.0);
        assert_eq!(trend.metrics.distraction_rate.current, 0.0);
        // 집중 시간 150 → 0, 품질 0.9 → 0: 하락 2표
        assert_eq!(trend.direction, TrendDirection::Declining);
        assert!((trend.forecast.predicted_quality - 0.0).abs() < 1e-9);
    }

    #[test]
    fn mixed_signals_are_stable() {
        // 뒤쪽 절반: 집중 시간 증가, 품질 감소, 방해 비율 동일
        let mut sessions = Vec::new();
        for i in 0..5 {
            sessions.push(session(&format!("a{i}"), i, 9, 30, SessionType::FocusedWork, 0.9, &[]));
            sessions.push(session(&format!("b{i}"), i, 11, 30, SessionType::Break, 0.9, &[]));
        }
        for i in 5..10 {
            sessions.push(session(&format!("c{i}"), i, 9, 60, SessionType::FocusedWork, 0.5, &[]));
            sessions.push(session(&format!("d{i}"), i, 11, 60, SessionType::Break, 0.9, &[]));
        }

        let trend =
            analyze_productivity_trends(&sessions, &month_range(), &AnalysisConfig::default())
                .unwrap();
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.forecast.confidence, 0.9);
        assert!((trend.metrics.distraction_rate.current - 0.5).abs() < 1e-9);
        assert!((trend.forecast.predicted_focus_time - 300.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_sessions_do_not_divide_by_zero() {
        let sessions: Vec<_> = (0..12)
            .map(|i| session(&format!("z{i}"), i, 9, 0, SessionType::Break, 0.5, &[]))
            .collect();
        let trend =
            analyze_productivity_trends(&sessions, &month_range(), &AnalysisConfig::default())
                .unwrap();
        assert_eq!(trend.metrics.distraction_rate.current, 0.0);
        assert_eq!(trend.metrics.focus_time.change_percent, 0.0);
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert!((trend.confidence - 0.5).abs() < 1e-9);
    }
}
