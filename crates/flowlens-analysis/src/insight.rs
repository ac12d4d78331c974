//! 개인화 인사이트 생성기.
//!
//! 집중 패턴, 방해 패턴, 생산성 추세를 사람이 읽을 수 있는 권장 사항으로
//! 변환하고 우선순위 → 신뢰도 순으로 정렬한다.

use chrono::{DateTime, Utc};
use flowlens_core::config::AnalysisConfig;
use flowlens_core::models::insight::{
    InsightPriority, InsightType, PersonalizedInsight, SupportingData,
};
use flowlens_core::models::pattern::{DistractionPattern, FocusPattern, FocusPatternData};
use flowlens_core::models::trend::{ProductivityTrend, TrendDirection};
use tracing::debug;
use uuid::Uuid;

use crate::stats::clamp_unit;

/// 유형 + 대상으로 결정적 ID 생성
fn insight_id(insight_type: InsightType, subject: &str) -> String {
    let name = format!("{}:{}", insight_type.as_str(), subject);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

fn format_hours(hours: &[u32]) -> String {
    hours
        .iter()
        .map(|h| format!("{h:02}:00"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 인사이트 생성
///
/// 같은 입력이면 같은 ID와 순서를 낸다. 방해 패턴은 입력 순서대로 앞에서부터 사용한다.
pub fn generate_personalized_insights(
    focus_patterns: &[FocusPattern],
    distraction_patterns: &[DistractionPattern],
    trend: Option<&ProductivityTrend>,
    config: &AnalysisConfig,
) -> Vec<PersonalizedInsight> {
    let generated_at = Utc::now();
    let mut insights = Vec::new();

    for pattern in focus_patterns {
        if pattern.confidence <= config.insight_min_confidence {
            debug!(
                "인사이트 제외: {} 신뢰도 {:.2}",
                pattern.pattern_type().as_str(),
                pattern.confidence
            );
            continue;
        }
        if let Some(insight) = focus_insight(pattern, generated_at) {
            insights.push(insight);
        }
    }

    // 방해 패턴은 이미 심각도 하한을 넘었으므로 신뢰도 하한을 다시 적용하지 않는다
    for pattern in distraction_patterns
        .iter()
        .take(config.max_distraction_insights)
    {
        insights.push(distraction_insight(pattern, generated_at));
    }

    if let Some(trend) = trend {
        if let Some(insight) = trend_insight(trend, config, generated_at) {
            insights.push(insight);
        }
    }

    // 안정 정렬: 같은 등급·신뢰도는 생성 순서 유지
    insights.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });

    debug!("인사이트 {}개 생성", insights.len());
    insights
}

fn focus_insight(
    pattern: &FocusPattern,
    generated_at: DateTime<Utc>,
) -> Option<PersonalizedInsight> {
    let insight_type = InsightType::FocusOptimization;
    let subject = pattern.pattern_type().as_str();
    let supporting = SupportingData::default()
        .metric("confidence", pattern.confidence)
        .metric("sample_size", pattern.sample_size as f64)
        .pattern(subject);

    match &pattern.data {
        FocusPatternData::PeakHours { hours, .. } => {
            let hours_text = format_hours(hours);
            Some(PersonalizedInsight {
                id: insight_id(insight_type, subject),
                insight_type,
                title: "집중이 가장 잘 되는 시간대".to_string(),
                description: format!("{hours_text}에 시작한 세션의 집중 시간이 가장 깁니다."),
                recommendations: vec![
                    format!("중요한 작업을 {hours_text} 시간대에 배치하세요"),
                    "이 시간대에는 알림과 회의를 줄이세요".to_string(),
                ],
                priority: InsightPriority::High,
                confidence: clamp_unit(pattern.confidence),
                supporting_data: supporting.metric("peak_hour_count", hours.len() as f64),
                generated_at,
            })
        }
        FocusPatternData::OptimalSessionLength {
            minutes,
            interquartile_range,
        } => Some(PersonalizedInsight {
            id: insight_id(insight_type, subject),
            insight_type,
            title: "최적 집중 세션 길이".to_string(),
            description: format!("집중 세션은 보통 {minutes}분 동안 유지됩니다."),
            recommendations: vec![
                format!("작업 블록을 약 {minutes}분 단위로 계획하세요"),
                "블록 사이에 짧은 휴식을 넣으세요".to_string(),
            ],
            priority: InsightPriority::Medium,
            confidence: clamp_unit(pattern.confidence),
            supporting_data: supporting
                .metric("optimal_minutes", f64::from(*minutes))
                .metric("interquartile_range", *interquartile_range),
            generated_at,
        }),
        FocusPatternData::ProductivityRhythm { .. } => None,
    }
}

fn distraction_insight(
    pattern: &DistractionPattern,
    generated_at: DateTime<Utc>,
) -> PersonalizedInsight {
    let insight_type = InsightType::DistractionReduction;
    let priority = if pattern.severity > 0.7 {
        InsightPriority::High
    } else {
        InsightPriority::Medium
    };

    let mut recommendations = vec![format!(
        "{} 사용 시간을 정해 두세요",
        pattern.trigger
    )];
    if let Some(range) = pattern.common_time_ranges.first() {
        recommendations.push(format!(
            "{:02}:00-{:02}:59 사이에 방해 차단 모드를 켜세요",
            range.start_hour, range.end_hour
        ));
    }
    if pattern.context.previous_session_type.is_focus() {
        recommendations.push("집중 세션이 끝나면 의도적인 휴식을 먼저 가지세요".to_string());
    }

    let context_label = pattern.context.previous_session_type.label_ko();
    PersonalizedInsight {
        id: insight_id(insight_type, &pattern.trigger),
        insight_type,
        title: format!("{} 방해 줄이기", pattern.trigger),
        description: format!(
            "{}이(가) 하루 평균 {:.1}회, 회당 {:.0}분 동안 집중을 방해합니다. \
             주로 {context_label} 세션 뒤에 나타납니다.",
            pattern.trigger, pattern.frequency_per_day, pattern.average_duration
        ),
        recommendations,
        priority,
        confidence: clamp_unit(pattern.severity),
        supporting_data: SupportingData::default()
            .metric("severity", pattern.severity)
            .metric("frequency_per_day", pattern.frequency_per_day)
            .metric("average_duration", pattern.average_duration)
            .pattern(format!("distraction:{}", pattern.trigger))
            .pattern(format!(
                "after:{}",
                pattern.context.previous_session_type.as_str()
            )),
        generated_at,
    }
}

fn trend_insight(
    trend: &ProductivityTrend,
    config: &AnalysisConfig,
    generated_at: DateTime<Utc>,
) -> Option<PersonalizedInsight> {
    let focus = &trend.metrics.focus_time;
    let supporting = SupportingData::default()
        .metric("focus_time_change", focus.change)
        .metric("focus_time_change_percent", focus.change_percent)
        .metric("trend_confidence", trend.confidence)
        .pattern("productivity_trend");

    match trend.direction {
        TrendDirection::Declining
            if trend.confidence > config.schedule_adjustment_min_confidence =>
        {
            let insight_type = InsightType::ScheduleAdjustment;
            Some(PersonalizedInsight {
                id: insight_id(insight_type, "declining"),
                insight_type,
                title: "생산성 하락 감지".to_string(),
                description: format!(
                    "{} 추세: 최근 집중 시간이 {:.0}분에서 {:.0}분으로 줄었습니다.",
                    trend.direction.label_ko(),
                    focus.previous,
                    focus.current
                ),
                recommendations: vec![
                    "하루 일정에서 집중 블록을 다시 확보하세요".to_string(),
                    "회의와 작업 전환 횟수를 점검하세요".to_string(),
                ],
                priority: InsightPriority::High,
                confidence: clamp_unit(trend.confidence),
                supporting_data: supporting,
                generated_at,
            })
        }
        TrendDirection::Improving => {
            let insight_type = InsightType::GoalAdjustment;
            Some(PersonalizedInsight {
                id: insight_id(insight_type, "improving"),
                insight_type,
                title: "생산성 개선 중".to_string(),
                description: format!(
                    "{} 추세: 최근 집중 시간이 {:.0}분에서 {:.0}분으로 늘었습니다.",
                    trend.direction.label_ko(),
                    focus.previous,
                    focus.current
                ),
                recommendations: vec![
                    "집중 시간 목표를 조금 더 높여 보세요".to_string(),
                    "지금의 작업 루틴을 유지하세요".to_string(),
                ],
                priority: InsightPriority::Medium,
                confidence: clamp_unit(trend.confidence),
                supporting_data: supporting,
                generated_at,
            })
        }
        _ => None,
    }
}
