//! 분석기 공용 수치 헬퍼.

/// 신뢰도/심각도를 [0, 1]로 제한
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// 산술 평균 (빈 입력은 0)
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 모표준편차 (빈 입력은 0)
pub(crate) fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// 정렬된 표본에서 floor(n·q) 위치 값
pub(crate) fn quantile_at(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64 * q).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// 최빈값 (동률이면 먼저 등장한 값)
pub(crate) fn mode<T, I>(items: I) -> Option<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut tallies: Vec<(T, usize)> = Vec::new();
    for item in items {
        match tallies.iter_mut().find(|(value, _)| *value == item) {
            Some((_, count)) => *count += 1,
            None => tallies.push((item, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in tallies {
        match &best {
            Some((_, best_count)) if *best_count >= count => {}
            _ => best = Some((value, count)),
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_unit_bounds() {
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }

    #[test]
    fn std_dev_of_constant_is_zero() {
        assert_eq!(population_std_dev(&[4.0, 4.0, 4.0]), 0.0);
        // 2, 4, 4, 4, 5, 5, 7, 9 → σ = 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&values) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn quantile_uses_floor_index() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(quantile_at(&sorted, 0.5), 30.0);
        assert_eq!(quantile_at(&sorted, 0.25), 20.0);
        assert_eq!(quantile_at(&sorted, 0.75), 40.0);
        assert_eq!(quantile_at(&[], 0.5), 0.0);
    }

    #[test]
    fn mode_prefers_first_on_tie() {
        assert_eq!(mode(vec!["a", "b", "b", "a"]), Some("a"));
        assert_eq!(mode(vec!["a", "b", "b"]), Some("b"));
        assert_eq!(mode(Vec::<&str>::new()), None);
    }
}
