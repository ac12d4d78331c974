//! # flowlens-analysis
//!
//! 패턴 분석 엔진.
//! 분류된 세션 이력에서 집중 패턴(피크 시간대, 최적 세션 길이, 주간 리듬),
//! 방해 패턴(트리거 앱별 심각도), 생산성 추세와 예측을 도출하고
//! 우선순위가 매겨진 개인화 인사이트로 변환한다.
//!
//! 모든 분석기는 순수 동기 함수다. [`engine::PatternAnalysisEngine`]만
//! 세션 저장소 포트를 통해 비동기로 입력을 가져온다.
//!
//! ## 구조
//!
//! - [`ingestion`]: 집중/방해 후보 분리, 표본 하한
//! - [`focus`]: 집중 패턴 분석기
//! - [`distraction`]: 방해 패턴 분석기
//! - [`trend`]: 생산성 추세 분석기
//! - [`insight`]: 인사이트 생성기
//! - [`analyzer`]: 설정을 묶은 무상태 분석기
//! - [`engine`]: 저장소 조회 + 전체 분석 오케스트레이터

pub mod analyzer;
pub mod distraction;
pub mod engine;
pub mod focus;
pub mod ingestion;
pub mod insight;
mod stats;
pub mod trend;

#[cfg(test)]
pub(crate) mod test_support;

pub use analyzer::PatternAnalyzer;
pub use engine::PatternAnalysisEngine;
