//! flowlens 도메인 모델.
//!
//! 입력 세션과 분석 결과 구조체를 정의한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod analysis;
pub mod insight;
pub mod pattern;
pub mod session;
pub mod time_range;
pub mod trend;
