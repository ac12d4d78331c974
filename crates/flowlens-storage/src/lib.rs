//! # flowlens-storage
//!
//! 세션 저장소 어댑터.
//! `SessionStore` 포트를 구현하며, 조회 구간 `[from, to)`는 세션 시작 시각 기준이다.
//!
//! ## 모듈
//! - `memory`: 인메모리 저장소 (임베딩, 테스트용)
//! - `json_file`: JSON 파일 저장소 (CLI 입력)

pub mod json_file;
pub mod memory;

pub use json_file::JsonSessionStore;
pub use memory::InMemorySessionStore;

use chrono::{DateTime, Utc};
use flowlens_core::models::session::Session;
use flowlens_core::models::time_range::TimeRange;

/// 시작 시각이 `[from, to)`에 드는 세션만 입력 순서대로 복제
pub(crate) fn sessions_in_window(
    sessions: &[Session],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<Session> {
    let window = TimeRange::new(from, to);
    sessions
        .iter()
        .filter(|s| window.contains(s.start_time))
        .cloned()
        .collect()
}
