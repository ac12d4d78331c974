//! 세션 저장소 포트.
//!
//! 구현: `flowlens-storage` crate (인메모리, JSON 파일)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::models::session::Session;

/// 분류된 세션 조회 포트
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// `[from, to)` 구간에 시작한 세션 조회
    ///
    /// 반환 순서는 저장소 순서를 따른다. 분석기는 목록 위치를 직전 맥락 판단에 쓴다.
    async fn get_sessions(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Session>, CoreError>;
}
