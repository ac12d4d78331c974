//! 인메모리 세션 저장소.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flowlens_core::error::CoreError;
use flowlens_core::models::session::Session;
use flowlens_core::ports::session_store::SessionStore;
use parking_lot::RwLock;
use tracing::debug;

use crate::sessions_in_window;

/// 인메모리 세션 저장소
///
/// 삽입 순서를 유지한다.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<Vec<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        Self {
            sessions: RwLock::new(sessions),
        }
    }

    pub fn insert(&self, session: Session) {
        self.sessions.write().push(session);
    }

    pub fn extend(&self, sessions: impl IntoIterator<Item = Session>) {
        self.sessions.write().extend(sessions);
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn clear(&self) {
        self.sessions.write().clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_sessions(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Session>, CoreError> {
        let found = sessions_in_window(&self.sessions.read(), from, to);
        debug!("인메모리 세션 조회: {}개", found.len());
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use flowlens_core::models::session::SessionType;

    fn make_session(id: &str, start: DateTime<Utc>) -> Session {
        Session {
            id: id.to_string(),
            start_time: start,
            end_time: start + Duration::minutes(30),
            session_type: SessionType::FocusedWork,
            confidence_score: 0.8,
            activities: Vec::new(),
        }
    }

    #[tokio::test]
    async fn filters_half_open_window_in_insertion_order() {
        let base = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        let store = InMemorySessionStore::new();
        store.insert(make_session("late", base + Duration::hours(5)));
        store.insert(make_session("start", base));
        store.insert(make_session("end", base + Duration::hours(6)));
        store.insert(make_session("before", base - Duration::seconds(1)));

        let found = store
            .get_sessions(base, base + Duration::hours(6))
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "start"]);
    }

    #[tokio::test]
    async fn empty_store_returns_empty() {
        let store = InMemorySessionStore::new();
        assert!(store.is_empty());

        let now = Utc::now();
        let found = store
            .get_sessions(now - Duration::days(30), now)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn extend_and_clear() {
        let base = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        let store = InMemorySessionStore::with_sessions(vec![make_session("a", base)]);
        store.extend((0..3).map(|i| make_session(&format!("b{i}"), base)));
        assert_eq!(store.len(), 4);

        store.clear();
        assert!(store.is_empty());
    }
}
