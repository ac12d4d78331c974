//! JSON 파일 세션 저장소.
//!
//! 파일 형식은 세션 배열 또는 `{"sessions": [...]}` 객체.
//! 조회할 때마다 파일을 다시 읽으므로 외부에서 갱신한 내용이 바로 반영된다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flowlens_core::error::CoreError;
use flowlens_core::models::session::Session;
use flowlens_core::ports::session_store::SessionStore;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::sessions_in_window;

/// 파일 최상위 형식
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SessionFile {
    List(Vec<Session>),
    Wrapped { sessions: Vec<Session> },
}

impl SessionFile {
    fn into_sessions(self) -> Vec<Session> {
        match self {
            Self::List(sessions) | Self::Wrapped { sessions } => sessions,
        }
    }
}

#[derive(Serialize)]
struct SessionFileRef<'a> {
    sessions: &'a [Session],
}

/// JSON 파일 세션 저장소
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 파일의 모든 세션을 파일 순서대로 로드
    pub async fn load_all(&self) -> Result<Vec<Session>, CoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::NotFound {
                    resource_type: "SessionFile".to_string(),
                    id: self.path.display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let sessions = serde_json::from_str::<SessionFile>(&content)?.into_sessions();
        debug!("세션 파일 로드: {} ({}개)", self.path.display(), sessions.len());
        Ok(sessions)
    }

    /// 세션 목록을 `{"sessions": [...]}` 형식으로 저장 (상위 디렉토리 자동 생성)
    pub async fn save_all(&self, sessions: &[Session]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(&SessionFileRef { sessions })?;
        fs::write(&self.path, content).await?;
        info!("세션 파일 저장: {} ({}개)", self.path.display(), sessions.len());
        Ok(())
    }
}

#[async_trait]
impl SessionStore for JsonSessionStore {
    async fn get_sessions(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Session>, CoreError> {
        let sessions = self.load_all().await?;
        Ok(sessions_in_window(&sessions, from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone};
    use flowlens_core::models::session::{Activity, SessionType};
    use tempfile::TempDir;

    fn make_session(id: &str, start: DateTime<Utc>) -> Session {
        Session {
            id: id.to_string(),
            start_time: start,
            end_time: start + Duration::minutes(45),
            session_type: SessionType::Entertainment,
            confidence_score: 0.7,
            activities: vec![Activity {
                app_name: "YouTube".to_string(),
                window_title: "video".to_string(),
                duration_secs: 2700,
            }],
        }
    }

    #[tokio::test]
    async fn save_then_query_window() {
        let dir = TempDir::new().unwrap();
        let store = JsonSessionStore::new(dir.path().join("nested").join("sessions.json"));
        let base = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();

        store
            .save_all(&[
                make_session("a", base),
                make_session("b", base + Duration::days(1)),
                make_session("c", base + Duration::days(2)),
            ])
            .await
            .unwrap();

        let found = store
            .get_sessions(base, base + Duration::days(2))
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(found[0].activities[0].app_name, "YouTube");
    }

    #[tokio::test]
    async fn reads_bare_array_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(
            &path,
            r#"[{
                "id": "s1",
                "start_time": "2026-03-02T09:00:00Z",
                "end_time": "2026-03-02T09:50:00Z",
                "session_type": "focused-work"
            }]"#,
        )
        .unwrap();

        let sessions = JsonSessionStore::new(&path).load_all().await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].session_type, SessionType::FocusedWork);
        assert_eq!(sessions[0].confidence_score, 0.0);
        assert!(sessions[0].activities.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = JsonSessionStore::new(dir.path().join("missing.json"));
        let now = Utc::now();

        let result = store.get_sessions(now - Duration::days(1), now).await;
        assert_matches!(result, Err(CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn malformed_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonSessionStore::new(&path).load_all().await;
        assert_matches!(result, Err(CoreError::Serialization(_)));
    }
}
