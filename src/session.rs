/// Live-session directory collaborator
///
/// Tracks players that are connected right now plus everyone seen since the
/// directory was created.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A player known to the session layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntity {
    pub id: Uuid,
    pub name: String,
}

/// Lookups the resolver performs against live sessions
#[async_trait]
pub trait SessionDirectory: Send + Sync {
    /// Currently connected player with this name (case-insensitive)
    async fn find_by_name(&self, name: &str) -> Option<SessionEntity>;

    /// Currently connected player with this UUID
    async fn find_by_id(&self, id: Uuid) -> Option<SessionEntity>;

    /// Any player that has ever connected with this UUID
    async fn find_historical_by_id(&self, id: Uuid) -> Option<SessionEntity>;
}

#[derive(Debug, Default)]
struct Sessions {
    online: HashMap<Uuid, SessionEntity>,
    seen: HashMap<Uuid, SessionEntity>,
}

/// In-process session directory
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionDirectory {
    sessions: Arc<RwLock<Sessions>>,
}

impl InMemorySessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a player connecting; also marks them as seen
    pub async fn connect(&self, name: impl Into<String>, id: Uuid) {
        let entity = SessionEntity {
            id,
            name: name.into(),
        };
        let mut sessions = self.sessions.write().await;
        sessions.seen.insert(id, entity.clone());
        sessions.online.insert(id, entity);
    }

    /// Record a player leaving; they stay in the historical record
    pub async fn disconnect(&self, id: Uuid) -> Option<SessionEntity> {
        self.sessions.write().await.online.remove(&id)
    }

    pub async fn online_count(&self) -> usize {
        self.sessions.read().await.online.len()
    }
}

#[async_trait]
impl SessionDirectory for InMemorySessionDirectory {
    async fn find_by_name(&self, name: &str) -> Option<SessionEntity> {
        let key = name.to_lowercase();
        self.sessions
            .read()
            .await
            .online
            .values()
            .find(|entity| entity.name.to_lowercase() == key)
            .cloned()
    }

    async fn find_by_id(&self, id: Uuid) -> Option<SessionEntity> {
        self.sessions.read().await.online.get(&id).cloned()
    }

    async fn find_historical_by_id(&self, id: Uuid) -> Option<SessionEntity> {
        self.sessions.read().await.seen.get(&id).cloned()
    }
}
