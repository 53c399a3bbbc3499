/// Persisted mapping store collaborator
///
/// Receives snapshots for durable write-back and hands stored mappings back
/// at startup. The on-disk format belongs to the implementor.
use crate::error::IdentityResult;
use crate::identity::{IdentityMapping, MappingSnapshot};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Persist every mapping in the snapshot
    async fn save(&self, snapshot: &MappingSnapshot) -> IdentityResult<()>;

    /// Load previously persisted mappings
    async fn load(&self) -> IdentityResult<Vec<IdentityMapping>>;
}

/// Store that keeps the latest snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryMappingStore {
    latest: Arc<RwLock<Option<MappingSnapshot>>>,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn latest(&self) -> Option<MappingSnapshot> {
        self.latest.read().await.clone()
    }
}

#[async_trait]
impl MappingStore for MemoryMappingStore {
    async fn save(&self, snapshot: &MappingSnapshot) -> IdentityResult<()> {
        *self.latest.write().await = Some(snapshot.clone());
        Ok(())
    }

    async fn load(&self) -> IdentityResult<Vec<IdentityMapping>> {
        Ok(self
            .latest
            .read()
            .await
            .as_ref()
            .map(|snapshot| snapshot.mappings.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryMappingStore::new();
        assert!(store.load().await.unwrap().is_empty());

        let snapshot = MappingSnapshot {
            taken_at: Utc::now(),
            mappings: vec![IdentityMapping {
                name: "Steve".to_string(),
                id: Uuid::from_u128(42),
            }],
        };
        store.save(&snapshot).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, snapshot.mappings);
        assert_eq!(store.latest().await.map(|s| s.len()), Some(1));
    }
}
