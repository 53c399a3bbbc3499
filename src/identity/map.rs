/// Bidirectional name <-> UUID map with first-writer-wins inserts
use crate::identity::{IdentityMapping, MappingSnapshot, PlayerName};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Indices {
    by_name: HashMap<PlayerName, Uuid>,
    by_id: HashMap<Uuid, PlayerName>,
}

impl Indices {
    /// Both indices always hold the same pairs.
    fn insert_if_vacant(&mut self, name: &PlayerName, id: Uuid) -> bool {
        if self.by_name.contains_key(name) || self.by_id.contains_key(&id) {
            return false;
        }
        self.by_name.insert(name.clone(), id);
        self.by_id.insert(id, name.clone());
        true
    }
}

/// Shared bidirectional identity cache
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    inner: Arc<RwLock<Indices>>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair unless either side is already bound
    ///
    /// Returns `true` only when the pair was inserted. Existing bindings are
    /// never overwritten, including when the identical pair is present.
    pub async fn try_insert(&self, name: &PlayerName, id: Uuid) -> bool {
        self.inner.write().await.insert_if_vacant(name, id)
    }

    /// Insert a pair and return the UUID the name ends up bound to
    ///
    /// When another caller bound the name first, its UUID wins and is returned.
    /// When the UUID is already held by a different name, nothing is cached and
    /// the given UUID is returned unchanged.
    pub async fn bind(&self, name: &PlayerName, id: Uuid) -> Uuid {
        let mut indices = self.inner.write().await;
        if let Some(existing) = indices.by_name.get(name) {
            return *existing;
        }
        indices.insert_if_vacant(name, id);
        id
    }

    /// Insert a pair and return the name the UUID ends up bound to
    ///
    /// Mirror of [`IdentityMap::bind`] for reverse lookups.
    pub async fn bind_name(&self, name: &PlayerName, id: Uuid) -> String {
        let mut indices = self.inner.write().await;
        if let Some(existing) = indices.by_id.get(&id) {
            return existing.as_str().to_string();
        }
        indices.insert_if_vacant(name, id);
        name.as_str().to_string()
    }

    pub async fn get_id(&self, name: &PlayerName) -> Option<Uuid> {
        self.inner.read().await.by_name.get(name).copied()
    }

    /// Cached name for a UUID, in its original spelling
    pub async fn get_name(&self, id: &Uuid) -> Option<String> {
        self.inner
            .read()
            .await
            .by_id
            .get(id)
            .map(|name| name.as_str().to_string())
    }

    pub async fn contains_name(&self, name: &PlayerName) -> bool {
        self.inner.read().await.by_name.contains_key(name)
    }

    pub async fn contains_id(&self, id: &Uuid) -> bool {
        self.inner.read().await.by_id.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_name.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.by_name.is_empty()
    }

    /// Copy every mapping, sorted by name for stable output
    pub async fn snapshot(&self) -> MappingSnapshot {
        let indices = self.inner.read().await;
        let mut mappings: Vec<IdentityMapping> = indices
            .by_name
            .iter()
            .map(|(name, id)| IdentityMapping {
                name: name.as_str().to_string(),
                id: *id,
            })
            .collect();
        drop(indices);

        mappings.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        MappingSnapshot {
            taken_at: Utc::now(),
            mappings,
        }
    }
}
