/// Identity Resolver - Orchestrates name/UUID resolution with caching
use crate::{
    config::ResolverConfig,
    error::IdentityResult,
    identity::{offline_uuid, IdentityMap, IdentityMapping, MappingSnapshot, NameLookup, PlayerName},
    metrics::{self, ResolutionSource, DIRECTION_ID, DIRECTION_NAME},
    remote::{MojangClient, RemoteIdentityService},
    session::SessionDirectory,
    store::MappingStore,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Main identity resolver - combines the cache with sessions, the remote
/// service and offline derivation
///
/// Construct once at startup and share it (it is cheap to clone). The mode is
/// fixed for the resolver's lifetime.
#[derive(Clone)]
pub struct IdentityResolver {
    authenticated: bool,
    cache: IdentityMap,
    sessions: Arc<dyn SessionDirectory>,
    remote: Option<Arc<dyn RemoteIdentityService>>,
}

impl IdentityResolver {
    /// Create a resolver in the given mode
    pub fn new(
        authenticated: bool,
        sessions: Arc<dyn SessionDirectory>,
        remote: Option<Arc<dyn RemoteIdentityService>>,
    ) -> Self {
        if authenticated && remote.is_none() {
            warn!("Online mode without a remote identity service; remote lookups will fail");
        }

        Self {
            authenticated,
            cache: IdentityMap::new(),
            sessions,
            remote,
        }
    }

    /// Online-mode resolver backed by a remote identity service
    pub fn online(
        sessions: Arc<dyn SessionDirectory>,
        remote: Arc<dyn RemoteIdentityService>,
    ) -> Self {
        Self::new(true, sessions, Some(remote))
    }

    /// Offline-mode resolver; UUIDs are derived from names
    pub fn offline(sessions: Arc<dyn SessionDirectory>) -> Self {
        Self::new(false, sessions, None)
    }

    /// Build a resolver from configuration, wiring the Mojang client in online mode
    pub fn from_config(
        config: &ResolverConfig,
        sessions: Arc<dyn SessionDirectory>,
    ) -> IdentityResult<Self> {
        config.validate()?;

        if config.online_mode {
            let client = MojangClient::new(&config.remote)?;
            info!("Identity resolver in online mode via {}", config.remote.api_url);
            Ok(Self::online(sessions, Arc::new(client)))
        } else {
            info!("Identity resolver in offline mode");
            Ok(Self::offline(sessions))
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Cache a mapping unless either side is already bound
    ///
    /// Returns whether the pair was inserted; existing bindings always win.
    pub async fn add(&self, name: &str, id: Uuid) -> bool {
        self.cache.try_insert(&PlayerName::new(name), id).await
    }

    pub async fn contains_name(&self, name: &str) -> bool {
        self.cache.contains_name(&PlayerName::new(name)).await
    }

    pub async fn contains_id(&self, id: &Uuid) -> bool {
        self.cache.contains_id(id).await
    }

    /// Number of cached mappings
    pub async fn len(&self) -> usize {
        self.cache.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.is_empty().await
    }

    /// Resolve a name to a UUID
    ///
    /// Resolution order:
    /// 1. Check cache first (fast path, no I/O)
    /// 2. Connected player with this name
    /// 3. Offline mode: derive from the name (never fails)
    /// 4. Online mode: ask the remote service once; failures yield `None`
    pub async fn resolve_id(&self, name: &str) -> Option<Uuid> {
        let player = PlayerName::new(name);

        if let Some(id) = self.cache.get_id(&player).await {
            metrics::record_cache_access(DIRECTION_ID, true);
            metrics::record_resolution(DIRECTION_ID, ResolutionSource::Cache);
            return Some(id);
        }
        metrics::record_cache_access(DIRECTION_ID, false);
        debug!("Identity cache miss for name {}", name);

        if let Some(entity) = self.sessions.find_by_name(name).await {
            metrics::record_resolution(DIRECTION_ID, ResolutionSource::Session);
            return Some(self.cache.bind(&player, entity.id).await);
        }

        if !self.authenticated {
            metrics::record_resolution(DIRECTION_ID, ResolutionSource::Offline);
            let id = offline_uuid(player.as_str());
            return Some(self.cache.bind(&player, id).await);
        }

        match self.fetch_id(&player).await {
            Some(id) => {
                metrics::record_resolution(DIRECTION_ID, ResolutionSource::Remote);
                Some(self.cache.bind(&player, id).await)
            }
            None => {
                metrics::record_resolution(DIRECTION_ID, ResolutionSource::Unresolved);
                None
            }
        }
    }

    /// Resolve a UUID to a name
    ///
    /// Resolution order:
    /// 1. Check cache first
    /// 2. Connected player with this UUID
    /// 3. Player who has connected before with this UUID
    /// 4. Online mode: ask the remote service once; failures yield `NotFound`
    /// 5. Offline mode: `Unknown`, since derived UUIDs cannot be reversed
    pub async fn resolve_name(&self, id: Uuid) -> NameLookup {
        if let Some(name) = self.cache.get_name(&id).await {
            metrics::record_cache_access(DIRECTION_NAME, true);
            metrics::record_resolution(DIRECTION_NAME, ResolutionSource::Cache);
            return NameLookup::Found(name);
        }
        metrics::record_cache_access(DIRECTION_NAME, false);
        debug!("Identity cache miss for uuid {}", id);

        if let Some(entity) = self.sessions.find_by_id(id).await {
            metrics::record_resolution(DIRECTION_NAME, ResolutionSource::Session);
            let name = self.cache.bind_name(&PlayerName::new(entity.name), id).await;
            return NameLookup::Found(name);
        }

        if let Some(entity) = self.sessions.find_historical_by_id(id).await {
            metrics::record_resolution(DIRECTION_NAME, ResolutionSource::History);
            let name = self.cache.bind_name(&PlayerName::new(entity.name), id).await;
            return NameLookup::Found(name);
        }

        if !self.authenticated {
            metrics::record_resolution(DIRECTION_NAME, ResolutionSource::Unresolved);
            return NameLookup::Unknown;
        }

        match self.fetch_name(id).await {
            Some(name) => {
                metrics::record_resolution(DIRECTION_NAME, ResolutionSource::Remote);
                let name = self.cache.bind_name(&PlayerName::new(name), id).await;
                NameLookup::Found(name)
            }
            None => {
                metrics::record_resolution(DIRECTION_NAME, ResolutionSource::Unresolved);
                NameLookup::NotFound
            }
        }
    }

    /// Single-name remote lookup; every failure is logged and becomes `None`
    async fn fetch_id(&self, player: &PlayerName) -> Option<Uuid> {
        let Some(remote) = self.remote.as_ref() else {
            warn!("No remote identity service for name {}", player);
            metrics::record_remote_failure(DIRECTION_ID);
            return None;
        };

        match remote.lookup_ids_by_names(&[player.as_str().to_string()]).await {
            Ok(found) => {
                let id = found
                    .into_iter()
                    .find(|(name, _)| name.to_lowercase() == player.key())
                    .map(|(_, id)| id);
                if id.is_none() {
                    debug!("Remote identity service has no profile named {}", player);
                }
                id
            }
            Err(e) => {
                warn!("Failed to resolve UUID for {}: {}", player, e);
                metrics::record_remote_failure(DIRECTION_ID);
                None
            }
        }
    }

    /// Single-UUID remote lookup; every failure is logged and becomes `None`
    async fn fetch_name(&self, id: Uuid) -> Option<String> {
        let Some(remote) = self.remote.as_ref() else {
            warn!("No remote identity service for uuid {}", id);
            metrics::record_remote_failure(DIRECTION_NAME);
            return None;
        };

        match remote.lookup_names_by_ids(&[id]).await {
            Ok(mut found) => {
                let name = found.remove(&id);
                if name.is_none() {
                    debug!("Remote identity service has no profile for {}", id);
                }
                name
            }
            Err(e) => {
                warn!("Failed to resolve name for {}: {}", id, e);
                metrics::record_remote_failure(DIRECTION_NAME);
                None
            }
        }
    }

    /// Copy of every cached mapping; performs no I/O
    pub async fn snapshot(&self) -> MappingSnapshot {
        self.cache.snapshot().await
    }

    /// Seed the cache with stored mappings; returns how many were inserted
    pub async fn preload<I>(&self, mappings: I) -> usize
    where
        I: IntoIterator<Item = IdentityMapping>,
    {
        let mut inserted = 0;
        for mapping in mappings {
            if self.add(&mapping.name, mapping.id).await {
                inserted += 1;
            }
        }
        inserted
    }

    /// Load mappings from a store into the cache
    pub async fn load_from(&self, store: &dyn MappingStore) -> IdentityResult<usize> {
        let mappings = store.load().await?;
        let total = mappings.len();
        let inserted = self.preload(mappings).await;
        info!("Loaded {} of {} stored identity mappings", inserted, total);
        Ok(inserted)
    }

    /// Hand the current snapshot to a store for durable write-back
    pub async fn save_to(&self, store: &dyn MappingStore) -> IdentityResult<()> {
        let snapshot = self.snapshot().await;
        store.save(&snapshot).await?;
        info!("Saved {} identity mappings", snapshot.len());
        Ok(())
    }
}
