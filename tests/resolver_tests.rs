/// End-to-end resolver behaviour through the public API
use async_trait::async_trait;
use player_identity::{
    config::RemoteConfig, offline_uuid, IdentityError, IdentityResolver, IdentityResult,
    InMemorySessionDirectory, MappingStore, MemoryMappingStore, MojangClient, NameLookup,
    RemoteIdentityService, ResolverConfig,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Remote that answers every name with a fresh UUID after a short delay
struct SlowIssuer {
    calls: AtomicUsize,
}

#[async_trait]
impl RemoteIdentityService for SlowIssuer {
    async fn lookup_ids_by_names(&self, names: &[String]) -> IdentityResult<HashMap<String, Uuid>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(names.iter().map(|n| (n.clone(), Uuid::new_v4())).collect())
    }

    async fn lookup_names_by_ids(&self, _ids: &[Uuid]) -> IdentityResult<HashMap<Uuid, String>> {
        Err(IdentityError::RemoteLookup("names unsupported".to_string()))
    }
}

fn unreachable_remote() -> RemoteConfig {
    RemoteConfig {
        api_url: "http://127.0.0.1:1".to_string(),
        session_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        ..RemoteConfig::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_online_lookups_agree() {
    let remote = Arc::new(SlowIssuer {
        calls: AtomicUsize::new(0),
    });
    let resolver = IdentityResolver::online(
        Arc::new(InMemorySessionDirectory::new()),
        remote.clone(),
    );

    let tasks = (0..8).map(|_| {
        let resolver = resolver.clone();
        tokio::spawn(async move { resolver.resolve_id("Bob").await })
    });
    let results: Vec<Uuid> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap().unwrap())
        .collect();

    // every racer sees the winner's UUID even though each may have fetched its own
    assert!(results.iter().all(|id| *id == results[0]));
    assert_eq!(resolver.len().await, 1);
    assert!(remote.calls.load(Ordering::SeqCst) >= 1);

    let calls = remote.calls.load(Ordering::SeqCst);
    assert_eq!(resolver.resolve_id("bob").await, Some(results[0]));
    assert_eq!(remote.calls.load(Ordering::SeqCst), calls);
}

#[tokio::test]
async fn test_unreachable_service_degrades_to_absent() {
    let client = MojangClient::new(&unreachable_remote()).unwrap();
    let resolver = IdentityResolver::online(
        Arc::new(InMemorySessionDirectory::new()),
        Arc::new(client),
    );

    assert_eq!(resolver.resolve_id("Notch").await, None);
    assert_eq!(resolver.resolve_name(Uuid::new_v4()).await, NameLookup::NotFound);
    assert!(resolver.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_offline_config_resolver() {
    let config = ResolverConfig {
        online_mode: false,
        remote: unreachable_remote(),
        ..ResolverConfig::default()
    };
    let sessions = Arc::new(InMemorySessionDirectory::new());
    let resolver = IdentityResolver::from_config(&config, sessions.clone()).unwrap();
    assert!(!resolver.is_authenticated());

    let notch = resolver.resolve_id("Notch").await.unwrap();
    assert_eq!(notch.to_string(), "b50ad385-829d-3141-a216-7e7d7539ba7f");
    assert_eq!(notch, offline_uuid("Notch"));

    assert_eq!(resolver.resolve_name(Uuid::new_v4()).await.as_str(), "unknown");

    // a player who joined earlier is known by name even offline
    let jeb = Uuid::new_v4();
    sessions.connect("jeb_", jeb).await;
    sessions.disconnect(jeb).await;
    assert_eq!(resolver.resolve_name(jeb).await, NameLookup::Found("jeb_".to_string()));
}

#[tokio::test]
async fn test_snapshot_survives_restart() {
    let store = MemoryMappingStore::new();
    let sessions = Arc::new(InMemorySessionDirectory::new());

    let first = IdentityResolver::offline(sessions.clone());
    let alice = first.resolve_id("Alice").await.unwrap();
    first.add("Steve", Uuid::from_u128(7)).await;
    first.save_to(&store).await.unwrap();
    assert_eq!(store.load().await.unwrap().len(), 2);

    let second = IdentityResolver::offline(sessions);
    second.load_from(&store).await.unwrap();
    assert_eq!(second.resolve_id("alice").await, Some(alice));
    assert_eq!(
        second.resolve_name(Uuid::from_u128(7)).await,
        NameLookup::Found("Steve".to_string())
    );
}
