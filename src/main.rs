/// Player identity lookup tool
///
/// Resolves each argument: UUID-shaped arguments are turned into names,
/// everything else into UUIDs.
use player_identity::{
    InMemorySessionDirectory, IdentityResolver, MappingStore, MemoryMappingStore, ResolverConfig,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "player_identity=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ResolverConfig::from_env()?;

    let sessions = Arc::new(InMemorySessionDirectory::new());
    let resolver = IdentityResolver::from_config(&config, sessions)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: player-identity <name|uuid>...");
        std::process::exit(2);
    }

    for arg in &args {
        match Uuid::parse_str(arg) {
            Ok(id) => {
                let name = resolver.resolve_name(id).await;
                println!("{} -> {}", id, name);
            }
            Err(_) => match resolver.resolve_id(arg).await {
                Some(id) => println!("{} -> {}", arg, id),
                None => println!("{} -> (not found)", arg),
            },
        }
    }

    let store = MemoryMappingStore::new();
    resolver.save_to(&store).await?;
    tracing::info!(
        "Resolved {} mapping(s) this run",
        store.load().await?.len()
    );

    Ok(())
}
