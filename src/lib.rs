//! Player identity resolution
//!
//! Maps player names to UUIDs and back. Lookups go through an in-process
//! cache first, then live sessions, then either the remote identity service
//! (online mode) or deterministic name hashing (offline mode).

pub mod config;
pub mod error;
pub mod identity;
pub mod metrics;
pub mod remote;
pub mod session;
pub mod store;

pub use config::ResolverConfig;
pub use error::{IdentityError, IdentityResult};
pub use identity::{
    offline_uuid, IdentityMapping, IdentityResolver, MappingSnapshot, NameLookup, PlayerName,
    UNKNOWN_NAME,
};
pub use remote::{MojangClient, RemoteIdentityService};
pub use session::{InMemorySessionDirectory, SessionDirectory, SessionEntity};
pub use store::{MappingStore, MemoryMappingStore};
