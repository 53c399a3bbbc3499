/// Remote identity service collaborator
///
/// Only consulted in online mode. Each call either succeeds as a whole or
/// fails as a whole; the resolver assumes no partial results.

pub mod mojang;

pub use mojang::MojangClient;

use crate::error::IdentityResult;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

#[async_trait]
pub trait RemoteIdentityService: Send + Sync {
    /// Map names to UUIDs; unknown names are absent from the result
    async fn lookup_ids_by_names(&self, names: &[String]) -> IdentityResult<HashMap<String, Uuid>>;

    /// Map UUIDs to current names; unknown UUIDs are absent from the result
    async fn lookup_names_by_ids(&self, ids: &[Uuid]) -> IdentityResult<HashMap<Uuid, String>>;
}
