/// Mojang profile API client
use crate::{
    config::RemoteConfig,
    error::{IdentityError, IdentityResult},
    remote::RemoteIdentityService,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Maximum names accepted per bulk profile request
pub const PROFILES_PER_REQUEST: usize = 100;

/// Profile as returned by both the bulk and the session endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    /// Undashed hex UUID
    pub id: String,
    pub name: String,
}

impl Profile {
    pub fn uuid(&self) -> IdentityResult<Uuid> {
        Uuid::parse_str(&self.id).map_err(|e| {
            IdentityError::RemoteLookup(format!("Invalid profile id {}: {}", self.id, e))
        })
    }
}

/// HTTP client for name/UUID lookups against Mojang-compatible endpoints
#[derive(Clone)]
pub struct MojangClient {
    http_client: reqwest::Client,
    api_url: String,
    session_url: String,
}

impl MojangClient {
    /// Create a new client; the configured timeout bounds every request
    pub fn new(config: &RemoteConfig) -> IdentityResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .build()
            .map_err(|e| IdentityError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            session_url: config.session_url.trim_end_matches('/').to_string(),
        })
    }

    fn profiles_url(&self) -> String {
        format!("{}/profiles/minecraft", self.api_url)
    }

    fn session_profile_url(&self, id: &Uuid) -> String {
        format!(
            "{}/session/minecraft/profile/{}",
            self.session_url,
            id.simple()
        )
    }

    /// Resolve up to `PROFILES_PER_REQUEST` names in one request
    async fn fetch_profiles(&self, names: &[String]) -> IdentityResult<Vec<Profile>> {
        let url = self.profiles_url();
        debug!("Fetching {} profile(s) from {}", names.len(), url);

        let response = self.http_client.post(&url).json(names).send().await?;

        if !response.status().is_success() {
            return Err(IdentityError::RemoteLookup(format!(
                "Profile API returned error: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        decode_profiles(&body)
    }

    /// Fetch the current profile for a UUID; `None` when the service has no record
    async fn fetch_session_profile(&self, id: &Uuid) -> IdentityResult<Option<Profile>> {
        let url = self.session_profile_url(id);
        debug!("Fetching session profile from {}", url);

        let response = self.http_client.get(&url).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                return Err(IdentityError::RemoteLookup(format!(
                    "Session server returned error: {}",
                    status
                )))
            }
            _ => {}
        }

        let body = response.text().await?;
        decode_profile(&body).map(Some)
    }
}

#[async_trait]
impl RemoteIdentityService for MojangClient {
    async fn lookup_ids_by_names(&self, names: &[String]) -> IdentityResult<HashMap<String, Uuid>> {
        let mut resolved = HashMap::with_capacity(names.len());

        for chunk in names.chunks(PROFILES_PER_REQUEST) {
            for profile in self.fetch_profiles(chunk).await? {
                let id = profile.uuid()?;
                resolved.insert(profile.name, id);
            }
        }

        Ok(resolved)
    }

    async fn lookup_names_by_ids(&self, ids: &[Uuid]) -> IdentityResult<HashMap<Uuid, String>> {
        let mut resolved = HashMap::with_capacity(ids.len());

        for id in ids {
            if let Some(profile) = self.fetch_session_profile(id).await? {
                resolved.insert(*id, profile.name);
            }
        }

        Ok(resolved)
    }
}

/// Decode a bulk profile response body
pub fn decode_profiles(body: &str) -> IdentityResult<Vec<Profile>> {
    serde_json::from_str(body)
        .map_err(|e| IdentityError::RemoteLookup(format!("Invalid profile response: {}", e)))
}

/// Decode a single session profile body
pub fn decode_profile(body: &str) -> IdentityResult<Profile> {
    serde_json::from_str(body)
        .map_err(|e| IdentityError::RemoteLookup(format!("Invalid session profile: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MojangClient {
        let config = RemoteConfig {
            api_url: "https://api.example.test/".to_string(),
            session_url: "https://session.example.test".to_string(),
            ..RemoteConfig::default()
        };
        MojangClient::new(&config).unwrap()
    }

    #[test]
    fn test_urls() {
        let client = client();
        assert_eq!(
            client.profiles_url(),
            "https://api.example.test/profiles/minecraft"
        );

        let id = Uuid::parse_str("069a79f4-44e9-4726-a5be-fca90e38aaf5").unwrap();
        assert_eq!(
            client.session_profile_url(&id),
            "https://session.example.test/session/minecraft/profile/069a79f444e94726a5befca90e38aaf5"
        );
    }

    #[test]
    fn test_decode_profiles() {
        let body = r#"[
            {"id":"069a79f444e94726a5befca90e38aaf5","name":"Notch"},
            {"id":"853c80ef3c3749fdaa49938b674adae6","name":"jeb_","legacy":true}
        ]"#;
        let profiles = decode_profiles(body).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].name, "Notch");
        assert_eq!(
            profiles[0].uuid().unwrap().to_string(),
            "069a79f4-44e9-4726-a5be-fca90e38aaf5"
        );
    }

    #[test]
    fn test_decode_session_profile() {
        let body = r#"{"id":"069a79f444e94726a5befca90e38aaf5","name":"Notch","properties":[]}"#;
        let profile = decode_profile(body).unwrap();
        assert_eq!(profile.name, "Notch");
    }

    #[test]
    fn test_malformed_payloads_are_remote_errors() {
        assert!(matches!(
            decode_profiles("{\"error\":\"nope\"}"),
            Err(IdentityError::RemoteLookup(_))
        ));

        let profile = Profile {
            id: "not-a-uuid".to_string(),
            name: "x".to_string(),
        };
        assert!(matches!(profile.uuid(), Err(IdentityError::RemoteLookup(_))));
    }
}
