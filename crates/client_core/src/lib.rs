use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use shared::{domain::UserProfile, protocol::RemoteUser};
use tracing::{debug, info};
use url::Url;

pub mod config;
pub mod error;

pub use config::{load_settings, ClientSettings};
pub use error::ProfileFetchError;

type Result<T> = std::result::Result<T, ProfileFetchError>;

#[derive(Debug, Clone)]
pub struct FetchedAvatar {
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A profile merged from the directory entry and its avatar response.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub profile: UserProfile,
    pub avatar_content_type: Option<String>,
    pub avatar_bytes: Vec<u8>,
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetches the directory, then every avatar. Any failure fails the batch.
    async fn load_profiles(&self) -> Result<Vec<LoadedProfile>>;
}

pub struct ProfileClient {
    http: Client,
    settings: ClientSettings,
}

impl ProfileClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(concat!("profile_cards/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProfileFetchError::ClientBuild)?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ProfileFetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProfileFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    pub async fn fetch_users(&self) -> Result<Vec<RemoteUser>> {
        let url = self.settings.users_url.as_str();
        let mut users: Vec<RemoteUser> = self
            .get(url)
            .await?
            .json()
            .await
            .map_err(|source| ProfileFetchError::Body {
                url: url.to_string(),
                source,
            })?;

        let available = users.len();
        users.truncate(self.settings.profile_limit);
        debug!(available, kept = users.len(), "fetched user directory");
        Ok(users)
    }

    pub fn avatar_url(&self, username: &str) -> Result<Url> {
        let base = &self.settings.avatar_base_url;
        let mut url = Url::parse(base).map_err(|err| ProfileFetchError::AvatarUrl {
            base: base.clone(),
            reason: err.to_string(),
        })?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ProfileFetchError::AvatarUrl {
                    base: base.clone(),
                    reason: "base URL cannot carry a path".to_string(),
                })?;
            segments.pop_if_empty().push(&self.settings.avatar_format);
        }

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("seed", username)
                .append_pair("size", &self.settings.avatar_size.to_string());
            if !self.settings.avatar_background.is_empty() {
                query.append_pair("backgroundColor", &self.settings.avatar_background);
            }
            for (key, value) in &self.settings.avatar_params {
                query.append_pair(key, value);
            }
        }

        Ok(url)
    }

    pub async fn fetch_avatar(&self, username: &str) -> Result<FetchedAvatar> {
        let url = self.avatar_url(username)?.to_string();
        let response = self.get(&url).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ProfileFetchError::Body {
                url: url.clone(),
                source,
            })?;

        debug!(username, size = bytes.len(), "fetched avatar");
        Ok(FetchedAvatar {
            url,
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[async_trait]
impl ProfileSource for ProfileClient {
    async fn load_profiles(&self) -> Result<Vec<LoadedProfile>> {
        let users = self.fetch_users().await?;

        let loaded = try_join_all(users.into_iter().map(|user| async move {
            let avatar = self.fetch_avatar(&user.username).await?;
            Ok::<_, ProfileFetchError>(LoadedProfile {
                profile: user.into_profile(avatar.url),
                avatar_content_type: avatar.content_type,
                avatar_bytes: avatar.bytes,
            })
        }))
        .await?;

        info!(count = loaded.len(), "loaded profiles with avatars");
        Ok(loaded)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
