//! The Yggdrasil session handshake.
//!
//! A launcher calls [`Session::join`] after login; the game server then asks
//! [`Session::has_joined`] for the signed profile of the connecting player.
//! [`Session::profile`] and [`Session::metadata`] serve clients outside of a
//! handshake. Every operation is a stateless computation over the injected
//! services.


use crate::{
    config,
    identity::{UserIdentity, canonical_uuid},
    services::{IntegrationService, ServiceError, SigningService, UserStore},
    textures::{TexturePayload, TexturesError},
};
use futures_util::future;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu, ensure};
use std::{
    collections::HashSet,
    sync::Arc,
    time::{self, SystemTime, UNIX_EPOCH},
};
use tracing::{debug, info, warn};

pub const IMPLEMENTATION_NAME: &str = "authgate";
const TEXTURES_PROPERTY: &str = "textures";

#[derive(Debug, Snafu)]
pub enum SessionError {
    #[snafu(display("{message}"))]
    Validation { message: String },

    #[snafu(display("invalid access token"))]
    Unauthorized,

    #[snafu(display("user store is unavailable"))]
    UserStore {
        #[snafu(source)]
        source: ServiceError,
    },

    #[snafu(display("skin or cloak service is unavailable"))]
    IntegrationUnavailable {
        #[snafu(source)]
        source: ServiceError,
    },

    #[snafu(display("building texture payload"))]
    Textures {
        #[snafu(source)]
        source: TexturesError,
    },

    #[snafu(display("signing service is unavailable"))]
    SigningUnavailable {
        #[snafu(source)]
        source: ServiceError,
    },
}

/// Missing fields deserialize as empty strings and fail [`Session::join`]
/// validation.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerJoinRequest {
    pub access_token: String,
    pub selected_profile: String,
    pub server_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignedProfile {
    pub id: String,
    pub name: String,
    pub properties: Vec<Property>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    /// Base64 of the serialized [`TexturePayload`].
    pub value: String,
    /// Signature over the UTF-8 bytes of `value`.
    pub signature: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerMetadata {
    pub meta: meta::Meta,
    pub skin_domains: Vec<String>,
    pub signature_public_key: String,
}

pub mod meta {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub struct Meta {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub server_name: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub implementation_name: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub implementation_version: Option<String>,
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlayerUuid {
    /// Uuid without hyphens.
    pub id: String,
    pub name: String,
}

pub struct Session {
    users: Arc<dyn UserStore>,
    integrations: Arc<dyn IntegrationService>,
    signing: Arc<dyn SigningService>,
    meta: config::Meta,
    skin_domains: Vec<String>,
}

impl Session {
    pub fn new(
        users: Arc<dyn UserStore>,
        integrations: Arc<dyn IntegrationService>,
        signing: Arc<dyn SigningService>,
        meta: config::Meta,
        skin_domains: Vec<String>,
    ) -> Self {
        Session {
            users,
            integrations,
            signing,
            meta,
            skin_domains,
        }
    }

    /// Validates the access token for the selected profile. Session
    /// bookkeeping belongs to the user store.
    pub async fn join(&self, request: ServerJoinRequest) -> Result<(), SessionError> {
        ensure!(
            !request.access_token.is_empty() && !request.server_id.is_empty(),
            ValidationSnafu {
                message: "accessToken and serverId are required",
            }
        );
        let profile = canonical_uuid(&request.selected_profile).map_err(|_| {
            SessionError::Validation {
                message: "selectedProfile is not a valid uuid".to_string(),
            }
        })?;

        let valid = self
            .users
            .validate_user(&profile, &request.server_id, &request.access_token)
            .await
            .context(UserStoreSnafu)?;
        ensure!(valid, UnauthorizedSnafu);

        info!(profile = %profile, server_id = %request.server_id, "player joined");
        Ok(())
    }

    /// Returns the signed profile of `username` if it joined `server_id`.
    ///
    /// Unknown players and players that did not join are both `None`, so a
    /// caller cannot tell them apart.
    pub async fn has_joined(
        &self,
        username: &str,
        server_id: &str,
        ip: Option<&str>,
    ) -> Result<Option<SignedProfile>, SessionError> {
        if username.is_empty() {
            return Ok(None);
        }

        let Some(user) = self
            .users
            .user_by_name(username)
            .await
            .context(UserStoreSnafu)?
        else {
            debug!(username, "hasJoined for unknown user");
            return Ok(None);
        };

        let eligible = self
            .users
            .can_join_to_server(&user, server_id)
            .await
            .context(UserStoreSnafu)?;
        if !eligible {
            debug!(username, server_id, "hasJoined without matching join");
            return Ok(None);
        }

        debug!(username, server_id, ip = ?ip, "issuing joined profile");
        self.issue(&user, true).await.map(Some)
    }

    /// Signed profile of the player with `uuid`.
    ///
    /// `unsigned` only clears the `signatureRequired` flag of the payload;
    /// the property is signed either way.
    pub async fn profile(
        &self,
        uuid: &str,
        unsigned: bool,
    ) -> Result<Option<SignedProfile>, SessionError> {
        let uuid = canonical_uuid(uuid).map_err(|_| SessionError::Validation {
            message: "profile id is not a valid uuid".to_string(),
        })?;

        let Some(user) = self
            .users
            .user_by_uuid(&uuid)
            .await
            .context(UserStoreSnafu)?
        else {
            return Ok(None);
        };

        self.issue(&user, !unsigned).await.map(Some)
    }

    /// Resolves player names to their uuids. Unknown names are skipped.
    pub async fn players_uuids(&self, names: &[String]) -> Result<Vec<PlayerUuid>, SessionError> {
        let mut players = Vec::with_capacity(names.len());

        for name in names.iter().filter(|name| !name.is_empty()) {
            if let Some(user) = self
                .users
                .user_by_name(name)
                .await
                .context(UserStoreSnafu)?
            {
                players.push(PlayerUuid {
                    id: user.undashed_uuid(),
                    name: user.name,
                });
            }
        }

        Ok(players)
    }

    pub async fn metadata(&self) -> Result<ServerMetadata, SessionError> {
        let mut domains = self.skin_domains.clone();

        let (skin, cloak) = future::join(
            self.integrations.skin_service(),
            self.integrations.cloak_service(),
        )
        .await;
        for service in [skin, cloak] {
            match service {
                Ok(url) => domains.extend(service_domains(&url)),
                Err(err) => warn!("skipping integration domains: {}", err),
            }
        }

        let signature_public_key = self
            .signing
            .public_key()
            .await
            .context(SigningUnavailableSnafu)?;

        Ok(ServerMetadata {
            meta: meta::Meta {
                server_name: Some(self.meta.server_name.clone()),
                implementation_name: Some(IMPLEMENTATION_NAME.to_string()),
                implementation_version: Some(self.meta.implementation_version.clone()),
            },
            skin_domains: dedup(domains),
            signature_public_key,
        })
    }

    async fn issue(
        &self,
        user: &UserIdentity,
        signature_required: bool,
    ) -> Result<SignedProfile, SessionError> {
        let (skin, cloak) = future::try_join(
            self.integrations.skin_service(),
            self.integrations.cloak_service(),
        )
        .await
        .context(IntegrationUnavailableSnafu)?;

        let payload = TexturePayload::build(user, &skin, &cloak, signature_required, now())
            .context(TexturesSnafu)?;
        let value = payload.encode().context(TexturesSnafu)?;

        let signature = self
            .signing
            .sign(value.as_bytes())
            .await
            .context(SigningUnavailableSnafu)?;

        Ok(SignedProfile {
            id: user.uuid.clone(),
            name: user.name.clone(),
            properties: vec![Property {
                name: TEXTURES_PROPERTY.to_string(),
                value,
                signature,
            }],
        })
    }
}

/// The host of a service url and its `.host` wildcard form. Blank or
/// unparseable urls yield nothing.
fn service_domains(url: &str) -> Vec<String> {
    if url.trim().is_empty() {
        return Vec::new();
    }

    match url::Url::parse(url.trim()) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => vec![host.to_string(), format!(".{host}")],
            None => Vec::new(),
        },
        Err(err) => {
            warn!("integration url {:?} is not a valid url: {}", url, err);
            Vec::new()
        }
    }
}

fn dedup(domains: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    domains
        .into_iter()
        .filter(|domain| seen.insert(domain.clone()))
        .collect()
}

fn now() -> time::Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}
