//! Config-seeded implementations of the service traits.
//!
//! Nothing here survives a restart: join sessions, and servers created
//! through the API, live only in memory.

use crate::{
    config,
    identity::{UserIdentity, canonical_uuid},
    servers::GameServer,
    services::{AddServer, IntegrationService, ProfileStore, ServiceError, UserStore},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

struct StoredUser {
    identity: UserIdentity,
    access_token: String,
}

pub struct MemoryUserStore {
    users: Vec<StoredUser>,
    /// Canonical user uuid -> server id of the last successful join.
    sessions: RwLock<HashMap<String, String>>,
}

impl MemoryUserStore {
    /// Users with a malformed uuid are skipped with a warning.
    pub fn new(users: impl IntoIterator<Item = config::user::User>) -> Self {
        let users = users
            .into_iter()
            .filter_map(|user| match UserIdentity::new(user.name, &user.uuid) {
                Ok(identity) => Some(StoredUser {
                    identity,
                    access_token: user.access_token,
                }),
                Err(err) => {
                    warn!("skipping configured user: {}", err);
                    None
                }
            })
            .collect();

        MemoryUserStore {
            users,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn find_by_uuid(&self, uuid: &str) -> Option<&StoredUser> {
        self.users.iter().find(|user| user.identity.uuid == uuid)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn user_by_name(&self, name: &str) -> Result<Option<UserIdentity>, ServiceError> {
        Ok(self
            .users
            .iter()
            .find(|user| user.identity.name.eq_ignore_ascii_case(name))
            .map(|user| user.identity.clone()))
    }

    async fn user_by_uuid(&self, uuid: &str) -> Result<Option<UserIdentity>, ServiceError> {
        Ok(self.find_by_uuid(uuid).map(|user| user.identity.clone()))
    }

    async fn can_join_to_server(
        &self,
        user: &UserIdentity,
        server_id: &str,
    ) -> Result<bool, ServiceError> {
        let sessions = self.sessions.read().await;

        Ok(sessions
            .get(&user.uuid)
            .is_some_and(|joined| joined == server_id))
    }

    async fn validate_user(
        &self,
        profile: &str,
        server_id: &str,
        access_token: &str,
    ) -> Result<bool, ServiceError> {
        let Ok(uuid) = canonical_uuid(profile) else {
            return Ok(false);
        };
        let Some(user) = self.find_by_uuid(&uuid) else {
            return Ok(false);
        };
        if user.access_token != access_token {
            return Ok(false);
        }

        debug!(user = %user.identity.name, server_id, "join recorded");
        self.sessions
            .write()
            .await
            .insert(uuid, server_id.to_string());

        Ok(true)
    }
}

pub struct StaticIntegrations {
    integrations: config::Integrations,
}

impl StaticIntegrations {
    pub fn new(integrations: config::Integrations) -> Self {
        StaticIntegrations { integrations }
    }
}

#[async_trait]
impl IntegrationService for StaticIntegrations {
    async fn skin_service(&self) -> Result<String, ServiceError> {
        Ok(self.integrations.skin_service.clone())
    }

    async fn cloak_service(&self) -> Result<String, ServiceError> {
        Ok(self.integrations.cloak_service.clone())
    }
}

pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, Vec<GameServer>>>,
}

impl MemoryProfileStore {
    pub fn new(profiles: impl IntoIterator<Item = config::profile::Profile>) -> Self {
        MemoryProfileStore {
            profiles: RwLock::new(
                profiles
                    .into_iter()
                    .map(|profile| (profile.name, profile.servers))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn servers(&self, profile_name: &str) -> Result<Option<Vec<GameServer>>, ServiceError> {
        Ok(self.profiles.read().await.get(profile_name).cloned())
    }

    async fn add_server(
        &self,
        profile_name: &str,
        server: GameServer,
    ) -> Result<AddServer, ServiceError> {
        let mut profiles = self.profiles.write().await;

        let Some(servers) = profiles.get_mut(profile_name) else {
            return Ok(AddServer::UnknownProfile);
        };
        if servers
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&server.name))
        {
            return Ok(AddServer::Duplicate);
        }

        servers.push(server);
        Ok(AddServer::Added)
    }
}
