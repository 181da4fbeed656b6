//! Capabilities the session handlers consume.
//!
//! Each handler receives only the traits it needs. The `memory` module
//! carries the implementations the binary runs with.

pub mod memory;

use crate::{identity::UserIdentity, servers::GameServer};
use async_trait::async_trait;
use snafu::Snafu;

/// Failure of an upstream collaborator. The message is for logs only.
#[derive(Debug, Snafu)]
#[snafu(display("{message}"))]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        ServiceError {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn user_by_name(&self, name: &str) -> Result<Option<UserIdentity>, ServiceError>;

    /// `uuid` is already in canonical form.
    async fn user_by_uuid(&self, uuid: &str) -> Result<Option<UserIdentity>, ServiceError>;

    /// Whether `user` completed a `join` for `server_id`.
    async fn can_join_to_server(
        &self,
        user: &UserIdentity,
        server_id: &str,
    ) -> Result<bool, ServiceError>;

    /// Checks the access token of `profile` and, on success, remembers the
    /// join so a later `can_join_to_server` for the same server passes.
    async fn validate_user(
        &self,
        profile: &str,
        server_id: &str,
        access_token: &str,
    ) -> Result<bool, ServiceError>;
}

/// Templated skin and cloak service urls. An empty string means unset.
#[async_trait]
pub trait IntegrationService: Send + Sync {
    async fn skin_service(&self) -> Result<String, ServiceError>;

    async fn cloak_service(&self) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait SigningService: Send + Sync {
    /// Signs `data` and returns the signature as base64.
    async fn sign(&self, data: &[u8]) -> Result<String, ServiceError>;

    async fn public_key(&self) -> Result<String, ServiceError>;
}

/// Game profiles and the servers attached to them.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn servers(&self, profile_name: &str) -> Result<Option<Vec<GameServer>>, ServiceError>;

    async fn add_server(
        &self,
        profile_name: &str,
        server: GameServer,
    ) -> Result<AddServer, ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddServer {
    Added,
    UnknownProfile,
    /// The profile already has a server with this name.
    Duplicate,
}
