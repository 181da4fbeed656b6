//! Game servers attached to launcher profiles.

use crate::services::{AddServer, ProfileStore, ServiceError};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu, ensure};
use std::sync::Arc;
use tracing::info;

const MAX_NAME_LEN: usize = 64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameServer {
    pub name: String,
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CreateServer {
    pub name: String,
    pub address: String,
    /// Wider than `u16` so out-of-range ports reach [`CreateServer::validate`].
    pub port: i64,
}

impl CreateServer {
    /// Returns every problem with the request; empty when it is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let name = self.name.trim();

        if name.is_empty() {
            errors.push("server name is empty".to_string());
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(format!("server name is longer than {MAX_NAME_LEN} characters"));
        } else if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '))
        {
            errors.push("server name contains unsupported characters".to_string());
        }

        if self.address.trim().is_empty() {
            errors.push("server address is empty".to_string());
        }

        if u16::try_from(self.port).map_or(true, |port| port == 0) {
            errors.push("server port must be between 1 and 65535".to_string());
        }

        errors
    }
}

#[derive(Debug, Snafu)]
pub enum ServersError {
    #[snafu(display("{message}"))]
    Invalid {
        message: String,
        errors: Vec<String>,
    },

    #[snafu(display("profile store is unavailable"))]
    Store {
        #[snafu(source)]
        source: ServiceError,
    },
}

pub struct Servers {
    profiles: Arc<dyn ProfileStore>,
}

impl Servers {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Servers { profiles }
    }

    pub async fn list(&self, profile_name: &str) -> Result<Vec<GameServer>, ServersError> {
        ensure_profile_name(profile_name)?;

        self.profiles
            .servers(profile_name)
            .await
            .context(StoreSnafu)?
            .ok_or_else(unknown_profile)
    }

    pub async fn create(
        &self,
        profile_name: &str,
        request: CreateServer,
    ) -> Result<GameServer, ServersError> {
        ensure_profile_name(profile_name)?;

        let errors = request.validate();
        ensure!(
            errors.is_empty(),
            InvalidSnafu {
                message: "validation failed",
                errors,
            }
        );

        let server = GameServer {
            name: request.name.trim().to_string(),
            address: request.address.trim().to_string(),
            port: u16::try_from(request.port).unwrap_or_default(),
        };

        match self
            .profiles
            .add_server(profile_name, server.clone())
            .await
            .context(StoreSnafu)?
        {
            AddServer::Added => {
                info!(profile = profile_name, server = %server.name, "server added");
                Ok(server)
            }
            AddServer::UnknownProfile => Err(unknown_profile()),
            AddServer::Duplicate => InvalidSnafu {
                message: format!("server {:?} already exists in this profile", server.name),
                errors: Vec::<String>::new(),
            }
            .fail(),
        }
    }
}

fn ensure_profile_name(profile_name: &str) -> Result<(), ServersError> {
    ensure!(
        !profile_name.trim().is_empty(),
        InvalidSnafu {
            message: "profile name is empty",
            errors: Vec::<String>::new(),
        }
    );
    Ok(())
}

fn unknown_profile() -> ServersError {
    ServersError::Invalid {
        message: "profile with this name does not exist".to_string(),
        errors: Vec::new(),
    }
}
