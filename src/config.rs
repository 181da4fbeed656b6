use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use std::{
    fs,
    io,
    net::{IpAddr, Ipv4Addr},
    path::Path,
};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub binds: Binds,
    pub meta: Meta,

    /// Domains advertised to clients in addition to the ones derived from
    /// the integration urls.
    #[serde(default)]
    pub skin_domains: Vec<String>,

    #[serde(default)]
    pub integrations: Integrations,

    #[serde(default)]
    pub users: Vec<user::User>,

    #[serde(default)]
    pub profiles: Vec<profile::Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Binds {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub server_name: String,
    pub implementation_version: String,
}

/// Url templates for the texture services. `{userName}` and `{userUuid}`
/// are substituted per player.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Integrations {
    #[serde(default)]
    pub skin_service: String,

    #[serde(default)]
    pub cloak_service: String,
}

pub mod user {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        pub name: String,
        pub uuid: String,
        pub access_token: String,
    }
}

pub mod profile {
    use crate::servers::GameServer;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct Profile {
        pub name: String,

        #[serde(default)]
        pub servers: Vec<GameServer>,
    }
}

pub fn default() -> Config {
    Config {
        binds: Binds {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 10000,
        },
        meta: Meta {
            server_name: "authgate".to_string(),
            implementation_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        skin_domains: Vec::new(),
        integrations: Integrations::default(),
        users: Vec::new(),
        profiles: Vec::new(),
    }
}

pub enum ConfigSource {
    Created(Config),
    Loaded(Config),
}

#[derive(Debug, Snafu)]
pub enum LoadConfigError {
    #[snafu(display("reading config file"))]
    Read {
        #[snafu(source)]
        source: io::Error,
    },

    #[snafu(display("malformed config file"))]
    Parse {
        #[snafu(source)]
        source: serde_json::Error,
    },

    #[snafu(display("serializing default config"))]
    Serialize {
        #[snafu(source)]
        source: serde_json::Error,
    },

    #[snafu(display("writing default config"))]
    Write {
        #[snafu(source)]
        source: io::Error,
    },
}

/// Loads the config at `path`, or writes the default one there when the
/// file does not exist yet.
pub fn load_or_create_config(path: &Path) -> Result<ConfigSource, LoadConfigError> {
    if !path.exists() {
        let config = default();
        let serialized = serde_json::to_string_pretty(&config).context(SerializeSnafu)?;
        fs::write(path, serialized).context(WriteSnafu)?;

        return Ok(ConfigSource::Created(config));
    }

    let data = fs::read(path).context(ReadSnafu)?;
    let config = serde_json::from_slice(&data).context(ParseSnafu)?;

    Ok(ConfigSource::Loaded(config))
}
