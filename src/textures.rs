//! The `textures` property carried by signed profiles.
//!
//! A payload names the skin and, optionally, the cape of one player. Its
//! serialized JSON is base64-encoded into the property value, and the
//! signature is computed over that base64 text rather than over the JSON.

use crate::identity::UserIdentity;
use openssl::base64;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu, ensure};
use std::time;
use uuid::Uuid;

pub const USER_NAME_TOKEN: &str = "{userName}";
pub const USER_UUID_TOKEN: &str = "{userUuid}";

#[derive(Debug, Snafu)]
pub enum TexturesError {
    #[snafu(display("skin service url is not configured"))]
    IntegrationUnavailable,

    #[snafu(display("serializing texture payload"))]
    Serialize {
        #[snafu(source)]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TexturePayload {
    pub timestamp: i64,
    pub profile_id: String,
    pub profile_name: String,
    pub signature_required: bool,
    pub textures: Textures,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Textures {
    #[serde(rename = "SKIN")]
    pub skin: TextureEntry,

    #[serde(rename = "CAPE", default, skip_serializing_if = "Option::is_none")]
    pub cape: Option<TextureEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    pub url: String,
}

impl TexturePayload {
    /// Builds the payload for `identity` from the integration url templates.
    ///
    /// Every call renders fresh urls, so two payloads for the same player
    /// never share a texture url. A blank cape template leaves the cape out.
    pub fn build(
        identity: &UserIdentity,
        skin_template: &str,
        cape_template: &str,
        signature_required: bool,
        now: time::Duration,
    ) -> Result<TexturePayload, TexturesError> {
        ensure!(!skin_template.trim().is_empty(), IntegrationUnavailableSnafu);

        let cape = (!cape_template.trim().is_empty()).then(|| TextureEntry {
            url: render_url(cape_template, identity),
        });

        Ok(TexturePayload {
            timestamp: i64::try_from(now.as_millis()).unwrap_or(i64::MAX),
            profile_id: identity.uuid.clone(),
            profile_name: identity.name.clone(),
            signature_required,
            textures: Textures {
                skin: TextureEntry {
                    url: render_url(skin_template, identity),
                },
                cape,
            },
        })
    }

    pub fn serialize(&self) -> Result<String, TexturesError> {
        serde_json::to_string(self).context(SerializeSnafu)
    }

    /// Base64 of the serialized payload; this is the property value and the
    /// exact text that gets signed.
    pub fn encode(&self) -> Result<String, TexturesError> {
        Ok(base64::encode_block(self.serialize()?.as_bytes()))
    }
}

/// Substitutes the player tokens in a service url and appends a random
/// `?uuid/<uuid>` suffix so launchers never serve a cached texture.
pub fn render_url(template: &str, identity: &UserIdentity) -> String {
    let url = template
        .replace(USER_NAME_TOKEN, &identity.name)
        .replace(USER_UUID_TOKEN, &identity.uuid);

    format!("{}?uuid/{}", url, Uuid::new_v4().hyphenated())
}
