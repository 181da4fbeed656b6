use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use uuid::Uuid;

/// A player as known to the user store.
///
/// `uuid` is always held in canonical form: uppercase, hyphenated, 36 chars.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub name: String,
    pub uuid: String,
}

impl UserIdentity {
    pub fn new(name: impl Into<String>, uuid: impl AsRef<str>) -> Result<Self, MalformedUuidError> {
        Ok(UserIdentity {
            name: name.into(),
            uuid: canonical_uuid(uuid.as_ref())?,
        })
    }

    /// The uuid with hyphens stripped, as Mojang's profile lookup returns it.
    pub fn undashed_uuid(&self) -> String {
        self.uuid.replace('-', "")
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("malformed uuid {value:?}"))]
pub struct MalformedUuidError {
    value: String,
    source: uuid::Error,
}

/// Normalizes any accepted uuid spelling (simple, hyphenated, any case)
/// into the uppercase hyphenated form.
pub fn canonical_uuid(value: &str) -> Result<String, MalformedUuidError> {
    let uuid = Uuid::parse_str(value.trim()).context(MalformedUuidSnafu { value })?;

    Ok(uuid.hyphenated().to_string().to_uppercase())
}
