use serde::Deserialize;

#[derive(Deserialize)]
pub struct HasJoinedQuery {
    #[serde(default)]
    pub username: String,

    #[serde(rename = "serverId", default)]
    pub server_id: String,

    pub ip: Option<String>,
}

#[derive(Deserialize)]
pub struct ProfilePath {
    pub uuid: String,
}

#[derive(Deserialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub unsigned: bool,
}

#[derive(Deserialize)]
pub struct ProfileNamePath {
    pub profile_name: String,
}
