use authgate::{
    config,
    http::{self, state},
    servers::{GameServer, Servers},
    services::memory::{MemoryProfileStore, MemoryUserStore, StaticIntegrations},
    session::{Session, SignedProfile},
    signing::RsaSigningService,
};
use openssl::{base64, hash::MessageDigest, pkey::PKey, rsa::Rsa, sign::Verifier};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

const STEVE_UUID: &str = "8667BA71-B85A-4004-AF54-457A9734EED7";
const ALEX_UUID: &str = "EC561538-F3FD-461D-AFF5-086B22154BCE";

async fn start_server() -> String {
    let signing_key = Rsa::generate(2048).unwrap();

    let session = Session::new(
        Arc::new(MemoryUserStore::new([
            config::user::User {
                name: "Steve".to_string(),
                uuid: STEVE_UUID.to_lowercase(),
                access_token: "steve-token".to_string(),
            },
            config::user::User {
                name: "Alex".to_string(),
                uuid: ALEX_UUID.to_string(),
                access_token: "alex-token".to_string(),
            },
        ])),
        Arc::new(StaticIntegrations::new(config::Integrations {
            skin_service: "https://skins.example.com/{userUuid}".to_string(),
            cloak_service: String::new(),
        })),
        Arc::new(RsaSigningService::new(signing_key).unwrap()),
        config::Meta {
            server_name: "Gml".to_string(),
            implementation_version: "1.0.0".to_string(),
        },
        vec!["textures.example.com".to_string()],
    );
    let servers = Servers::new(Arc::new(MemoryProfileStore::new([
        config::profile::Profile {
            name: "Vanilla".to_string(),
            servers: vec![GameServer {
                name: "Main".to_string(),
                address: "mc.example.com".to_string(),
                port: 25565,
            }],
        },
    ])));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        http::init(listener, Arc::new(state::State { session, servers }))
            .await
            .unwrap();
    });

    format!("http://{}", addr)
}

async fn join(client: &reqwest::Client, base: &str, profile: &str, token: &str) -> StatusCode {
    client
        .post(format!("{base}/sessionserver/session/minecraft/join"))
        .json(&json!({
            "accessToken": token,
            "selectedProfile": profile,
            "serverId": "server-hash",
        }))
        .send()
        .await
        .unwrap()
        .status()
}

async fn has_joined(client: &reqwest::Client, base: &str, username: &str) -> reqwest::Response {
    client
        .get(format!("{base}/sessionserver/session/minecraft/hasJoined"))
        .query(&[("username", username), ("serverId", "server-hash")])
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn metadata_advertises_domains_and_key() {
    let base = start_server().await;

    let response = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["meta"]["serverName"], "Gml");
    assert_eq!(body["meta"]["implementationVersion"], "1.0.0");
    assert_eq!(
        body["skinDomains"],
        json!(["textures.example.com", "skins.example.com", ".skins.example.com"])
    );
    assert!(
        body["signaturePublicKey"]
            .as_str()
            .unwrap()
            .starts_with("-----BEGIN PUBLIC KEY-----")
    );
}

#[tokio::test]
async fn join_then_has_joined_returns_verifiable_profile() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    assert_eq!(
        join(&client, &base, &STEVE_UUID.replace('-', ""), "steve-token").await,
        StatusCode::NO_CONTENT
    );

    let response = has_joined(&client, &base, "Steve").await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile: SignedProfile = response.json().await.unwrap();
    assert_eq!(profile.id, STEVE_UUID);
    assert_eq!(profile.name, "Steve");

    let metadata: Value = reqwest::get(format!("{base}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let public = PKey::public_key_from_pem(
        metadata["signaturePublicKey"].as_str().unwrap().as_bytes(),
    )
    .unwrap();

    let property = &profile.properties[0];
    let mut verifier = Verifier::new(MessageDigest::sha1(), &public).unwrap();
    verifier.update(property.value.as_bytes()).unwrap();
    assert!(verifier.verify(&base64::decode_block(&property.signature).unwrap()).unwrap());

    let payload: Value =
        serde_json::from_slice(&base64::decode_block(&property.value).unwrap()).unwrap();
    assert_eq!(payload["signatureRequired"], true);
    assert!(payload["textures"].get("SKIN").is_some());
    assert!(payload["textures"].get("CAPE").is_none());
}

#[tokio::test]
async fn join_with_bad_token_is_unauthorized() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    assert_eq!(
        join(&client, &base, STEVE_UUID, "alex-token").await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        has_joined(&client, &base, "Steve").await.status(),
        StatusCode::NO_CONTENT
    );
}

#[tokio::test]
async fn join_with_malformed_profile_is_bad_request() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    assert_eq!(
        join(&client, &base, "ABC-123", "steve-token").await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn has_joined_unknown_and_ineligible_look_the_same() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let unknown = has_joined(&client, &base, "Herobrine").await;
    let ineligible = has_joined(&client, &base, "Alex").await;

    assert_eq!(unknown.status(), StatusCode::NO_CONTENT);
    assert_eq!(ineligible.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        unknown.bytes().await.unwrap(),
        ineligible.bytes().await.unwrap()
    );
}

#[tokio::test]
async fn profile_lookup_signs_even_when_unsigned() {
    let base = start_server().await;

    for unsigned in ["true", "false"] {
        let response = reqwest::get(format!(
            "{base}/sessionserver/session/minecraft/profile/{}?unsigned={unsigned}",
            ALEX_UUID.to_lowercase().replace('-', "")
        ))
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let profile: SignedProfile = response.json().await.unwrap();
        assert_eq!(profile.id, ALEX_UUID);
        assert!(!profile.properties[0].signature.is_empty());

        let payload: Value =
            serde_json::from_slice(&base64::decode_block(&profile.properties[0].value).unwrap())
                .unwrap();
        assert_eq!(payload["signatureRequired"], unsigned == "false");
    }
}

#[tokio::test]
async fn profile_lookup_status_codes() {
    let base = start_server().await;

    let unknown = reqwest::get(format!(
        "{base}/sessionserver/session/minecraft/profile/00000000000000000000000000000000"
    ))
    .await
    .unwrap();
    assert_eq!(unknown.status(), StatusCode::NO_CONTENT);

    let malformed = reqwest::get(format!("{base}/sessionserver/session/minecraft/profile/ABC-123"))
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn players_uuids_resolves_known_names() {
    let base = start_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/profiles/minecraft"))
        .json(&json!(["Steve", "Nobody"]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([{ "id": "8667BA71B85A4004AF54457A9734EED7", "name": "Steve" }])
    );
}

#[tokio::test]
async fn player_attributes_is_ok() {
    let base = start_server().await;

    let response = reqwest::get(format!("{base}/minecraftservices/player/attributes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn servers_can_be_listed_and_created() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let listed: Value = client
        .get(format!("{base}/api/v1/servers/Vanilla"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["statusCode"], 200);
    assert_eq!(listed["data"][0]["name"], "Main");

    let created = client
        .post(format!("{base}/api/v1/servers/Vanilla"))
        .json(&json!({ "name": "Creative Hub", "address": "creative.example.com", "port": 25566 }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(
        created.headers()["location"],
        "/api/v1/servers/Vanilla/Creative%20Hub"
    );

    let listed: Value = client
        .get(format!("{base}/api/v1/servers/Vanilla"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn servers_reject_invalid_requests() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let unknown = client
        .get(format!("{base}/api/v1/servers/Modded"))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    let invalid = client
        .post(format!("{base}/api/v1/servers/Vanilla"))
        .json(&json!({ "name": "", "address": "", "port": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let body: Value = invalid.json().await.unwrap();
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);

    let duplicate = client
        .post(format!("{base}/api/v1/servers/Vanilla"))
        .json(&json!({ "name": "Main", "address": "mc.example.com", "port": 25565 }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn join_without_access_token_is_bad_request_envelope() {
    let base = start_server().await;

    let response = reqwest::Client::new()
        .post(format!("{base}/sessionserver/session/minecraft/join"))
        .json(&json!({ "selectedProfile": STEVE_UUID, "serverId": "x" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn malformed_json_bodies_are_bad_request_envelopes() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for url in [
        format!("{base}/sessionserver/session/minecraft/join"),
        format!("{base}/api/v1/servers/Vanilla"),
        format!("{base}/api/profiles/minecraft"),
    ] {
        let response = client
            .post(url)
            .header("content-type", "application/json")
            .body("{ not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["statusCode"], 400);
    }
}

#[tokio::test]
async fn create_server_with_missing_name_or_wide_port_is_bad_request() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let missing_name = client
        .post(format!("{base}/api/v1/servers/Vanilla"))
        .json(&json!({ "address": "h", "port": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_name.status(), StatusCode::BAD_REQUEST);
    let body: Value = missing_name.json().await.unwrap();
    assert_eq!(body["errors"], json!(["server name is empty"]));

    let wide_port = client
        .post(format!("{base}/api/v1/servers/Vanilla"))
        .json(&json!({ "name": "Big", "address": "h", "port": 70000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(wide_port.status(), StatusCode::BAD_REQUEST);
    let body: Value = wide_port.json().await.unwrap();
    assert_eq!(body["errors"], json!(["server port must be between 1 and 65535"]));
}
