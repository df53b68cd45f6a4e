//! End-to-end tests for cosmos-sign.
//!
//! These run the whole path a wallet takes: mnemonic to identity, identity
//! to address, transaction to signed envelope, and envelope to a node. The
//! node is an in-process axum server bound to an ephemeral port, serving
//! both the IRISnet and the standard route layouts so route selection can
//! be checked from the outside.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use cosmos_sign::canonical::canonicalize;
use cosmos_sign::config::{ChainFlavor, ClientConfig, ValidationMode};
use cosmos_sign::identity::{derive_address, derive_identity, Address};
use cosmos_sign::transaction::{sign, verify_envelope, BroadcastMode, SignedEnvelope};
use cosmos_sign::{Cosmos, SignerError};

const ART: &str = "abandon abandon abandon abandon abandon abandon \
                   abandon abandon abandon abandon abandon art";
const ABOUT: &str = "abandon abandon abandon abandon abandon abandon \
                     abandon abandon abandon abandon abandon about";

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// Serves `app` on 127.0.0.1 and returns its base URL.
async fn spawn_node(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock node");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock node");
    });
    format!("http://{}", addr)
}

/// A node that answers on both route layouts and echoes what it receives.
fn mock_node() -> Router {
    async fn account(route: &'static str, address: String) -> Json<Value> {
        Json(json!({
            "route": route,
            "value": {"address": address, "account_number": "12", "sequence": "3"}
        }))
    }

    async fn echo(route: &'static str, raw: String) -> (StatusCode, Json<Value>) {
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(_) => return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad json"}))),
        };
        if parsed["tx"]["memo"] == "reject me" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"route": route, "error": "signature verification failed"})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({"route": route, "raw": raw, "txhash": "0A1B2C"})),
        )
    }

    Router::new()
        .route(
            "/bank/accounts/:address",
            get(|Path(address): Path<String>| account("bank", address)),
        )
        .route(
            "/auth/accounts/:address",
            get(|Path(address): Path<String>| account("auth", address)),
        )
        .route("/tx/broadcast", post(|raw: String| echo("tx/broadcast", raw)))
        .route("/txs", post(|raw: String| echo("txs", raw)))
}

fn client(url: &str, chain_id: &str, prefix: &str) -> Cosmos {
    let config = ClientConfig::builder(url, chain_id)
        .bech32_prefix(prefix)
        .build()
        .expect("valid config");
    Cosmos::new(config).expect("client")
}

fn sample_tx() -> Value {
    json!({"msgs": [], "fee": {}, "memo": "", "account_number": "1", "sequence": "1"})
}

// ---------------------------------------------------------------------------
// Offline path
// ---------------------------------------------------------------------------

#[test]
fn conformance_vector() {
    let did = derive_identity(ART, false).unwrap();
    let address = derive_address(&did, "cosmos").unwrap();
    assert_eq!(address.as_str(), "cosmos1r5w2f8rssqjsrck8nwrp9n52g029xz643f5ckn");
}

#[test]
fn mnemonic_to_verified_envelope() {
    let did = derive_identity(ABOUT, true).unwrap();
    let envelope = sign(&sample_tx(), &did, BroadcastMode::Sync).unwrap();

    verify_envelope(&sample_tx(), &envelope).unwrap();

    let text = envelope.to_json_string().unwrap();
    let parsed: SignedEnvelope = serde_json::from_str(&text).unwrap();
    verify_envelope(&sample_tx(), &parsed).unwrap();
    assert_eq!(parsed.tx.signatures[0].pub_key.value, did.public_key_base64());
}

#[test]
fn identities_are_independent() {
    let a = derive_identity(ART, false).unwrap();
    let b = derive_identity(ABOUT, false).unwrap();
    let envelope = sign(&sample_tx(), &a, BroadcastMode::Sync).unwrap();

    let mut forged = envelope.clone();
    forged.tx.signatures[0].pub_key.value = b.public_key_base64();
    assert!(verify_envelope(&sample_tx(), &forged).is_err());

    assert_ne!(
        derive_address(&a, "cosmos").unwrap(),
        derive_address(&b, "cosmos").unwrap()
    );
}

#[test]
fn addresses_parse_back() {
    let did = derive_identity(ART, false).unwrap();
    for prefix in ["cosmos", "iaa", "terra"] {
        let address = derive_address(&did, prefix).unwrap();
        let parsed = Address::parse(address.as_str(), prefix).unwrap();
        assert_eq!(parsed, address);
    }
}

#[test]
fn empty_mnemonic_rejected_everywhere() {
    assert!(matches!(
        derive_identity("", false),
        Err(SignerError::InvalidMnemonic(_))
    ));
    assert!(matches!(
        derive_identity("", true),
        Err(SignerError::InvalidMnemonic(_))
    ));
}

#[test]
fn strict_client_refuses_incomplete_tx() {
    let config = ClientConfig::builder("http://localhost:1317", "cosmoshub-4")
        .validation(ValidationMode::Strict)
        .build()
        .unwrap();
    let cosmos = Cosmos::new(config).unwrap();
    let did = cosmos.identity(ART, false).unwrap();
    let msg = cosmos.new_std_msg(json!({"msgs": [], "fee": {}, "account_number": "1"}));
    assert!(matches!(
        cosmos.sign(&msg, &did, BroadcastMode::Sync),
        Err(SignerError::MissingField("sequence"))
    ));
}

// ---------------------------------------------------------------------------
// Against a node
// ---------------------------------------------------------------------------

#[tokio::test]
async fn irishub_uses_bank_and_tx_broadcast_routes() {
    let url = spawn_node(mock_node()).await;
    let cosmos = client(&url, "irishub-1", "iaa");
    assert_eq!(cosmos.config().chain_flavor(), ChainFlavor::IrisHub);

    let did = cosmos.identity(ART, false).unwrap();
    let address = cosmos.address_of(&did).unwrap();
    let account = cosmos.accounts(address.as_str()).await.unwrap();
    assert_eq!(account.status, 200);
    assert_eq!(account.body["route"], "bank");
    assert_eq!(account.body["value"]["address"], address.as_str());

    let envelope = cosmos
        .sign(&cosmos.new_std_msg(sample_tx()), &did, BroadcastMode::Block)
        .unwrap();
    let response = cosmos.broadcast(&envelope).await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.body["route"], "tx/broadcast");
}

#[tokio::test]
async fn standard_chain_uses_auth_and_txs_routes() {
    let url = spawn_node(mock_node()).await;
    let cosmos = client(&url, "cosmoshub-4", "cosmos");

    let account = cosmos.accounts("cosmos1xyz").await.unwrap();
    assert_eq!(account.body["route"], "auth");

    let did = cosmos.identity(ART, false).unwrap();
    let envelope = cosmos
        .sign(&cosmos.new_std_msg(sample_tx()), &did, BroadcastMode::Sync)
        .unwrap();
    let response = cosmos.broadcast(&envelope).await.unwrap();
    assert_eq!(response.body["route"], "txs");
}

#[tokio::test]
async fn broadcast_body_is_the_envelope_in_wire_order() {
    let url = spawn_node(mock_node()).await;
    let cosmos = client(&url, "cosmoshub-4", "cosmos");
    let did = cosmos.identity(ART, false).unwrap();
    let envelope = cosmos
        .sign(&cosmos.new_std_msg(sample_tx()), &did, BroadcastMode::Sync)
        .unwrap();

    let response = cosmos.broadcast(&envelope).await.unwrap();
    let raw = response.body["raw"].as_str().unwrap();
    assert_eq!(raw, envelope.to_json_string().unwrap());
    assert!(raw.starts_with(r#"{"tx":{"msg":[],"fee":{},"signatures":[{"account_number":"1""#));
    assert!(raw.ends_with(r#""memo":""},"mode":"sync"}"#));

    let received: SignedEnvelope = serde_json::from_str(raw).unwrap();
    verify_envelope(&sample_tx(), &received).unwrap();
}

#[tokio::test]
async fn reloaded_envelope_keeps_null_fields_on_rebroadcast() {
    let url = spawn_node(mock_node()).await;
    let cosmos = client(&url, "cosmoshub-4", "cosmos");
    let did = cosmos.identity(ART, false).unwrap();

    let mut tx = sample_tx();
    tx["memo"] = Value::Null;
    let envelope = cosmos
        .sign(&cosmos.new_std_msg(tx.clone()), &did, BroadcastMode::Sync)
        .unwrap();
    let saved = envelope.to_json_string().unwrap();

    // A signed envelope written to disk and read back for `broadcast`.
    let reloaded: SignedEnvelope = serde_json::from_str(&saved).unwrap();
    let response = cosmos.broadcast(&reloaded).await.unwrap();
    let raw = response.body["raw"].as_str().unwrap();
    assert_eq!(raw, saved);
    assert!(raw.ends_with(r#""memo":null},"mode":"sync"}"#));
    verify_envelope(&tx, &reloaded).unwrap();
}

#[tokio::test]
async fn rejected_broadcast_still_returns_node_json() {
    let url = spawn_node(mock_node()).await;
    let cosmos = client(&url, "cosmoshub-4", "cosmos");
    let did = cosmos.identity(ART, false).unwrap();

    let mut tx = sample_tx();
    tx["memo"] = json!("reject me");
    let envelope = cosmos
        .sign(&cosmos.new_std_msg(tx), &did, BroadcastMode::Sync)
        .unwrap();

    let response = cosmos.broadcast(&envelope).await.unwrap();
    assert_eq!(response.status, 400);
    assert!(!response.is_success());
    assert_eq!(response.body["error"], "signature verification failed");
}

#[tokio::test]
async fn non_json_body_is_a_serialization_error() {
    let app = Router::new().route(
        "/auth/accounts/:address",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
    );
    let url = spawn_node(app).await;
    let cosmos = client(&url, "cosmoshub-4", "cosmos");

    let result = cosmos.accounts("cosmos1xyz").await;
    assert!(matches!(result, Err(SignerError::Serialization(_))));
}

#[tokio::test]
async fn signed_payload_matches_canonical_bytes() {
    let url = spawn_node(mock_node()).await;
    let cosmos = client(&url, "cosmoshub-4", "cosmos");
    let did = cosmos.identity(ART, false).unwrap();

    let tx: Value = serde_json::from_str(
        r#"{"sequence":"1","memo":"","msgs":[],"fee":{},"account_number":"1"}"#,
    )
    .unwrap();
    let msg = cosmos.new_std_msg(tx.clone());
    assert_eq!(msg.bytes(), &canonicalize(&sample_tx()));

    let envelope = cosmos.sign(&msg, &did, BroadcastMode::Sync).unwrap();
    assert_eq!(
        envelope.tx.signatures[0].signature,
        "a9KH02hKjFo2f3LokzewBfX4kQmcdHSwldlk5hYKYK5z9OPJ8z4Jg9gxsEsiXKDZc/VpO4T0yabAEy0JRPYnCg=="
    );
    let response = cosmos.broadcast(&envelope).await.unwrap();
    assert_eq!(response.body["txhash"], "0A1B2C");
}
