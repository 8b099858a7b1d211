/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde::Deserialize;
use serde_json::{Value, json};
use smugmug_client::v2::{Client, Creds};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use wiremock::MockServer;

#[derive(Deserialize, Debug)]
struct SmugMugOauth1Token {
    token: String,
    secret: String,
}

fn get_smugmug_tokens(path: PathBuf) -> anyhow::Result<SmugMugOauth1Token> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

#[allow(dead_code)]
pub(crate) fn get_full_auth_tokens() -> anyhow::Result<Creds> {
    let api_key = std::env::var("SMUGMUG_API_KEY")?;
    let api_secret = std::env::var("SMUGMUG_API_SECRET")?;
    let token_cache = std::env::var("SMUGMUG_AUTH_CACHE")?;
    let tokens = get_smugmug_tokens(token_cache.into())?;

    Ok(Creds::from_tokens(
        &api_key,
        Some(&api_secret),
        Some(&tokens.token),
        Some(&tokens.secret),
    ))
}

#[allow(dead_code)]
pub(crate) fn get_read_only_auth_tokens() -> anyhow::Result<Creds> {
    let api_key = std::env::var("SMUGMUG_API_KEY")?;
    Ok(Creds::from_tokens(&api_key, None, None, None))
}

/// Read only client pointed at the mock server for both the API and uploads
#[allow(dead_code)]
pub(crate) fn mock_client(server: &MockServer) -> Client {
    Client::with_origins(
        Creds::from_tokens("test-key", None, None, None),
        &server.uri(),
        &server.uri(),
    )
}

/// Signed client pointed at the mock server
#[allow(dead_code)]
pub(crate) fn signed_mock_client(server: &MockServer) -> Client {
    Client::with_origins(
        Creds::from_tokens("test-key", Some("test-secret"), Some("token"), Some("token-secret")),
        &server.uri(),
        &server.uri(),
    )
}

/// Wraps a payload the way the API does
#[allow(dead_code)]
pub(crate) fn envelope(response: Value) -> Value {
    json!({
        "Code": 200,
        "Message": "Ok",
        "Response": response,
    })
}

#[allow(dead_code)]
pub(crate) fn envelope_with_expansions(response: Value, expansions: Value) -> Value {
    json!({
        "Code": 200,
        "Message": "Ok",
        "Response": response,
        "Expansions": expansions,
    })
}

#[allow(dead_code)]
pub(crate) fn node_json(id: &str, node_type: &str, has_children: bool) -> Value {
    json!({
        "Uri": format!("/api/v2/node/{}", id),
        "Name": id,
        "NodeID": id,
        "Type": node_type,
        "HasChildren": has_children,
        "UrlPath": format!("/{}", id),
        "Uris": {
            "ChildNodes": format!("/api/v2/node/{}!children", id),
        },
    })
}

#[allow(dead_code)]
pub(crate) fn pages_json(total: u64, start: u64, count: u64) -> Value {
    json!({
        "Total": total,
        "Start": start,
        "Count": count,
        "RequestedCount": count,
    })
}
