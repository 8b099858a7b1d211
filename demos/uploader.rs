/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Uploads the photos below one or more directories into an album.
//!
//! `cargo run --example uploader -- <album key> <dir>...`
//!
//! Ctrl-C stops the run; uploads already being sent are allowed to finish.

extern crate smugmug_client;

use anyhow::{Result, bail};
use dotenvy::dotenv;
use serde::Deserialize;
use smugmug_client::v2::{Client, Creds, UploadConfig};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

// Oauth tokens stored in cache json file
#[derive(Deserialize, Debug)]
struct SmugMugOauth1Token {
    token: String,
    secret: String,
}

// Retrieves the auth tokens.
fn get_smugmug_tokens(path: PathBuf) -> Result<SmugMugOauth1Token> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(album_key) = args.next() else {
        bail!("usage: uploader <album key> <dir>...");
    };
    let roots: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if roots.is_empty() {
        bail!("no directories given");
    }

    // Uploading always needs the full set of OAuth1 tokens
    let api_key = std::env::var("SMUGMUG_API_KEY")?;
    let api_secret = std::env::var("SMUGMUG_API_SECRET")?;
    let token_cache = std::env::var("SMUGMUG_AUTH_CACHE")?;
    let tokens = get_smugmug_tokens(token_cache.into())?;
    let client = Client::new(Creds::from_tokens(
        &api_key,
        Some(&api_secret),
        Some(&tokens.token),
        Some(&tokens.secret),
    ));

    // SMUGMUG_UPLOAD_CONCURRENCY and SMUGMUG_UPLOAD_EXTENSIONS tune the run
    let config = UploadConfig::from_env(&album_key);
    let mut uploads = client.uploads_from_disk(config, roots).await;

    let stop = uploads.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.cancel();
        }
    });

    let mut count = 0;
    while let Some(result) = uploads.next().await {
        count += 1;
        println!(
            "{} -> {} ({:?})",
            result.uploadable.name, result.image_uri, result.elapsed
        );
    }
    println!("{} files uploaded", count);

    if let Some(err) = uploads.error().await {
        bail!("upload stopped: {}", err);
    }
    Ok(())
}
