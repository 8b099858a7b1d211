/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Prints a user's folder/album tree.
//!
//! `cargo run --example tree_walker -- [nickname] [depth]`

extern crate smugmug_client;

use anyhow::Result;
use dotenvy::dotenv;
use smugmug_client::v2::{
    ApiOptions, Client, Creds, NodeType, User, walk, walk_to_depth,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let nickname = args.next().unwrap_or_else(|| "apidemo".to_string());
    let depth = args.next().map(|v| v.parse::<usize>()).transpose()?;

    // The API key is the only required field for accessing public accounts
    let api_key = std::env::var("SMUGMUG_API_KEY")?;
    let client = Client::new(Creds::from_tokens(&api_key, None, None, None));

    // Side-load the root node along with the user
    let user = User::from_id(
        client.clone(),
        &nickname,
        &ApiOptions::default().with_expansions(&["Node"]),
    )
    .await?;
    let root = user.root_node(&ApiOptions::default()).await?;
    println!("{} ({})", user.name, user.web_uri);

    let mut folders = 0;
    let mut albums = 0;
    let printer = |node: &smugmug_client::v2::Node| {
        match node.node_type {
            NodeType::Folder => folders += 1,
            NodeType::Album => albums += 1,
            _ => {}
        }
        println!("{:<14} {}", node.node_type.as_str(), node.url_path);
        Ok(true)
    };

    let options = ApiOptions::default();
    match depth {
        Some(depth) => walk_to_depth(&client, &root.node_id, depth, &options, printer).await?,
        None => walk(&client, &root.node_id, &options, printer).await?,
    }

    println!("{} folders, {} albums", folders, albums);
    Ok(())
}
