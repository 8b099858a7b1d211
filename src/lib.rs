/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # SmugMug Client
//!
//! Client core for the SmugMug APIv2 interface.
//!
//! For further details on the Rest API refer to the [SmugMug API Docs](https://api.smugmug.com/api/v2/doc/index.html)
//!
//! ## Features
//!
//! - Paging through any collection (node children and parents, album images, user albums)
//! - Side-loaded relations (`_expand`) resolved onto the returned entities
//! - Depth-first walk of a user's folder/album hierarchy, optionally depth limited
//! - Single file upload, and a concurrent pipeline that uploads a directory
//!   tree into an album while skipping files the album already holds
//!
//! *The SmugMug API uses OAuth1. This library handles the request signing.
//! Getting the Access Token/Secret is left up to the consumer of this library*
//!
//! ## Usage
//!
//! **You will need to acquire an API key/secret from SmugMug prior to using the API**
//!
//! ```rust,no_run
//! use smugmug_client::v2::{walk, ApiOptions, Client, Creds, NodeType, User};
//!
//! async fn list_albums(api_key: &str) -> Result<(), smugmug_client::v2::SmugMugError> {
//!     let client = Client::new(Creds::from_tokens(api_key, None, None, None));
//!     let user = User::from_id(client.clone(), "apidemo", &ApiOptions::default()).await?;
//!     let root = user.root_node(&ApiOptions::default()).await?;
//!
//!     // Every album below the root, parents first
//!     walk(&client, &root.node_id, &ApiOptions::default(), |node| {
//!         if node.node_type == NodeType::Album {
//!             println!("{}", node.url_path);
//!         }
//!         Ok(true)
//!     })
//!     .await
//! }
//! ```
//!
//! Uploading a directory tree:
//!
//! ```rust,no_run
//! use smugmug_client::v2::{Client, UploadConfig};
//!
//! async fn upload(client: Client) {
//!     let config = UploadConfig::new("SJT3DX").with_concurrency(4);
//!     let mut uploads = client.uploads_from_disk(config, vec!["photos".into()]).await;
//!     while let Some(result) = uploads.next().await {
//!         println!("{} -> {}", result.uploadable.name, result.image_uri);
//!     }
//!     if let Some(err) = uploads.error().await {
//!         eprintln!("upload stopped: {}", err);
//!     }
//! }
//! ```
//!
pub mod v2;
