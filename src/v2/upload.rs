/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use crate::v2::{Album, Client};
use bytes::Bytes;
use log::debug;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// A file ready to be sent to an album
#[derive(Clone)]
pub struct Uploadable {
    /// File name the image is stored under
    pub name: String,
    pub size: u64,
    /// Lowercase hex md5 of `payload`
    pub md5: String,
    pub album_key: String,
    /// Uri of an existing image this upload replaces
    pub replaces: Option<String>,
    pub payload: Bytes,
}

impl Uploadable {
    /// Builds an upload for `payload`, computing its size and content hash
    pub fn new(name: &str, album_key: &str, payload: Bytes) -> Self {
        Self {
            name: name.to_string(),
            size: payload.len() as u64,
            md5: format!("{:x}", md5::compute(&payload)),
            album_key: album_key.to_string(),
            replaces: None,
            payload,
        }
    }

    pub fn with_replaces(mut self, image_uri: &str) -> Self {
        self.replaces = Some(image_uri.to_string());
        self
    }
}

// The payload can be large so it is left out
impl std::fmt::Debug for Uploadable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uploadable")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("md5", &self.md5)
            .field("album_key", &self.album_key)
            .field("replaces", &self.replaces)
            .finish()
    }
}

/// What the upload service reported for a completed upload
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub status: String,
    pub method: String,
    pub elapsed: Duration,
    pub image_uri: String,
    pub album_image_uri: String,
    pub url: Option<String>,
    pub uploadable: Uploadable,
}

impl Client {
    /// Sends a single file to its album.
    ///
    /// Fails with [`SmugMugError::MissingAlbumKey`] before any request when the
    /// upload has no album. A response with a `fail` status becomes
    /// [`SmugMugError::ApiResponse`].
    pub async fn upload(&self, uploadable: Uploadable) -> Result<UploadResult, SmugMugError> {
        if uploadable.album_key.is_empty() {
            return Err(SmugMugError::MissingAlbumKey());
        }
        let url = self.api().upload_endpoint(&uploadable.name)?;

        let mut headers = vec![
            ("Content-MD5", uploadable.md5.clone()),
            ("Content-Length", uploadable.size.to_string()),
            ("X-Smug-AlbumUri", Album::uri_for(&uploadable.album_key)),
            ("X-Smug-ResponseType", "JSON".to_string()),
            ("X-Smug-Version", "v2".to_string()),
        ];
        if let Some(image_uri) = &uploadable.replaces {
            headers.push(("X-Smug-ImageUri", image_uri.clone()));
        }

        let started = Instant::now();
        let resp: UploadResponse = self
            .api()
            .put(url, &headers, uploadable.payload.clone())
            .await?;
        let elapsed = started.elapsed();
        debug!("{} answered {} in {:?}", uploadable.name, resp.status, elapsed);

        if resp.status != "ok" {
            return Err(SmugMugError::ApiResponse(
                resp.code.unwrap_or_default(),
                resp.message.unwrap_or(resp.status),
            ));
        }
        let image = resp.image.ok_or(SmugMugError::ResponseMissing())?;
        Ok(UploadResult {
            status: resp.status,
            method: resp.method,
            elapsed,
            image_uri: image.image_uri,
            album_image_uri: image.album_image_uri,
            url: image.url,
            uploadable,
        })
    }
}

// Body returned by the upload service
#[derive(Deserialize, Debug)]
struct UploadResponse {
    #[serde(rename = "stat")]
    status: String,

    #[serde(default)]
    method: String,

    #[serde(default)]
    code: Option<u32>,

    #[serde(default)]
    message: Option<String>,

    #[serde(rename = "Image")]
    image: Option<UploadedImage>,
}

#[derive(Deserialize, Debug)]
struct UploadedImage {
    #[serde(rename = "ImageUri")]
    image_uri: String,

    #[serde(default, rename = "AlbumImageUri")]
    album_image_uri: String,

    #[serde(default, rename = "URL")]
    url: Option<String>,
}
