/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use crate::v2::{Album, ApiOptions, Client, Image};
use log::debug;
use std::collections::HashMap;

/// An image already stored in the target album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCatalogEntry {
    pub name: String,
    /// Hex md5 of the stored original, when the service reports one
    pub md5: Option<String>,
    /// Uri that identifies the image when replacing it, when the listing names one
    pub uri: Option<String>,
}

impl From<&Image> for RemoteCatalogEntry {
    fn from(image: &Image) -> Self {
        Self {
            name: image.file_name.clone(),
            md5: image.archived_md5.clone(),
            uri: image.image_uri().map(str::to_string),
        }
    }
}

/// Images of an album keyed by file name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, RemoteCatalogEntry>,
}

impl Catalog {
    /// Lists every image of the album
    pub async fn from_album(client: &Client, album_key: &str) -> Result<Self, SmugMugError> {
        let options = ApiOptions::default();
        let mut entries = HashMap::new();
        Album::images_iter(client, album_key, &options, |image| {
            let entry = RemoteCatalogEntry::from(&image);
            entries.insert(entry.name.clone(), entry);
            Ok(true)
        })
        .await?;
        debug!("album {} holds {} images", album_key, entries.len());
        Ok(Self { entries })
    }

    /// Later entries with the same name replace earlier ones
    pub fn from_entries(entries: impl IntoIterator<Item = RemoteCatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.name.clone(), entry))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RemoteCatalogEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_takes_replace_target_from_uris() {
        let image: Image = serde_json::from_str(
            r#"{"Uri": "/api/v2/album/k1/image/i1-0", "FileName": "a.jpg", "ArchivedMD5": "abc",
                "Uris": {"Image": "/api/v2/image/i1-0"}}"#,
        )
        .unwrap();
        let entry = RemoteCatalogEntry::from(&image);
        assert_eq!(entry.uri.as_deref(), Some("/api/v2/image/i1-0"));
        assert_eq!(entry.md5.as_deref(), Some("abc"));

        let image: Image = serde_json::from_str(
            r#"{"Uri": "/api/v2/album/k1/image/i2-0", "FileName": "b.jpg"}"#,
        )
        .unwrap();
        let entry = RemoteCatalogEntry::from(&image);
        assert!(entry.uri.is_none());
        assert!(entry.md5.is_none());
    }

    #[test]
    fn keyed_by_name() {
        let catalog = Catalog::from_entries([
            RemoteCatalogEntry {
                name: "a.jpg".into(),
                md5: Some("1".into()),
                uri: Some("/api/v2/image/1".into()),
            },
            RemoteCatalogEntry {
                name: "a.jpg".into(),
                md5: Some("2".into()),
                uri: Some("/api/v2/image/2".into()),
            },
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a.jpg").unwrap().uri.as_deref(), Some("/api/v2/image/2"));
        assert!(catalog.get("b.jpg").is_none());
    }
}
