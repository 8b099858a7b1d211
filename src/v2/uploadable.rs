/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use crate::v2::filesystem::Filesystem;
use crate::v2::{Catalog, UploadConfig, Uploadable};
use log::{info, warn};
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Decides which discovered files become uploads
#[derive(Debug, Clone)]
pub struct UploadFilter {
    album_key: String,
    extensions: Vec<String>,
    skip_matching: bool,
    replace_existing: bool,
    catalog: Arc<Catalog>,
}

impl UploadFilter {
    pub fn new(config: &UploadConfig, catalog: Arc<Catalog>) -> Self {
        Self {
            album_key: config.album_key.clone(),
            extensions: config.extensions.clone(),
            skip_matching: config.skip_matching,
            replace_existing: config.replace_existing,
            catalog,
        }
    }

    /// Extension match, ignoring case
    pub fn is_supported(&self, path: &Path) -> bool {
        let name = path.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Reads and hashes the file at `path`, returning `None` for files that should not be sent.
    ///
    /// A file is dropped when its extension is not wanted, or when the album
    /// already holds a file of the same name and hash and matching files are
    /// skipped. A same-named file with different content is marked to replace
    /// the stored image when replacing is enabled.
    pub fn uploadable(
        &self,
        fs: &dyn Filesystem,
        path: &Path,
    ) -> Result<Option<Uploadable>, SmugMugError> {
        if !self.is_supported(path) {
            info!("skipping {}: unsupported extension", path.display());
            return Ok(None);
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} has no file name", path.display()),
                )
            })?;

        let uploadable = Uploadable::new(&name, &self.album_key, fs.read(path)?);
        let Some(existing) = self.catalog.get(&name) else {
            return Ok(Some(uploadable));
        };

        let same_content = existing
            .md5
            .as_deref()
            .is_some_and(|md5| md5.eq_ignore_ascii_case(&uploadable.md5));
        if self.skip_matching && same_content {
            info!("skipping {}: already in album {}", path.display(), self.album_key);
            return Ok(None);
        }
        match (&existing.uri, self.replace_existing) {
            (Some(uri), true) => {
                info!("{} replaces {}", path.display(), uri);
                Ok(Some(uploadable.with_replaces(uri)))
            }
            (None, true) => {
                warn!("{} matches a stored image with no image uri, sending as new", path.display());
                Ok(Some(uploadable))
            }
            (_, false) => Ok(Some(uploadable)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v2::{MemoryFilesystem, RemoteCatalogEntry};
    use bytes::Bytes;

    const HELLO_MD5: &str = "5d41402abc4b2a76b9719d911017c592";

    fn filter(config: UploadConfig) -> UploadFilter {
        let catalog = Catalog::from_entries([
            RemoteCatalogEntry {
                name: "same.jpg".into(),
                md5: Some(HELLO_MD5.to_uppercase()),
                uri: Some("/api/v2/image/same-0".into()),
            },
            RemoteCatalogEntry {
                name: "changed.jpg".into(),
                md5: Some("0".repeat(32)),
                uri: Some("/api/v2/image/changed-0".into()),
            },
        ]);
        UploadFilter::new(&config, Arc::new(catalog))
    }

    fn files() -> MemoryFilesystem {
        MemoryFilesystem::new()
            .with_file("p/same.jpg", Bytes::from_static(b"hello"))
            .with_file("p/changed.jpg", Bytes::from_static(b"hello"))
            .with_file("p/new.JPEG", Bytes::from_static(b"hello"))
            .with_file("p/notes.txt", Bytes::from_static(b"hello"))
    }

    #[test]
    fn extension_check_ignores_case() {
        let f = filter(UploadConfig::new("k1"));
        assert!(f.is_supported(Path::new("a/B.JPG")));
        assert!(f.is_supported(Path::new("a/b.jpeg")));
        assert!(!f.is_supported(Path::new("a/b.png")));
    }

    #[test]
    fn drops_unsupported_and_matching_files() {
        let f = filter(UploadConfig::new("k1"));
        let fs = files();
        assert!(f.uploadable(&fs, Path::new("p/notes.txt")).unwrap().is_none());
        assert!(f.uploadable(&fs, Path::new("p/same.jpg")).unwrap().is_none());

        let new = f.uploadable(&fs, Path::new("p/new.JPEG")).unwrap().unwrap();
        assert_eq!(new.name, "new.JPEG");
        assert_eq!(new.album_key, "k1");
        assert_eq!(new.md5, HELLO_MD5);
        assert!(new.replaces.is_none());
    }

    #[test]
    fn changed_files_replace_existing() {
        let f = filter(UploadConfig::new("k1"));
        let up = f
            .uploadable(&files(), Path::new("p/changed.jpg"))
            .unwrap()
            .unwrap();
        assert_eq!(up.replaces.as_deref(), Some("/api/v2/image/changed-0"));

        let f = filter(UploadConfig::new("k1").with_replace_existing(false));
        let up = f
            .uploadable(&files(), Path::new("p/changed.jpg"))
            .unwrap()
            .unwrap();
        assert!(up.replaces.is_none());
    }

    #[test]
    fn matching_files_sent_when_not_skipping() {
        let f = filter(UploadConfig::new("k1").with_skip_matching(false));
        let up = f
            .uploadable(&files(), Path::new("p/same.jpg"))
            .unwrap()
            .unwrap();
        assert_eq!(up.replaces.as_deref(), Some("/api/v2/image/same-0"));
    }

    #[test]
    fn no_replacement_without_an_image_uri() {
        let catalog = Catalog::from_entries([RemoteCatalogEntry {
            name: "changed.jpg".into(),
            md5: Some("0".repeat(32)),
            uri: None,
        }]);
        let f = UploadFilter::new(&UploadConfig::new("k1"), Arc::new(catalog));
        let up = f
            .uploadable(&files(), Path::new("p/changed.jpg"))
            .unwrap()
            .unwrap();
        assert!(up.replaces.is_none());
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let f = filter(UploadConfig::new("k1"));
        assert!(f.uploadable(&files(), Path::new("p/gone.jpg")).is_err());
    }
}
