/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files found below a root
pub type PathIter<'a> = Box<dyn Iterator<Item = Result<PathBuf, SmugMugError>> + Send + 'a>;

/// Where upload candidates come from.
///
/// Both calls block and are run off the async runtime by the upload pipeline.
pub trait Filesystem: Send + Sync {
    /// Lists the regular files below `root`, recursively
    fn walk<'a>(&'a self, root: &'a Path) -> PathIter<'a>;

    /// Reads a whole file
    fn read(&self, path: &Path) -> Result<Bytes, SmugMugError>;
}

/// The local disk
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn walk<'a>(&'a self, root: &'a Path) -> PathIter<'a> {
        Box::new(
            WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) if entry.file_type().is_dir() => None,
                    Ok(entry) => Some(Ok(entry.into_path())),
                    Err(err) => Some(Err(SmugMugError::Io(io::Error::from(err)))),
                }),
        )
    }

    fn read(&self, path: &Path) -> Result<Bytes, SmugMugError> {
        Ok(Bytes::from(std::fs::read(path)?))
    }
}

/// Files held in memory, handy for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemoryFilesystem {
    files: BTreeMap<PathBuf, Bytes>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Bytes>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Bytes>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl Filesystem for MemoryFilesystem {
    fn walk<'a>(&'a self, root: &'a Path) -> PathIter<'a> {
        let exists = self.files.keys().any(|path| path.starts_with(root));
        if !exists {
            let err = io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", root.display()),
            );
            return Box::new(std::iter::once(Err(SmugMugError::Io(err))));
        }
        Box::new(
            self.files
                .keys()
                .filter(move |path| path.starts_with(root))
                .map(|path| Ok(path.clone())),
        )
    }

    fn read(&self, path: &Path) -> Result<Bytes, SmugMugError> {
        self.files.get(path).cloned().ok_or_else(|| {
            SmugMugError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn local_walk_lists_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("2024/beach")).unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        fs::write(dir.path().join("2024/beach/b.JPG"), b"b").unwrap();

        let found: Vec<PathBuf> = LocalFilesystem
            .walk(dir.path())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("2024/beach/b.JPG"),
                dir.path().join("a.jpg"),
            ]
        );
        assert_eq!(
            LocalFilesystem.read(&dir.path().join("a.jpg")).unwrap(),
            Bytes::from_static(b"a")
        );
    }

    #[test]
    fn local_walk_of_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let mut iter = LocalFilesystem.walk(&missing);
        assert!(matches!(iter.next(), Some(Err(SmugMugError::Io(_)))));
    }

    #[test]
    fn memory_walk_is_scoped_to_root() {
        let fs = MemoryFilesystem::new()
            .with_file("photos/a.jpg", Bytes::from_static(b"a"))
            .with_file("photos/sub/b.jpg", Bytes::from_static(b"b"))
            .with_file("other/c.jpg", Bytes::from_static(b"c"));
        let found: Vec<PathBuf> = fs
            .walk(Path::new("photos"))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            found,
            vec![PathBuf::from("photos/a.jpg"), PathBuf::from("photos/sub/b.jpg")]
        );
        assert!(fs.walk(Path::new("missing")).next().unwrap().is_err());
        assert!(fs.read(Path::new("photos/zzz.jpg")).is_err());
    }
}
