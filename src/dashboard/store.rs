//! Fragment stores
//!
//! Fragments are opaque pre-rendered HTML produced by the data pipeline.
//! The location key comes straight from the query string, so a fragment name
//! is untrusted input and must never be able to leave the store root.

use async_trait::async_trait;
use hyper::body::Bytes;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::error::FragmentError;

/// Read-only name to content lookup
#[async_trait]
pub trait FragmentStore: Send + Sync {
    async fn load(&self, name: &str) -> Result<Bytes, FragmentError>;
}

/// Fragments stored as files directly under one directory
#[derive(Debug, Clone)]
pub struct FsFragmentStore {
    root: PathBuf,
}

impl FsFragmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FragmentStore for FsFragmentStore {
    async fn load(&self, name: &str) -> Result<Bytes, FragmentError> {
        check_name(name).map_err(|reason| FragmentError::InvalidName {
            name: name.to_string(),
            reason,
        })?;

        let io_error = |source: io::Error| {
            if source.kind() == io::ErrorKind::NotFound {
                FragmentError::NotFound {
                    name: name.to_string(),
                }
            } else {
                FragmentError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        };

        let root = tokio::fs::canonicalize(&self.root).await.map_err(io_error)?;
        let path = tokio::fs::canonicalize(root.join(name))
            .await
            .map_err(io_error)?;

        // A symlink inside the root may still point elsewhere
        if !path.starts_with(&root) {
            return Err(FragmentError::InvalidName {
                name: name.to_string(),
                reason: "resolves outside the fragment directory",
            });
        }

        let content = tokio::fs::read(&path).await.map_err(io_error)?;
        Ok(Bytes::from(content))
    }
}

/// A fragment name must be one plain file name inside the store root
fn check_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty name");
    }
    if name.contains(['/', '\\']) {
        return Err("contains a path separator");
    }
    if name.contains('\0') {
        return Err("contains a NUL byte");
    }
    if name.starts_with('.') {
        return Err("starts with a dot");
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err("not a single file name"),
    }
}

/// In-memory store for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryFragmentStore {
    fragments: std::collections::HashMap<String, Bytes>,
}

#[cfg(test)]
impl MemoryFragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fragment(mut self, name: &str, content: &str) -> Self {
        self.fragments
            .insert(name.to_string(), Bytes::from(content.to_string()));
        self
    }
}

#[cfg(test)]
#[async_trait]
impl FragmentStore for MemoryFragmentStore {
    async fn load(&self, name: &str) -> Result<Bytes, FragmentError> {
        self.fragments
            .get(name)
            .cloned()
            .ok_or_else(|| FragmentError::NotFound {
                name: name.to_string(),
            })
    }
}
