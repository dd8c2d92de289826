//! Blob store backed by a directory on disk.
//!
//! All access goes through a `cap-std` [`Dir`] capability so keys can never
//! escape the asset store root. File I/O is blocking and runs on Tokio's
//! blocking pool with the caller's span re-entered.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use cap_std::{ambient_authority, fs::Dir};
use tracing::{Span, debug};

use crate::domain::StorageKey;
use crate::domain::ports::{BlobStore, BlobStoreError};

use super::{issue_key, split_key};

/// Filesystem blob store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct FilesystemBlobStore {
    root: Arc<Dir>,
    root_path: PathBuf,
}

impl FilesystemBlobStore {
    /// Open (creating when needed) the asset store at `path`.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the directory cannot be created
    /// or opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let root = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self {
            root: Arc::new(root),
            root_path: path.to_path_buf(),
        })
    }

    /// Directory the store writes into.
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, BlobStoreError>
    where
        F: FnOnce(&Dir) -> Result<T, BlobStoreError> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        let span = Span::current();
        tokio::task::spawn_blocking(move || span.in_scope(|| op(&root)))
            .await
            .map_err(|err| BlobStoreError::io(format!("blob task failed: {err}")))?
    }
}

fn relative_path(key: &StorageKey) -> Result<(PathBuf, PathBuf), BlobStoreError> {
    let (first, second, id) =
        split_key(key).ok_or_else(|| BlobStoreError::invalid_key(key.as_str()))?;
    let parent = Path::new(first).join(second);
    let file = parent.join(id);
    Ok((parent, file))
}

fn io_error(key: &StorageKey, err: &io::Error) -> BlobStoreError {
    if err.kind() == io::ErrorKind::NotFound {
        BlobStoreError::not_found(key.as_str())
    } else {
        BlobStoreError::io(format!("{key}: {err}"))
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(&self, content: Bytes) -> Result<StorageKey, BlobStoreError> {
        let key = issue_key();
        let (parent, file) = relative_path(&key)?;
        let staged = parent.join(format!(".tmp-{}", key.as_str().replace('/', "")));
        let written = key.clone();
        self.blocking(move |root| {
            root.create_dir_all(&parent)
                .map_err(|err| io_error(&written, &err))?;
            root.write(&staged, &content)
                .map_err(|err| io_error(&written, &err))?;
            root.rename(&staged, root, &file).map_err(|err| {
                if let Err(cleanup) = root.remove_file(&staged) {
                    debug!(storage_key = %written, error = %cleanup, "staged blob left behind");
                }
                io_error(&written, &err)
            })
        })
        .await?;
        debug!(storage_key = %key, "blob written");
        Ok(key)
    }

    async fn get(&self, key: &StorageKey) -> Result<Bytes, BlobStoreError> {
        let (_, file) = relative_path(key)?;
        let owned = key.clone();
        self.blocking(move |root| {
            root.read(&file)
                .map(Bytes::from)
                .map_err(|err| io_error(&owned, &err))
        })
        .await
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), BlobStoreError> {
        let (_, file) = relative_path(key)?;
        let owned = key.clone();
        self.blocking(move |root| match root.remove_file(&file) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&owned, &err)),
        })
        .await
    }
}
