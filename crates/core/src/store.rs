use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{debug, info, instrument};

use crate::data_uri::decode_data_uri;
use crate::error::StoreError;
use crate::types::UploadedFile;

/// A directory-backed collection of uploaded files.
///
/// Files are keyed by their original name. Saving a name that already exists
/// overwrites it. The directory is shared by everyone holding a store for the
/// same path; there is no locking or per-session namespacing.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The upload directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Decode a data URI and write it as `name`.
    #[instrument(skip(self, data_uri), fields(dir = %self.root.display()))]
    pub async fn save(&self, name: &str, data_uri: &str) -> Result<UploadedFile, StoreError> {
        validate_name(name)?;
        let data = decode_data_uri(data_uri)?;
        self.save_bytes(name, data).await
    }

    /// Write already-decoded bytes as `name`, replacing any existing file.
    pub async fn save_bytes(
        &self,
        name: &str,
        data: impl Into<Bytes>,
    ) -> Result<UploadedFile, StoreError> {
        let path = self.path_for(name)?;
        let data = data.into();

        self.ensure_dir().await?;
        tokio::fs::write(&path, &data).await?;

        info!(file = %name, size = data.len(), "upload saved");
        Ok(UploadedFile {
            name: name.to_owned(),
            data,
        })
    }

    /// List the names of the regular files in the upload directory.
    ///
    /// Order follows the directory listing and is not guaranteed to be stable
    /// across platforms. A missing directory lists as empty.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            // Names that are not valid UTF-8 cannot have come from an upload.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }

        debug!(count = names.len(), "listed uploads");
        Ok(names)
    }

    /// Read the content of a stored file.
    pub async fn read(&self, name: &str) -> Result<Bytes, StoreError> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(name.to_owned())),
            Err(e) => Err(e.into()),
        }
    }

    /// Re-read every currently listed file from disk.
    pub async fn load_all(&self) -> Result<Vec<UploadedFile>, StoreError> {
        let mut files = Vec::new();
        for name in self.list().await? {
            let data = self.read(&name).await?;
            files.push(UploadedFile { name, data });
        }
        Ok(files)
    }

    /// Delete a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(file = %name, "upload removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every file currently in the store. Returns the number removed.
    pub async fn clear(&self) -> Result<usize, StoreError> {
        let names = self.list().await?;
        for name in &names {
            self.remove(name).await?;
        }
        Ok(names.len())
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

/// Reject names that would escape the upload directory or cannot be a
/// single file in it.
fn validate_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StoreError::InvalidName(name.to_owned()));
    }
    Ok(())
}
