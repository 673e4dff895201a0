//! Local-file saver.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cancel::CancellationToken;
use crate::error::{SaveError, SaveResult};
use crate::saver::Saver;

/// Writes each snapshot as pretty JSON to `<dir>/<name>.json`.
///
/// The file is written to a hidden temporary sibling first and renamed
/// into place, so readers never see a partial document.
#[derive(Debug, Clone)]
pub struct FilePageSaver {
    dir: PathBuf,
    name: String,
}

impl FilePageSaver {
    /// Saver for page `name` inside `dir`. The directory is created on
    /// first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Final path of the saved document.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.name))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", self.name))
    }

    /// Read the last saved document, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, SaveError> {
        match tokio::fs::read(self.path()).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

async fn discard(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        tracing::debug!(path = %path.display(), error = %err, "Failed to remove temp file");
    }
}

#[async_trait]
impl<T> Saver<T> for FilePageSaver
where
    T: Serialize + Send + Sync + 'static,
{
    async fn save(&self, snapshot: T, cancel: CancellationToken) -> SaveResult {
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await?;
        if cancel.is_cancelled() {
            discard(&temp).await;
            return Err(SaveError::Cancelled);
        }

        let path = self.path();
        tokio::fs::rename(&temp, &path).await?;
        tracing::debug!(path = %path.display(), "Page written");
        Ok(())
    }
}
