use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Filesystem storage rooted at the base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        tokio::fs::read(&full_path).await.map_err(|source| {
            let path = full_path.display().to_string();
            if source.kind() == ErrorKind::NotFound {
                EtlError::InputNotFound { path }
            } else {
                EtlError::ReadError { path, source }
            }
        })
    }

    // Parent directories are not created; the input already lives there.
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);
        tokio::fs::write(&full_path, data)
            .await
            .map_err(|source| EtlError::WriteError {
                path: full_path.display().to_string(),
                source,
            })
    }

    fn display_path(&self, path: &str) -> String {
        self.base_path.join(path).display().to_string()
    }
}
