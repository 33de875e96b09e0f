//! Backend over a captured `efibootmgr -v` dump

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{BackendError, BootBackend};

/// Serves a saved boot report from disk; writes are refused
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_only(&self) -> BackendError {
        BackendError::Unsupported(format!(
            "{} is a saved boot report and cannot be modified",
            self.path.display()
        ))
    }
}

impl BootBackend for FileBackend {
    async fn get_boot_info(&self) -> Result<Vec<u8>, BackendError> {
        debug!("Reading boot report from {}", self.path.display());
        Ok(tokio::fs::read(&self.path).await?)
    }

    async fn set_boot_order(&self, _order: &[String]) -> Result<(), BackendError> {
        Err(self.read_only())
    }

    async fn set_boot_next(&self, _number: &str) -> Result<(), BackendError> {
        Err(self.read_only())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_dump_and_refuses_writes() {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("boot.txt");
        std::fs::write(&dump, "BootOrder: 0001\n").unwrap();

        let backend = FileBackend::new(&dump);
        assert_eq!(backend.get_boot_info().await.unwrap(), b"BootOrder: 0001\n".to_vec());

        let err = backend.set_boot_next("0001").await.unwrap_err();
        assert!(matches!(err, BackendError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_missing_dump_is_io_error() {
        let backend = FileBackend::new("/nonexistent/boot.txt");
        let err = backend.get_boot_info().await.unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }
}
