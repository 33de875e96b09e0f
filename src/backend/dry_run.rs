//! Read-only wrapper used by `--dry-run`

use tracing::info;

use super::{BackendError, BootBackend};

/// Delegates reads, logs writes and reports success without running them
#[derive(Debug, Clone)]
pub struct DryRunBackend<B> {
    inner: B,
}

impl<B> DryRunBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: BootBackend + Sync> BootBackend for DryRunBackend<B> {
    async fn get_boot_info(&self) -> Result<Vec<u8>, BackendError> {
        self.inner.get_boot_info().await
    }

    async fn set_boot_order(&self, order: &[String]) -> Result<(), BackendError> {
        info!("[dry-run] would set boot order to: {}", order.join(","));
        Ok(())
    }

    async fn set_boot_next(&self, number: &str) -> Result<(), BackendError> {
        info!("[dry-run] would set BootNext to: {}", number);
        Ok(())
    }
}
