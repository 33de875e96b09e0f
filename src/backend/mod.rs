//! Privileged boot variable backends
//!
//! The panel never touches NVRAM itself. It asks a [`BootBackend`] for the
//! raw `efibootmgr -v` report and for the two writes it needs.

mod dry_run;
mod efibootmgr;
mod file;

use std::future::Future;

use thiserror::Error;

pub use dry_run::DryRunBackend;
pub use efibootmgr::EfibootmgrBackend;
pub use file::FileBackend;

/// Failure reported by a backend call
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{tool} is not installed or not available")]
    NotInstalled { tool: String },

    /// Tool ran and exited non-zero; `message` is its stderr
    #[error("{message}")]
    CommandFailed { message: String },

    #[error("{tool} did not respond within {secs} seconds")]
    Timeout { tool: String, secs: u64 },

    #[error("{0}")]
    Unsupported(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BackendError {
    /// User facing message, `None` when the backend gave nothing useful
    pub fn user_message(&self) -> Option<String> {
        let message = self.to_string();
        let message = message.trim();
        if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        }
    }
}

/// The three calls the panel makes against the firmware tool
pub trait BootBackend {
    /// Raw multi-line boot report (`efibootmgr -v`), undecoded
    fn get_boot_info(&self) -> impl Future<Output = Result<Vec<u8>, BackendError>> + Send;

    /// Persist a new BootOrder (`efibootmgr -o a,b,c`)
    fn set_boot_order(
        &self,
        order: &[String],
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Set BootNext (`efibootmgr -n id`)
    fn set_boot_next(&self, number: &str)
        -> impl Future<Output = Result<(), BackendError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let err = BackendError::CommandFailed {
            message: "device busy\n".to_string(),
        };
        assert_eq!(err.user_message().as_deref(), Some("device busy"));

        let err = BackendError::CommandFailed {
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message(), None);

        let err = BackendError::NotInstalled {
            tool: "efibootmgr".to_string(),
        };
        assert_eq!(
            err.user_message().as_deref(),
            Some("efibootmgr is not installed or not available")
        );
    }
}
