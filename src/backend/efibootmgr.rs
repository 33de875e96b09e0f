//! Backend that shells out to `efibootmgr`

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, error, info};

use super::{BackendError, BootBackend};
use crate::config::BackendConfig;

/// Runs `efibootmgr`, optionally through `sudo -n`
#[derive(Debug, Clone)]
pub struct EfibootmgrBackend {
    tool: PathBuf,
    use_sudo: bool,
    timeout: Option<Duration>,
}

impl EfibootmgrBackend {
    pub fn new() -> Self {
        Self::with_config(&BackendConfig::default())
    }

    pub fn with_config(config: &BackendConfig) -> Self {
        Self {
            tool: config.efibootmgr.clone(),
            use_sudo: config.use_sudo,
            timeout: config.command_timeout_secs.map(Duration::from_secs),
        }
    }

    fn tool_name(&self) -> String {
        self.tool.display().to_string()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = if self.use_sudo {
            let mut cmd = Command::new("sudo");
            cmd.arg("-n").arg(&self.tool);
            cmd
        } else {
            Command::new(&self.tool)
        };
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    /// Run the tool and return its stdout, mapping failures to [`BackendError`]
    async fn run(&self, args: &[&str]) -> Result<Vec<u8>, BackendError> {
        debug!("Running {} {}", self.tool_name(), args.join(" "));

        let mut cmd = self.command(args);
        let output = cmd.output();
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| BackendError::Timeout {
                    tool: self.tool_name(),
                    secs: limit.as_secs(),
                })?,
            None => output.await,
        };

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!("{} not found", self.tool_name());
                return Err(BackendError::NotInstalled {
                    tool: self.tool_name(),
                });
            }
            Err(e) => {
                error!("Failed to run {}: {}", self.tool_name(), e);
                return Err(e.into());
            }
        };

        check_status(output)
    }
}

impl Default for EfibootmgrBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(output: Output) -> Result<Vec<u8>, BackendError> {
    if output.status.success() {
        return Ok(output.stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let message = if stderr.is_empty() {
        output.status.to_string()
    } else {
        stderr
    };
    error!("Command failed: {}", message);
    Err(BackendError::CommandFailed { message })
}

impl BootBackend for EfibootmgrBackend {
    async fn get_boot_info(&self) -> Result<Vec<u8>, BackendError> {
        self.run(&["-v"]).await
    }

    async fn set_boot_order(&self, order: &[String]) -> Result<(), BackendError> {
        let order_str = order.join(",");
        self.run(&["-o", order_str.as_str()]).await?;
        info!("Boot order set to: {}", order_str);
        Ok(())
    }

    async fn set_boot_next(&self, number: &str) -> Result<(), BackendError> {
        self.run(&["-n", number]).await?;
        info!("BootNext set to: {}", number);
        Ok(())
    }
}
