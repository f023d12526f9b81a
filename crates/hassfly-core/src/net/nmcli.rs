//! NetworkManager probe via the `nmcli` command-line tool.
//!
//! Each probe call spawns one short-lived process and parses its
//! tabular stdout. A non-zero exit or a spawn failure becomes
//! `CoreError::Command`; it is never a panic.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{ConnectionRecord, CurrentConnection, WifiNetwork};
use crate::net::backend::NetworkBackend;
use crate::net::parse;

/// Probe backed by the `nmcli` binary.
pub struct NmcliBackend {
    program: String,
}

impl NmcliBackend {
    pub fn new() -> Self {
        Self {
            program: "nmcli".into(),
        }
    }

    /// Use a different executable. Test seam.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String, CoreError> {
        let cmd = format!("{} {}", self.program, args.join(" "));
        debug!(%cmd, "probing network manager");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| CoreError::Command {
                cmd: cmd.clone(),
                code: None,
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(CoreError::Command {
                cmd,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for NmcliBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkBackend for NmcliBackend {
    async fn current_connection(&self) -> Result<Option<CurrentConnection>, CoreError> {
        let output = self.run(&["connection", "show", "--active"]).await?;
        Ok(parse::parse_connections(&output)
            .into_iter()
            .next()
            .map(CurrentConnection::from))
    }

    async fn saved_connections(&self) -> Result<Vec<ConnectionRecord>, CoreError> {
        let output = self.run(&["connection", "show"]).await?;
        Ok(parse::parse_connections(&output))
    }

    async fn scan_wifi(&self) -> Result<Vec<WifiNetwork>, CoreError> {
        let output = self
            .run(&["device", "wifi", "list", "--rescan", "yes"])
            .await?;
        Ok(parse::parse_wifi_list(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawn_failure_is_a_command_error() {
        let backend = NmcliBackend::with_program("/nonexistent/hassfly-test-nmcli");
        let err = backend
            .current_connection()
            .await
            .expect_err("missing binary");
        match err {
            CoreError::Command { code, .. } => assert_eq!(code, None),
            other => panic!("expected Command error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn nonzero_exit_is_a_command_error_with_code() {
        let backend = NmcliBackend::with_program("false");
        let err = backend.saved_connections().await.expect_err("exit 1");
        match err {
            CoreError::Command { code, .. } => assert_eq!(code, Some(1)),
            other => panic!("expected Command error, got {other:?}"),
        }
    }
}
