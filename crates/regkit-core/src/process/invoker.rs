//! Spawning the external tool and collecting its output.

use crate::config;
use crate::error::{RegError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

/// Everything one run of the tool produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInvocation {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
}

/// Runs the external tool with an argument list.
///
/// Implementations must be safe to call concurrently; each call owns its own
/// process and buffers.
#[async_trait]
pub trait ProcessSpawner: Send + Sync {
    async fn spawn(&self, args: &[String]) -> Result<RawInvocation>;
}

/// Spawner backed by a real child process (`reg.exe` by default).
#[derive(Debug, Clone)]
pub struct RegSpawner {
    program: String,
}

impl RegSpawner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for RegSpawner {
    fn default() -> Self {
        Self::new(config::program())
    }
}

#[async_trait]
impl ProcessSpawner for RegSpawner {
    async fn spawn(&self, args: &[String]) -> Result<RawInvocation> {
        debug!(program = %self.program, ?args, "spawning");

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        command.creation_flags(windows_sys::Win32::System::Threading::CREATE_NO_WINDOW);

        let mut child = command
            .spawn()
            .map_err(|e| RegError::spawn(e, &self.program))?;

        let mut stdout = child.stdout.take().ok_or_else(|| RegError::Io {
            message: "stdout was not captured".to_string(),
            source: None,
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| RegError::Io {
            message: "stderr was not captured".to_string(),
            source: None,
        })?;

        // Drain both pipes to EOF before reaping. Waiting on exit alone can
        // resolve ahead of the final flush.
        let mut out = Vec::new();
        let mut err = Vec::new();
        let (out_read, err_read) =
            tokio::join!(stdout.read_to_end(&mut out), stderr.read_to_end(&mut err));
        out_read?;
        err_read?;

        let status = child.wait().await?;

        debug!(
            program = %self.program,
            code = ?status.code(),
            stdout_bytes = out.len(),
            stderr_bytes = err.len(),
            "process finished"
        );

        Ok(RawInvocation {
            stdout: String::from_utf8_lossy(&out).into_owned(),
            stderr: String::from_utf8_lossy(&err).into_owned(),
            code: status.code(),
        })
    }
}
