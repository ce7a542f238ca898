//! Running one `reg.exe` call and classifying the result.

use super::invoker::{ProcessSpawner, RawInvocation, RegSpawner};
use crate::config::RegConfig;
use crate::error::{Result, ToolError};
use std::sync::{Arc, LazyLock};
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

/// Executes tool calls and turns their stderr into absence or errors.
///
/// The "not found" line is locale dependent, so it is learned once per
/// executor by querying a key that never exists. Concurrent callers share
/// that single detection.
pub struct CommandExecutor {
    spawner: Arc<dyn ProcessSpawner>,
    not_found: OnceCell<String>,
}

static GLOBAL_EXECUTOR: LazyLock<CommandExecutor> = LazyLock::new(CommandExecutor::new);

impl CommandExecutor {
    /// Executor around the default [`RegSpawner`].
    pub fn new() -> Self {
        Self::with_spawner(Arc::new(RegSpawner::default()))
    }

    pub fn with_spawner(spawner: Arc<dyn ProcessSpawner>) -> Self {
        Self {
            spawner,
            not_found: OnceCell::new(),
        }
    }

    /// The process-wide executor used by [`execute`] and
    /// [`detect_error_messages`].
    pub fn global() -> &'static CommandExecutor {
        &GLOBAL_EXECUTOR
    }

    /// The marker currently used for classification.
    ///
    /// Before detection has finished this is the English default.
    pub fn not_found_marker(&self) -> &str {
        self.not_found
            .get()
            .map(String::as_str)
            .unwrap_or(RegConfig::DEFAULT_NOT_FOUND_MESSAGE)
    }

    pub fn is_detected(&self) -> bool {
        self.not_found.initialized()
    }

    /// Learn the localized "not found" line, at most once.
    ///
    /// Later and concurrent calls await the same result. Call this ahead of
    /// time to keep its latency out of the first failing lookup.
    pub async fn detect_error_messages(&self) -> &str {
        self.not_found
            .get_or_init(|| self.run_detection())
            .await
            .as_str()
    }

    async fn run_detection(&self) -> String {
        let args: Vec<String> = RegConfig::DETECTION_ARGS
            .iter()
            .map(|s| s.to_string())
            .collect();
        debug!(?args, "detecting not-found message");

        // Goes straight to the spawner; classifying here would recurse.
        match self.spawner.spawn(&args).await {
            Ok(raw) => {
                let line = first_line(&raw.stderr);
                if line.is_empty() {
                    warn!("detection query wrote nothing to stderr, keeping default marker");
                    RegConfig::DEFAULT_NOT_FOUND_MESSAGE.to_string()
                } else {
                    debug!(marker = line, "detected not-found message");
                    line.to_string()
                }
            }
            Err(err) => {
                warn!(error = %err, "detection query failed, keeping default marker");
                RegConfig::DEFAULT_NOT_FOUND_MESSAGE.to_string()
            }
        }
    }

    /// Run the tool with `args`.
    ///
    /// Returns the captured stdout when stderr is empty (exit code is
    /// ignored), `None` when stderr reports a missing key or value, and a
    /// [`ToolError`] for any other stderr output.
    ///
    /// # Errors
    ///
    /// Returns `RegError::Tool` for tool-reported failures and
    /// `RegError::Spawn` when the process cannot be started.
    #[instrument(skip(self))]
    pub async fn execute(&self, args: &[String]) -> Result<Option<String>> {
        let raw = self.spawner.spawn(args).await?;
        self.classify(raw, args).await
    }

    async fn classify(&self, raw: RawInvocation, args: &[String]) -> Result<Option<String>> {
        if raw.stderr.is_empty() {
            return Ok(Some(raw.stdout));
        }

        let line = first_line(&raw.stderr);
        let marker = self.detect_error_messages().await;
        if line == marker {
            debug!("key or value not found");
            return Ok(None);
        }

        let diagnostic: String = line.chars().skip(RegConfig::ERROR_PREFIX_LEN).collect();
        debug!(diagnostic = %diagnostic, code = ?raw.code, "tool reported failure");
        Err(ToolError::new(&diagnostic, args).into())
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// First CRLF-delimited line of trimmed stderr.
fn first_line(stderr: &str) -> &str {
    stderr
        .trim()
        .split(RegConfig::LINE_BREAK)
        .next()
        .unwrap_or_default()
}

/// Run `args` through the process-wide executor.
pub async fn execute(args: &[String]) -> Result<Option<String>> {
    CommandExecutor::global().execute(args).await
}

/// Run detection on the process-wide executor.
pub async fn detect_error_messages() -> &'static str {
    CommandExecutor::global().detect_error_messages().await
}
