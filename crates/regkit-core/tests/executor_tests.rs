//! Integration tests for CommandExecutor classification and detection.
//!
//! These drive the executor through a scripted spawner, so no `reg.exe`
//! is needed.

use async_trait::async_trait;
use regkit_core::config::RegConfig;
use regkit_core::{
    CommandExecutor, ProcessSpawner, RawInvocation, RegError, RegSpawner, Result,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const LOCALIZED_MARKER: &str = "ERREUR : le système n'a pas trouvé la clé ou la valeur spécifiée.";

/// Answers by key path (second argument) and counts detection queries.
struct ScriptedSpawner {
    responses: HashMap<String, RawInvocation>,
    detection_stderr: String,
    detection_delay: Duration,
    detection_calls: AtomicUsize,
    calls: AtomicUsize,
}

impl ScriptedSpawner {
    fn new(detection_stderr: &str) -> Self {
        Self {
            responses: HashMap::new(),
            detection_stderr: detection_stderr.to_string(),
            detection_delay: Duration::ZERO,
            detection_calls: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    fn respond(mut self, path: &str, stdout: &str, stderr: &str, code: i32) -> Self {
        self.responses.insert(
            path.to_string(),
            RawInvocation {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
                code: Some(code),
            },
        );
        self
    }

    fn with_detection_delay(mut self, delay: Duration) -> Self {
        self.detection_delay = delay;
        self
    }

    fn detection_calls(&self) -> usize {
        self.detection_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProcessSpawner for ScriptedSpawner {
    async fn spawn(&self, args: &[String]) -> Result<RawInvocation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let detection: Vec<String> = RegConfig::DETECTION_ARGS
            .iter()
            .map(|s| s.to_string())
            .collect();
        if args == detection.as_slice() {
            self.detection_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.detection_delay).await;
            return Ok(RawInvocation {
                stdout: String::new(),
                stderr: format!("{}\r\n", self.detection_stderr),
                code: Some(1),
            });
        }
        let path = args.get(1).cloned().unwrap_or_default();
        Ok(self.responses.get(&path).cloned().unwrap_or_default())
    }
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_success_path_returns_stdout_verbatim() {
    let stdout = "\r\nHKEY_CURRENT_USER\\Software\\Foo\r\n    Bar    REG_SZ    baz\r\n\r\n";
    let spawner = Arc::new(ScriptedSpawner::new(LOCALIZED_MARKER).respond(
        "HKCU\\Software\\Foo",
        stdout,
        "",
        1,
    ));
    let executor = CommandExecutor::with_spawner(spawner.clone());

    let out = executor
        .execute(&args(&["QUERY", "HKCU\\Software\\Foo"]))
        .await
        .unwrap();

    assert_eq!(out.as_deref(), Some(stdout));
    assert_eq!(spawner.detection_calls(), 0);
}

#[tokio::test]
async fn test_not_found_resolves_to_none() {
    let spawner = Arc::new(ScriptedSpawner::new(LOCALIZED_MARKER).respond(
        "HKCU\\Missing",
        "",
        &format!("{LOCALIZED_MARKER}\r\n"),
        1,
    ));
    let executor = CommandExecutor::with_spawner(spawner.clone());

    let out = executor
        .execute(&args(&["QUERY", "HKCU\\Missing"]))
        .await
        .unwrap();

    assert!(out.is_none());
    assert_eq!(executor.not_found_marker(), LOCALIZED_MARKER);
}

#[tokio::test]
async fn test_tool_failure_message() {
    let spawner = Arc::new(ScriptedSpawner::new(RegConfig::DEFAULT_NOT_FOUND_MESSAGE).respond(
        "HKLM\\SAM\\SAM",
        "",
        "ERROR: Access is denied.\r\nmore text",
        1,
    ));
    let executor = CommandExecutor::with_spawner(spawner);

    let err = executor
        .execute(&args(&["QUERY", "HKLM\\SAM\\SAM"]))
        .await
        .unwrap_err();

    match &err {
        RegError::Tool(tool) => {
            assert!(tool
                .message()
                .starts_with("Access is denied. - Command 'reg "));
            assert_eq!(
                tool.message(),
                "Access is denied. - Command 'reg QUERY HKLM\\SAM\\SAM'"
            );
            assert_eq!(tool.args(), args(&["QUERY", "HKLM\\SAM\\SAM"]).as_slice());
        }
        other => panic!("expected tool error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_english_default_not_mistaken_after_localized_detection() {
    let spawner = Arc::new(ScriptedSpawner::new(LOCALIZED_MARKER).respond(
        "HKCU\\Missing",
        "",
        RegConfig::DEFAULT_NOT_FOUND_MESSAGE,
        1,
    ));
    let executor = CommandExecutor::with_spawner(spawner);
    executor.detect_error_messages().await;

    let err = executor
        .execute(&args(&["QUERY", "HKCU\\Missing"]))
        .await
        .unwrap_err();
    assert!(err
        .to_string()
        .starts_with("The system was unable to find the specified registry key or value."));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_share_single_detection() {
    let mut spawner = ScriptedSpawner::new(LOCALIZED_MARKER)
        .with_detection_delay(Duration::from_millis(50));
    for i in 0..16 {
        spawner = spawner.respond(
            &format!("HKCU\\Missing{i}"),
            "",
            &format!("{LOCALIZED_MARKER}\r\n"),
            1,
        );
    }
    let spawner = Arc::new(spawner);
    let executor = Arc::new(CommandExecutor::with_spawner(spawner.clone()));

    let calls = (0..16).map(|i| {
        let executor = executor.clone();
        async move {
            let path = format!("HKCU\\Missing{i}");
            executor.execute(&args(&["QUERY", path.as_str()])).await
        }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| matches!(r, Ok(None))));
    assert_eq!(spawner.detection_calls(), 1);
    assert_eq!(executor.not_found_marker(), LOCALIZED_MARKER);
}

#[tokio::test]
async fn test_explicit_detection_runs_once() {
    let spawner = Arc::new(ScriptedSpawner::new(LOCALIZED_MARKER));
    let executor = CommandExecutor::with_spawner(spawner.clone());

    assert!(!executor.is_detected());
    let first = executor.detect_error_messages().await.to_string();
    let second = executor.detect_error_messages().await.to_string();

    assert_eq!(first, LOCALIZED_MARKER);
    assert_eq!(first, second);
    assert_eq!(spawner.detection_calls(), 1);
    assert_eq!(spawner.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_detection_spawn_failure_falls_back_to_default() {
    let executor = CommandExecutor::with_spawner(Arc::new(RegSpawner::new(
        "/nonexistent/regkit-missing-tool",
    )));

    assert_eq!(
        executor.detect_error_messages().await,
        RegConfig::DEFAULT_NOT_FOUND_MESSAGE
    );
    assert!(executor.is_detected());

    let err = executor.execute(&args(&["QUERY", "HKCU"])).await.unwrap_err();
    assert!(matches!(err, RegError::Spawn { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_real_process_nonzero_exit_without_stderr_is_success() {
    let executor = CommandExecutor::with_spawner(Arc::new(RegSpawner::new("sh")));

    let out = executor
        .execute(&args(&["-c", "printf 'partial'; exit 5"]))
        .await
        .unwrap();

    assert_eq!(out.as_deref(), Some("partial"));
}
