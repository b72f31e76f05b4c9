//! External process invocation with timeout and cancellation.

use std::ffi::OsString;
use std::path::Path;
use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::errors::{PipelineError, Result};

/// Captured output of a finished process.
#[derive(Debug)]
pub struct ProcessOutput {
    /// Exit code, -1 when terminated by a signal.
    pub exit_code: i32,
    /// Captured stdout, lossily decoded.
    pub stdout: String,
    /// Captured stderr, lossily decoded.
    pub stderr: String,
}

/// Run `program` with `args`, capturing stdout and stderr.
///
/// The child is killed when `timeout` elapses, when `cancel` fires, or when
/// the returned future is dropped mid-flight.
pub async fn run_captured(
    program: &Path,
    args: &[OsString],
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<ProcessOutput> {
    let start = Instant::now();
    let name = program_name(program);
    let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

    let mut cmd = tokio::process::Command::new(program);
    let _ = cmd
        .args(args)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true);

    debug!(program = %program.display(), "spawning process");

    let mut child = cmd.spawn()?;

    // Take ownership of the pipes before the select so the child can be
    // killed on timeout/cancel without wait_with_output() consuming it.
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let stdout_handle = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stdout_pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    });
    let stderr_handle = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stderr_pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    });

    tokio::select! {
        status = child.wait() => {
            let status = status?;
            let stdout_bytes = stdout_handle.await.unwrap_or_default();
            let stderr_bytes = stderr_handle.await.unwrap_or_default();

            let exit_code = status.code().unwrap_or(-1);
            let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            debug!(program = %name, exit_code, duration_ms, "process completed");

            Ok(ProcessOutput {
                exit_code,
                stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
                stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
            })
        }
        () = tokio::time::sleep(timeout) => {
            let _ = child.kill().await;
            stdout_handle.abort();
            stderr_handle.abort();
            warn!(program = %name, timeout_ms, "process timed out");
            Err(PipelineError::Timeout {
                process: name,
                timeout_ms,
            })
        }
        () = cancel.cancelled() => {
            let _ = child.kill().await;
            stdout_handle.abort();
            stderr_handle.abort();
            debug!(program = %name, "process cancelled");
            Err(PipelineError::Cancelled)
        }
    }
}

fn program_name(program: &Path) -> String {
    program.file_name().map_or_else(
        || program.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sh_args(script: &str) -> Vec<OsString> {
        vec![OsString::from("-c"), OsString::from(script)]
    }

    fn sh() -> &'static Path {
        Path::new("sh")
    }

    const LONG: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn captures_stdout() {
        let cancel = CancellationToken::new();
        let out = run_captured(sh(), &sh_args("echo hello"), LONG, &cancel)
            .await
            .unwrap();
        assert_eq!(out.exit_code, 0);
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn captures_stderr_and_exit_code() {
        let cancel = CancellationToken::new();
        let out = run_captured(sh(), &sh_args("echo err >&2; exit 42"), LONG, &cancel)
            .await
            .unwrap();
        assert_eq!(out.exit_code, 42);
        assert_eq!(out.stderr.trim(), "err");
        assert!(out.stdout.is_empty());
    }

    #[tokio::test]
    async fn captures_both_streams() {
        let cancel = CancellationToken::new();
        let out = run_captured(
            sh(),
            &sh_args("echo out_val && echo err_val >&2"),
            LONG,
            &cancel,
        )
        .await
        .unwrap();
        assert_eq!(out.stdout.trim(), "out_val");
        assert_eq!(out.stderr.trim(), "err_val");
    }

    #[tokio::test]
    async fn timeout_kills_child_quickly() {
        let cancel = CancellationToken::new();
        let start = Instant::now();
        let result = run_captured(
            sh(),
            &sh_args("sleep 10"),
            Duration::from_millis(50),
            &cancel,
        )
        .await;
        assert_matches!(result, Err(PipelineError::Timeout { timeout_ms: 50, .. }));
        assert!(
            start.elapsed().as_millis() < 2_000,
            "should exit quickly, not wait for sleep 10"
        );
    }

    #[tokio::test]
    async fn cancellation_resolves_quickly() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        let handle = tokio::spawn(async move {
            run_captured(sh(), &sh_args("sleep 10"), LONG, &cancel).await
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();

        let start = Instant::now();
        let result = handle.await.unwrap();
        assert_matches!(result, Err(PipelineError::Cancelled));
        assert!(start.elapsed().as_millis() < 2_000, "cancel should resolve quickly");
    }

    #[tokio::test]
    async fn missing_program_is_io_error() {
        let cancel = CancellationToken::new();
        let result = run_captured(
            Path::new("/definitely/not/here/tool"),
            &[],
            LONG,
            &cancel,
        )
        .await;
        assert_matches!(result, Err(PipelineError::Io(_)));
    }

    #[test]
    fn program_name_uses_file_name() {
        assert_eq!(program_name(Path::new("/usr/bin/ffmpeg")), "ffmpeg");
        assert_eq!(program_name(Path::new("whisper-cli")), "whisper-cli");
    }
}
