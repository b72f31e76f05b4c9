//! End-to-end pipeline tests against fake transcoder and recognizer
//! executables (shell scripts in a tempdir).

#![cfg(unix)]
#![allow(missing_docs, unused_results)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use tokio_util::sync::CancellationToken;

use signbridge_transcribe::errors::PipelineError;
use signbridge_transcribe::pipeline::{PipelineConfig, TranscriptionPipeline};

/// A fake transcoder that copies its input file to its output file.
/// Argument layout matches the real invocation: `-i IN ... -y OUT`.
const COPYING_TRANSCODER: &str = "in=$2\nfor arg; do out=$arg; done\ncp \"$in\" \"$out\"";

/// A fake recognizer that prints a timestamped two-line transcript.
const CANNED_RECOGNIZER: &str = "echo '[00:00:00.000 --> 00:00:04.240]  Hello world.'\n\
echo '[00:00:04.240 --> 00:00:08.000]  How are you?'";

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

struct Fixture {
    _dir: tempfile::TempDir,
    scratch: PathBuf,
    pipeline: TranscriptionPipeline,
}

fn fixture(transcoder_body: &str, recognizer_body: &str) -> Fixture {
    fixture_with_timeout(transcoder_body, recognizer_body, Duration::from_secs(10))
}

fn fixture_with_timeout(
    transcoder_body: &str,
    recognizer_body: &str,
    timeout: Duration,
) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let transcoder = write_script(dir.path(), "transcoder", transcoder_body);
    let recognizer = write_script(dir.path(), "recognizer", recognizer_body);
    let model = dir.path().join("model.bin");
    std::fs::write(&model, b"fake model").unwrap();
    let scratch = dir.path().join("scratch");

    let pipeline = TranscriptionPipeline::new(PipelineConfig {
        transcoder_path: transcoder,
        recognizer_path: recognizer,
        model_path: model,
        scratch_dir: scratch.clone(),
        process_timeout: timeout,
    });

    Fixture {
        _dir: dir,
        scratch,
        pipeline,
    }
}

fn scratch_count(scratch: &Path) -> usize {
    match std::fs::read_dir(scratch) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

/// An upload payload comfortably larger than a WAV header.
fn payload() -> Vec<u8> {
    vec![b'A'; 64]
}

#[tokio::test]
async fn happy_path_yields_sanitized_transcript() {
    let fx = fixture(COPYING_TRANSCODER, CANNED_RECOGNIZER);
    let cancel = CancellationToken::new();

    let text = fx
        .pipeline
        .transcribe(&payload(), Some("audio/webm"), &cancel)
        .await
        .unwrap();

    assert_eq!(text, "Hello world. How are you?");
    assert_eq!(scratch_count(&fx.scratch), 0);
}

#[tokio::test]
async fn empty_payload_never_spawns_the_transcoder() {
    let fx = fixture(
        // Leaves a marker if it ever runs
        "touch \"$(dirname \"$0\")/transcoder-ran\"",
        CANNED_RECOGNIZER,
    );
    let cancel = CancellationToken::new();

    let err = fx
        .pipeline
        .transcribe(&[], Some("audio/webm"), &cancel)
        .await
        .unwrap_err();

    assert_matches!(err, PipelineError::EmptyPayload);
    assert!(!fx._dir.path().join("transcoder-ran").exists());
    assert_eq!(scratch_count(&fx.scratch), 0);
}

#[tokio::test]
async fn transcoder_failure_skips_recognizer_and_carries_stderr() {
    let fx = fixture(
        "echo 'Invalid data found when processing input' >&2\nexit 1",
        // Leaves a marker if it ever runs
        "touch \"$(dirname \"$0\")/recognizer-ran\"",
    );
    let cancel = CancellationToken::new();

    let err = fx
        .pipeline
        .transcribe(&payload(), Some("audio/webm"), &cancel)
        .await
        .unwrap_err();

    assert_matches!(err, PipelineError::TranscodeFailed { .. });
    assert!(err.to_string().contains("Invalid data found"));
    assert!(!fx._dir.path().join("recognizer-ran").exists());
    assert_eq!(scratch_count(&fx.scratch), 0);
}

#[tokio::test]
async fn short_waveform_fails_cleanly() {
    let fx = fixture(
        "for arg; do out=$arg; done\nprintf 'RIFF' > \"$out\"",
        CANNED_RECOGNIZER,
    );
    let cancel = CancellationToken::new();

    let err = fx
        .pipeline
        .transcribe(&payload(), Some("audio/webm"), &cancel)
        .await
        .unwrap_err();

    assert_matches!(err, PipelineError::InvalidAudioOutput { size: 4 });
    assert_eq!(scratch_count(&fx.scratch), 0);
}

#[tokio::test]
async fn recognizer_failure_carries_stderr() {
    let fx = fixture(
        COPYING_TRANSCODER,
        "echo 'failed to load model' >&2\nexit 3",
    );
    let cancel = CancellationToken::new();

    let err = fx
        .pipeline
        .transcribe(&payload(), Some("audio/webm"), &cancel)
        .await
        .unwrap_err();

    assert_matches!(err, PipelineError::RecognitionFailed { ref details }
        if details.contains("failed to load model"));
    assert_eq!(scratch_count(&fx.scratch), 0);
}

#[tokio::test]
async fn slow_transcoder_times_out_and_cleans_up() {
    let fx = fixture_with_timeout("sleep 5", CANNED_RECOGNIZER, Duration::from_millis(100));
    let cancel = CancellationToken::new();

    let start = Instant::now();
    let err = fx
        .pipeline
        .transcribe(&payload(), Some("audio/webm"), &cancel)
        .await
        .unwrap_err();

    assert_matches!(err, PipelineError::Timeout { timeout_ms: 100, .. });
    assert!(
        start.elapsed().as_millis() < 2_000,
        "timeout should fire long before the fake transcoder finishes"
    );
    assert_eq!(scratch_count(&fx.scratch), 0);
}

#[tokio::test]
async fn cancellation_aborts_the_run() {
    let fx = fixture("sleep 5", CANNED_RECOGNIZER);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();

    let pipeline = fx.pipeline.clone();
    let handle =
        tokio::spawn(
            async move { pipeline.transcribe(&payload(), None, &cancel).await },
        );

    tokio::time::sleep(Duration::from_millis(50)).await;
    trigger.cancel();

    let err = handle.await.unwrap().unwrap_err();
    assert_matches!(err, PipelineError::Cancelled);
    assert_eq!(scratch_count(&fx.scratch), 0);
}

#[tokio::test]
async fn concurrent_runs_never_cross_contents() {
    // The recognizer echoes the waveform content back, so each run's
    // transcript proves which staged bytes reached it.
    let fx = fixture(COPYING_TRANSCODER, "cat \"$4\"");
    let cancel = CancellationToken::new();

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let pipeline = fx.pipeline.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let content = format!("{i:0>60}");
                let text = pipeline
                    .transcribe(content.as_bytes(), Some("audio/wav"), &cancel)
                    .await
                    .unwrap();
                assert_eq!(text, content);
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(scratch_count(&fx.scratch), 0);
}
