//! Recorder backend driven as a child process.
//!
//! Spawns the configured backend executable and speaks the line-delimited
//! JSON protocol over its stdin/stdout. The child's stderr is discarded so a
//! chatty backend cannot corrupt the TUI. The process is killed when the
//! panel drops the bridge; any command still in flight at that point is not
//! observed further.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout};
use tokio::sync::Mutex;

use super::protocol::{RecorderRequest, RecorderResponse};
use super::RecorderBridge;
use crate::config::RecorderConfig;

/// Bridge to a recorder backend running as a child process.
pub struct ProcessRecorder {
    /// Held so the backend is killed when the panel exits.
    _child: Child,
    /// Request/response I/O. One command is in flight at a time; the mutex
    /// keeps that true even if the bridge is ever shared.
    io: Mutex<RecorderIo>,
}

struct RecorderIo {
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl ProcessRecorder {
    /// Spawns the backend named in the configuration.
    ///
    /// # Errors
    /// - If the backend executable cannot be located
    /// - If the process cannot be spawned or its stdio cannot be piped
    pub fn spawn(config: &RecorderConfig) -> Result<Self> {
        let program = find_recorder(&config.command)?;

        tracing::info!(
            "Starting recorder backend: {} {}",
            program.display(),
            config.args.join(" ")
        );

        let mut child = tokio::process::Command::new(&program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start recorder backend '{}'", program.display()))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("Recorder backend has no stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Recorder backend has no stdout"))?;

        Ok(ProcessRecorder {
            _child: child,
            io: Mutex::new(RecorderIo {
                stdin,
                stdout: BufReader::new(stdout).lines(),
            }),
        })
    }

    /// Sends one request line and reads one response line.
    async fn call(&self, request: &RecorderRequest<'_>) -> Result<RecorderResponse> {
        let mut io = self.io.lock().await;

        let mut line = serde_json::to_string(request)?;
        line.push('\n');
        io.stdin
            .write_all(line.as_bytes())
            .await
            .context("Failed to send command to recorder backend")?;
        io.stdin.flush().await?;

        let reply = io
            .stdout
            .next_line()
            .await
            .context("Failed to read recorder backend response")?
            .ok_or_else(|| anyhow!("Recorder backend closed the connection"))?;

        let response: RecorderResponse = serde_json::from_str(&reply)
            .with_context(|| format!("Malformed recorder backend response: {reply}"))?;
        Ok(response)
    }

    /// Turns a response envelope into the command's result.
    fn check(response: RecorderResponse) -> Result<RecorderResponse> {
        if response.ok {
            Ok(response)
        } else {
            bail!(
                "{}",
                response
                    .error
                    .unwrap_or_else(|| "recorder backend rejected the command".to_string())
            )
        }
    }
}

#[async_trait]
impl RecorderBridge for ProcessRecorder {
    async fn start_recording(&self) -> Result<String> {
        let response = Self::check(self.call(&RecorderRequest::StartRecording).await?)?;
        response
            .session_id
            .ok_or_else(|| anyhow!("Recorder backend did not return a session id"))
    }

    async fn pause_recording(&self, session_id: &str) -> Result<()> {
        Self::check(self.call(&RecorderRequest::PauseRecording { session_id }).await?)?;
        Ok(())
    }

    async fn resume_recording(&self, session_id: &str) -> Result<()> {
        Self::check(self.call(&RecorderRequest::ResumeRecording { session_id }).await?)?;
        Ok(())
    }

    async fn stop_recording(&self, session_id: &str) -> Result<()> {
        Self::check(self.call(&RecorderRequest::StopRecording { session_id }).await?)?;
        Ok(())
    }
}

/// Locates the recorder backend executable.
///
/// A command containing a path separator is used as-is. A bare name is
/// checked against the standard installation directories for the platform,
/// then searched in PATH via `which` (or `where` on Windows).
///
/// # Errors
/// - If the named executable cannot be found anywhere
fn find_recorder(command: &str) -> Result<PathBuf> {
    if command.contains(std::path::MAIN_SEPARATOR) {
        let direct = PathBuf::from(command);
        if direct.exists() {
            return Ok(direct);
        }
        bail!("Recorder backend not found at '{command}'");
    }

    let candidates = if cfg!(target_os = "macos") {
        vec![
            PathBuf::from("/opt/homebrew/bin"),
            PathBuf::from("/usr/local/bin"),
            PathBuf::from("/usr/bin"),
        ]
    } else if cfg!(target_os = "linux") {
        vec![
            PathBuf::from("/usr/bin"),
            PathBuf::from("/usr/local/bin"),
            PathBuf::from("/snap/bin"),
        ]
    } else {
        vec![]
    };

    for dir in candidates {
        let path = dir.join(command);
        if path.exists() {
            tracing::debug!("Found recorder backend at: {}", path.display());
            return Ok(path);
        }
    }

    let path = find_in_path(command)?;
    tracing::debug!("Found recorder backend in PATH at: {}", path.display());
    Ok(path)
}

/// Searches for a binary in the system PATH.
fn find_in_path(binary_name: &str) -> Result<PathBuf> {
    let search_cmd = if cfg!(target_os = "windows") {
        "where"
    } else {
        "which"
    };

    let output = std::process::Command::new(search_cmd)
        .arg(binary_name)
        .output()
        .map_err(|e| anyhow!("Failed to search PATH for {binary_name}: {e}"))?;

    if output.status.success() {
        let path_str = String::from_utf8_lossy(&output.stdout);
        let path = PathBuf::from(path_str.trim());
        if !path.as_os_str().is_empty() {
            return Ok(path);
        }
    }

    Err(anyhow!(
        "Recorder backend '{binary_name}' not found. Install it or point \
         [recorder].command in the focusrec config at the executable."
    ))
}
