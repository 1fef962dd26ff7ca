//! Command bridge to the native recorder backend.
//!
//! The backend owns capture, encoding, and persistence of session artifacts;
//! the panel only ever speaks four request/response commands to it. The
//! bridge is a trait so the session controller can be exercised in tests
//! without a backend process.

pub mod process;
pub mod protocol;

pub use process::ProcessRecorder;

use anyhow::Result;
use async_trait::async_trait;

/// The four commands the panel can issue to the recorder backend.
///
/// Every operation resolves to either success or a single "command failed"
/// error carrying the backend's rejection text. Timeout semantics belong to
/// the backend; the bridge does not impose its own.
#[async_trait]
pub trait RecorderBridge: Send + Sync {
    /// Begin a new recording session. Returns the opaque session id the
    /// backend assigned to it.
    async fn start_recording(&self) -> Result<String>;

    /// Pause the session. Acknowledged with no payload.
    async fn pause_recording(&self, session_id: &str) -> Result<()>;

    /// Resume the paused session.
    async fn resume_recording(&self, session_id: &str) -> Result<()>;

    /// Stop and finalize the session.
    async fn stop_recording(&self, session_id: &str) -> Result<()>;
}
