//! Session controller: applies user commands to the session state.
//!
//! The controller owns the session state, the duration clock, and the
//! injected recorder bridge. Each user command is one awaited bridge call
//! followed by one state transition — nothing is mutated before the backend
//! answers, so a failed command always leaves the panel showing its
//! pre-command state together with the error line.
//!
//! Commands are serialized: the panel loop awaits each one before reading
//! further input, so a second command can never be issued while one is in
//! flight.

use std::time::Instant;

use super::clock::DurationClock;
use super::state::SessionState;
use crate::recorder::RecorderBridge;

/// Drives the recording session on behalf of the panel.
pub struct SessionController {
    bridge: Box<dyn RecorderBridge>,
    state: SessionState,
    clock: DurationClock,
    /// The most recent command failure, shown inline until the next command
    /// attempt replaces or clears it.
    last_error: Option<String>,
}

impl SessionController {
    pub fn new(bridge: Box<dyn RecorderBridge>) -> Self {
        SessionController {
            bridge,
            state: SessionState::idle(),
            clock: DurationClock::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Advances the duration clock to `now`. Call once per panel frame.
    ///
    /// The clock is armed and disarmed here, from the current
    /// recording-and-unpaused condition, so there is exactly one tick source
    /// and it follows every state transition — including a failure that left
    /// the session not recording.
    pub fn tick(&mut self, now: Instant) {
        self.clock.sync(self.state.clock_armed(), now);
        for _ in 0..self.clock.poll(now) {
            self.state.record_tick();
        }
    }

    /// Starts a new recording session.
    ///
    /// Ignored while a session already exists: the panel only offers start
    /// when idle, and guarding here as well means the backend never sees
    /// overlapping starts.
    pub async fn start(&mut self) {
        if self.state.is_recording() {
            tracing::debug!("Ignoring start: a session is already recording");
            return;
        }

        self.last_error = None;
        match self.bridge.start_recording().await {
            Ok(session_id) => {
                tracing::info!("Recording started: session {session_id}");
                self.state.begin(session_id);
            }
            Err(e) => {
                tracing::error!("Start recording failed: {e}");
                self.last_error = Some(format!("Failed to start recording: {e}"));
            }
        }
    }

    /// Pauses the active session.
    pub async fn pause(&mut self) {
        if !self.state.is_recording() || self.state.is_paused() {
            tracing::debug!("Ignoring pause: no active unpaused session");
            return;
        }
        let Some(session_id) = self.state.session_id().map(str::to_owned) else {
            return;
        };

        self.last_error = None;
        match self.bridge.pause_recording(&session_id).await {
            Ok(()) => {
                tracing::info!("Recording paused: session {session_id}");
                self.state.pause();
            }
            Err(e) => {
                tracing::error!("Pause recording failed: {e}");
                self.last_error = Some(format!("Failed to pause recording: {e}"));
            }
        }
    }

    /// Resumes the paused session.
    pub async fn resume(&mut self) {
        if !self.state.is_recording() || !self.state.is_paused() {
            tracing::debug!("Ignoring resume: no paused session");
            return;
        }
        let Some(session_id) = self.state.session_id().map(str::to_owned) else {
            return;
        };

        self.last_error = None;
        match self.bridge.resume_recording(&session_id).await {
            Ok(()) => {
                tracing::info!("Recording resumed: session {session_id}");
                self.state.resume();
            }
            Err(e) => {
                tracing::error!("Resume recording failed: {e}");
                self.last_error = Some(format!("Failed to resume recording: {e}"));
            }
        }
    }

    /// Pauses or resumes, whichever applies. No-op while idle.
    pub async fn toggle_pause(&mut self) {
        if !self.state.is_recording() {
            return;
        }
        if self.state.is_paused() {
            self.resume().await;
        } else {
            self.pause().await;
        }
    }

    /// Stops the current session, returning the panel to idle.
    ///
    /// A stop with no session to target is a no-op: the panel never offers
    /// it, and a forced one must leave the state unchanged.
    pub async fn stop(&mut self) {
        let Some(session_id) = self.state.session_id().map(str::to_owned) else {
            tracing::debug!("Ignoring stop: no session to stop");
            return;
        };

        self.last_error = None;
        match self.bridge.stop_recording(&session_id).await {
            Ok(()) => {
                tracing::info!("Recording stopped: session {session_id}");
                self.state.finish();
            }
            Err(e) => {
                tracing::error!("Stop recording failed: {e}");
                self.last_error = Some(format!("Failed to stop recording: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::format_duration;
    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// In-process bridge whose commands can be made to fail one by one.
    #[derive(Default)]
    struct FakeRecorder {
        fail_start: AtomicBool,
        fail_pause: AtomicBool,
        fail_resume: AtomicBool,
        fail_stop: AtomicBool,
    }

    #[async_trait]
    impl RecorderBridge for FakeRecorder {
        async fn start_recording(&self) -> Result<String> {
            if self.fail_start.load(Ordering::SeqCst) {
                bail!("no capture devices available");
            }
            Ok("abc123ef-4567".to_string())
        }

        async fn pause_recording(&self, _session_id: &str) -> Result<()> {
            if self.fail_pause.load(Ordering::SeqCst) {
                bail!("pause rejected");
            }
            Ok(())
        }

        async fn resume_recording(&self, _session_id: &str) -> Result<()> {
            if self.fail_resume.load(Ordering::SeqCst) {
                bail!("resume rejected");
            }
            Ok(())
        }

        async fn stop_recording(&self, _session_id: &str) -> Result<()> {
            if self.fail_stop.load(Ordering::SeqCst) {
                bail!("disk full");
            }
            Ok(())
        }
    }

    fn controller() -> SessionController {
        SessionController::new(Box::new(FakeRecorder::default()))
    }

    #[tokio::test]
    async fn test_start_enters_fresh_session() {
        let mut ctl = controller();
        ctl.start().await;

        let state = ctl.state();
        assert!(state.is_recording());
        assert!(!state.is_paused());
        assert_eq!(state.duration_secs(), 0);
        assert_eq!(state.session_id(), Some("abc123ef-4567"));
        assert_eq!(ctl.last_error(), None);
    }

    #[tokio::test]
    async fn test_start_failure_leaves_exact_idle_state() {
        let fake = FakeRecorder::default();
        fake.fail_start.store(true, Ordering::SeqCst);
        let mut ctl = SessionController::new(Box::new(fake));

        ctl.start().await;

        assert_eq!(*ctl.state(), SessionState::idle());
        assert_eq!(
            ctl.last_error(),
            Some("Failed to start recording: no capture devices available")
        );
    }

    #[tokio::test]
    async fn test_second_start_is_ignored_while_recording() {
        let mut ctl = controller();
        ctl.start().await;
        let t0 = Instant::now();
        ctl.tick(t0);
        ctl.tick(t0 + Duration::from_secs(5));
        assert_eq!(ctl.state().duration_secs(), 5);

        // A forced second start must not reset the session.
        ctl.start().await;
        assert_eq!(ctl.state().duration_secs(), 5);
        assert_eq!(ctl.state().session_id(), Some("abc123ef-4567"));
    }

    #[tokio::test]
    async fn test_pause_and_resume_keep_session_and_duration() {
        let mut ctl = controller();
        ctl.start().await;
        let t0 = Instant::now();
        ctl.tick(t0);
        ctl.tick(t0 + Duration::from_secs(3));

        ctl.pause().await;
        assert!(ctl.state().is_paused());
        assert_eq!(ctl.state().duration_secs(), 3);
        assert_eq!(ctl.state().session_id(), Some("abc123ef-4567"));

        ctl.resume().await;
        assert!(!ctl.state().is_paused());
        assert_eq!(ctl.state().duration_secs(), 3);
        assert_eq!(ctl.state().session_id(), Some("abc123ef-4567"));
    }

    #[tokio::test]
    async fn test_failed_stop_leaves_session_recording() {
        let fake = FakeRecorder::default();
        fake.fail_stop.store(true, Ordering::SeqCst);
        let mut ctl = SessionController::new(Box::new(fake));

        ctl.start().await;
        let t0 = Instant::now();
        ctl.tick(t0);
        ctl.tick(t0 + Duration::from_secs(2));

        ctl.stop().await;
        assert!(ctl.state().is_recording());
        assert_eq!(ctl.state().session_id(), Some("abc123ef-4567"));
        assert_eq!(ctl.state().duration_secs(), 2);
        assert_eq!(ctl.last_error(), Some("Failed to stop recording: disk full"));

        // The clock keeps running after the failed stop.
        ctl.tick(t0 + Duration::from_secs(4));
        assert_eq!(ctl.state().duration_secs(), 4);
    }

    #[tokio::test]
    async fn test_forced_stop_while_idle_changes_nothing() {
        let mut ctl = controller();
        ctl.stop().await;
        assert_eq!(*ctl.state(), SessionState::idle());
        assert_eq!(ctl.last_error(), None);
    }

    #[tokio::test]
    async fn test_next_attempt_clears_previous_error() {
        let fake = FakeRecorder::default();
        fake.fail_pause.store(true, Ordering::SeqCst);
        let mut ctl = SessionController::new(Box::new(fake));

        ctl.start().await;
        ctl.pause().await;
        assert!(ctl.last_error().is_some());

        ctl.stop().await;
        assert_eq!(ctl.last_error(), None);
        assert_eq!(*ctl.state(), SessionState::idle());
    }

    #[tokio::test]
    async fn test_ticks_paused_ticks_resume_scenario() {
        let mut ctl = controller();
        ctl.start().await;

        let t0 = Instant::now();
        ctl.tick(t0);

        // 65 seconds of active recording.
        ctl.tick(t0 + Duration::from_secs(65));
        assert_eq!(ctl.state().duration_secs(), 65);
        assert_eq!(format_duration(ctl.state().duration_secs()), "00:01:05");

        // Paused for 10 seconds: the duration must not move.
        ctl.pause().await;
        ctl.tick(t0 + Duration::from_secs(65));
        ctl.tick(t0 + Duration::from_secs(75));
        assert_eq!(format_duration(ctl.state().duration_secs()), "00:01:05");

        // 5 more seconds after resuming.
        ctl.resume().await;
        ctl.tick(t0 + Duration::from_secs(75));
        ctl.tick(t0 + Duration::from_secs(80));
        assert_eq!(format_duration(ctl.state().duration_secs()), "00:01:10");

        // Stop returns the panel to idle with a zeroed duration.
        ctl.stop().await;
        assert_eq!(*ctl.state(), SessionState::idle());
        assert_eq!(format_duration(ctl.state().duration_secs()), "00:00:00");
    }
}
