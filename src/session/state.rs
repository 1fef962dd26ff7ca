//! Client-side view of the current recording session.
//!
//! `SessionState` is the single value the panel renders from. It is mutated
//! only by the transition functions below, which the controller applies after
//! the corresponding backend command has succeeded — a failed command never
//! touches the state.

/// Snapshot of the recording session as known to the panel.
///
/// Invariants upheld by the transition functions:
/// - `is_paused` is false whenever `is_recording` is false
/// - `session_id` is `Some` iff `is_recording` is true
/// - `duration_secs` only advances while recording and unpaused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    is_recording: bool,
    is_paused: bool,
    duration_secs: u64,
    session_id: Option<String>,
}

impl SessionState {
    /// Returns the idle state: not recording, not paused, zero duration,
    /// no session.
    pub fn idle() -> Self {
        SessionState {
            is_recording: false,
            is_paused: false,
            duration_secs: 0,
            session_id: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Whether the duration clock should be running right now.
    pub fn clock_armed(&self) -> bool {
        self.is_recording && !self.is_paused
    }

    /// A start command succeeded: enter a fresh session.
    pub(crate) fn begin(&mut self, session_id: String) {
        self.is_recording = true;
        self.is_paused = false;
        self.duration_secs = 0;
        self.session_id = Some(session_id);
    }

    /// A pause command succeeded: freeze the clock, everything else unchanged.
    pub(crate) fn pause(&mut self) {
        self.is_paused = true;
    }

    /// A resume command succeeded: the clock may run again.
    pub(crate) fn resume(&mut self) {
        self.is_paused = false;
    }

    /// A stop command succeeded: return to idle, dropping the session id and
    /// resetting the duration.
    pub(crate) fn finish(&mut self) {
        *self = SessionState::idle();
    }

    /// One clock tick elapsed. Ignored unless the session is active and
    /// unpaused, so a straggling tick can never advance a frozen duration.
    pub(crate) fn record_tick(&mut self) {
        if self.clock_armed() {
            self.duration_secs += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_state_is_fully_reset() {
        let state = SessionState::idle();
        assert!(!state.is_recording());
        assert!(!state.is_paused());
        assert_eq!(state.duration_secs(), 0);
        assert_eq!(state.session_id(), None);
        assert!(!state.clock_armed());
    }

    #[test]
    fn test_begin_resets_duration_and_assigns_session() {
        let mut state = SessionState::idle();
        state.begin("abc123ef".to_string());
        state.record_tick();
        state.record_tick();
        assert_eq!(state.duration_secs(), 2);

        state.begin("next-session".to_string());
        assert_eq!(state.duration_secs(), 0);
        assert_eq!(state.session_id(), Some("next-session"));
        assert!(state.clock_armed());
    }

    #[test]
    fn test_pause_and_resume_preserve_session_and_duration() {
        let mut state = SessionState::idle();
        state.begin("abc123ef".to_string());
        state.record_tick();

        state.pause();
        assert!(state.is_recording());
        assert!(state.is_paused());
        assert!(!state.clock_armed());
        assert_eq!(state.duration_secs(), 1);
        assert_eq!(state.session_id(), Some("abc123ef"));

        state.resume();
        assert!(state.clock_armed());
        assert_eq!(state.duration_secs(), 1);
        assert_eq!(state.session_id(), Some("abc123ef"));
    }

    #[test]
    fn test_ticks_are_ignored_while_paused() {
        let mut state = SessionState::idle();
        state.begin("abc123ef".to_string());
        state.pause();
        state.record_tick();
        state.record_tick();
        assert_eq!(state.duration_secs(), 0);
    }

    #[test]
    fn test_finish_returns_to_idle() {
        let mut state = SessionState::idle();
        state.begin("abc123ef".to_string());
        state.record_tick();
        state.pause();

        state.finish();
        assert_eq!(state, SessionState::idle());
    }
}
