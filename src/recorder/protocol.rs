//! Wire format spoken to the recorder backend.
//!
//! One JSON object per line on the child's stdin, one JSON object per line
//! back on its stdout. Requests are tagged with a `cmd` field; responses are
//! a flat envelope so the backend can answer every command with the same
//! shape.

use serde::{Deserialize, Serialize};

/// Request sent to the backend, one line of JSON per command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum RecorderRequest<'a> {
    StartRecording,
    PauseRecording { session_id: &'a str },
    ResumeRecording { session_id: &'a str },
    StopRecording { session_id: &'a str },
}

/// Response read back from the backend.
///
/// `session_id` is only present on a successful start; `error` only when
/// `ok` is false.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecorderResponse {
    pub ok: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let start = serde_json::to_string(&RecorderRequest::StartRecording).unwrap();
        assert_eq!(start, r#"{"cmd":"start_recording"}"#);

        let pause = serde_json::to_string(&RecorderRequest::PauseRecording {
            session_id: "abc123ef",
        })
        .unwrap();
        assert_eq!(
            pause,
            r#"{"cmd":"pause_recording","session_id":"abc123ef"}"#
        );
    }

    #[test]
    fn test_success_response_with_session_id() {
        let resp: RecorderResponse =
            serde_json::from_str(r#"{"ok":true,"session_id":"abc123ef"}"#).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.session_id.as_deref(), Some("abc123ef"));
        assert_eq!(resp.error, None);
    }

    #[test]
    fn test_bare_acknowledgement() {
        let resp: RecorderResponse = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.session_id, None);
    }

    #[test]
    fn test_rejection_carries_error_text() {
        let resp: RecorderResponse =
            serde_json::from_str(r#"{"ok":false,"error":"no capture devices available"}"#)
                .unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error.as_deref(), Some("no capture devices available"));
    }
}
