//! Recording control panel for focusrec.
//!
//! Renders the session state (status, elapsed duration, session identity,
//! inline errors) and turns key presses into panel commands for the session
//! controller.

pub mod ui;

pub use ui::{PanelCommand, RecorderPanel};

/// Formats an elapsed duration in whole seconds as `HH:MM:SS`.
///
/// Every field is zero-padded to at least two digits; the hour count is
/// unbounded, so long sessions keep counting past 99 hours instead of
/// wrapping.
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
