//! The recording control panel loop.
//!
//! Wires the session controller, the duration clock, and the panel UI
//! together: user intent is forwarded to the recorder backend, successful
//! commands transition the session state, and the panel re-renders from that
//! state once per frame. Supports an external toggle via the SIGUSR1 signal.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crate::config::FocusrecConfig;
use crate::panel::{PanelCommand, RecorderPanel};
use crate::recorder::ProcessRecorder;
use crate::session::SessionController;
use crate::ui::ErrorScreen;

/// Runs the recording control panel until the user quits.
///
/// Commands are processed one at a time: each bridge call is awaited before
/// further input is read, so pause cannot race stop. The duration clock is
/// advanced at the top of every frame, after any state transition has taken
/// effect.
///
/// # Errors
/// - If the configuration cannot be loaded
/// - If the recorder backend cannot be spawned
/// - If terminal input or rendering fails
pub async fn handle_panel() -> Result<(), anyhow::Error> {
    tracing::info!("=== focusrec control panel started ===");

    let config = match FocusrecConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load configuration: {err}");
            let error_message = format!(
                "Configuration Error:\n\n{err}\n\nPlease check your ~/.config/focusrec/focusrec.toml file and try again."
            );
            let mut error_screen = ErrorScreen::new()?;
            error_screen.show_error(&error_message)?;
            error_screen.cleanup()?;
            return Err(anyhow::anyhow!("Configuration error: {err}"));
        }
    };

    tracing::info!(
        "Configuration loaded: recorder command={}, args={:?}",
        config.recorder.command,
        config.recorder.args
    );

    let recorder = match ProcessRecorder::spawn(&config.recorder) {
        Ok(recorder) => recorder,
        Err(e) => {
            tracing::error!("Failed to start recorder backend: {e}");
            let error_message = format!(
                "Recorder Backend Error:\n\n{e}\n\nPlease check the [recorder] section of your configuration and try again."
            );
            let mut error_screen = ErrorScreen::new()?;
            error_screen.show_error(&error_message)?;
            error_screen.cleanup()?;
            return Err(e);
        }
    };

    let mut controller = SessionController::new(Box::new(recorder));
    let mut panel = RecorderPanel::new(config.panel.session_id_prefix_len)?;

    // SIGUSR1 toggles recording so scripts and hotkey daemons can drive the
    // panel: start when idle, stop when a session is live.
    let toggle = Arc::new(std::sync::atomic::AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGUSR1, Arc::clone(&toggle))
        .map_err(|e| anyhow::anyhow!("Failed to register signal handler: {e}"))?;

    loop {
        if toggle.swap(false, Ordering::Relaxed) {
            if controller.state().is_recording() {
                tracing::info!("Received SIGUSR1: stopping recording");
                controller.stop().await;
            } else {
                tracing::info!("Received SIGUSR1: starting recording");
                controller.start().await;
            }
        }

        controller.tick(Instant::now());

        match panel.handle_input() {
            Ok(PanelCommand::Continue) => {}
            Ok(PanelCommand::Start) => controller.start().await,
            Ok(PanelCommand::TogglePause) => controller.toggle_pause().await,
            Ok(PanelCommand::Stop) => controller.stop().await,
            Ok(PanelCommand::Quit) => break,
            Err(e) => {
                tracing::error!("Input handling error: {e}");
                return Err(anyhow::anyhow!("Input handling error: {e}"));
            }
        }

        panel.render(controller.state(), controller.last_error())?;
    }

    // Leaving the panel with a live session stops it best-effort; the
    // backend owns the artifacts either way.
    if controller.state().is_recording() {
        tracing::info!("Panel closing with a live session, stopping it");
        controller.stop().await;
        if let Some(err) = controller.last_error() {
            tracing::warn!("Could not stop session on exit: {err}");
        }
    }

    panel.cleanup()?;
    tracing::info!("=== focusrec control panel exited ===");
    Ok(())
}
