//! Configuration file editor command.
//!
//! Opens the focusrec configuration file in the user's preferred editor.

use std::process::Command;

use crate::config::get_config_path;

/// Editors tried when neither $VISUAL nor $EDITOR is set.
const FALLBACK_EDITORS: &[&str] = &["nano", "vi"];

/// Opens the focusrec configuration file in the user's preferred editor.
///
/// Honors $VISUAL, then $EDITOR, then falls back to nano and finally vi.
///
/// # Errors
/// - If no editor can be found
/// - If the editor cannot be executed or exits with an error
pub fn handle_config() -> anyhow::Result<()> {
    let config_path = get_config_path()?;
    let editor = find_editor()?;

    tracing::info!(
        "Opening config file {} with {editor}",
        config_path.display()
    );

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to open editor '{editor}': {e}. Make sure the editor is installed and accessible."
            )
        })?;

    if !status.success() {
        return Err(anyhow::anyhow!(
            "Editor exited with error code: {}",
            status.code().unwrap_or(-1)
        ));
    }

    Ok(())
}

/// Finds the best available editor to use.
fn find_editor() -> anyhow::Result<String> {
    for var in ["VISUAL", "EDITOR"] {
        if let Ok(editor) = std::env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    FALLBACK_EDITORS
        .iter()
        .find(|editor| {
            Command::new("which")
                .arg(editor)
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        })
        .map(|editor| editor.to_string())
        .ok_or_else(|| {
            anyhow::anyhow!("No editor found. Please set the $EDITOR environment variable.")
        })
}
