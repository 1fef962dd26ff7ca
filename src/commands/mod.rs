//! Application command handlers for focusrec.
//!
//! This module organizes command handling into separate submodules, each
//! responsible for a specific application command.
//!
//! # Commands
//! - `panel`: Recording control panel (default)
//! - `config`: Open configuration file in user's preferred editor
//! - `logs`: Display recent log entries

pub mod config;
pub mod logs;
pub mod panel;

pub use config::handle_config;
pub use logs::handle_logs;
pub use panel::handle_panel;
