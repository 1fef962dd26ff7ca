//! Recording session tracking for focusrec.
//!
//! Holds the client-side session state machine and the one-second duration
//! clock that advances it. The view renders from this state and never
//! mutates it directly.

pub mod clock;
pub mod controller;
pub mod state;

pub use controller::SessionController;
pub use state::SessionState;
