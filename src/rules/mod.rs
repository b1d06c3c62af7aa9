//! Game rules: the selection state machine and win detection.
//!
//! The state machine decides what a click or a fired timer does to the
//! session's `GameState`; the win detector watches the matched count and
//! calls the host back exactly once.

pub mod selection;
pub mod win;

pub use selection::{ClickOutcome, IgnoreReason, SelectionStateMachine};
pub use win::WinDetector;
