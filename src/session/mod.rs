//! Session lifecycle: state machine plus its controller.
//!
//! `SessionState` and the pure `reduce` function define the transition
//! contract; `SessionController` is the imperative shell that performs the
//! network I/O and feeds the outcomes back through `reduce`.

pub mod controller;
pub mod state;

pub use controller::SessionController;
pub use state::{reduce, AuthEvent, SessionState};
