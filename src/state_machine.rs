//! Conversation command state machine
//!
//! Pure transitions from (mode, event) to (mode, effects). The dispatcher
//! owns all I/O and feeds provider outcomes back in as events.

mod effect;
mod event;
pub mod replies;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, Keyboard};
pub use event::Event;
pub use state::Mode;
pub use transition::{transition, TransitionResult};
