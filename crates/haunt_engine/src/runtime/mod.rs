//! Frame loop plumbing
//!
//! [`StartupGate`] keeps the loop closed until the user answers the audio
//! prompt; [`FrameScheduler`] is how a running loop asks for its next tick.

pub mod gate;
pub mod scheduler;

pub use gate::{GateState, StartupChoice, StartupGate};
pub use scheduler::{FrameRequests, FrameScheduler};
