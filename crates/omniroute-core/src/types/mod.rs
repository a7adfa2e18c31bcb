//! Core types for Omniroute.

mod channel;
mod message;
mod preferences;

pub use channel::*;
pub use message::*;
pub use preferences::*;
