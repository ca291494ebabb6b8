//! Request handlers.

pub mod health;
pub mod transcribe;
pub mod youtube;

pub use health::*;
pub use transcribe::*;
pub use youtube::*;
