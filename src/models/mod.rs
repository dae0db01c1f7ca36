//! Evolution API model types.

mod instance;
mod message;

pub use instance::*;
pub use message::*;
