//! Core types for roam.

pub mod generation;
pub mod message;
pub mod travel;
pub mod usage;

pub use generation::*;
pub use message::*;
pub use travel::*;
pub use usage::*;
