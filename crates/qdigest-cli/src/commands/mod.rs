//! CLI command implementations.

pub mod common;
pub mod hash;
pub mod verify;
