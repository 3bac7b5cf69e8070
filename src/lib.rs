//! Monster-slayer battle engine library.
//!
//! Exposes the battle representation, the turn resolver, the text protocol,
//! and batch simulation for use by integration tests and the binaries.

pub mod autoplay;
pub mod battle;
pub mod engine;
pub mod protocol;
pub mod resolve;
