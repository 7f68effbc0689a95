//! speakscore CLI library.
//!
//! This crate provides the command implementations behind the `speakscore`
//! binary: canonical WAV encoding, header inspection, pronunciation
//! assessment and the WebSocket server.

pub mod commands;
pub mod input;
