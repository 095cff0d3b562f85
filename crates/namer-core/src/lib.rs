//! Core logic for the namer chat plugin.
//!
//! The name engine, its display tables and the batch "peek" report live here,
//! together with the messaging ports the plugin talks through. Nothing in this
//! crate knows about a concrete chat backend; adapters implement the ports.

pub mod config;
pub mod display;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod peek;

pub use errors::{Error, Result};
