//! The namer chat plugin.
//!
//! Receives messages from the chat host (either backend), recognises the
//! `{prefix}-help` and `{prefix}-peek` commands and answers through a
//! [`MessagingPort`].

use std::sync::Arc;

use namer_core::{
    config::Config,
    messaging::{port::MessagingPort, types::IncomingMessage},
    Result,
};

pub mod commands;
mod handlers;

use commands::{parse_command, Command};

/// Plugin version shown in help output.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct NamerPlugin {
    cfg: Arc<Config>,
    messenger: Arc<dyn MessagingPort>,
}

impl NamerPlugin {
    pub fn new(cfg: Arc<Config>, messenger: Arc<dyn MessagingPort>) -> Self {
        Self { cfg, messenger }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Handle one inbound message. Returns whether the plugin answered it.
    pub async fn on_message(&self, msg: &IncomingMessage) -> Result<bool> {
        if msg.is_reply || msg.is_from_self {
            return Ok(false);
        }

        let Some(cmd) = parse_command(&msg.content, &self.cfg.command_prefix) else {
            return Ok(false);
        };

        tracing::debug!(
            backend = %msg.backend,
            room = %msg.room_id.0,
            sender = %msg.sender_name,
            command = ?cmd,
            "dispatching namer command"
        );

        match cmd {
            Command::Help => handlers::help::handle_help(self, msg).await?,
            Command::Peek { body } => handlers::peek::handle_peek(self, msg, body).await?,
        }
        Ok(true)
    }

    pub(crate) fn messenger(&self) -> &Arc<dyn MessagingPort> {
        &self.messenger
    }
}
