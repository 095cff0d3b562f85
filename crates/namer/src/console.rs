use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use namer_core::{
    domain::MessageId,
    messaging::{
        port::MessagingPort,
        types::{MessagingCapabilities, OutgoingMessage},
    },
    Result,
};

/// Messenger that prints every outgoing message to stdout.
pub struct ConsoleMessenger {
    out: Mutex<Stdout>,
    next_id: AtomicU64,
}

impl ConsoleMessenger {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for ConsoleMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagingPort for ConsoleMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            supports_reply: false,
            max_message_len: usize::MAX,
        }
    }

    async fn send_message(&self, msg: &OutgoingMessage) -> Result<MessageId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut out = self.out.lock().await;
        out.write_all(msg.content.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
        Ok(MessageId(format!("console-{id}")))
    }
}
