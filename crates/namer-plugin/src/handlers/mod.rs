//! Command handlers.
//!
//! Each handler builds its reply text and hands it to [`send_reply`], which
//! splits it to the messenger's limits.

use namer_core::{
    messaging::{split::split_message, types::IncomingMessage},
    Result,
};

use crate::NamerPlugin;

pub(crate) mod help;
pub(crate) mod peek;

/// Reply to `msg`, splitting long text. Only the first chunk quotes the original.
pub(crate) async fn send_reply(
    plugin: &NamerPlugin,
    msg: &IncomingMessage,
    text: &str,
) -> Result<()> {
    let caps = plugin.messenger().capabilities();
    let limit = plugin.config().message_limit.min(caps.max_message_len);

    for (i, chunk) in split_message(text, limit).into_iter().enumerate() {
        let mut out = msg.reply_with(chunk);
        if i > 0 || !caps.supports_reply {
            out.reply_to = None;
        }
        if let Err(e) = plugin.messenger().send_message(&out).await {
            tracing::warn!(room = %out.room_id.0, chunk = i, "failed to send reply: {e}");
            return Err(e);
        }
    }
    Ok(())
}
