use namer_core::{messaging::types::IncomingMessage, peek::peek, Result};

use crate::{commands::peek_command, NamerPlugin, PLUGIN_VERSION};

use super::send_reply;

pub(crate) fn usage_hint(prefix: &str) -> String {
    let peek = peek_command(prefix);
    format!("请使用 {peek} 命令，然后换行输入名字，例如：\n{peek}\n张三\n李四\n王五")
}

pub(crate) async fn handle_peek(
    plugin: &NamerPlugin,
    msg: &IncomingMessage,
    body: Option<&str>,
) -> Result<()> {
    let cfg = plugin.config();

    let Some(body) = body else {
        return send_reply(plugin, msg, &usage_hint(&cfg.command_prefix)).await;
    };

    let report = peek(body, cfg.use_bonus);
    for (index, raw) in report.failures() {
        tracing::warn!(index, raw, "name could not be parsed");
    }

    send_reply(plugin, msg, &report.render(PLUGIN_VERSION)).await
}
