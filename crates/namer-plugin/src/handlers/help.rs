use namer_core::{display::ENGINE_VERSION, messaging::types::IncomingMessage, Result};

use crate::{
    commands::{help_command, peek_command},
    NamerPlugin, PLUGIN_VERSION,
};

use super::send_reply;

pub(crate) fn help_text(prefix: &str) -> String {
    let help = help_command(prefix);
    let peek = peek_command(prefix);
    format!(
        "namer-v[{PLUGIN_VERSION}]\n\
         名字竞技场 名字属性查看\n\
         \n\
         - {help} - 查看帮助\n\
         - {peek} - 查看名字的属性, 命令后换行, 每一行一个名字\n\
         \x20   - 名字@队伍 的格式同样适用\n\
         引擎版本: {ENGINE_VERSION}"
    )
}

pub(crate) async fn handle_help(plugin: &NamerPlugin, msg: &IncomingMessage) -> Result<()> {
    let text = help_text(&plugin.config().command_prefix);
    send_reply(plugin, msg, &text).await
}
