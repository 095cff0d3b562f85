use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::io::AsyncReadExt;

use namer_core::{
    config::Config,
    domain::{Backend, MessageId, RoomId, UserId},
    messaging::{
        throttled::{ThrottleConfig, ThrottledMessenger},
        types::IncomingMessage,
    },
    peek::peek,
};
use namer_plugin::NamerPlugin;

mod console;

use console::ConsoleMessenger;

const USAGE: &str = "usage: namer [--json] [--bonus] [NAME ...]\n\
                     \n\
                     With names, prints their attributes. Without names, reads one chat\n\
                     message from stdin and answers it like the chat plugin would.";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    json: bool,
    bonus: bool,
    names: Vec<String>,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> anyhow::Result<Option<Args>> {
    let mut args = Args::default();
    for arg in raw {
        match arg.as_str() {
            "--json" => args.json = true,
            "--bonus" => args.bonus = true,
            "-h" | "--help" => return Ok(None),
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            _ => args.names.push(arg),
        }
    }
    Ok(Some(args))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    namer_core::logging::init("namer")?;

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let cfg = Arc::new(Config::load()?);

    if !args.names.is_empty() {
        let report = peek(&args.names.join("\n"), args.bonus || cfg.use_bonus);
        if args.json {
            println!("{}", report.to_json()?);
        } else {
            println!("{}", report.render(namer_plugin::PLUGIN_VERSION));
        }
        return Ok(());
    }

    let mut content = String::new();
    tokio::io::stdin()
        .read_to_string(&mut content)
        .await
        .context("failed to read message from stdin")?;
    let content = content.trim_end_matches(['\r', '\n']).to_string();

    let messenger = Arc::new(ThrottledMessenger::new(
        Arc::new(ConsoleMessenger::new()),
        ThrottleConfig::from(cfg.as_ref()),
    ));
    let plugin = NamerPlugin::new(cfg, messenger);

    let msg = IncomingMessage {
        backend: Backend::Ica,
        room_id: RoomId("console".to_string()),
        message_id: MessageId("stdin".to_string()),
        sender_id: UserId("console".to_string()),
        sender_name: "console".to_string(),
        content,
        is_reply: false,
        is_from_self: false,
    };

    if !plugin.on_message(&msg).await? {
        eprintln!("not a namer command (try `{}-help`)", plugin.config().command_prefix);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_names() {
        let parsed = parse_args(args(&["--json", "AAA", "--bonus", "B@C"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            parsed,
            Args {
                json: true,
                bonus: true,
                names: vec!["AAA".to_string(), "B@C".to_string()],
            }
        );
    }

    #[test]
    fn help_and_unknown_flags() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), None);
        assert!(parse_args(args(&["--nope"])).is_err());
    }
}
