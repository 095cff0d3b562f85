/// A recognised plugin command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    /// Everything after the command word; `None` when the message has no newline.
    Peek { body: Option<&'a str> },
}

pub fn help_command(prefix: &str) -> String {
    format!("{prefix}-help")
}

pub fn peek_command(prefix: &str) -> String {
    format!("{prefix}-peek")
}

/// Recognise a command in raw message text.
///
/// Help must match exactly; peek only needs the prefix, the names follow on
/// the next lines.
pub fn parse_command<'a>(content: &'a str, prefix: &str) -> Option<Command<'a>> {
    if content == help_command(prefix) {
        return Some(Command::Help);
    }

    let rest = content.strip_prefix(peek_command(prefix).as_str())?;
    let body = rest.find('\n').map(|idx| &rest[idx + 1..]);
    Some(Command::Peek { body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_requires_exact_match() {
        assert_eq!(parse_command("/namer-help", "/namer"), Some(Command::Help));
        assert_eq!(parse_command("/namer-help me", "/namer"), None);
    }

    #[test]
    fn peek_takes_lines_after_the_first() {
        assert_eq!(
            parse_command("/namer-peek\nAAA\nBBB", "/namer"),
            Some(Command::Peek {
                body: Some("AAA\nBBB")
            })
        );
        assert_eq!(
            parse_command("/namer-peek junk\nAAA", "/namer"),
            Some(Command::Peek { body: Some("AAA") })
        );
        assert_eq!(
            parse_command("/namer-peek AAA", "/namer"),
            Some(Command::Peek { body: None })
        );
    }

    #[test]
    fn unrelated_text_is_ignored() {
        assert_eq!(parse_command("hello", "/namer"), None);
        assert_eq!(parse_command("/namer", "/namer"), None);
        assert_eq!(parse_command("/namerena\nAAA", "/namer"), None);
    }

    #[test]
    fn honours_custom_prefix() {
        assert_eq!(parse_command("/nr-help", "/nr"), Some(Command::Help));
        assert_eq!(parse_command("/namer-help", "/nr"), None);
    }
}
