/// Split `text` into chunks of at most `limit` bytes, preferring line boundaries.
///
/// A single line longer than `limit` is cut at char boundaries.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(4);
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        let needed = if current.is_empty() {
            line.len()
        } else {
            current.len() + 1 + line.len()
        };
        if needed <= limit {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        let mut rest = line;
        while rest.len() > limit {
            let mut cut = limit;
            while !rest.is_char_boundary(cut) {
                cut -= 1;
            }
            chunks.push(rest[..cut].to_string());
            rest = &rest[cut..];
        }
        current.push_str(rest);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_message("a\nb", 100), vec!["a\nb".to_string()]);
    }

    #[test]
    fn splits_on_lines_under_limit() {
        let text = (0..20).map(|i| format!("line {i:02}")).collect::<Vec<_>>().join("\n");
        let chunks = split_message(&text, 30);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= 30));
        assert_eq!(chunks.join("\n"), text);
    }

    #[test]
    fn hard_splits_long_lines_on_char_boundaries() {
        let text = "名".repeat(20); // 60 bytes
        let chunks = split_message(&text, 10);
        assert!(chunks.iter().all(|c| c.len() <= 10));
        assert_eq!(chunks.concat(), text);
    }
}
