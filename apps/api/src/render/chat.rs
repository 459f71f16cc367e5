use crate::models::chat::{ChatMessage, Sender};

/// Cleans a chat reply for display: drops `"` and `/`, unwraps `**bold**`
/// markers and starts a new line after every sentence-ending period.
pub fn format_reply(text: &str) -> String {
    let cleaned: String = text.chars().filter(|c| !matches!(c, '"' | '/')).collect();
    break_sentences(&strip_bold(&cleaned))
}

fn strip_bold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        match after_open.find("**") {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push_str(&after_open[..close]);
                rest = &after_open[close + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn break_sentences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '.' {
            match chars.peek() {
                Some(next) if next.is_whitespace() => {
                    chars.next();
                    out.push('\n');
                }
                None => out.push('\n'),
                _ => {}
            }
        }
    }
    out.trim_end().to_string()
}

/// One line per bubble, with the reply text formatted for display.
pub fn transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| match m.sender {
            Sender::User => format!("you> {}", m.text),
            Sender::Ai => format!("ai>  {}", format_reply(&m.text).replace('\n', "\n     ")),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
