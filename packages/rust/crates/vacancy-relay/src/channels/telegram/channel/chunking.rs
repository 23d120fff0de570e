use super::constants::TELEGRAM_MAX_MESSAGE_LENGTH;

/// Split a message into chunks of at most 4096 characters.
///
/// Whole lines are packed greedily; a single line over the limit is cut at its last space
/// before the limit, or hard at the limit when it has none.
pub fn split_message_for_telegram(message: &str) -> Vec<String> {
    if message.chars().count() <= TELEGRAM_MAX_MESSAGE_LENGTH {
        return vec![message.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for line in message.split_inclusive('\n') {
        let line_len = line.chars().count();
        if current_len + line_len > TELEGRAM_MAX_MESSAGE_LENGTH && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len <= TELEGRAM_MAX_MESSAGE_LENGTH {
            current.push_str(line);
            current_len += line_len;
            continue;
        }
        let mut rest = line;
        while rest.chars().count() > TELEGRAM_MAX_MESSAGE_LENGTH {
            let cut = cut_long_line(rest);
            chunks.push(rest[..cut].to_string());
            rest = &rest[cut..];
        }
        current.push_str(rest);
        current_len = rest.chars().count();
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Byte index to cut an over-long line at.
fn cut_long_line(line: &str) -> usize {
    let limit = line
        .char_indices()
        .nth(TELEGRAM_MAX_MESSAGE_LENGTH)
        .map_or(line.len(), |(index, _)| index);
    match line[..limit].rfind(' ') {
        Some(space) if space > 0 => space + 1,
        _ => limit,
    }
}
