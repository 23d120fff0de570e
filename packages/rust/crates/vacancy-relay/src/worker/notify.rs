//! Chat-facing text for queries and vacancy notifications (Telegram HTML).

use vacancy_store::Query;

use crate::search::Vacancy;

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// `Found new vacancy for <i>{text}</i> with experience <i>{label}</i>:` then title and link.
pub fn format_vacancy_notification(query: &Query, vacancy: &Vacancy) -> String {
    let mut message = format!(
        "Found new vacancy for <i>{}</i> with experience <i>{}</i>:\n",
        escape_html(&query.text),
        query.experience.label()
    );
    if !vacancy.name.trim().is_empty() {
        message.push_str(&escape_html(vacancy.name.trim()));
        message.push('\n');
    }
    message.push_str(&vacancy.url());
    message
}

/// One listing line, `position` being the 1-based display id.
pub fn format_query_line(position: usize, query: &Query) -> String {
    format!(
        "{position} – area: {}, role: {}, text: {}, experience: {}",
        query.area,
        query.role,
        escape_html(&query.text),
        query.experience.label()
    )
}
