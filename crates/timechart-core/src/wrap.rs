// File: crates/timechart-core/src/wrap.rs
// Summary: Greedy word wrapping of axis labels against a pixel width budget.

use crate::text::TextMeasure;

/// Split `text` at whitespace into lines no wider than `max_width` where possible.
///
/// Words are appended to the current line until the next one would overflow it.
/// A single word wider than the budget still gets a line of its own.
pub fn wrap_words(text: &str, max_width: f32, size: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure.width(&candidate, size) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
