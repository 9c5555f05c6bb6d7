//! Human-readable error rendering: a framed source excerpt with a caret
//! focusing the offending column.

use crate::error::Error;
use crate::source::SourceManager;

/// Renders a diagnostic for `err`, with a source excerpt when the error
/// carries a span:
///
/// ```text
/// error: Undefined variable: y
///  --> demo.zero:2:12
///   |
/// 2 |     return y;
///   |            ^
/// ```
///
/// Errors without a location render the message line only.
pub fn render_error(sm: &SourceManager, err: &Error) -> String {
    let mut out = format!("error: {}\n", err);

    let Some(span) = err.span().filter(|s| s.is_valid()) else {
        return out;
    };

    let (line, col) = sm.get_line_col(span);
    if line == 0 {
        return out;
    }

    let path = sm.get_path(span.source_id);
    let source_line = sm
        .get(span.source_id)
        .map(|file| file.get_line(line))
        .unwrap_or("");

    let indent = (col as usize).saturating_sub(1);
    let pointer = format!("{}^", " ".repeat(indent));
    let line_num = line.to_string();
    let gutter = " ".repeat(line_num.len());

    out.push_str(&format!(" --> {}:{}:{}\n", path, line, col));
    out.push_str(&format!("{} |\n", gutter));
    out.push_str(&format!("{} | {}\n", line_num, source_line));
    out.push_str(&format!("{} | {}\n", gutter, pointer));

    out
}
