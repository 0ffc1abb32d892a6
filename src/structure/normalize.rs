const MAX_BLANK_RUN: usize = 2;

/// Right-trims every line, caps blank runs at two and trims the document.
///
/// The result always ends with exactly one `\n`, so `""` becomes `"\n"`.
pub fn normalize_text(text: &str) -> String {
    let mut out_lines = Vec::<&str>::new();
    let mut blank_streak = 0usize;

    for line in split_lines(text) {
        let line = line.trim_end();
        if line.is_empty() {
            blank_streak += 1;
            if blank_streak <= MAX_BLANK_RUN {
                out_lines.push("");
            }
        } else {
            blank_streak = 0;
            out_lines.push(line);
        }
    }

    let mut normalized = out_lines.join("\n").trim().to_string();
    normalized.push('\n');
    normalized
}

/// Splits on every line boundary a text-layer extractor may emit,
/// including the form feed used between pages.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if !is_line_boundary(ch) {
            continue;
        }

        lines.push(&text[start..index]);
        let mut end = index + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next_index, '\n')) = chars.peek() {
                chars.next();
                end = next_index + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

fn is_line_boundary(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{001C}'
            | '\u{001D}'
            | '\u{001E}'
            | '\u{0085}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
