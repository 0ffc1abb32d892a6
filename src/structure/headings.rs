use super::rules::{HeadingRules, is_bullet};
use super::toc::TocSpan;

pub const MIN_LEVEL: u8 = 2;
pub const MAX_LEVEL: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Index into the normalized line sequence.
    pub line: usize,
    pub level: u8,
    pub text: String,
}

/// Classifies every line outside `toc`; indices stay in the original coordinates.
pub fn classify_headings(
    lines: &[&str],
    toc: Option<TocSpan>,
    rules: &HeadingRules,
) -> Vec<Heading> {
    lines
        .iter()
        .enumerate()
        .filter(|(index, _)| !toc.is_some_and(|span| span.contains(*index)))
        .filter_map(|(index, raw)| {
            let (level, text) = classify_line(raw, rules)?;
            Some(Heading {
                line: index,
                level,
                text,
            })
        })
        .collect()
}

fn classify_line(raw: &str, rules: &HeadingRules) -> Option<(u8, String)> {
    let line = raw.trim();
    if line.is_empty() || is_bullet(line) {
        return None;
    }

    if let Some(level) = rules.numeric_heading_level(line) {
        return Some((level, line.to_string()));
    }

    if rules.is_toc_label(line) || rules.is_section_title(line) {
        return Some((MIN_LEVEL, line.to_string()));
    }

    None
}
