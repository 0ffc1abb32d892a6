use super::rules::HeadingRules;

/// Half-open line range `[start, end)` covering an existing table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocSpan {
    pub start: usize,
    pub end: usize,
}

impl TocSpan {
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Finds the first ToC label line and the leader-dot entries that follow it.
///
/// Later label lines are left for the classifier as ordinary headings.
pub fn locate_toc(lines: &[&str], rules: &HeadingRules) -> Option<TocSpan> {
    let start = lines.iter().position(|line| rules.is_toc_label(line))?;
    let end = toc_entries_end(lines, start + 1, rules);
    Some(TocSpan { start, end })
}

fn toc_entries_end(lines: &[&str], from: usize, rules: &HeadingRules) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| !line.trim().is_empty() && !rules.is_toc_entry(line))
        .map(|(index, _)| index)
        .unwrap_or(lines.len())
}
