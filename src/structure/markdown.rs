use tracing::debug;

use super::anchors::{AnchorMap, allocate_anchors, slugify};
use super::headings::{Heading, MAX_LEVEL, MIN_LEVEL, classify_headings};
use super::rules::HeadingRules;
use super::toc::{TocSpan, locate_toc};

const PROVENANCE_NOTE: &str = "> Extracted via pdftotext; formatting may differ from the original.";

/// Renders normalized text as Markdown with anchored headings and a generated ToC.
pub fn render_markdown(normalized: &str, document_name: &str, rules: &HeadingRules) -> String {
    let header = [
        format!("# {} (extracted)", document_name),
        String::new(),
        PROVENANCE_NOTE.to_string(),
        String::new(),
        "---".to_string(),
        String::new(),
    ];

    let mut rendered = header.join("\n");
    rendered.push_str(&transform(normalized, rules));
    rendered
}

fn transform(normalized: &str, rules: &HeadingRules) -> String {
    let lines = normalized.lines().collect::<Vec<&str>>();

    let toc = locate_toc(&lines, rules);
    let headings = classify_headings(&lines, toc, rules);
    let anchors = allocate_anchors(&allocation_order(&lines, toc, &headings));

    debug!(
        lines = lines.len(),
        headings = headings.len(),
        toc_start = ?toc.map(|span| span.start),
        toc_end = ?toc.map(|span| span.end),
        "classified document structure"
    );

    let mut out = Vec::<String>::with_capacity(lines.len() + headings.len() * 2);
    let mut heading_iter = headings.iter().peekable();
    let mut index = 0usize;

    while index < lines.len() {
        if let Some(span) = toc.filter(|span| span.start == index) {
            let label = lines[index].trim();
            out.push(anchor_marker(&anchor_for(&anchors, index, label)));
            out.push(heading_line(MIN_LEVEL, label));
            out.extend(build_toc_lines(&headings, &anchors, rules));
            index = span.end;
            continue;
        }

        while heading_iter.next_if(|heading| heading.line < index).is_some() {}

        if let Some(heading) = heading_iter.next_if(|heading| heading.line == index) {
            out.push(anchor_marker(&anchor_for(&anchors, index, &heading.text)));
            out.push(heading_line(heading.level, &heading.text));
        } else {
            out.push(lines[index].to_string());
        }
        index += 1;
    }

    let mut transformed = out.join("\n").trim().to_string();
    transformed.push('\n');
    transformed
}

/// Headings plus the ToC label line, in line order, so the label's anchor is
/// allocated like any other and cannot collide.
fn allocation_order(lines: &[&str], toc: Option<TocSpan>, headings: &[Heading]) -> Vec<Heading> {
    let mut ordered = headings.to_vec();
    if let Some(span) = toc {
        let position = ordered.partition_point(|heading| heading.line < span.start);
        ordered.insert(
            position,
            Heading {
                line: span.start,
                level: MIN_LEVEL,
                text: lines[span.start].trim().to_string(),
            },
        );
    }
    ordered
}

fn build_toc_lines(headings: &[Heading], anchors: &AnchorMap, rules: &HeadingRules) -> Vec<String> {
    let mut lines = headings
        .iter()
        .filter(|heading| !rules.is_toc_label(&heading.text))
        .filter(|heading| (MIN_LEVEL..=MAX_LEVEL).contains(&heading.level))
        .map(|heading| {
            format!(
                "{}- [{}](#{})",
                "  ".repeat(usize::from(heading.level - MIN_LEVEL)),
                heading.text,
                anchor_for(anchors, heading.line, &heading.text)
            )
        })
        .collect::<Vec<String>>();
    lines.push(String::new());
    lines
}

fn anchor_for(anchors: &AnchorMap, line: usize, text: &str) -> String {
    anchors.get(&line).cloned().unwrap_or_else(|| slugify(text))
}

fn anchor_marker(anchor: &str) -> String {
    format!("<a id=\"{}\"></a>", anchor)
}

fn heading_line(level: u8, text: &str) -> String {
    let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
    format!("{} {}", "#".repeat(usize::from(level)), text)
}
