//! Structure recovery for text extracted from page-oriented documents.
//!
//! The pipeline is normalize → locate ToC → classify headings → allocate
//! anchors → render. Every stage is a pure function of its inputs.

mod anchors;
mod headings;
mod markdown;
mod normalize;
mod rules;
#[cfg(test)]
mod tests;
mod toc;

pub use anchors::{AnchorMap, allocate_anchors, slugify};
pub use headings::{Heading, classify_headings};
pub use markdown::render_markdown;
pub use normalize::{normalize_text, split_lines};
pub use rules::HeadingRules;
pub use toc::{TocSpan, locate_toc};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RenderFormat {
    /// Normalization, heading detection, anchors and a generated ToC.
    Structured,
    /// Normalization only.
    Plain,
}

pub fn render(text: &str, document_name: &str, format: RenderFormat, rules: &HeadingRules) -> String {
    let normalized = normalize_text(text);
    match format {
        RenderFormat::Structured => render_markdown(&normalized, document_name, rules),
        RenderFormat::Plain => normalized,
    }
}
