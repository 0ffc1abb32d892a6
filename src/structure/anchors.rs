use std::collections::{HashMap, HashSet};

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

use super::headings::Heading;

const FALLBACK_SLUG: &str = "section";

pub type AnchorMap = HashMap<usize, String>;

/// Converts heading text into a URL-safe slug.
pub fn slugify(text: &str) -> String {
    let stripped = text
        .nfkd()
        .filter(|ch| canonical_combining_class(*ch) == 0)
        .collect::<String>()
        .to_lowercase()
        .replace('&', " and ");

    let mut slug = String::with_capacity(stripped.len());
    for ch in stripped.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Assigns anchors in discovery order; repeated slugs become `base-2`, `base-3`, ...
pub fn allocate_anchors(headings: &[Heading]) -> AnchorMap {
    let mut occurrences = HashMap::<String, usize>::new();
    let mut issued = HashSet::<String>::new();
    let mut anchors = AnchorMap::with_capacity(headings.len());

    for heading in headings {
        let base = slugify(&heading.text);
        let count = occurrences.entry(base.clone()).or_insert(0);

        let mut anchor = next_candidate(&base, count);
        while issued.contains(&anchor) {
            anchor = next_candidate(&base, count);
        }

        issued.insert(anchor.clone());
        anchors.insert(heading.line, anchor);
    }

    anchors
}

fn next_candidate(base: &str, count: &mut usize) -> String {
    *count += 1;
    if *count == 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, count)
    }
}
