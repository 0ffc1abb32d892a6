use std::collections::BTreeSet;

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::RulesConfig;

const DEFAULT_TOC_LABELS: &[&str] = &["table of contents", "sisällys", "sisallys"];

const DEFAULT_SECTION_TITLES: &[&str] = &[
    "objective",
    "purpose & scope",
    "workflows",
    "users, roles, and ui permissions",
    "core experiences",
    "navigation, routing, and flow",
    "data fetching & state",
    "ux quality bars",
    "security & compliance in the ui",
    "telemetry & diagnostics (front-end events)",
    "acceptance criteria (sampling)",
    "open questions",
    "editor api",
    "document list api",
    "document preview api",
    "capabilities & attachments",
    "capabilities",
    "attachments",
    "tags",
    "rules & validation (server-enforced)",
    "auth roles",
    "errors",
];

const BULLET_PREFIXES: &[&str] = &["•", "o ", "▪", "- "];

/// Immutable detection tables shared by the locator and the classifier.
#[derive(Debug, Clone)]
pub struct HeadingRules {
    toc_labels: BTreeSet<String>,
    section_titles: BTreeSet<String>,
    numeric_heading: Regex,
    toc_entry: Regex,
}

impl HeadingRules {
    pub fn new() -> Result<Self> {
        Ok(Self {
            toc_labels: DEFAULT_TOC_LABELS.iter().map(|label| label.to_string()).collect(),
            section_titles: DEFAULT_SECTION_TITLES
                .iter()
                .map(|title| title.to_string())
                .collect(),
            numeric_heading: Regex::new(r"^(\d+(?:\.\d+){0,3})\s+(.+)$")
                .context("failed to compile numeric heading regex")?,
            toc_entry: Regex::new(r"\.{2,}\s*\d+\s*$")
                .context("failed to compile table-of-contents entry regex")?,
        })
    }

    pub fn from_config(config: &RulesConfig) -> Result<Self> {
        let mut rules = Self::new()?;
        if config.replace_defaults {
            rules.toc_labels.clear();
            rules.section_titles.clear();
        }

        rules.toc_labels.extend(
            config
                .toc_labels
                .iter()
                .map(|label| normalize_label(label))
                .filter(|label| !label.is_empty()),
        );
        rules.section_titles.extend(
            config
                .section_titles
                .iter()
                .map(|title| normalize_label(title))
                .filter(|title| !title.is_empty()),
        );

        Ok(rules)
    }

    pub fn is_toc_label(&self, line: &str) -> bool {
        self.toc_labels.contains(&normalize_label(line))
    }

    pub fn is_section_title(&self, line: &str) -> bool {
        self.section_titles.contains(&normalize_label(line))
    }

    pub fn is_toc_entry(&self, line: &str) -> bool {
        self.toc_entry.is_match(line.trim())
    }

    /// Returns the heading level for lines like `2.1.3 Something`.
    pub fn numeric_heading_level(&self, line: &str) -> Option<u8> {
        let captures = self.numeric_heading.captures(line)?;
        let segments = captures.get(1)?.as_str().split('.').count();
        Some((1 + segments).min(6) as u8)
    }

    pub fn toc_label_count(&self) -> usize {
        self.toc_labels.len()
    }

    pub fn section_title_count(&self) -> usize {
        self.section_titles.len()
    }
}

pub fn is_bullet(line: &str) -> bool {
    BULLET_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

fn normalize_label(input: &str) -> String {
    input.trim().to_lowercase()
}
