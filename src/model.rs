use serde::{Deserialize, Serialize};

/// Overrides for the heading detection tables, loaded from `--rules`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub toc_labels: Vec<String>,
    #[serde(default)]
    pub section_titles: Vec<String>,
    #[serde(default)]
    pub replace_defaults: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    pub filename: String,
    pub sha256: String,
    pub extracted_chars: usize,
    pub extraction_failed: bool,
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionRunManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub output_directory: String,
    pub format: String,
    pub document_count: usize,
    pub failed_count: usize,
    pub combined_path: Option<String>,
    pub documents: Vec<ExtractedDocument>,
}
