use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;

const COMBINED_STEM: &str = "combined_extracted";

pub fn build_output_path(pdf_path: &Path, out_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_dir.join(format!("{}.{}", stem, format.as_str()))
}

pub fn combined_path(out_dir: &Path, format: OutputFormat) -> PathBuf {
    out_dir.join(format!("{}.{}", COMBINED_STEM, format.as_str()))
}

pub fn combined_separator() -> String {
    format!("\n\n{}\n\n", "#".repeat(80))
}

/// Markdown parts already carry their own preamble; text parts get a file banner.
pub fn combined_part(document_name: &str, rendered: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Md => rendered.to_string(),
        OutputFormat::Txt => format!("FILE: {}\n\n{}", document_name, rendered),
    }
}

pub fn preview(text: &str, max_chars: usize) -> String {
    let head = text.chars().take(max_chars).collect::<String>();
    let truncated = text.chars().nth(max_chars).is_some();
    format!(
        "\nPreview (first {} chars):\n{}{}",
        max_chars,
        head,
        if truncated { "\n[...truncated...]" } else { "" }
    )
}
