use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::warn;

/// Text returned by the extraction backend for one PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExtraction {
    pub text: String,
    /// Set when `text` is an error marker rather than document content.
    pub failed: bool,
}

pub fn discover_pdfs(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();

    let entries = fs::read_dir(directory)
        .with_context(|| format!("failed to read {}", directory.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", directory.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            pdfs.push(path);
        }
    }

    pdfs.sort();
    Ok(pdfs)
}

/// Extracts the text layer, turning any failure into an in-band error marker.
pub fn extract_text(pdf_path: &Path) -> RawExtraction {
    match extract_text_with_pdftotext(pdf_path) {
        Ok(text) => RawExtraction {
            text,
            failed: false,
        },
        Err(error) => {
            warn!(path = %pdf_path.display(), error = %error, "text extraction failed");
            RawExtraction {
                text: error_marker(pdf_path, &error),
                failed: true,
            }
        }
    }
}

pub fn error_marker(pdf_path: &Path, error: &anyhow::Error) -> String {
    let name = pdf_path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| pdf_path.to_string_lossy());
    format!("[ERROR] Could not extract text from {}: {}\n", name, error)
}

fn extract_text_with_pdftotext(pdf_path: &Path) -> Result<String> {
    let output = Command::new("pdftotext")
        .arg("-enc")
        .arg("UTF-8")
        .arg(pdf_path)
        .arg("-")
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).replace('\u{0000}', ""))
}
