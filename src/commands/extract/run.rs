use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use super::output::{
    build_output_path, combined_part, combined_path, combined_separator, preview,
};
use super::source::{RawExtraction, discover_pdfs, extract_text};
use crate::cli::{ExtractArgs, OutputFormat};
use crate::model::{ExtractedDocument, ExtractionRunManifest};
use crate::structure::{HeadingRules, render};
use crate::util::{
    ensure_directory, load_heading_rules, now_utc_string, sha256_file, write_json_pretty,
    write_text_file,
};

#[derive(Debug, Clone)]
pub(super) struct ExtractSettings {
    pub(super) source_dir: PathBuf,
    pub(super) out_dir: PathBuf,
    pub(super) format: OutputFormat,
    pub(super) max_chars: usize,
    pub(super) combined: bool,
}

pub fn run(args: ExtractArgs) -> Result<()> {
    if !args.directory.is_dir() {
        bail!("directory not found: {}", args.directory.display());
    }
    let source_dir = args
        .directory
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", args.directory.display()))?;

    let rules = load_heading_rules(args.rules.as_deref())?;
    info!(
        source = %source_dir.display(),
        toc_labels = rules.toc_label_count(),
        section_titles = rules.section_title_count(),
        "starting extraction"
    );

    let pdfs = select_pdfs(discover_pdfs(&source_dir)?, &args.names);
    if pdfs.is_empty() {
        warn!(source = %source_dir.display(), "no PDF files found");
        return Ok(());
    }

    let settings = ExtractSettings {
        out_dir: args
            .out_dir
            .clone()
            .unwrap_or_else(|| source_dir.join("extracted_text")),
        source_dir,
        format: args.format,
        max_chars: args.max_chars,
        combined: args.combined,
    };

    let manifest = process_documents(&pdfs, &settings, &rules, extract_text)?;

    if let Some(manifest_path) = &args.manifest_path {
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote extraction manifest");
    }

    info!(
        documents = manifest.document_count,
        failed = manifest.failed_count,
        "extraction completed"
    );
    Ok(())
}

/// Keeps only PDFs whose file name is listed; an empty list keeps everything.
pub(super) fn select_pdfs(pdfs: Vec<PathBuf>, names: &[String]) -> Vec<PathBuf> {
    if names.is_empty() {
        return pdfs;
    }

    pdfs.into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| names.iter().any(|wanted| wanted == name))
        })
        .collect()
}

pub(super) fn process_documents<F>(
    pdfs: &[PathBuf],
    settings: &ExtractSettings,
    rules: &HeadingRules,
    extract: F,
) -> Result<ExtractionRunManifest>
where
    F: Fn(&Path) -> RawExtraction,
{
    ensure_directory(&settings.out_dir)?;

    let render_format = settings.format.render_format();
    let mut documents = Vec::with_capacity(pdfs.len());
    let mut combined_parts = Vec::<String>::new();

    for pdf_path in pdfs {
        let document_name = pdf_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("missing file name: {}", pdf_path.display()))?;

        let extraction = extract(pdf_path);
        let contents = render(&extraction.text, &document_name, render_format, rules);
        let output_path = build_output_path(pdf_path, &settings.out_dir, settings.format);
        write_text_file(&output_path, &contents)?;

        let extracted_chars = extraction.text.chars().count();
        info!(
            source = %document_name,
            output = %output_path.display(),
            chars = extracted_chars,
            failed = extraction.failed,
            "saved extracted document"
        );

        if settings.max_chars > 0 {
            println!("{}", preview(&extraction.text, settings.max_chars));
        }

        if settings.combined {
            combined_parts.push(combined_part(&document_name, &contents, settings.format));
        }

        documents.push(ExtractedDocument {
            sha256: sha256_file(pdf_path)?,
            filename: document_name,
            extracted_chars,
            extraction_failed: extraction.failed,
            output_path: output_path.display().to_string(),
        });
    }

    let combined_output = if settings.combined {
        let path = combined_path(&settings.out_dir, settings.format);
        write_text_file(&path, &combined_parts.join(&combined_separator()))?;
        info!(path = %path.display(), "combined file written");
        Some(path.display().to_string())
    } else {
        None
    };

    Ok(ExtractionRunManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: settings.source_dir.display().to_string(),
        output_directory: settings.out_dir.display().to_string(),
        format: settings.format.as_str().to_string(),
        document_count: documents.len(),
        failed_count: documents.iter().filter(|doc| doc.extraction_failed).count(),
        combined_path: combined_output,
        documents,
    })
}
