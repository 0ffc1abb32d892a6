use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::RenderArgs;
use crate::structure::render;
use crate::util::{load_heading_rules, write_text_file};

const STDIN_NAME: &str = "stdin";

pub fn run(args: RenderArgs) -> Result<()> {
    let rules = load_heading_rules(args.rules.as_deref())?;
    let text = read_input(&args.input)?;
    let document_name = args
        .name
        .clone()
        .unwrap_or_else(|| default_document_name(&args.input));

    let rendered = render(&text, &document_name, args.format.render_format(), &rules);

    match &args.output {
        Some(path) => {
            write_text_file(path, &rendered)?;
            info!(
                document = %document_name,
                output = %path.display(),
                format = args.format.as_str(),
                "rendered document"
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("failed to write rendered output to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if is_stdin(input) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read text from stdin")?;
        return Ok(text);
    }

    let raw = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

fn default_document_name(input: &Path) -> String {
    if is_stdin(input) {
        return STDIN_NAME.to_string();
    }

    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}
