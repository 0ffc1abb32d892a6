use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::structure::RenderFormat;

#[derive(Parser, Debug)]
#[command(
    name = "pdfmd",
    version,
    about = "Extract PDF text and rebuild headings, anchors and a table of contents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract every PDF in a directory and save the rendered text.
    Extract(ExtractArgs),
    /// Render an already-extracted text file.
    Render(RenderArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Directory to scan for PDFs.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Max raw characters to print per file (0 = suppress).
    #[arg(long, default_value_t = 0)]
    pub max_chars: usize,

    /// Only process PDFs with this exact file name.
    #[arg(long = "name")]
    pub names: Vec<String>,

    /// Output directory (default: <DIRECTORY>/extracted_text).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Md)]
    pub format: OutputFormat,

    /// Also write a combined file of all PDFs.
    #[arg(long, default_value_t = false)]
    pub combined: bool,

    /// JSON file extending the ToC labels and section titles.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Write a JSON run manifest to this path.
    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Extracted text file, or `-` for stdin.
    pub input: PathBuf,

    /// Document name used in the preamble (default: input file name).
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Md)]
    pub format: OutputFormat,

    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Md,
    Txt,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Md => "md",
            Self::Txt => "txt",
        }
    }

    pub fn render_format(self) -> RenderFormat {
        match self {
            Self::Md => RenderFormat::Structured,
            Self::Txt => RenderFormat::Plain,
        }
    }
}
