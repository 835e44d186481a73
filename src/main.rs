//! docgen: generate HTML (or JSON) documentation from `/*: ... */` comment
//! blocks in C/C++ sources.
//!
//! - **file mode**: `docgen -o docs src/*.h src/*.cc`
//! - **stdin mode**: `docgen < widget.h` writes every page to stdout

use anyhow::{Context, Result};
use clap::Parser;
use docgen::render::{self, Page};
use docgen::{parse_file, parse_source, DocGenError, DocumentModel};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "docgen",
    about = "Extract documentation from /*: ... */ comment blocks in C/C++ sources"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: html (default), json
    #[arg(short = 'f', long, default_value = "html")]
    format: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "docgen=warn".into()))
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    let cli = Cli::parse();
    let renderer = render::create_renderer(&cli.format)?;

    if cli.files.is_empty() {
        return stdin_mode(renderer.as_ref());
    }

    file_mode(&cli, renderer.as_ref())
}

/// stdin mode: parse stdin, write every rendered page to stdout.
fn stdin_mode(renderer: &dyn render::Renderer) -> Result<()> {
    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .context("failed to read stdin")?;

    let mut model = DocumentModel::new();
    for err in parse_source(&mut model, &String::from_utf8_lossy(&input)) {
        tracing::warn!("syntax error at {}", err);
    }

    let mut stdout = io::stdout().lock();
    for page in renderer.render(&model) {
        stdout
            .write_all(page.contents.as_bytes())
            .context("failed to write stdout")?;
    }
    Ok(())
}

/// file mode: parse every input into one model, write pages to the output directory.
fn file_mode(cli: &Cli, renderer: &dyn render::Renderer) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    let input_files = expand_inputs(&cli.files);

    let mut model = DocumentModel::new();
    for path in &input_files {
        match parse_file(&mut model, path) {
            Ok(_) => {}
            Err(e @ DocGenError::FileNotFound { .. }) => {
                tracing::warn!("{}; continuing with next input file", e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let pages = renderer.render(&model);
    tracing::debug!(format = renderer.name(), pages = pages.len(), "rendered");
    write_pages(output_dir, &pages)?;
    Ok(())
}

/// Write rendered pages, creating the output directory if needed.
fn write_pages(output_dir: &Path, pages: &[Page]) -> Result<(), DocGenError> {
    fs::create_dir_all(output_dir).map_err(|source| DocGenError::System {
        path: output_dir.to_path_buf(),
        source,
    })?;

    for page in pages {
        let out_path = output_dir.join(&page.file_name);
        fs::write(&out_path, &page.contents).map_err(|source| DocGenError::System {
            path: out_path.clone(),
            source,
        })?;
        tracing::debug!(file = %out_path.display(), "wrote page");
    }
    Ok(())
}

/// File extensions recognized as C/C++ sources when scanning a directory.
const SUPPORTED_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx", "c", "cc", "cpp", "cxx"];

/// Expand input arguments into a list of paths.
///
/// Existing files are taken as is, directories are scanned (non-recursively)
/// for supported extensions, anything else is tried as a glob pattern. A
/// pattern that is invalid or matches nothing is kept as a path, so it is
/// reported as a missing file and skipped like any unreadable input.
fn expand_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            match fs::read_dir(path) {
                Ok(entries) => {
                    for entry in entries.flatten() {
                        let p = entry.path();
                        if p.is_file() && has_supported_extension(&p) {
                            files.push(p);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("cannot read directory {}: {}; skipping", path.display(), e);
                }
            }
            continue;
        }
        let matches: Vec<_> = match glob::glob(pattern) {
            Ok(paths) => paths
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect(),
            Err(e) => {
                tracing::debug!(pattern = %pattern, "not a glob pattern: {}", e);
                Vec::new()
            }
        };
        if matches.is_empty() {
            files.push(path.to_path_buf());
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    files
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
