//! Renderer module: trait-based format dispatch.

pub mod format;
pub mod html;
pub mod json;

use crate::model::DocumentModel;
use anyhow::{anyhow, Result};

/// One output file produced by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// File name relative to the output directory.
    pub file_name: String,
    pub contents: String,
}

/// Trait for rendering a finished DocumentModel into a specific output format.
pub trait Renderer {
    fn render(&self, model: &DocumentModel) -> Vec<Page>;
    fn name(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "html" | "htm" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use html or json", format)),
    }
}
