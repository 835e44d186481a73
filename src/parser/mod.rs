//! Parser module: tokenizer, comment-block grammar, and per-input entry
//! points.

pub mod grammar;
pub mod lexer;

use crate::error::{DocGenError, SyntaxError};
use crate::model::DocumentModel;
use grammar::CommentBlockParser;
use std::fs;
use std::path::Path;

/// Parse one source text into `model` and return its syntax errors.
pub fn parse_source(model: &mut DocumentModel, source: &str) -> Vec<SyntaxError> {
    CommentBlockParser::new(source, model).run()
}

/// Read and parse one input file into `model`.
///
/// Syntax errors are logged as warnings and returned; they never fail the
/// call. Only an unreadable file does.
pub fn parse_file(model: &mut DocumentModel, path: &Path) -> Result<Vec<SyntaxError>, DocGenError> {
    let bytes = fs::read(path).map_err(|source| DocGenError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    // Old sources are not always UTF-8; keep going with replacement chars.
    let source = String::from_utf8_lossy(&bytes);

    tracing::debug!(file = %path.display(), "parsing");
    let diagnostics = parse_source(model, &source);
    for err in &diagnostics {
        tracing::warn!(file = %path.display(), "syntax error at {}", err);
    }
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_file_accumulates_into_model() {
        let mut header = NamedTempFile::with_suffix(".h").unwrap();
        header
            .write_all(b"/*: Foo::bar\n Note: from header.\n*/\nint bar();\n")
            .unwrap();
        let mut source = NamedTempFile::with_suffix(".cc").unwrap();
        source
            .write_all(b"/*: Foo::bar\n Returns: zero.\n*/\nint Foo::bar() { return 0; }\n")
            .unwrap();

        let mut model = DocumentModel::new();
        parse_file(&mut model, header.path()).unwrap();
        parse_file(&mut model, source.path()).unwrap();

        let class = model.class("Foo").unwrap();
        assert_eq!(class.functions().count(), 1);
        let bar = class.function("bar").unwrap();
        assert_eq!(bar.find("note").count(), 1);
        assert_eq!(bar.find("returns").count(), 1);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let mut model = DocumentModel::new();
        parse_source(&mut model, "/*: class Kept */");
        let err = parse_file(&mut model, Path::new("/nonexistent/docgen/input.h")).unwrap_err();
        assert!(matches!(err, DocGenError::FileNotFound { .. }));
        assert!(model.class("Kept").is_some());
    }

    #[test]
    fn invalid_utf8_is_tolerated() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"/*: class Caf\xe9 */\n/*: class Next */").unwrap();
        let mut model = DocumentModel::new();
        let diags = parse_file(&mut model, file.path()).unwrap();
        assert!(diags.is_empty());
        assert!(model.class("Next").is_some());
    }
}
