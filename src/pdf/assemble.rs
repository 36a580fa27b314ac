//! Intermediate document assembly.
//!
//! The renderer consumes a markdown file with YAML front matter: the
//! letterhead reference, the request fields, then the raw body text. The file
//! lives in a per-request temporary directory and is deleted when the
//! [`IntermediateDocument`] handle drops, on every exit path.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::models::DocumentRequest;
use super::PdfError;

const INTERMEDIATE_FILE: &str = "details.md";

/// Handle to the assembled intermediate document. Owns the temporary
/// directory backing it.
#[derive(Debug)]
pub struct IntermediateDocument {
    _dir: TempDir,
    pub path: PathBuf,
}

/// Serialize the request into the intermediate document format.
///
/// Fails with [`PdfError::MissingField`] when `to` or `body` is absent; both
/// are required before any filesystem work happens. The body is excluded from
/// the front matter and appended verbatim after the closing delimiter.
pub fn assemble(
    request: &DocumentRequest,
    letterhead: &Path,
) -> Result<IntermediateDocument, PdfError> {
    if request.to.is_none() {
        return Err(PdfError::MissingField("to"));
    }
    let body = request
        .body
        .as_deref()
        .ok_or(PdfError::MissingField("body"))?;

    let mut front = request.clone();
    front.body = None;
    let front_matter = serde_yaml::to_string(&front)?;

    let dir = TempDir::new().map_err(PdfError::TempDir)?;
    let path = dir.path().join(INTERMEDIATE_FILE);

    let mut doc = String::new();
    doc.push_str("---\n");
    doc.push_str(&format!("letterhead: {}\n", letterhead.display()));
    doc.push_str(&front_matter);
    doc.push_str("...\n");
    doc.push_str(body);

    fs::write(&path, doc).map_err(PdfError::WriteDoc)?;

    log::debug!("assembled intermediate document at {}", path.display());

    Ok(IntermediateDocument { _dir: dir, path })
}
