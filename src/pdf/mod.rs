//! Request-to-artifact pipeline for rendered PDF letters.
//!
//! The pipeline composes four pieces:
//! - `normalize` - recipient name to filesystem-safe token
//! - `naming` - collision-free output path in the shared output directory
//! - `assemble` - front-matter intermediate document in a scoped temp dir
//! - `engine` - blocking invocation of the pandoc toolchain

pub mod assemble;
pub mod engine;
pub mod generate;
pub mod handlers;
pub mod models;
pub mod naming;
pub mod normalize;
pub mod template;

pub use assemble::{assemble, IntermediateDocument};
pub use engine::{CleanScope, PandocEngine, Renderer};
pub use generate::generate_pdf;
pub use models::{DocumentRequest, Recipient};
pub use naming::next_artifact_path;
pub use normalize::normalize;
pub use template::TemplateKind;

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while turning a request into a rendered PDF.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("request is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("request has neither a recipient name nor an address line")]
    MissingRecipient,
    #[error("template `{0}` cannot be rendered directly")]
    NotRenderable(&'static str),
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to serialize document front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
    #[error("failed to write intermediate document: {0}")]
    WriteDoc(#[source] std::io::Error),
    #[error("renderer invocation failed: {0}")]
    RendererIo(#[source] std::io::Error),
    #[error("renderer exited with status {0}")]
    RendererExit(i32),
    #[error("renderer version probe timed out after {0:?}")]
    ProbeTimeout(Duration),
    #[error("failed to read rendered pdf: {0}")]
    ReadPdf(#[source] std::io::Error),
}

impl PdfError {
    /// Whether the error is a problem with the request payload rather than
    /// the pipeline.
    pub fn is_validation(&self) -> bool {
        matches!(self, PdfError::MissingField(_) | PdfError::MissingRecipient)
    }
}

/// Result of a successful pipeline run. The artifact stays on disk; the bytes
/// are read back for the HTTP response.
#[derive(Debug)]
pub struct GeneratedPdf {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}
