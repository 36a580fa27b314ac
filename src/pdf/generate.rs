//! Pipeline composition: request in, persisted artifact out.

use chrono::Local;
use std::fs;

use crate::config::AppConfig;

use super::assemble::assemble;
use super::engine::Renderer;
use super::models::DocumentRequest;
use super::naming::next_artifact_path;
use super::normalize::normalize;
use super::template::TemplateKind;
use super::{GeneratedPdf, PdfError};

/// Run the full pipeline for one request: assemble the intermediate document,
/// compute a collision-free output path, invoke the renderer, read the
/// artifact back. The intermediate document is deleted on every exit path;
/// the artifact stays in the output directory.
pub fn generate_pdf(
    config: &AppConfig,
    renderer: &dyn Renderer,
    kind: TemplateKind,
    request: &DocumentRequest,
) -> Result<GeneratedPdf, PdfError> {
    let label = kind.label().ok_or(PdfError::NotRenderable(kind.as_str()))?;

    log::info!("generating pdf");
    log::debug!("{request:?}");

    let letterhead = TemplateKind::Letterhead.resource_path(&config.templates_dir);
    let doc = assemble(request, &letterhead)?;

    let recipient = normalize(request.recipient()?);
    log::debug!("{recipient}");

    let date = Local::now().format("%Y%m%d").to_string();
    let output_path = next_artifact_path(&config.output_dir, &date, label, &recipient);

    renderer.render(
        &doc.path,
        &kind.resource_path(&config.templates_dir),
        &output_path,
    )?;

    let bytes = fs::read(&output_path).map_err(PdfError::ReadPdf)?;
    log::info!("pdf generated successfully");

    let filename = output_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(GeneratedPdf {
        filename,
        path: output_path,
        bytes,
    })
}
