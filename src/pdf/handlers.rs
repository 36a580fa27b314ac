//! HTTP handlers for document generation and housekeeping.

use actix_web::{web, HttpResponse, Responder};
use chrono::Local;

use crate::state::AppState;
use crate::StatusResponse;

use super::engine::CleanScope;
use super::generate::generate_pdf;
use super::models::DocumentRequest;
use super::template::TemplateKind;
use super::{GeneratedPdf, PdfError};

/// Run the blocking pipeline on the actix blocking pool. The handling thread
/// stays occupied for the full render duration. A cancelled blocking job maps
/// to an invocation error; it is never a validation failure.
async fn generate_blocking(
    state: &web::Data<AppState>,
    kind: TemplateKind,
    request: DocumentRequest,
) -> Result<GeneratedPdf, PdfError> {
    let config = state.config.clone();
    let renderer = state.renderer.clone();
    web::block(move || generate_pdf(&config, renderer.as_ref(), kind, &request))
        .await
        .map_err(|err| PdfError::RendererIo(std::io::Error::other(err.to_string())))?
}

fn pdf_response(state: &web::Data<AppState>, endpoint: &str, pdf: GeneratedPdf) -> HttpResponse {
    state.pdf_counter.with_label_values(&[endpoint]).inc();
    log::info!("sending pdf: {}", pdf.path.display());
    HttpResponse::Ok()
        .content_type("application/pdf")
        .body(pdf.bytes)
}

#[utoipa::path(
    context_path = "/v1",
    tag = "Document Generation",
    post,
    path = "/invoice",
    request_body = DocumentRequest,
    responses(
        (status = 200, description = "Rendered invoice PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 500, description = "Generation failed", body = StatusResponse)
    )
)]
pub async fn generate_invoice(
    state: web::Data<AppState>,
    request: web::Json<DocumentRequest>,
) -> impl Responder {
    log::info!("generating invoice");
    match generate_blocking(&state, TemplateKind::Invoice, request.into_inner()).await {
        Ok(pdf) => pdf_response(&state, "invoice", pdf),
        Err(err) => {
            log::error!("error generating invoice: {err}");
            HttpResponse::InternalServerError().json(StatusResponse::failed())
        }
    }
}

#[utoipa::path(
    context_path = "/v1",
    tag = "Document Generation",
    post,
    path = "/shipping",
    request_body = DocumentRequest,
    responses(
        (status = 200, description = "Rendered shipping note PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 500, description = "Generation failed", body = StatusResponse)
    )
)]
pub async fn generate_shipping(
    state: web::Data<AppState>,
    request: web::Json<DocumentRequest>,
) -> impl Responder {
    log::info!("generating shipping note");
    match generate_blocking(&state, TemplateKind::Shipping, request.into_inner()).await {
        Ok(pdf) => pdf_response(&state, "shipping", pdf),
        Err(err) => {
            log::error!("error generating shipping note: {err}");
            HttpResponse::InternalServerError().json(StatusResponse::failed())
        }
    }
}

// Unlike the other generation endpoints this one answers validation failures
// with 400 and the error text in the body.
#[utoipa::path(
    context_path = "/v1",
    tag = "Document Generation",
    post,
    path = "/order-confirmation",
    request_body = DocumentRequest,
    responses(
        (status = 200, description = "Rendered order confirmation PDF", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Invalid request payload", body = String),
        (status = 500, description = "Generation failed", body = String)
    )
)]
pub async fn generate_order_confirmation(
    state: web::Data<AppState>,
    request: web::Json<DocumentRequest>,
) -> impl Responder {
    log::info!("generating order confirmation");
    match generate_blocking(&state, TemplateKind::OrderConfirmation, request.into_inner()).await {
        Ok(pdf) => pdf_response(&state, "order_confirmation", pdf),
        Err(err) if err.is_validation() => {
            log::error!("error generating order confirmation: {err}");
            HttpResponse::BadRequest().body(err.to_string())
        }
        Err(err) => {
            log::error!("pdf generation failed: {err}");
            HttpResponse::InternalServerError().body("pdf generation failed")
        }
    }
}

async fn clean_blocking(state: &web::Data<AppState>, scope: CleanScope) -> HttpResponse {
    let renderer = state.renderer.clone();
    let result = web::block(move || renderer.clean(scope)).await;
    match result {
        Ok(Ok(())) => {
            log::info!("cleaned up files in the output directory (scope {scope:?})");
            HttpResponse::NoContent().finish()
        }
        Ok(Err(err)) => {
            log::error!("failed to clean output directory: {err}");
            HttpResponse::InternalServerError().json(StatusResponse::failed())
        }
        Err(err) => {
            log::error!("blocking cleanup job failed: {err}");
            HttpResponse::InternalServerError().json(StatusResponse::failed())
        }
    }
}

#[utoipa::path(
    context_path = "/v1",
    tag = "Housekeeping",
    delete,
    path = "/delete/pdf",
    responses(
        (status = 204, description = "Rendered PDFs removed"),
        (status = 500, description = "Cleanup failed", body = StatusResponse)
    )
)]
pub async fn delete_pdf(state: web::Data<AppState>) -> impl Responder {
    clean_blocking(&state, CleanScope::Pdf).await
}

#[utoipa::path(
    context_path = "/v1",
    tag = "Housekeeping",
    delete,
    path = "/delete/all",
    responses(
        (status = 204, description = "All output files removed"),
        (status = 500, description = "Cleanup failed", body = StatusResponse)
    )
)]
pub async fn delete_all(state: web::Data<AppState>) -> impl Responder {
    clean_blocking(&state, CleanScope::All).await
}

#[utoipa::path(
    context_path = "/v1",
    tag = "Info",
    get,
    path = "",
    responses(
        (status = 200, description = "Service info page", body = String, content_type = "text/html")
    )
)]
pub async fn info() -> impl Responder {
    let today = Local::now().format("%Y-%m-%d");
    let routes = "\
GET     /v1
POST    /v1/invoice
POST    /v1/shipping
POST    /v1/order-confirmation
DELETE  /v1/delete/pdf
DELETE  /v1/delete/all
GET     /health
GET     /metrics";

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<h1>pdf v{} - {today}</h1><pre>{routes}</pre>",
            env!("CARGO_PKG_VERSION")
        ))
}
