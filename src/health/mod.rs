//! Liveness probes for the output directory and the renderer binary.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;

use crate::pdf::Renderer;
use crate::state::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const MARKER_FILE: &str = "test_write.txt";

/// Aggregated health report. The endpoint always answers 200; failures are
/// carried in the body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub output_dir_writable: bool,
    pub pandoc_responding: bool,
}

fn probe_output_dir(output_dir: &Path) -> bool {
    let marker = output_dir.join(MARKER_FILE);
    match fs::write(&marker, b"test").and_then(|()| fs::remove_file(&marker)) {
        Ok(()) => true,
        Err(err) => {
            log::error!("output directory not writable: {err}");
            false
        }
    }
}

fn probe_renderer(renderer: &dyn Renderer) -> bool {
    match renderer.probe_version(PROBE_TIMEOUT) {
        Ok(()) => true,
        Err(err) => {
            log::error!("error checking pandoc: {err}");
            false
        }
    }
}

/// Run both probes. They are independent; one failing does not abort the
/// other.
fn run_probes(output_dir: &Path, renderer: &dyn Renderer) -> HealthStatus {
    let output_dir_writable = probe_output_dir(output_dir);
    let pandoc_responding = probe_renderer(renderer);

    let status = if output_dir_writable && pandoc_responding {
        "ok"
    } else {
        "error"
    };

    HealthStatus {
        status: status.to_string(),
        output_dir_writable,
        pandoc_responding,
    }
}

#[utoipa::path(
    tag = "Health",
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health report, status set to error when a probe fails", body = HealthStatus)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let output_dir = state.config.output_dir.clone();
    let renderer: Arc<dyn Renderer> = state.renderer.clone();

    let report = web::block(move || run_probes(&output_dir, renderer.as_ref())).await;

    match report {
        Ok(report) => {
            log::debug!("health check performed: {report:?}");
            HttpResponse::Ok().json(report)
        }
        Err(err) => {
            log::error!("blocking health probe failed: {err}");
            HttpResponse::Ok().json(HealthStatus {
                status: "error".to_string(),
                output_dir_writable: false,
                pandoc_responding: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{CleanScope, PdfError};
    use tempfile::tempdir;

    struct HealthyRenderer;

    impl Renderer for HealthyRenderer {
        fn render(
            &self,
            _source: &Path,
            _template: &Path,
            _output: &Path,
        ) -> Result<(), PdfError> {
            Ok(())
        }

        fn clean(&self, _scope: CleanScope) -> Result<(), PdfError> {
            Ok(())
        }

        fn probe_version(&self, _timeout: Duration) -> Result<(), PdfError> {
            Ok(())
        }
    }

    struct DeadRenderer;

    impl Renderer for DeadRenderer {
        fn render(
            &self,
            _source: &Path,
            _template: &Path,
            _output: &Path,
        ) -> Result<(), PdfError> {
            Err(PdfError::RendererExit(1))
        }

        fn clean(&self, _scope: CleanScope) -> Result<(), PdfError> {
            Err(PdfError::RendererExit(1))
        }

        fn probe_version(&self, timeout: Duration) -> Result<(), PdfError> {
            Err(PdfError::ProbeTimeout(timeout))
        }
    }

    #[test]
    fn test_all_probes_healthy() {
        let dir = tempdir().unwrap();
        let report = run_probes(dir.path(), &HealthyRenderer);
        assert_eq!(report.status, "ok");
        assert!(report.output_dir_writable);
        assert!(report.pandoc_responding);
    }

    #[test]
    fn test_renderer_failure_flips_status_without_aborting_dir_probe() {
        let dir = tempdir().unwrap();
        let report = run_probes(dir.path(), &DeadRenderer);
        assert_eq!(report.status, "error");
        assert!(report.output_dir_writable);
        assert!(!report.pandoc_responding);
    }

    #[test]
    fn test_unwritable_output_dir_is_reported() {
        let report = run_probes(Path::new("/nonexistent/output"), &HealthyRenderer);
        assert_eq!(report.status, "error");
        assert!(!report.output_dir_writable);
        assert!(report.pandoc_responding);
    }

    #[test]
    fn test_marker_file_is_removed() {
        let dir = tempdir().unwrap();
        assert!(probe_output_dir(dir.path()));
        assert!(!dir.path().join(MARKER_FILE).exists());
    }
}
