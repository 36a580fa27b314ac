//! Pandoc toolchain invocation.
//!
//! The toolchain is driven through its make wrapper: one target renders a
//! source document against a template, two housekeeping targets remove
//! previously rendered artifacts. Every invocation is a blocking subprocess
//! on the calling thread; the HTTP layer decides where that thread comes
//! from.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::AppConfig;

use super::PdfError;

/// Housekeeping scope for the cleanup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanScope {
    /// Remove rendered PDFs from the output directory (`make clean`).
    Pdf,
    /// Remove everything from the output directory (`make cleanall`).
    All,
}

impl CleanScope {
    fn target(self) -> &'static str {
        match self {
            CleanScope::Pdf => "clean",
            CleanScope::All => "cleanall",
        }
    }
}

/// External renderer seam. The production implementation shells out to the
/// toolchain; tests substitute a mock.
pub trait Renderer: Send + Sync {
    /// Render `source` with `template` into `output`. Blocks until the
    /// subprocess finishes; a nonzero exit code is the only failure signal
    /// beyond invocation errors. No retry, no timeout.
    fn render(&self, source: &Path, template: &Path, output: &Path) -> Result<(), PdfError>;

    /// Run a cleanup target against the output directory. The exit code is
    /// not inspected; only a failed invocation is an error.
    fn clean(&self, scope: CleanScope) -> Result<(), PdfError>;

    /// Ask the renderer binary for its version, bounded by `timeout`.
    fn probe_version(&self, timeout: Duration) -> Result<(), PdfError>;
}

/// Renderer backed by the pandoc toolchain's Makefile.
pub struct PandocEngine {
    renderer_dir: PathBuf,
    pandoc_bin: String,
}

impl PandocEngine {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            renderer_dir: config.renderer_dir.clone(),
            pandoc_bin: config.pandoc_bin.clone(),
        }
    }
}

impl Renderer for PandocEngine {
    fn render(&self, source: &Path, template: &Path, output: &Path) -> Result<(), PdfError> {
        log::debug!("starting pandoc");
        log::debug!("source: {}", source.display());
        log::debug!("template: {}", template.display());
        log::debug!("output pdf: {}", output.display());

        let result = Command::new("make")
            .current_dir(&self.renderer_dir)
            .arg("-e")
            .arg("-B")
            .arg(format!("src={}", source.display()))
            .arg(format!("template={}", template.display()))
            .arg(format!("output={}", output.display()))
            .output()
            .map_err(PdfError::RendererIo)?;

        if !result.status.success() {
            let code = result.status.code().unwrap_or(-1);
            log::error!(
                "pdf generation failed (exit {code}): {}",
                String::from_utf8_lossy(&result.stderr)
            );
            return Err(PdfError::RendererExit(code));
        }

        Ok(())
    }

    fn clean(&self, scope: CleanScope) -> Result<(), PdfError> {
        Command::new("make")
            .current_dir(&self.renderer_dir)
            .arg("-e")
            .arg(scope.target())
            .status()
            .map_err(PdfError::RendererIo)?;
        Ok(())
    }

    fn probe_version(&self, timeout: Duration) -> Result<(), PdfError> {
        let mut child = Command::new(&self.pandoc_bin)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(PdfError::RendererIo)?;

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait().map_err(PdfError::RendererIo)? {
                Some(status) if status.success() => return Ok(()),
                Some(status) => {
                    return Err(PdfError::RendererExit(status.code().unwrap_or(-1)))
                }
                None => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(PdfError::ProbeTimeout(timeout));
                    }
                    thread::sleep(Duration::from_millis(50));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(pandoc_bin: &str) -> PandocEngine {
        let config = AppConfig {
            bind_addr: "127.0.0.1".to_string(),
            port: 0,
            output_dir: "/tmp".into(),
            templates_dir: "/tmp".into(),
            renderer_dir: "/tmp".into(),
            pandoc_bin: pandoc_bin.to_string(),
        };
        PandocEngine::new(&config)
    }

    #[test]
    fn test_probe_succeeds_with_zero_exit() {
        // `true` ignores its arguments and exits 0
        let result = engine("true").probe_version(Duration::from_secs(5));
        assert!(result.is_ok());
    }

    #[test]
    fn test_probe_reports_nonzero_exit() {
        let result = engine("false").probe_version(Duration::from_secs(5));
        assert!(matches!(result, Err(PdfError::RendererExit(_))));
    }

    #[test]
    fn test_probe_reports_missing_binary() {
        let result = engine("definitely-not-a-binary").probe_version(Duration::from_secs(1));
        assert!(matches!(result, Err(PdfError::RendererIo(_))));
    }
}
