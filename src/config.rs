//! Service configuration from the environment.

use anyhow::Context;
use std::env;
use std::path::PathBuf;

/// Runtime configuration, read once at startup. A `.env` file is honored via
/// dotenvy before the variables are resolved.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Shared flat directory for rendered artifacts.
    pub output_dir: PathBuf,
    /// Read-only template resources keyed by `TemplateKind`.
    pub templates_dir: PathBuf,
    /// Directory containing the renderer Makefile.
    pub renderer_dir: PathBuf,
    /// Pandoc binary used for the health probe.
    pub pandoc_bin: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = env::var("PDF_PORT").unwrap_or_else(|_| "1111".to_string());
        let port: u16 = port
            .parse()
            .with_context(|| format!("PDF_PORT is not a valid port number: {port}"))?;

        Ok(Self {
            bind_addr: env::var("PDF_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            output_dir: env::var("PDF_OUTPUT_DIR")
                .unwrap_or_else(|_| "/app/data/output".to_string())
                .into(),
            templates_dir: env::var("PDF_TEMPLATES_DIR")
                .unwrap_or_else(|_| "/app/data/templates".to_string())
                .into(),
            renderer_dir: env::var("PDF_RENDERER_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            pandoc_bin: env::var("PANDOC_BIN").unwrap_or_else(|_| "pandoc".to_string()),
        })
    }
}
