use briefdruck_server::pdf::{CleanScope, PdfError, Renderer};
use briefdruck_server::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Renderer double: records what it was asked to render and fakes the
/// artifact write the external toolchain would perform.
pub struct MockRenderer {
    output_dir: PathBuf,
    fail: bool,
    render_count: Mutex<u32>,
    /// Intermediate document content, read at render time (the file is gone
    /// once the request scope exits).
    pub last_source: Mutex<Option<String>>,
    pub last_source_path: Mutex<Option<PathBuf>>,
}

impl MockRenderer {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            fail: false,
            render_count: Mutex::new(0),
            last_source: Mutex::new(None),
            last_source_path: Mutex::new(None),
        }
    }

    /// A renderer whose render invocations exit nonzero.
    pub fn failing(output_dir: &Path) -> Self {
        Self {
            fail: true,
            ..Self::new(output_dir)
        }
    }
}

impl Renderer for MockRenderer {
    fn render(&self, source: &Path, _template: &Path, output: &Path) -> Result<(), PdfError> {
        let content = fs::read_to_string(source).map_err(PdfError::RendererIo)?;
        *self.last_source.lock().unwrap() = Some(content);
        *self.last_source_path.lock().unwrap() = Some(source.to_path_buf());

        if self.fail {
            return Err(PdfError::RendererExit(43));
        }

        let mut count = self.render_count.lock().unwrap();
        *count += 1;
        fs::write(output, format!("%PDF-1.5\nmock render {count}"))
            .map_err(PdfError::RendererIo)
    }

    fn clean(&self, scope: CleanScope) -> Result<(), PdfError> {
        for entry in fs::read_dir(&self.output_dir).map_err(PdfError::RendererIo)? {
            let path = entry.map_err(PdfError::RendererIo)?.path();
            let is_pdf = path.extension().is_some_and(|ext| ext == "pdf");
            if matches!(scope, CleanScope::All) || is_pdf {
                fs::remove_file(&path).map_err(PdfError::RendererIo)?;
            }
        }
        Ok(())
    }

    fn probe_version(&self, _timeout: Duration) -> Result<(), PdfError> {
        Ok(())
    }
}

pub fn test_config(output_dir: &Path) -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1".to_string(),
        port: 0,
        output_dir: output_dir.to_path_buf(),
        templates_dir: PathBuf::from("/app/data/templates"),
        renderer_dir: PathBuf::from("."),
        pandoc_bin: "pandoc".to_string(),
    }
}

/// Today's date the way the artifact namer stamps it.
pub fn today() -> String {
    chrono::Local::now().format("%Y%m%d").to_string()
}
