//! Template selection for the rendering toolchain.

use std::path::{Path, PathBuf};

/// Document layouts known to the renderer. `Letterhead` and `Details` are
/// internal placeholders and cannot be rendered directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Invoice,
    Shipping,
    OrderConfirmation,
    Letterhead,
    Details,
}

impl TemplateKind {
    /// File name of the template resource under the templates directory.
    pub fn resource(&self) -> &'static str {
        match self {
            TemplateKind::Invoice => "invoice-scrlttr2.tex",
            TemplateKind::Shipping => "shipping-note-scrlttr2.tex",
            TemplateKind::OrderConfirmation => "order-confirmation.tex",
            TemplateKind::Letterhead => "RE.pdf",
            TemplateKind::Details => "",
        }
    }

    /// Absolute path of the template resource.
    pub fn resource_path(&self, templates_dir: &Path) -> PathBuf {
        templates_dir.join(self.resource())
    }

    /// Short label used in output filenames. `None` for the non-routable
    /// placeholder kinds.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            TemplateKind::Invoice => Some("invoice"),
            TemplateKind::Shipping => Some("shipping"),
            TemplateKind::OrderConfirmation => Some("order_confirmation"),
            TemplateKind::Letterhead | TemplateKind::Details => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Invoice => "invoice",
            TemplateKind::Shipping => "shipping",
            TemplateKind::OrderConfirmation => "order-confirmation",
            TemplateKind::Letterhead => "letterhead",
            TemplateKind::Details => "details",
        }
    }
}
