//! Collision-free output paths for rendered artifacts.

use std::path::{Path, PathBuf};

/// Compute the output path `{date}-{label}-{recipient}[-{n}].pdf` inside
/// `output_dir`, probing for existing files and appending the smallest unused
/// integer suffix starting at 1.
///
/// The existence check and the later write are not atomic: two concurrent
/// requests for the same tuple can both observe a candidate as free. Callers
/// needing exclusivity must serialize externally.
pub fn next_artifact_path(
    output_dir: &Path,
    date: &str,
    label: &str,
    recipient: &str,
) -> PathBuf {
    let base = format!("{date}-{label}-{recipient}");

    let candidate = output_dir.join(format!("{base}.pdf"));
    if !candidate.exists() {
        return candidate;
    }

    let mut counter: u32 = 1;
    loop {
        let candidate = output_dir.join(format!("{base}-{counter}.pdf"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
