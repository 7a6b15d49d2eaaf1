use anyhow::{Context, Result};
use std::path::Path;

/// Open a written report in the user's default browser
///
/// # Arguments
/// * `path` - The report file to open
///
/// # Errors
/// Returns error if the path cannot be resolved or no browser can be opened
pub fn open_report(path: &Path) -> Result<()> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve report path {}", path.display()))?;
    let target = absolute.to_string_lossy();
    webbrowser::open(&target)
        .with_context(|| format!("Failed to open browser for report: {}", target))?;
    Ok(())
}
