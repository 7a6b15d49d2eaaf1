use super::types::{EvaluationLog, LOG_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default store file path (~/.config/cema-score/evaluations.json)
pub fn get_store_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("evaluations.json"))
}

/// Load the evaluation log from a JSON file
///
/// If the file doesn't exist, returns a new empty log.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_log(path: &Path) -> Result<EvaluationLog> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no evaluation store yet, starting empty");
        return Ok(EvaluationLog::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open evaluation store at {}", path.display()))?;

    let log: EvaluationLog = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load evaluation store at {}", path.display()))?;

    // Version check
    if log.version != LOG_VERSION {
        anyhow::bail!("Unsupported evaluation store version: {}", log.version);
    }

    tracing::debug!(path = %path.display(), records = log.len(), "loaded evaluation store");
    Ok(log)
}

/// Save the evaluation log to a JSON file atomically
///
/// Uses atomic-write-file to ensure the file is never left in a corrupted state.
/// Creates the parent directory if it doesn't exist.
pub fn save_log(path: &Path, log: &EvaluationLog) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, log).context("Failed to serialize evaluation store")?;

    file.commit().context("Failed to save evaluation store")?;

    tracing::debug!(path = %path.display(), records = log.len(), "saved evaluation store");
    Ok(())
}
