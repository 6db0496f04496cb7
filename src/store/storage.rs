use super::types::{StoreState, STORE_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default store file path (~/.config/exohab/planets.json)
pub fn get_store_path() -> PathBuf {
    crate::config::get_config_dir().join("planets.json")
}

/// Load the store from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_store(path: &Path) -> Result<StoreState> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no store file yet, starting empty");
        return Ok(StoreState::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open store at {}", path.display()))?;

    let state: StoreState = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load store at {}", path.display()))?;

    if state.version != STORE_VERSION {
        anyhow::bail!("Unsupported store version: {}", state.version);
    }

    tracing::debug!(
        path = %path.display(),
        planets = state.planets.len(),
        favorites = state.favorites.len(),
        notes = state.notes.len(),
        "store loaded"
    );
    Ok(state)
}

/// Write the store to a JSON file atomically
///
/// The file is never left half-written. Parent directories are created
/// as needed.
pub fn write_store(path: &Path, state: &StoreState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create store directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize store")?;

    file.commit().context("Failed to save store")?;

    tracing::debug!(path = %path.display(), planets = state.planets.len(), "store written");
    Ok(())
}
