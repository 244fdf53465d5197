//! JSON persistence for the palette and saved gradients.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spektra_core::{GradientConfig, Palette};

/// Write via a temp file and rename so a crash never leaves half a file.
pub fn atomic_write<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path).with_context(|| {
        format!("Failed to rename {} to {}", temp_path.display(), path.display())
    })?;

    Ok(())
}

/// Reads a JSON file, `None` if it does not exist.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let data: T = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(Some(data))
}

// ── Gradients ─────────────────────────────────────────────────────────────

pub fn save_gradient(path: &Path, config: &GradientConfig) -> Result<()> {
    atomic_write(path, config)
}

pub fn load_gradient(path: &Path) -> Result<GradientConfig> {
    load_json(path)?.with_context(|| format!("No gradient file at {}", path.display()))
}

// ── Palette ───────────────────────────────────────────────────────────────

/// Palette persistence at a fixed path.
#[derive(Debug, Clone)]
pub struct PaletteStore {
    path: Option<PathBuf>,
}

impl PaletteStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Loads the stored palette.
    ///
    /// A missing file gives the default palette. So does an unreadable one,
    /// after a warning: the palette is a cache and must never block editing.
    pub fn load(&self) -> Palette {
        let Some(path) = &self.path else {
            return Palette::default();
        };
        match load_json::<Vec<String>>(path) {
            Ok(Some(colors)) => Palette::from_colors(colors),
            Ok(None) => Palette::default(),
            Err(e) => {
                log::warn!("ignoring stored palette: {e:#}");
                Palette::default()
            }
        }
    }

    pub fn save(&self, palette: &Palette) -> Result<()> {
        match &self.path {
            Some(path) => atomic_write(path, palette),
            None => {
                log::debug!("palette not persisted (no storage path)");
                Ok(())
            }
        }
    }
}
