use std::path::PathBuf;

use spektra_core::palette::PALETTE_STORAGE_KEY;

/// Directory name under the platform data dir.
pub const APP_DIR: &str = "spektra";

pub const DEFAULT_EXPORT_WIDTH: u32 = 800;
pub const DEFAULT_EXPORT_HEIGHT: u32 = 400;

/// Settings for one run of the studio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    /// Where the palette is persisted. `None` keeps it in memory only.
    pub palette_path: Option<PathBuf>,
    pub export_width: u32,
    pub export_height: u32,
}

impl StudioConfig {
    /// Resolves the palette location: explicit override first, then the
    /// platform data directory.
    pub fn resolve(palette_override: Option<PathBuf>) -> Self {
        let palette_path = palette_override.or_else(default_palette_path);
        match &palette_path {
            Some(path) => log::debug!("palette file: {}", path.display()),
            None => log::warn!("no data directory found; palette changes will not be saved"),
        }
        Self { palette_path, ..Self::in_memory() }
    }

    /// Configuration that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            palette_path: None,
            export_width: DEFAULT_EXPORT_WIDTH,
            export_height: DEFAULT_EXPORT_HEIGHT,
        }
    }
}

/// `<data_dir>/spektra/customColors.json`
pub fn default_palette_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(format!("{PALETTE_STORAGE_KEY}.json")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let cfg = StudioConfig::resolve(Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(cfg.palette_path, Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(cfg.export_width, DEFAULT_EXPORT_WIDTH);
    }

    #[test]
    fn default_path_uses_storage_key() {
        if let Some(path) = default_palette_path() {
            assert!(path.ends_with("spektra/customColors.json"));
        }
    }
}
