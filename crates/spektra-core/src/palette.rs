use serde::{Deserialize, Serialize};

/// Maximum number of colors kept in a palette.
pub const PALETTE_CAPACITY: usize = 20;

/// Key under which front ends persist the palette.
pub const PALETTE_STORAGE_KEY: &str = "customColors";

/// Colors a fresh palette starts with.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD",
    "#D4A5A5", "#9B59B6", "#3498DB", "#E74C3C", "#2ECC71",
];

/// Recently used or saved colors, most recent first.
///
/// Entries are CSS color strings compared by exact text, so `#fff` and
/// `#FFFFFF` are distinct. The palette is a convenience cache for color
/// pickers; nothing in the gradient state depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn empty() -> Self {
        Self { colors: Vec::new() }
    }

    /// Palette from stored entries. Duplicates are dropped (first wins) and
    /// the list is cut to [`PALETTE_CAPACITY`].
    pub fn from_colors(colors: impl IntoIterator<Item = String>) -> Self {
        let mut out = Self::empty();
        for color in colors {
            if out.colors.len() == PALETTE_CAPACITY {
                break;
            }
            if !out.contains(&color) {
                out.colors.push(color);
            }
        }
        out
    }

    /// Puts `color` at the front. A color already present is left where it
    /// is and `false` is returned.
    pub fn add(&mut self, color: impl Into<String>) -> bool {
        let color = color.into();
        if self.contains(&color) {
            return false;
        }
        self.colors.insert(0, color);
        self.colors.truncate(PALETTE_CAPACITY);
        true
    }

    pub fn remove(&mut self, color: &str) -> bool {
        let before = self.colors.len();
        self.colors.retain(|c| c != color);
        self.colors.len() != before
    }

    pub fn clear(&mut self) {
        self.colors.clear();
    }

    pub fn contains(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_colors(DEFAULT_PALETTE.iter().map(|c| c.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_seed_colors() {
        let p = Palette::default();
        assert_eq!(p.len(), 10);
        assert_eq!(p.get(0), Some("#FF6B6B"));
    }

    #[test]
    fn add_prepends() {
        let mut p = Palette::empty();
        assert!(p.add("red"));
        assert!(p.add("blue"));
        assert_eq!(p.colors(), ["blue", "red"]);
    }

    #[test]
    fn add_existing_is_noop() {
        let mut p = Palette::empty();
        p.add("red");
        p.add("blue");
        assert!(!p.add("red"));
        assert_eq!(p.colors(), ["blue", "red"]);
    }

    #[test]
    fn dedup_is_exact_text() {
        let mut p = Palette::empty();
        p.add("#fff");
        assert!(p.add("#FFF"));
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut p = Palette::empty();
        for i in 0..25 {
            p.add(format!("#{i:06}"));
        }
        assert_eq!(p.len(), PALETTE_CAPACITY);
        assert_eq!(p.get(0), Some("#000024"));
        assert_eq!(p.get(PALETTE_CAPACITY - 1), Some("#000005"));
    }

    #[test]
    fn remove_reports_change() {
        let mut p = Palette::default();
        assert!(p.remove("#4ECDC4"));
        assert!(!p.remove("#4ECDC4"));
        assert_eq!(p.len(), 9);
    }

    #[test]
    fn from_colors_dedups_and_caps() {
        let stored = (0..30).map(|i| format!("c{}", i % 25));
        let p = Palette::from_colors(stored);
        assert_eq!(p.len(), PALETTE_CAPACITY);
        assert_eq!(p.get(19), Some("c19"));
    }

    #[test]
    fn serializes_as_bare_array() {
        let mut p = Palette::empty();
        p.add("red");
        p.add("#00ff00");
        assert_eq!(serde_json::to_string(&p).unwrap(), r##"["#00ff00","red"]"##);
        let back: Palette = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(back.colors(), ["a", "b"]);
    }
}
