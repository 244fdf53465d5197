//! Gradient model and CSS output for **Spektra**.
//!
//! This crate owns the editable gradient state and everything that can be
//! computed from it without touching the host: CSS text, color validation,
//! and a software rasterizer for image export. Clipboard, storage, and
//! terminal I/O live in `spektra-studio`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`model`] | `GradientKind`, `ColorStop`, `GradientConfig`, `StopPatch` |
//! | [`id`] | `StopId`, `StopIdGen` |
//! | [`store`] | `GradientStore`, `StoreError` |
//! | [`css`] | `serialize`, clipboard and share payloads |
//! | [`color`] | `parse_color`, `Rgba`, `ColorError` |
//! | [`palette`] | `Palette` (recently used colors) |
//! | [`raster`] | `render`, `Shader`, `Pixmap` |
//!
//! # Quick start
//!
//! ```rust
//! use spektra_core::{GradientKind, GradientStore};
//!
//! let mut store = GradientStore::new();
//! assert_eq!(store.css(), "linear-gradient(90deg, #FF0080 0%, #7928CA 100%)");
//!
//! store.set_kind(GradientKind::Radial);
//! store.set_center(30.0, 70.0);
//! assert!(store.css().starts_with("radial-gradient(circle at 30% 70%"));
//! ```

pub mod color;
pub mod css;
pub mod id;
pub mod model;
pub mod palette;
pub mod raster;
pub mod store;

pub use color::{ColorError, Rgba, is_valid_color, parse_color};
pub use css::serialize;
pub use id::{StopId, StopIdGen};
pub use model::{ColorStop, GradientConfig, GradientKind, MIN_STOPS, StopPatch};
pub use palette::Palette;
pub use store::{GradientStore, StoreError};
