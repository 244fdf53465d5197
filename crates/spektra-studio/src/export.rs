use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use spektra_core::GradientConfig;
use spektra_core::raster;

/// Renders `config` and writes it to `path` as PNG.
///
/// The image is written next to the target and renamed into place, so a
/// failed export leaves no file behind.
pub fn export_png(config: &GradientConfig, path: &Path, width: u32, height: u32) -> Result<()> {
    let pixmap = raster::render(config, width, height).context("cannot render gradient")?;
    let image = image::RgbaImage::from_raw(width, height, pixmap.into_data())
        .context("pixel buffer does not match image size")?;

    let temp_path = path.with_extension("png.tmp");
    let written = image
        .save_with_format(&temp_path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", temp_path.display()))
        .and_then(|()| {
            fs::rename(&temp_path, path)
                .with_context(|| format!("Failed to move image to {}", path.display()))
        });

    if written.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            log::warn!("could not remove {}: {e}", temp_path.display());
        }
    }
    written?;

    log::info!("exported {width}x{height} {} gradient to {}", config.kind, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spektra_core::{GradientStore, StopIdGen, StopPatch};

    #[test]
    fn writes_png_with_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let store = GradientStore::with_id_gen(StopIdGen::seeded(2));

        export_png(store.config(), &path, 64, 32).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (64, 32));
        // Left edge is the first stop (#FF0080), right edge the last (#7928CA).
        let left = img.get_pixel(0, 16).0;
        let right = img.get_pixel(63, 16).0;
        assert!(left[0] > 240 && left[1] < 10);
        assert!(right[2] > 190 && right[0] < 130);
        assert!(!path.with_extension("png.tmp").exists());
    }

    #[test]
    fn invalid_color_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        let mut store = GradientStore::with_id_gen(StopIdGen::seeded(2));
        let id = store.config().color_stops[0].id.clone();
        store.update_color_stop(&id, StopPatch::color("not a color")).unwrap();

        assert!(export_png(store.config(), &path, 8, 8).is_err());
        assert!(!path.exists());
        assert!(!path.with_extension("png.tmp").exists());
    }

    #[test]
    fn zero_size_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = GradientStore::with_id_gen(StopIdGen::seeded(2));
        assert!(export_png(store.config(), &dir.path().join("z.png"), 0, 8).is_err());
    }
}
