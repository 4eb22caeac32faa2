use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{PosterError, PosterResult};
use crate::render::compositor::RasterSurface;

/// Encode `surface` as PNG bytes with straight alpha.
///
/// Encoding is deterministic: the same surface always yields the same bytes.
pub fn export_png(surface: &RasterSurface) -> PosterResult<Vec<u8>> {
    let expected = (surface.width as usize)
        .saturating_mul(surface.height as usize)
        .saturating_mul(4);
    if surface.width == 0 || surface.height == 0 || surface.data.len() != expected {
        return Err(PosterError::validation(format!(
            "surface {}x{} does not match its {} data bytes",
            surface.width,
            surface.height,
            surface.data.len()
        )));
    }

    let img = image::RgbaImage::from_raw(
        surface.width,
        surface.height,
        surface.to_straight_rgba8(),
    )
    .ok_or_else(|| PosterError::render("surface buffer rejected by PNG encoder"))?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Encode `surface` and write it to `path`, creating parent directories.
pub fn write_png(surface: &RasterSurface, path: impl AsRef<Path>) -> PosterResult<()> {
    let path = path.as_ref();
    let bytes = export_png(surface)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
