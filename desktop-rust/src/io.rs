use anyhow::{Context, Result};
use image::ImageReader;
use std::path::Path;

use crate::model::PreviewData;

pub const PREVIEW_SIZE: (u32, u32) = (480, 300);

pub fn load_preview(uri: &str) -> Result<PreviewData> {
    let path = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
    let image = ImageReader::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("guess format {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))?;

    let thumb = image.thumbnail(PREVIEW_SIZE.0, PREVIEW_SIZE.1);
    Ok(PreviewData {
        uri: uri.to_string(),
        size: [thumb.width() as usize, thumb.height() as usize],
        pixels: thumb.to_rgba8().into_raw(),
    })
}
