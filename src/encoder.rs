//! 画像エンコーダー
//!
//! 撮影画像を読み込み、base64文字列にする。
//! 長辺が `max_image_size` を超える画像は縮小してJPEGで再エンコードする。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use book_scan_common::CapturedImage;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::PathBuf;

use crate::error::{BookScanError, Result};

pub trait ImageEncoder: Send + Sync {
    fn encode(&self, image: &CapturedImage) -> Result<String>;
}

/// ファイル / file:// / data: URI を読むエンコーダー
#[derive(Debug, Clone)]
pub struct Base64Encoder {
    max_image_size: u32,
}

impl Base64Encoder {
    pub fn new(max_image_size: u32) -> Self {
        Self { max_image_size }
    }

    fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = match uri.strip_prefix("file://") {
            Some(rest) => PathBuf::from(rest),
            None => PathBuf::from(uri),
        };
        std::fs::read(&path)
            .map_err(|e| BookScanError::ImageLoad(format!("{}: {}", path.display(), e)))
    }

    fn shrink(&self, bytes: Vec<u8>) -> Vec<u8> {
        if self.max_image_size == 0 {
            return bytes;
        }

        // 画像として読めない場合はそのまま送る
        let Ok(img) = image::load_from_memory(&bytes) else {
            return bytes;
        };
        if img.width().max(img.height()) <= self.max_image_size {
            return bytes;
        }

        let resized = img.resize(
            self.max_image_size,
            self.max_image_size,
            image::imageops::FilterType::Triangle,
        );
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
        let mut out = Cursor::new(Vec::new());
        match rgb.write_to(&mut out, ImageFormat::Jpeg) {
            Ok(()) => {
                tracing::debug!(
                    from = img.width().max(img.height()),
                    to = self.max_image_size,
                    "画像を縮小"
                );
                out.into_inner()
            }
            Err(e) => {
                tracing::warn!("縮小画像のエンコードに失敗、元画像を送信: {}", e);
                bytes
            }
        }
    }
}

impl Default for Base64Encoder {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ImageEncoder for Base64Encoder {
    fn encode(&self, image: &CapturedImage) -> Result<String> {
        let uri = image.uri();

        if let Some(payload) = extract_base64_from_data_url(uri) {
            if payload.is_empty() {
                return Err(BookScanError::ImageLoad("data URIが空です".into()));
            }
            return Ok(payload.to_string());
        }

        let bytes = self.read_bytes(uri)?;
        if bytes.is_empty() {
            return Err(BookScanError::ImageLoad(format!("画像が空です: {}", uri)));
        }

        Ok(STANDARD.encode(self.shrink(bytes)))
    }
}

/// Data URLからBase64データ部分を抽出
///
/// "data:image/jpeg;base64,/9j/4AAQ..." 形式でなければ `None`
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    if !data_url.starts_with("data:") {
        return None;
    }
    Some(data_url.split_once(',').map(|(_, payload)| payload).unwrap_or(""))
}
