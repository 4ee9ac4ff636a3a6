//! スキャンパイプライン
//!
//! エンコード → テキスト検出 → 書誌検索 を順に実行する。
//! 各ステップの失敗はその場でログに出し、`ScanFailure` に変換する。

use std::sync::Arc;

use book_scan_common::{CapturedImage, ScanFailure, ScanOutcome};

use crate::books::{BookSearcher, BooksClient};
use crate::config::Config;
use crate::encoder::{Base64Encoder, ImageEncoder};
use crate::error::Result;
use crate::vision::{TextDetector, VisionClient};

/// 両APIで共有するHTTPクライアント（タイムアウトは設定時のみ）
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

#[derive(Clone)]
pub struct ScanPipeline {
    encoder: Arc<dyn ImageEncoder>,
    detector: Arc<dyn TextDetector>,
    searcher: Arc<dyn BookSearcher>,
}

impl ScanPipeline {
    pub fn new(
        encoder: Arc<dyn ImageEncoder>,
        detector: Arc<dyn TextDetector>,
        searcher: Arc<dyn BookSearcher>,
    ) -> Self {
        Self {
            encoder,
            detector,
            searcher,
        }
    }

    /// 設定からGoogle APIクライアントを組み立てる
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;

        let http = http_client(config)?;

        let vision = VisionClient::new(http.clone(), &config.vision_endpoint, &api_key);
        let books = BooksClient::new(http, &config.books_endpoint, &api_key)
            .with_max_results(config.effective_max_results());

        Ok(Self::new(
            Arc::new(Base64Encoder::new(config.max_image_size)),
            Arc::new(vision),
            Arc::new(books),
        ))
    }

    pub async fn run(&self, image: &CapturedImage) -> ScanOutcome {
        tracing::info!(uri = image.uri(), "スキャン開始");

        let encoded = self.encoder.encode(image).map_err(|e| {
            tracing::error!("画像のbase64変換に失敗: {}", e);
            ScanFailure::Encoding
        })?;

        let text = match self.detector.detect_text(&encoded).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("テキストが検出されませんでした");
                return Err(ScanFailure::NoTextDetected);
            }
            Err(e) => {
                tracing::error!("テキスト検出エラー: {}", e);
                return Err(ScanFailure::NoTextDetected);
            }
        };

        let books = self.searcher.search_books(&text).await.map_err(|e| {
            tracing::error!("書誌検索エラー: {}", e);
            ScanFailure::Lookup
        })?;

        if books.is_empty() {
            tracing::info!("該当する書籍なし");
        }
        Ok(books)
    }
}
