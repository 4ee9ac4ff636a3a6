//! Cloud Vision API連携（テキスト検出）
//!
//! 1画像・1機能（TEXT_DETECTION）の images:annotate リクエストを送り、
//! 最初のレスポンスの fullTextAnnotation.text を返す。

use async_trait::async_trait;
use book_scan_common::parse_annotate_response;
use serde::Serialize;

use crate::error::{BookScanError, Result};

const ANNOTATE_PATH: &str = "/v1/images:annotate";

#[async_trait]
pub trait TextDetector: Send + Sync {
    /// 認識テキストを返す（検出なしは空文字列）
    async fn detect_text(&self, image_base64: &str) -> Result<String>;
}

/// images:annotate リクエスト
#[derive(Debug, Serialize)]
pub struct AnnotateRequest<'a> {
    requests: Vec<AnnotateImageRequest<'a>>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest<'a> {
    image: ImageContent<'a>,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> AnnotateRequest<'a> {
    pub fn text_detection(image_base64: &'a str) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: image_base64,
                },
                features: vec![Feature {
                    kind: "TEXT_DETECTION",
                }],
            }],
        }
    }
}

pub struct VisionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl VisionClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn annotate_url(&self) -> String {
        format!(
            "{}{}?key={}",
            self.endpoint,
            ANNOTATE_PATH,
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl TextDetector for VisionClient {
    async fn detect_text(&self, image_base64: &str) -> Result<String> {
        if image_base64.is_empty() {
            return Err(BookScanError::ApiCall("画像データが空です".into()));
        }

        let request = AnnotateRequest::text_detection(image_base64);
        tracing::info!(payload_len = image_base64.len(), "テキスト検出をリクエスト");

        let response = self
            .http
            .post(self.annotate_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BookScanError::ApiCall(format!("Vision API error: {}", status)));
        }

        let text = parse_annotate_response(&body)
            .map_err(|e| BookScanError::ApiParse(e.to_string()))?;
        tracing::info!(chars = text.chars().count(), "テキスト検出完了");
        Ok(text)
    }
}
