//! APIレスポンスパーサー
//!
//! Vision APIとBooks APIのレスポンスを型付き構造体で受けてから
//! 値を取り出す。フィールド欠落はエラーではなくデフォルト値になる。

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::BookRecord;

/// images:annotate レスポンス
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnnotateResponse {
    responses: Option<Vec<AnnotateImageResponse>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnnotateImageResponse {
    full_text_annotation: Option<TextAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TextAnnotation {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiStatus {
    code: Option<i64>,
    message: Option<String>,
}

/// volumes レスポンス
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Volume {
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    description: Option<String>,
}

impl From<VolumeInfo> for BookRecord {
    fn from(info: VolumeInfo) -> Self {
        BookRecord::new(
            info.title.unwrap_or_default(),
            info.authors.unwrap_or_default(),
            info.description.unwrap_or_default(),
        )
    }
}

/// Vision APIレスポンスから認識テキストを取り出す
///
/// `responses[0].fullTextAnnotation.text` を返す。存在しなければ空文字列。
///
/// # Returns
/// * `Ok(String)` - 認識テキスト（空の場合あり）
/// * `Err` - JSONとして不正、または画像単位のエラーが返された場合
///
/// # Examples
/// ```
/// use book_scan_common::parse_annotate_response;
///
/// let body = r#"{"responses":[{"fullTextAnnotation":{"text":"Things Fall Apart"}}]}"#;
/// assert_eq!(parse_annotate_response(body).unwrap(), "Things Fall Apart");
/// ```
pub fn parse_annotate_response(body: &str) -> Result<String> {
    let response: AnnotateResponse = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("annotate JSONパースエラー: {}", e)))?;

    let Some(first) = response.responses.and_then(|r| r.into_iter().next()) else {
        return Ok(String::new());
    };

    if let Some(status) = first.error {
        return Err(Error::Parse(format!(
            "annotate エラー応答 (code {}): {}",
            status.code.unwrap_or_default(),
            status.message.unwrap_or_default()
        )));
    }

    Ok(first
        .full_text_annotation
        .and_then(|a| a.text)
        .unwrap_or_default())
}

/// Books APIレスポンスを書誌レコードに変換
///
/// `items` が無い場合は空リスト。`max_results` 件を超えた分は切り捨てる。
pub fn parse_volumes_response(body: &str, max_results: usize) -> Result<Vec<BookRecord>> {
    let response: VolumesResponse = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("volumes JSONパースエラー: {}", e)))?;

    Ok(response
        .items
        .unwrap_or_default()
        .into_iter()
        .take(max_results)
        .map(|v| BookRecord::from(v.volume_info.unwrap_or_default()))
        .collect())
}
