//! 書籍スキャンの型定義
//!
//! CLIとデスクトップで共有される型:
//! - CapturedImage: 撮影した表紙画像へのハンドル
//! - BookRecord: 書誌検索の結果1件
//! - StaticBookRecord: スキャン前に表示する固定リストの1件

use serde::{Deserialize, Serialize};

/// 撮影した画像へのローカル参照（パス / file:// / data: URI）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedImage {
    uri: String,
}

impl CapturedImage {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// 書誌検索の結果（構築後は不変）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    title: String,
    authors: Vec<String>,
    description: String,
}

impl BookRecord {
    pub fn new(title: impl Into<String>, authors: Vec<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors,
            description: description.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 著者をカンマ区切りで連結（末尾にカンマは付けない）
    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }
}

/// 固定リストの書籍
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaticBookRecord {
    pub title: &'static str,
    pub author: &'static str,
    pub summary: &'static str,
}
