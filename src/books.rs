//! Books API連携（書誌検索）

use async_trait::async_trait;
use book_scan_common::{parse_volumes_response, BookRecord};

use crate::config::MAX_RESULTS_CAP;
use crate::error::{BookScanError, Result};

const VOLUMES_PATH: &str = "/books/v1/volumes";

#[async_trait]
pub trait BookSearcher: Send + Sync {
    /// 検索結果（最大20件、0件は正常）
    async fn search_books(&self, query: &str) -> Result<Vec<BookRecord>>;
}

pub struct BooksClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_results: usize,
}

impl BooksClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            max_results: MAX_RESULTS_CAP,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.clamp(1, MAX_RESULTS_CAP);
        self
    }

    /// 検索URL（クエリは前後の空白を除いてからエスケープ）
    pub fn volumes_url(&self, query: &str) -> String {
        format!(
            "{}{}?key={}&q={}&maxResults={}",
            self.endpoint,
            VOLUMES_PATH,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query.trim()),
            self.max_results
        )
    }
}

#[async_trait]
impl BookSearcher for BooksClient {
    async fn search_books(&self, query: &str) -> Result<Vec<BookRecord>> {
        tracing::info!(query = query.trim(), "書誌検索をリクエスト");

        let response = self.http.get(self.volumes_url(query)).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BookScanError::ApiCall(format!("Books API error: {}", status)));
        }

        let books = parse_volumes_response(&body, self.max_results)
            .map_err(|e| BookScanError::ApiParse(e.to_string()))?;
        tracing::info!(count = books.len(), "書誌検索完了");
        Ok(books)
    }
}
