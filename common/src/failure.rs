//! スキャン失敗の分類
//!
//! 各失敗は発生したステップで1つのユーザー向けメッセージに変換される。
//! Displayがそのままメッセージになる。

use thiserror::Error;

/// 書籍が0件だった場合の表示
pub const NO_BOOKS_FOUND: &str = "No books found";

/// スキャン完了後、次の結果が出るまでの表示
pub const NO_BOOK_HERE: &str = "No book here";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFailure {
    #[error("Camera permission is required to scan a book cover.")]
    PermissionDenied,

    #[error("Error taking picture. Please try again!")]
    Capture,

    #[error("Error reading captured image. Please try again!")]
    Encoding,

    #[error("Error detecting text from image. Please try again!")]
    NoTextDetected,

    #[error("Error fetching book info. Please try again!")]
    Lookup,
}

impl ScanFailure {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
