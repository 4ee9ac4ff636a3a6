use book_scan_common::ScanFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookScanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`book-scan config --set-api-key YOUR_KEY` で設定するか GOOGLE_API_KEY を指定してください")]
    MissingApiKey,

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Common(#[from] book_scan_common::Error),

    #[error("{0}")]
    Scan(#[from] ScanFailure),
}

pub type Result<T> = std::result::Result<T, BookScanError>;
