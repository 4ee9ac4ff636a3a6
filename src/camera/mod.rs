//! 撮影モジュール
//!
//! カメラ本体と権限管理は外部の仕組みとして `Camera` トレイトの裏に置く。
//! - FileCamera: 指定済みの画像ファイルを撮影結果として返す
//! - PromptCamera: 端末で権限確認と画像パス入力を行う

mod prompt;

pub use prompt::PromptCamera;

use async_trait::async_trait;
use book_scan_common::CapturedImage;
use std::path::PathBuf;

use crate::error::{BookScanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Undetermined,
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

#[async_trait]
pub trait Camera: Send {
    fn permission(&self) -> PermissionStatus;

    async fn request_permission(&mut self) -> PermissionStatus;

    /// 撮影して画像への参照を返す
    async fn take_picture(&mut self) -> Result<CapturedImage>;
}

/// 画像ファイルを撮影結果として扱うカメラ
#[derive(Debug, Clone)]
pub struct FileCamera {
    source: PathBuf,
    permission: PermissionStatus,
}

impl FileCamera {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            permission: PermissionStatus::Undetermined,
        }
    }
}

#[async_trait]
impl Camera for FileCamera {
    fn permission(&self) -> PermissionStatus {
        self.permission
    }

    /// ファイル入力に権限はないため常に許可。ファイルの有無は撮影時に判定する
    async fn request_permission(&mut self) -> PermissionStatus {
        self.permission = PermissionStatus::Granted;
        self.permission
    }

    async fn take_picture(&mut self) -> Result<CapturedImage> {
        if !self.source.is_file() {
            return Err(BookScanError::ImageLoad(format!(
                "画像が見つかりません: {}",
                self.source.display()
            )));
        }
        Ok(CapturedImage::new(self.source.to_string_lossy()))
    }
}
