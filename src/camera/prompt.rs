//! 端末入力によるカメラ

use async_trait::async_trait;
use book_scan_common::CapturedImage;
use dialoguer::{Confirm, Input};
use std::path::Path;

use super::{Camera, PermissionStatus};
use crate::error::{BookScanError, Result};

/// 権限確認と撮影（画像パス入力）を対話的に行う
#[derive(Debug)]
pub struct PromptCamera {
    permission: PermissionStatus,
}

impl PromptCamera {
    pub fn new() -> Self {
        Self {
            permission: PermissionStatus::Undetermined,
        }
    }
}

impl Default for PromptCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Camera for PromptCamera {
    fn permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn request_permission(&mut self) -> PermissionStatus {
        // dialoguer はブロッキングなので専用スレッドで待つ
        let allowed = tokio::task::spawn_blocking(|| {
            Confirm::new()
                .with_prompt("book-scan がカメラ（画像ファイル）を使用することを許可しますか？")
                .default(true)
                .interact()
        })
        .await;

        self.permission = match allowed {
            Ok(Ok(true)) => PermissionStatus::Granted,
            Ok(Ok(false)) => PermissionStatus::Denied,
            Ok(Err(e)) => {
                tracing::warn!("権限確認の入力に失敗: {}", e);
                PermissionStatus::Undetermined
            }
            Err(e) => {
                tracing::warn!("権限確認タスクが異常終了: {}", e);
                PermissionStatus::Undetermined
            }
        };
        self.permission
    }

    async fn take_picture(&mut self) -> Result<CapturedImage> {
        let input: String = tokio::task::spawn_blocking(|| {
            Input::<String>::new()
                .with_prompt("表紙画像のパス")
                .interact_text()
        })
        .await
        .map_err(|e| BookScanError::ImageLoad(format!("入力タスクが異常終了: {}", e)))??;

        picture_from_input(&input)
    }
}

/// 入力されたパスを撮影結果に変換
fn picture_from_input(input: &str) -> Result<CapturedImage> {
    let path = input.trim();
    if path.is_empty() || !Path::new(path).is_file() {
        return Err(BookScanError::ImageLoad(format!("画像が見つかりません: {}", path)));
    }
    Ok(CapturedImage::new(path))
}
