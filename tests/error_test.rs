//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

mod support;

use book_scan::camera::{Camera, FileCamera, PermissionStatus};
use book_scan::config::Config;
use book_scan::encoder::{Base64Encoder, ImageEncoder};
use book_scan::error::BookScanError;
use book_scan::orchestrator::{ScanEvent, ScanOrchestrator};
use book_scan_common::{CapturedImage, ScanFailure, ScanState};
use support::*;
use tempfile::tempdir;

/// 存在しない画像のエンコード
#[test]
fn test_encode_nonexistent_image() {
    let result = Base64Encoder::default().encode(&CapturedImage::new("/nonexistent/path/12345.jpg"));

    let err = result.unwrap_err();
    assert!(matches!(err, BookScanError::ImageLoad(_)));
}

/// 存在しない画像は権限エラーではなく撮影失敗になる
#[tokio::test]
async fn test_file_camera_missing_image_is_capture_failure() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut camera = FileCamera::new(dir.path().join("missing.jpg"));
    assert_eq!(camera.request_permission().await, PermissionStatus::Granted);

    let fakes = Fakes::new(
        FakeEncoder::ok("QUJD"),
        FakeDetector::body(THINGS_FALL_APART_OCR),
        FakeSearcher::body(THINGS_FALL_APART_VOLUMES),
    );
    let mut orchestrator = ScanOrchestrator::new(camera, fakes.pipeline());

    assert_eq!(orchestrator.start_scan().await, ScanEvent::CameraReady);
    assert_eq!(orchestrator.capture().await, ScanEvent::CaptureFailed);
    assert_eq!(
        orchestrator.state(),
        &ScanState::Error(ScanFailure::Capture.user_message())
    );
    assert_eq!(fakes.detector_calls(), 0);
}

/// BookScanErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        BookScanError::Config("設定エラー".to_string()),
        BookScanError::MissingApiKey,
        BookScanError::ImageLoad("cover.jpg".to_string()),
        BookScanError::ApiCall("Vision API error: 403 Forbidden".to_string()),
        BookScanError::ApiParse("パース失敗".to_string()),
        BookScanError::Scan(ScanFailure::Lookup),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let display = format!("{}", BookScanError::MissingApiKey);

    assert!(display.contains("APIキー"));
    assert!(display.contains("book-scan config"));
}

/// スキャン失敗はユーザー向けメッセージをそのまま表示
#[test]
fn test_scan_failure_display() {
    let err: BookScanError = ScanFailure::NoTextDetected.into();
    assert_eq!(
        format!("{}", err),
        "Error detecting text from image. Please try again!"
    );
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: BookScanError = io_err.into();

    assert!(matches!(err, BookScanError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: BookScanError = json_err.into();

    assert!(matches!(err, BookScanError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = book_scan_common::Error::Parse("パースエラー".to_string());
    let err: BookScanError = common_err.into();

    assert!(matches!(err, BookScanError::Common(_)));
    assert!(format!("{}", err).contains("パースエラー"));
}

/// 壊れた設定ファイル
#[test]
fn test_corrupted_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(BookScanError::JsonParse(_))));
}
