//! テスト用のフェイク実装

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use book_scan::books::BookSearcher;
use book_scan::camera::{Camera, PermissionStatus};
use book_scan::encoder::ImageEncoder;
use book_scan::error::{BookScanError, Result};
use book_scan::pipeline::ScanPipeline;
use book_scan::vision::TextDetector;
use book_scan_common::{parse_annotate_response, parse_volumes_response, BookRecord, CapturedImage};

pub struct FakeEncoder {
    pub payload: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeEncoder {
    pub fn ok(payload: &str) -> Self {
        Self { payload: Some(payload.to_string()), calls: AtomicUsize::new(0) }
    }

    pub fn failing() -> Self {
        Self { payload: None, calls: AtomicUsize::new(0) }
    }
}

impl ImageEncoder for FakeEncoder {
    fn encode(&self, _image: &CapturedImage) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payload
            .clone()
            .ok_or_else(|| BookScanError::ImageLoad("読み込み失敗".into()))
    }
}

/// Vision APIのレスポンスJSONを返すフェイク
pub struct FakeDetector {
    pub response: std::result::Result<String, String>,
    pub calls: AtomicUsize,
    pub last_payload: Mutex<Option<String>>,
}

impl FakeDetector {
    pub fn body(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub fn network_error() -> Self {
        Self {
            response: Err("connection refused".to_string()),
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }
}

#[async_trait]
impl TextDetector for FakeDetector {
    async fn detect_text(&self, image_base64: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(image_base64.to_string());
        match &self.response {
            Ok(body) => Ok(parse_annotate_response(body)?),
            Err(e) => Err(BookScanError::ApiCall(e.clone())),
        }
    }
}

/// Books APIのレスポンスJSONを返すフェイク
pub struct FakeSearcher {
    pub response: std::result::Result<String, String>,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl FakeSearcher {
    pub fn body(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn network_error() -> Self {
        Self {
            response: Err("timeout".to_string()),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BookSearcher for FakeSearcher {
    async fn search_books(&self, query: &str) -> Result<Vec<BookRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        match &self.response {
            Ok(body) => Ok(parse_volumes_response(body, 20)?),
            Err(e) => Err(BookScanError::ApiCall(e.clone())),
        }
    }
}

pub struct Fakes {
    pub encoder: Arc<FakeEncoder>,
    pub detector: Arc<FakeDetector>,
    pub searcher: Arc<FakeSearcher>,
}

impl Fakes {
    pub fn new(encoder: FakeEncoder, detector: FakeDetector, searcher: FakeSearcher) -> Self {
        Self {
            encoder: Arc::new(encoder),
            detector: Arc::new(detector),
            searcher: Arc::new(searcher),
        }
    }

    pub fn pipeline(&self) -> ScanPipeline {
        ScanPipeline::new(self.encoder.clone(), self.detector.clone(), self.searcher.clone())
    }

    pub fn detector_calls(&self) -> usize {
        self.detector.calls.load(Ordering::SeqCst)
    }

    pub fn searcher_calls(&self) -> usize {
        self.searcher.calls.load(Ordering::SeqCst)
    }
}

/// 撮影結果を順に返すカメラ
pub struct FakeCamera {
    pub permission: PermissionStatus,
    pub grant_on_request: bool,
    pub permission_requests: usize,
    pub shots: VecDeque<Option<String>>,
}

impl FakeCamera {
    pub fn granted(shots: &[Option<&str>]) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            grant_on_request: true,
            permission_requests: 0,
            shots: shots.iter().map(|s| s.map(str::to_string)).collect(),
        }
    }

    pub fn undetermined(grant_on_request: bool) -> Self {
        Self {
            permission: PermissionStatus::Undetermined,
            grant_on_request,
            permission_requests: 0,
            shots: VecDeque::from(vec![Some("cover.jpg".to_string())]),
        }
    }
}

#[async_trait]
impl Camera for FakeCamera {
    fn permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn request_permission(&mut self) -> PermissionStatus {
        self.permission_requests += 1;
        self.permission = if self.grant_on_request {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        self.permission
    }

    async fn take_picture(&mut self) -> Result<CapturedImage> {
        match self.shots.pop_front().flatten() {
            Some(uri) => Ok(CapturedImage::new(uri)),
            None => Err(BookScanError::ImageLoad("撮影できませんでした".into())),
        }
    }
}

pub const THINGS_FALL_APART_OCR: &str =
    r#"{"responses":[{"fullTextAnnotation":{"text":"Things Fall Apart"}}]}"#;

pub const THINGS_FALL_APART_VOLUMES: &str = r#"{"items":[{"volumeInfo":{
    "title":"Things Fall Apart",
    "authors":["Chinua Achebe"],
    "description":"..."
}}]}"#;
