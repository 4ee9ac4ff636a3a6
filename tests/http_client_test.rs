//! HTTPクライアントテスト
//!
//! ローカルのTCPサーバーに固定レスポンスを返させ、
//! Vision/Books クライアントのステータス処理とリクエスト内容を検証

mod support;

use std::sync::Arc;

use book_scan::books::{BookSearcher, BooksClient};
use book_scan::encoder::Base64Encoder;
use book_scan::error::BookScanError;
use book_scan::pipeline::ScanPipeline;
use book_scan::vision::{TextDetector, VisionClient};
use book_scan_common::{CapturedImage, ScanFailure};
use support::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// 受信したリクエスト（リクエスト行と本文）
struct Received {
    request_line: String,
    body: String,
}

/// 環境のプロキシ設定を無視するクライアント
fn http() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// 1接続だけ受け付けて固定レスポンスを返すサーバー
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let endpoint = format!("http://{}", listener.local_addr().expect("addr"));
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let received = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        received
    });

    (endpoint, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Received {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.expect("read");
        assert!(n > 0, "ヘッダー受信前に切断された");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.expect("read body");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Received {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    }
}

/// Vision API の 500 は ApiCall エラー
#[tokio::test]
async fn test_vision_server_error() {
    let (endpoint, server) = serve_once("500 Internal Server Error", r#"{"error":{}}"#).await;
    let client = VisionClient::new(http(), &endpoint, "KEY");

    let result = client.detect_text("QUJD").await;

    assert!(matches!(result, Err(BookScanError::ApiCall(_))));
    let received = server.await.unwrap();
    assert!(received.request_line.starts_with("POST /v1/images:annotate?key=KEY "));
}

/// Vision API の 200 から認識テキストを取り出す
#[tokio::test]
async fn test_vision_ok_returns_text() {
    let (endpoint, server) = serve_once("200 OK", THINGS_FALL_APART_OCR).await;
    let client = VisionClient::new(http(), &endpoint, "KEY");

    let text = client.detect_text("QUJD").await.unwrap();

    assert_eq!(text, "Things Fall Apart");
    let received = server.await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&received.body).unwrap();
    assert_eq!(body["requests"][0]["image"]["content"], "QUJD");
    assert_eq!(body["requests"][0]["features"][0]["type"], "TEXT_DETECTION");
}

/// Books API の 500 は ApiCall エラー
#[tokio::test]
async fn test_books_server_error() {
    let (endpoint, server) = serve_once("500 Internal Server Error", "").await;
    let client = BooksClient::new(http(), &endpoint, "KEY");

    let result = client.search_books("Things Fall Apart").await;

    assert!(matches!(result, Err(BookScanError::ApiCall(_))));
    server.await.unwrap();
}

/// Books API の 200 をパースし、クエリと件数がURLに載る
#[tokio::test]
async fn test_books_ok_sends_query() {
    let (endpoint, server) = serve_once("200 OK", THINGS_FALL_APART_VOLUMES).await;
    let client = BooksClient::new(http(), &endpoint, "KEY").with_max_results(5);

    let books = client.search_books("  Things Fall Apart\n").await.unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title(), "Things Fall Apart");
    assert_eq!(books[0].authors_line(), "Chinua Achebe");

    let received = server.await.unwrap();
    assert!(received.request_line.starts_with("GET /books/v1/volumes?"));
    assert!(received.request_line.contains("q=Things%20Fall%20Apart&"));
    assert!(received.request_line.contains("maxResults=5"));
}

fn http_pipeline(vision_endpoint: &str, books_endpoint: &str) -> ScanPipeline {
    let http = http();
    ScanPipeline::new(
        Arc::new(Base64Encoder::default()),
        Arc::new(VisionClient::new(http.clone(), vision_endpoint, "KEY")),
        Arc::new(BooksClient::new(http, books_endpoint, "KEY")),
    )
}

fn data_image() -> CapturedImage {
    CapturedImage::new("data:image/jpeg;base64,QUJD")
}

/// OCRの非2xxはテキスト検出エラーとして扱う
#[tokio::test]
async fn test_pipeline_vision_status_maps_to_no_text() {
    let (vision, server) = serve_once("503 Service Unavailable", "").await;

    let outcome = http_pipeline(&vision, "http://127.0.0.1:9").run(&data_image()).await;

    assert_eq!(outcome, Err(ScanFailure::NoTextDetected));
    server.await.unwrap();
}

/// 書誌検索の非2xxは検索エラーとして扱う
#[tokio::test]
async fn test_pipeline_books_status_maps_to_lookup() {
    let (vision, vision_server) = serve_once("200 OK", THINGS_FALL_APART_OCR).await;
    let (books, books_server) = serve_once("500 Internal Server Error", "").await;

    let outcome = http_pipeline(&vision, &books).run(&data_image()).await;

    assert_eq!(outcome, Err(ScanFailure::Lookup));
    vision_server.await.unwrap();
    books_server.await.unwrap();
}
