use clap::Parser;
use book_scan::{books, camera, cli, config, encoder, error, logging, orchestrator, pipeline, view, vision};
use book_scan_common::{CapturedImage, ScanFailure, ScanState, FALLBACK_BOOKS};
use books::{BookSearcher, BooksClient};
use cli::{Cli, Commands};
use config::Config;
use encoder::{Base64Encoder, ImageEncoder};
use error::{BookScanError, Result};
use orchestrator::{ScanEvent, ScanOrchestrator};
use pipeline::ScanPipeline;
use vision::{TextDetector, VisionClient};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Scan { image, json } => {
            println!("📚 book-scan - 表紙スキャン\n");

            let config = Config::load()?;
            let pipeline = ScanPipeline::from_config(&config)?;
            let mut orchestrator = ScanOrchestrator::new(camera::FileCamera::new(&image), pipeline);

            if let ScanEvent::PermissionDenied(_) = orchestrator.start_scan().await {
                return Err(BookScanError::Scan(ScanFailure::PermissionDenied));
            }

            let pb = view::spinner("書誌情報を検索中...");
            orchestrator.capture().await;
            pb.finish_and_clear();

            match orchestrator.state() {
                ScanState::Results(books) if json => {
                    println!("{}", serde_json::to_string_pretty(books)?);
                }
                _ => print!("{}", view::render_screen(&orchestrator.screen())),
            }
        }

        Commands::Screen => {
            println!("📚 book-scan - 対話スキャン\n");

            let config = Config::load()?;
            let pipeline = ScanPipeline::from_config(&config)?;
            let mut orchestrator = ScanOrchestrator::new(camera::PromptCamera::new(), pipeline);
            view::run_interactive(&mut orchestrator).await?;
        }

        Commands::Detect { image } => {
            let config = Config::load()?;
            let api_key = config.get_api_key()?;
            let http = pipeline::http_client(&config)?;

            let encoded = Base64Encoder::new(config.max_image_size)
                .encode(&CapturedImage::new(image.to_string_lossy()))?;
            let client = VisionClient::new(http, &config.vision_endpoint, &api_key);
            let text = client.detect_text(&encoded).await?;

            if text.trim().is_empty() {
                println!("{}", ScanFailure::NoTextDetected);
            } else {
                println!("{}", text);
            }
        }

        Commands::Search { query, json } => {
            let config = Config::load()?;
            let api_key = config.get_api_key()?;
            let http = pipeline::http_client(&config)?;

            let client = BooksClient::new(http, &config.books_endpoint, &api_key)
                .with_max_results(config.effective_max_results());
            let books = client.search_books(&query.join(" ")).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&books)?);
            } else if books.is_empty() {
                println!("{}", book_scan_common::NO_BOOKS_FOUND);
            } else {
                for book in &books {
                    println!("{}", view::render_row(&book.into()));
                }
            }
        }

        Commands::Books => {
            for book in FALLBACK_BOOKS.iter() {
                println!("{}", view::render_row(&book.into()));
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = Config::load_or_default()?;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  Vision API: {}", config.vision_endpoint);
                println!("  Books API: {}", config.books_endpoint);
                println!("  最大件数: {}", config.effective_max_results());
                println!("  最大画像サイズ: {}px", config.max_image_size);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
