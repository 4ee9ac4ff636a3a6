//! 端末ビュー
//!
//! `ScreenModel` をテキストに描画する。対話画面 (`screen` コマンド) もここ。

use std::fmt::Write as _;
use std::time::Duration;

use book_scan_common::{BookRow, ScanFailure, ScanState, ScreenBody, ScreenModel};
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};

use crate::camera::Camera;
use crate::error::Result;
use crate::orchestrator::{ScanEvent, ScanOrchestrator};

const QUIT_LABEL: &str = "Quit";

/// 画面全体を文字列に描画
pub fn render_screen(model: &ScreenModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[ {} ]", model.button_label);
    let _ = writeln!(out);

    match &model.body {
        ScreenBody::Loading => {
            let _ = writeln!(out, "  ...");
        }
        ScreenBody::Message(message) => {
            let _ = writeln!(out, "  {}", message);
        }
        ScreenBody::Fallback(_) | ScreenBody::Books(_) => {
            for row in model.body.rows() {
                out.push_str(&render_row(&row));
                out.push('\n');
            }
        }
    }
    out
}

/// 結果1行分（タイトル・著者・概要）
pub fn render_row(row: &BookRow) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Title:   {}", indent_continuation(&row.title, "         "));
    let _ = writeln!(out, "Author:  {}", row.authors);
    let _ = writeln!(out, "Summary:");
    for line in row.summary.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    out
}

/// 2行目以降をラベル幅だけ字下げする
fn indent_continuation(text: &str, indent: &str) -> String {
    text.lines().collect::<Vec<_>>().join(&format!("\n{}", indent))
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 対話画面: ボタン操作を繰り返す
pub async fn run_interactive<C: Camera>(orchestrator: &mut ScanOrchestrator<C>) -> Result<()> {
    loop {
        let model = orchestrator.screen();
        println!("{}", render_screen(&model));

        let choice = Select::new()
            .items(&[model.button_label, QUIT_LABEL])
            .default(0)
            .interact()?;
        if choice == 1 {
            return Ok(());
        }

        match press_with_spinner(orchestrator).await {
            ScanEvent::PermissionDenied(_) => {
                println!("{}", ScanFailure::PermissionDenied);
            }
            ScanEvent::Finished { applied: false } => {
                tracing::debug!("古い結果を破棄しました");
            }
            _ => {}
        }
    }
}

/// `press` と同じだが、処理中はスピナーを表示する
async fn press_with_spinner<C: Camera>(orchestrator: &mut ScanOrchestrator<C>) -> ScanEvent {
    if orchestrator.state() != &ScanState::Scanning {
        return orchestrator.start_scan().await;
    }

    let ticket = match orchestrator.shoot().await {
        Ok(ticket) => ticket,
        Err(event) => return event,
    };

    let pb = spinner("書誌情報を検索中...");
    let event = orchestrator.process(ticket).await;
    pb.finish_and_clear();
    event
}
