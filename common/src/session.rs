//! スキャン状態機械
//!
//! Idle → Scanning → Processing → {Results | Error}
//!
//! Processingに入るたびに世代番号付きの `ScanTicket` を発行する。
//! 新しいスキャンが始まると世代が進み、古いパイプラインの結果は破棄される。

use crate::failure::ScanFailure;
use crate::types::{BookRecord, CapturedImage};

pub const LABEL_SCAN: &str = "Scan Book Cover";
pub const LABEL_CAPTURE: &str = "Capture";
pub const LABEL_RESCAN: &str = "Rescan Book Cover";

/// 画面の状態（常にどれか1つ）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    Idle,
    /// カメラ起動中
    Scanning,
    /// リモート応答待ち
    Processing,
    Error(String),
    Results(Vec<BookRecord>),
}

/// パイプライン1回分の結果
pub type ScanOutcome = std::result::Result<Vec<BookRecord>, ScanFailure>;

/// Processing 1回分のハンドル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket {
    generation: u64,
}

impl ScanTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct ScanSession {
    state: ScanState,
    captured: Option<CapturedImage>,
    generation: u64,
    completed_cycles: u64,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn captured_image(&self) -> Option<&CapturedImage> {
        self.captured.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == ScanState::Processing
    }

    pub fn has_completed_scan(&self) -> bool {
        self.completed_cycles > 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// キャプチャボタンの表示
    pub fn button_label(&self) -> &'static str {
        if self.captured.is_some() {
            LABEL_RESCAN
        } else if self.state == ScanState::Scanning {
            LABEL_CAPTURE
        } else {
            LABEL_SCAN
        }
    }

    /// カメラを起動する（何度呼んでも Scanning・画像なしになる）
    ///
    /// 実行中のパイプラインがあれば、その結果は以降破棄される。
    pub fn start_scanning(&mut self) {
        if self.state == ScanState::Processing {
            tracing::debug!(generation = self.generation, "処理中のスキャンを破棄");
        }
        self.generation += 1;
        self.captured = None;
        self.state = ScanState::Scanning;
    }

    /// 撮影失敗。Scanning以外では何もしない
    pub fn fail_capture(&mut self, failure: ScanFailure) -> bool {
        if self.state != ScanState::Scanning {
            tracing::warn!(state = ?self.state, "Scanning以外で撮影失敗が通知された");
            return false;
        }
        self.captured = None;
        self.state = ScanState::Error(failure.user_message());
        self.completed_cycles += 1;
        true
    }

    /// 撮影成功。Scanning以外では `None`
    pub fn begin_processing(&mut self, image: CapturedImage) -> Option<ScanTicket> {
        if self.state != ScanState::Scanning {
            tracing::warn!(state = ?self.state, "Scanning以外で撮影結果が通知された");
            return None;
        }
        self.captured = Some(image);
        self.state = ScanState::Processing;
        Some(ScanTicket {
            generation: self.generation,
        })
    }

    /// パイプラインの結果を反映する
    ///
    /// チケットが古い場合は破棄して `false` を返す。
    pub fn complete(&mut self, ticket: ScanTicket, outcome: ScanOutcome) -> bool {
        if ticket.generation != self.generation || self.state != ScanState::Processing {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "古いスキャン結果を破棄"
            );
            return false;
        }

        self.state = match outcome {
            Ok(books) => ScanState::Results(books),
            Err(failure) => ScanState::Error(failure.user_message()),
        };
        self.completed_cycles += 1;
        true
    }
}
