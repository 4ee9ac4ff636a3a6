//! 画面表示モデル
//!
//! `ScanSession` から描画に必要な情報だけを取り出す。
//! CLI・対話画面・デスクトップの3つのビューが同じモデルを描画する。

use crate::catalog::FALLBACK_BOOKS;
use crate::failure::{NO_BOOKS_FOUND, NO_BOOK_HERE};
use crate::session::{ScanSession, ScanState};
use crate::types::{BookRecord, StaticBookRecord};

/// 結果リストの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub title: String,
    pub authors: String,
    pub summary: String,
}

impl From<&BookRecord> for BookRow {
    fn from(record: &BookRecord) -> Self {
        Self {
            title: record.title().to_string(),
            authors: record.authors_line(),
            summary: record.description().to_string(),
        }
    }
}

impl From<&StaticBookRecord> for BookRow {
    fn from(record: &StaticBookRecord) -> Self {
        Self {
            title: record.title.to_string(),
            authors: record.author.to_string(),
            summary: record.summary.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenBody {
    /// スキャン前の固定リスト
    Fallback(&'static [StaticBookRecord]),
    Loading,
    Message(String),
    Books(Vec<BookRow>),
}

impl ScreenBody {
    /// 表示する行（Fallback / Books 以外は空）
    pub fn rows(&self) -> Vec<BookRow> {
        match self {
            ScreenBody::Fallback(books) => books.iter().map(BookRow::from).collect(),
            ScreenBody::Books(rows) => rows.clone(),
            ScreenBody::Loading | ScreenBody::Message(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenModel {
    pub button_label: &'static str,
    pub body: ScreenBody,
}

impl ScreenModel {
    pub fn from_session(session: &ScanSession) -> Self {
        let body = match session.state() {
            ScanState::Idle | ScanState::Scanning => {
                if session.has_completed_scan() {
                    ScreenBody::Message(NO_BOOK_HERE.to_string())
                } else {
                    ScreenBody::Fallback(&FALLBACK_BOOKS)
                }
            }
            ScanState::Processing => ScreenBody::Loading,
            ScanState::Error(message) => ScreenBody::Message(message.clone()),
            ScanState::Results(books) if books.is_empty() => {
                ScreenBody::Message(NO_BOOKS_FOUND.to_string())
            }
            ScanState::Results(books) => ScreenBody::Books(books.iter().map(BookRow::from).collect()),
        };

        Self {
            button_label: session.button_label(),
            body,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.body == ScreenBody::Loading
    }
}
