//! Book Scan Common Library
//!
//! CLIとデスクトップで共有される型・パーサー・スキャン状態機械

pub mod types;
pub mod catalog;
pub mod error;
pub mod failure;
pub mod parser;
pub mod session;
pub mod screen;

pub use types::{BookRecord, CapturedImage, StaticBookRecord};
pub use catalog::FALLBACK_BOOKS;
pub use error::{Error, Result};
pub use failure::{ScanFailure, NO_BOOKS_FOUND, NO_BOOK_HERE};
pub use parser::{parse_annotate_response, parse_volumes_response};
pub use session::{ScanOutcome, ScanSession, ScanState, ScanTicket};
pub use screen::{BookRow, ScreenBody, ScreenModel};
