use book_scan_common::{ScanOutcome, ScanTicket};

pub enum UiMessage {
    ScanDone { ticket: ScanTicket, outcome: ScanOutcome },
    Preview(PreviewData),
}

pub struct PreviewData {
    pub uri: String,
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}
