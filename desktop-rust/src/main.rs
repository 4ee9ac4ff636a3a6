mod app;
mod io;
mod model;

use app::{configure_fonts, ScanApp};

fn main() -> eframe::Result<()> {
    book_scan::logging::init(false);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Book Scan",
        options,
        Box::new(|cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(ScanApp::new())
        }),
    )
}
