use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};

use book_scan::config::Config;
use book_scan::pipeline::ScanPipeline;
use book_scan_common::{
    BookRow, CapturedImage, ScanFailure, ScanSession, ScanState, ScanTicket, ScreenBody, ScreenModel,
};

use crate::io::load_preview;
use crate::model::{PreviewData, UiMessage};

const ACCENT: Color32 = Color32::from_rgb(14, 134, 212);
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

pub struct ScanApp {
    session: ScanSession,
    pipeline: Option<ScanPipeline>,
    status: String,
    tx: Sender<UiMessage>,
    rx: Receiver<UiMessage>,
    preview: Option<(String, egui::TextureHandle)>,
    pending_preview: Option<PreviewData>,
}

impl ScanApp {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let (pipeline, status) = match Config::load().and_then(|c| ScanPipeline::from_config(&c)) {
            Ok(pipeline) => (Some(pipeline), String::new()),
            Err(err) => {
                tracing::error!("パイプライン初期化失敗: {}", err);
                (None, err.to_string())
            }
        };

        Self {
            session: ScanSession::new(),
            pipeline,
            status,
            tx,
            rx,
            preview: None,
            pending_preview: None,
        }
    }

    fn handle_book_scan(&mut self, ctx: &egui::Context) {
        if self.session.state() == &ScanState::Scanning {
            self.take_picture(ctx);
        } else {
            self.session.start_scanning();
            self.preview = None;
        }
    }

    /// カメラの代わりにファイルダイアログで表紙画像を選ぶ
    fn take_picture(&mut self, ctx: &egui::Context) {
        let picked = rfd::FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .pick_file();

        let Some(path) = picked else {
            tracing::warn!("画像が選択されませんでした");
            self.session.fail_capture(ScanFailure::Capture);
            return;
        };

        let image = CapturedImage::new(path.to_string_lossy());
        let Some(ticket) = self.session.begin_processing(image.clone()) else {
            return;
        };
        self.request_preview(&image, ctx);
        self.run_pipeline(ticket, image, ctx);
    }

    fn run_pipeline(&mut self, ticket: ScanTicket, image: CapturedImage, ctx: &egui::Context) {
        let Some(pipeline) = self.pipeline.clone() else {
            self.session.complete(ticket, Err(ScanFailure::NoTextDetected));
            return;
        };
        let sender = self.tx.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime.block_on(pipeline.run(&image)),
                Err(err) => {
                    tracing::error!("ランタイム生成失敗: {}", err);
                    Err(ScanFailure::NoTextDetected)
                }
            };
            let _ = sender.send(UiMessage::ScanDone { ticket, outcome });
            ctx.request_repaint();
        });
    }

    fn request_preview(&self, image: &CapturedImage, ctx: &egui::Context) {
        let sender = self.tx.clone();
        let ctx = ctx.clone();
        let uri = image.uri().to_string();

        std::thread::spawn(move || match load_preview(&uri) {
            Ok(data) => {
                let _ = sender.send(UiMessage::Preview(data));
                ctx.request_repaint();
            }
            Err(err) => tracing::warn!("プレビュー読み込み失敗: {:#}", err),
        });
    }

    fn poll_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::ScanDone { ticket, outcome } => {
                    self.session.complete(ticket, outcome);
                }
                UiMessage::Preview(data) => self.pending_preview = Some(data),
            }
        }
    }

    fn process_pending_preview(&mut self, ctx: &egui::Context) {
        let Some(data) = self.pending_preview.take() else {
            return;
        };
        // 再スキャン後に届いた古いプレビューは捨てる
        let current = self.session.captured_image().map(|i| i.uri().to_string());
        if current.as_deref() != Some(data.uri.as_str()) || data.size[0] == 0 || data.size[1] == 0 {
            return;
        }
        let color_image = egui::ColorImage::from_rgba_unmultiplied(data.size, &data.pixels);
        let texture = ctx.load_texture(&data.uri, color_image, egui::TextureOptions::default());
        self.preview = Some((data.uri, texture));
    }

    fn render_top(&mut self, ui: &mut egui::Ui, model: &ScreenModel) {
        ui.vertical_centered(|ui| {
            let view_size = egui::vec2(ui.available_width() * 0.9, 150.0);

            if self.session.state() == &ScanState::Scanning {
                egui::Frame::none()
                    .fill(Color32::from_rgb(24, 28, 40))
                    .rounding(egui::Rounding::same(10.0))
                    .show(ui, |ui| {
                        ui.allocate_ui_with_layout(
                            view_size,
                            egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                            |ui| {
                                ui.label(RichText::new("📷 Camera ready").color(Color32::from_gray(200)));
                            },
                        );
                    });
                ui.add_space(20.0);
            } else if self.session.captured_image().is_some() {
                if let Some((_, texture)) = &self.preview {
                    ui.add(egui::Image::new(texture).max_size(view_size));
                } else {
                    ui.allocate_ui_with_layout(
                        view_size,
                        egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                        |ui| {
                            ui.label("Loading...");
                        },
                    );
                }
                ui.add_space(20.0);
            }

            let button = egui::Button::new(RichText::new(model.button_label).color(Color32::WHITE))
                .fill(ACCENT)
                .min_size(egui::vec2(160.0, 40.0));
            if ui.add_enabled(self.pipeline.is_some(), button).clicked() {
                self.handle_book_scan(ui.ctx());
            }
            ui.add_space(20.0);
        });
    }

    fn render_body(&self, ui: &mut egui::Ui, body: &ScreenBody) {
        match body {
            ScreenBody::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.add(egui::Spinner::new().size(32.0).color(ACCENT));
                });
            }
            ScreenBody::Message(message) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(RichText::new(message).size(16.0));
                });
            }
            ScreenBody::Fallback(_) | ScreenBody::Books(_) => {
                for (index, row) in body.rows().iter().enumerate() {
                    render_row(ui, index, row);
                    ui.add_space(8.0);
                }
            }
        }
    }
}

impl Default for ScanApp {
    fn default() -> Self {
        Self::new()
    }
}

fn render_row(ui: &mut egui::Ui, index: usize, row: &BookRow) {
    egui::Frame::none()
        .fill(Color32::from_rgb(31, 35, 48))
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            egui::Grid::new(format!("book_{}", index))
                .min_col_width(60.0)
                .show(ui, |ui| {
                    ui.label(RichText::new("Title:").strong());
                    ui.add(egui::Label::new(row.title.as_str()).wrap(true));
                    ui.end_row();

                    ui.label(RichText::new("Author:").strong());
                    ui.label(row.authors.as_str());
                    ui.end_row();
                });
            ui.label(RichText::new("Summary:").strong());
            ui.add(egui::Label::new(row.summary.as_str()).wrap(true));
        });
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("cjk_fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("cjk_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl eframe::App for ScanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_messages();
        self.process_pending_preview(ctx);
        if self.session.is_loading() {
            ctx.request_repaint();
        }

        let model = ScreenModel::from_session(&self.session);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if !self.status.is_empty() {
                ui.label(RichText::new(&self.status).color(Color32::from_rgb(246, 196, 69)));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(10.0);
            self.render_top(ui, &model);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_body(ui, &model.body);
                });
        });
    }
}
