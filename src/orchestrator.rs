//! スキャンオーケストレーター
//!
//! カメラ・パイプライン・状態機械をまとめ、ボタン操作を状態遷移に変換する。

use book_scan_common::{ScanFailure, ScanSession, ScanState, ScanTicket, ScreenModel};

use crate::camera::{Camera, PermissionStatus};
use crate::pipeline::ScanPipeline;

/// ボタン操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// カメラ起動（Scanning）
    CameraReady,
    /// 権限が得られず状態は変わらない
    PermissionDenied(PermissionStatus),
    /// 撮影失敗（Error）
    CaptureFailed,
    /// パイプライン完了。`applied` が false なら古い結果として破棄された
    Finished { applied: bool },
    /// 現在の状態では何もしない
    Ignored,
}

pub struct ScanOrchestrator<C: Camera> {
    camera: C,
    pipeline: ScanPipeline,
    session: ScanSession,
}

impl<C: Camera> ScanOrchestrator<C> {
    pub fn new(camera: C, pipeline: ScanPipeline) -> Self {
        Self {
            camera,
            pipeline,
            session: ScanSession::new(),
        }
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn state(&self) -> &ScanState {
        self.session.state()
    }

    pub fn screen(&self) -> ScreenModel {
        ScreenModel::from_session(&self.session)
    }

    /// キャプチャボタン押下
    pub async fn press(&mut self) -> ScanEvent {
        if self.session.state() == &ScanState::Scanning {
            self.capture().await
        } else {
            self.start_scan().await
        }
    }

    /// 「Scan Book Cover」: 権限を確認してカメラを起動する
    pub async fn start_scan(&mut self) -> ScanEvent {
        if !self.camera.permission().is_granted() {
            let status = self.camera.request_permission().await;
            if !status.is_granted() {
                tracing::warn!(?status, "カメラ権限がありません");
                return ScanEvent::PermissionDenied(status);
            }
        }

        self.session.start_scanning();
        tracing::debug!(generation = self.session.generation(), "カメラ起動");
        ScanEvent::CameraReady
    }

    /// 「Capture」: 撮影してパイプラインを実行する
    pub async fn capture(&mut self) -> ScanEvent {
        match self.shoot().await {
            Ok(ticket) => self.process(ticket).await,
            Err(event) => event,
        }
    }

    /// 撮影のみ行い、Processingに入る
    pub async fn shoot(&mut self) -> Result<ScanTicket, ScanEvent> {
        if self.session.state() != &ScanState::Scanning {
            return Err(ScanEvent::Ignored);
        }

        let image = match self.camera.take_picture().await {
            Ok(image) => image,
            Err(e) => {
                tracing::error!("撮影エラー: {}", e);
                self.session.fail_capture(ScanFailure::Capture);
                return Err(ScanEvent::CaptureFailed);
            }
        };

        self.session.begin_processing(image).ok_or(ScanEvent::Ignored)
    }

    /// Processing中の画像でパイプラインを実行し、結果を反映する
    pub async fn process(&mut self, ticket: ScanTicket) -> ScanEvent {
        // 再スキャン済みなら古い撮影分でAPIを呼ばない
        if ticket.generation() != self.session.generation() {
            tracing::debug!(
                ticket = ticket.generation(),
                current = self.session.generation(),
                "古いチケットのためパイプラインを実行しません"
            );
            return ScanEvent::Finished { applied: false };
        }

        let Some(image) = self.session.captured_image().cloned() else {
            return ScanEvent::Ignored;
        };

        let outcome = self.pipeline.run(&image).await;
        let applied = self.session.complete(ticket, outcome);
        ScanEvent::Finished { applied }
    }
}
