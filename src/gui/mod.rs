//! GUI module for the application.
//!
//! Provides a graphical interface using egui/eframe: a small control window
//! that switches into a screenshot mode showing the frozen display for
//! drag-selection.

pub mod render;
pub mod state;

use std::time::Duration;

use eframe::egui::{self, Vec2};

use crate::capture::DisplayCapture;
use crate::config::AppConfig;
use crate::error::CaptureError;
use crate::nutrition::{missing_fields_warning, render_report, NutritionExtractor};
use crate::pipeline::{process_capture, CaptureResult};

use state::{GuiState, PendingSnapshot, ScreenshotSession, OFF_SCREEN};

/// Main GUI application struct.
pub struct GuiApp {
    /// Application state.
    state: GuiState,
    config: &'static AppConfig,
    extractor: NutritionExtractor,
}

impl GuiApp {
    /// Create a new GUI application instance.
    pub fn new(config: &'static AppConfig, extractor: NutritionExtractor) -> Self {
        Self {
            state: GuiState::default(),
            config,
            extractor,
        }
    }

    /// Handle "Screenshot Mode" button click.
    ///
    /// Entering moves the control window off screen first; the display is
    /// frozen by `take_pending_snapshot` once it is gone.
    fn toggle_screenshot_mode(&mut self, ctx: &egui::Context) {
        if self.state.session.take().is_some() {
            log::info!("Exiting screenshot mode");
            ctx.send_viewport_cmd(egui::ViewportCommand::Maximized(false));
            return;
        }
        if self.state.pending_snapshot.is_some() {
            return;
        }

        log::info!("Entering screenshot mode");
        let (now, restore_to) =
            ctx.input(|i| (i.time, i.viewport().outer_rect.map(|rect| rect.min)));
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(OFF_SCREEN));
        self.state.pending_snapshot = Some(PendingSnapshot {
            requested_at: now,
            restore_to,
        });
        ctx.request_repaint();
    }

    /// Freezes the display once the control window has been off screen long
    /// enough, then brings the window back maximized over it.
    fn take_pending_snapshot(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.state.pending_snapshot else {
            return;
        };

        let now = ctx.input(|i| i.time);
        if !pending.is_due(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(pending.remaining(now)));
            return;
        }
        self.state.pending_snapshot = None;

        let snapshot = DisplayCapture.snapshot_primary();
        if let Some(pos) = pending.restore_to {
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(pos));
        }

        match snapshot {
            Ok(snapshot) => {
                self.state.session = Some(ScreenshotSession::new(snapshot));
                ctx.send_viewport_cmd(egui::ViewportCommand::Maximized(true));
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
            Err(e) => {
                log::error!("Failed to snapshot display: {:#}", e);
                self.state.result_text = CaptureError::Capture(e).to_string();
            }
        }
    }

    /// Validates the selection, then runs OCR and extraction on it.
    fn run_capture(&self, session: &ScreenshotSession) -> Result<CaptureResult, CaptureError> {
        // Reject an empty selection before touching the OCR engine
        session.machine.capture_region()?;

        let engine = crate::ocr::shared_engine(&self.config.ocr)?;
        process_capture(
            session.machine.selection(),
            &session.snapshot,
            engine,
            &self.extractor,
            &crate::paths::get_screenshots_dir(),
        )
    }

    /// Handle "Capture" button click.
    fn handle_capture(&mut self, ctx: &egui::Context) {
        let Some(session) = &self.state.session else {
            return;
        };

        match self.run_capture(session) {
            Ok(result) => {
                let mut text = format!("{}\n{}", result.summary(), render_report(&result.data));
                if let Some(warning) = missing_fields_warning(&result.data, &self.config.extraction) {
                    text.push_str(&format!("\n{}", warning));
                }
                self.state.result_text = text;

                // Leave screenshot mode after a completed capture
                self.state.session = None;
                ctx.send_viewport_cmd(egui::ViewportCommand::Maximized(false));
            }
            Err(e) => {
                log::warn!("Capture failed: {}", e);
                self.state.result_text = e.to_string();
            }
        }
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.take_pending_snapshot(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let actions = render::render_controls(ui, &self.state);

            if actions.toggle_screenshot_mode {
                self.toggle_screenshot_mode(ctx);
            }
            if actions.capture {
                self.handle_capture(ctx);
            }
            if actions.close {
                self.state.confirm_close = true;
            }

            render::render_result(ui, &self.state.result_text);

            if let Some(session) = self.state.session.as_mut() {
                ui.add_space(8.0);
                render::render_selection_canvas(ui, session);
            }
        });

        if self.state.confirm_close {
            match render::render_close_confirmation(ctx) {
                Some(true) => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                Some(false) => self.state.confirm_close = false,
                None => {}
            }
        }
    }
}

/// Run the GUI application.
/// This function blocks until the window is closed.
pub fn run_gui(config: &'static AppConfig, extractor: NutritionExtractor) -> eframe::Result<()> {
    log::debug!("GUI: Creating native options...");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(420.0, 260.0))
            .with_min_inner_size(Vec2::new(300.0, 220.0))
            .with_title("Screen Reader"),
        ..Default::default()
    };

    eframe::run_native(
        "Screen Reader",
        options,
        Box::new(move |_cc| {
            log::debug!("GUI: Creating GuiApp instance...");
            Ok(Box::new(GuiApp::new(config, extractor)))
        }),
    )
}
