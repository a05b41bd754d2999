//! GUI application state management.
//!
//! Tracks screenshot mode, the selection on the frozen display image and the
//! text shown in the result box.

use eframe::egui::{pos2, Pos2, Rect, TextureHandle};

use crate::capture::SnapshotCapture;
use crate::selection::{Point, SelectionMachine, SelectionRect};

const IDLE_INSTRUCTIONS: &str = "Click \"Screenshot Mode\" to start";
const SELECT_INSTRUCTIONS: &str = "Drag to select the screen area and click \"Capture\"";
const PREPARING_INSTRUCTIONS: &str = "Preparing screenshot...";

/// Seconds the control window stays off screen before the display is frozen.
pub const HIDE_DELAY_SECS: f64 = 0.25;
/// Window position outside every display.
pub const OFF_SCREEN: Pos2 = pos2(-32000.0, -32000.0);

/// Screenshot mode was requested and the control window is off screen,
/// waiting to be left out of the snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingSnapshot {
    /// `egui` input time of the request, in seconds.
    pub requested_at: f64,
    /// Where the control window goes back to afterwards.
    pub restore_to: Option<Pos2>,
}

impl PendingSnapshot {
    /// Seconds left before the snapshot may be taken.
    pub fn remaining(&self, now: f64) -> f64 {
        (self.requested_at + HIDE_DELAY_SECS - now).max(0.0)
    }

    pub fn is_due(&self, now: f64) -> bool {
        self.remaining(now) <= 0.0
    }
}

/// A running screenshot mode: the frozen display and the selection on it.
pub struct ScreenshotSession {
    pub snapshot: SnapshotCapture,
    /// Uploaded lazily on the first frame that draws the canvas.
    pub texture: Option<TextureHandle>,
    pub machine: SelectionMachine,
}

impl ScreenshotSession {
    pub fn new(snapshot: SnapshotCapture) -> Self {
        let machine = SelectionMachine::new().with_bounds(snapshot.screen_bounds());
        Self {
            snapshot,
            texture: None,
            machine,
        }
    }
}

/// GUI application state.
#[derive(Default)]
pub struct GuiState {
    /// Present while in screenshot mode.
    pub session: Option<ScreenshotSession>,
    /// Set between the "Screenshot Mode" click and the display snapshot.
    pub pending_snapshot: Option<PendingSnapshot>,
    /// Contents of the result box.
    pub result_text: String,
    /// Close confirmation dialog is open.
    pub confirm_close: bool,
}

impl GuiState {
    pub fn in_screenshot_mode(&self) -> bool {
        self.session.is_some()
    }

    /// Instruction line above the buttons.
    pub fn instructions(&self) -> &'static str {
        if self.in_screenshot_mode() {
            SELECT_INSTRUCTIONS
        } else if self.pending_snapshot.is_some() {
            PREPARING_INSTRUCTIONS
        } else {
            IDLE_INSTRUCTIONS
        }
    }
}

/// Maps between the on-screen canvas and the screen area it displays.
#[derive(Clone, Copy, Debug)]
pub struct CanvasMapping {
    pub canvas: Rect,
    pub screen: SelectionRect,
}

impl CanvasMapping {
    fn scale(&self) -> (f32, f32) {
        (
            self.screen.width as f32 / self.canvas.width().max(1.0),
            self.screen.height as f32 / self.canvas.height().max(1.0),
        )
    }

    /// Canvas position to screen coordinates.
    pub fn to_screen(&self, pos: Pos2) -> Point {
        let (sx, sy) = self.scale();
        Point::new(
            self.screen.x + ((pos.x - self.canvas.min.x) * sx).round() as i32,
            self.screen.y + ((pos.y - self.canvas.min.y) * sy).round() as i32,
        )
    }

    /// Screen rectangle to canvas rectangle.
    pub fn to_canvas(&self, rect: &SelectionRect) -> Rect {
        let (sx, sy) = self.scale();
        let min = pos2(
            self.canvas.min.x + (rect.x - self.screen.x) as f32 / sx,
            self.canvas.min.y + (rect.y - self.screen.y) as f32 / sy,
        );
        let max = pos2(
            min.x + rect.width as f32 / sx,
            min.y + rect.height as f32 / sy,
        );
        Rect::from_min_max(min, max)
    }

    /// Texture coordinates (0.0-1.0) of a screen rectangle.
    pub fn to_uv(&self, rect: &SelectionRect) -> Rect {
        let width = self.screen.width.max(1) as f32;
        let height = self.screen.height.max(1) as f32;
        Rect::from_min_max(
            pos2(
                (rect.x - self.screen.x) as f32 / width,
                (rect.y - self.screen.y) as f32 / height,
            ),
            pos2(
                (rect.right() - self.screen.x) as f32 / width,
                (rect.bottom() - self.screen.y) as f32 / height,
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn mapping() -> CanvasMapping {
        // 1920x1080 screen at x=100 shown on a 960x540 canvas at (10, 20)
        CanvasMapping {
            canvas: Rect::from_min_max(pos2(10.0, 20.0), pos2(970.0, 560.0)),
            screen: SelectionRect::new(100, 0, 1920, 1080),
        }
    }

    #[test]
    fn test_to_screen() {
        let m = mapping();
        assert_eq!(m.to_screen(pos2(10.0, 20.0)), Point::new(100, 0));
        assert_eq!(m.to_screen(pos2(110.0, 70.0)), Point::new(300, 100));
    }

    #[test]
    fn test_to_canvas() {
        let m = mapping();
        let rect = m.to_canvas(&SelectionRect::new(300, 100, 200, 100));
        assert_eq!(rect, Rect::from_min_max(pos2(110.0, 70.0), pos2(210.0, 120.0)));
    }

    #[test]
    fn test_to_uv() {
        let m = mapping();
        let uv = m.to_uv(&SelectionRect::new(100, 0, 960, 540));
        assert_eq!(uv, Rect::from_min_max(pos2(0.0, 0.0), pos2(0.5, 0.5)));
    }

    #[test]
    fn test_instructions_follow_mode() {
        let mut state = GuiState::default();
        assert_eq!(state.instructions(), IDLE_INSTRUCTIONS);

        state.pending_snapshot = Some(PendingSnapshot {
            requested_at: 0.0,
            restore_to: None,
        });
        assert!(!state.in_screenshot_mode());
        assert_eq!(state.instructions(), PREPARING_INSTRUCTIONS);
        state.pending_snapshot = None;

        let snapshot = SnapshotCapture::new(
            DynamicImage::new_rgba8(40, 30),
            SelectionRect::new(0, 0, 40, 30),
        );
        state.session = Some(ScreenshotSession::new(snapshot));
        assert!(state.in_screenshot_mode());
        assert_eq!(state.instructions(), SELECT_INSTRUCTIONS);
    }

    #[test]
    fn test_pending_snapshot_waits_for_hide_delay() {
        let pending = PendingSnapshot {
            requested_at: 10.0,
            restore_to: Some(pos2(100.0, 50.0)),
        };

        assert!(!pending.is_due(10.0));
        assert!((pending.remaining(10.1) - (HIDE_DELAY_SECS - 0.1)).abs() < 1e-9);
        assert!(pending.is_due(10.0 + HIDE_DELAY_SECS));
        assert!(pending.is_due(20.0));
        assert_eq!(pending.remaining(20.0), 0.0);
    }
}
