//! GUI rendering functions.
//!
//! Contains UI layout and component rendering logic.

use eframe::egui::{self, pos2, Color32, Rect, Sense, Stroke, Vec2};

use super::state::{CanvasMapping, GuiState, ScreenshotSession};
use crate::selection::{Corner, Hit, SelectionMachine, SelectionRect, SelectionState};

const OVERLAY_COLOR: Color32 = Color32::from_black_alpha(100);
const SELECTION_COLOR: Color32 = Color32::RED;
const HANDLE_SIZE: f32 = 6.0;

/// Which buttons were clicked this frame.
#[derive(Default)]
pub struct ControlActions {
    pub toggle_screenshot_mode: bool,
    pub capture: bool,
    pub close: bool,
}

/// Render the instruction line and the three buttons.
pub fn render_controls(ui: &mut egui::Ui, state: &GuiState) -> ControlActions {
    let mut actions = ControlActions::default();

    ui.label(state.instructions());
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let mode_label = if state.in_screenshot_mode() {
            "Exit Screenshot Mode"
        } else {
            "Screenshot Mode"
        };
        if ui.button(mode_label).clicked() {
            actions.toggle_screenshot_mode = true;
        }

        // Capture only makes sense while selecting
        if ui
            .add_enabled(state.in_screenshot_mode(), egui::Button::new("Capture"))
            .clicked()
        {
            actions.capture = true;
        }

        if ui.button("Close").clicked() {
            actions.close = true;
        }
    });

    actions
}

/// Render the read-only result box.
pub fn render_result(ui: &mut egui::Ui, result_text: &str) {
    ui.add_space(8.0);
    let mut text = result_text;
    ui.add(
        egui::TextEdit::multiline(&mut text)
            .desired_rows(6)
            .desired_width(f32::INFINITY),
    );
}

/// Render the close confirmation dialog.
/// Returns Some(true) for Yes, Some(false) for No, None while undecided.
pub fn render_close_confirmation(ctx: &egui::Context) -> Option<bool> {
    let mut answer = None;

    egui::Window::new("Confirm Close")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Are you sure you want to close the application?");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    answer = Some(true);
                }
                if ui.button("No").clicked() {
                    answer = Some(false);
                }
            });
        });

    answer
}

/// Uploads the frozen display image as a texture if not done yet.
fn ensure_texture(ctx: &egui::Context, session: &mut ScreenshotSession) -> egui::TextureId {
    if let Some(texture) = &session.texture {
        return texture.id();
    }

    let rgba = session.snapshot.image().to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    let texture = ctx.load_texture(
        "screenshot_snapshot",
        color_image,
        egui::TextureOptions::LINEAR,
    );
    let id = texture.id();
    session.texture = Some(texture);
    id
}

/// Feeds this frame's pointer events on the canvas into the selection machine.
fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    mapping: &CanvasMapping,
    session: &mut ScreenshotSession,
) {
    let machine = &mut session.machine;

    if response.drag_started() {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(pos) = origin {
            machine.press(mapping.to_screen(pos));
        }
    }

    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            machine.drag_to(mapping.to_screen(pos));
        }
    }

    if response.drag_stopped() {
        match response.interact_pointer_pos() {
            Some(pos) => machine.release(mapping.to_screen(pos)),
            None => machine.finish(),
        }
    } else if response.clicked() {
        // A plain click outside the selection clears it
        if let Some(pos) = response.interact_pointer_pos() {
            let point = mapping.to_screen(pos);
            machine.press(point);
            machine.release(point);
        }
    }
}

fn resize_cursor(corner: Corner) -> egui::CursorIcon {
    match corner {
        Corner::TopLeft | Corner::BottomRight => egui::CursorIcon::ResizeNwSe,
        Corner::TopRight | Corner::BottomLeft => egui::CursorIcon::ResizeNeSw,
    }
}

/// Cursor for the current gesture, or for what a press at the hover point would do.
fn selection_cursor(
    machine: &SelectionMachine,
    response: &egui::Response,
    mapping: &CanvasMapping,
) -> egui::CursorIcon {
    match machine.state() {
        SelectionState::Dragging { .. } => egui::CursorIcon::Grabbing,
        SelectionState::Selecting { .. } | SelectionState::Resizing { .. } => {
            egui::CursorIcon::Crosshair
        }
        SelectionState::Idle => match response.hover_pos() {
            Some(pos) => match machine.hit_test(mapping.to_screen(pos)) {
                Hit::Handle(corner) => resize_cursor(corner),
                Hit::Inside => egui::CursorIcon::Grab,
                Hit::Outside => egui::CursorIcon::Crosshair,
            },
            None => egui::CursorIcon::Default,
        },
    }
}

fn paint_selection(
    painter: &egui::Painter,
    texture: egui::TextureId,
    mapping: &CanvasMapping,
    rect: &SelectionRect,
) {
    let area = mapping.to_canvas(rect);

    // Show the selected part undimmed
    painter.image(texture, area, mapping.to_uv(rect), Color32::WHITE);
    painter.rect_stroke(area, 0.0, Stroke::new(1.5, SELECTION_COLOR));

    for corner in Corner::ALL {
        let p = rect.corner(corner);
        let center = mapping.to_canvas(&SelectionRect::new(p.x, p.y, 0, 0)).min;
        painter.rect_filled(
            Rect::from_center_size(center, Vec2::splat(HANDLE_SIZE)),
            0.0,
            SELECTION_COLOR,
        );
    }
}

/// Render the frozen display with the dimmed overlay and the current selection.
pub fn render_selection_canvas(ui: &mut egui::Ui, session: &mut ScreenshotSession) {
    let texture = ensure_texture(ui.ctx(), session);

    let image = session.snapshot.image();
    let image_size = Vec2::new(image.width() as f32, image.height() as f32);
    let available = ui.available_size();
    let scale = (available.x / image_size.x)
        .min(available.y / image_size.y)
        .min(1.0)
        .max(0.01);

    let (response, painter) = ui.allocate_painter(image_size * scale, Sense::click_and_drag());
    let mapping = CanvasMapping {
        canvas: response.rect,
        screen: session.snapshot.screen_bounds(),
    };

    handle_pointer(ui, &response, &mapping, session);
    if response.hovered() || response.dragged() {
        ui.ctx()
            .set_cursor_icon(selection_cursor(&session.machine, &response, &mapping));
    }

    let full_uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    painter.image(texture, mapping.canvas, full_uv, Color32::WHITE);
    painter.rect_filled(mapping.canvas, 0.0, OVERLAY_COLOR);

    if let Some(rect) = session.machine.selection() {
        if !rect.is_empty() {
            paint_selection(&painter, texture, &mapping, &rect);
        }
    }
}
