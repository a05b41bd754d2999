//! Mouse interaction state for drag-selecting a screen region.
//!
//! Knows nothing about the drawing surface: callers feed it press / move /
//! release events in surface coordinates and read back the selection.

use super::rect::{CaptureRegion, Corner, Point, SelectionRect};
use crate::error::CaptureError;

/// Distance (in surface units) within which a press grabs a corner handle.
pub const DEFAULT_HANDLE_RADIUS: i32 = 8;

/// What the pointer is doing right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    /// No button held.
    Idle,
    /// Drawing a new rectangle from `anchor`.
    Selecting { anchor: Point },
    /// Moving one corner while the opposite corner stays at `fixed`.
    Resizing { fixed: Point },
    /// Moving the whole rectangle; `grab_offset` is the press point relative to its top-left.
    Dragging { grab_offset: Point },
}

/// Where a point lands relative to the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Handle(Corner),
    Inside,
    Outside,
}

/// Selection rectangle plus the press/move/release state machine driving it.
#[derive(Clone, Debug)]
pub struct SelectionMachine {
    state: SelectionState,
    selection: Option<SelectionRect>,
    bounds: Option<SelectionRect>,
    handle_radius: i32,
}

impl Default for SelectionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Idle,
            selection: None,
            bounds: None,
            handle_radius: DEFAULT_HANDLE_RADIUS,
        }
    }

    /// Restricts points and the selection to `bounds` (usually the surface size).
    pub fn with_bounds(mut self, bounds: SelectionRect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selection(&self) -> Option<SelectionRect> {
        self.selection
    }

    /// Drops the selection and returns to idle.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
        self.selection = None;
    }

    fn clamp(&self, p: Point) -> Point {
        match &self.bounds {
            Some(bounds) => bounds.clamp_point(p),
            None => p,
        }
    }

    /// Classifies a point against the current selection. Handles win over the interior.
    pub fn hit_test(&self, p: Point) -> Hit {
        let Some(rect) = self.selection.filter(|rect| !rect.is_empty()) else {
            return Hit::Outside;
        };

        let near = |corner: Point| {
            (corner.x - p.x).abs() <= self.handle_radius
                && (corner.y - p.y).abs() <= self.handle_radius
        };
        if let Some(corner) = Corner::ALL.into_iter().find(|c| near(rect.corner(*c))) {
            return Hit::Handle(corner);
        }

        if rect.contains(p) {
            Hit::Inside
        } else {
            Hit::Outside
        }
    }

    /// Button pressed at `p`.
    pub fn press(&mut self, p: Point) {
        let p = self.clamp(p);

        match (self.hit_test(p), self.selection) {
            (Hit::Handle(corner), Some(rect)) => {
                self.state = SelectionState::Resizing {
                    fixed: rect.corner(corner.opposite()),
                };
            }
            (Hit::Inside, Some(rect)) => {
                self.state = SelectionState::Dragging {
                    grab_offset: Point::new(p.x - rect.x, p.y - rect.y),
                };
            }
            _ => {
                self.state = SelectionState::Selecting { anchor: p };
                self.selection = Some(SelectionRect::from_corners(p, p));
            }
        }
    }

    /// Pointer moved to `p` with the button held. Ignored while idle.
    pub fn drag_to(&mut self, p: Point) {
        let p = self.clamp(p);

        match self.state {
            SelectionState::Idle => {}
            SelectionState::Selecting { anchor: fixed } | SelectionState::Resizing { fixed } => {
                self.selection = Some(SelectionRect::from_corners(fixed, p));
            }
            SelectionState::Dragging { grab_offset } => {
                if let Some(rect) = self.selection {
                    let origin = Point::new(p.x - grab_offset.x, p.y - grab_offset.y);
                    let moved = match &self.bounds {
                        Some(bounds) => rect.moved_within(origin, bounds),
                        None => SelectionRect::new(origin.x, origin.y, rect.width, rect.height),
                    };
                    self.selection = Some(moved);
                }
            }
        }
    }

    /// Button released at `p`. A click without movement leaves no selection.
    pub fn release(&mut self, p: Point) {
        self.drag_to(p);
        self.finish();
    }

    /// Ends the current gesture where the last move left it.
    pub fn finish(&mut self) {
        self.state = SelectionState::Idle;

        if self.selection.is_some_and(|rect| rect.is_empty()) {
            self.selection = None;
        }
    }

    /// The selection as a capture region, or `EmptySelection` if there is none.
    pub fn capture_region(&self) -> Result<CaptureRegion, CaptureError> {
        match self.selection {
            Some(rect) => CaptureRegion::try_from(rect),
            None => Err(CaptureError::EmptySelection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(machine: &mut SelectionMachine, from: (i32, i32), to: (i32, i32)) {
        machine.press(Point::new(from.0, from.1));
        machine.drag_to(Point::new((from.0 + to.0) / 2, (from.1 + to.1) / 2));
        machine.release(Point::new(to.0, to.1));
    }

    #[test]
    fn test_new_selection() {
        let mut machine = SelectionMachine::new();
        machine.press(Point::new(100, 100));
        assert_eq!(
            machine.state(),
            SelectionState::Selecting {
                anchor: Point::new(100, 100)
            }
        );

        machine.drag_to(Point::new(150, 130));
        assert_eq!(
            machine.selection(),
            Some(SelectionRect::new(100, 100, 50, 30))
        );

        machine.release(Point::new(200, 180));
        assert_eq!(machine.state(), SelectionState::Idle);
        assert_eq!(
            machine.selection(),
            Some(SelectionRect::new(100, 100, 100, 80))
        );
    }

    #[test]
    fn test_selection_up_and_left_normalizes() {
        let mut machine = SelectionMachine::new();
        select(&mut machine, (200, 200), (120, 150));
        assert_eq!(
            machine.selection(),
            Some(SelectionRect::new(120, 150, 80, 50))
        );
    }

    #[test]
    fn test_click_without_drag_clears_selection() {
        let mut machine = SelectionMachine::new();
        machine.press(Point::new(10, 10));
        machine.release(Point::new(10, 10));

        assert_eq!(machine.selection(), None);
        assert!(matches!(
            machine.capture_region(),
            Err(CaptureError::EmptySelection)
        ));
    }

    #[test]
    fn test_horizontal_line_is_empty() {
        let mut machine = SelectionMachine::new();
        select(&mut machine, (10, 10), (90, 10));
        assert!(matches!(
            machine.capture_region(),
            Err(CaptureError::EmptySelection)
        ));
    }

    #[test]
    fn test_finish_keeps_last_move() {
        let mut machine = SelectionMachine::new();
        machine.press(Point::new(0, 0));
        machine.drag_to(Point::new(40, 30));
        machine.finish();

        assert_eq!(machine.state(), SelectionState::Idle);
        assert_eq!(machine.selection(), Some(SelectionRect::new(0, 0, 40, 30)));
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut machine = SelectionMachine::new();
        machine.drag_to(Point::new(50, 50));
        assert_eq!(machine.state(), SelectionState::Idle);
        assert_eq!(machine.selection(), None);
    }

    #[test]
    fn test_resize_from_corner_handle() {
        let mut machine = SelectionMachine::new();
        select(&mut machine, (100, 100), (200, 200));

        // Grab the bottom-right handle, slightly off
        machine.press(Point::new(203, 198));
        assert_eq!(
            machine.state(),
            SelectionState::Resizing {
                fixed: Point::new(100, 100)
            }
        );

        machine.release(Point::new(260, 240));
        assert_eq!(
            machine.selection(),
            Some(SelectionRect::new(100, 100, 160, 140))
        );
    }

    #[test]
    fn test_resize_past_opposite_corner_flips() {
        let mut machine = SelectionMachine::new();
        select(&mut machine, (100, 100), (200, 200));

        machine.press(Point::new(100, 100));
        machine.release(Point::new(250, 260));
        assert_eq!(
            machine.selection(),
            Some(SelectionRect::new(200, 200, 50, 60))
        );
    }

    #[test]
    fn test_drag_moves_selection() {
        let mut machine = SelectionMachine::new();
        select(&mut machine, (100, 100), (200, 150));

        machine.press(Point::new(150, 120));
        assert_eq!(
            machine.state(),
            SelectionState::Dragging {
                grab_offset: Point::new(50, 20)
            }
        );

        machine.release(Point::new(60, 220));
        assert_eq!(
            machine.selection(),
            Some(SelectionRect::new(10, 200, 100, 50))
        );
    }

    #[test]
    fn test_drag_stays_within_bounds() {
        let mut machine = SelectionMachine::new().with_bounds(SelectionRect::new(0, 0, 300, 300));
        select(&mut machine, (100, 100), (200, 150));

        machine.press(Point::new(150, 120));
        machine.release(Point::new(1000, -500));
        assert_eq!(
            machine.selection(),
            Some(SelectionRect::new(200, 0, 100, 50))
        );
    }

    #[test]
    fn test_selection_clamped_to_bounds() {
        let mut machine = SelectionMachine::new().with_bounds(SelectionRect::new(0, 0, 300, 200));
        select(&mut machine, (250, 150), (400, 400));
        assert_eq!(
            machine.selection(),
            Some(SelectionRect::new(250, 150, 50, 50))
        );
    }

    #[test]
    fn test_press_outside_starts_new_selection() {
        let mut machine = SelectionMachine::new();
        select(&mut machine, (100, 100), (200, 200));

        machine.press(Point::new(400, 400));
        assert_eq!(
            machine.state(),
            SelectionState::Selecting {
                anchor: Point::new(400, 400)
            }
        );
        machine.release(Point::new(450, 420));
        assert_eq!(
            machine.selection(),
            Some(SelectionRect::new(400, 400, 50, 20))
        );
    }

    #[test]
    fn test_hit_test() {
        let mut machine = SelectionMachine::new();
        assert_eq!(machine.hit_test(Point::new(0, 0)), Hit::Outside);

        select(&mut machine, (100, 100), (200, 200));
        assert_eq!(
            machine.hit_test(Point::new(94, 207)),
            Hit::Handle(Corner::BottomLeft)
        );
        assert_eq!(machine.hit_test(Point::new(150, 150)), Hit::Inside);
        assert_eq!(machine.hit_test(Point::new(150, 250)), Hit::Outside);
    }

    #[test]
    fn test_capture_region_and_clear() {
        let mut machine = SelectionMachine::new();
        select(&mut machine, (10, 20), (110, 70));

        let region = machine.capture_region().unwrap();
        assert_eq!((region.x, region.y, region.width, region.height), (10, 20, 100, 50));

        machine.clear();
        assert_eq!(machine.selection(), None);
        assert!(machine.capture_region().is_err());
    }
}
