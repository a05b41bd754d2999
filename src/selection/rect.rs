use crate::error::CaptureError;

/// A point in the coordinate space of the selection surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One of the four corners of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// The diagonally opposite corner.
    pub fn opposite(&self) -> Corner {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
        }
    }
}

/// Axis-aligned rectangle with non-negative size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl SelectionRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two arbitrary corner points.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Inclusive of the edges.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.x, self.y),
            Corner::TopRight => Point::new(self.right(), self.y),
            Corner::BottomLeft => Point::new(self.x, self.bottom()),
            Corner::BottomRight => Point::new(self.right(), self.bottom()),
        }
    }

    /// Moves `p` onto the nearest point inside this rectangle.
    pub fn clamp_point(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.x, self.right()),
            p.y.clamp(self.y, self.bottom()),
        )
    }

    /// Same size, top-left at `origin`, shifted as needed to stay inside `bounds`.
    pub fn moved_within(&self, origin: Point, bounds: &SelectionRect) -> SelectionRect {
        let max_x = (bounds.right() - self.width).max(bounds.x);
        let max_y = (bounds.bottom() - self.height).max(bounds.y);
        SelectionRect {
            x: origin.x.clamp(bounds.x, max_x),
            y: origin.y.clamp(bounds.y, max_y),
            width: self.width.min(bounds.width),
            height: self.height.min(bounds.height),
        }
    }
}

/// A rectangle that is safe to hand to the screen capture: strictly positive size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    /// Validates a raw rectangle. Zero or negative sizes mean nothing was selected.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self, CaptureError> {
        if width <= 0 || height <= 0 {
            return Err(CaptureError::EmptySelection);
        }
        Ok(Self {
            x,
            y,
            width: width as u32,
            height: height as u32,
        })
    }
}

impl TryFrom<SelectionRect> for CaptureRegion {
    type Error = CaptureError;

    fn try_from(rect: SelectionRect) -> Result<Self, Self::Error> {
        CaptureRegion::new(rect.x, rect.y, rect.width, rect.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let rect = SelectionRect::from_corners(Point::new(50, 40), Point::new(10, 100));
        assert_eq!(rect, SelectionRect::new(10, 40, 40, 60));
        assert_eq!(rect.corner(Corner::BottomRight), Point::new(50, 100));
    }

    #[test]
    fn test_is_empty() {
        assert!(SelectionRect::new(5, 5, 0, 10).is_empty());
        assert!(SelectionRect::new(5, 5, 10, 0).is_empty());
        assert!(!SelectionRect::new(5, 5, 1, 1).is_empty());
    }

    #[test]
    fn test_clamp_point() {
        let bounds = SelectionRect::new(0, 0, 100, 50);
        assert_eq!(bounds.clamp_point(Point::new(-5, 70)), Point::new(0, 50));
        assert_eq!(bounds.clamp_point(Point::new(30, 20)), Point::new(30, 20));
    }

    #[test]
    fn test_moved_within() {
        let bounds = SelectionRect::new(0, 0, 100, 100);
        let rect = SelectionRect::new(10, 10, 30, 20);

        assert_eq!(
            rect.moved_within(Point::new(90, 95), &bounds),
            SelectionRect::new(70, 80, 30, 20)
        );
        assert_eq!(
            rect.moved_within(Point::new(-10, -10), &bounds),
            SelectionRect::new(0, 0, 30, 20)
        );
    }

    #[test]
    fn test_capture_region_validation() {
        assert!(matches!(
            CaptureRegion::new(10, 10, 0, 50),
            Err(CaptureError::EmptySelection)
        ));
        assert!(matches!(
            CaptureRegion::new(10, 10, 50, -3),
            Err(CaptureError::EmptySelection)
        ));

        let region = CaptureRegion::try_from(SelectionRect::new(1, 2, 3, 4)).unwrap();
        assert_eq!(
            region,
            CaptureRegion {
                x: 1,
                y: 2,
                width: 3,
                height: 4
            }
        );
    }

    #[test]
    fn test_empty_selection_message() {
        let err = CaptureRegion::new(0, 0, 0, 0).unwrap_err();
        assert_eq!(err.to_string(), "Please select an area before capturing.");
    }
}
