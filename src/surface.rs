//! Pointer tracking for the saturation/value square.

/// The square's bounding box in the same client units the pointer events use.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }

    /// Client coordinates as percent of the box. Not clamped: a pointer left
    /// of the box gives a negative x.
    pub fn to_percent(&self, x: f64, y: f64) -> (f64, f64) {
        let scale = |offset: f64, extent: f64| {
            if extent > 0.0 {
                offset / extent * 100.0
            } else {
                0.0
            }
        };
        (scale(x - self.left, self.width), scale(y - self.top, self.height))
    }
}

/// Tracks whether a drag that began on the square is in progress.
///
/// Moves are only reported between a press on the square and the next
/// release. The release may come from anywhere, and moves keep being
/// reported while the pointer is outside the box.
#[derive(Debug, Clone, Default)]
pub struct DragSurface {
    bounds: Bounds,
    dragging: bool,
}

impl DragSurface {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            dragging: false,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        self.dragging = true;
        Some(self.bounds.to_percent(x, y))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.dragging.then(|| self.bounds.to_percent(x, y))
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }
}
