//! Default dock layout
//!
//! The display area below the menu bar is split into four regions the way the
//! editor arranges its windows on first use: a bottom strip, a left column, a
//! right column and the scene view in the middle. Windows are placed into
//! their region with `Condition::FirstUseEver`, so users can rearrange them
//! through the dockspace afterwards.

/// Fraction of the height given to the bottom strip
pub const BOTTOM_RATIO: f32 = 0.2;
/// Fraction of the remaining width given to the left column
pub const LEFT_RATIO: f32 = 0.2;
/// Fraction of what is left after the left column given to the right column
pub const RIGHT_RATIO: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: [f32; 2],
    pub size: [f32; 2],
}

impl Rect {
    pub fn new(position: [f32; 2], size: [f32; 2]) -> Self {
        Self { position, size }
    }

    pub fn max(&self) -> [f32; 2] {
        [
            self.position[0] + self.size[0],
            self.position[1] + self.size[1],
        ]
    }

    pub fn contains(&self, point: [f32; 2]) -> bool {
        let max = self.max();
        point[0] >= self.position[0]
            && point[0] < max[0]
            && point[1] >= self.position[1]
            && point[1] < max[1]
    }

    /// Split off `ratio` of the height at the bottom; returns (bottom, rest)
    fn split_bottom(&self, ratio: f32) -> (Rect, Rect) {
        let bottom_height = self.size[1] * ratio;
        let rest = Rect::new(self.position, [self.size[0], self.size[1] - bottom_height]);
        let bottom = Rect::new(
            [self.position[0], self.position[1] + rest.size[1]],
            [self.size[0], bottom_height],
        );
        (bottom, rest)
    }

    /// Split off `ratio` of the width at the left; returns (left, rest)
    fn split_left(&self, ratio: f32) -> (Rect, Rect) {
        let left_width = self.size[0] * ratio;
        let left = Rect::new(self.position, [left_width, self.size[1]]);
        let rest = Rect::new(
            [self.position[0] + left_width, self.position[1]],
            [self.size[0] - left_width, self.size[1]],
        );
        (left, rest)
    }

    /// Split off `ratio` of the width at the right; returns (right, rest)
    fn split_right(&self, ratio: f32) -> (Rect, Rect) {
        let right_width = self.size[0] * ratio;
        let rest = Rect::new(self.position, [self.size[0] - right_width, self.size[1]]);
        let right = Rect::new(
            [self.position[0] + rest.size[0], self.position[1]],
            [right_width, self.size[1]],
        );
        (right, rest)
    }
}

/// Which region of the default layout a window starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockRegion {
    Bottom,
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockLayout {
    pub bottom: Rect,
    pub left: Rect,
    pub right: Rect,
    pub middle: Rect,
}

impl DockLayout {
    /// Compute the default regions for a dock area
    pub fn compute(area: Rect) -> Self {
        let (bottom, rest) = area.split_bottom(BOTTOM_RATIO);
        let (left, rest) = rest.split_left(LEFT_RATIO);
        let (right, middle) = rest.split_right(RIGHT_RATIO);
        Self {
            bottom,
            left,
            right,
            middle,
        }
    }

    pub fn region(&self, region: DockRegion) -> Rect {
        match region {
            DockRegion::Bottom => self.bottom,
            DockRegion::Left => self.left,
            DockRegion::Right => self.right,
            DockRegion::Middle => self.middle,
        }
    }
}
