#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are signed: sources may be placed partially or fully
//! outside a viewport, and anchoring produces negative offsets.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// An integer 2D vector, used for positions, offsets, and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    /// `(0, 0)`.
    pub const ZERO: Self = Self::new(0, 0);
    /// `(1, 1)`.
    pub const ONE: Self = Self::new(1, 1);

    /// Create a new vector.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round a floating point position to the nearest cell.
    ///
    /// Halves round away from zero.
    #[inline]
    pub fn from_rounded(x: f32, y: f32) -> Self {
        Self::new(x.round() as i32, y.round() as i32)
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Swap the components.
    #[inline]
    pub const fn transpose(self) -> Self {
        Self::new(self.y, self.x)
    }

    /// Product of both components. Meaningful for sizes.
    #[inline]
    pub const fn area(self) -> i64 {
        self.x as i64 * self.y as i64
    }
}

impl From<(i32, i32)> for Vec2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<i32> for Vec2 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// An integer rectangle using the half-open convention
/// `[left, right) x [top, bottom)`.
///
/// `right >= left` and `bottom >= top` are expected but not enforced.
/// Degenerate rectangles contain no points and overlap nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle at `position` with the given size.
    #[inline]
    pub const fn sized(position: Vec2, size: Vec2) -> Self {
        Self::new(
            position.x,
            position.y,
            position.x + size.x,
            position.y + size.y,
        )
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Vec2) -> Self {
        Self::sized(Vec2::ZERO, size)
    }

    /// Top-left corner (inclusive).
    #[inline]
    pub const fn start(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Bottom-right corner (exclusive).
    #[inline]
    pub const fn end(&self) -> Vec2 {
        Vec2::new(self.right, self.bottom)
    }

    /// `end - start`. Components are negative for inverted rectangles.
    #[inline]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.right - self.left, self.bottom - self.top)
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Check if the rectangle contains no points.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Check if the two rectangles share at least one point.
    #[inline]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
            && !self.is_empty()
            && !other.is_empty()
    }

    /// Intersect with another rectangle.
    ///
    /// When there is no overlap the result is clamped to an empty rectangle
    /// (`right == left` or `bottom == top`) rather than inverted.
    #[inline]
    pub fn trim(&self, other: &Rect) -> Rect {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right).max(left);
        let bottom = self.bottom.min(other.bottom).max(top);
        Rect::new(left, top, right, bottom)
    }

    /// Check if `other` lies fully within this rectangle's edges.
    #[inline]
    pub const fn encloses(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Check if a point is inside the rectangle (half-open).
    #[inline]
    pub const fn has_point(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Move the rectangle by `offset`.
    #[inline]
    pub const fn translate(&self, offset: Vec2) -> Rect {
        Rect::new(
            self.left + offset.x,
            self.top + offset.y,
            self.right + offset.x,
            self.bottom + offset.y,
        )
    }

    /// Iterate every integer point inside the rectangle in row-major order.
    #[inline]
    pub fn points(&self) -> RectPoints {
        RectPoints::new(*self)
    }
}

/// Row-major iterator over the points of a [`Rect`].
#[derive(Debug, Clone)]
pub struct RectPoints {
    rect: Rect,
    next: Option<Vec2>,
}

impl RectPoints {
    fn new(rect: Rect) -> Self {
        let next = (!rect.is_empty()).then(|| rect.start());
        Self { rect, next }
    }
}

impl Iterator for RectPoints {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        let current = self.next?;
        let mut following = Vec2::new(current.x + 1, current.y);
        if following.x >= self.rect.right {
            following = Vec2::new(self.rect.left, current.y + 1);
        }
        self.next = (following.y < self.rect.bottom).then_some(following);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            None => 0,
            Some(p) => {
                let width = self.rect.width() as usize;
                let rows_after = (self.rect.bottom - p.y - 1) as usize;
                (self.rect.right - p.x) as usize + rows_after * width
            }
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RectPoints {}

// Midpoint transforms work in doubled coordinates so the half-unit center of
// an even-sized axis stays exact: `centered = 2 * p - (size - 1)`.

#[inline]
fn to_centered(position: Vec2, size: Vec2) -> Vec2 {
    position * 2 - (size - Vec2::ONE)
}

#[inline]
fn from_centered(centered: Vec2, size: Vec2) -> Vec2 {
    (centered + size - Vec2::ONE) / 2
}

/// A clockwise rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Build a rotation from a count of clockwise quarter turns.
    /// Negative counts turn counter-clockwise.
    pub const fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// Number of clockwise quarter turns (0..4).
    pub const fn quarter_turns(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    /// Apply `self`, then `next`.
    pub const fn then(self, next: Rotation) -> Rotation {
        Self::from_quarter_turns(self.quarter_turns() + next.quarter_turns())
    }

    pub const fn inverse(self) -> Rotation {
        Self::from_quarter_turns(-self.quarter_turns())
    }

    /// Whether width and height trade places.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    /// Size of a grid of `size` after rotation.
    pub const fn rotate_size(self, size: Vec2) -> Vec2 {
        if self.swaps_axes() {
            size.transpose()
        } else {
            size
        }
    }

    /// Map a coordinate inside a grid of `size` to its rotated coordinate.
    ///
    /// The rotation pivots on the grid's geometric midpoint `(size - 1) / 2`.
    pub fn apply(self, position: Vec2, size: Vec2) -> Vec2 {
        let c = to_centered(position, size);
        let rotated = match self {
            Self::Deg0 => c,
            Self::Deg90 => Vec2::new(-c.y, c.x),
            Self::Deg180 => -c,
            Self::Deg270 => Vec2::new(c.y, -c.x),
        };
        from_centered(rotated, self.rotate_size(size))
    }
}

/// A mirror across one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flip {
    /// Mirror left-to-right.
    Horizontal,
    /// Mirror top-to-bottom.
    Vertical,
}

impl Flip {
    /// Map a coordinate inside a grid of `size` to its mirrored coordinate.
    pub fn apply(self, position: Vec2, size: Vec2) -> Vec2 {
        let c = to_centered(position, size);
        let flipped = match self {
            Self::Horizontal => Vec2::new(-c.x, c.y),
            Self::Vertical => Vec2::new(c.x, -c.y),
        };
        from_centered(flipped, size)
    }
}
