#![forbid(unsafe_code)]

//! Anchor alignment flags.
//!
//! An anchor turns "space available minus space needed" into a placement
//! offset. Each axis has an end flag (`RIGHT`, `BOTTOM`) and a center flag
//! (`CENTER`, `MIDDLE`):
//!
//! | end | center | offset                          |
//! |-----|--------|---------------------------------|
//! | no  | no     | `0`                             |
//! | yes | no     | `d`                             |
//! | no  | yes    | `floor(d / 2)`                  |
//! | yes | yes    | `floor(d / 2) + (d mod 2)`      |
//!
//! A centered source biases an odd slack toward the lower-index half unless
//! the end flag is also set, which flips the bias to the higher-index half.
//! Snapshot tests depend on this table cell-for-cell.

use bitflags::bitflags;

use crate::geometry::Vec2;

bitflags! {
    /// Alignment flags over two independent axes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Anchor: u8 {
        /// Push slack to the left (align right edge).
        const RIGHT = 0b0001;
        /// Split slack horizontally.
        const CENTER = 0b0010;
        /// Push slack to the top (align bottom edge).
        const BOTTOM = 0b0100;
        /// Split slack vertically.
        const MIDDLE = 0b1000;
    }
}

impl Anchor {
    /// Top-left alignment.
    pub const NONE: Self = Self::empty();
    /// Centered on both axes.
    pub const CENTERED: Self = Self::CENTER.union(Self::MIDDLE);

    /// Horizontal placement offset for a slack of `difference` cells.
    #[inline]
    pub const fn horizontal(self, difference: i32) -> i32 {
        align(
            difference,
            self.contains(Self::RIGHT),
            self.contains(Self::CENTER),
        )
    }

    /// Vertical placement offset for a slack of `difference` cells.
    #[inline]
    pub const fn vertical(self, difference: i32) -> i32 {
        align(
            difference,
            self.contains(Self::BOTTOM),
            self.contains(Self::MIDDLE),
        )
    }

    /// Placement offset for a slack of `difference` on both axes.
    #[inline]
    pub const fn apply(self, difference: Vec2) -> Vec2 {
        Vec2::new(self.horizontal(difference.x), self.vertical(difference.y))
    }
}

#[inline]
const fn align(difference: i32, end: bool, center: bool) -> i32 {
    match (end, center) {
        (false, false) => 0,
        (true, false) => difference,
        (false, true) => difference.div_euclid(2),
        (true, true) => difference.div_euclid(2) + difference.rem_euclid(2),
    }
}
