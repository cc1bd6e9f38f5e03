#![forbid(unsafe_code)]

//! Diff computation between frames.
//!
//! [`FrameDiff`] records every cell that differs between the previously
//! written frame and the next one, scanning row by row so changes come out
//! sorted by `(y, x)`. [`FrameDiff::runs`] coalesces them into horizontal
//! [`ChangeRun`]s so the presenter positions the cursor once per run.
//!
//! # Usage
//!
//! ```
//! use pixl_render::cell::Pixel;
//! use pixl_render::diff::FrameDiff;
//! use pixl_render::grid::Grid;
//!
//! let old: Grid<Pixel> = Grid::new(80, 24);
//! let mut new: Grid<Pixel> = Grid::new(80, 24);
//! new.set(5, 5, Pixel::from_char('X'));
//! new.set(6, 5, Pixel::from_char('Y'));
//!
//! let diff = FrameDiff::compute(&old, &new);
//! assert_eq!(diff.len(), 2);
//! assert_eq!(diff.runs().len(), 1);
//! ```

use pixl_core::Vec2;

use crate::cell::Pixel;
use crate::grid::Grid;
use crate::view::View;

/// A contiguous run of changed cells on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    /// Row index.
    pub y: i32,
    /// Start column (inclusive).
    pub x0: i32,
    /// End column (inclusive).
    pub x1: i32,
}

impl ChangeRun {
    #[inline]
    pub const fn new(y: i32, x0: i32, x1: i32) -> Self {
        debug_assert!(x0 <= x1);
        Self { y, x0, x1 }
    }

    /// Number of cells in this run.
    #[inline]
    pub const fn len(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.x1 < self.x0
    }
}

/// Changed cell positions between two frames of the same size.
#[derive(Debug, Clone, Default)]
pub struct FrameDiff {
    changes: Vec<Vec2>,
}

impl FrameDiff {
    /// Compare `previous` with `next`.
    ///
    /// # Panics
    ///
    /// Debug-asserts that both frames have the same size.
    pub fn compute<V: View<Pixel> + ?Sized>(previous: &Grid<Pixel>, next: &V) -> Self {
        let _span = pixl_core::debug_span!("diff_compute").entered();
        debug_assert_eq!(previous.size(), next.size(), "frame sizes must match");

        let mut changes = Vec::new();
        for p in previous.bounds().points() {
            if previous.get(p.x, p.y) != next.get(p.x, p.y) {
                changes.push(p);
            }
        }

        pixl_core::trace!(changes = changes.len(), "diff computed");
        Self { changes }
    }

    /// Every cell of a frame of `size`, used for full repaints.
    pub fn full(size: Vec2) -> Self {
        Self {
            changes: pixl_core::Rect::from_size(size).points().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Changed positions in row-major order.
    #[inline]
    pub fn changes(&self) -> &[Vec2] {
        &self.changes
    }

    /// Coalesce consecutive columns on the same row into runs.
    pub fn runs(&self) -> Vec<ChangeRun> {
        let mut runs: Vec<ChangeRun> = Vec::new();
        for p in &self.changes {
            match runs.last_mut() {
                Some(run) if run.y == p.y && run.x1 + 1 == p.x => run.x1 = p.x,
                _ => runs.push(ChangeRun::new(p.y, p.x, p.x)),
            }
        }
        runs
    }
}
