#![forbid(unsafe_code)]

//! Read-only views.
//!
//! A [`View`] answers "what is at `(x, y)`" for a rectangle anchored at the
//! origin. Views are cheap to create and never copy: a [`GridView`] borrows
//! its grid, so it always reflects the grid's current contents. Use
//! [`View::bake`] to take an owned snapshot.

use pixl_core::{Rect, Vec2};

use crate::grid::Grid;

/// Read-only access to a rectangle of cells.
///
/// `get` is bounds-unchecked: callers must stay inside `bounds()`.
pub trait View<T> {
    /// Width and height in cells.
    fn size(&self) -> Vec2;

    /// Cell at `(x, y)`.
    fn get(&self, x: i32, y: i32) -> T;

    #[inline]
    fn width(&self) -> i32 {
        self.size().x
    }

    #[inline]
    fn height(&self) -> i32 {
        self.size().y
    }

    /// `[0, width) x [0, height)`.
    #[inline]
    fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    #[inline]
    fn get_at(&self, position: Vec2) -> T {
        self.get(position.x, position.y)
    }

    /// Copy the view into an owned grid.
    fn bake(&self) -> Grid<T>
    where
        T: Copy + Default,
    {
        Grid::from_fn(self.size(), |p| self.get(p.x, p.y))
    }
}

impl<T, V: View<T> + ?Sized> View<T> for &V {
    #[inline]
    fn size(&self) -> Vec2 {
        (**self).size()
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> T {
        (**self).get(x, y)
    }
}

impl<T, V: View<T> + ?Sized> View<T> for Box<V> {
    #[inline]
    fn size(&self) -> Vec2 {
        (**self).size()
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> T {
        (**self).get(x, y)
    }
}

/// A window onto part of a [`Grid`].
///
/// Coordinates are relative to the window's top-left corner.
#[derive(Debug)]
pub struct GridView<'a, T> {
    grid: &'a Grid<T>,
    area: Rect,
}

impl<T> Clone for GridView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for GridView<'_, T> {}

impl<'a, T: Copy + Default> GridView<'a, T> {
    /// Window `area` of `grid`, trimmed to the grid's bounds.
    pub fn new(grid: &'a Grid<T>, area: Rect) -> Self {
        Self {
            grid,
            area: area.trim(&grid.bounds()),
        }
    }

    /// The whole grid.
    pub fn full(grid: &'a Grid<T>) -> Self {
        Self {
            grid,
            area: grid.bounds(),
        }
    }

    /// The grid this view reads from.
    #[inline]
    pub fn grid(&self) -> &'a Grid<T> {
        self.grid
    }

    /// The window, in grid coordinates.
    #[inline]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Check if the window covers the whole grid.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.area == self.grid.bounds()
    }

    /// A smaller window, relative to this one.
    pub fn window(&self, area: Rect) -> Self {
        let absolute = area.translate(self.area.start()).trim(&self.area);
        Self {
            grid: self.grid,
            area: absolute,
        }
    }
}

impl<T: Copy + Default> View<T> for GridView<'_, T> {
    #[inline]
    fn size(&self) -> Vec2 {
        self.area.size()
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> T {
        self.grid.get(self.area.left + x, self.area.top + y)
    }
}
