#![forbid(unsafe_code)]

//! Grid storage.
//!
//! A [`Grid`] is a resizable 2D buffer of any copyable cell type, stored in
//! row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. `width >= 0` and `height >= 0`
//! 3. `map`, `merge_map`, and area fills never touch a cell outside the grid
//!    and never read outside the source view, whatever the position or area.
//!
//! Direct indexing (`get`, `set`) does not clip: an out-of-range coordinate
//! is a caller bug and panics.

use pixl_core::{Flip, Rect, Rotation, Vec2};

use crate::cell::{Color, Pixel};
use crate::view::{GridView, View};

/// A 2D grid of cells.
///
/// # Example
///
/// ```
/// use pixl_render::cell::Pixel;
/// use pixl_render::grid::Grid;
///
/// let mut grid: Grid<Pixel> = Grid::new(80, 24);
/// grid.set(0, 0, Pixel::from_char('H'));
/// grid.set(1, 0, Pixel::from_char('i'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid<T> {
    size: Vec2,
    cells: Vec<T>,
}

#[inline]
fn cell_count(width: i32, height: i32) -> usize {
    assert!(width >= 0, "grid width must be >= 0, got {width}");
    assert!(height >= 0, "grid height must be >= 0, got {height}");
    width as usize * height as usize
}

impl<T: Copy + Default> Grid<T> {
    /// Create a grid filled with `T::default()`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is negative.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Create a grid filled with `value`.
    pub fn filled(width: i32, height: i32, value: T) -> Self {
        Self {
            size: Vec2::new(width, height),
            cells: vec![value; cell_count(width, height)],
        }
    }

    /// Wrap existing row-major data.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len() != width * height`.
    pub fn from_vec(width: i32, height: i32, cells: Vec<T>) -> Self {
        let expected = cell_count(width, height);
        assert_eq!(
            cells.len(),
            expected,
            "grid data length does not match {width}x{height}"
        );
        Self {
            size: Vec2::new(width, height),
            cells,
        }
    }

    /// Create a grid by evaluating `f` at every coordinate.
    pub fn from_fn(size: Vec2, mut f: impl FnMut(Vec2) -> T) -> Self {
        let count = cell_count(size.x, size.y);
        let mut cells = Vec::with_capacity(count);
        cells.extend(Rect::from_size(size).points().map(&mut f));
        Self { size, cells }
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.size.y
    }

    #[inline]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// `[0, width) x [0, height)`.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            x >= 0 && x < self.size.x && y >= 0 && y < self.size.y,
            "({x}, {y}) is outside a {}x{} grid",
            self.size.x,
            self.size.y
        );
        y as usize * self.size.x as usize + x as usize
    }

    /// Cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> T {
        self.cells[self.index(x, y)]
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn checked_get(&self, x: i32, y: i32) -> Option<T> {
        self.bounds()
            .has_point(Vec2::new(x, y))
            .then(|| self.get(x, y))
    }

    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> &mut T {
        let i = self.index(x, y);
        &mut self.cells[i]
    }

    /// Overwrite the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        let i = self.index(x, y);
        self.cells[i] = value;
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// The cells of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is outside the grid.
    pub fn row(&self, y: i32) -> &[T] {
        assert!(y >= 0 && y < self.size.y, "row {y} is outside the grid");
        let width = self.size.x as usize;
        let start = y as usize * width;
        &self.cells[start..start + width]
    }

    /// Change dimensions, keeping the overlapping top-left region.
    ///
    /// Newly exposed cells are `T::default()`.
    pub fn resize(&mut self, width: i32, height: i32) {
        let new_size = Vec2::new(width, height);
        if new_size == self.size {
            return;
        }
        let mut resized = Self::new(width, height);
        let keep = Rect::from_size(self.size.min(new_size));
        resized.map(&*self, Vec2::ZERO, keep);
        *self = resized;
    }

    /// Change dimensions, discarding all data.
    pub fn clean_resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Set every cell of `area` (clipped to the grid) to `value`.
    pub fn fill_area(&mut self, area: Rect, value: T) {
        self.fill_with(area, |_| value);
    }

    /// Set every cell of `area` (clipped to the grid) to `f(position)`.
    pub fn fill_with(&mut self, area: Rect, mut f: impl FnMut(Vec2) -> T) {
        for p in area.trim(&self.bounds()).points() {
            let i = self.index(p.x, p.y);
            self.cells[i] = f(p);
        }
    }

    /// Copy `view` into this grid with the view's origin at `position`.
    ///
    /// Only cells of `area` (in this grid's coordinates) are written, after
    /// trimming it against both this grid's bounds and the view's bounds
    /// translated by `position`. Fully out-of-range placements write nothing.
    ///
    /// Returns the area actually written.
    pub fn map<V: View<T> + ?Sized>(&mut self, view: &V, position: Vec2, area: Rect) -> Rect {
        self.map_with(view, position, area, |_, top| top)
    }

    /// Like [`map`](Self::map), combining each destination cell with the
    /// source cell through `combine(existing, incoming)`.
    pub fn map_with<V: View<T> + ?Sized>(
        &mut self,
        view: &V,
        position: Vec2,
        area: Rect,
        mut combine: impl FnMut(T, T) -> T,
    ) -> Rect {
        let clipped = area
            .trim(&self.bounds())
            .trim(&view.bounds().translate(position));
        for p in clipped.points() {
            let incoming = view.get_at(p - position);
            let i = self.index(p.x, p.y);
            self.cells[i] = combine(self.cells[i], incoming);
        }
        clipped
    }

    /// A window onto `area` of this grid.
    pub fn view(&self, area: Rect) -> GridView<'_, T> {
        GridView::new(self, area)
    }

    /// A view of the whole grid.
    pub fn as_view(&self) -> GridView<'_, T> {
        GridView::full(self)
    }

    /// A rotated copy. Quarter turns swap width and height.
    ///
    /// # Panics
    ///
    /// Panics if the grid is empty.
    pub fn rotated(&self, rotation: Rotation) -> Self {
        assert!(!self.is_empty(), "cannot rotate an empty grid");
        let mut out = Self::new(
            rotation.rotate_size(self.size).x,
            rotation.rotate_size(self.size).y,
        );
        for p in self.bounds().points() {
            let q = rotation.apply(p, self.size);
            out.set(q.x, q.y, self.get(p.x, p.y));
        }
        out
    }

    /// A mirrored copy.
    ///
    /// # Panics
    ///
    /// Panics if the grid is empty.
    pub fn flipped(&self, flip: Flip) -> Self {
        assert!(!self.is_empty(), "cannot flip an empty grid");
        let mut out = Self::new(self.size.x, self.size.y);
        for p in self.bounds().points() {
            let q = flip.apply(p, self.size);
            out.set(q.x, q.y, self.get(p.x, p.y));
        }
        out
    }
}

impl<T: Copy + Default> View<T> for Grid<T> {
    #[inline]
    fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> T {
        Grid::get(self, x, y)
    }
}

impl Grid<Pixel> {
    /// Build a pixel grid from lines of text.
    ///
    /// The grid is as wide as the longest line; shorter lines are padded
    /// with transparent pixels.
    pub fn from_text(text: &str, foreground: Color, background: Color) -> Self {
        let lines: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0) as i32;
        Self::from_fn(Vec2::new(width, lines.len() as i32), |p| {
            lines[p.y as usize]
                .get(p.x as usize)
                .map_or(Pixel::TRANSPARENT, |&c| Pixel::new(c, foreground, background))
        })
    }

    /// Paint `view` over this grid; see [`map`](Self::map) for placement.
    pub fn merge_map<V: View<Pixel> + ?Sized>(
        &mut self,
        view: &V,
        position: Vec2,
        area: Rect,
    ) -> Rect {
        self.map_with(view, position, area, Pixel::merge)
    }

    /// The glyphs of row `y` as a string, transparent glyphs shown as spaces.
    pub fn row_text(&self, y: i32) -> String {
        self.row(y)
            .iter()
            .map(|p| {
                if p.has_transparent_char() {
                    Pixel::BLANK_CHAR
                } else {
                    p.character
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: i32, height: i32) -> Grid<i32> {
        Grid::from_fn(Vec2::new(width, height), |p| 1 + p.y * 10 + p.x)
    }

    #[test]
    fn grid_creation() {
        let grid: Grid<i32> = Grid::new(80, 24);
        assert_eq!(grid.width(), 80);
        assert_eq!(grid.height(), 24);
        assert_eq!(grid.len(), 80 * 24);
        assert!(grid.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn zero_sized_grid_is_legal() {
        let grid: Grid<i32> = Grid::new(0, 5);
        assert!(grid.is_empty());
        assert_eq!(grid.bounds(), Rect::new(0, 0, 0, 5));
    }

    #[test]
    #[should_panic(expected = "width must be >= 0")]
    fn negative_width_panics() {
        let _ = Grid::<i32>::new(-1, 3);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn from_vec_length_mismatch_panics() {
        let _ = Grid::from_vec(2, 2, vec![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_range_get_panics() {
        let grid: Grid<i32> = Grid::new(3, 3);
        let _ = grid.get(3, 0);
    }

    #[test]
    fn get_set_and_checked_get() {
        let mut grid: Grid<i32> = Grid::new(4, 4);
        grid.set(2, 3, 7);
        assert_eq!(grid.get(2, 3), 7);
        assert_eq!(grid.checked_get(2, 3), Some(7));
        assert_eq!(grid.checked_get(4, 0), None);
        assert_eq!(grid.checked_get(-1, 0), None);
        *grid.get_mut(0, 0) = 9;
        assert_eq!(grid.row(0), &[9, 0, 0, 0]);
    }

    #[test]
    fn resize_preserves_top_left() {
        let mut grid = numbered(3, 3);
        grid.resize(5, 2);
        assert_eq!(grid.size(), Vec2::new(5, 2));
        assert_eq!(grid.row(0), &[1, 2, 3, 0, 0]);
        assert_eq!(grid.row(1), &[11, 12, 13, 0, 0]);

        grid.resize(2, 3);
        assert_eq!(grid.row(0), &[1, 2]);
        assert_eq!(grid.row(1), &[11, 12]);
        assert_eq!(grid.row(2), &[0, 0]);
    }

    #[test]
    fn clean_resize_discards() {
        let mut grid = numbered(3, 3);
        grid.clean_resize(3, 3);
        assert!(grid.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn fill_area_clips() {
        let mut grid: Grid<i32> = Grid::new(4, 4);
        grid.fill_area(Rect::new(2, 2, 10, 10), 5);
        assert_eq!(grid.row(1), &[0, 0, 0, 0]);
        assert_eq!(grid.row(3), &[0, 0, 5, 5]);
        grid.fill_with(Rect::new(-5, 0, 1, 1), |p| p.x + 100);
        assert_eq!(grid.get(0, 0), 100);
        grid.fill(1);
        assert!(grid.cells().iter().all(|&c| c == 1));
    }

    #[test]
    fn map_places_view_origin_at_position() {
        let src = numbered(2, 2);
        let mut dst: Grid<i32> = Grid::new(5, 5);
        let written = dst.map(&src, Vec2::new(1, 2), Rect::sized(Vec2::new(1, 2), src.size()));
        assert_eq!(written, Rect::new(1, 2, 3, 4));
        assert_eq!(dst.get(1, 2), 1);
        assert_eq!(dst.get(2, 3), 12);
        assert_eq!(dst.get(0, 0), 0);
    }

    #[test]
    fn map_partial_area_copies_only_that_part() {
        let src = numbered(3, 3);
        let mut dst: Grid<i32> = Grid::new(3, 3);
        dst.map(&src, Vec2::ZERO, Rect::new(1, 1, 2, 3));
        assert_eq!(dst.row(0), &[0, 0, 0]);
        assert_eq!(dst.row(1), &[0, 12, 0]);
        assert_eq!(dst.row(2), &[0, 22, 0]);
    }

    #[test]
    fn map_clips_negative_positions() {
        let src = numbered(3, 3);
        let mut dst: Grid<i32> = Grid::new(2, 2);
        let written = dst.map(&src, Vec2::new(-1, -1), Rect::new(-1, -1, 2, 2));
        assert_eq!(written, Rect::new(0, 0, 2, 2));
        assert_eq!(dst.row(0), &[12, 13]);
        assert_eq!(dst.row(1), &[22, 23]);
    }

    #[test]
    fn map_fully_outside_is_noop() {
        let src = numbered(3, 3);
        let mut dst: Grid<i32> = Grid::new(2, 2);
        let written = dst.map(&src, Vec2::new(10, 10), Rect::new(10, 10, 13, 13));
        assert!(written.is_empty());
        assert!(dst.cells().iter().all(|&c| c == 0));
        // Area inside the grid but outside the placed view.
        let written = dst.map(&src, Vec2::new(-5, 0), Rect::new(0, 0, 2, 2));
        assert!(written.is_empty());
    }

    #[test]
    fn merge_map_respects_transparency() {
        let mut dst = Grid::filled(3, 1, Pixel::new('.', Color::Gray, Color::Black));
        let src = Grid::from_vec(
            2,
            1,
            vec![
                Pixel::from_char('a'),
                Pixel::TRANSPARENT.with_background(Color::Red),
            ],
        );
        dst.merge_map(&src, Vec2::new(1, 0), Rect::new(1, 0, 3, 1));
        assert_eq!(dst.get(0, 0), Pixel::new('.', Color::Gray, Color::Black));
        assert_eq!(dst.get(1, 0), Pixel::new('a', Color::Gray, Color::Black));
        assert_eq!(dst.get(2, 0), Pixel::new('.', Color::Gray, Color::Red));
    }

    #[test]
    fn rotate_quarter_turn_swaps_dimensions() {
        let grid = numbered(3, 2);
        let rotated = grid.rotated(Rotation::Deg90);
        assert_eq!(rotated.size(), Vec2::new(2, 3));
        // Clockwise: bottom-left becomes top-left.
        assert_eq!(rotated.row(0), &[11, 1]);
        assert_eq!(rotated.row(1), &[12, 2]);
        assert_eq!(rotated.row(2), &[13, 3]);
    }

    #[test]
    fn rotate_half_turn_keeps_dimensions() {
        let grid = numbered(3, 2);
        let rotated = grid.rotated(Rotation::Deg180);
        assert_eq!(rotated.size(), Vec2::new(3, 2));
        assert_eq!(rotated.row(0), &[13, 12, 11]);
        assert_eq!(rotated.row(1), &[3, 2, 1]);
    }

    #[test]
    fn four_rotations_round_trip() {
        let grid = numbered(4, 3);
        let mut turned = grid.clone();
        for _ in 0..4 {
            turned = turned.rotated(Rotation::Deg90);
        }
        assert_eq!(turned, grid);
    }

    #[test]
    fn flips() {
        let grid = numbered(3, 2);
        assert_eq!(grid.flipped(Flip::Horizontal).row(0), &[3, 2, 1]);
        assert_eq!(grid.flipped(Flip::Vertical).row(0), &[11, 12, 13]);
    }

    #[test]
    #[should_panic(expected = "cannot rotate an empty grid")]
    fn rotating_empty_grid_panics() {
        let _ = Grid::<i32>::new(0, 3).rotated(Rotation::Deg90);
    }

    #[test]
    fn from_text_pads_short_lines() {
        let grid = Grid::from_text("ab\nc", Color::White, Color::Black);
        assert_eq!(grid.size(), Vec2::new(2, 2));
        assert_eq!(grid.get(0, 1), Pixel::new('c', Color::White, Color::Black));
        assert!(grid.get(1, 1).is_transparent());
        assert_eq!(grid.row_text(1), "c ");
    }

    #[test]
    fn views_see_live_contents() {
        let mut grid = numbered(2, 2);
        grid.set(0, 0, 42);
        let view = grid.view(Rect::new(0, 0, 1, 1));
        assert_eq!(view.get(0, 0), 42);
        assert_eq!(grid.as_view().bake(), grid);
    }
}
