#![forbid(unsafe_code)]

//! Plain pixel images.

use pixl_core::Vec2;
use pixl_render::cell::{Color, Pixel};
use pixl_render::grid::Grid;

use crate::renderable::{Props, Renderable};
use crate::view::PixelView;

/// A renderable backed by an owned pixel grid.
///
/// `render` borrows the grid directly; nothing is ever copied.
#[derive(Debug, Clone)]
pub struct Image {
    grid: Grid<Pixel>,
    props: Props,
}

impl Image {
    pub fn new(grid: Grid<Pixel>) -> Self {
        Self {
            grid,
            props: Props::new(),
        }
    }

    /// A `width x height` image of `pixel`.
    pub fn filled(width: i32, height: i32, pixel: Pixel) -> Self {
        Self::new(Grid::filled(width, height, pixel))
    }

    /// Lines of text in the given colors.
    pub fn from_text(text: &str, foreground: Color, background: Color) -> Self {
        Self::new(Grid::from_text(text, foreground, background))
    }

    #[must_use]
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn grid(&self) -> &Grid<Pixel> {
        &self.grid
    }

    /// Mutable access to the pixels. Counts as a change.
    pub fn grid_mut(&mut self) -> &mut Grid<Pixel> {
        self.props.touch();
        &mut self.grid
    }

    /// Returns true if the pixel changed.
    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) -> bool {
        if self.grid.get(x, y) == pixel {
            return false;
        }
        self.grid.set(x, y, pixel);
        self.props.touch();
        true
    }

    /// Resize, keeping the overlapping top-left pixels.
    pub fn resize(&mut self, width: i32, height: i32) {
        if self.grid.size() != Vec2::new(width, height) {
            self.grid.resize(width, height);
            self.props.touch();
        }
    }

    /// Swap in a new grid.
    pub fn set_grid(&mut self, grid: Grid<Pixel>) -> Grid<Pixel> {
        self.props.touch();
        std::mem::replace(&mut self.grid, grid)
    }
}

impl Renderable for Image {
    fn size(&self) -> Vec2 {
        self.grid.size()
    }

    fn props(&self) -> &Props {
        &self.props
    }

    fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }

    fn render(&mut self) -> PixelView<'_> {
        PixelView::Grid(self.grid.as_view())
    }
}
