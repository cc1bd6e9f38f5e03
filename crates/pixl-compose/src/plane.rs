#![forbid(unsafe_code)]

//! Infinite planes: a tile repeated forever, seen through a window.

use pixl_core::Vec2;
use pixl_render::cell::Pixel;
use pixl_render::grid::Grid;
use pixl_render::view::View;

use crate::renderable::{Props, Renderable};
use crate::view::PixelView;

/// `size` cells of an endlessly repeated tile, starting at `scroll`.
#[derive(Debug, Clone, Copy)]
pub struct TiledView<'a> {
    tile: &'a Grid<Pixel>,
    size: Vec2,
    scroll: Vec2,
}

impl<'a> TiledView<'a> {
    pub fn new(tile: &'a Grid<Pixel>, size: Vec2, scroll: Vec2) -> Self {
        Self { tile, size, scroll }
    }
}

impl View<Pixel> for TiledView<'_> {
    #[inline]
    fn size(&self) -> Vec2 {
        self.size
    }

    fn get(&self, x: i32, y: i32) -> Pixel {
        if self.tile.is_empty() {
            return Pixel::TRANSPARENT;
        }
        self.tile.get(
            (x + self.scroll.x).rem_euclid(self.tile.width()),
            (y + self.scroll.y).rem_euclid(self.tile.height()),
        )
    }
}

/// A renderable that repeats a tile over a declared size.
///
/// Nothing is materialized: scrolling only moves the window.
#[derive(Debug, Clone)]
pub struct Plane {
    tile: Grid<Pixel>,
    size: Vec2,
    scroll: Vec2,
    props: Props,
}

impl Plane {
    pub fn new(tile: Grid<Pixel>, size: Vec2) -> Self {
        Self {
            tile,
            size,
            scroll: Vec2::ZERO,
            props: Props::new(),
        }
    }

    pub fn tile(&self) -> &Grid<Pixel> {
        &self.tile
    }

    pub fn set_tile(&mut self, tile: Grid<Pixel>) {
        self.tile = tile;
        self.props.touch();
    }

    pub fn set_size(&mut self, size: Vec2) -> bool {
        self.props.observe(&mut self.size, size)
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: Vec2) -> bool {
        self.props.observe(&mut self.scroll, scroll)
    }

    /// Move the window by `delta`.
    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        self.set_scroll(self.scroll + delta)
    }
}

impl Renderable for Plane {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn props(&self) -> &Props {
        &self.props
    }

    fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }

    fn render(&mut self) -> PixelView<'_> {
        PixelView::Tiled(TiledView::new(&self.tile, self.size, self.scroll))
    }
}
