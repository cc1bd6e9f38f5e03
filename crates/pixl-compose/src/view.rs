#![forbid(unsafe_code)]

//! The output of [`Renderable::render`](crate::Renderable::render).
//!
//! [`PixelView`] is a small closed set of view kinds. Grid-backed sources
//! hand out a borrowed window onto their buffer; decorators wrap the views of
//! the sources they decorate and compute pixels on demand, so a chain of
//! decorators costs nothing until somebody reads a cell.

use pixl_core::Vec2;
use pixl_render::cell::Pixel;
use pixl_render::grid::Grid;
use pixl_render::view::{GridView, View};

use crate::filter::FilteredView;
use crate::overlay::OverlayView;
use crate::plane::TiledView;
use crate::rotate::RotatedView;
use crate::virtual_viewport::CompositeView;

/// A read-only pixel view produced by a renderable.
#[derive(Debug)]
pub enum PixelView<'a> {
    /// A window onto an owned buffer.
    Grid(GridView<'a, Pixel>),
    /// A per-pixel function of another view.
    Filtered(FilteredView<'a>),
    /// One view merged over another.
    Overlay(OverlayView<'a>),
    /// A rotated view.
    Rotated(RotatedView<'a>),
    /// A tile repeated over an area.
    Tiled(TiledView<'a>),
    /// Several placed views merged by layer.
    ///
    /// Boxed: the composite holds the views of its sources inline.
    Composite(Box<CompositeView<'a>>),
}

impl<'a> PixelView<'a> {
    /// The buffer behind this view, if it is a full window onto one.
    ///
    /// Two renders returning the same buffer compare equal by address.
    pub fn grid(&self) -> Option<&'a Grid<Pixel>> {
        match self {
            Self::Grid(view) if view.is_full() => Some(view.grid()),
            _ => None,
        }
    }
}

impl<'a> From<GridView<'a, Pixel>> for PixelView<'a> {
    fn from(view: GridView<'a, Pixel>) -> Self {
        Self::Grid(view)
    }
}

impl<'a> From<&'a Grid<Pixel>> for PixelView<'a> {
    fn from(grid: &'a Grid<Pixel>) -> Self {
        Self::Grid(grid.as_view())
    }
}

impl View<Pixel> for PixelView<'_> {
    fn size(&self) -> Vec2 {
        match self {
            Self::Grid(view) => view.size(),
            Self::Filtered(view) => view.size(),
            Self::Overlay(view) => view.size(),
            Self::Rotated(view) => view.size(),
            Self::Tiled(view) => view.size(),
            Self::Composite(view) => view.size(),
        }
    }

    fn get(&self, x: i32, y: i32) -> Pixel {
        match self {
            Self::Grid(view) => view.get(x, y),
            Self::Filtered(view) => view.get(x, y),
            Self::Overlay(view) => view.get(x, y),
            Self::Rotated(view) => view.get(x, y),
            Self::Tiled(view) => view.get(x, y),
            Self::Composite(view) => view.get(x, y),
        }
    }
}
