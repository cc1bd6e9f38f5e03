#![forbid(unsafe_code)]

//! A compositor that never owns a buffer.
//!
//! [`VirtualViewport::render`] places and sorts its sources exactly like
//! [`Viewport`](crate::viewport::Viewport) but returns a [`CompositeView`]
//! that resolves each cell only when it is read.

use std::fmt;

use pixl_core::Vec2;
use pixl_render::cell::Pixel;
use pixl_render::view::View;

use crate::renderable::{Generation, Props, Renderable};
use crate::view::PixelView;
use crate::viewport::{Layers, collect_layers, newest};

/// Placed views resolved per cell.
#[derive(Debug)]
pub struct CompositeView<'a> {
    size: Vec2,
    base: Pixel,
    merging: bool,
    layers: Layers<'a>,
    skipped: usize,
}

impl CompositeView<'_> {
    /// Number of sources that can show through.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Visible sources left out because they fall outside the viewport.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl View<Pixel> for CompositeView<'_> {
    #[inline]
    fn size(&self) -> Vec2 {
        self.size
    }

    fn get(&self, x: i32, y: i32) -> Pixel {
        let p = Vec2::new(x, y);
        let mut covering = self.layers.iter().filter(|l| l.area.has_point(p));
        if self.merging {
            covering.fold(self.base, |below, l| below.merge(l.view.get_at(p - l.position)))
        } else {
            covering
                .next_back()
                .map_or(self.base, |l| l.view.get_at(p - l.position))
        }
    }
}

/// A viewport that composes lazily, cell by cell.
///
/// With merging off, each cell shows the topmost covering source verbatim,
/// transparency included, which suits opaque widgets.
pub struct VirtualViewport<R = Box<dyn Renderable>> {
    size: Vec2,
    base: Pixel,
    merging: bool,
    sources: Vec<R>,
    props: Props,
}

impl<R> fmt::Debug for VirtualViewport<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualViewport")
            .field("size", &self.size)
            .field("base", &self.base)
            .field("merging", &self.merging)
            .field("sources", &self.sources.len())
            .finish_non_exhaustive()
    }
}

impl<R: Renderable> VirtualViewport<R> {
    /// An empty merging viewport with a transparent base.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Vec2::new(width, height),
            base: Pixel::TRANSPARENT,
            merging: true,
            sources: Vec::new(),
            props: Props::new(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: Pixel) -> Self {
        self.set_base(base);
        self
    }

    #[must_use]
    pub fn with_merging(mut self, merging: bool) -> Self {
        self.set_merging(merging);
        self
    }

    pub fn base(&self) -> Pixel {
        self.base
    }

    pub fn set_base(&mut self, base: Pixel) -> bool {
        self.props.observe(&mut self.base, base)
    }

    pub fn merging(&self) -> bool {
        self.merging
    }

    pub fn set_merging(&mut self, merging: bool) -> bool {
        self.props.observe(&mut self.merging, merging)
    }

    pub fn set_size(&mut self, size: Vec2) -> bool {
        self.props.observe(&mut self.size, size)
    }

    pub fn push(&mut self, source: R) -> usize {
        self.sources.push(source);
        self.props.touch();
        self.sources.len() - 1
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> R {
        let source = self.sources.remove(index);
        self.props.touch();
        source
    }

    pub fn source(&self, index: usize) -> Option<&R> {
        self.sources.get(index)
    }

    /// Marks the viewport changed when `index` is in range.
    pub fn source_mut(&mut self, index: usize) -> Option<&mut R> {
        let source = self.sources.get_mut(index)?;
        self.props.touch();
        Some(source)
    }

    pub fn sources(&self) -> &[R] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<R: Renderable> Renderable for VirtualViewport<R> {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn props(&self) -> &Props {
        &self.props
    }

    fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }

    fn generation(&self) -> Generation {
        self.props.generation().max(newest(&self.sources))
    }

    fn render(&mut self) -> PixelView<'_> {
        let (layers, skipped) = collect_layers(&mut self.sources, self.size);
        pixl_core::trace!(layers = layers.len(), skipped, "virtual viewport placed");
        PixelView::Composite(Box::new(CompositeView {
            size: self.size,
            base: self.base,
            merging: self.merging,
            layers,
            skipped,
        }))
    }
}
