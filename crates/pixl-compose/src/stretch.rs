#![forbid(unsafe_code)]

//! Horizontal stretching.
//!
//! Terminal cells are roughly twice as tall as they are wide, so sources
//! drawn with one cell per logical pixel look squashed. [`Stretch`] widens
//! every source column into `factor` destination columns.

use pixl_core::Vec2;
use pixl_render::cell::Pixel;
use pixl_render::grid::Grid;
use pixl_render::view::View;

use crate::renderable::{Generation, Props, Renderable};
use crate::view::PixelView;

/// How the extra columns of a stretched cell are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StretchPolicy {
    /// The first column keeps the full pixel, the rest keep only its colors.
    #[default]
    None,
    /// Every column repeats the full pixel.
    Stretch,
    /// The whole row is tiled `factor` times side by side.
    Slide,
    /// Every column keeps only the colors.
    Hide,
}

impl StretchPolicy {
    /// Pixel for destination column `x` of a row read from `source`.
    fn pixel<V: View<Pixel> + ?Sized>(self, source: &V, x: i32, y: i32, factor: i32) -> Pixel {
        match self {
            Self::None => {
                let pixel = source.get(x / factor, y);
                if x % factor == 0 {
                    pixel
                } else {
                    pixel.colors_only()
                }
            }
            Self::Stretch => source.get(x / factor, y),
            Self::Slide => source.get(x % source.width(), y),
            Self::Hide => source.get(x / factor, y).colors_only(),
        }
    }
}

/// Decorator widening a source by an integer factor.
///
/// Baked stretches rebuild their buffer only when the source or settings
/// change; unbaked ones rebuild on every `render`.
#[derive(Debug)]
pub struct Stretch<R> {
    source: R,
    factor: i32,
    policy: StretchPolicy,
    bake: bool,
    props: Props,
    buffer: Grid<Pixel>,
    baked_for: Generation,
    bakes: u64,
}

impl<R: Renderable> Stretch<R> {
    /// # Panics
    ///
    /// Panics if `factor < 1`.
    pub fn new(source: R, factor: i32, policy: StretchPolicy) -> Self {
        assert!(factor >= 1, "stretch factor must be >= 1, got {factor}");
        Self {
            source,
            factor,
            policy,
            bake: true,
            props: Props::new(),
            buffer: Grid::default(),
            baked_for: Generation::NEVER,
            bakes: 0,
        }
    }

    #[must_use]
    pub fn with_bake(mut self, bake: bool) -> Self {
        self.bake = bake;
        self
    }

    pub fn factor(&self) -> i32 {
        self.factor
    }

    /// # Panics
    ///
    /// Panics if `factor < 1`.
    pub fn set_factor(&mut self, factor: i32) -> bool {
        assert!(factor >= 1, "stretch factor must be >= 1, got {factor}");
        self.props.observe(&mut self.factor, factor)
    }

    pub fn policy(&self) -> StretchPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: StretchPolicy) -> bool {
        self.props.observe(&mut self.policy, policy)
    }

    pub fn bake(&self) -> bool {
        self.bake
    }

    pub fn set_bake(&mut self, bake: bool) {
        self.bake = bake;
    }

    /// Number of times the buffer has been rebuilt.
    pub fn bakes(&self) -> u64 {
        self.bakes
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Mutable access to the decorated source. Marks this decorator changed.
    pub fn source_mut(&mut self) -> &mut R {
        self.props.touch();
        &mut self.source
    }
}

impl<R: Renderable> Renderable for Stretch<R> {
    fn size(&self) -> Vec2 {
        let source = self.source.size();
        Vec2::new(source.x * self.factor, source.y)
    }

    fn props(&self) -> &Props {
        &self.props
    }

    fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }

    fn generation(&self) -> Generation {
        self.props.generation().max(self.source.generation())
    }

    fn render(&mut self) -> PixelView<'_> {
        let generation = self.generation();
        if !self.bake || self.baked_for != generation {
            let (factor, policy) = (self.factor, self.policy);
            let source = self.source.render();
            let size = Vec2::new(source.width() * factor, source.height());
            self.buffer.clean_resize(size.x, size.y);
            self.buffer
                .fill_with(pixl_core::Rect::from_size(size), |p| {
                    policy.pixel(&source, p.x, p.y, factor)
                });
            self.baked_for = generation;
            self.bakes += 1;
            pixl_core::trace!(bakes = self.bakes, ?policy, "stretch rebuilt");
        }
        PixelView::Grid(self.buffer.as_view())
    }
}
