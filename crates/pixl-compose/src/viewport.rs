#![forbid(unsafe_code)]

//! The compositor.
//!
//! A [`Viewport`] owns a pixel buffer and a list of sources. Composing a
//! frame runs the same steps every time:
//!
//! 1. Fill the buffer with the base pixel.
//! 2. Keep the visible sources.
//! 3. Sort them by layer, ascending. Ties keep list order.
//! 4. Place each at `offset + anchor.apply(viewport_size - source_size)`.
//! 5. Skip sources that miss the viewport entirely.
//! 6. Merge each source's view into the buffer, clipped to the viewport.
//!
//! The buffer is recomposed only when the viewport's
//! [`generation`](Renderable::generation) moves, which happens whenever the
//! viewport or anything inside it changes.

use std::fmt;

use pixl_core::{Rect, Vec2};
use pixl_render::cell::Pixel;
use pixl_render::grid::Grid;
use pixl_render::view::View;
use smallvec::SmallVec;

use crate::renderable::{Generation, Props, Renderable};
use crate::view::PixelView;

/// Where `source` lands inside a container of `container` size.
pub fn placement<R: Renderable + ?Sized>(source: &R, container: Vec2) -> Vec2 {
    source.offset() + source.anchor().apply(container - source.size())
}

/// A rendered source with its placement.
#[derive(Debug)]
pub(crate) struct Placed<'a> {
    pub layer: i32,
    /// Container coordinates of the view's origin.
    pub position: Vec2,
    /// Cells the view covers, clipped to the container.
    pub area: Rect,
    pub view: PixelView<'a>,
}

pub(crate) type Layers<'a> = SmallVec<[Placed<'a>; 8]>;

/// Render every visible source that touches a `container`-sized area,
/// sorted by layer. Also returns how many visible sources missed.
pub(crate) fn collect_layers<R: Renderable>(
    sources: &mut [R],
    container: Vec2,
) -> (Layers<'_>, usize) {
    let bounds = Rect::from_size(container);
    let mut layers = Layers::new();
    let mut skipped = 0;

    for source in sources.iter_mut() {
        if !source.visible() {
            continue;
        }
        let position = placement(&*source, container);
        if !Rect::sized(position, source.size()).overlaps(&bounds) {
            skipped += 1;
            continue;
        }
        let layer = source.layer();
        let view = source.render();
        let area = view.bounds().translate(position).trim(&bounds);
        layers.push(Placed {
            layer,
            position,
            area,
            view,
        });
    }

    layers.sort_by_key(|placed| placed.layer);
    (layers, skipped)
}

/// Newest generation among `sources`.
pub(crate) fn newest<R: Renderable>(sources: &[R]) -> Generation {
    sources
        .iter()
        .map(Renderable::generation)
        .max()
        .unwrap_or(Generation::NEVER)
}

/// An eagerly composed viewport.
///
/// Viewports are renderables themselves, so they nest.
///
/// # Example
///
/// ```
/// use pixl_compose::image::Image;
/// use pixl_compose::renderable::Renderable;
/// use pixl_compose::viewport::Viewport;
/// use pixl_core::Vec2;
/// use pixl_render::cell::{Color, Pixel};
/// use pixl_render::view::View;
///
/// let mut viewport = Viewport::new(10, 4).with_base(Pixel::new(' ', Color::Gray, Color::Black));
/// let mut image = Image::from_text("hi", Color::White, Color::Transparent);
/// image.props_mut().set_offset(Vec2::new(1, 1));
/// viewport.push(Box::new(image));
///
/// let frame = viewport.render();
/// assert_eq!(frame.get(1, 1), Pixel::new('h', Color::White, Color::Black));
/// ```
pub struct Viewport<R = Box<dyn Renderable>> {
    size: Vec2,
    base: Pixel,
    sources: Vec<R>,
    buffer: Grid<Pixel>,
    props: Props,
    composed_for: Generation,
    compositions: u64,
    stats: ComposeStats,
}

/// What the last composition drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// Visible sources merged into the buffer.
    pub drawn: usize,
    /// Visible sources placed entirely outside the viewport.
    pub skipped: usize,
}

impl<R> fmt::Debug for Viewport<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("size", &self.size)
            .field("base", &self.base)
            .field("sources", &self.sources.len())
            .field("compositions", &self.compositions)
            .finish_non_exhaustive()
    }
}

impl<R: Renderable> Viewport<R> {
    /// An empty viewport with a transparent base.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Vec2::new(width, height),
            base: Pixel::TRANSPARENT,
            sources: Vec::new(),
            buffer: Grid::new(width, height),
            props: Props::new(),
            composed_for: Generation::NEVER,
            compositions: 0,
            stats: ComposeStats::default(),
        }
    }

    /// The pixel shown where no source draws.
    #[must_use]
    pub fn with_base(mut self, base: Pixel) -> Self {
        self.set_base(base);
        self
    }

    #[must_use]
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn base(&self) -> Pixel {
        self.base
    }

    pub fn set_base(&mut self, base: Pixel) -> bool {
        self.props.observe(&mut self.base, base)
    }

    /// Resize, keeping the overlapping part of the buffer.
    pub fn set_size(&mut self, size: Vec2) -> bool {
        if !self.props.observe(&mut self.size, size) {
            return false;
        }
        self.buffer.resize(size.x, size.y);
        true
    }

    pub fn set_width(&mut self, width: i32) -> bool {
        self.set_size(Vec2::new(width, self.size.y))
    }

    pub fn set_height(&mut self, height: i32) -> bool {
        self.set_size(Vec2::new(self.size.x, height))
    }

    /// Resize, discarding the buffer.
    pub fn clean_resize(&mut self, width: i32, height: i32) {
        self.size = Vec2::new(width, height);
        self.buffer.clean_resize(width, height);
        self.props.touch();
    }

    /// Append a source, returning its index.
    pub fn push(&mut self, source: R) -> usize {
        self.sources.push(source);
        self.props.touch();
        self.sources.len() - 1
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, source: R) {
        self.sources.insert(index, source);
        self.props.touch();
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> R {
        let source = self.sources.remove(index);
        self.props.touch();
        source
    }

    /// Swap the source at `index` for another, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn replace(&mut self, index: usize, source: R) -> R {
        let old = std::mem::replace(&mut self.sources[index], source);
        self.props.touch();
        old
    }

    pub fn clear(&mut self) {
        if !self.sources.is_empty() {
            self.sources.clear();
            self.props.touch();
        }
    }

    pub fn source(&self, index: usize) -> Option<&R> {
        self.sources.get(index)
    }

    /// Changes made through the returned source are picked up through its
    /// own generation.
    /// Marks the viewport changed when `index` is in range.
    pub fn source_mut(&mut self, index: usize) -> Option<&mut R> {
        let source = self.sources.get_mut(index)?;
        self.props.touch();
        Some(source)
    }

    pub fn sources(&self) -> &[R] {
        &self.sources
    }

    /// Marks the viewport changed: reordering or swapping sources may leave
    /// every child generation as it was.
    pub fn sources_mut(&mut self) -> &mut [R] {
        self.props.touch();
        &mut self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The buffer as of the last composition.
    pub fn buffer(&self) -> &Grid<Pixel> {
        &self.buffer
    }

    /// Number of times the buffer has been composed.
    pub fn compositions(&self) -> u64 {
        self.compositions
    }

    pub fn last_stats(&self) -> ComposeStats {
        self.stats
    }

    fn compose(&mut self) {
        let _span = pixl_core::debug_span!(
            "viewport_compose",
            width = self.size.x,
            height = self.size.y,
            sources = self.sources.len()
        )
        .entered();

        self.buffer.fill(self.base);
        let (layers, skipped) = collect_layers(&mut self.sources, self.size);
        for placed in &layers {
            self.buffer.merge_map(&placed.view, placed.position, placed.area);
            pixl_core::trace!(layer = placed.layer, area = ?placed.area, "source drawn");
        }
        self.compositions += 1;
        self.stats = ComposeStats {
            drawn: layers.len(),
            skipped,
        };
        pixl_core::trace!(drawn = layers.len(), skipped, "viewport composed");
    }
}

impl<R: Renderable> Renderable for Viewport<R> {
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
        let generation = self.generation();
        if self.composed_for != generation {
            self.compose();
            self.composed_for = generation;
        }
        PixelView::Grid(self.buffer.as_view())
    }
}

#[cfg(test)]
mod tests {
    use pixl_core::Anchor;
    use pixl_render::cell::Color;

    use super::*;
    use crate::image::Image;

    const BASE: Pixel = Pixel::new(' ', Color::Gray, Color::Black);

    fn solid(width: i32, height: i32, c: char) -> Image {
        Image::filled(width, height, Pixel::from_char(c))
    }

    fn rows(view: &PixelView<'_>) -> Vec<String> {
        (0..view.height())
            .map(|y| (0..view.width()).map(|x| view.get(x, y).character).collect())
            .collect()
    }

    #[test]
    fn empty_viewport_shows_base() {
        let mut viewport: Viewport = Viewport::new(3, 2).with_base(BASE);
        let view = viewport.render();
        assert!(view.bake().cells().iter().all(|&p| p == BASE));
    }

    #[test]
    fn anchors_place_sources() {
        let mut viewport: Viewport<Image> = Viewport::new(5, 3).with_base(BASE);
        let mut corner = solid(1, 1, 'R');
        corner.props_mut().set_anchor(Anchor::RIGHT | Anchor::BOTTOM);
        let mut middle = solid(1, 1, 'C');
        middle.props_mut().set_anchor(Anchor::CENTERED);
        viewport.push(corner);
        viewport.push(middle);

        assert_eq!(rows(&viewport.render()), vec!["     ", "  C  ", "    R"]);
    }

    #[test]
    fn layers_sort_and_ties_keep_order() {
        let mut viewport: Viewport<Image> = Viewport::new(3, 1).with_base(BASE);
        let mut top = solid(3, 1, 'T');
        top.props_mut().set_layer(5);
        viewport.push(top);
        viewport.push(solid(2, 1, 'a'));
        viewport.push(solid(1, 1, 'b'));

        assert_eq!(rows(&viewport.render()), vec!["TTT"]);

        viewport.source_mut(0).unwrap().props_mut().set_layer(-1);
        assert_eq!(rows(&viewport.render()), vec!["baT"]);
    }

    #[test]
    fn invisible_and_offscreen_sources_are_skipped() {
        let mut viewport: Viewport<Image> = Viewport::new(4, 2).with_base(BASE);
        let mut hidden = solid(4, 2, 'h');
        hidden.props_mut().set_visible(false);
        let mut away = solid(2, 2, 'o');
        away.props_mut().set_offset(Vec2::new(10, 0));
        let mut partial = solid(2, 2, 'p');
        partial.props_mut().set_offset(Vec2::new(3, -1));
        viewport.push(hidden);
        viewport.push(away);
        viewport.push(partial);

        assert_eq!(rows(&viewport.render()), vec!["   p", "    "]);
        assert_eq!(viewport.last_stats(), ComposeStats { drawn: 1, skipped: 1 });
    }

    #[test]
    fn transparency_shows_lower_layers() {
        let mut viewport: Viewport<Image> = Viewport::new(2, 1).with_base(BASE);
        viewport.push(Image::filled(2, 1, Pixel::new('x', Color::Red, Color::Blue)));
        viewport.push(Image::filled(1, 1, Pixel::TRANSPARENT.with_foreground(Color::Green)));
        let view = viewport.render();
        assert_eq!(view.get(0, 0), Pixel::new('x', Color::Green, Color::Blue));
        assert_eq!(view.get(1, 0), Pixel::new('x', Color::Red, Color::Blue));
    }

    #[test]
    fn recomposes_only_after_changes() {
        let mut viewport: Viewport<Image> = Viewport::new(4, 4).with_base(BASE);
        viewport.push(solid(2, 2, '#'));

        let first: *const Grid<Pixel> = viewport.render().grid().unwrap();
        let second: *const Grid<Pixel> = viewport.render().grid().unwrap();
        assert_eq!(first, second);
        assert_eq!(viewport.compositions(), 1);

        viewport
            .source_mut(0)
            .unwrap()
            .set_pixel(0, 0, Pixel::from_char('!'));
        assert_eq!(viewport.render().get(0, 0).character, '!');
        assert_eq!(viewport.compositions(), 2);

        assert!(!viewport.set_base(BASE));
        viewport.render();
        assert_eq!(viewport.compositions(), 2);
    }

    #[test]
    fn replacing_a_source_with_an_older_one_recomposes() {
        let older = solid(1, 1, 'o');
        let mut viewport: Viewport<Image> = Viewport::new(1, 1);
        viewport.push(solid(1, 1, 'n'));
        viewport.render();
        viewport.replace(0, older);
        assert_eq!(viewport.render().get(0, 0).character, 'o');
        viewport.remove(0);
        assert!(viewport.render().get(0, 0).is_transparent());
    }

    #[test]
    fn swapping_in_an_older_source_recomposes() {
        let older = solid(1, 1, 'o');
        let mut viewport: Viewport<Image> = Viewport::new(1, 1);
        viewport.push(solid(1, 1, 'n'));
        assert_eq!(viewport.render().get(0, 0).character, 'n');

        *viewport.source_mut(0).unwrap() = older;
        assert_eq!(viewport.render().get(0, 0).character, 'o');
        assert_eq!(viewport.compositions(), 2);
    }

    #[test]
    fn reordering_sources_recomposes() {
        let mut viewport: Viewport<Image> = Viewport::new(1, 1);
        viewport.push(solid(1, 1, 'a'));
        viewport.push(solid(1, 1, 'b'));
        assert_eq!(viewport.render().get(0, 0).character, 'b');

        viewport.sources_mut().swap(0, 1);
        assert_eq!(viewport.render().get(0, 0).character, 'a');
    }

    #[test]
    fn out_of_range_source_mut_leaves_cache_alone() {
        let mut viewport: Viewport<Image> = Viewport::new(1, 1);
        viewport.push(solid(1, 1, 'a'));
        viewport.render();
        assert!(viewport.source_mut(3).is_none());
        viewport.render();
        assert_eq!(viewport.compositions(), 1);
    }

    #[test]
    fn resize_preserves_until_next_composition() {
        let mut viewport: Viewport<Image> = Viewport::new(2, 1);
        viewport.push(solid(2, 1, 'k'));
        viewport.render();
        assert!(viewport.set_width(3));
        assert_eq!(viewport.buffer().row_text(0), "kk ");
        assert!(!viewport.set_height(1));
        assert_eq!(viewport.render().size(), Vec2::new(3, 1));
        viewport.clean_resize(1, 1);
        assert!(viewport.buffer().get(0, 0).is_transparent());
    }

    #[test]
    fn viewports_nest() {
        let mut inner: Viewport<Image> = Viewport::new(2, 1);
        inner.push(solid(1, 1, 'i'));
        inner.props_mut().set_anchor(Anchor::RIGHT);

        let mut outer: Viewport = Viewport::new(4, 1).with_base(BASE);
        outer.push(Box::new(inner));
        assert_eq!(rows(&outer.render()), vec!["  i "]);
    }
}
