#![forbid(unsafe_code)]

//! Per-pixel color filters.

use pixl_core::Vec2;
use pixl_render::cell::{Color, Pixel};
use pixl_render::view::View;

use crate::renderable::{Generation, Props, Renderable};
use crate::view::PixelView;

/// A pixel-to-pixel transform.
#[derive(Debug, Clone, Copy)]
pub enum PixelFilter {
    /// Replace the foreground color.
    Foreground(Color),
    /// Replace the background color.
    Background(Color),
    /// Swap foreground and background.
    Invert,
    /// Blank the glyph, keeping colors.
    ColorsOnly,
    /// Arbitrary function.
    Map(fn(Pixel) -> Pixel),
}

impl PixelFilter {
    #[inline]
    pub fn apply(self, pixel: Pixel) -> Pixel {
        match self {
            Self::Foreground(color) => pixel.with_foreground(color),
            Self::Background(color) => pixel.with_background(color),
            Self::Invert => Pixel::new(pixel.character, pixel.background, pixel.foreground),
            Self::ColorsOnly => pixel.colors_only(),
            Self::Map(f) => f(pixel),
        }
    }
}

/// View that runs every pixel of `source` through a filter.
#[derive(Debug)]
pub struct FilteredView<'a> {
    source: Box<PixelView<'a>>,
    filter: PixelFilter,
}

impl<'a> FilteredView<'a> {
    pub fn new(source: PixelView<'a>, filter: PixelFilter) -> Self {
        Self {
            source: Box::new(source),
            filter,
        }
    }
}

impl View<Pixel> for FilteredView<'_> {
    #[inline]
    fn size(&self) -> Vec2 {
        self.source.size()
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> Pixel {
        self.filter.apply(self.source.get(x, y))
    }
}

/// Decorator applying an optional [`PixelFilter`] to a source.
///
/// With no filter set, `render` returns the source's own view untouched.
#[derive(Debug)]
pub struct Filter<R> {
    source: R,
    filter: Option<PixelFilter>,
    props: Props,
}

impl<R: Renderable> Filter<R> {
    pub fn new(source: R, filter: Option<PixelFilter>) -> Self {
        Self {
            source,
            filter,
            props: Props::new(),
        }
    }

    pub fn filter(&self) -> Option<PixelFilter> {
        self.filter
    }

    /// Replace the filter. Always counts as a change.
    pub fn set_filter(&mut self, filter: Option<PixelFilter>) {
        self.filter = filter;
        self.props.touch();
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    /// Mutable access to the decorated source. Marks this decorator changed.
    pub fn source_mut(&mut self) -> &mut R {
        self.props.touch();
        &mut self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Renderable> Renderable for Filter<R> {
    fn size(&self) -> Vec2 {
        self.source.size()
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
        match self.filter {
            None => self.source.render(),
            Some(filter) => PixelView::Filtered(FilteredView::new(self.source.render(), filter)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pixl_render::grid::Grid;

    use super::*;
    use crate::image::Image;

    fn image() -> Image {
        Image::new(Grid::from_text("ab", Color::White, Color::Black))
    }

    #[test]
    fn no_filter_passes_source_view_through() {
        let mut filter = Filter::new(image(), None);
        let source_grid: *const Grid<Pixel> = filter.source().grid();
        let view = filter.render();
        assert!(std::ptr::eq(view.grid().unwrap(), source_grid));
    }

    #[test]
    fn filters_apply_per_pixel() {
        let mut filter = Filter::new(image(), Some(PixelFilter::Foreground(Color::Red)));
        let view = filter.render();
        assert!(matches!(view, PixelView::Filtered(_)));
        assert_eq!(view.get(1, 0), Pixel::new('b', Color::Red, Color::Black));
    }

    #[test]
    fn filter_kinds() {
        let p = Pixel::new('x', Color::White, Color::Blue);
        assert_eq!(PixelFilter::Invert.apply(p), Pixel::new('x', Color::Blue, Color::White));
        assert_eq!(PixelFilter::ColorsOnly.apply(p).character, Pixel::BLANK_CHAR);
        assert_eq!(PixelFilter::Background(Color::Red).apply(p).background, Color::Red);
        let upper = PixelFilter::Map(|p| p.with_character(p.character.to_ascii_uppercase()));
        assert_eq!(upper.apply(p).character, 'X');
    }

    #[test]
    fn generation_tracks_source_and_filter() {
        let mut filter = Filter::new(image(), None);
        let start = filter.generation();
        filter.source_mut().set_pixel(0, 0, Pixel::from_char('z'));
        let edited = filter.generation();
        assert!(edited > start);
        filter.set_filter(Some(PixelFilter::Invert));
        assert!(filter.generation() > edited);
    }
}
