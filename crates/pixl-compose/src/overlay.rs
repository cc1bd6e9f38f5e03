#![forbid(unsafe_code)]

//! Overlays: one renderable painted over another without a buffer.

use pixl_core::{Rect, Vec2};
use pixl_render::cell::Pixel;
use pixl_render::view::View;

use crate::renderable::{Generation, Props, Renderable};
use crate::view::PixelView;

/// `top` merged over `source`, looked up lazily inside their overlap.
#[derive(Debug)]
pub struct OverlayView<'a> {
    source: Box<PixelView<'a>>,
    top: Box<PixelView<'a>>,
    /// Where `top`'s origin sits in `source` coordinates.
    position: Vec2,
    /// Overlap of the placed `top` with `source`, in `source` coordinates.
    overlap: Rect,
}

impl<'a> OverlayView<'a> {
    pub fn new(source: PixelView<'a>, top: PixelView<'a>, position: Vec2) -> Self {
        let overlap = top
            .bounds()
            .translate(position)
            .trim(&source.bounds());
        Self {
            source: Box::new(source),
            top: Box::new(top),
            position,
            overlap,
        }
    }

    /// The cells where `top` shows, in source coordinates.
    pub fn overlap(&self) -> Rect {
        self.overlap
    }
}

impl View<Pixel> for OverlayView<'_> {
    #[inline]
    fn size(&self) -> Vec2 {
        self.source.size()
    }

    fn get(&self, x: i32, y: i32) -> Pixel {
        let below = self.source.get(x, y);
        let p = Vec2::new(x, y);
        if self.overlap.has_point(p) {
            below.merge(self.top.get_at(p - self.position))
        } else {
            below
        }
    }
}

/// Decorator painting `top` over `source`.
///
/// `top` is placed at `top.offset() + top.anchor().apply(source.size() - top.size())`.
/// An invisible `top` leaves the source untouched.
#[derive(Debug)]
pub struct Overlay<S, T> {
    source: S,
    top: T,
    props: Props,
}

impl<S: Renderable, T: Renderable> Overlay<S, T> {
    pub fn new(source: S, top: T) -> Self {
        Self {
            source,
            top,
            props: Props::new(),
        }
    }

    /// Where `top`'s origin lands in source coordinates.
    pub fn top_position(&self) -> Vec2 {
        self.top.offset() + self.top.anchor().apply(self.source.size() - self.top.size())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Marks the overlay changed, like [`top_mut`](Self::top_mut).
    pub fn source_mut(&mut self) -> &mut S {
        self.props.touch();
        &mut self.source
    }

    pub fn top(&self) -> &T {
        &self.top
    }

    /// Mutable access to the top. Swapping it for an object with older
    /// stamps still counts as a change.
    pub fn top_mut(&mut self) -> &mut T {
        self.props.touch();
        &mut self.top
    }

    pub fn into_parts(self) -> (S, T) {
        (self.source, self.top)
    }
}

impl<S: Renderable, T: Renderable> Renderable for Overlay<S, T> {
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
        self.props
            .generation()
            .max(self.source.generation())
            .max(self.top.generation())
    }

    fn render(&mut self) -> PixelView<'_> {
        if !self.top.visible() {
            return self.source.render();
        }
        let position = self.top_position();
        PixelView::Overlay(OverlayView::new(
            self.source.render(),
            self.top.render(),
            position,
        ))
    }
}

#[cfg(test)]
mod tests {
    use pixl_core::Anchor;
    use pixl_render::cell::Color;

    use super::*;
    use crate::image::Image;

    fn backdrop() -> Image {
        Image::filled(3, 3, Pixel::new('a', Color::White, Color::Green))
    }

    #[test]
    fn centered_overlay_merges_only_the_middle() {
        let mut top = Image::filled(1, 1, Pixel::TRANSPARENT.with_background(Color::Red));
        top.props_mut().set_anchor(Anchor::CENTERED);
        let mut overlay = Overlay::new(backdrop(), top);
        let view = overlay.render();

        assert_eq!(view.get(1, 1), Pixel::new('a', Color::White, Color::Red));
        for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2), (1, 0)] {
            assert_eq!(view.get(x, y), Pixel::new('a', Color::White, Color::Green));
        }
    }

    #[test]
    fn overlap_is_trimmed_to_the_source() {
        let mut top = Image::filled(4, 4, Pixel::from_char('#'));
        top.props_mut().set_offset(Vec2::new(2, -1));
        let mut overlay = Overlay::new(backdrop(), top);
        let view = overlay.render();
        let PixelView::Overlay(inner) = &view else {
            panic!("expected an overlay view");
        };
        assert_eq!(inner.overlap(), Rect::new(2, 0, 3, 3));
        assert_eq!(view.get(2, 0).character, '#');
        assert_eq!(view.get(1, 0).character, 'a');
    }

    #[test]
    fn invisible_top_passes_source_through() {
        let mut top = Image::filled(1, 1, Pixel::from_char('#'));
        top.props_mut().set_visible(false);
        let mut overlay = Overlay::new(backdrop(), top);
        let source: *const _ = overlay.source().grid();
        assert!(std::ptr::eq(overlay.render().grid().unwrap(), source));
    }

    #[test]
    fn right_bottom_anchor_places_top_in_corner() {
        let mut top = Image::filled(1, 1, Pixel::from_char('#'));
        top.props_mut().set_anchor(Anchor::RIGHT | Anchor::BOTTOM);
        let overlay = Overlay::new(backdrop(), top);
        assert_eq!(overlay.top_position(), Vec2::new(2, 2));
    }

    #[test]
    fn generation_follows_both_children() {
        let mut overlay = Overlay::new(backdrop(), Image::filled(1, 1, Pixel::from_char('#')));
        let start = overlay.generation();
        overlay.top_mut().props_mut().set_offset(Vec2::new(1, 1));
        let moved = overlay.generation();
        assert!(moved > start);
        overlay.source_mut().set_pixel(0, 0, Pixel::from_char('b'));
        assert!(overlay.generation() > moved);
    }
}
