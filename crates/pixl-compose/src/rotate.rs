#![forbid(unsafe_code)]

//! Quarter-turn rotation of renderables.
//!
//! Wide rotators treat each pair of cells as one logical pixel, so sprites
//! drawn two columns per pixel keep their aspect ratio when turned.

use pixl_core::{Rotation, Vec2};
use pixl_render::cell::Pixel;
use pixl_render::view::View;

use crate::renderable::{Generation, Props, Renderable};
use crate::view::PixelView;

/// Logical size of a source `size` wide in cells.
#[inline]
fn logical_size(size: Vec2, cell_width: i32) -> Vec2 {
    Vec2::new(size.x / cell_width, size.y)
}

/// Output size of rotating a source of `size` cells.
fn rotated_size(size: Vec2, rotation: Rotation, cell_width: i32) -> Vec2 {
    let logical = rotation.rotate_size(logical_size(size, cell_width));
    Vec2::new(logical.x * cell_width, logical.y)
}

/// A view of `source` turned by `rotation`.
#[derive(Debug)]
pub struct RotatedView<'a> {
    source: Box<PixelView<'a>>,
    rotation: Rotation,
    cell_width: i32,
    /// Logical size of the rotated output.
    logical: Vec2,
}

impl<'a> RotatedView<'a> {
    /// # Panics
    ///
    /// Panics if `cell_width < 1`.
    pub fn new(source: PixelView<'a>, rotation: Rotation, cell_width: i32) -> Self {
        assert!(cell_width >= 1, "cell width must be >= 1, got {cell_width}");
        let logical = rotation.rotate_size(logical_size(source.size(), cell_width));
        Self {
            source: Box::new(source),
            rotation,
            cell_width,
            logical,
        }
    }
}

impl View<Pixel> for RotatedView<'_> {
    #[inline]
    fn size(&self) -> Vec2 {
        Vec2::new(self.logical.x * self.cell_width, self.logical.y)
    }

    fn get(&self, x: i32, y: i32) -> Pixel {
        let half = x % self.cell_width;
        let q = Vec2::new(x / self.cell_width, y);
        let p = self.rotation.inverse().apply(q, self.logical);
        self.source.get(p.x * self.cell_width + half, p.y)
    }
}

/// Decorator rotating a source by quarter turns.
#[derive(Debug)]
pub struct Rotator<R> {
    source: R,
    rotation: Rotation,
    cell_width: i32,
    props: Props,
}

impl<R: Renderable> Rotator<R> {
    /// Rotate a source with one cell per pixel.
    pub fn new(source: R, rotation: Rotation) -> Self {
        Self {
            source,
            rotation,
            cell_width: 1,
            props: Props::new(),
        }
    }

    /// Rotate a source with two cells per pixel.
    ///
    /// # Panics
    ///
    /// Panics if the source width is odd.
    pub fn wide(source: R, rotation: Rotation) -> Self {
        assert!(
            source.width() % 2 == 0,
            "wide rotation needs an even source width, got {}",
            source.width()
        );
        Self {
            source,
            rotation,
            cell_width: 2,
            props: Props::new(),
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation) -> bool {
        self.props.observe(&mut self.rotation, rotation)
    }

    /// Turn a further quarter clockwise.
    pub fn rotate_clockwise(&mut self) {
        let next = self.rotation.then(Rotation::Deg90);
        self.set_rotation(next);
    }

    pub fn is_wide(&self) -> bool {
        self.cell_width == 2
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

impl<R: Renderable> Renderable for Rotator<R> {
    fn size(&self) -> Vec2 {
        rotated_size(self.source.size(), self.rotation, self.cell_width)
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
        if self.is_wide() {
            assert!(
                self.source.width() % 2 == 0,
                "wide rotation needs an even source width, got {}",
                self.source.width()
            );
        }
        let (rotation, cell_width) = (self.rotation, self.cell_width);
        let source = self.source.render();
        if rotation == Rotation::Deg0 {
            return source;
        }
        PixelView::Rotated(RotatedView::new(source, rotation, cell_width))
    }
}

#[cfg(test)]
mod tests {
    use pixl_render::cell::Color;
    use pixl_render::grid::Grid;

    use super::*;
    use crate::image::Image;

    fn rows(view: &PixelView<'_>) -> Vec<String> {
        (0..view.height())
            .map(|y| (0..view.width()).map(|x| view.get(x, y).character).collect())
            .collect()
    }

    fn text(s: &str) -> Image {
        Image::from_text(s, Color::White, Color::Black)
    }

    #[test]
    fn quarter_turn_matches_grid_rotation() {
        let image = text("abc\ndef");
        let expected = image.grid().rotated(Rotation::Deg90);
        let mut rotator = Rotator::new(image, Rotation::Deg90);
        assert_eq!(rotator.size(), Vec2::new(2, 3));
        assert_eq!(rotator.render().bake(), expected);
    }

    #[test]
    fn every_rotation_matches_grid_rotation() {
        for turns in 0..4 {
            let rotation = Rotation::from_quarter_turns(turns);
            let image = text("abcd\nefgh\nijkl");
            let expected = image.grid().rotated(rotation);
            let mut rotator = Rotator::new(image, rotation);
            assert_eq!(rotator.render().bake(), expected, "{rotation:?}");
        }
    }

    #[test]
    fn wide_rotation_keeps_cell_pairs_together() {
        // Logical 2x2 image: AB / CD, two cells per pixel.
        let mut rotator = Rotator::wide(text("AaBb\nCcDd"), Rotation::Deg90);
        assert_eq!(rotator.size(), Vec2::new(4, 2));
        assert_eq!(rows(&rotator.render()), vec!["CcAa", "DdBb"]);

        rotator.set_rotation(Rotation::Deg180);
        assert_eq!(rows(&rotator.render()), vec!["DdCc", "BbAa"]);
    }

    #[test]
    fn wide_rotation_swaps_logical_axes() {
        let mut rotator = Rotator::wide(text("AaBbCc"), Rotation::Deg270);
        assert_eq!(rotator.size(), Vec2::new(2, 3));
        assert_eq!(rows(&rotator.render()), vec!["Cc", "Bb", "Aa"]);
    }

    #[test]
    #[should_panic(expected = "even source width")]
    fn wide_rotation_of_odd_width_panics() {
        let _ = Rotator::wide(text("abc"), Rotation::Deg90);
    }

    #[test]
    #[should_panic(expected = "even source width")]
    fn wide_rotation_of_a_source_resized_to_odd_width_panics() {
        let mut rotator = Rotator::wide(text("AaBb"), Rotation::Deg90);
        rotator.source_mut().resize(3, 1);
        let _ = rotator.render();
    }

    #[test]
    fn no_rotation_passes_through() {
        let mut rotator = Rotator::new(text("ab"), Rotation::Deg0);
        let source: *const Grid<Pixel> = rotator.source().grid();
        assert!(std::ptr::eq(rotator.render().grid().unwrap(), source));
    }

    #[test]
    fn rotate_clockwise_cycles_and_stamps() {
        let mut rotator = Rotator::new(text("ab"), Rotation::Deg0);
        let start = rotator.generation();
        rotator.rotate_clockwise();
        assert_eq!(rotator.rotation(), Rotation::Deg90);
        assert!(rotator.generation() > start);
        for _ in 0..3 {
            rotator.rotate_clockwise();
        }
        assert_eq!(rotator.rotation(), Rotation::Deg0);
    }
}
