#![forbid(unsafe_code)]

//! Progress bar widget.

use pixl_core::{Anchor, Rect, Vec2};
use pixl_render::cell::{Color, Pixel};
use pixl_render::grid::Grid;

use crate::renderable::{Generation, Props, Renderable};
use crate::view::PixelView;

/// A horizontal bar filled from the left, with an optional centered label.
///
/// The pixels are cached and rebuilt only after a change.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    size: Vec2,
    ratio: f64,
    filled: Pixel,
    empty: Pixel,
    label: Option<String>,
    props: Props,
    buffer: Grid<Pixel>,
    built_for: Generation,
    rebuilds: u64,
}

impl ProgressBar {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ratio: 0.0,
            filled: Pixel::new(' ', Color::Black, Color::Green),
            empty: Pixel::new(' ', Color::White, Color::DarkGray),
            label: None,
            props: Props::new(),
            buffer: Grid::default(),
            built_for: Generation::NEVER,
            rebuilds: 0,
        }
    }

    #[must_use]
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.set_ratio(ratio);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.set_label(Some(label.into()));
        self
    }

    /// Pixels for the filled and unfilled parts.
    #[must_use]
    pub fn with_style(mut self, filled: Pixel, empty: Pixel) -> Self {
        self.set_style(filled, empty);
        self
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Set the progress ratio (clamped to 0.0..=1.0, NaN counts as 0).
    pub fn set_ratio(&mut self, ratio: f64) -> bool {
        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        self.props.observe(&mut self.ratio, ratio)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) -> bool {
        self.props.observe(&mut self.label, label)
    }

    pub fn set_style(&mut self, filled: Pixel, empty: Pixel) -> bool {
        let a = self.props.observe(&mut self.filled, filled);
        let b = self.props.observe(&mut self.empty, empty);
        a || b
    }

    pub fn set_size(&mut self, size: Vec2) -> bool {
        self.props.observe(&mut self.size, size)
    }

    /// Number of times the pixels have been rebuilt.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Columns drawn as filled.
    pub fn filled_columns(&self) -> i32 {
        (self.ratio * f64::from(self.size.x)).round() as i32
    }

    fn rebuild(&mut self) {
        let filled_columns = self.filled_columns();
        self.buffer.clean_resize(self.size.x, self.size.y);
        self.buffer.fill(self.empty);
        self.buffer.fill_area(
            Rect::sized(Vec2::ZERO, Vec2::new(filled_columns, self.size.y)),
            self.filled,
        );

        if let Some(label) = &self.label {
            let glyphs: Vec<char> = label.chars().collect();
            let label_size = Vec2::new(glyphs.len() as i32, 1);
            let position = Anchor::CENTERED.apply(self.size - label_size);
            let text = Grid::from_vec(
                label_size.x,
                1,
                glyphs.into_iter().map(Pixel::from_char).collect(),
            );
            self.buffer
                .merge_map(&text, position, Rect::sized(position, label_size));
        }

        self.rebuilds += 1;
        pixl_core::trace!(rebuilds = self.rebuilds, ratio = self.ratio, "progress bar rebuilt");
    }
}

impl Renderable for ProgressBar {
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
        let generation = self.generation();
        if self.built_for != generation {
            self.rebuild();
            self.built_for = generation;
        }
        PixelView::Grid(self.buffer.as_view())
    }
}
