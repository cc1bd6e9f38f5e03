#![forbid(unsafe_code)]

//! The render contract and change tracking.
//!
//! Every visual source implements [`Renderable`]: a size, placement data in
//! [`Props`], and a `render` that produces a [`PixelView`].
//!
//! # Change tracking
//!
//! Instead of dirty flags with subscriptions, every change takes a fresh
//! [`Generation`] from a process-wide monotonic counter. A source's
//! [`generation`](Renderable::generation) is the newest stamp of itself and
//! everything it wraps, so a cache only needs to remember the generation it
//! was built for:
//!
//! ```
//! use pixl_compose::renderable::Props;
//!
//! let mut props = Props::new();
//! let before = props.generation();
//! assert!(!props.set_layer(0)); // unchanged, no new stamp
//! assert_eq!(props.generation(), before);
//! assert!(props.set_layer(3));
//! assert!(props.generation() > before);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use pixl_core::{Anchor, Vec2};

use crate::view::PixelView;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// A point in the global change order.
///
/// Later changes always compare greater than earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Older than every stamp handed out.
    pub const NEVER: Self = Self(0);

    /// Take a fresh stamp.
    pub fn next() -> Self {
        Self(NEXT_GENERATION.fetch_add(1, Ordering::Relaxed))
    }
}

/// Placement data shared by every renderable.
#[derive(Debug, Clone)]
pub struct Props {
    visible: bool,
    offset: Vec2,
    layer: i32,
    anchor: Anchor,
    generation: Generation,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            visible: true,
            offset: Vec2::ZERO,
            layer: 0,
            anchor: Anchor::NONE,
            generation: Generation::next(),
        }
    }
}

impl Props {
    /// Visible, at the origin, layer 0, no anchor.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.set_visible(visible);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.set_offset(offset);
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.set_layer(layer);
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.set_anchor(anchor);
        self
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    #[inline]
    pub fn layer(&self) -> i32 {
        self.layer
    }

    #[inline]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Stamp of the latest change recorded here.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns true if the value changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        self.touch();
        true
    }

    pub fn set_offset(&mut self, offset: Vec2) -> bool {
        if self.offset == offset {
            return false;
        }
        self.offset = offset;
        self.touch();
        true
    }

    pub fn set_layer(&mut self, layer: i32) -> bool {
        if self.layer == layer {
            return false;
        }
        self.layer = layer;
        self.touch();
        true
    }

    pub fn set_anchor(&mut self, anchor: Anchor) -> bool {
        if self.anchor == anchor {
            return false;
        }
        self.anchor = anchor;
        self.touch();
        true
    }

    /// Store `value` in `slot`, taking a new stamp only if it differs.
    ///
    /// Owners use this for their own state so one stamp covers everything:
    ///
    /// ```
    /// use pixl_compose::renderable::Props;
    ///
    /// let mut props = Props::new();
    /// let mut ratio = 0.5;
    /// assert!(!props.observe(&mut ratio, 0.5));
    /// assert!(props.observe(&mut ratio, 0.75));
    /// assert_eq!(ratio, 0.75);
    /// ```
    pub fn observe<T: PartialEq>(&mut self, slot: &mut T, value: T) -> bool {
        if *slot == value {
            return false;
        }
        *slot = value;
        self.touch();
        true
    }

    /// Record a change that no setter saw (e.g. direct pixel edits).
    pub fn touch(&mut self) {
        self.generation = Generation::next();
    }
}

/// A visual source the compositor can place and draw.
///
/// `render` may rebuild a cache; between two calls with no change in
/// [`generation`](Self::generation) it must return the same content.
pub trait Renderable {
    /// Width and height in cells.
    fn size(&self) -> Vec2;

    fn props(&self) -> &Props;

    fn props_mut(&mut self) -> &mut Props;

    /// Produce the current pixels.
    fn render(&mut self) -> PixelView<'_>;

    #[inline]
    fn width(&self) -> i32 {
        self.size().x
    }

    #[inline]
    fn height(&self) -> i32 {
        self.size().y
    }

    #[inline]
    fn visible(&self) -> bool {
        self.props().visible()
    }

    /// Additive placement nudge.
    #[inline]
    fn offset(&self) -> Vec2 {
        self.props().offset()
    }

    /// Draw order; lower layers are drawn first.
    #[inline]
    fn layer(&self) -> i32 {
        self.props().layer()
    }

    #[inline]
    fn anchor(&self) -> Anchor {
        self.props().anchor()
    }

    /// Newest change stamp of this source and everything it wraps.
    #[inline]
    fn generation(&self) -> Generation {
        self.props().generation()
    }
}

impl<R: Renderable + ?Sized> Renderable for Box<R> {
    fn size(&self) -> Vec2 {
        (**self).size()
    }

    fn props(&self) -> &Props {
        (**self).props()
    }

    fn props_mut(&mut self) -> &mut Props {
        (**self).props_mut()
    }

    fn render(&mut self) -> PixelView<'_> {
        (**self).render()
    }

    fn generation(&self) -> Generation {
        (**self).generation()
    }
}
