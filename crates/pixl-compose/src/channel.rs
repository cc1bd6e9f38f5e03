#![forbid(unsafe_code)]

//! Camera-relative render channels.
//!
//! A scene hands the compositor a flat list of active objects each frame.
//! Some are drawable, some are cameras; each camera looks at the world
//! through one output [`Channel`]. [`Channels::assemble`] builds every
//! channel that has a camera:
//!
//! 1. The first camera seen for a channel wins; later ones are ignored.
//! 2. Every visible drawable is rendered once and placed in world space at
//!    `offset + anchor.apply(-size)`.
//! 3. Each channel with a camera is cleared, and every drawable overlapping
//!    the camera's rectangle is merged in, by layer, relative to the camera.
//!
//! Channels without a camera this frame keep their previous contents.

use std::collections::BTreeMap;
use std::fmt;

use pixl_core::{Rect, Vec2};
use pixl_render::cell::Pixel;
use pixl_render::grid::Grid;
use pixl_render::view::{GridView, View};

use crate::renderable::Renderable;
use crate::view::PixelView;

/// Identifies an output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChannelId(pub u32);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel {}", self.0)
    }
}

/// A viewpoint into the world.
pub trait Camera {
    /// The channel this camera draws into.
    fn channel(&self) -> ChannelId;

    /// World position of the channel's top-left cell.
    fn position(&self) -> Vec2;
}

/// An active object in the frame's scene list.
///
/// Objects may be drawable, a camera, both, or neither.
pub trait SceneObject {
    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        None
    }

    fn as_camera(&self) -> Option<&dyn Camera> {
        None
    }
}

impl<T: SceneObject + ?Sized> SceneObject for Box<T> {
    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        (**self).as_renderable()
    }

    fn as_camera(&self) -> Option<&dyn Camera> {
        (**self).as_camera()
    }
}

impl<T: SceneObject + ?Sized> SceneObject for &mut T {
    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        (**self).as_renderable()
    }

    fn as_camera(&self) -> Option<&dyn Camera> {
        (**self).as_camera()
    }
}

/// A camera at a fixed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCamera {
    pub channel: ChannelId,
    pub position: Vec2,
}

impl FixedCamera {
    pub const fn new(channel: ChannelId, position: Vec2) -> Self {
        Self { channel, position }
    }
}

impl Camera for FixedCamera {
    fn channel(&self) -> ChannelId {
        self.channel
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}

impl SceneObject for FixedCamera {
    fn as_camera(&self) -> Option<&dyn Camera> {
        Some(self)
    }
}

/// One output buffer.
#[derive(Debug, Clone)]
pub struct Channel {
    buffer: Grid<Pixel>,
    base: Pixel,
}

impl Channel {
    /// A channel filled with a transparent base.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            buffer: Grid::new(width, height),
            base: Pixel::TRANSPARENT,
        }
    }

    /// Set the base pixel and clear to it.
    #[must_use]
    pub fn with_base(mut self, base: Pixel) -> Self {
        self.base = base;
        self.clear();
        self
    }

    pub fn base(&self) -> Pixel {
        self.base
    }

    /// Takes effect at the next clear.
    pub fn set_base(&mut self, base: Pixel) {
        self.base = base;
    }

    pub fn size(&self) -> Vec2 {
        self.buffer.size()
    }

    /// Resize, keeping content. Returns false if the size is unchanged.
    pub fn set_size(&mut self, size: Vec2) -> bool {
        if self.buffer.size() == size {
            return false;
        }
        self.buffer.resize(size.x, size.y);
        true
    }

    /// Fill with the base pixel.
    pub fn clear(&mut self) {
        self.buffer.fill(self.base);
    }

    pub fn buffer(&self) -> &Grid<Pixel> {
        &self.buffer
    }

    pub fn view(&self) -> GridView<'_, Pixel> {
        self.buffer.as_view()
    }

    fn merge<V: View<Pixel> + ?Sized>(&mut self, view: &V, position: Vec2) {
        let area = Rect::sized(position, view.size());
        self.buffer.merge_map(view, position, area);
    }
}

/// Outcome of one [`Channels::assemble`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Channels that had a camera and were rebuilt, ascending.
    pub channels: Vec<ChannelId>,
    /// Visible drawables rendered this frame.
    pub items: usize,
    /// Drawable-into-channel merges performed.
    pub drawn: usize,
}

struct Item<'a> {
    layer: i32,
    world: Rect,
    view: PixelView<'a>,
}

/// The set of output channels.
#[derive(Debug, Clone, Default)]
pub struct Channels {
    channels: BTreeMap<ChannelId, Channel>,
}

impl Channels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a channel.
    pub fn insert(&mut self, id: ChannelId, channel: Channel) -> Option<Channel> {
        self.channels.insert(id, channel)
    }

    pub fn remove(&mut self, id: ChannelId) -> Option<Channel> {
        self.channels.remove(&id)
    }

    pub fn get(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    pub fn get_mut(&mut self, id: ChannelId) -> Option<&mut Channel> {
        self.channels.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, &Channel)> + '_ {
        self.channels.iter().map(|(id, channel)| (*id, channel))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Rebuild every channel that has a camera among `objects`.
    pub fn assemble<O: SceneObject>(&mut self, objects: &mut [O]) -> Assembly {
        let _span = pixl_core::debug_span!("assemble_channels", objects = objects.len()).entered();

        let mut cameras: BTreeMap<ChannelId, Vec2> = BTreeMap::new();
        for object in objects.iter() {
            let Some(camera) = object.as_camera() else {
                continue;
            };
            let channel = camera.channel();
            if cameras.contains_key(&channel) {
                pixl_core::trace!(%channel, "ignoring additional camera");
                continue;
            }
            cameras.insert(channel, camera.position());
        }

        let mut items: Vec<Item<'_>> = Vec::new();
        for object in objects.iter_mut() {
            let Some(renderable) = object.as_renderable() else {
                continue;
            };
            if !renderable.visible() {
                continue;
            }
            let size = renderable.size();
            let start = renderable.offset() + renderable.anchor().apply(-size);
            let layer = renderable.layer();
            items.push(Item {
                layer,
                world: Rect::sized(start, size),
                view: renderable.render(),
            });
        }
        items.sort_by_key(|item| item.layer);

        let mut assembly = Assembly {
            items: items.len(),
            ..Assembly::default()
        };
        for (id, position) in cameras {
            let Some(channel) = self.channels.get_mut(&id) else {
                pixl_core::trace!(channel = %id, "camera targets an unknown channel");
                continue;
            };
            channel.clear();
            let seen = Rect::sized(position, channel.size());
            for item in items.iter().filter(|item| item.world.overlaps(&seen)) {
                channel.merge(&item.view, item.world.start() - position);
                assembly.drawn += 1;
            }
            assembly.channels.push(id);
        }

        pixl_core::debug!(
            channels = assembly.channels.len(),
            items = assembly.items,
            drawn = assembly.drawn,
            "channels assembled"
        );
        assembly
    }
}
