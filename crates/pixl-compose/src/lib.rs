#![forbid(unsafe_code)]

//! Renderables and the compositors that stack them.
//!
//! Everything drawable implements [`Renderable`]: a size, placement
//! [`Props`], and a `render` that returns a [`PixelView`]. Decorators
//! ([`Filter`], [`Overlay`], [`Rotator`], [`Stretch`]) wrap another
//! renderable and transform its pixels lazily. [`Viewport`] composes its
//! sources into an owned buffer and recomposes only when a generation moves;
//! [`VirtualViewport`] resolves the same stack cell by cell. [`Channels`]
//! assembles a world of scene objects through per-channel cameras.

pub mod channel;
pub mod filter;
pub mod image;
pub mod overlay;
pub mod plane;
pub mod progress;
pub mod renderable;
pub mod rotate;
pub mod stretch;
pub mod view;
pub mod viewport;
pub mod virtual_viewport;

pub use channel::{Assembly, Camera, Channel, ChannelId, Channels, FixedCamera, SceneObject};
pub use filter::{Filter, FilteredView, PixelFilter};
pub use image::Image;
pub use overlay::{Overlay, OverlayView};
pub use plane::{Plane, TiledView};
pub use progress::ProgressBar;
pub use renderable::{Generation, Props, Renderable};
pub use rotate::{RotatedView, Rotator};
pub use stretch::{Stretch, StretchPolicy};
pub use view::PixelView;
pub use viewport::{ComposeStats, Viewport, placement};
pub use virtual_viewport::{CompositeView, VirtualViewport};
