#![forbid(unsafe_code)]

//! pixl public facade crate.
//!
//! Re-exports the common types of the pixl crates and offers a prelude for
//! day-to-day use: build renderables, stack them in a viewport, and hand the
//! result to a [`FrameSink`].
//!
//! ```
//! use pixl::prelude::*;
//!
//! let mut viewport: Viewport = Viewport::new(8, 1);
//! viewport.push(Box::new(Image::from_text("hi", Color::White, Color::Black)));
//!
//! let mut sink = HeadlessSink::new();
//! sink.present(&viewport.render())?;
//! assert_eq!(sink.lines(), vec!["hi      ".to_owned()]);
//! # Ok::<(), pixl::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use pixl_core::{Anchor, Flip, Rect, Rotation, Vec2};

#[cfg(feature = "tracing-json")]
pub use pixl_core::logging::{LogConfig, LogInitError};

// --- Render re-exports -----------------------------------------------------

pub use pixl_render::diff::{ChangeRun, FrameDiff};
pub use pixl_render::{
    Color, ColorError, FrameSink, Grid, GridView, HeadlessSink, Pixel, Presenter,
    PresenterConfig, View,
};

// --- Compose re-exports ----------------------------------------------------

pub use pixl_compose::{
    Assembly, Camera, Channel, ChannelId, Channels, Filter, FixedCamera, Generation, Image,
    Overlay, PixelFilter, PixelView, Plane, ProgressBar, Props, Renderable, Rotator,
    SceneObject, Stretch, StretchPolicy, Viewport, VirtualViewport,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for pixl applications.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while presenting a frame.
    Io(std::io::Error),
    /// A color index or name did not resolve.
    Color(ColorError),
    /// The log subscriber could not be installed.
    #[cfg(feature = "tracing-json")]
    Log(LogInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Color(err) => write!(f, "{err}"),
            #[cfg(feature = "tracing-json")]
            Self::Log(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Color(err) => Some(err),
            #[cfg(feature = "tracing-json")]
            Self::Log(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ColorError> for Error {
    fn from(err: ColorError) -> Self {
        Self::Color(err)
    }
}

#[cfg(feature = "tracing-json")]
impl From<LogInitError> for Error {
    fn from(err: LogInitError) -> Self {
        Self::Log(err)
    }
}

/// Standard result type for pixl APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Install the global log subscriber from `PIXL_LOG` / `PIXL_LOG_FORMAT`.
#[cfg(feature = "tracing-json")]
pub fn init_logging() -> Result<()> {
    pixl_core::logging::init(&LogConfig::from_env())?;
    Ok(())
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Anchor, Channel, ChannelId, Channels, Color, Error, FrameSink, Grid, HeadlessSink, Image,
        Pixel, Presenter, PresenterConfig, Rect, Renderable, Result, SceneObject, Vec2, View,
        Viewport, VirtualViewport,
    };

    pub use crate::{compose, core, render};
}

pub use pixl_compose as compose;
pub use pixl_core as core;
pub use pixl_render as render;
