#![forbid(unsafe_code)]

//! Core: integer geometry, anchor arithmetic, and logging.

pub mod anchor;
pub mod geometry;
pub mod logging;

pub use anchor::Anchor;
pub use geometry::{Flip, Rect, RectPoints, Rotation, Vec2};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
