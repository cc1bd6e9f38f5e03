#![forbid(unsafe_code)]

//! Pixel model, grids, views, and terminal presentation.
//!
//! - [`cell`]: [`Color`](cell::Color) and [`Pixel`](cell::Pixel) with the
//!   top-over-bottom merge.
//! - [`grid`]: the owned 2D [`Grid`](grid::Grid) buffer and its bulk
//!   `map`/`merge_map` operators.
//! - [`view`]: the read-only [`View`](view::View) contract.
//! - [`diff`], [`ansi`], [`presenter`]: the output boundary.

pub mod ansi;
pub mod cell;
pub mod diff;
pub mod grid;
pub mod presenter;
pub mod view;

pub use cell::{Color, ColorError, Pixel};
pub use grid::Grid;
pub use presenter::{FrameSink, HeadlessSink, Presenter, PresenterConfig};
pub use view::{GridView, View};
