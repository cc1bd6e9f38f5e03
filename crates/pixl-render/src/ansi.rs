#![forbid(unsafe_code)]

//! The escape sequences the [`Presenter`] writes.
//!
//! [`Presenter`]: crate::presenter::Presenter

use std::io::{self, Write};

use crate::cell::Color;

pub const RESET: &[u8] = b"\x1b[0m";
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";
/// DEC mode 2026: the terminal holds output until the matching end.
pub const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";
pub const SYNC_END: &[u8] = b"\x1b[?2026l";

/// Reset attributes, then select `foreground` and `background`.
///
/// Transparent colors are left at the terminal default, so a pixel with
/// both colors transparent writes a bare reset.
pub fn colors<W: Write>(w: &mut W, foreground: Color, background: Color) -> io::Result<()> {
    w.write_all(b"\x1b[0")?;
    if let Some(index) = foreground.ansi_index() {
        let code = if index < 8 { 30 + index } else { 82 + index };
        write!(w, ";{code}")?;
    }
    if let Some(index) = background.ansi_index() {
        let code = if index < 8 { 40 + index } else { 92 + index };
        write!(w, ";{code}")?;
    }
    w.write_all(b"m")
}

/// Move the cursor to 0-indexed `(row, col)`.
pub fn move_to<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(row) + 1, u32::from(col) + 1)
}
