//! gradientcraft: CSS gradient generator for the terminal.
//!
//! Pick colors, a type and an angle; see a live preview and the CSS
//! declaration; copy it to the clipboard.

pub mod clipboard;
pub mod config;
pub mod gradient;
pub mod tui;
