//! Terminal front end: ratatui presentation layer.
//!
//! ## Architecture (TEA)
//!
//! Model (`GradientApp`) + Update (message handler) + View (render).
//! Immediate mode: every frame is drawn from `GradientState`, so the CSS
//! text, preview and angle label are always derived, never cached. The
//! per-stop controls are the one retained piece, reconciled by `stops`.

pub mod app;
pub mod event;
pub mod input;
pub mod layout;
pub mod preview;
pub mod runner;
pub mod stops;
