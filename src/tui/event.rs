//! Messages that drive the update loop.
//!
//! Keyboard input, ticks and the completions of deferred work (clipboard
//! writes, label-reset timers) all arrive as `AppMessage`s and are applied
//! to the model in order on the single UI loop.

use crossterm::event::KeyEvent;

use crate::clipboard::ClipboardError;

/// Messages that drive the TUI update loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// Periodic tick (expires transient status text).
    Tick,
    /// A clipboard write finished.
    CopyFinished(Result<(), ClipboardError>),
    /// Restore the copy label. Carries the label generation it was scheduled for.
    ResetCopyLabel(u64),
    /// Quit the TUI.
    Quit,
}
