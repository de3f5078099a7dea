//! Clipboard export.
//!
//! The system clipboard is an external collaborator behind `ClipboardSink`.
//! `SystemClipboard` opens an arboard handle per write on the blocking pool
//! so the UI loop never stalls; `MemoryClipboard` keeps the text in-process
//! (headless sessions, tests).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write rejected: {0}")]
    Rejected(String),

    #[error("clipboard task failed: {0}")]
    Task(String),
}

pub type ClipboardResult<T> = Result<T, ClipboardError>;

/// Somewhere the CSS text can be copied to.
#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn write_text(&self, text: String) -> ClipboardResult<()>;
}

/// The platform clipboard via arboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[async_trait]
impl ClipboardSink for SystemClipboard {
    async fn write_text(&self, text: String) -> ClipboardResult<()> {
        tokio::task::spawn_blocking(move || {
            let mut cb = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            cb.set_text(text)
                .map_err(|e| ClipboardError::Rejected(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Task(e.to_string()))?
    }
}

/// In-process clipboard. Clones share the same contents.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

#[async_trait]
impl ClipboardSink for MemoryClipboard {
    async fn write_text(&self, text: String) -> ClipboardResult<()> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|e| ClipboardError::Rejected(e.to_string()))?;
        *guard = Some(text);
        Ok(())
    }
}
