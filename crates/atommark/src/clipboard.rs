//! Clipboard collaborators: a primary writer plus a best-effort fallback.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AnnotateResult;

pub mod memory;
pub mod system;

pub use memory::MemoryClipboard;
pub use system::SystemClipboard;

/// A single-attempt clipboard writer.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, value: &str) -> AnnotateResult<()>;
}

pub type SharedClipboard = Arc<dyn Clipboard>;

/// Primary writer with a fallback tried once when the primary rejects.
/// Both failing is terminal; the caller shows no confirmation and moves on.
pub struct ClipboardStack {
    primary: SharedClipboard,
    fallback: SharedClipboard,
}

impl ClipboardStack {
    pub fn new(primary: SharedClipboard, fallback: SharedClipboard) -> Self {
        Self { primary, fallback }
    }

    pub async fn write_text(&self, value: &str) -> AnnotateResult<()> {
        match self.primary.write_text(value).await {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::debug!("primary clipboard write rejected: {error}");
                self.fallback.write_text(value).await
            }
        }
    }
}
