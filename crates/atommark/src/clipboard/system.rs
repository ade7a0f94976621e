use async_trait::async_trait;

use super::Clipboard;
use crate::error::{AnnotateError, AnnotateResult};

/// System clipboard adapter backed by `arboard`. A fresh handle is opened
/// per write; arboard handles are not reliably reusable across writes on
/// every platform.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, value: &str) -> AnnotateResult<()> {
        let value = value.to_string();
        // arboard is blocking; keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|error| AnnotateError::Clipboard(error.to_string()))?;
            clipboard
                .set_text(value)
                .map_err(|error| AnnotateError::Clipboard(error.to_string()))
        })
        .await
        .map_err(|error| AnnotateError::Internal(format!("clipboard task failed: {error}")))?
    }
}
