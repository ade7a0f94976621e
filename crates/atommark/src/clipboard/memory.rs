use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::Clipboard;
use crate::error::{AnnotateError, AnnotateResult};

/// In-process clipboard that records every write. Can be armed to reject,
/// standing in for an insecure context or a denied permission.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
    rejecting: AtomicBool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        let clipboard = Self::default();
        clipboard.set_rejecting(true);
        clipboard
    }

    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    /// Everything written so far, oldest first.
    pub fn wrote(&self) -> Vec<String> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.wrote().pop()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, value: &str) -> AnnotateResult<()> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(AnnotateError::Clipboard("write rejected".to_string()));
        }
        self.writes
            .lock()
            .map_err(|_| AnnotateError::Internal("clipboard log poisoned".to_string()))?
            .push(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_writes_in_order() {
        let clipboard = MemoryClipboard::new();
        clipboard.write_text("1").await.expect("first");
        clipboard.write_text("2").await.expect("second");
        assert_eq!(clipboard.wrote(), vec!["1".to_string(), "2".to_string()]);
        assert_eq!(clipboard.last(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn rejecting_mode_returns_clipboard_error() {
        let clipboard = MemoryClipboard::rejecting();
        let error = clipboard.write_text("x").await.expect_err("must reject");
        assert!(matches!(error, AnnotateError::Clipboard(_)));
        assert!(clipboard.wrote().is_empty());
    }
}
