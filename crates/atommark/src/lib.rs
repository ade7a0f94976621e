//! atommark augments a form page's element tree with small copy-ID controls
//! next to every `atomN` field, driven by the tree's own mutation stream.

pub mod activation;
pub mod annotator;
pub mod bus;
pub mod clipboard;
pub mod dom;
pub mod error;
pub mod observer;
pub mod style;

pub use crate::annotator::{Annotator, SharedAnnotator};
pub use crate::bus::{Bus, DomEvent};
pub use crate::clipboard::{Clipboard, ClipboardStack, MemoryClipboard, SystemClipboard};
pub use crate::dom::{ClickEvent, Document, NodeId, SharedDocument};
pub use crate::error::{AnnotateError, AnnotateResult};
