//! Minimal mutable element tree standing in for the host page's document.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Structural
//! mutations (child insertion and removal) publish a payload-free
//! [`crate::bus::DomEvent::SubtreeChanged`] on the document's change bus;
//! attribute and class edits do not, mirroring a childList-only observer.

pub mod document;
pub mod event;

pub use document::{Document, NodeId, SharedDocument};
pub use event::ClickEvent;
