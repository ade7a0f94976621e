use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::Mutex;

use crate::bus::{Bus, DomEvent};

/// Arena index of a node. Stable for the lifetime of the document, even
/// after the node is unlinked from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Document shared between the observer loop and activation timers.
pub type SharedDocument = Arc<Mutex<Document>>;

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attributes: HashMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    bus: Bus,
}

impl Document {
    /// Document with the usual `html > head + body` shell.
    pub fn new() -> Self {
        let mut doc = Self::empty();
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.append_child(doc.root, head);
        doc.append_child(doc.root, body);
        doc
    }

    /// Bare `html` root with neither head nor body. Hosts that render
    /// partial shells append what they have.
    pub fn empty() -> Self {
        let mut nodes = Vec::new();
        nodes.push(Node::new("html"));
        Self {
            nodes,
            root: NodeId(0),
            bus: Bus::new(64),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> Option<NodeId> {
        self.child_with_tag(self.root, "head")
    }

    pub fn body(&self) -> Option<NodeId> {
        self.child_with_tag(self.root, "body")
    }

    fn child_with_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].tag == tag)
    }

    /// Subscribe to childList mutation notifications.
    pub fn changes(&self) -> broadcast::Receiver<DomEvent> {
        self.bus.subscribe()
    }

    /// Create a detached element. Does not notify; nothing changed in the
    /// live tree yet.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn set_id(&mut self, node: NodeId, value: &str) {
        self.nodes[node.0].id = Some(value.to_string());
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].id.as_deref()
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attributes.get(name).map(String::as_str)
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = Some(text.to_string());
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].text.as_deref()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Append `child` as the last child of `parent`, unlinking it from any
    /// previous parent. Publishes `SubtreeChanged`. Appends that would form
    /// a cycle are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.is_ancestor(child, parent) {
            tracing::warn!("ignoring append that would create a cycle");
            return;
        }
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.bus.publish(DomEvent::SubtreeChanged);
    }

    /// Unlink `node` (and implicitly its subtree) from its parent. The arena
    /// slot survives; only tree membership changes. Publishes
    /// `SubtreeChanged`. Removing the root or an already-detached node is a
    /// no-op.
    pub fn remove(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0].parent else {
            return;
        };
        self.nodes[parent.0].children.retain(|c| *c != node);
        self.nodes[node.0].parent = None;
        self.bus.publish(DomEvent::SubtreeChanged);
    }

    fn is_ancestor(&self, maybe_ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes[node.0].parent;
        while let Some(p) = current {
            if p == maybe_ancestor {
                return true;
            }
            current = self.nodes[p.0].parent;
        }
        false
    }

    /// Preorder walk of the subtree below `node`, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[node.0].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// All attached elements whose id starts with `prefix`, in document
    /// order. The coarse candidate set; callers apply their own strict
    /// filter on top.
    pub fn elements_with_id_prefix(&self, prefix: &str) -> Vec<NodeId> {
        let mut out = vec![self.root];
        out.extend(self.descendants(self.root));
        out.retain(|node| {
            self.nodes[node.0]
                .id
                .as_deref()
                .is_some_and(|id| id.starts_with(prefix))
        });
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_has_head_and_body() {
        let doc = Document::new();
        assert!(doc.head().is_some());
        assert!(doc.body().is_some());
    }

    #[test]
    fn empty_document_has_neither() {
        let doc = Document::empty();
        assert!(doc.head().is_none());
        assert!(doc.body().is_none());
    }

    #[tokio::test]
    async fn append_publishes_subtree_changed() {
        let mut doc = Document::new();
        let mut rx = doc.changes();
        let div = doc.create_element("div");
        let body = doc.body().expect("body");
        doc.append_child(body, div);
        assert_eq!(rx.recv().await.expect("recv"), DomEvent::SubtreeChanged);
    }

    #[tokio::test]
    async fn attribute_edits_do_not_publish() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let body = doc.body().expect("body");
        doc.append_child(body, div);

        let mut rx = doc.changes();
        doc.set_id(div, "atom1");
        doc.add_class(div, "highlight");
        doc.set_attribute(div, "title", "x");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn remove_unlinks_subtree_from_queries() {
        let mut doc = Document::new();
        let body = doc.body().expect("body");
        let div = doc.create_element("div");
        doc.set_id(div, "atom7");
        doc.append_child(body, div);
        assert_eq!(doc.elements_with_id_prefix("atom"), vec![div]);

        doc.remove(div);
        assert!(doc.elements_with_id_prefix("atom").is_empty());
        // The arena slot survives removal.
        assert_eq!(doc.id(div), Some("atom7"));
    }

    #[test]
    fn id_prefix_query_is_in_document_order() {
        let mut doc = Document::new();
        let body = doc.body().expect("body");
        let first = doc.create_element("div");
        doc.set_id(first, "atom2");
        let second = doc.create_element("div");
        doc.set_id(second, "atom1");
        doc.append_child(body, first);
        doc.append_child(body, second);

        assert_eq!(doc.elements_with_id_prefix("atom"), vec![first, second]);
    }

    #[test]
    fn cyclic_append_is_ignored() {
        let mut doc = Document::new();
        let body = doc.body().expect("body");
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(body, outer);
        doc.append_child(outer, inner);

        doc.append_child(inner, outer);
        assert_eq!(doc.parent(outer), Some(body));
        assert_eq!(doc.parent(inner), Some(outer));
    }

    #[test]
    fn class_add_is_deduplicated() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.add_class(div, "copied");
        doc.add_class(div, "copied");
        doc.remove_class(div, "copied");
        assert!(!doc.has_class(div, "copied"));
    }
}
