//! The field annotator: finds `atomN` fields and gives each one a copy
//! control, exactly once per element for its lifetime in the tree.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use regex::Regex;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::clipboard::ClipboardStack;
use crate::dom::{ClickEvent, Document, NodeId, SharedDocument};
use crate::style;

/// Fixed id prefix of candidate fields.
pub const ID_PREFIX: &str = "atom";

/// How long a control stays in the confirmed state after a copy.
pub const CONFIRMED_FOR: Duration = Duration::from_millis(1000);

const CAPTION_CLASS: &str = "field-caption";
const ICON_TAG: &str = "img";
const ICON_CLASS: &str = "icon16";

/// Strict eligibility rule: the prefix followed by one or more digits and
/// nothing else. The capture is the copy payload.
fn atom_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^atom(\d+)$").expect("atom id pattern"))
}

/// Shared handle used by the observer loop and by activation call sites.
pub type SharedAnnotator = Arc<Mutex<Annotator>>;

pub struct Annotator {
    clipboard: ClipboardStack,
    /// Processed-element side table. Never cleared: an element stays
    /// annotated for as long as its node lives, even if the host page rips
    /// the control itself back out.
    markers: HashSet<NodeId>,
    /// Injected control -> copy payload.
    controls: HashMap<NodeId, String>,
    /// Pending confirmation-revert timers, one per control at most.
    timers: HashMap<NodeId, JoinHandle<()>>,
}

impl Annotator {
    pub fn new(clipboard: ClipboardStack) -> Self {
        Self {
            clipboard,
            markers: HashSet::new(),
            controls: HashMap::new(),
            timers: HashMap::new(),
        }
    }

    /// Annotate every matching, unprocessed field currently in the tree.
    ///
    /// Safe to call arbitrarily often: processed elements are skipped via
    /// the marker table, so the rescan queued by our own child insertion
    /// finds nothing left to do. Never fails; structural absences are
    /// silent skips.
    pub fn scan(&mut self, doc: &mut Document) {
        if doc.body().is_none() {
            return;
        }
        for element in doc.elements_with_id_prefix(ID_PREFIX) {
            let payload = {
                let Some(id) = doc.id(element) else {
                    continue;
                };
                let Some(captures) = atom_id_pattern().captures(id) else {
                    continue;
                };
                captures[1].to_string()
            };
            if self.markers.contains(&element) {
                continue;
            }
            // No icon yet means no marker either, so a later scan can still
            // annotate once the icon shows up.
            let Some(icon) = self.find_icon(doc, element) else {
                continue;
            };
            let Some(slot) = doc.parent(icon) else {
                continue;
            };

            // Marker first: appending the control publishes a mutation that
            // queues another scan, which must not process this element again.
            self.markers.insert(element);

            let control = doc.create_element("button");
            doc.add_class(control, style::CONTROL_CLASS);
            doc.set_attribute(control, "title", &format!("Copy ID: {payload}"));
            doc.append_child(slot, control);

            tracing::debug!("annotated field {ID_PREFIX}{payload}");
            self.controls.insert(control, payload);
        }
    }

    /// The first `img.icon16` inside any of the element's `.field-caption`
    /// regions, if one exists.
    fn find_icon(&self, doc: &Document, element: NodeId) -> Option<NodeId> {
        doc.descendants(element)
            .into_iter()
            .filter(|node| doc.has_class(*node, CAPTION_CLASS))
            .find_map(|caption| {
                doc.descendants(caption)
                    .into_iter()
                    .find(|node| doc.tag(*node) == ICON_TAG && doc.has_class(*node, ICON_CLASS))
            })
    }

    /// Handle an activation of `control`: claim the event, copy the payload,
    /// and show the timed confirmation. Returns whether a copy confirmed.
    ///
    /// Nothing here can fail loudly; a copy that both mechanisms reject
    /// simply shows no confirmation.
    pub async fn activate(
        &mut self,
        doc: &SharedDocument,
        control: NodeId,
        event: &mut ClickEvent,
    ) -> bool {
        event.prevent_default();
        event.stop_propagation();

        let Some(payload) = self.controls.get(&control) else {
            return false;
        };
        if let Err(error) = self.clipboard.write_text(payload).await {
            tracing::debug!("copy failed, no confirmation shown: {error}");
            return false;
        }

        // A second activation while confirmed restarts the timer. The abort
        // happens before the class is re-added so an expiring old timer
        // cannot strip the fresh confirmation.
        if let Some(pending) = self.timers.remove(&control) {
            pending.abort();
        }
        doc.lock().await.add_class(control, style::CONFIRMED_CLASS);
        let doc = Arc::clone(doc);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(CONFIRMED_FOR).await;
            doc.lock().await.remove_class(control, style::CONFIRMED_CLASS);
        });
        self.timers.insert(control, handle);
        true
    }

    pub fn is_marked(&self, element: NodeId) -> bool {
        self.markers.contains(&element)
    }

    pub fn payload(&self, control: NodeId) -> Option<&str> {
        self.controls.get(&control).map(String::as_str)
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }
}
