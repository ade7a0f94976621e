//! Style contract between the annotator and whatever renders the tree.
//!
//! The annotator only sets and clears class names; everything visual lives
//! in the opaque CSS text injected here.

use crate::dom::Document;

/// Class carried by every injected control.
pub const CONTROL_CLASS: &str = "atom-id-copy-btn";

/// Transient class driving the post-copy confirmation state.
pub const CONFIRMED_CLASS: &str = "copied";

/// Id of the injected `style` element; also the idempotence check.
pub const STYLE_ELEMENT_ID: &str = "atom-id-copy-style";

pub const GLOBAL_CSS: &str = r#"
/* Make the icon's container a positioning context for the absolute button */
div[id^="atom"] .field-caption .d-flex {
    position: relative;
}

.atom-id-copy-btn {
    position: absolute;
    left: -12px;
    top: 50%;
    transform: translateY(-50%);
    width: 7px;
    height: 7px;
    border: 1px solid #999;
    background-color: #f0f0f0;
    cursor: pointer;
    padding: 0;
}
.atom-id-copy-btn:hover {
    background-color: #cccccc;
}
.atom-id-copy-btn.copied {
    background-color: #90ee90;
    border-color: #5cb85c;
}
"#;

/// Append the global stylesheet to `head`. Documents without a head are
/// left alone; repeated calls are a no-op.
pub fn inject_global_style(doc: &mut Document) {
    let Some(head) = doc.head() else {
        return;
    };
    let already_present = doc
        .children(head)
        .iter()
        .any(|child| doc.id(*child) == Some(STYLE_ELEMENT_ID));
    if already_present {
        return;
    }
    let style = doc.create_element("style");
    doc.set_id(style, STYLE_ELEMENT_ID);
    doc.set_text(style, GLOBAL_CSS);
    doc.append_child(head, style);
}
