//! Page-address activation rule. The annotator is passive and always-on;
//! this is its only gate.

use url::Url;

/// Substring the page path must carry for the annotator to apply.
pub const PATH_MARKER: &str = "form/item";

/// True iff the annotator should run on the page at `address`. Unparseable
/// addresses never activate.
pub fn applies_to(address: &str) -> bool {
    match Url::parse(address) {
        Ok(url) => url.path().contains(PATH_MARKER),
        Err(_) => false,
    }
}
