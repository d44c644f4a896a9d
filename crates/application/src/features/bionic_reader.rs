//! Bionic reading over page content blocks.

use std::collections::BTreeMap;

use clearsight_domain::{ElementId, bionic};
use tracing::debug;

use crate::ports::Document;

/// Attribute marking a block whose text has been transformed.
pub const PROCESSED_ATTR: &str = "data-bionic-processed";

/// Tags treated as content blocks.
pub const BLOCK_TAGS: [&str; 13] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "span", "div", "td", "blockquote", "dd",
];

/// Applies and reverts bionic emphasis on text-leaf blocks.
///
/// The original text of every transformed block is kept next to its
/// processed marker, so revert restores it exactly and re-applying never
/// double-bolds.
#[derive(Debug, Default)]
pub struct BionicReader {
    originals: BTreeMap<ElementId, String>,
}

impl BionicReader {
    /// Creates an inactive reader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any block is currently transformed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.originals.is_empty()
    }

    /// Number of transformed blocks.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.originals.len()
    }

    /// Transforms every eligible block under `root` and returns how many
    /// were changed by this call.
    pub fn apply<D: Document>(&mut self, doc: &mut D, root: ElementId) -> usize {
        let mut changed = 0;
        for id in doc.descendants(root) {
            if !self.is_eligible(doc, id) {
                continue;
            }
            let Some(original) = doc.text(id).filter(|text| !text.trim().is_empty()) else {
                continue;
            };
            doc.set_inlines(id, bionic::transform(&original).to_inlines());
            doc.set_attribute(id, PROCESSED_ATTR, "true");
            self.originals.insert(id, original);
            changed += 1;
        }
        debug!(blocks = changed, "bionic reading applied");
        changed
    }

    fn is_eligible<D: Document>(&self, doc: &D, id: ElementId) -> bool {
        doc.tag(id).is_some_and(|tag| BLOCK_TAGS.contains(&tag))
            && !doc.has_element_children(id)
            && doc.attribute(id, PROCESSED_ATTR).is_none()
            && !self.originals.contains_key(&id)
    }

    /// Restores every transformed block and returns how many were restored.
    ///
    /// Blocks that no longer exist are dropped silently.
    pub fn revert<D: Document>(&mut self, doc: &mut D) -> usize {
        let mut restored = 0;
        for (id, original) in std::mem::take(&mut self.originals) {
            if doc.contains(id) {
                doc.set_text(id, &original);
                doc.remove_attribute(id, PROCESSED_ATTR);
                restored += 1;
            }
        }
        restored
    }
}
