//! Extension content script: applies background messages to its page.

use clearsight_domain::ExtensionMessage;
use tracing::debug;

use crate::features::{DyslexiaStyler, FilterTarget, VisionFilter};
use crate::ports::Document;

/// Receives [`ExtensionMessage`]s for one tab and edits its document.
#[derive(Debug)]
pub struct ContentScript<D> {
    document: D,
    filter: VisionFilter,
    dyslexia: DyslexiaStyler,
}

impl<D: Document> ContentScript<D> {
    /// Attaches to a document.
    pub fn new(document: D, ruler_height_px: u32) -> Self {
        Self {
            document,
            filter: VisionFilter::new(FilterTarget::Stylesheet),
            dyslexia: DyslexiaStyler::new(ruler_height_px),
        }
    }

    /// The document being edited.
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// The applied filter, if any.
    pub fn current_filter(&self) -> Option<&str> {
        self.filter.current()
    }

    /// Returns true while dyslexia styles are applied.
    pub const fn dyslexia_active(&self) -> bool {
        self.dyslexia.is_active()
    }

    /// Applies a message. Unknown actions are ignored and return false.
    pub fn handle(&mut self, message: &ExtensionMessage) -> bool {
        match message {
            ExtensionMessage::ApplyFilter { filter } => {
                self.filter.apply(&mut self.document, Some(filter.as_str()));
            }
            ExtensionMessage::ApplyDyslexiaStyles { settings } => {
                self.dyslexia.apply(&mut self.document, settings);
            }
            ExtensionMessage::RemoveDyslexiaStyles { .. } => {
                self.dyslexia.revert(&mut self.document);
            }
            ExtensionMessage::Unknown => {
                debug!("ignoring unknown action");
                return false;
            }
        }
        true
    }

    /// Parses and applies a raw wire message. Malformed input is ignored.
    pub fn handle_json(&mut self, json: &str) -> bool {
        match ExtensionMessage::from_json(json) {
            Ok(message) => self.handle(&message),
            Err(error) => {
                debug!(%error, "ignoring malformed message");
                false
            }
        }
    }

    /// Forwards a pointer move to the reading ruler.
    pub fn pointer_moved(&mut self, pointer_y: f32) {
        self.dyslexia.pointer_moved(&mut self.document, pointer_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearsight_domain::{MODE_CLASS, Page};

    fn script() -> ContentScript<Page> {
        let mut page = Page::new();
        let body = page.body();
        page.append_text_element(body, "p", "Some page text");
        ContentScript::new(page, 40)
    }

    #[test]
    fn test_applies_and_clears_filter() {
        let mut script = script();
        assert!(script.handle_json(r#"{"action":"applyFilter","filter":"grayscale(1)"}"#));
        assert_eq!(script.current_filter(), Some("grayscale(1)"));
        let head = script.document().head();
        assert_eq!(script.document().children(head).len(), 1);

        assert!(script.handle_json(r#"{"action":"applyFilter","filter":"none"}"#));
        assert_eq!(script.current_filter(), None);
        assert!(script.document().children(head).is_empty());
    }

    #[test]
    fn test_applies_and_removes_dyslexia_styles() {
        let mut script = script();
        let body = script.document().body();

        assert!(script.handle_json(
            r#"{"action":"applyDyslexiaStyles","settings":{"isEnabled":true,"bionicReading":true}}"#
        ));
        assert!(script.document().has_class(body, MODE_CLASS));

        assert!(script.handle_json(r#"{"action":"removeDyslexiaStyles"}"#));
        assert!(!script.dyslexia_active());
        assert!(script.document().classes(body).is_empty());
        let paragraph = script.document().children(body)[0];
        assert_eq!(
            script.document().text(paragraph).as_deref(),
            Some("Some page text")
        );
    }

    #[test]
    fn test_ignores_unknown_and_malformed() {
        let mut script = script();
        assert!(!script.handle_json(r#"{"action":"openPopup"}"#));
        assert!(!script.handle_json("not json"));
        assert_eq!(script.document().element_count(), 3);
    }
}
