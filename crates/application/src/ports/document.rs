//! Document port.
//!
//! The subset of DOM operations the feature engines need. [`Page`] is the
//! in-memory implementation; a browser binding would implement the same
//! trait over the live DOM.

use clearsight_domain::{ElementId, EventKind, Inline, Page, SubscriptionId};

/// Mutable view of a page.
pub trait Document {
    /// The `head` element.
    fn head(&self) -> ElementId;

    /// The `body` element.
    fn body(&self) -> ElementId;

    /// Returns true if the element still exists.
    fn contains(&self, id: ElementId) -> bool;

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Appends `child` to `parent`.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool;

    /// Removes an element and everything below it.
    fn remove(&mut self, id: ElementId) -> bool;

    /// Lowercased tag name.
    fn tag(&self, id: ElementId) -> Option<&str>;

    /// `root` and its descendants, in document order.
    fn descendants(&self, root: ElementId) -> Vec<ElementId>;

    /// Returns true if the element has child elements (not just text).
    fn has_element_children(&self, id: ElementId) -> bool;

    /// Class list, in order.
    fn classes(&self, id: ElementId) -> Vec<String>;

    /// Adds a class.
    fn add_class(&mut self, id: ElementId, class: &str);

    /// Removes a class.
    fn remove_class(&mut self, id: ElementId, class: &str);

    /// Replaces the class list.
    fn set_classes(&mut self, id: ElementId, classes: Vec<String>);

    /// Inline style value.
    fn style(&self, id: ElementId, property: &str) -> Option<String>;

    /// Sets an inline style property.
    fn set_style(&mut self, id: ElementId, property: &str, value: &str);

    /// Removes an inline style property.
    fn remove_style(&mut self, id: ElementId, property: &str);

    /// Attribute value.
    fn attribute(&self, id: ElementId, name: &str) -> Option<String>;

    /// Sets an attribute.
    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str);

    /// Removes an attribute.
    fn remove_attribute(&mut self, id: ElementId, name: &str);

    /// Own text content.
    fn text(&self, id: ElementId) -> Option<String>;

    /// Replaces own content with plain text.
    fn set_text(&mut self, id: ElementId, text: &str);

    /// Replaces own content with inline runs.
    fn set_inlines(&mut self, id: ElementId, runs: Vec<Inline>);

    /// Attaches a global listener.
    fn subscribe(&mut self, kind: EventKind) -> SubscriptionId;

    /// Detaches a listener.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

impl Document for Page {
    fn head(&self) -> ElementId {
        Self::head(self)
    }

    fn body(&self) -> ElementId {
        Self::body(self)
    }

    fn contains(&self, id: ElementId) -> bool {
        Self::contains(self, id)
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        Self::create_element(self, tag)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        Self::append_child(self, parent, child)
    }

    fn remove(&mut self, id: ElementId) -> bool {
        Self::remove(self, id)
    }

    fn tag(&self, id: ElementId) -> Option<&str> {
        Self::tag(self, id)
    }

    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        Self::descendants(self, root)
    }

    fn has_element_children(&self, id: ElementId) -> bool {
        !Self::children(self, id).is_empty()
    }

    fn classes(&self, id: ElementId) -> Vec<String> {
        Self::classes(self, id).to_vec()
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        Self::add_class(self, id, class);
    }

    fn remove_class(&mut self, id: ElementId, class: &str) {
        Self::remove_class(self, id, class);
    }

    fn set_classes(&mut self, id: ElementId, classes: Vec<String>) {
        Self::set_classes(self, id, classes);
    }

    fn style(&self, id: ElementId, property: &str) -> Option<String> {
        Self::style(self, id, property).map(str::to_string)
    }

    fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        Self::set_style(self, id, property, value);
    }

    fn remove_style(&mut self, id: ElementId, property: &str) {
        Self::remove_style(self, id, property);
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        Self::attribute(self, id, name).map(str::to_string)
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        Self::set_attribute(self, id, name, value);
    }

    fn remove_attribute(&mut self, id: ElementId, name: &str) {
        Self::remove_attribute(self, id, name);
    }

    fn text(&self, id: ElementId) -> Option<String> {
        Self::text(self, id)
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        Self::set_text(self, id, text);
    }

    fn set_inlines(&mut self, id: ElementId, runs: Vec<Inline>) {
        Self::set_inlines(self, id, runs);
    }

    fn subscribe(&mut self, kind: EventKind) -> SubscriptionId {
        Self::subscribe(self, kind)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        Self::unsubscribe(self, id)
    }
}
