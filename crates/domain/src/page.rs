//! In-memory page model.
//!
//! An arena of elements addressed by [`ElementId`]. It is the structure the
//! transform engine edits: classes, inline styles, attributes, text content
//! and event subscriptions. Removing an element releases its whole subtree.

use std::collections::BTreeMap;

/// Handle to an element in a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Handle to an event subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Events a feature can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer moved anywhere over the page.
    PointerMove,
}

/// Inline run inside a text element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Plain text.
    Text(String),
    /// Bold text.
    Strong(String),
    /// Paragraph break.
    Break,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Inlines(Vec<Inline>),
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    content: Content,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            styles: BTreeMap::new(),
            attributes: BTreeMap::new(),
            content: Content::Text(String::new()),
            children: Vec::new(),
            parent: None,
        }
    }
}

/// A page: `head` and `body` roots plus every element created since.
#[derive(Debug, Clone)]
pub struct Page {
    slots: Vec<Option<Element>>,
    head: ElementId,
    body: ElementId,
    subscriptions: BTreeMap<SubscriptionId, EventKind>,
    next_subscription: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Creates an empty page with `head` and `body`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Element::new("head")), Some(Element::new("body"))],
            head: ElementId(0),
            body: ElementId(1),
            subscriptions: BTreeMap::new(),
            next_subscription: 0,
        }
    }

    /// The `head` element.
    #[must_use]
    pub const fn head(&self) -> ElementId {
        self.head
    }

    /// The `body` element.
    #[must_use]
    pub const fn body(&self) -> ElementId {
        self.body
    }

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns true if the element is still alive.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live elements, including `head` and `body`.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.slots.push(Some(Element::new(tag)));
        ElementId(self.slots.len() - 1)
    }

    /// Appends `child` to `parent`, detaching it from any previous parent.
    ///
    /// Returns false if either element is gone, `child` is a root, or
    /// `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if !self.contains(parent)
            || !self.contains(child)
            || child == self.head
            || child == self.body
            || self.is_inclusive_ancestor(child, parent)
        {
            return false;
        }
        self.detach(child);
        if let Some(element) = self.get_mut(child) {
            element.parent = Some(parent);
        }
        if let Some(element) = self.get_mut(parent) {
            element.children.push(child);
        }
        true
    }

    /// Creates an element holding `text` and appends it to `parent`.
    pub fn append_text_element(&mut self, parent: ElementId, tag: &str, text: &str) -> ElementId {
        let id = self.create_element(tag);
        self.set_text(id, text);
        self.append_child(parent, id);
        id
    }

    fn is_inclusive_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(next) = current {
            if next == ancestor {
                return true;
            }
            current = self.parent(next);
        }
        false
    }

    fn detach(&mut self, id: ElementId) {
        let parent = self.get(id).and_then(|element| element.parent);
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }
        if let Some(element) = self.get_mut(id) {
            element.parent = None;
        }
    }

    /// Removes an element and its subtree. Roots cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.head || id == self.body || !self.contains(id) {
            return false;
        }
        self.detach(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(element) = self.slots.get_mut(next.0).and_then(Option::take) {
                pending.extend(element.children);
            }
        }
        true
    }

    /// Lowercased tag name.
    #[must_use]
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|element| element.tag.as_str())
    }

    /// Parent element, if attached.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|element| element.parent)
    }

    /// Direct child elements.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map_or(&[], |element| element.children.as_slice())
    }

    /// `root` followed by all its descendants, in document order.
    #[must_use]
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(element) = self.get(id) {
                order.push(id);
                stack.extend(element.children.iter().rev());
            }
        }
        order
    }

    /// Class list, in insertion order.
    #[must_use]
    pub fn classes(&self, id: ElementId) -> &[String] {
        self.get(id).map_or(&[], |element| element.classes.as_slice())
    }

    /// Returns true if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    /// Adds a class unless already present.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.get_mut(id)
            && !element.classes.iter().any(|c| c == class)
        {
            element.classes.push(class.to_string());
        }
    }

    /// Removes a class.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.get_mut(id) {
            element.classes.retain(|c| c != class);
        }
    }

    /// Replaces the class list.
    pub fn set_classes(&mut self, id: ElementId, classes: Vec<String>) {
        if let Some(element) = self.get_mut(id) {
            element.classes = classes;
        }
    }

    /// Inline style value.
    #[must_use]
    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.get(id)
            .and_then(|element| element.styles.get(property))
            .map(String::as_str)
    }

    /// Number of inline style properties set.
    #[must_use]
    pub fn style_count(&self, id: ElementId) -> usize {
        self.get(id).map_or(0, |element| element.styles.len())
    }

    /// Sets an inline style property.
    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(element) = self.get_mut(id) {
            element
                .styles
                .insert(property.to_string(), value.to_string());
        }
    }

    /// Removes an inline style property.
    pub fn remove_style(&mut self, id: ElementId, property: &str) {
        if let Some(element) = self.get_mut(id) {
            element.styles.remove(property);
        }
    }

    /// Attribute value.
    #[must_use]
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id)
            .and_then(|element| element.attributes.get(name))
            .map(String::as_str)
    }

    /// Sets an attribute.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(element) = self.get_mut(id) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    /// Removes an attribute.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if let Some(element) = self.get_mut(id) {
            element.attributes.remove(name);
        }
    }

    /// Own text of the element, ignoring child elements.
    ///
    /// Inline runs are flattened; breaks read as a newline.
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<String> {
        self.get(id).map(|element| match &element.content {
            Content::Text(text) => text.clone(),
            Content::Inlines(runs) => runs
                .iter()
                .map(|run| match run {
                    Inline::Text(text) | Inline::Strong(text) => text.as_str(),
                    Inline::Break => "\n",
                })
                .collect(),
        })
    }

    /// Replaces the element's own content with plain text.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.get_mut(id) {
            element.content = Content::Text(text.to_string());
        }
    }

    /// Inline runs, if the content is rich.
    #[must_use]
    pub fn inlines(&self, id: ElementId) -> Option<&[Inline]> {
        match &self.get(id)?.content {
            Content::Inlines(runs) => Some(runs.as_slice()),
            Content::Text(_) => None,
        }
    }

    /// Replaces the element's own content with inline runs.
    pub fn set_inlines(&mut self, id: ElementId, runs: Vec<Inline>) {
        if let Some(element) = self.get_mut(id) {
            element.content = Content::Inlines(runs);
        }
    }

    /// Registers a listener for `kind`.
    pub fn subscribe(&mut self, kind: EventKind) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id, kind);
        id
    }

    /// Drops a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    /// Number of live listeners for `kind`.
    #[must_use]
    pub fn subscription_count(&self, kind: EventKind) -> usize {
        self.subscriptions.values().filter(|k| **k == kind).count()
    }
}
