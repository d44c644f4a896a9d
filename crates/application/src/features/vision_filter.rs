//! Page-wide color-vision filter.

use clearsight_domain::{ElementId, NO_FILTER, VisionPreference};

use crate::ports::Document;

/// Attribute marking the element that carries the filter.
pub const FILTER_ATTR: &str = "data-clearsight-filter";

const OVERLAY_STYLES: [(&str, &str); 5] = [
    ("position", "fixed"),
    ("inset", "0"),
    ("pointer-events", "none"),
    ("z-index", "2147483647"),
    ("mix-blend-mode", "normal"),
];

/// Where the filter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    /// A full-viewport overlay element in `body` (web app).
    Overlay,
    /// A stylesheet in `head` filtering `html` (extension).
    Stylesheet,
}

/// Applies one CSS filter to the whole page, independent of page size.
#[derive(Debug)]
pub struct VisionFilter {
    target: FilterTarget,
    element: Option<ElementId>,
    current: Option<String>,
}

impl VisionFilter {
    /// Creates an inactive filter.
    #[must_use]
    pub const fn new(target: FilterTarget) -> Self {
        Self {
            target,
            element: None,
            current: None,
        }
    }

    /// The filter currently applied.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The element carrying the filter.
    #[must_use]
    pub const fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Applies the filter for a preference.
    pub fn apply_preference<D: Document>(&mut self, doc: &mut D, preference: &VisionPreference) {
        self.apply(doc, preference.filter());
    }

    /// Applies `filter`, replacing any previous one. `None`, empty or
    /// `none` reverts instead.
    pub fn apply<D: Document>(&mut self, doc: &mut D, filter: Option<&str>) {
        let Some(filter) = filter
            .map(str::trim)
            .filter(|f| !f.is_empty() && *f != NO_FILTER)
        else {
            self.revert(doc);
            return;
        };

        let element = match self.element.filter(|id| doc.contains(*id)) {
            Some(id) => id,
            None => self.create(doc),
        };

        match self.target {
            FilterTarget::Overlay => doc.set_style(element, "filter", filter),
            FilterTarget::Stylesheet => {
                doc.set_text(element, &format!("html {{ filter: {filter} !important; }}"));
            }
        }
        self.element = Some(element);
        self.current = Some(filter.to_string());
    }

    fn create<D: Document>(&self, doc: &mut D) -> ElementId {
        match self.target {
            FilterTarget::Overlay => {
                let overlay = doc.create_element("div");
                doc.set_attribute(overlay, FILTER_ATTR, "overlay");
                for (property, value) in OVERLAY_STYLES {
                    doc.set_style(overlay, property, value);
                }
                let body = doc.body();
                doc.append_child(body, overlay);
                overlay
            }
            FilterTarget::Stylesheet => {
                let sheet = doc.create_element("style");
                doc.set_attribute(sheet, FILTER_ATTR, "stylesheet");
                let head = doc.head();
                doc.append_child(head, sheet);
                sheet
            }
        }
    }

    /// Removes the filter element. Returns false if nothing was applied.
    pub fn revert<D: Document>(&mut self, doc: &mut D) -> bool {
        self.current = None;
        self.element.take().is_some_and(|id| doc.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearsight_domain::{ColorVisionType, Page};

    #[test]
    fn test_overlay_is_single_and_updated_in_place() {
        let mut page = Page::new();
        let mut filter = VisionFilter::new(FilterTarget::Overlay);

        filter.apply_preference(
            &mut page,
            &VisionPreference::new(ColorVisionType::Protanopia, false),
        );
        let first = filter.element();
        filter.apply_preference(
            &mut page,
            &VisionPreference::new(ColorVisionType::Protanopia, true),
        );

        assert_eq!(filter.element(), first);
        assert_eq!(page.children(page.body()).len(), 1);
        let overlay = first.unwrap_or(page.body());
        assert_eq!(page.style(overlay, "position"), Some("fixed"));
        assert_eq!(
            page.style(overlay, "filter"),
            VisionPreference::new(ColorVisionType::Protanopia, true).filter()
        );
    }

    #[test]
    fn test_none_preference_removes_overlay() {
        let mut page = Page::new();
        let mut filter = VisionFilter::new(FilterTarget::Overlay);
        filter.apply(&mut page, Some("grayscale(1)"));
        filter.apply_preference(&mut page, &VisionPreference::default());

        assert!(filter.current().is_none());
        assert!(page.children(page.body()).is_empty());
        assert!(!filter.revert(&mut page));
    }

    #[test]
    fn test_stylesheet_filters_html() {
        let mut page = Page::new();
        let mut filter = VisionFilter::new(FilterTarget::Stylesheet);
        filter.apply(&mut page, Some("grayscale(1)"));

        let sheet = page.children(page.head())[0];
        assert_eq!(page.tag(sheet), Some("style"));
        assert_eq!(
            page.text(sheet).as_deref(),
            Some("html { filter: grayscale(1) !important; }")
        );

        filter.apply(&mut page, Some(NO_FILTER));
        assert!(page.children(page.head()).is_empty());
    }

    #[test]
    fn test_recreates_element_removed_by_page() {
        let mut page = Page::new();
        let mut filter = VisionFilter::new(FilterTarget::Overlay);
        filter.apply(&mut page, Some("grayscale(1)"));
        let old = page.children(page.body())[0];
        page.remove(old);

        filter.apply(&mut page, Some("contrast(1.4)"));
        assert_eq!(page.children(page.body()).len(), 1);
        assert_ne!(filter.element(), Some(old));
    }
}
