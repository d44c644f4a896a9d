//! Reading ruler: a horizontal band that follows the pointer.

use clearsight_domain::{ElementId, EventKind, SubscriptionId};

use crate::ports::Document;

/// Attribute marking the ruler element.
pub const RULER_ATTR: &str = "data-clearsight-ruler";

/// Band height when none is configured.
pub const DEFAULT_RULER_HEIGHT_PX: u32 = 40;

#[derive(Debug, Clone, Copy)]
struct RulerHandle {
    element: ElementId,
    subscription: SubscriptionId,
}

/// Pointer-following reading ruler.
///
/// At most one band element and one pointer-move listener exist while
/// enabled; both are released on disable.
#[derive(Debug)]
pub struct ReadingRuler {
    height_px: u32,
    handle: Option<RulerHandle>,
}

impl Default for ReadingRuler {
    fn default() -> Self {
        Self::new(DEFAULT_RULER_HEIGHT_PX)
    }
}

impl ReadingRuler {
    /// Creates a disabled ruler of the given band height.
    #[must_use]
    pub const fn new(height_px: u32) -> Self {
        Self {
            height_px,
            handle: None,
        }
    }

    /// Returns true while the ruler is shown.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    /// The band element, while enabled.
    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        self.handle.map(|handle| handle.element)
    }

    /// Shows the ruler. Calling it again while enabled does nothing.
    pub fn enable<D: Document>(&mut self, doc: &mut D) -> ElementId {
        if let Some(handle) = self.handle {
            if doc.contains(handle.element) {
                return handle.element;
            }
            // the page dropped the band; start over
            doc.unsubscribe(handle.subscription);
        }

        let band = doc.create_element("div");
        doc.set_attribute(band, RULER_ATTR, "true");
        let height = format!("{}px", self.height_px);
        for (property, value) in [
            ("position", "fixed"),
            ("left", "0"),
            ("width", "100%"),
            ("height", height.as_str()),
            ("top", "0px"),
            ("pointer-events", "none"),
            ("background-color", "rgba(255, 235, 59, 0.25)"),
            ("z-index", "2147483646"),
        ] {
            doc.set_style(band, property, value);
        }
        let body = doc.body();
        doc.append_child(body, band);

        let subscription = doc.subscribe(EventKind::PointerMove);
        self.handle = Some(RulerHandle {
            element: band,
            subscription,
        });
        band
    }

    /// Centers the band on the pointer's vertical position.
    pub fn track<D: Document>(&self, doc: &mut D, pointer_y: f32) {
        let Some(handle) = self.handle else {
            return;
        };
        #[allow(clippy::cast_precision_loss)]
        let half = self.height_px as f32 / 2.0;
        let top = (pointer_y - half).max(0.0).round();
        doc.set_style(handle.element, "top", &format!("{top}px"));
    }

    /// Hides the ruler and detaches its listener.
    pub fn disable<D: Document>(&mut self, doc: &mut D) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        doc.unsubscribe(handle.subscription);
        doc.remove(handle.element);
        true
    }
}
