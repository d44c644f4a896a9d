//! Dyslexia presentation styles.

use clearsight_domain::{DyslexiaSettings, ElementId};
use tracing::debug;

use super::{BionicReader, ReadingRuler};
use crate::ports::Document;

/// Attribute marking the injected font stylesheet.
const STYLESHEET_ATTR: &str = "data-clearsight-dyslexia";

/// State of the target element before styles were applied.
#[derive(Debug)]
struct Snapshot {
    target: ElementId,
    classes: Vec<String>,
    styles: Vec<(&'static str, Option<String>)>,
    stylesheet: ElementId,
}

/// Applies [`DyslexiaSettings`] to the page body and reverts them exactly.
///
/// Every apply starts with a full revert, so switching settings never
/// leaves stale classes behind.
#[derive(Debug, Default)]
pub struct DyslexiaStyler {
    snapshot: Option<Snapshot>,
    applied: Option<DyslexiaSettings>,
    bionic: BionicReader,
    ruler: ReadingRuler,
}

impl DyslexiaStyler {
    /// Creates an inactive styler whose ruler uses the given band height.
    #[must_use]
    pub fn new(ruler_height_px: u32) -> Self {
        Self {
            ruler: ReadingRuler::new(ruler_height_px),
            ..Self::default()
        }
    }

    /// Settings currently applied.
    #[must_use]
    pub const fn applied(&self) -> Option<&DyslexiaSettings> {
        self.applied.as_ref()
    }

    /// Returns true while styles are applied.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The bionic reader driven by these settings.
    #[must_use]
    pub const fn bionic(&self) -> &BionicReader {
        &self.bionic
    }

    /// The reading ruler driven by these settings.
    #[must_use]
    pub const fn ruler(&self) -> &ReadingRuler {
        &self.ruler
    }

    /// Reverts any previous state, then applies `settings` if enabled.
    ///
    /// Returns true if styles are now applied.
    pub fn apply<D: Document>(&mut self, doc: &mut D, settings: &DyslexiaSettings) -> bool {
        self.revert(doc);
        if !settings.is_enabled {
            return false;
        }

        let style = settings.style();
        let target = doc.body();

        let mut touched: Vec<&'static str> = style.properties.iter().map(|(p, _)| *p).collect();
        touched.push("background-color");
        let previous = touched
            .into_iter()
            .map(|property| (property, doc.style(target, property)))
            .collect();

        let stylesheet = doc.create_element("style");
        doc.set_attribute(stylesheet, STYLESHEET_ATTR, "true");
        doc.set_text(stylesheet, &style.font_rule());
        let head = doc.head();
        doc.append_child(head, stylesheet);

        self.snapshot = Some(Snapshot {
            target,
            classes: doc.classes(target),
            styles: previous,
            stylesheet,
        });

        doc.add_class(target, style.mode_class);
        doc.add_class(target, style.font_class);
        for (property, value) in &style.properties {
            doc.set_style(target, property, value);
        }
        doc.set_style(target, "background-color", style.background);

        if settings.bionic_reading {
            self.bionic.apply(doc, target);
        }
        if settings.reading_ruler {
            self.ruler.enable(doc);
        }

        debug!(font = style.font_class, "dyslexia styles applied");
        self.applied = Some(settings.clone());
        true
    }

    /// Restores the pre-apply state. Returns false if nothing was applied.
    pub fn revert<D: Document>(&mut self, doc: &mut D) -> bool {
        self.bionic.revert(doc);
        self.ruler.disable(doc);
        self.applied = None;

        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };
        if doc.contains(snapshot.target) {
            doc.set_classes(snapshot.target, snapshot.classes);
            for (property, previous) in snapshot.styles {
                match previous {
                    Some(value) => doc.set_style(snapshot.target, property, &value),
                    None => doc.remove_style(snapshot.target, property),
                }
            }
        }
        doc.remove(snapshot.stylesheet);
        true
    }

    /// Routes a pointer move to the ruler.
    pub fn pointer_moved<D: Document>(&self, doc: &mut D, pointer_y: f32) {
        self.ruler.track(doc, pointer_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearsight_domain::{EventKind, FontFamily, MODE_CLASS, Page};
    use pretty_assertions::assert_eq;

    fn enabled() -> DyslexiaSettings {
        DyslexiaSettings {
            is_enabled: true,
            ..DyslexiaSettings::default()
        }
    }

    fn page_with_body_state() -> Page {
        let mut page = Page::new();
        let body = page.body();
        page.add_class(body, "theme-dark");
        page.set_style(body, "font-size", "14px");
        page.append_text_element(body, "p", "Reading is fun");
        page
    }

    #[test]
    fn test_revert_restores_class_list_and_styles() {
        let mut page = page_with_body_state();
        let body = page.body();
        let classes_before = page.classes(body).to_vec();
        let elements_before = page.element_count();
        let mut styler = DyslexiaStyler::default();

        assert!(styler.apply(&mut page, &enabled()));
        assert!(page.has_class(body, MODE_CLASS));
        assert_eq!(page.style(body, "background-color"), Some("#fdf6e3"));
        assert_eq!(page.style(body, "font-size"), Some("18px"));

        assert!(styler.revert(&mut page));
        assert_eq!(page.classes(body).to_vec(), classes_before);
        assert_eq!(page.style(body, "font-size"), Some("14px"));
        assert_eq!(page.style(body, "background-color"), None);
        assert_eq!(page.element_count(), elements_before);
        assert!(page.children(page.head()).is_empty());
    }

    #[test]
    fn test_switching_fonts_leaves_no_stale_class() {
        let mut page = Page::new();
        let body = page.body();
        let mut styler = DyslexiaStyler::default();

        styler.apply(&mut page, &enabled());
        styler.apply(
            &mut page,
            &DyslexiaSettings {
                font_family: FontFamily::Verdana,
                ..enabled()
            },
        );

        assert!(!page.has_class(body, FontFamily::OpenDyslexic.class_name()));
        assert!(page.has_class(body, FontFamily::Verdana.class_name()));
        assert_eq!(page.children(page.head()).len(), 1);
    }

    #[test]
    fn test_disabled_settings_only_revert() {
        let mut page = Page::new();
        let mut styler = DyslexiaStyler::default();
        styler.apply(&mut page, &enabled());

        assert!(!styler.apply(&mut page, &DyslexiaSettings::default()));
        assert!(!styler.is_active());
        assert!(page.classes(page.body()).is_empty());
    }

    #[test]
    fn test_bionic_and_ruler_follow_flags() {
        let mut page = page_with_body_state();
        let paragraph = page.children(page.body())[0];
        let mut styler = DyslexiaStyler::new(20);
        let settings = DyslexiaSettings {
            bionic_reading: true,
            reading_ruler: true,
            ..enabled()
        };

        styler.apply(&mut page, &settings);
        assert!(styler.bionic().is_active());
        assert!(page.inlines(paragraph).is_some());
        assert_eq!(page.subscription_count(EventKind::PointerMove), 1);

        styler.pointer_moved(&mut page, 100.0);
        let band = styler.ruler().element().unwrap_or(page.body());
        assert_eq!(page.style(band, "top"), Some("90px"));

        styler.revert(&mut page);
        assert_eq!(page.text(paragraph).as_deref(), Some("Reading is fun"));
        assert!(page.inlines(paragraph).is_none());
        assert_eq!(page.subscription_count(EventKind::PointerMove), 0);
        assert_eq!(page.children(page.body()).len(), 1);
    }
}
