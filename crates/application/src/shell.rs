//! The web app's top-level shell.

use clearsight_domain::{AppState, ColorVisionType, DyslexiaSettings, PersistedSettings};
use tracing::{info, warn};

use crate::ApplicationResult;
use crate::features::{DyslexiaStyler, FilterTarget, VisionFilter};
use crate::ports::{Document, SettingsStore};

/// Owns the application state and the features that render it onto the
/// page. Every change is re-applied and persisted.
#[derive(Debug)]
pub struct AccessibilityShell<D, S> {
    document: D,
    store: S,
    state: AppState,
    filter: VisionFilter,
    dyslexia: DyslexiaStyler,
}

impl<D: Document, S: SettingsStore> AccessibilityShell<D, S> {
    /// Creates a shell over `document` with default state. Nothing is
    /// applied until [`load`](Self::load) is called.
    pub fn new(document: D, store: S, ruler_height_px: u32) -> Self {
        Self {
            document,
            store,
            state: AppState::default(),
            filter: VisionFilter::new(FilterTarget::Overlay),
            dyslexia: DyslexiaStyler::new(ruler_height_px),
        }
    }

    /// Reads persisted settings and applies them.
    ///
    /// Unreadable settings fall back to defaults.
    pub async fn load(&mut self) -> &AppState {
        let settings = self.store.load().await.unwrap_or_else(|error| {
            warn!(%error, "settings unreadable, using defaults");
            PersistedSettings::default()
        });
        self.state = AppState::from(settings);
        self.render();
        info!(
            vision = %self.state.vision.color_vision_type,
            dyslexia = self.state.dyslexia.is_enabled,
            "settings loaded"
        );
        &self.state
    }

    /// Selects a color-vision type.
    ///
    /// # Errors
    ///
    /// Returns an error if the new settings cannot be saved. The page keeps
    /// the new filter either way.
    pub async fn set_vision_type(&mut self, kind: ColorVisionType) -> ApplicationResult<()> {
        self.state.vision.color_vision_type = kind;
        self.filter
            .apply_preference(&mut self.document, &self.state.vision);
        self.persist().await
    }

    /// Switches between simulation and correction.
    ///
    /// # Errors
    ///
    /// Returns an error if the new settings cannot be saved.
    pub async fn set_correction(&mut self, enabled: bool) -> ApplicationResult<()> {
        self.state.vision.correction_enabled = enabled;
        self.filter
            .apply_preference(&mut self.document, &self.state.vision);
        self.persist().await
    }

    /// Replaces the dyslexia settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the new settings cannot be saved.
    pub async fn update_dyslexia(&mut self, settings: DyslexiaSettings) -> ApplicationResult<()> {
        self.state.dyslexia = settings.clamped();
        self.dyslexia.apply(&mut self.document, &self.state.dyslexia);
        self.persist().await
    }

    /// Forwards a pointer move to the reading ruler.
    pub fn pointer_moved(&mut self, pointer_y: f32) {
        self.dyslexia.pointer_moved(&mut self.document, pointer_y);
    }

    /// Current state.
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// The applied filter, if any.
    pub fn current_filter(&self) -> Option<&str> {
        self.filter.current()
    }

    /// Returns true while dyslexia styles are applied.
    pub const fn dyslexia_active(&self) -> bool {
        self.dyslexia.is_active()
    }

    /// The page.
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// The page, for edits made outside the shell.
    pub const fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    fn render(&mut self) {
        self.filter
            .apply_preference(&mut self.document, &self.state.vision);
        self.dyslexia.apply(&mut self.document, &self.state.dyslexia);
    }

    async fn persist(&self) -> ApplicationResult<()> {
        self.store.save(&self.state.to_persisted()).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::SettingsStoreError;
    use clearsight_domain::{MODE_CLASS, Page, css_filter};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Option<PersistedSettings>>,
        fail: bool,
    }

    impl MemoryStore {
        fn with(settings: PersistedSettings) -> Self {
            Self {
                saved: Mutex::new(Some(settings)),
                fail: false,
            }
        }

        fn broken() -> Self {
            Self {
                saved: Mutex::new(None),
                fail: true,
            }
        }

        fn saved(&self) -> Option<PersistedSettings> {
            self.saved.lock().expect("Lock poisoned").clone()
        }
    }

    impl SettingsStore for MemoryStore {
        async fn load(&self) -> Result<PersistedSettings, SettingsStoreError> {
            if self.fail {
                return Err(SettingsStoreError::Unavailable("disk gone".into()));
            }
            Ok(self.saved().unwrap_or_default())
        }

        async fn save(&self, settings: &PersistedSettings) -> Result<(), SettingsStoreError> {
            if self.fail {
                return Err(SettingsStoreError::Unavailable("disk gone".into()));
            }
            *self.saved.lock().expect("Lock poisoned") = Some(settings.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_applies_stored_settings() {
        let stored = PersistedSettings {
            vision_type: ColorVisionType::Deuteranopia,
            correction: false,
            dyslexia_settings: DyslexiaSettings {
                is_enabled: true,
                ..DyslexiaSettings::default()
            },
        };
        let mut shell = AccessibilityShell::new(Page::new(), MemoryStore::with(stored), 40);

        let state = shell.load().await.clone();

        assert_eq!(state.vision.color_vision_type, ColorVisionType::Deuteranopia);
        assert_eq!(
            shell.current_filter(),
            css_filter(ColorVisionType::Deuteranopia, false)
        );
        assert!(shell.dyslexia_active());
        let body = shell.document().body();
        assert!(shell.document().has_class(body, MODE_CLASS));
    }

    #[tokio::test]
    async fn test_unreadable_settings_fall_back_to_defaults() {
        let mut shell = AccessibilityShell::new(Page::new(), MemoryStore::broken(), 40);

        let state = shell.load().await.clone();

        assert_eq!(state, AppState::default());
        assert_eq!(shell.current_filter(), None);
        assert!(!shell.dyslexia_active());
    }

    #[tokio::test]
    async fn test_changes_are_applied_and_persisted() {
        let mut shell = AccessibilityShell::new(Page::new(), MemoryStore::default(), 40);
        shell.load().await;

        shell
            .set_vision_type(ColorVisionType::Protanopia)
            .await
            .expect("saved");
        shell.set_correction(true).await.expect("saved");

        assert_eq!(
            shell.current_filter(),
            css_filter(ColorVisionType::Protanopia, true)
        );
        let saved = shell.store.saved().expect("persisted");
        assert_eq!(saved.vision_type, ColorVisionType::Protanopia);
        assert!(saved.correction);

        shell
            .set_vision_type(ColorVisionType::None)
            .await
            .expect("saved");
        assert_eq!(shell.current_filter(), None);
    }

    #[tokio::test]
    async fn test_dyslexia_toggle_round_trips() {
        let mut shell = AccessibilityShell::new(Page::new(), MemoryStore::default(), 40);
        shell.load().await;
        let body = shell.document().body();

        let enabled = DyslexiaSettings {
            is_enabled: true,
            ..DyslexiaSettings::default()
        };
        shell.update_dyslexia(enabled.clone()).await.expect("saved");
        assert!(shell.document().has_class(body, MODE_CLASS));

        shell
            .update_dyslexia(DyslexiaSettings {
                is_enabled: false,
                ..enabled
            })
            .await
            .expect("saved");
        assert!(!shell.document().has_class(body, MODE_CLASS));
        assert!(!shell.store.saved().expect("persisted").dyslexia_settings.is_enabled);
    }

    #[tokio::test]
    async fn test_save_failure_is_reported_but_page_updates() {
        let mut shell = AccessibilityShell::new(Page::new(), MemoryStore::broken(), 40);
        shell.load().await;

        let result = shell.set_vision_type(ColorVisionType::Tritanopia).await;

        assert!(result.is_err());
        assert_eq!(
            shell.current_filter(),
            css_filter(ColorVisionType::Tritanopia, false)
        );
    }
}
