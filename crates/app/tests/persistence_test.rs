//! Integration tests for the file-backed stores.
//!
//! These tests run the web-app shell, the extension background and the
//! exercise runner against settings and scores stored in a temp directory.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::tempdir;

use clearsight_application::ports::{
    HighScoreStore, SettingsStore, TabError, TabId, TabMessenger,
};
use clearsight_application::{
    AccessibilityShell, BackgroundService, ContentScript, ExerciseRunner,
};
use clearsight_domain::{
    ColorVisionType, DyslexiaSettings, ExerciseKind, ExtensionMessage, FontFamily, MODE_CLASS,
    MissPolicy, Page, PersistedSettings, css_filter,
};
use clearsight_infrastructure::{FileHighScoreStore, FileSettingsStore, SystemClock};

/// Tabs backed by in-process content scripts. Tab 0 is a restricted page.
struct LocalTabs {
    scripts: Mutex<BTreeMap<u32, ContentScript<Page>>>,
}

impl LocalTabs {
    fn open(count: u32) -> Self {
        let scripts = (0..count)
            .map(|id| (id, ContentScript::new(Page::new(), 40)))
            .collect();
        Self {
            scripts: Mutex::new(scripts),
        }
    }

    fn filter_of(&self, tab: u32) -> Option<String> {
        let scripts = self.scripts.lock().expect("Lock poisoned");
        scripts[&tab].current_filter().map(str::to_string)
    }

    fn dyslexia_active(&self, tab: u32) -> bool {
        self.scripts.lock().expect("Lock poisoned")[&tab].dyslexia_active()
    }
}

#[async_trait]
impl TabMessenger for LocalTabs {
    async fn tabs(&self) -> Result<Vec<TabId>, TabError> {
        let scripts = self.scripts.lock().expect("Lock poisoned");
        Ok(scripts.keys().copied().map(TabId).collect())
    }

    async fn send(&self, tab: TabId, message: &ExtensionMessage) -> Result<(), TabError> {
        if tab.0 == 0 {
            return Err(TabError::Restricted(tab));
        }
        let mut scripts = self.scripts.lock().expect("Lock poisoned");
        let script = scripts.get_mut(&tab.0).ok_or(TabError::Closed(tab))?;
        // through the wire format, as a real tab would receive it
        let json = message.to_json().expect("serializable");
        script.handle_json(&json);
        Ok(())
    }
}

#[tokio::test]
async fn test_shell_settings_survive_reload() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut shell =
        AccessibilityShell::new(Page::new(), FileSettingsStore::new(temp_dir.path()), 40);
    shell.load().await;
    shell
        .set_vision_type(ColorVisionType::Deuteranopia)
        .await
        .expect("Failed to save vision type");
    shell.set_correction(true).await.expect("Failed to save correction");
    shell
        .update_dyslexia(DyslexiaSettings {
            is_enabled: true,
            font_family: FontFamily::Atkinson,
            bionic_reading: true,
            ..DyslexiaSettings::default()
        })
        .await
        .expect("Failed to save dyslexia settings");
    drop(shell);

    let mut reloaded =
        AccessibilityShell::new(Page::new(), FileSettingsStore::new(temp_dir.path()), 40);
    let state = reloaded.load().await.clone();

    assert_eq!(state.vision.color_vision_type, ColorVisionType::Deuteranopia);
    assert!(state.vision.correction_enabled);
    assert_eq!(state.dyslexia.font_family, FontFamily::Atkinson);
    assert_eq!(
        reloaded.current_filter(),
        css_filter(ColorVisionType::Deuteranopia, true)
    );
    let body = reloaded.document().body();
    assert!(reloaded.document().has_class(body, MODE_CLASS));
    assert!(temp_dir.path().join("settings.json").exists());
}

#[tokio::test]
async fn test_background_pushes_saved_settings_to_reachable_tabs() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let tabs = Arc::new(LocalTabs::open(3));
    let service =
        BackgroundService::new(FileSettingsStore::new(temp_dir.path()), Arc::clone(&tabs));

    let mut settings = PersistedSettings {
        vision_type: ColorVisionType::Tritanopia,
        ..PersistedSettings::default()
    };
    settings.dyslexia_settings.is_enabled = true;
    let report = service
        .update_settings(&settings)
        .await
        .expect("Failed to update settings");

    assert_eq!(report.filter.delivered, vec![TabId(1), TabId(2)]);
    assert_eq!(report.filter.skipped.len(), 1);
    assert_eq!(report.filter.skipped[0].0, TabId(0));
    assert_eq!(report.dyslexia.delivered.len(), 2);

    let expected = css_filter(ColorVisionType::Tritanopia, false).map(str::to_string);
    assert_eq!(tabs.filter_of(1), expected);
    assert_eq!(tabs.filter_of(2), expected);
    assert_eq!(tabs.filter_of(0), None);
    assert!(tabs.dyslexia_active(2));

    let stored = FileSettingsStore::new(temp_dir.path())
        .load()
        .await
        .expect("Failed to load settings");
    assert_eq!(stored, settings);

    // single-tab sync on page load
    assert!(service.sync_tab(TabId(1)).await);
    assert!(!service.sync_tab(TabId(0)).await);
}

#[tokio::test]
async fn test_disabling_via_background_reverts_tabs() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let tabs = Arc::new(LocalTabs::open(2));
    let service =
        BackgroundService::new(FileSettingsStore::new(temp_dir.path()), Arc::clone(&tabs));

    let mut settings = PersistedSettings::default();
    settings.dyslexia_settings.is_enabled = true;
    service.update_settings(&settings).await.expect("Failed to enable");
    assert!(tabs.dyslexia_active(1));

    settings.dyslexia_settings.is_enabled = false;
    service.update_settings(&settings).await.expect("Failed to disable");
    assert!(!tabs.dyslexia_active(1));
    assert_eq!(tabs.filter_of(1), None);
}

#[tokio::test(start_paused = true)]
async fn test_high_scores_persist_between_runners() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = Arc::new(FileHighScoreStore::new(temp_dir.path()));

    let mut runner = ExerciseRunner::new(
        ExerciseKind::PeripheralVision,
        MissPolicy::ResetCombo,
        Arc::clone(&store),
        Arc::new(SystemClock::new()),
    )
    .with_duration(5)
    .with_seed(3);
    let target = runner.start().await.expect("Failed to start").expect("target");
    runner.click(target.x, target.y).await;
    let first = runner.end_early().await.expect("outcome");
    assert_eq!(first.score, 150);
    assert!(first.is_new_high);

    let mut second_runner = ExerciseRunner::new(
        ExerciseKind::PeripheralVision,
        MissPolicy::ResetCombo,
        Arc::new(FileHighScoreStore::new(temp_dir.path())),
        Arc::new(SystemClock::new()),
    )
    .with_duration(1);
    let mut outcomes = second_runner.subscribe();
    second_runner.start().await.expect("Failed to start");
    let second = tokio::time::timeout(Duration::from_secs(5), outcomes.wait_for(Option::is_some))
        .await
        .expect("timer ended the session")
        .expect("runner alive")
        .clone()
        .expect("outcome");
    assert_eq!(second.previous_high, Some(150));
    assert_eq!(second.high_score, 150);
    assert!(!second.is_new_high);

    let stored = store
        .get("peripheral-vision")
        .await
        .expect("Failed to read scores")
        .expect("score stored");
    assert_eq!(stored.score, 150);
}
