use educare_client_core::{KeyValueStore as _, MemoryStorage, NavState, SessionRecord};
use educare_shared::{
    const_config::session::{
        legacy::{LEGACY_ALT_ROLE_KEY, LEGACY_ALT_TOKEN_KEY, LEGACY_ALT_USER_KEY, LEGACY_KEYS},
        SESSION_KEY,
    },
    page::Page,
    token::SessionToken,
    uac::Role,
};
use std::time::Duration;

use crate::helpers::{spawn_app, spawn_app_with_storage};

#[tokio::test]
async fn fresh_page_shows_logged_out_on_every_surface() {
    // Arrange
    let app = spawn_app();

    // Assert
    assert!(!app.session().is_authenticated());
    assert!(!app.session().is_admin());
    assert_eq!(app.session().current_identity(), None);
    assert_eq!(app.nav_state(), NavState::LoggedOut);
}

#[tokio::test]
async fn session_written_by_login_is_seen_by_another_tab() {
    // Arrange
    let app = spawn_app();

    // Act
    app.login_admin().await;
    let (other_tab, _) = app.open_tab();

    // Assert
    assert!(other_tab.is_authenticated());
    assert!(other_tab.is_admin());
    assert_eq!(other_tab.current_identity(), Some(app.admin.identity.clone()));
}

#[tokio::test]
async fn login_updates_every_surface_together() {
    // Arrange
    let app = spawn_app();

    // Act
    app.login_student().await;

    // Assert
    assert_eq!(
        app.nav_state(),
        NavState::LoggedIn {
            display_name: "Test Student".to_string(),
            role: Role::Student
        }
    );
}

#[tokio::test]
async fn corrupt_record_reads_as_logged_out_and_is_cleared() {
    // Arrange
    let storage = MemoryStorage::new();
    storage.set_item(SESSION_KEY, "{\"identity\":").unwrap();

    // Act
    let app = spawn_app_with_storage(storage);

    // Assert
    assert!(!app.session().is_authenticated());
    assert_eq!(app.nav_state(), NavState::LoggedOut);
    assert!(app.storage.is_empty());
    // A second read stays absent
    app.session().refresh();
    assert!(!app.session().is_authenticated());
}

#[tokio::test]
async fn legacy_layout_is_read_but_never_written() {
    // Arrange
    let app = spawn_app();
    let identity = serde_json::to_string(&app.admin.identity).unwrap();
    let storage = app.storage.clone();
    storage.set_item(LEGACY_ALT_USER_KEY, &identity).unwrap();
    storage.set_item(LEGACY_ALT_ROLE_KEY, "admin").unwrap();
    storage.set_item(LEGACY_ALT_TOKEN_KEY, "SESS_1700000000_abc").unwrap();

    // Act
    app.session().refresh();

    // Assert
    assert!(app.session().is_admin());
    assert_eq!(
        app.session().current_record().unwrap().token().as_ref(),
        "SESS_1700000000_abc"
    );
    assert_eq!(storage.get_item(SESSION_KEY).unwrap(), None);
}

#[tokio::test]
async fn establishing_a_session_replaces_legacy_layouts() {
    // Arrange
    let app = spawn_app();
    let storage = app.storage.clone();
    for key in LEGACY_KEYS {
        storage.set_item(key, "stale").unwrap();
    }
    let record = SessionRecord::new(app.student.identity.clone(), SessionToken::new_rand(), true);

    // Act
    app.session().establish(record.clone()).unwrap();

    // Assert
    assert_eq!(storage.keys(), vec![SESSION_KEY.to_string()]);
    let (other_tab, _) = app.open_tab();
    assert_eq!(other_tab.current_record().as_deref(), Some(&record));
}

#[tokio::test]
async fn refresh_picks_up_logout_in_another_tab() {
    // Arrange
    let app = spawn_app();
    app.login_student().await;
    let (other_tab, _) = app.open_tab();

    // Act
    other_tab.logout();

    // Assert - No implicit re-read
    assert!(app.session().is_authenticated());
    app.session().refresh();
    assert!(!app.session().is_authenticated());
    assert_eq!(app.nav_state(), NavState::LoggedOut);
}

#[tokio::test]
async fn logout_is_idempotent() {
    // Arrange
    let app = spawn_app();
    app.login_student().await;

    // Act
    app.session().logout();
    app.session().logout();

    // Assert
    assert!(app.storage.is_empty());
    assert!(!app.session().is_authenticated());
    let logout_redirects: Vec<_> = app
        .ui
        .redirects()
        .into_iter()
        .filter(|r| *r == (Page::Login, Duration::from_millis(1000)))
        .collect();
    assert_eq!(logout_redirects.len(), 2);
    assert_eq!(
        app.ui.last_notification().unwrap().message,
        "Logged out successfully!"
    );
}

#[tokio::test]
async fn late_surface_is_brought_up_to_date() {
    // Arrange
    let app = spawn_app();
    app.login_admin().await;
    let late = crate::helpers::RecordingSurface::default();

    // Act
    app.session().add_surface(late.clone());

    // Assert
    assert_eq!(late.times_shown(), 1);
    assert_eq!(late.last(), Some(app.nav_state()));
}
