use educare_client_core::{AuthState, NavState, UserAction};
use educare_shared::{errors::GatewayError, page::Page};
use std::time::Duration;

use crate::helpers::{spawn_app, GatewayCall};

#[tokio::test]
async fn logout_round_trip() {
    // Arrange
    let app = spawn_app();
    app.login_student().await;
    assert!(app.nav_state().is_logged_in());

    // Act
    app.flow.logout().await.unwrap();

    // Assert
    assert!(!app.session().is_authenticated());
    assert_eq!(app.flow.state(), AuthState::Anonymous);
    assert!(app.storage.is_empty());
    assert_eq!(app.nav_state(), NavState::LoggedOut);
    assert_eq!(app.gateway.audit_actions(), vec!["login", "logout"]);
    assert_eq!(app.gateway.calls().last(), Some(&GatewayCall::SignOut));
    assert_eq!(
        app.ui.redirects().last(),
        Some(&(Page::Login, Duration::from_millis(1000)))
    );
    assert_eq!(
        app.ui.last_notification().unwrap().message,
        "Logged out successfully!"
    );
}

#[tokio::test]
async fn logout_without_session_still_returns_to_login() {
    // Arrange
    let app = spawn_app();

    // Act
    app.flow.logout().await.unwrap();
    app.flow.logout().await.unwrap();

    // Assert
    assert!(app.gateway.audit_actions().is_empty());
    assert_eq!(
        app.ui.redirects(),
        vec![
            (Page::Login, Duration::from_millis(1000)),
            (Page::Login, Duration::from_millis(1000))
        ]
    );
}

#[tokio::test]
async fn logout_completes_when_audit_fails() {
    // Arrange
    let app = spawn_app();
    app.login_student().await;
    app.gateway.fail_all(GatewayError::Unreachable("offline".into()));

    // Act
    let outcome = app.flow.logout().await;

    // Assert
    assert!(outcome.is_ok());
    assert!(!app.session().is_authenticated());
    assert!(!app.ui.is_busy(UserAction::Logout));
}

#[tokio::test]
async fn other_tab_sees_logout_after_refresh() {
    // Arrange
    let app = spawn_app();
    app.login_admin().await;
    let (other_tab, _) = app.open_tab();
    assert!(other_tab.is_admin());

    // Act
    app.flow.logout().await.unwrap();
    other_tab.refresh();

    // Assert
    assert!(!other_tab.is_authenticated());
}
