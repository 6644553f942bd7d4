use educare_client_core::{AuthState, Filter, NotificationKind, Table, UserAction};
use educare_shared::{
    errors::GatewayError,
    page::Page,
    req_args::LoginReqArgs,
    uac::{AuthError, Role, ValidationError},
};
use rstest::rstest;
use std::{future::Future as _, time::Duration};

use crate::helpers::{spawn_app, GatewayCall};

#[tokio::test]
async fn student_login_success() {
    // Arrange
    let app = spawn_app();

    // Act
    let identity = app.flow.login(app.student.login_args()).await.unwrap();

    // Assert
    assert_eq!(identity, app.student.identity);
    assert_eq!(app.flow.state(), AuthState::Authenticated);
    assert!(app.session().is_authenticated());
    assert!(!app.session().is_admin());
    assert_eq!(
        app.ui.redirects(),
        vec![(Page::UserDashboard, Duration::from_millis(1500))]
    );
    let notification = app.ui.last_notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(app.gateway.audit_actions(), vec!["login"]);
}

#[tokio::test]
async fn admin_login_lands_on_admin_dashboard() {
    // Arrange
    let app = spawn_app();
    let args = app.admin.login_args().requested_role(Some(Role::Admin));

    // Act
    app.flow.login(args).await.unwrap();

    // Assert
    assert!(app.session().is_admin());
    assert_eq!(
        app.ui.redirects(),
        vec![(Page::AdminDashboard, Duration::from_millis(1500))]
    );
}

#[tokio::test]
async fn audit_entry_carries_the_session_token() {
    // Arrange
    let app = spawn_app();

    // Act
    app.login_student().await;

    // Assert
    let token = app.session().current_record().unwrap().token().clone();
    let entries = app.gateway.rows(Table::ActivityLogs);
    assert_eq!(entries[0]["session_id"], token.as_ref());
    assert_eq!(entries[0]["user_id"], app.student.identity.id.as_ref());
}

#[rstest]
#[case::no_email("", "secret1")]
#[case::blank_email("   ", "secret1")]
#[case::no_password("kim@example.com", "")]
#[tokio::test]
async fn empty_input_fails_without_contacting_the_service(
    #[case] email: &str,
    #[case] password: &str,
) {
    // Arrange
    let app = spawn_app();
    let args = LoginReqArgs::new(email, password.to_string().into());

    // Act
    let outcome = app.flow.login(args).await;

    // Assert
    assert!(matches!(
        outcome.unwrap_err(),
        AuthError::Validation(ValidationError::MissingFields)
    ));
    assert!(app.gateway.calls().is_empty());
    assert_eq!(app.ui.last_error().unwrap(), "Please fill in all fields");
    assert_eq!(app.flow.state(), AuthState::Anonymous);
}

#[tokio::test]
async fn unknown_user_and_wrong_password_look_the_same() {
    // Arrange
    let app = spawn_app();
    let unknown = LoginReqArgs::new("nobody@example.com", "whatever".to_string().into());
    let wrong_password = app
        .student
        .login_args()
        .password("not-the-password".to_string().into());

    // Act
    let unknown = app.flow.login(unknown).await.unwrap_err();
    let wrong_password = app.flow.login(wrong_password).await.unwrap_err();

    // Assert
    assert!(unknown.is_authentication_failure());
    assert_eq!(unknown.to_string(), wrong_password.to_string());
    assert_eq!(unknown.to_string(), AuthError::InvalidCredentials.to_string());
    assert!(!app.session().is_authenticated());
    assert_eq!(app.flow.state(), AuthState::Anonymous);
    assert!(app.ui.redirects().is_empty());
}

#[tokio::test]
async fn student_asking_for_admin_is_denied() {
    // Arrange
    let app = spawn_app();
    let args = app.student.login_args().requested_role(Some(Role::Admin));

    // Act
    let err = app.flow.login(args).await.unwrap_err();

    // Assert
    assert!(err.is_authorization_failure());
    assert_ne!(err.to_string(), AuthError::InvalidCredentials.to_string());
    assert_eq!(
        app.ui.last_error().unwrap(),
        "Access denied. Admin privileges required."
    );
    assert!(!app.session().is_authenticated());
    assert!(app.storage.is_empty());
    assert!(app.gateway.audit_actions().is_empty());
}

#[tokio::test]
async fn denied_login_signs_the_gateway_out() {
    // Arrange
    let app = spawn_app();
    let args = app.student.login_args().requested_role(Some(Role::Admin));

    // Act
    let err = app.flow.login(args).await.unwrap_err();

    // Assert
    assert!(err.is_authorization_failure());
    assert_eq!(
        app.gateway.calls(),
        vec![
            GatewayCall::VerifyCredentials {
                email: app.student.email.clone()
            },
            GatewayCall::QueryRows {
                table: Table::Users,
                filter: Filter::new().eq("email", app.student.email.as_str()).limit(2),
            },
            GatewayCall::SignOut,
        ]
    );
    assert_eq!(app.gateway.signed_in_as(), None);
}

#[tokio::test]
async fn denied_login_does_not_act_as_the_refused_user() {
    // Arrange
    let app = spawn_app();
    app.login_admin().await;
    let args = app.student.login_args().requested_role(Some(Role::Admin));

    // Act
    app.flow.login(args).await.unwrap_err();

    // Assert
    assert_ne!(app.gateway.signed_in_as(), Some(app.student.email.clone()));
    assert_eq!(app.session().current_identity(), Some(app.admin.identity.clone()));
}

#[tokio::test]
async fn verified_credentials_without_profile_are_signed_out() {
    // Arrange
    let app = spawn_app();
    app.gateway.add_credentials("ghost@example.com", "secret1");
    let args = LoginReqArgs::new("ghost@example.com", "secret1".to_string().into());

    // Act
    let err = app.flow.login(args).await.unwrap_err();

    // Assert
    assert!(err.is_authentication_failure());
    assert_eq!(app.gateway.signed_in_as(), None);
    assert!(!app.session().is_authenticated());
}

#[tokio::test]
async fn successful_login_stays_signed_in() {
    // Arrange
    let app = spawn_app();

    // Act
    app.login_student().await;

    // Assert
    assert_eq!(app.gateway.signed_in_as(), Some(app.student.email.clone()));
    assert!(!app.gateway.calls().contains(&GatewayCall::SignOut));
}

#[tokio::test]
async fn admin_may_use_the_student_form() {
    // Arrange
    let app = spawn_app();
    let args = app.admin.login_args().requested_role(Some(Role::Student));

    // Act
    let identity = app.flow.login(args).await.unwrap();

    // Assert
    assert!(identity.is_admin());
}

#[tokio::test]
async fn transport_failure_is_not_reported_as_bad_credentials() {
    // Arrange
    let app = spawn_app();
    app.gateway.fail_all(GatewayError::Unreachable("connection refused".into()));

    // Act
    let err = app.flow.login(app.student.login_args()).await.unwrap_err();

    // Assert
    assert!(matches!(err, AuthError::Transport(_)));
    assert!(!err.is_authentication_failure());
    let message = app.ui.last_error().unwrap();
    assert!(message.contains("connection refused"), "{message}");
    assert_ne!(message, AuthError::InvalidCredentials.to_string());
}

#[tokio::test]
async fn ambiguous_user_rows_fail_authentication() {
    // Arrange
    let app = spawn_app();
    app.gateway.duplicate_user_row(&app.student.identity);

    // Act
    let err = app.flow.login(app.student.login_args()).await.unwrap_err();

    // Assert
    assert!(err.is_authentication_failure());
    assert!(!app.session().is_authenticated());
    assert_eq!(app.gateway.signed_in_as(), None);
}

#[tokio::test]
async fn audit_failure_does_not_fail_login() {
    // Arrange
    let app = spawn_app();
    app.gateway.fail_inserts(
        Table::ActivityLogs,
        GatewayError::Server {
            status: 500,
            message: "audit table offline".into(),
        },
    );

    // Act
    let outcome = app.flow.login(app.student.login_args()).await;

    // Assert
    assert!(outcome.is_ok());
    assert!(app.session().is_authenticated());
    assert!(app.ui.last_error().is_none());
}

#[tokio::test]
async fn double_submit_makes_one_request() {
    // Arrange
    let app = spawn_app();

    // Act
    let (first, second) = tokio::join!(
        app.flow.login(app.student.login_args()),
        app.flow.login(app.student.login_args())
    );

    // Assert
    assert!(first.is_ok());
    assert!(matches!(second.unwrap_err(), AuthError::Busy));
    assert_eq!(app.gateway.verify_calls(), 1);
    assert!(app.flow.is_allowed_to_submit());
}

#[tokio::test]
async fn busy_indicator_cleared_after_failure() {
    // Arrange
    let app = spawn_app();
    app.gateway.fail_all(GatewayError::TimedOut);

    // Act
    let _ = app.flow.login(app.student.login_args()).await;

    // Assert
    assert_eq!(
        app.ui.busy_events(),
        vec![(UserAction::Login, true), (UserAction::Login, false)]
    );
    assert!(!app.ui.is_busy(UserAction::Login));
    assert!(app.flow.is_allowed_to_submit());
}

#[tokio::test]
async fn busy_indicator_cleared_when_login_is_abandoned() {
    // Arrange
    let app = spawn_app();

    // Act - Dropped after the first round trip started
    {
        let login = app.flow.login(app.student.login_args());
        let mut login = std::pin::pin!(login);
        let waker = futures::task::noop_waker();
        let mut cx = std::task::Context::from_waker(&waker);
        assert!(login.as_mut().poll(&mut cx).is_pending());
        assert!(app.ui.is_busy(UserAction::Login));
    }

    // Assert
    assert!(!app.ui.is_busy(UserAction::Login));
    assert!(app.flow.is_allowed_to_submit());
    assert_eq!(
        app.gateway.calls(),
        vec![GatewayCall::VerifyCredentials {
            email: app.student.email.clone()
        }]
    );
}

#[tokio::test]
async fn logged_in_visitor_skips_the_login_page() {
    // Arrange
    let app = spawn_app();
    app.login_admin().await;

    // Act
    let page = app.flow.resume_existing_session();

    // Assert
    assert_eq!(page, Some(Page::AdminDashboard));
    assert_eq!(
        app.ui.redirects().last(),
        Some(&(Page::AdminDashboard, Duration::ZERO))
    );
}

#[tokio::test]
async fn anonymous_visitor_stays_on_the_login_page() {
    // Arrange
    let app = spawn_app();

    // Act
    let page = app.flow.resume_existing_session();

    // Assert
    assert_eq!(page, None);
    assert!(app.ui.redirects().is_empty());
}
