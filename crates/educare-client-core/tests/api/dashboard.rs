use educare_client_core::{
    dashboard::{AdminDashboard, DashboardError, UserDashboard},
    NotificationKind, Table, UserAction,
};
use educare_shared::{
    activity::{ActivityCategory, ActivityKind},
    content::ContentKind,
    errors::GatewayError,
    req_args::{LoginReqArgs, NewUserReqArgs},
    uac::{AuthError, GateError, Role, ValidationError},
};
use educare_time::{Seconds, Timestamp};

use crate::helpers::{spawn_app, GatewayCall};

fn days_ago(days: u64) -> Timestamp {
    Timestamp::now().saturating_sub(Seconds::from_days(days))
}

#[tokio::test]
async fn admin_dashboard_totals() {
    // Arrange
    let app = spawn_app();
    app.gateway.add_user_created_at(
        "old@example.com",
        "secret1",
        "Old Timer",
        Role::Student,
        days_ago(30),
    );
    app.gateway.add_content("Algebra", "video", days_ago(2));
    app.gateway.add_content("Geometry", "document", days_ago(1));
    app.login_admin().await;

    // Act
    let dashboard = AdminDashboard::load(app.session(), &app.gateway)
        .await
        .unwrap();

    // Assert
    assert_eq!(dashboard.admin, app.admin.identity);
    assert_eq!(dashboard.stats.total_users, 3);
    assert_eq!(dashboard.stats.new_registrations, 2);
    assert_eq!(dashboard.stats.total_content, 2);
    let titles: Vec<_> = dashboard.content.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Geometry", "Algebra"]);
    assert_eq!(dashboard.users.last().unwrap().display_name(), "Old Timer");
}

#[tokio::test]
async fn admin_dashboard_activity_is_capped_newest_first() {
    // Arrange
    let app = spawn_app();
    for day in 1..=120 {
        app.gateway
            .add_activity(&app.student.identity, "course_enroll", days_ago(day));
    }
    app.login_admin().await;

    // Act
    let dashboard = AdminDashboard::load(app.session(), &app.gateway)
        .await
        .unwrap();

    // Assert
    assert_eq!(dashboard.activities.len(), 100);
    // The login just made is the newest entry
    assert_eq!(dashboard.activities[0].action, ActivityKind::Login);
    assert!(dashboard.activities[1].timestamp > dashboard.activities[2].timestamp);
    assert_eq!(dashboard.filter_activities(Some(ActivityKind::Login)).len(), 1);
}

#[tokio::test]
async fn admin_dashboard_filters() {
    // Arrange
    let app = spawn_app();
    app.gateway.add_content("Algebra intro", "video", days_ago(3));
    app.gateway.add_content("Algebra notes", "document", days_ago(2));
    app.login_admin().await;
    let dashboard = AdminDashboard::load(app.session(), &app.gateway)
        .await
        .unwrap();

    // Act
    let students = dashboard.filter_users("STUDENT");
    let notes = dashboard.filter_content("algebra", Some(ContentKind::Document));

    // Assert
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].email.as_ref(), app.student.email);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Algebra notes");
}

#[tokio::test]
async fn user_dashboard_shows_own_recent_activity() {
    // Arrange
    let app = spawn_app();
    for day in 1..=20 {
        app.gateway
            .add_activity(&app.student.identity, "lesson_complete", days_ago(day));
    }
    app.gateway
        .add_activity(&app.admin.identity, "upload", days_ago(1));
    app.login_student().await;

    // Act
    let dashboard = UserDashboard::load(app.session(), &app.gateway)
        .await
        .unwrap();

    // Assert
    assert_eq!(dashboard.identity, app.student.identity);
    assert_eq!(dashboard.activities.len(), 15);
    assert!(dashboard
        .activities
        .iter()
        .all(|a| a.user_id.as_ref() == Some(&app.student.identity.id)));
    assert_eq!(dashboard.activities[0].action, ActivityKind::Login);
    assert_eq!(
        dashboard
            .filter_by_category(Some(ActivityCategory::Progress))
            .len(),
        14
    );
}

#[tokio::test]
async fn failed_load_notifies_and_clears_indicator() {
    // Arrange
    let app = spawn_app();
    app.login_student().await;
    app.gateway.fail_all(GatewayError::Server {
        status: 503,
        message: "maintenance".into(),
    });

    // Act
    let outcome = UserDashboard::load(app.session(), &app.gateway).await;

    // Assert
    assert!(matches!(outcome.unwrap_err(), DashboardError::Gateway(_)));
    let notification = app.ui.last_notification().unwrap();
    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(notification.message.contains("maintenance"));
    assert!(!app.ui.is_busy(UserAction::LoadDashboard));
    assert_eq!(app.gateway.calls_to(Table::ActivityLogs), 2);
}

fn new_user(email: &str, role: Role) -> NewUserReqArgs {
    NewUserReqArgs {
        full_name: "Lee Park".into(),
        email: email.into(),
        phone: "+15550111".into(),
        password: "secret1".to_string().into(),
        role,
    }
}

#[tokio::test]
async fn admin_creates_a_user() {
    // Arrange
    let app = spawn_app();
    app.login_admin().await;
    let mut dashboard = AdminDashboard::load(app.session(), &app.gateway)
        .await
        .unwrap();
    let users_before = dashboard.stats.total_users;

    // Act
    let identity = dashboard
        .create_user(
            app.session(),
            &app.gateway,
            new_user("lee@example.com", Role::Admin),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(identity.email.as_ref(), "lee@example.com");
    assert_eq!(identity.role, Role::Admin);
    assert_eq!(dashboard.users.first(), Some(&identity));
    assert_eq!(dashboard.stats.total_users, users_before + 1);
    let stored = app.gateway.rows(Table::Users);
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().all(|row| row.get("password").is_none()));
    assert_eq!(app.gateway.audit_actions(), vec!["login", "user_creation"]);
    let audit = app.gateway.rows(Table::ActivityLogs);
    assert_eq!(audit[1]["user_id"], app.admin.identity.id.as_ref());
    assert_eq!(audit[1]["description"], "Created user: Lee Park");
    assert_eq!(
        app.ui.last_notification().unwrap().message,
        "User created successfully"
    );
    assert!(!app.ui.is_busy(UserAction::CreateUser));
    // The admin keeps acting as themselves
    assert_eq!(app.gateway.signed_in_as(), Some(app.admin.email.clone()));
}

#[tokio::test]
async fn created_user_can_log_in() {
    // Arrange
    let app = spawn_app();
    app.login_admin().await;
    let mut dashboard = AdminDashboard::load(app.session(), &app.gateway)
        .await
        .unwrap();
    dashboard
        .create_user(
            app.session(),
            &app.gateway,
            new_user("lee@example.com", Role::Student),
        )
        .await
        .unwrap();
    app.flow.logout().await.unwrap();
    let args = LoginReqArgs::new("lee@example.com", "secret1".to_string().into());

    // Act
    let identity = app.flow.login(args).await.unwrap();

    // Assert
    assert_eq!(identity.display_name(), "Lee Park");
}

#[tokio::test]
async fn creating_an_existing_email_is_refused() {
    // Arrange
    let app = spawn_app();
    app.login_admin().await;
    let mut dashboard = AdminDashboard::load(app.session(), &app.gateway)
        .await
        .unwrap();
    let users_before = dashboard.users.len();

    // Act
    let err = dashboard
        .create_user(
            app.session(),
            &app.gateway,
            new_user(&app.student.email, Role::Student),
        )
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(
        err,
        DashboardError::Account(AuthError::AlreadyRegistered)
    ));
    assert_eq!(app.ui.last_error().unwrap(), "Email already registered");
    assert!(!app
        .gateway
        .calls()
        .iter()
        .any(|c| matches!(c, GatewayCall::RegisterCredentials { .. })));
    assert_eq!(dashboard.users.len(), users_before);
    assert!(!app.ui.is_busy(UserAction::CreateUser));
}

#[tokio::test]
async fn invalid_new_user_makes_no_request() {
    // Arrange
    let app = spawn_app();
    app.login_admin().await;
    let mut dashboard = AdminDashboard::load(app.session(), &app.gateway)
        .await
        .unwrap();
    let calls_before = app.gateway.calls().len();
    let mut args = new_user("lee@example.com", Role::Student);
    args.password = "abc".to_string().into();

    // Act
    let err = dashboard
        .create_user(app.session(), &app.gateway, args)
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(
        err,
        DashboardError::Account(AuthError::Validation(ValidationError::PasswordTooShort { .. }))
    ));
    assert_eq!(app.gateway.calls().len(), calls_before);
}

#[tokio::test]
async fn only_admins_create_users() {
    // Arrange
    let app = spawn_app();
    app.login_admin().await;
    let mut dashboard = AdminDashboard::load(app.session(), &app.gateway)
        .await
        .unwrap();
    app.flow.logout().await.unwrap();
    app.login_student().await;
    let calls_before = app.gateway.calls().len();

    // Act
    let err = dashboard
        .create_user(
            app.session(),
            &app.gateway,
            new_user("lee@example.com", Role::Admin),
        )
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(
        err,
        DashboardError::Denied(GateError::InsufficientRole { .. })
    ));
    assert_eq!(app.gateway.calls().len(), calls_before);
    assert_eq!(app.gateway.rows(Table::Users).len(), 2);
}
