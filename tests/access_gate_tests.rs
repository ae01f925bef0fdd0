mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{Harness, MockBackend, BlankRasterizer};
use employee_portal::api::ApiError;
use employee_portal::gate::Route;
use employee_portal::notify::Level;
use employee_portal::session::{Role, SessionStore};
use employee_portal::views::{
    AdminDashboard, AdminLoginForm, AuthView, EmployeeLoginForm, EmployeeOfferLetterView,
    EmployeeSalarySlipView, ViewError,
};

#[actix_web::test]
async fn test_protected_views_without_session_make_no_requests() {
    let backend = MockBackend::start().await;
    let harness = Harness::new(&backend);

    let admin = AdminDashboard::mount(harness.ctx.clone());
    assert!(matches!(admin, Err(ViewError::Redirected(Route::Entry))));

    let letter = EmployeeOfferLetterView::mount(harness.ctx.clone());
    assert!(matches!(letter, Err(ViewError::Redirected(Route::Entry))));

    let slip = EmployeeSalarySlipView::mount(harness.ctx.clone());
    assert!(matches!(slip, Err(ViewError::Redirected(Route::Entry))));

    assert_eq!(backend.state.total(), 0);
    assert_eq!(harness.routes.history(), vec![Route::Entry; 3]);
    assert_eq!(harness.notes.count(Level::Error), 3);
    backend.stop().await;
}

#[actix_web::test]
async fn test_unauthorized_response_clears_session_and_stops_requests() {
    let backend = MockBackend::start().await;
    let harness = Harness::new(&backend);
    harness.login_admin();
    backend.state.reject_tokens.store(true, Ordering::SeqCst);

    let dashboard = AdminDashboard::mount(harness.ctx.clone()).unwrap();
    let err = dashboard.refresh().await.unwrap_err();

    assert!(matches!(err, ViewError::Remote(ApiError::Unauthorized)));
    assert!(err.redirected());
    assert!(harness.sessions.get(Role::Admin).is_none());
    assert_eq!(harness.routes.last(), Some(Route::Entry));
    assert_eq!(
        harness.notes.last(),
        Some((Level::Error, "Session expired. Please login again.".to_string()))
    );

    // The stale token is never sent again.
    let err = dashboard.refresh().await.unwrap_err();
    assert!(matches!(
        err,
        ViewError::Remote(ApiError::MissingSession(Role::Admin))
    ));
    assert_eq!(backend.state.count("GET", "/employees"), 1);
    backend.stop().await;
}

#[actix_web::test]
async fn test_unauthorized_for_one_role_keeps_the_other() {
    let backend = MockBackend::start().await;
    let harness = Harness::new(&backend);
    harness.login_admin();
    harness.login_employee();
    backend.state.reject_tokens.store(true, Ordering::SeqCst);

    let view = EmployeeSalarySlipView::mount(harness.ctx.clone()).unwrap();
    assert!(view.load().await.is_err());

    assert!(harness.sessions.get(Role::Employee).is_none());
    assert!(harness.sessions.get(Role::Admin).is_some());
    backend.stop().await;
}

#[actix_web::test]
async fn test_login_persists_session_and_attaches_bearer() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let harness = Harness::with_sessions(
        &backend,
        Arc::new(BlankRasterizer),
        SessionStore::on_disk(dir.path()),
    );

    let form = EmployeeLoginForm {
        email: "jane@example.com".to_string(),
        password: "secret1".to_string(),
    };
    let session = AuthView::new(harness.ctx.clone())
        .employee_login(&form)
        .await
        .unwrap();
    assert_eq!(session.employee_id(), "EMP001");
    assert_eq!(harness.routes.last(), Some(Route::EmployeeHome));

    // A fresh store over the same directory sees the session.
    let reopened = SessionStore::on_disk(dir.path());
    let stored = reopened.get(Role::Employee).unwrap();
    assert_eq!(stored.token, "employee-token");
    assert_eq!(stored.profile.extra["_id"], "665f1c2e9b1e8a0012345678");

    let view = EmployeeSalarySlipView::mount(harness.ctx.clone()).unwrap();
    view.load().await.unwrap();
    let requests = backend.state.requests();
    let fetch = requests
        .iter()
        .find(|r| r.path == "/salary-slips/employee/EMP001")
        .unwrap();
    assert_eq!(fetch.authorization.as_deref(), Some("Bearer employee-token"));

    let login = requests.iter().find(|r| r.path == "/auth/employee/login").unwrap();
    assert_eq!(login.authorization, None);
    backend.stop().await;
}

#[actix_web::test]
async fn test_logout_clears_session_without_request() {
    let backend = MockBackend::start().await;
    let harness = Harness::new(&backend);
    harness.login_admin();

    let dashboard = AdminDashboard::mount(harness.ctx.clone()).unwrap();
    dashboard.logout().unwrap();

    assert!(harness.sessions.get(Role::Admin).is_none());
    assert_eq!(harness.routes.last(), Some(Route::Entry));
    assert_eq!(backend.state.total(), 0);
    backend.stop().await;
}

#[actix_web::test]
async fn test_rejected_login_is_not_a_session_expiry() {
    let backend = MockBackend::start().await;
    let harness = Harness::new(&backend);
    harness.login_employee();

    let form = AdminLoginForm {
        email: "root@example.com".to_string(),
        password: "wrong-password".to_string(),
    };
    let err = AuthView::new(harness.ctx.clone())
        .admin_login(&form)
        .await
        .unwrap_err();

    assert!(matches!(err, ViewError::Remote(ApiError::Server { status: 401, .. })));
    assert!(!err.redirected());
    assert_eq!(harness.notes.count(Level::Error), 1);
    assert_eq!(
        harness.notes.last(),
        Some((Level::Error, "Invalid credentials".to_string()))
    );
    assert!(harness.routes.history().is_empty());
    assert!(harness.sessions.get(Role::Employee).is_some());
    backend.stop().await;
}
