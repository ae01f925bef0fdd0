mod common;

use std::net::TcpListener;

use common::{Harness, MockBackend};
use employee_portal::api::{
    AdminRegistration, ApiClients, ApiError, EmployeeRegistration, HttpGateway,
};
use employee_portal::models::EmployeeUpdate;
use employee_portal::session::{Role, SessionStore};
use reqwest::Url;

fn clients(backend: &MockBackend, sessions: &SessionStore) -> ApiClients {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    ApiClients::new(HttpGateway::with_client(
        client,
        backend.base_url.clone(),
        sessions.clone(),
    ))
}

#[actix_web::test]
async fn test_list_employees_accepts_bare_array() {
    let backend = MockBackend::start().await;
    let harness = Harness::new(&backend);
    harness.login_admin();
    let api = clients(&backend, &harness.sessions);

    let employees = api.employees.list().await.unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].id, "665f1c2e9b1e8a0012345678");
    assert_eq!(employees[1].employee_id, "EMP002");
    backend.stop().await;
}

#[actix_web::test]
async fn test_get_employee_unwraps_data() {
    let backend = MockBackend::start().await;
    let harness = Harness::new(&backend);
    harness.login_admin();
    let api = clients(&backend, &harness.sessions);

    let employee = api
        .employees
        .get("665f1c2e9b1e8a0087654321")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(employee.name, "Ravi Kumar");

    let missing = api.employees.get("nope").await.unwrap_err();
    assert_eq!(missing.status(), Some(404));
    assert_eq!(missing.user_message(), "Employee not found");
    backend.stop().await;
}

#[actix_web::test]
async fn test_update_sends_only_present_fields() {
    let backend = MockBackend::start().await;
    let harness = Harness::new(&backend);
    harness.login_admin();
    let api = clients(&backend, &harness.sessions);

    let update = EmployeeUpdate {
        department: Some("Platform".to_string()),
        ..Default::default()
    };
    let message = api.employees.update("abc", &update).await.unwrap();
    assert_eq!(message.as_deref(), Some("Employee updated"));

    let request = backend.state.requests().pop().unwrap();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/employees/abc");
    assert_eq!(request.body, serde_json::json!({"department": "Platform"}));
    backend.stop().await;
}

#[actix_web::test]
async fn test_missing_session_sends_nothing() {
    let backend = MockBackend::start().await;
    let sessions = SessionStore::in_memory();
    let api = clients(&backend, &sessions);

    let err = api.employees.list().await.unwrap_err();
    assert!(matches!(err, ApiError::MissingSession(Role::Admin)));
    assert!(err.requires_login());

    let err = api.salary_slips.current("EMP001").await.unwrap_err();
    assert!(matches!(err, ApiError::MissingSession(Role::Employee)));
    assert_eq!(backend.state.total(), 0);
    backend.stop().await;
}

#[actix_web::test]
async fn test_plain_text_error_body_is_the_message() {
    let backend = MockBackend::start().await;
    let api = clients(&backend, &SessionStore::in_memory());

    let registration = AdminRegistration {
        name: "Root".to_string(),
        email: "root@example.com".to_string(),
        password: "secret1".to_string(),
    };
    let err = api.auth.admin_register(&registration).await.unwrap_err();
    assert_eq!(err.user_message(), "Email already registered");
    backend.stop().await;
}

#[actix_web::test]
async fn test_registration_without_token_stores_nothing() {
    let backend = MockBackend::start().await;
    let sessions = SessionStore::in_memory();
    let api = clients(&backend, &sessions);

    let registration = EmployeeRegistration {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        password: "secret1".to_string(),
        department: "Engineering".to_string(),
        employee_id: "EMP001".to_string(),
        ..Default::default()
    };
    let session = api.auth.employee_register(&registration).await.unwrap();
    assert!(session.is_none());
    assert!(sessions.get(Role::Employee).is_none());

    let request = backend.state.requests().pop().unwrap();
    assert_eq!(request.body["employeeId"], "EMP001");
    assert_eq!(request.body["phoneNumber"], "");
    backend.stop().await;
}

#[actix_web::test]
async fn test_wrong_password_keeps_server_message() {
    let backend = MockBackend::start().await;
    let sessions = SessionStore::in_memory();
    let api = clients(&backend, &sessions);

    let err = api
        .auth
        .admin_login("root@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 401, .. }));
    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(!err.requires_login());
    assert!(sessions.get(Role::Admin).is_none());
    backend.stop().await;
}

#[actix_web::test]
async fn test_offer_letter_absent_is_none() {
    let backend = MockBackend::start().await;
    let harness = Harness::new(&backend);
    harness.login_employee();
    let api = clients(&backend, &harness.sessions);

    assert!(api.offer_letters.fetch("EMP404").await.unwrap().is_none());
    let letter = api.offer_letters.fetch("EMP001").await.unwrap().unwrap();
    assert_eq!(letter.hiring_manager, "Sam Lee");
    assert!(letter.generated_at.is_some());
    backend.stop().await;
}

#[actix_web::test]
async fn test_unreachable_backend_is_no_response() {
    // Grab a free port and release it so nothing is listening there.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let sessions = SessionStore::in_memory();
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let gateway = HttpGateway::with_client(
        client,
        Url::parse(&format!("http://127.0.0.1:{port}/api")).unwrap(),
        sessions,
    );
    let api = ApiClients::new(gateway);

    let err = api
        .auth
        .employee_login("jane@example.com", "secret1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NoResponse(_)));
    assert_eq!(
        err.user_message(),
        "No response from server. Please check your connection."
    );
}
