#![allow(dead_code)]

use actix_web::{dev::ServerHandle, web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use parking_lot::Mutex;
use reqwest::Url;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use employee_portal::api::HttpGateway;
use employee_portal::document::DEFAULT_OFFER_MESSAGE;
use employee_portal::export::{DirectoryDelivery, ExportPipeline, RasterError, Rasterizer};
use employee_portal::gate::RouteLog;
use employee_portal::models::EmployeeRecord;
use employee_portal::notify::NotificationLog;
use employee_portal::render::{DocumentRenderer, VisualTree};
use employee_portal::session::{Profile, Role, Session, SessionStore};
use employee_portal::views::PortalContext;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const EMPLOYEE_TOKEN: &str = "employee-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Behaviour switches and the request log of the mock backend.
#[derive(Default)]
pub struct MockState {
    requests: Mutex<Vec<Recorded>>,
    /// Answer every bearer request with 401.
    pub reject_tokens: AtomicBool,
    /// Delay applied to mutations, in milliseconds.
    pub mutation_delay_ms: AtomicU64,
    /// Answer offer-letter and salary-slip fetches with 404.
    pub withdrawn: AtomicBool,
}

impl MockState {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn total(&self) -> usize {
        self.requests.lock().len()
    }
}

pub struct MockBackend {
    pub base_url: Url,
    pub state: web::Data<MockState>,
    handle: ServerHandle,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = web::Data::new(MockState::default());
        let data = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(dispatch))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind mock backend");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: Url::parse(&format!("http://{}/api", addr)).unwrap(),
            state,
            handle,
        }
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn bearer(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn dispatch(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let method = req.method().as_str().to_string();
    let path = req.path().trim_start_matches("/api").to_string();
    let authorization = bearer(&req);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    state.requests.lock().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    if !path.starts_with("/auth/") {
        let expected = matches!(
            authorization.as_deref(),
            Some("Bearer admin-token") | Some("Bearer employee-token")
        );
        if !expected || state.reject_tokens.load(Ordering::SeqCst) {
            return HttpResponse::Unauthorized().json(json!({"message": "Invalid token"}));
        }
    }

    if method != "GET" {
        let delay = state.mutation_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            actix_web::rt::time::sleep(Duration::from_millis(delay)).await;
        }
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if method == "GET" && state.withdrawn.load(Ordering::SeqCst) {
        match segments.as_slice() {
            ["offer-letter", _] => {
                return HttpResponse::NotFound().json(json!({"message": "Offer letter not found"}))
            }
            ["salary-slips", "employee", _] => {
                return HttpResponse::NotFound().json(json!({"message": "No salary slips found"}))
            }
            _ => {}
        }
    }
    match (method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "admin", "login"]) => {
            if body["password"] == "secret1" {
                HttpResponse::Ok().json(json!({
                    "token": ADMIN_TOKEN,
                    "name": "Root Admin",
                    "email": body["email"],
                }))
            } else {
                HttpResponse::Unauthorized().json(json!({"message": "Invalid credentials"}))
            }
        }
        ("POST", ["auth", "employee", "login"]) => HttpResponse::Ok().json(json!({
            "token": EMPLOYEE_TOKEN,
            "name": "Jane Doe",
            "email": body["email"],
            "department": "Engineering",
            "employeeId": "EMP001",
            "_id": "665f1c2e9b1e8a0012345678",
        })),
        ("POST", ["auth", "employee", "register"]) => {
            HttpResponse::Created().json(json!({"success": true, "message": "Employee registered"}))
        }
        ("POST", ["auth", "admin", "register"]) => {
            HttpResponse::BadRequest().body("Email already registered")
        }
        ("GET", ["employees"]) => HttpResponse::Ok().json(employees_json()),
        ("GET", ["employees", "admin", "employees", id]) => {
            match employees_json().as_array().and_then(|list| {
                list.iter().find(|e| e["_id"] == *id).cloned()
            }) {
                Some(employee) => HttpResponse::Ok().json(json!({"success": true, "data": employee})),
                None => HttpResponse::NotFound().json(json!({"message": "Employee not found"})),
            }
        }
        ("POST", ["employees"]) => {
            if body["employeeId"] == "EMP001" {
                HttpResponse::Conflict().json(json!({"message": "Employee ID already exists"}))
            } else {
                HttpResponse::Created().json(json!({"success": true, "message": "Employee created"}))
            }
        }
        ("PUT", ["employees", _id]) => {
            HttpResponse::Ok().json(json!({"success": true, "message": "Employee updated"}))
        }
        ("DELETE", ["employees", _id]) => {
            HttpResponse::Ok().json(json!({"success": true, "message": "Employee deleted"}))
        }
        ("POST", ["offer-letter", "create"]) => {
            HttpResponse::Created().json(json!({"success": true, "message": "Offer letter created"}))
        }
        ("GET", ["offer-letter", "EMP001"]) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "_id": "off-1",
                "employeeId": "EMP001",
                "name": "Jane Doe",
                "email": "jane@example.com",
                "position": "Engineering",
                "startDate": "2025-01-05T00:00:00.000Z",
                "salary": 600000,
                "hiringManager": "Sam Lee",
                "managerTitle": "CTO",
                "message": "We are pleased to offer you the position of Engineering.",
                "createdAt": "2025-01-01T09:30:00Z",
            }
        })),
        ("GET", ["offer-letter", _other]) => {
            HttpResponse::NotFound().json(json!({"message": "Offer letter not found"}))
        }
        ("PUT", ["employees", "admin", "offer-letter", _id, "status"]) => {
            HttpResponse::Ok().json(json!({"success": true, "message": "Status updated"}))
        }
        ("POST", ["employees", "apply-offer-letter"]) => {
            HttpResponse::Ok().json(json!({"success": true}))
        }
        ("POST", ["salary-slips"]) => {
            HttpResponse::Created().json(json!({"success": true, "message": "Salary slip saved"}))
        }
        ("GET", ["salary-slips", "employee", "EMP001"]) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": [
                slip_json("March", 53000),
                slip_json("February", 51000),
            ]
        })),
        ("POST", ["employees", "salary-slip"]) => {
            HttpResponse::Ok().json(json!({"success": false, "message": "Payroll is closed for March"}))
        }
        _ => HttpResponse::NotFound().json(json!({"message": "Not found"})),
    }
}

fn employees_json() -> Value {
    json!([
        {
            "_id": "665f1c2e9b1e8a0012345678",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "department": "Engineering",
            "employeeId": "EMP001",
            "startDate": "2025-01-05T00:00:00.000Z",
            "expectedSalary": 600000,
            "jobTitle": "Software Engineer"
        },
        {
            "_id": "665f1c2e9b1e8a0087654321",
            "name": "Ravi Kumar",
            "email": "ravi@example.com",
            "department": "Finance",
            "employeeId": "EMP002",
            "startDate": "2024-11-18",
            "expectedSalary": 480000
        }
    ])
}

fn slip_json(month: &str, net: i64) -> Value {
    json!({
        "_id": format!("slip-{}", month),
        "employeeName": "Jane Doe",
        "employeeId": "EMP001",
        "designation": "Engineer",
        "department": "Engineering",
        "month": month,
        "year": "2025",
        "basicSalary": 50000,
        "hra": 0,
        "allowances": 5000,
        "deductions": 2000,
        "netSalary": net
    })
}

/// Rasterizer returning a blank PNG.
pub struct BlankRasterizer;

#[async_trait]
impl Rasterizer for BlankRasterizer {
    async fn rasterize(&self, _tree: &VisualTree) -> Result<Vec<u8>, RasterError> {
        let mut png = Vec::new();
        DynamicImage::new_rgb8(38, 55)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        Ok(png)
    }
}

/// Rasterizer that always fails.
pub struct FailingRasterizer;

#[async_trait]
impl Rasterizer for FailingRasterizer {
    async fn rasterize(&self, _tree: &VisualTree) -> Result<Vec<u8>, RasterError> {
        Err(RasterError::Exit {
            code: 1,
            stderr: "error: file not found (searched at logo.svg)".to_string(),
        })
    }
}

pub struct Harness {
    pub ctx: PortalContext,
    pub sessions: SessionStore,
    pub routes: Arc<RouteLog>,
    pub notes: Arc<NotificationLog>,
    pub downloads: TempDir,
}

impl Harness {
    pub fn new(backend: &MockBackend) -> Self {
        Self::with_rasterizer(backend, Arc::new(BlankRasterizer))
    }

    pub fn with_rasterizer(backend: &MockBackend, rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self::with_sessions(backend, rasterizer, SessionStore::in_memory())
    }

    pub fn with_sessions(
        backend: &MockBackend,
        rasterizer: Arc<dyn Rasterizer>,
        sessions: SessionStore,
    ) -> Self {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let gateway = HttpGateway::with_client(client, backend.base_url.clone(), sessions.clone());
        let downloads = tempfile::tempdir().unwrap();
        let export = ExportPipeline::new(
            DocumentRenderer::new("PizeonFly", None),
            rasterizer,
            Arc::new(DirectoryDelivery::new(downloads.path())),
        );
        let routes = Arc::new(RouteLog::new());
        let notes = Arc::new(NotificationLog::new());

        Self {
            ctx: PortalContext::new(gateway, export, routes.clone(), notes.clone()),
            sessions,
            routes,
            notes,
            downloads,
        }
    }

    pub fn login_admin(&self) {
        self.sessions
            .save(&Session::new(
                Role::Admin,
                ADMIN_TOKEN,
                Profile {
                    name: "Root Admin".to_string(),
                    email: "root@example.com".to_string(),
                    ..Default::default()
                },
            ))
            .unwrap();
    }

    pub fn login_employee(&self) {
        self.sessions
            .save(&Session::new(
                Role::Employee,
                EMPLOYEE_TOKEN,
                Profile {
                    name: "Jane Doe".to_string(),
                    email: "jane@example.com".to_string(),
                    department: Some("Engineering".to_string()),
                    employee_id: Some("EMP001".to_string()),
                    ..Default::default()
                },
            ))
            .unwrap();
    }

    pub fn downloaded(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.downloads.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn jane() -> EmployeeRecord {
    EmployeeRecord {
        id: "665f1c2e9b1e8a0012345678".to_string(),
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        department: "Engineering".to_string(),
        employee_id: "EMP001".to_string(),
        start_date: Some("2025-01-05T00:00:00.000Z".to_string()),
        expected_salary: Some(Decimal::from(600000)),
        designation: Some("Software Engineer".to_string()),
    }
}

pub fn default_message() -> &'static str {
    DEFAULT_OFFER_MESSAGE
}
