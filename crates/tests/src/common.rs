use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use client::api::REQUEST_ID_HEADER;
use client::ApiClient;
use serde_json::{json, Value};
use shared_types::{ApiConfig, Location, SessionIdentity};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use wizard::{DataUrlPreviews, MemoryStore, PickedFile, Wizard};

pub const LOCATIONS: &str = "locations";
pub const EVIDENCE: &str = "evidence";
pub const DOCUMENT: &str = "document";
pub const REPORT: &str = "report";
pub const REPORTS: &str = "reports";
pub const DELETE: &str = "delete";
pub const LOGIN: &str = "login";

/// One multipart field as the mock received it.
#[derive(Debug, Clone, Default)]
pub struct RecordedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A request as the mock received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub route: &'static str,
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub request_id: Option<String>,
    pub parts: Vec<RecordedPart>,
    pub json: Option<Value>,
}

impl RecordedRequest {
    /// Text value of a multipart field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.parts
            .iter()
            .find(|p| p.name == name && p.file_name.is_none())
            .map(|p| String::from_utf8_lossy(&p.bytes).to_string())
    }

    /// File parts named `name`, in send order.
    pub fn files(&self, name: &str) -> Vec<&RecordedPart> {
        self.parts
            .iter()
            .filter(|p| p.name == name && p.file_name.is_some())
            .collect()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

#[derive(Default)]
struct Inner {
    requests: Vec<RecordedRequest>,
    queued: HashMap<&'static str, VecDeque<Reply>>,
    defaults: HashMap<&'static str, Reply>,
}

/// In-process stand-in for the remote report service.
///
/// Every request is recorded. Each route answers with queued replies first
/// and falls back to a per-route default.
#[derive(Clone)]
pub struct MockService {
    inner: Arc<Mutex<Inner>>,
    pub base_url: String,
}

impl MockService {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer every call to `route` with this status and JSON body.
    pub fn respond(&self, route: &'static str, status: StatusCode, body: Value) {
        self.respond_raw(route, status, &body.to_string());
    }

    pub fn respond_raw(&self, route: &'static str, status: StatusCode, body: &str) {
        self.lock().defaults.insert(
            route,
            Reply {
                status,
                body: body.to_string(),
            },
        );
    }

    /// Answer the next call to `route` only.
    pub fn respond_once(&self, route: &'static str, status: StatusCode, body: Value) {
        self.lock().queued.entry(route).or_default().push_back(Reply {
            status,
            body: body.to_string(),
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn requests_to(&self, route: &'static str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.route == route).collect()
    }

    pub fn last(&self, route: &'static str) -> RecordedRequest {
        self.requests_to(route)
            .pop()
            .unwrap_or_else(|| panic!("no request to {route}"))
    }

    fn record(&self, request: RecordedRequest) -> (StatusCode, String) {
        let mut inner = self.lock();
        let route = request.route;
        inner.requests.push(request);
        let reply = inner
            .queued
            .get_mut(route)
            .and_then(VecDeque::pop_front)
            .or_else(|| inner.defaults.get(route).cloned())
            .unwrap_or(Reply {
                status: StatusCode::OK,
                body: "{}".to_string(),
            });
        (reply.status, reply.body)
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: 5,
        })
        .unwrap()
    }
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn read_parts(mut multipart: Multipart) -> Vec<RecordedPart> {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(RecordedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
    parts
}

fn simple(
    route: &'static str,
    method: Method,
    path: String,
    query: HashMap<String, String>,
    headers: &HeaderMap,
) -> RecordedRequest {
    RecordedRequest {
        route,
        method,
        path,
        query,
        request_id: request_id(headers),
        parts: Vec::new(),
        json: None,
    }
}

async fn locations(State(mock): State<MockService>, headers: HeaderMap) -> (StatusCode, String) {
    let request = simple(LOCATIONS, Method::GET, "/locations".into(), HashMap::new(), &headers);
    mock.record(request)
}

async fn evidence(
    State(mock): State<MockService>,
    headers: HeaderMap,
    multipart: Multipart,
) -> (StatusCode, String) {
    let mut request = simple(EVIDENCE, Method::POST, "/evidence/upload".into(), HashMap::new(), &headers);
    request.parts = read_parts(multipart).await;
    mock.record(request)
}

async fn document(
    State(mock): State<MockService>,
    headers: HeaderMap,
    multipart: Multipart,
) -> (StatusCode, String) {
    let mut request = simple(DOCUMENT, Method::POST, "/document/upload".into(), HashMap::new(), &headers);
    request.parts = read_parts(multipart).await;
    mock.record(request)
}

async fn report(
    State(mock): State<MockService>,
    Path(session): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let request = simple(REPORT, Method::GET, format!("/report/generate/{session}"), query, &headers);
    mock.record(request)
}

async fn reports(
    State(mock): State<MockService>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let request = simple(REPORTS, Method::GET, "/reports".into(), query, &headers);
    mock.record(request)
}

async fn delete_report(
    State(mock): State<MockService>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let request = simple(DELETE, Method::DELETE, format!("/reports/{id}"), query, &headers);
    mock.record(request)
}

async fn login(
    State(mock): State<MockService>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let mut request = simple(LOGIN, Method::POST, "/auth/login".into(), HashMap::new(), &headers);
    request.json = Some(body);
    mock.record(request)
}

/// Start the mock on an ephemeral port.
pub async fn spawn_mock() -> MockService {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("mock address");
    let mock = MockService {
        inner: Arc::new(Mutex::new(Inner::default())),
        base_url: format!("http://{addr}"),
    };
    let app = Router::new()
        .route("/locations", get(locations))
        .route("/evidence/upload", post(evidence))
        .route("/document/upload", post(document))
        .route("/report/generate/{session}", get(report))
        .route("/reports", get(reports))
        .route("/reports/{id}", delete(delete_report))
        .route("/auth/login", post(login))
        .with_state(mock.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    mock
}

/// The three-store fixture used across tests.
pub fn sample_locations() -> Value {
    json!([
        {"id": 1, "name": "Store A", "department": "X", "city": "A"},
        {"id": 2, "name": "Store B", "department": "X", "city": "B"},
        {"id": 3, "name": "Store C", "department": "Y", "city": "C"}
    ])
}

pub fn technician() -> SessionIdentity {
    SessionIdentity::new("1030", Some("Ana Pérez".to_string()))
}

pub fn photo(name: &str) -> PickedFile {
    PickedFile::new(name, Some("image/jpeg".to_string()), vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3])
}

pub fn pdf(name: &str) -> PickedFile {
    PickedFile::new(name, Some("application/pdf".to_string()), b"%PDF-1.4 signed".to_vec())
}

pub type TestWizard = Wizard<MemoryStore, DataUrlPreviews>;

/// A signed-in wizard with the sample locations loaded.
pub fn signed_in_wizard() -> TestWizard {
    let mut wizard = Wizard::new(
        MemoryStore::new(),
        DataUrlPreviews::default(),
        Default::default(),
    );
    wizard.login(technician());
    wizard.set_locations(vec![
        Location::new("1", "Store A", "X", "A"),
        Location::new("2", "Store B", "X", "B"),
        Location::new("3", "Store C", "Y", "C"),
    ]);
    wizard
}
