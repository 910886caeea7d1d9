use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::Context;
use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{FromRequestParts, Path, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use shared::{Session, SessionInformation, Teacher, User};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};
use url::Url;

pub const ADMIN_ID: u64 = 1;
pub const ADMIN_EMAIL: &str = "yoga@studio.com";
pub const ADMIN_PASSWORD: &str = "test!1234";
pub const USER_ID: u64 = 2;
pub const USER_EMAIL: &str = "john@yoga.com";
pub const USER_PASSWORD: &str = "password123";
pub const ATTENDEE_ID: u64 = 3;
pub const MORNING_SESSION_ID: u64 = 1;
pub const EVENING_SESSION_ID: u64 = 2;

type BackendResult<T> = std::result::Result<T, BackendError>;

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("authentication_required")]
    Unauthorized,
    #[error("wrong_credentials")]
    WrongCredentials,
    #[error("request_path_not_found")]
    NotFound,
    #[error("bad_request: {0}")]
    BadRequest(&'static str),
}

impl BackendError {
    fn status_code(&self) -> StatusCode {
        match self {
            BackendError::Unauthorized => StatusCode::UNAUTHORIZED,
            BackendError::WrongCredentials => StatusCode::UNAUTHORIZED,
            BackendError::NotFound => StatusCode::NOT_FOUND,
            BackendError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unauthorized => warn!("Unauthorized access attempt"),
            Self::WrongCredentials => warn!("Authentication failed - wrong credentials"),
            Self::NotFound => debug!("Resource not found"),
            Self::BadRequest(reason) => warn!(%reason, "Bad request"),
        }
        (self.status_code(), self.to_string()).into_response()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub body_len: usize,
    pub authorization: Option<String>,
}

struct Account {
    password: String,
    user_id: u64,
}

/// In-memory yoga studio behind the fake api.
#[derive(Default)]
pub struct Studio {
    pub sessions: BTreeMap<u64, Session>,
    pub teachers: BTreeMap<u64, Teacher>,
    pub users: BTreeMap<u64, User>,
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, u64>,
    next_id: u64,
}

impl Studio {
    fn seeded() -> Self {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let updated_at = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let mut studio = Studio {
            next_id: 100,
            ..Default::default()
        };

        for (id, first_name, last_name) in [(1, "Margot", "DELAHAYE"), (2, "Hélène", "THIERCELIN")] {
            studio.teachers.insert(
                id,
                Teacher {
                    id,
                    first_name: first_name.to_owned(),
                    last_name: last_name.to_owned(),
                    created_at,
                    updated_at,
                },
            );
        }

        for (id, email, password, first_name, last_name, admin) in [
            (ADMIN_ID, ADMIN_EMAIL, ADMIN_PASSWORD, "Admin", "Admin", true),
            (USER_ID, USER_EMAIL, USER_PASSWORD, "John", "DOE", false),
            (ATTENDEE_ID, "jane@yoga.com", "password123", "Jane", "DOE", false),
        ] {
            studio.users.insert(
                id,
                User {
                    id,
                    email: email.to_owned(),
                    first_name: first_name.to_owned(),
                    last_name: last_name.to_owned(),
                    admin,
                    password: None,
                    created_at,
                    updated_at: Some(updated_at),
                },
            );
            studio.accounts.insert(
                email.to_owned(),
                Account {
                    password: password.to_owned(),
                    user_id: id,
                },
            );
        }

        studio.sessions.insert(
            MORNING_SESSION_ID,
            Session {
                id: Some(MORNING_SESSION_ID),
                name: "Morning Yoga".to_owned(),
                description: "A relaxing morning yoga session".to_owned(),
                date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
                teacher_id: 1,
                users: BTreeSet::from([ATTENDEE_ID]),
                created_at: Some(created_at),
                updated_at: Some(updated_at),
            },
        );
        studio.sessions.insert(
            EVENING_SESSION_ID,
            Session {
                id: Some(EVENING_SESSION_ID),
                name: "Evening Yoga".to_owned(),
                description: "A calming evening yoga session".to_owned(),
                date: Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap(),
                teacher_id: 2,
                users: BTreeSet::new(),
                created_at: Some(created_at),
                updated_at: Some(updated_at),
            },
        );
        studio
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Status(StatusCode),
    /// Sends the status, then drops the connection halfway through the body.
    CutBody(StatusCode),
}

#[derive(Clone)]
pub struct FakeBackend {
    studio: Arc<Mutex<Studio>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    failures: Arc<Mutex<HashMap<(Method, String), Failure>>>,
}

impl FakeBackend {
    pub fn seeded() -> Self {
        Self {
            studio: Arc::new(Mutex::new(Studio::seeded())),
            requests: Arc::default(),
            failures: Arc::default(),
        }
    }

    /// Serves the fake api on an ephemeral local port, returns its api root.
    pub async fn spawn(&self) -> anyhow::Result<Url> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Fake backend should bind a local port")?;
        let address = listener.local_addr()?;
        let app = router(self.clone());
        tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app).await {
                warn!(?error, "Fake backend stopped");
            }
        });
        info!(%address, "Fake backend listening");
        Ok(Url::parse(&format!("http://{address}/api/"))?)
    }

    pub fn studio(&self) -> MutexGuard<'_, Studio> {
        self.studio.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Every later `method path` request answers `status` without reaching
    /// the studio. `path` is the full request path, `/api/...`.
    pub fn fail(&self, method: Method, path: &str, status: StatusCode) {
        self.failures
            .lock()
            .unwrap()
            .insert((method, path.to_owned()), Failure::Status(status));
    }

    /// Like [`FakeBackend::fail`], but the response body breaks off before
    /// it is complete.
    pub fn fail_with_cut_body(&self, method: Method, path: &str, status: StatusCode) {
        self.failures
            .lock()
            .unwrap()
            .insert((method, path.to_owned()), Failure::CutBody(status));
    }

    fn failure_for(&self, method: &Method, path: &str) -> Option<Failure> {
        self.failures
            .lock()
            .unwrap()
            .get(&(method.clone(), path.to_owned()))
            .copied()
    }
}

fn router(backend: FakeBackend) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/session", get(list_sessions).post(create_session))
        .route(
            "/session/{id}",
            get(get_session).put(update_session).delete(delete_session),
        )
        .route(
            "/session/{id}/participate/{user_id}",
            post(participate).delete(un_participate),
        )
        .route("/teacher", get(list_teachers))
        .route("/teacher/{id}", get(get_teacher))
        .route("/user/{id}", get(get_user).delete(delete_user));

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            backend.clone(),
            record_request,
        ))
        .with_state(backend)
}

async fn record_request(State(backend): State<FakeBackend>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return BackendError::BadRequest("unreadable body").into_response(),
    };
    let recorded = RecordedRequest {
        method: parts.method.clone(),
        path: parts.uri.path().to_owned(),
        body: serde_json::from_slice(&bytes).ok(),
        body_len: bytes.len(),
        authorization: parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
    };
    debug!(method = %recorded.method, path = %recorded.path, "Fake backend request");
    backend.requests.lock().unwrap().push(recorded);

    match backend.failure_for(&parts.method, parts.uri.path()) {
        Some(Failure::Status(status)) => {
            warn!(%status, path = %parts.uri.path(), "Simulated failure");
            return (status, "simulated_failure").into_response();
        }
        Some(Failure::CutBody(status)) => {
            warn!(%status, path = %parts.uri.path(), "Simulated failure with a cut body");
            return (status, cut_body()).into_response();
        }
        None => {}
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn cut_body() -> Body {
    let (sender, receiver) = mpsc::channel::<std::io::Result<Bytes>>(2);
    tokio::spawn(async move {
        let _ = sender.send(Ok(Bytes::from_static(b"simulated_"))).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _ = sender
            .send(Err(std::io::Error::other("connection cut")))
            .await;
    });
    Body::from_stream(ReceiverStream::new(receiver))
}

/// Id of the user owning the bearer token of the request.
struct Bearer(u64);

impl FromRequestParts<FakeBackend> for Bearer {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        backend: &FakeBackend,
    ) -> BackendResult<Self> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(BackendError::Unauthorized)?;
        backend
            .studio()
            .tokens
            .get(token)
            .copied()
            .map(Bearer)
            .ok_or(BackendError::Unauthorized)
    }
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewAccount {
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

async fn login(
    State(backend): State<FakeBackend>,
    Json(credentials): Json<Credentials>,
) -> BackendResult<Json<SessionInformation>> {
    let mut studio = backend.studio();
    let user_id = match studio.accounts.get(&credentials.email) {
        Some(account) if account.password == credentials.password => account.user_id,
        _ => return Err(BackendError::WrongCredentials),
    };
    let user = studio.users.get(&user_id).cloned().ok_or(BackendError::NotFound)?;
    let token = format!("fake-jwt-token-{user_id}");
    studio.tokens.insert(token.clone(), user_id);
    Ok(Json(SessionInformation {
        token,
        token_type: "Bearer".to_owned(),
        id: user.id,
        username: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        admin: user.admin,
    }))
}

async fn register(
    State(backend): State<FakeBackend>,
    Json(account): Json<NewAccount>,
) -> BackendResult<Json<MessageResponse>> {
    let mut studio = backend.studio();
    if studio.accounts.contains_key(&account.email) {
        return Err(BackendError::BadRequest("email already taken"));
    }
    let id = studio.allocate_id();
    let now = Utc::now();
    studio.users.insert(
        id,
        User {
            id,
            email: account.email.clone(),
            first_name: account.first_name,
            last_name: account.last_name,
            admin: false,
            password: None,
            created_at: now,
            updated_at: Some(now),
        },
    );
    studio.accounts.insert(
        account.email,
        Account {
            password: account.password,
            user_id: id,
        },
    );
    Ok(Json(MessageResponse {
        message: "User registered successfully!",
    }))
}

async fn list_sessions(
    _: Bearer,
    State(backend): State<FakeBackend>,
) -> BackendResult<Json<Vec<Session>>> {
    Ok(Json(backend.studio().sessions.values().cloned().collect()))
}

async fn get_session(
    _: Bearer,
    State(backend): State<FakeBackend>,
    Path(id): Path<u64>,
) -> BackendResult<Json<Session>> {
    backend
        .studio()
        .sessions
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(BackendError::NotFound)
}

async fn create_session(
    _: Bearer,
    State(backend): State<FakeBackend>,
    Json(mut session): Json<Session>,
) -> BackendResult<Json<Session>> {
    let mut studio = backend.studio();
    if !studio.teachers.contains_key(&session.teacher_id) {
        return Err(BackendError::BadRequest("unknown teacher"));
    }
    let id = studio.allocate_id();
    let now = Utc::now();
    session.id = Some(id);
    session.created_at = Some(now);
    session.updated_at = Some(now);
    studio.sessions.insert(id, session.clone());
    Ok(Json(session))
}

async fn update_session(
    _: Bearer,
    State(backend): State<FakeBackend>,
    Path(id): Path<u64>,
    Json(mut session): Json<Session>,
) -> BackendResult<Json<Session>> {
    let mut studio = backend.studio();
    let created_at = studio
        .sessions
        .get(&id)
        .ok_or(BackendError::NotFound)?
        .created_at;
    session.id = Some(id);
    session.created_at = created_at;
    session.updated_at = Some(Utc::now());
    studio.sessions.insert(id, session.clone());
    Ok(Json(session))
}

async fn delete_session(
    _: Bearer,
    State(backend): State<FakeBackend>,
    Path(id): Path<u64>,
) -> BackendResult<StatusCode> {
    match backend.studio().sessions.remove(&id) {
        Some(_) => Ok(StatusCode::OK),
        None => Err(BackendError::NotFound),
    }
}

async fn participate(
    _: Bearer,
    State(backend): State<FakeBackend>,
    Path((id, user_id)): Path<(u64, u64)>,
) -> BackendResult<StatusCode> {
    let mut studio = backend.studio();
    if !studio.users.contains_key(&user_id) {
        return Err(BackendError::NotFound);
    }
    let session = studio.sessions.get_mut(&id).ok_or(BackendError::NotFound)?;
    if !session.users.insert(user_id) {
        return Err(BackendError::BadRequest("already participating"));
    }
    Ok(StatusCode::OK)
}

async fn un_participate(
    _: Bearer,
    State(backend): State<FakeBackend>,
    Path((id, user_id)): Path<(u64, u64)>,
) -> BackendResult<StatusCode> {
    let mut studio = backend.studio();
    let session = studio.sessions.get_mut(&id).ok_or(BackendError::NotFound)?;
    if !session.users.remove(&user_id) {
        return Err(BackendError::BadRequest("not participating"));
    }
    Ok(StatusCode::OK)
}

async fn list_teachers(
    _: Bearer,
    State(backend): State<FakeBackend>,
) -> BackendResult<Json<Vec<Teacher>>> {
    Ok(Json(backend.studio().teachers.values().cloned().collect()))
}

async fn get_teacher(
    _: Bearer,
    State(backend): State<FakeBackend>,
    Path(id): Path<u64>,
) -> BackendResult<Json<Teacher>> {
    backend
        .studio()
        .teachers
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(BackendError::NotFound)
}

async fn get_user(
    _: Bearer,
    State(backend): State<FakeBackend>,
    Path(id): Path<u64>,
) -> BackendResult<Json<User>> {
    backend
        .studio()
        .users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(BackendError::NotFound)
}

async fn delete_user(
    Bearer(caller): Bearer,
    State(backend): State<FakeBackend>,
    Path(id): Path<u64>,
) -> BackendResult<StatusCode> {
    if caller != id {
        return Err(BackendError::Unauthorized);
    }
    let mut studio = backend.studio();
    let user = studio.users.remove(&id).ok_or(BackendError::NotFound)?;
    studio.accounts.remove(&user.email);
    studio.tokens.retain(|_, user_id| *user_id != id);
    for session in studio.sessions.values_mut() {
        session.users.remove(&id);
    }
    Ok(StatusCode::OK)
}
