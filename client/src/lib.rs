use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use self::api::auth_api::AuthApi;
use self::api::session_api::SessionApi;
use self::api::teacher_api::TeacherApi;
use self::api::user_api::UserApi;
use self::api::ApiClient;
use self::router::{Navigator, Notifier};
use self::user_session::UserSession;

pub mod api;
pub mod app;
pub mod components;
pub mod error;
pub mod pages;
pub mod router;
pub mod user_session;

const DEFAULT_API_ROOT: &str = "http://localhost:8080/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_root")]
    pub api_root: Url,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_root() -> Url {
    Url::parse(DEFAULT_API_ROOT).expect("default api root is a valid url")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_root: Url) -> Self {
        Self {
            api_root,
            ..Default::default()
        }
    }

    /// Api root with a trailing slash, so endpoint paths join under it
    /// instead of replacing its last segment.
    pub fn normalized_api_root(&self) -> Url {
        let mut root = self.api_root.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        root
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything a page or form controller needs: the session-state holder,
/// the api clients and the navigation seams.
#[derive(Clone)]
pub struct AppContext {
    pub user_session: Arc<UserSession>,
    pub auth_api: AuthApi,
    pub session_api: SessionApi,
    pub teacher_api: TeacherApi,
    pub user_api: UserApi,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    pub fn new(
        config: &ClientConfig,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> error::Result<Self> {
        let user_session = Arc::new(UserSession::new());
        let client = ApiClient::new(config, user_session.clone())?;
        Ok(Self {
            user_session,
            auth_api: AuthApi::new(client.clone()),
            session_api: SessionApi::new(client.clone()),
            teacher_api: TeacherApi::new(client.clone()),
            user_api: UserApi::new(client),
            navigator,
            notifier,
        })
    }
}
