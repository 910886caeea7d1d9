use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::user_session::UserSession;
use crate::ClientConfig;

pub mod auth_api;
pub mod session_api;
pub mod teacher_api;
pub mod user_api;

/// Http plumbing shared by every api client.
///
/// Requests carry `Authorization: <type> <token>` while the user session
/// holds a profile.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_root: Url,
    user_session: Arc<UserSession>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, user_session: Arc<UserSession>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            api_root: config.normalized_api_root(),
            user_session,
        })
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let endpoint = self.api_root.join(path)?;
        debug!(%method, %endpoint, "Api request");
        let mut builder = self.http.request(method, endpoint);
        if let Some(information) = self.user_session.session_information() {
            builder = builder.header(
                AUTHORIZATION,
                format!(
                    "{token_type} {token}",
                    token_type = information.token_type,
                    token = information.token
                ),
            );
        }
        Ok(builder)
    }

    /// Sends the request, turning any non-success status into [`Error::Status`].
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().clone();
        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => {
                debug!(%status, %url, ?error, "Api response body unreadable");
                String::new()
            }
        };
        warn!(
            %status,
            %url,
            response = %body,
            "Api unexpected response"
        );
        Err(Error::Status { status, body })
    }
}
