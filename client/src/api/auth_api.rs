use reqwest::Method;
use shared::{LoginRequest, RegisterRequest, SessionInformation};
use tracing::info;

use super::ApiClient;
use crate::error::Result;

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<SessionInformation> {
        let builder = self
            .client
            .request(Method::POST, "auth/login")?
            .json(request);
        let information = self
            .client
            .execute(builder)
            .await?
            .json::<SessionInformation>()
            .await?;
        info!(
            email = %request.email,
            user_id = information.id,
            admin = information.admin,
            "Api auth login"
        );
        Ok(information)
    }

    /// Creates the account. The user still has to log in afterwards.
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let builder = self
            .client
            .request(Method::POST, "auth/register")?
            .json(request);
        self.client.execute(builder).await?;
        info!(email = %request.email, "Api auth register");
        Ok(())
    }
}
