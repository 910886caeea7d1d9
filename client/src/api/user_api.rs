use reqwest::Method;
use shared::User;
use tracing::info;

use super::ApiClient;
use crate::error::Result;

#[derive(Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_by_id(&self, id: u64) -> Result<User> {
        let builder = self.client.request(Method::GET, &format!("user/{id}"))?;
        let user = self
            .client
            .execute(builder)
            .await?
            .json::<User>()
            .await?;
        info!(user_id = id, "Api get user by id");
        Ok(user)
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        let builder = self.client.request(Method::DELETE, &format!("user/{id}"))?;
        self.client.execute(builder).await?;
        info!(user_id = id, "Api delete user");
        Ok(())
    }
}
