use reqwest::Method;
use shared::Session;
use tracing::info;

use super::ApiClient;
use crate::error::Result;

const ENDPOINT: &str = "session";

#[derive(Clone)]
pub struct SessionApi {
    client: ApiClient,
}

impl SessionApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<Session>> {
        let builder = self.client.request(Method::GET, ENDPOINT)?;
        let sessions = self
            .client
            .execute(builder)
            .await?
            .json::<Vec<Session>>()
            .await?;
        info!(count = sessions.len(), "Api list sessions");
        Ok(sessions)
    }

    pub async fn detail(&self, id: u64) -> Result<Session> {
        let builder = self
            .client
            .request(Method::GET, &format!("{ENDPOINT}/{id}"))?;
        let session = self
            .client
            .execute(builder)
            .await?
            .json::<Session>()
            .await?;
        info!(session_id = id, "Api get session by id");
        Ok(session)
    }

    pub async fn create(&self, session: &Session) -> Result<Session> {
        let builder = self.client.request(Method::POST, ENDPOINT)?.json(session);
        let created = self
            .client
            .execute(builder)
            .await?
            .json::<Session>()
            .await?;
        info!(session_id = ?created.id, name = %created.name, "Api create session");
        Ok(created)
    }

    pub async fn update(&self, id: u64, session: &Session) -> Result<Session> {
        let builder = self
            .client
            .request(Method::PUT, &format!("{ENDPOINT}/{id}"))?
            .json(session);
        let updated = self
            .client
            .execute(builder)
            .await?
            .json::<Session>()
            .await?;
        info!(session_id = id, name = %updated.name, "Api update session");
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        let builder = self
            .client
            .request(Method::DELETE, &format!("{ENDPOINT}/{id}"))?;
        self.client.execute(builder).await?;
        info!(session_id = id, "Api delete session");
        Ok(())
    }

    /// Registers `user_id` as an attendee. The request has no body.
    pub async fn participate(&self, id: u64, user_id: u64) -> Result<()> {
        let builder = self
            .client
            .request(Method::POST, &format!("{ENDPOINT}/{id}/participate/{user_id}"))?;
        self.client.execute(builder).await?;
        info!(session_id = id, user_id, "Api participate");
        Ok(())
    }

    pub async fn un_participate(&self, id: u64, user_id: u64) -> Result<()> {
        let builder = self
            .client
            .request(Method::DELETE, &format!("{ENDPOINT}/{id}/participate/{user_id}"))?;
        self.client.execute(builder).await?;
        info!(session_id = id, user_id, "Api unparticipate");
        Ok(())
    }
}
