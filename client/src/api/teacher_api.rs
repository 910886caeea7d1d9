use reqwest::Method;
use shared::Teacher;
use tracing::info;

use super::ApiClient;
use crate::error::Result;

#[derive(Clone)]
pub struct TeacherApi {
    client: ApiClient,
}

impl TeacherApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<Teacher>> {
        let builder = self.client.request(Method::GET, "teacher")?;
        let teachers = self
            .client
            .execute(builder)
            .await?
            .json::<Vec<Teacher>>()
            .await?;
        info!(count = teachers.len(), "Api list teachers");
        Ok(teachers)
    }

    pub async fn detail(&self, id: u64) -> Result<Teacher> {
        let builder = self.client.request(Method::GET, &format!("teacher/{id}"))?;
        let teacher = self
            .client
            .execute(builder)
            .await?
            .json::<Teacher>()
            .await?;
        info!(teacher_id = id, "Api get teacher by id");
        Ok(teacher)
    }
}
