use shared::{Session, SessionInformation};
use tracing::warn;

use crate::error::{Error, Result};
use crate::router::Route;
use crate::AppContext;

pub struct SessionsList {
    context: AppContext,
    sessions: Vec<Session>,
}

impl SessionsList {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            sessions: Vec::new(),
        }
    }

    pub async fn activate(&mut self) -> Result<()> {
        self.sessions = self.context.session_api.all().await?;
        Ok(())
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn user(&self) -> Option<SessionInformation> {
        self.context.user_session.session_information()
    }

    pub fn can_create(&self) -> bool {
        self.context.user_session.is_admin()
    }

    pub fn can_edit(&self) -> bool {
        self.context.user_session.is_admin()
    }

    pub fn open_detail(&self, id: u64) {
        self.context.navigator.navigate(Route::SessionDetail { id });
    }

    pub fn open_create(&self) -> Result<()> {
        if !self.can_create() {
            warn!("Create session requested by a non-admin user");
            return Err(Error::not_allowed("create session"));
        }
        self.context.navigator.navigate(Route::SessionCreate);
        Ok(())
    }

    pub fn open_edit(&self, id: u64) -> Result<()> {
        if !self.can_edit() {
            warn!(session_id = id, "Edit session requested by a non-admin user");
            return Err(Error::not_allowed("edit session"));
        }
        self.context.navigator.navigate(Route::SessionUpdate { id });
        Ok(())
    }
}
