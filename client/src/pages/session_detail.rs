use shared::{Session, Teacher};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::router::{Notice, Route};
use crate::AppContext;

/// Detail page of one session with its teacher.
///
/// `is_admin` and the current user id are read from the user session when
/// the page is built. `is_participating` is only ever recomputed from a
/// fetched session, participation changes always re-fetch.
pub struct SessionDetail {
    context: AppContext,
    session_id: u64,
    user_id: Option<u64>,
    is_admin: bool,
    session: Option<Session>,
    teacher: Option<Teacher>,
    is_participating: bool,
}

impl SessionDetail {
    pub fn new(context: AppContext, session_id: u64) -> Self {
        let user_id = context.user_session.user_id();
        let is_admin = context.user_session.is_admin();
        Self {
            context,
            session_id,
            user_id,
            is_admin,
            session: None,
            teacher: None,
            is_participating: false,
        }
    }

    pub async fn activate(&mut self) -> Result<()> {
        self.fetch_session().await
    }

    async fn fetch_session(&mut self) -> Result<()> {
        let session = self.context.session_api.detail(self.session_id).await?;
        let teacher = self.context.teacher_api.detail(session.teacher_id).await?;
        self.is_participating = self
            .user_id
            .is_some_and(|user_id| session.users.contains(&user_id));
        self.session = Some(session);
        self.teacher = Some(teacher);
        Ok(())
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn teacher(&self) -> Option<&Teacher> {
        self.teacher.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_participating(&self) -> bool {
        self.is_participating
    }

    pub fn attendee_count(&self) -> usize {
        self.session.as_ref().map_or(0, |session| session.users.len())
    }

    pub fn can_delete(&self) -> bool {
        self.is_admin
    }

    pub fn can_participate(&self) -> bool {
        !self.is_admin && !self.is_participating
    }

    pub fn can_un_participate(&self) -> bool {
        !self.is_admin && self.is_participating
    }

    pub fn back(&self) {
        self.context.navigator.back();
    }

    pub async fn delete(&mut self) -> Result<()> {
        if !self.can_delete() {
            warn!(session_id = self.session_id, "Delete requested by a non-admin user");
            return Err(Error::not_allowed("delete session"));
        }
        self.context.session_api.delete(self.session_id).await?;
        info!(session_id = self.session_id, "Session deleted");
        self.context
            .notifier
            .notify(Notice::closable("Session deleted !"));
        self.context.navigator.navigate(Route::Sessions);
        Ok(())
    }

    pub async fn participate(&mut self) -> Result<()> {
        let user_id = self.user_id.ok_or(Error::NotLoggedIn)?;
        self.context
            .session_api
            .participate(self.session_id, user_id)
            .await?;
        self.fetch_session().await
    }

    pub async fn un_participate(&mut self) -> Result<()> {
        let user_id = self.user_id.ok_or(Error::NotLoggedIn)?;
        self.context
            .session_api
            .un_participate(self.session_id, user_id)
            .await?;
        self.fetch_session().await
    }
}
