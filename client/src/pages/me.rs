use shared::User;
use tracing::info;

use crate::error::{Error, Result};
use crate::router::{Notice, Route};
use crate::AppContext;

pub struct Me {
    context: AppContext,
    user: Option<User>,
}

impl Me {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            user: None,
        }
    }

    pub async fn activate(&mut self) -> Result<()> {
        let id = self.context.user_session.user_id().ok_or(Error::NotLoggedIn)?;
        self.user = Some(self.context.user_api.get_by_id(id).await?);
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Taken from the fetched account, not from the login profile.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.admin)
    }

    /// Admin accounts cannot delete themselves.
    pub fn can_delete_account(&self) -> bool {
        self.user.as_ref().is_some_and(|user| !user.admin)
    }

    pub fn back(&self) {
        self.context.navigator.back();
    }

    /// Refused for admins, whether known from the fetched account or from
    /// the login profile.
    pub async fn delete(&mut self) -> Result<()> {
        let id = self.context.user_session.user_id().ok_or(Error::NotLoggedIn)?;
        if self.is_admin() || self.context.user_session.is_admin() {
            return Err(Error::not_allowed("delete admin account"));
        }
        self.context.user_api.delete(id).await?;
        info!(user_id = id, "Account deleted");
        self.context
            .notifier
            .notify(Notice::closable("Your account has been deleted !"));
        self.context.user_session.log_out();
        self.context.navigator.navigate(Route::Home);
        Ok(())
    }
}
