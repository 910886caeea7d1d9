use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::SessionInformation;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::info;

/// Login state of the running client.
///
/// A single instance lives for the whole process, shared through `Arc`.
/// Only [`UserSession::log_in`] and [`UserSession::log_out`] mutate it.
/// Observers follow the logged flag through [`UserSession::is_logged_stream`],
/// which replays the current value to every new subscriber before any change.
#[derive(Debug)]
pub struct UserSession {
    information: RwLock<Option<SessionInformation>>,
    logged: watch::Sender<bool>,
}

impl Default for UserSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UserSession {
    pub fn new() -> Self {
        let (logged, _) = watch::channel(false);
        Self {
            information: RwLock::new(None),
            logged,
        }
    }

    pub fn log_in(&self, information: SessionInformation) {
        info!(
            user_id = information.id,
            username = %information.username,
            admin = information.admin,
            "User logged in"
        );
        *self.write() = Some(information);
        self.logged.send_replace(true);
    }

    pub fn log_out(&self) {
        info!("User logged out");
        *self.write() = None;
        self.logged.send_replace(false);
    }

    pub fn is_logged(&self) -> bool {
        *self.logged.borrow()
    }

    pub fn session_information(&self) -> Option<SessionInformation> {
        self.read().clone()
    }

    pub fn is_admin(&self) -> bool {
        self.read().as_ref().is_some_and(|info| info.admin)
    }

    pub fn user_id(&self) -> Option<u64> {
        self.read().as_ref().map(|info| info.id)
    }

    /// Yields the current flag first, then every subsequent change.
    pub fn is_logged_stream(&self) -> WatchStream<bool> {
        WatchStream::new(self.logged.subscribe())
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.logged.subscribe()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<SessionInformation>> {
        self.information
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<SessionInformation>> {
        self.information
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
