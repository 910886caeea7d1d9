use std::fmt;
use std::time::Duration;

/// Navigation targets reachable from the controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Sessions,
    SessionDetail { id: u64 },
    SessionCreate,
    SessionUpdate { id: u64 },
    Me,
    Rentals,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Sessions => write!(f, "/sessions"),
            Route::SessionDetail { id } => write!(f, "/sessions/detail/{id}"),
            Route::SessionCreate => write!(f, "/sessions/create"),
            Route::SessionUpdate { id } => write!(f, "/sessions/update/{id}"),
            Route::Me => write!(f, "/me"),
            Route::Rentals => write!(f, "/rentals"),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);

    /// History back.
    fn back(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub action: String,
    pub duration: Duration,
}

impl Notice {
    pub const CLOSE_ACTION: &'static str = "Close";
    pub const DURATION: Duration = Duration::from_millis(3000);

    pub fn closable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: Self::CLOSE_ACTION.to_owned(),
            duration: Self::DURATION,
        }
    }
}

/// Transient user notification, the snack bar of the running shell.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
