use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};

use crate::components::composite::navigation_bar::NavLink;
use crate::router::Route;
use crate::AppContext;

/// Application shell: top navigation, logout and route guards.
pub struct App {
    context: AppContext,
}

impl App {
    pub fn new(context: AppContext) -> Self {
        Self { context }
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        NavLink::for_state(self.context.user_session.is_logged())
    }

    /// Current links first, then the links of every login state change.
    pub fn nav_links_stream(&self) -> impl Stream<Item = Vec<NavLink>> + Unpin + Send + 'static {
        self.context
            .user_session
            .is_logged_stream()
            .map(NavLink::for_state)
    }

    pub fn logout(&self) {
        self.context.user_session.log_out();
        info!("Logout, back to home");
        self.context.navigator.navigate(Route::Home);
    }

    /// Pages behind login. Anonymous users are sent to the login page.
    pub fn auth_guard(&self) -> bool {
        if self.context.user_session.is_logged() {
            return true;
        }
        debug!("Auth guard denied, redirecting to login");
        self.context.navigator.navigate(Route::Login);
        false
    }

    /// Login and register pages. Logged users are sent away from them.
    pub fn unauth_guard(&self) -> bool {
        if !self.context.user_session.is_logged() {
            return true;
        }
        debug!("Unauth guard denied, user already logged");
        self.context.navigator.navigate(Route::Rentals);
        false
    }
}
