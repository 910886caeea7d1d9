use strum_macros::{AsRefStr, Display, EnumString};

use crate::router::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
pub enum NavLink {
    Sessions,
    Account,
    Logout,
    Login,
    Register,
}

impl NavLink {
    /// Links shown in the top bar for the given login state.
    pub fn for_state(logged: bool) -> Vec<NavLink> {
        if logged {
            vec![NavLink::Sessions, NavLink::Account, NavLink::Logout]
        } else {
            vec![NavLink::Login, NavLink::Register]
        }
    }

    /// Target of the link, `None` for logout which is an action.
    pub fn route(&self) -> Option<Route> {
        match self {
            NavLink::Sessions => Some(Route::Sessions),
            NavLink::Account => Some(Route::Me),
            NavLink::Login => Some(Route::Login),
            NavLink::Register => Some(Route::Register),
            NavLink::Logout => None,
        }
    }
}
