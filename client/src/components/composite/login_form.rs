use secrecy::SecretString;
use shared::LoginRequest;
use tracing::{debug, warn};

use crate::components::validation::{self, ValidationErrors};
use crate::components::{FormPhase, FormState, SubmitOutcome};
use crate::router::Route;
use crate::AppContext;

#[derive(Debug, PartialEq, Default, Clone)]
pub struct LoginFormData {
    pub email: String,
    pub password: String,
}

impl LoginFormData {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl From<&LoginFormData> for LoginRequest {
    fn from(value: &LoginFormData) -> Self {
        LoginRequest {
            email: value.email.clone(),
            password: SecretString::from(value.password.clone()),
        }
    }
}

pub struct LoginForm {
    context: AppContext,
    data: LoginFormData,
    hide: bool,
    state: FormState,
}

impl LoginForm {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            data: LoginFormData::default(),
            hide: true,
            state: FormState::default(),
        }
    }

    pub fn value(&self) -> &LoginFormData {
        &self.data
    }

    pub fn set_value(&mut self, data: LoginFormData) {
        self.data = data;
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.data.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.data.password = password.into();
    }

    /// Whether the password input is masked.
    pub fn hide(&self) -> bool {
        self.hide
    }

    pub fn toggle_hide(&mut self) {
        self.hide = !self.hide;
    }

    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        validation::email(&mut errors, "email", &self.data.email);
        validation::required(&mut errors, "password", &self.data.password);
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn on_error(&self) -> bool {
        self.state.on_error()
    }

    pub fn phase(&self) -> FormPhase {
        self.state.phase()
    }

    /// Logs in and navigates to the sessions list. On failure the entered
    /// values stay untouched and `on_error` is set.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let errors = self.errors();
        if !errors.is_empty() {
            debug!(?errors, "Login form invalid, not submitting");
            return SubmitOutcome::Invalid;
        }

        self.state.begin();
        let request = LoginRequest::from(&self.data);
        match self.context.auth_api.login(&request).await {
            Ok(information) => {
                self.context.user_session.log_in(information);
                self.context.navigator.navigate(Route::Sessions);
                self.state.succeed()
            }
            Err(error) => {
                warn!(email = %self.data.email, %error, "Login failed");
                self.state.fail()
            }
        }
    }
}
