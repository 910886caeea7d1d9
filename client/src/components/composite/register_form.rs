use secrecy::SecretString;
use shared::RegisterRequest;
use tracing::{debug, info, warn};

use crate::components::validation::{self, ValidationErrors};
use crate::components::{FormPhase, FormState, SubmitOutcome};
use crate::router::Route;
use crate::AppContext;

#[derive(Debug, PartialEq, Default, Clone)]
pub struct RegisterFormData {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl From<&RegisterFormData> for RegisterRequest {
    fn from(value: &RegisterFormData) -> Self {
        RegisterRequest {
            email: value.email.clone(),
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
            password: SecretString::from(value.password.clone()),
        }
    }
}

pub struct RegisterForm {
    context: AppContext,
    data: RegisterFormData,
    state: FormState,
}

impl RegisterForm {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            data: RegisterFormData::default(),
            state: FormState::default(),
        }
    }

    pub fn value(&self) -> &RegisterFormData {
        &self.data
    }

    pub fn set_value(&mut self, data: RegisterFormData) {
        self.data = data;
    }

    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        validation::email(&mut errors, "email", &self.data.email);
        validation::required(&mut errors, "firstName", &self.data.first_name);
        validation::required(&mut errors, "lastName", &self.data.last_name);
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

    /// Registration does not log the user in, success leads to the login page.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let errors = self.errors();
        if !errors.is_empty() {
            debug!(?errors, "Register form invalid, not submitting");
            return SubmitOutcome::Invalid;
        }

        self.state.begin();
        let request = RegisterRequest::from(&self.data);
        match self.context.auth_api.register(&request).await {
            Ok(()) => {
                info!(email = %self.data.email, "Account registered");
                self.context.navigator.navigate(Route::Login);
                self.state.succeed()
            }
            Err(error) => {
                warn!(email = %self.data.email, %error, "Registration failed");
                self.state.fail()
            }
        }
    }
}
