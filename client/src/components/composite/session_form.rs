use std::collections::BTreeSet;

use shared::{Session, Teacher};
use tracing::{debug, info, warn};

use crate::components::validation::{self, ValidationErrors, DATE_FORMAT};
use crate::components::{FormPhase, FormState, SubmitOutcome};
use crate::error::Result;
use crate::router::{Notice, Route};
use crate::AppContext;

#[derive(Debug, PartialEq, Default, Clone)]
pub struct SessionFormData {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub teacher_id: Option<u64>,
    pub description: String,
}

impl From<&Session> for SessionFormData {
    fn from(value: &Session) -> Self {
        SessionFormData {
            name: value.name.clone(),
            date: value.date.date_naive().format(DATE_FORMAT).to_string(),
            teacher_id: Some(value.teacher_id),
            description: value.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFormMode {
    Create,
    Update { id: u64 },
}

/// Admin form creating a session or editing an existing one.
pub struct SessionForm {
    context: AppContext,
    mode: SessionFormMode,
    data: SessionFormData,
    teachers: Vec<Teacher>,
    attendees: BTreeSet<u64>,
    state: FormState,
}

impl SessionForm {
    pub fn create(context: AppContext) -> Self {
        Self::with_mode(context, SessionFormMode::Create)
    }

    pub fn update(context: AppContext, id: u64) -> Self {
        Self::with_mode(context, SessionFormMode::Update { id })
    }

    fn with_mode(context: AppContext, mode: SessionFormMode) -> Self {
        Self {
            context,
            mode,
            data: SessionFormData::default(),
            teachers: Vec::new(),
            attendees: BTreeSet::new(),
            state: FormState::default(),
        }
    }

    pub fn mode(&self) -> SessionFormMode {
        self.mode
    }

    pub fn on_update(&self) -> bool {
        matches!(self.mode, SessionFormMode::Update { .. })
    }

    /// Redirects non-admins to the sessions list. Otherwise loads the
    /// teacher choices and, when editing, pre-fills the fields.
    pub async fn activate(&mut self) -> Result<()> {
        if !self.context.user_session.is_admin() {
            warn!("Session form opened by a non-admin user, redirecting");
            self.context.navigator.navigate(Route::Sessions);
            return Ok(());
        }

        self.teachers = self.context.teacher_api.all().await?;
        if let SessionFormMode::Update { id } = self.mode {
            let session = self.context.session_api.detail(id).await?;
            self.data = SessionFormData::from(&session);
            self.attendees = session.users;
        }
        Ok(())
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn value(&self) -> &SessionFormData {
        &self.data
    }

    pub fn set_value(&mut self, data: SessionFormData) {
        self.data = data;
    }

    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        validation::required(&mut errors, "name", &self.data.name);
        validation::date(&mut errors, "date", &self.data.date);
        if self.data.teacher_id.is_none() {
            errors.push("teacher_id", validation::FieldError::Required);
        }
        validation::required(&mut errors, "description", &self.data.description);
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

    fn to_session(&self) -> Option<Session> {
        let date = validation::parse_date(&self.data.date)?
            .and_hms_opt(0, 0, 0)?
            .and_utc();
        Some(Session {
            id: match self.mode {
                SessionFormMode::Create => None,
                SessionFormMode::Update { id } => Some(id),
            },
            name: self.data.name.trim().to_owned(),
            description: self.data.description.trim().to_owned(),
            date,
            teacher_id: self.data.teacher_id?,
            users: self.attendees.clone(),
            created_at: None,
            updated_at: None,
        })
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.context.user_session.is_admin() {
            warn!(mode = ?self.mode, "Session form submitted by a non-admin user, refusing");
            return SubmitOutcome::NotAllowed;
        }
        let errors = self.errors();
        if !errors.is_empty() {
            debug!(?errors, "Session form invalid, not submitting");
            return SubmitOutcome::Invalid;
        }
        let Some(session) = self.to_session() else {
            return SubmitOutcome::Invalid;
        };

        self.state.begin();
        let result = match self.mode {
            SessionFormMode::Create => self
                .context
                .session_api
                .create(&session)
                .await
                .map(|_| "Session created !"),
            SessionFormMode::Update { id } => self
                .context
                .session_api
                .update(id, &session)
                .await
                .map(|_| "Session updated !"),
        };

        match result {
            Ok(message) => {
                info!(mode = ?self.mode, name = %session.name, "Session form submitted");
                self.context.notifier.notify(Notice::closable(message));
                self.context.navigator.navigate(Route::Sessions);
                self.state.succeed()
            }
            Err(error) => {
                warn!(mode = ?self.mode, %error, "Session form submission failed");
                self.state.fail()
            }
        }
    }
}
