pub mod composite;
pub mod validation;

/// Lifecycle of a submitted form.
///
/// Validity is derived from the field values on demand, so editing covers
/// both the valid and the invalid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed, nothing was sent.
    Invalid,
    /// The backend accepted the form and the user was navigated away.
    Submitted,
    /// The backend rejected the form, `on_error` is now set.
    Failed,
    /// The current user may not submit this form, nothing was sent.
    NotAllowed,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FormState {
    phase: FormPhase,
    on_error: bool,
}

impl FormState {
    pub(crate) fn phase(&self) -> FormPhase {
        self.phase
    }

    pub(crate) fn on_error(&self) -> bool {
        self.on_error
    }

    pub(crate) fn begin(&mut self) {
        self.phase = FormPhase::Submitting;
    }

    pub(crate) fn succeed(&mut self) -> SubmitOutcome {
        self.phase = FormPhase::Submitted;
        SubmitOutcome::Submitted
    }

    pub(crate) fn fail(&mut self) -> SubmitOutcome {
        self.phase = FormPhase::Editing;
        self.on_error = true;
        SubmitOutcome::Failed
    }
}
