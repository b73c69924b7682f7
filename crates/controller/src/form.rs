//! Reservation form: field values, validation state, and the submit lifecycle.
//!
//! The mode (create or edit) is fixed when the form is built. Editing happens
//! in `Editing`, `LoadError`, `Invalid` and `SubmitError`; `Loading`,
//! `Submitting` and `Success` ignore input and submits.

use std::{sync::Arc, time::Duration};

use client_core::ReservationApi;
use shared::{
    domain::{FormField, Reservation, ReservationFormData, ReservationId},
    error::{ErrorKind, InvalidRouteId},
};
use tracing::{debug, info, warn};

use crate::{
    events::{UiError, UiErrorContext},
    navigation::{Navigator, Route, ScheduledNavigation},
    validation::{validate, Clock, ValidationErrors},
};

pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

const CREATED_MESSAGE: &str = "Reservation created successfully!";
const UPDATED_MESSAGE: &str = "Reservation updated successfully!";

static NO_ERRORS: ValidationErrors = ValidationErrors::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ReservationId),
}

impl FormMode {
    /// Absent route id means create; anything present must be an integer.
    pub fn from_route(raw: Option<&str>) -> Result<Self, InvalidRouteId> {
        match raw.map(str::trim) {
            None | Some("") => Ok(FormMode::Create),
            Some(raw) => raw
                .parse::<i64>()
                .map(|id| FormMode::Edit(ReservationId(id)))
                .map_err(|_| InvalidRouteId::new(raw)),
        }
    }

    pub fn reservation_id(self) -> Option<ReservationId> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Loading,
    Editing,
    LoadError { error: UiError },
    Invalid { errors: ValidationErrors },
    Submitting,
    Success { message: &'static str },
    SubmitError { error: UiError },
}

impl FormState {
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            FormState::Editing
                | FormState::LoadError { .. }
                | FormState::Invalid { .. }
                | FormState::SubmitError { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was busy or already done.
    Ignored,
    Invalid,
    Saved(Reservation),
    Failed(ErrorKind),
}

pub struct ReservationForm {
    mode: FormMode,
    values: ReservationFormData,
    state: FormState,
    api: Arc<dyn ReservationApi>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
    redirect_delay: Duration,
    pending_navigation: Option<ScheduledNavigation>,
}

impl ReservationForm {
    pub fn new(
        mode: FormMode,
        api: Arc<dyn ReservationApi>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let state = match mode {
            FormMode::Create => FormState::Editing,
            FormMode::Edit(_) => FormState::Loading,
        };
        Self {
            mode,
            values: ReservationFormData::default(),
            state,
            api,
            navigator,
            clock,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            pending_navigation: None,
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Builds the form and, in edit mode, pre-populates it from the backend.
    pub async fn open(
        mode: FormMode,
        api: Arc<dyn ReservationApi>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
        redirect_delay: Duration,
    ) -> Self {
        let mut form = Self::new(mode, api, navigator, clock).with_redirect_delay(redirect_delay);
        form.load().await;
        form
    }

    /// Fetches the reservation being edited. Also used to retry after `LoadError`.
    pub async fn load(&mut self) {
        let FormMode::Edit(id) = self.mode else {
            return;
        };
        if !matches!(self.state, FormState::Loading | FormState::LoadError { .. }) {
            debug!(reservation_id = %id, "load skipped; form already populated");
            return;
        }

        self.state = FormState::Loading;
        match self.api.get(id).await {
            Ok(reservation) => {
                self.values = ReservationFormData::from(&reservation);
                self.state = FormState::Editing;
                info!(reservation_id = %id, "reservation form populated");
            }
            Err(err) => {
                warn!(reservation_id = %id, kind = ?err.kind(), error = %err, "failed to load reservation");
                self.state = FormState::LoadError {
                    error: UiError::from_client_error(UiErrorContext::Fetch, &err),
                };
            }
        }
    }

    /// Updates one field and clears only that field's error.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if !self.state.is_editable() {
            debug!(%field, "edit ignored while form is busy");
            return false;
        }
        self.values.set(field, value);

        if let FormState::Invalid { errors } = &mut self.state {
            errors.clear(field);
            if errors.is_empty() {
                self.state = FormState::Editing;
            }
        }
        true
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.state.is_editable() {
            debug!(state = ?self.state, "submit ignored");
            return SubmitOutcome::Ignored;
        }

        let errors = validate(&self.values, self.clock.today());
        if !errors.is_empty() {
            info!(errors = %errors, "reservation form rejected");
            self.state = FormState::Invalid { errors };
            return SubmitOutcome::Invalid;
        }

        self.state = FormState::Submitting;
        let (result, context, message) = match self.mode {
            FormMode::Create => (
                self.api.create(&self.values).await,
                UiErrorContext::Create,
                CREATED_MESSAGE,
            ),
            FormMode::Edit(id) => (
                self.api.update(id, &self.values).await,
                UiErrorContext::Update,
                UPDATED_MESSAGE,
            ),
        };

        match result {
            Ok(saved) => {
                if let FormMode::Edit(_) = self.mode {
                    self.values = ReservationFormData::from(&saved);
                }
                info!(reservation_id = ?saved.id, "reservation saved");
                self.state = FormState::Success { message };
                self.pending_navigation = Some(ScheduledNavigation::schedule(
                    Arc::clone(&self.navigator),
                    Route::ReservationList,
                    self.redirect_delay,
                ));
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "reservation submit failed");
                let kind = err.kind();
                self.state = FormState::SubmitError {
                    error: UiError::from_client_error(context, &err),
                };
                SubmitOutcome::Failed(kind)
            }
        }
    }

    /// Leaves the form immediately, dropping any pending delayed navigation.
    pub fn cancel(&mut self) {
        self.pending_navigation = None;
        self.navigator.navigate(Route::ReservationList);
    }

    /// Closes a load/submit error banner.
    pub fn dismiss_message(&mut self) {
        if matches!(
            self.state,
            FormState::LoadError { .. } | FormState::SubmitError { .. }
        ) {
            self.state = FormState::Editing;
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &ReservationFormData {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        match &self.state {
            FormState::Invalid { errors } => errors,
            _ => &NO_ERRORS,
        }
    }

    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.errors().get(field)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, FormState::Loading | FormState::Submitting)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match &self.state {
            FormState::LoadError { error } | FormState::SubmitError { error } => {
                Some(error.message())
            }
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&'static str> {
        match self.state {
            FormState::Success { message } => Some(message),
            _ => None,
        }
    }

    pub fn ui_error(&self) -> Option<&UiError> {
        match &self.state {
            FormState::LoadError { error } | FormState::SubmitError { error } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
