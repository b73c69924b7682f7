use std::sync::Arc;

use client_core::ReservationApi;
use shared::domain::{Reservation, ReservationId};
use tracing::{info, warn};

use crate::events::{UiError, UiErrorContext};

/// Reservation list view with its two-step delete confirmation.
pub struct ReservationList {
    api: Arc<dyn ReservationApi>,
    reservations: Vec<Reservation>,
    loading: bool,
    error: Option<UiError>,
    pending_delete: Option<ReservationId>,
}

impl ReservationList {
    pub fn new(api: Arc<dyn ReservationApi>) -> Self {
        Self {
            api,
            reservations: Vec::new(),
            loading: true,
            error: None,
            pending_delete: None,
        }
    }

    pub async fn open(api: Arc<dyn ReservationApi>) -> Self {
        let mut list = Self::new(api);
        list.refresh().await;
        list
    }

    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.api.list().await {
            Ok(reservations) => {
                info!(count = reservations.len(), "reservations loaded");
                self.reservations = reservations;
                self.error = None;
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "failed to load reservations");
                self.error = Some(UiError::from_client_error(UiErrorContext::List, &err));
            }
        }
        self.loading = false;
    }

    pub fn request_delete(&mut self, id: ReservationId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the reservation awaiting confirmation. A reservation the backend
    /// no longer has counts as deleted. Returns whether a row was removed.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete else {
            return false;
        };

        match self.api.delete(id).await {
            Ok(()) => info!(reservation_id = %id, "reservation deleted"),
            Err(err) if err.is_not_found() => {
                info!(reservation_id = %id, "reservation already gone on backend");
            }
            Err(err) => {
                warn!(reservation_id = %id, kind = ?err.kind(), error = %err, "failed to delete reservation");
                self.error = Some(UiError::from_client_error(UiErrorContext::Delete, &err));
                return false;
            }
        }

        self.pending_delete = None;
        let before = self.reservations.len();
        self.reservations.retain(|r| r.id != Some(id));
        self.reservations.len() != before
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    pub fn pending_delete(&self) -> Option<ReservationId> {
        self.pending_delete
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(UiError::message)
    }

    pub fn ui_error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
