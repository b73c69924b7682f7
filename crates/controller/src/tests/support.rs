//! In-memory reservation backend and a pinned clock for controller tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use client_core::{ClientError, ClientResult, ReservationApi};
use shared::{
    domain::{parse_date, parse_time, Reservation, ReservationFormData, ReservationId},
    protocol::Endpoint,
};
use tokio::sync::Mutex;

use crate::validation::Clock;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("date")
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(today()))
}

pub fn valid_form() -> ReservationFormData {
    ReservationFormData {
        name: "John Doe".into(),
        email: "john@example.com".into(),
        phone: "1234567890".into(),
        date: "2026-10-18".into(),
        time: "18:00".into(),
        message: "Test".into(),
    }
}

pub fn stored(id: i64, form: &ReservationFormData) -> Reservation {
    Reservation {
        id: Some(ReservationId(id)),
        name: form.name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        date: parse_date(&form.date).expect("date"),
        time: parse_time(&form.time).expect("time"),
        message: form.message.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Get(ReservationId),
    Create(ReservationFormData),
    Update(ReservationId, ReservationFormData),
    Delete(ReservationId),
}

#[derive(Default)]
pub struct FakeApi {
    rows: Mutex<Vec<Reservation>>,
    calls: Mutex<Vec<ApiCall>>,
    failure: Mutex<Option<ClientError>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_rows(rows: Vec<Reservation>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            ..Self::default()
        })
    }

    /// Every following call fails with `err` until cleared.
    pub async fn fail_with(&self, err: ClientError) {
        *self.failure.lock().await = Some(err);
    }

    pub async fn clear_failure(&self) {
        *self.failure.lock().await = None;
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: ApiCall) -> ClientResult<()> {
        self.calls.lock().await.push(call);
        match self.failure.lock().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: ReservationId) -> ClientError {
        ClientError::NotFound {
            path: Endpoint::Reservation(id).path(),
        }
    }
}

pub fn server_error() -> ClientError {
    ClientError::ServerError {
        status: 500,
        path: Endpoint::Reservations.path(),
        body: "boom".into(),
    }
}

#[async_trait]
impl ReservationApi for FakeApi {
    async fn list(&self) -> ClientResult<Vec<Reservation>> {
        self.record(ApiCall::List).await?;
        Ok(self.rows.lock().await.clone())
    }

    async fn get(&self, id: ReservationId) -> ClientResult<Reservation> {
        self.record(ApiCall::Get(id)).await?;
        self.rows
            .lock()
            .await
            .iter()
            .find(|r| r.id == Some(id))
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, data: &ReservationFormData) -> ClientResult<Reservation> {
        self.record(ApiCall::Create(data.clone())).await?;
        let mut rows = self.rows.lock().await;
        let next_id = rows.iter().filter_map(|r| r.id).map(|id| id.0).max().unwrap_or(0) + 1;
        let row = stored(next_id, data);
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: ReservationId,
        data: &ReservationFormData,
    ) -> ClientResult<Reservation> {
        self.record(ApiCall::Update(id, data.clone())).await?;
        let mut rows = self.rows.lock().await;
        let slot = rows
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| Self::not_found(id))?;
        *slot = stored(id.0, data);
        Ok(slot.clone())
    }

    async fn delete(&self, id: ReservationId) -> ClientResult<()> {
        self.record(ApiCall::Delete(id)).await?;
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|r| r.id != Some(id));
        if rows.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
