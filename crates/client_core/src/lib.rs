use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Reservation, ReservationFormData, ReservationId},
    protocol::Endpoint,
};
use tracing::{info, warn};

pub mod config;
pub mod error;

pub use config::{load_settings, ClientSettings, SettingsError};
pub use error::{ClientError, ClientResult};

use error::{classify_status, classify_transport, decode_failure};

/// Remote reservation resource. Every failure is already classified.
#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Reservation>>;
    async fn get(&self, id: ReservationId) -> ClientResult<Reservation>;
    async fn create(&self, data: &ReservationFormData) -> ClientResult<Reservation>;
    async fn update(&self, id: ReservationId, data: &ReservationFormData)
        -> ClientResult<Reservation>;
    async fn delete(&self, id: ReservationId) -> ClientResult<()>;
}

struct RawResponse {
    status: StatusCode,
    body: String,
}

impl RawResponse {
    fn decode<T: DeserializeOwned>(self, path: &str) -> ClientResult<T> {
        serde_json::from_str(&self.body).map_err(|err| {
            warn!(path, status = self.status.as_u16(), error = %err, "undecodable response body");
            decode_failure(self.status, path, self.body)
        })
    }
}

pub struct ReservationClient {
    http: Client,
    base_url: String,
}

impl ReservationClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, SettingsError> {
        let base_url = settings.base_url()?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probes the backend's health endpoint.
    pub async fn health(&self) -> ClientResult<()> {
        self.execute(Method::GET, Endpoint::Health, None).await?;
        Ok(())
    }

    /// Single choke point for every call: sends, logs, and classifies.
    async fn execute(
        &self,
        method: Method,
        endpoint: Endpoint,
        payload: Option<&ReservationFormData>,
    ) -> ClientResult<RawResponse> {
        let path = endpoint.path();
        let mut request = self
            .http
            .request(method.clone(), format!("{}{path}", self.base_url));
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => {
                        classify_status(status, &path, body).map(|body| RawResponse { status, body })
                    }
                    Err(err) => Err(classify_transport(&err)),
                }
            }
            Err(err) => Err(classify_transport(&err)),
        };

        match &outcome {
            Ok(raw) => info!(
                method = %method,
                path = %path,
                status = raw.status.as_u16(),
                "reservation api call completed"
            ),
            Err(err) => warn!(
                method = %method,
                path = %path,
                kind = ?err.kind(),
                status = ?err.status(),
                error = %err,
                "reservation api call failed"
            ),
        }
        outcome
    }
}

#[async_trait]
impl ReservationApi for ReservationClient {
    async fn list(&self) -> ClientResult<Vec<Reservation>> {
        let endpoint = Endpoint::Reservations;
        self.execute(Method::GET, endpoint, None)
            .await?
            .decode(&endpoint.path())
    }

    async fn get(&self, id: ReservationId) -> ClientResult<Reservation> {
        let endpoint = Endpoint::Reservation(id);
        self.execute(Method::GET, endpoint, None)
            .await?
            .decode(&endpoint.path())
    }

    async fn create(&self, data: &ReservationFormData) -> ClientResult<Reservation> {
        let endpoint = Endpoint::Reservations;
        self.execute(Method::POST, endpoint, Some(data))
            .await?
            .decode(&endpoint.path())
    }

    async fn update(
        &self,
        id: ReservationId,
        data: &ReservationFormData,
    ) -> ClientResult<Reservation> {
        let endpoint = Endpoint::Reservation(id);
        self.execute(Method::PUT, endpoint, Some(data))
            .await?
            .decode(&endpoint.path())
    }

    async fn delete(&self, id: ReservationId) -> ClientResult<()> {
        self.execute(Method::DELETE, Endpoint::Reservation(id), None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod error_tests;
