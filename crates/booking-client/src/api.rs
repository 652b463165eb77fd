//! HTTP client for the booking backend.
//!
//! Three contracts: the tutor's weekly schedule, the booked intervals for a
//! selected date, and session-request submission. Responses are trusted as
//! authoritative; this client only shapes and transports them.

use std::time::Duration;

use booking_engine::{BookedInterval, WeeklySchedule};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::ClientError;

/// Per-request timeout. A hung backend degrades to "conflicts unknown" in
/// the session rather than a frozen grid.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Body for `POST /session-requests`, the terminal action once a selection
/// is accepted. Authoritative conflict detection happens server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionRequest {
    pub tutor_id: String,
    pub requested_start: DateTime<Utc>,
    pub requested_end: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A created session request as echoed back by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub id: String,
    pub tutor_id: String,
    pub requested_start: DateTime<Utc>,
    pub requested_end: DateTime<Utc>,
    pub status: String,
}

/// Thin typed wrapper over the backend's REST surface.
pub struct BookingApi {
    http: reqwest::Client,
    base_url: Url,
}

impl BookingApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ClientError::BaseUrl(e.to_string()))?;
        // Joining relative paths requires the base to end in a slash.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base_url })
    }

    /// `GET tutors/{id}/schedule` -- the recurring weekly availability.
    pub async fn fetch_schedule(&self, tutor_id: &str) -> Result<WeeklySchedule, ClientError> {
        let url = self.endpoint(&format!("tutors/{tutor_id}/schedule"))?;
        debug!(%tutor_id, "fetching weekly schedule");
        let response = check_status(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// `GET tutors/{id}/booked?date=YYYY-MM-DD` -- confirmed and pending
    /// sessions on the tutor's calendar for one date.
    pub async fn fetch_booked(
        &self,
        tutor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<BookedInterval>, ClientError> {
        let url = self.endpoint(&format!("tutors/{tutor_id}/booked"))?;
        debug!(%tutor_id, %date, "fetching booked intervals");
        let response = check_status(
            self.http
                .get(url)
                .query(&[("date", date.format("%Y-%m-%d").to_string())])
                .send()
                .await?,
        )
        .await?;
        Ok(response.json().await?)
    }

    /// `POST session-requests`. HTTP 409 means another student booked the
    /// same time first; the caller must refresh its conflict view before
    /// another attempt.
    pub async fn submit_request(
        &self,
        request: &NewSessionRequest,
    ) -> Result<SessionRequest, ClientError> {
        let url = self.endpoint("session-requests")?;
        let response = self.http.post(url).json(request).send().await?;

        if response.status() == StatusCode::CONFLICT {
            let body = response.text().await.unwrap_or_default();
            warn!(tutor_id = %request.tutor_id, "session request rejected: time already taken");
            return Err(ClientError::SlotTaken(body));
        }

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::BaseUrl(e.to_string()))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(%status, "backend request failed");
    Err(ClientError::Status { status, body })
}
