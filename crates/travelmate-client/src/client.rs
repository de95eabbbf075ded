//! # Booking Client
//!
//! `reqwest` client for the booking endpoints of the TravelMate REST API.
//!
//! ## Endpoints
//! ```text
//! ┌────────────┬───────────────────────────────┬───────────────────────────┐
//! │ Method     │ Path                          │ Success                   │
//! ├────────────┼───────────────────────────────┼───────────────────────────┤
//! │ POST       │ {base}/booking                │ 201 + created booking     │
//! │ GET        │ {base}/booking/user/:username │ 200 + booking list        │
//! │ DELETE     │ {base}/booking/:id            │ 2xx, status → cancelled   │
//! └────────────┴───────────────────────────────┴───────────────────────────┘
//! ```
//!
//! Every non-2xx answer becomes [`ClientError::Rejected`] carrying the
//! server's `message` when it sent one. Nothing is retried here.

use reqwest::{RequestBuilder, Response};
use tracing::{debug, info, warn};
use travelmate_core::BookingRecord;
use url::Url;

use crate::api::{decode_booking_list, decode_created_booking, decode_error_message, BookingDto};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// HTTP client for the booking API.
#[derive(Debug, Clone)]
pub struct BookingClient {
    base_url: Url,
    http: reqwest::Client,
}

impl BookingClient {
    /// Builds a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(BookingClient {
            base_url: config.base_url()?,
            http,
        })
    }

    /// A client for `base_url` with default settings.
    pub fn with_base_url(base_url: Url) -> ClientResult<Self> {
        let mut config = ClientConfig::default();
        config.api.base_url = base_url.to_string();
        Self::new(&config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /booking`. Returns the record the server stored.
    pub async fn create_booking(
        &self,
        session: &Session,
        record: &BookingRecord,
    ) -> ClientResult<BookingRecord> {
        let url = self.endpoint(&["booking"])?;
        info!(
            booking_id = %record.booking_id,
            hotel = %record.hotel_name,
            rooms = record.no_of_rooms,
            amount = %record.amount,
            "Creating booking"
        );

        let request = self.http.post(url).json(&BookingDto::from(record));
        let response = self.send(session, request).await?;
        let body = response.bytes().await?;
        decode_created_booking(&body)
    }

    /// `GET /booking/user/:username`.
    pub async fn list_user_bookings(
        &self,
        session: &Session,
        user_name: &str,
    ) -> ClientResult<Vec<BookingRecord>> {
        let url = self.endpoint(&["booking", "user", user_name])?;
        debug!(user = %user_name, "Listing bookings");

        let response = self.send(session, self.http.get(url)).await?;
        let body = response.bytes().await?;
        decode_booking_list(&body)
    }

    /// `DELETE /booking/:id`.
    pub async fn cancel_booking(&self, session: &Session, booking_id: &str) -> ClientResult<()> {
        let url = self.endpoint(&["booking", booking_id])?;
        info!(booking_id = %booking_id, "Cancelling booking");

        self.send(session, self.http.delete(url)).await?;
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, session: &Session, request: RequestBuilder) -> ClientResult<Response> {
        let request = match session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = decode_error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        warn!(status = status.as_u16(), message = %message, "Booking API rejected request");

        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
