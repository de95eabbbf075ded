//! The seam between the submission workflow and the booking backend.
//!
//! [`BookingClient`] is the production implementation. Tests plug in an
//! in-memory gateway to drive the workflow without a server.

use std::future::Future;

use travelmate_core::BookingRecord;

use crate::client::BookingClient;
use crate::error::ClientResult;
use crate::session::Session;

/// Booking operations the workflow needs from the backend.
pub trait BookingGateway: Send + Sync {
    /// Persists `record`; the returned record (and its id) is authoritative.
    fn create_booking(
        &self,
        session: &Session,
        record: &BookingRecord,
    ) -> impl Future<Output = ClientResult<BookingRecord>> + Send;

    fn list_user_bookings(
        &self,
        session: &Session,
        user_name: &str,
    ) -> impl Future<Output = ClientResult<Vec<BookingRecord>>> + Send;

    fn cancel_booking(
        &self,
        session: &Session,
        booking_id: &str,
    ) -> impl Future<Output = ClientResult<()>> + Send;
}

impl BookingGateway for BookingClient {
    async fn create_booking(
        &self,
        session: &Session,
        record: &BookingRecord,
    ) -> ClientResult<BookingRecord> {
        BookingClient::create_booking(self, session, record).await
    }

    async fn list_user_bookings(
        &self,
        session: &Session,
        user_name: &str,
    ) -> ClientResult<Vec<BookingRecord>> {
        BookingClient::list_user_bookings(self, session, user_name).await
    }

    async fn cancel_booking(&self, session: &Session, booking_id: &str) -> ClientResult<()> {
        BookingClient::cancel_booking(self, session, booking_id).await
    }
}
