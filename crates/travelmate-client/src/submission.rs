//! # Booking Submission Workflow
//!
//! Validates a booking form, sends it to the backend, and turns the answer
//! into something the UI can act on.
//!
//! ## Submit Flow
//! ```text
//! submit(form, hotel, session, now)
//!      │
//!      ├── already Validating/Submitting? ──► Err(SubmissionInProgress)
//!      │
//!      ▼
//! Idle ──► Validating ── form.validate_all(today)
//!      │        │
//!      │        └── invalid ──► Idle, SubmitOutcome::Invalid(errors)   (no request)
//!      ▼
//! Submitting ── gateway.create_booking(record)
//!      │
//!      ├── Ok(created) ──► Confirmed: form.reset(), receipt projected,
//!      │                   SubmitOutcome::Confirmed { navigate_to: BookingsList }
//!      │
//!      └── Err(e) ──────► Failed: draft untouched,
//!                         SubmitOutcome::Failed { message: e.user_message() }
//! ```
//!
//! There is no automatic retry. A dropped `submit` future leaves the state at
//! `Submitting` until [`BookingSubmitter::abandon`] is called, so a late
//! resubmission cannot slip in behind an unanswered request.

use chrono::{DateTime, TimeZone, Utc};
use tracing::{info, warn};
use travelmate_core::{
    project, BookingForm, BookingIdScheme, BookingQuery, BookingRecord, CoreError, FormErrors,
    Hotel, ReceiptView, Submission, SubmissionState,
};

use crate::error::{ClientError, ClientResult};
use crate::gateway::BookingGateway;
use crate::session::Session;

/// Where the UI should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    BookingsList,
}

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Local validation failed; every field error is now visible.
    Invalid(FormErrors),
    Confirmed {
        record: BookingRecord,
        receipt: ReceiptView,
        navigate_to: Navigation,
    },
    /// The backend refused or could not be reached. The draft is intact.
    Failed { message: String, error: ClientError },
}

impl SubmitOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubmitOutcome::Confirmed { .. })
    }
}

/// Drives one booking form's submissions against a [`BookingGateway`].
#[derive(Debug)]
pub struct BookingSubmitter<G> {
    gateway: G,
    submission: Submission,
    id_scheme: BookingIdScheme,
}

impl<G: BookingGateway> BookingSubmitter<G> {
    pub fn new(gateway: G, id_scheme: BookingIdScheme) -> Self {
        BookingSubmitter {
            gateway,
            submission: Submission::new(),
            id_scheme,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.submission.state()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Runs the full submit flow once.
    ///
    /// Card expiry is judged against the calendar date of `now` in its own
    /// time zone; the booking id uses the same instant in UTC.
    ///
    /// ## Errors
    /// - [`ClientError::MissingSession`] without a signed-in user
    /// - [`CoreError::SubmissionInProgress`] while a previous submit is pending
    ///
    /// Validation and backend failures are not errors: they come back as
    /// [`SubmitOutcome::Invalid`] and [`SubmitOutcome::Failed`].
    pub async fn submit<Tz: TimeZone>(
        &mut self,
        form: &mut BookingForm,
        hotel: Option<&Hotel>,
        session: &Session,
        now: DateTime<Tz>,
    ) -> ClientResult<SubmitOutcome> {
        if !session.is_signed_in() {
            return Err(ClientError::MissingSession);
        }
        self.submission.begin()?;

        let valid = match form.validate_all(now.date_naive()) {
            Ok(valid) => valid,
            Err(errors) => {
                self.submission.reject()?;
                info!(fields = errors.errors.len(), "Booking form has errors");
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };

        self.submission.send()?;
        let booking_id = self.id_scheme.generate(now.with_timezone(&Utc));
        let local = valid.to_record(booking_id, session.user_name());
        info!(
            booking_id = %local.booking_id,
            hotel = %local.hotel_name,
            package = %local.package,
            rooms = local.no_of_rooms,
            amount = %local.amount,
            "Submitting booking"
        );

        match self.gateway.create_booking(session, &local).await {
            Ok(created) => {
                self.submission.confirm()?;
                form.reset();

                let receipt = match project(&created, hotel, Some(&valid.offering)) {
                    Ok(receipt) => receipt,
                    Err(e) => {
                        warn!(error = %e, "Server record could not be projected, using submitted values");
                        let fallback = BookingRecord {
                            booking_id: created.booking_id.clone(),
                            ..local
                        };
                        project(&fallback, hotel, Some(&valid.offering))?
                    }
                };
                if !receipt.amount_matches {
                    warn!(
                        booking_id = %created.booking_id,
                        stored = %created.amount,
                        computed = %receipt.total,
                        "Stored amount differs from computed total"
                    );
                }

                info!(booking_id = %created.booking_id, "Booking confirmed");
                Ok(SubmitOutcome::Confirmed {
                    record: created,
                    receipt,
                    navigate_to: Navigation::BookingsList,
                })
            }
            Err(error) => {
                self.submission.fail()?;
                let message = error.user_message();
                warn!(error = %error, "Booking submission failed");
                Ok(SubmitOutcome::Failed { message, error })
            }
        }
    }

    /// Dismisses a confirmation or failure, back to `Idle`.
    pub fn acknowledge(&mut self) -> ClientResult<()> {
        Ok(self.submission.acknowledge()?)
    }

    /// The caller went away. Any response still on its way is ignored.
    pub fn abandon(&mut self) -> bool {
        let in_flight = self.submission.abandon();
        if in_flight {
            info!("Abandoned in-flight booking submission");
        }
        in_flight
    }
}

// =============================================================================
// Booking History
// =============================================================================

/// Fetches the session user's bookings and applies `query`.
pub async fn load_bookings<G: BookingGateway>(
    gateway: &G,
    session: &Session,
    query: &BookingQuery,
) -> ClientResult<Vec<BookingRecord>> {
    if !session.is_signed_in() {
        return Err(ClientError::MissingSession);
    }
    let all = gateway.list_user_bookings(session, session.user_name()).await?;
    Ok(query.apply(&all).into_iter().cloned().collect())
}

/// Cancels `record` if its status allows it.
pub async fn cancel_booking<G: BookingGateway>(
    gateway: &G,
    session: &Session,
    record: &BookingRecord,
) -> ClientResult<()> {
    if !record.can_cancel() {
        return Err(CoreError::NotCancellable {
            booking_id: record.booking_id.clone(),
            status: record.status.to_string(),
        }
        .into());
    }
    gateway.cancel_booking(session, &record.booking_id).await
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use travelmate_core::{BookingStatus, CardType, Field, Money, PackageOffering};

    /// In-memory backend answering `create_booking` from a queue.
    #[derive(Default)]
    struct FakeGateway {
        replies: Mutex<Vec<ClientResult<Option<String>>>>,
        stored: Mutex<Vec<BookingRecord>>,
        calls: AtomicUsize,
    }

    impl FakeGateway {
        /// Accept, optionally replacing the booking id.
        fn accepting(server_id: Option<&str>) -> Self {
            let gw = FakeGateway::default();
            gw.replies.lock().unwrap().push(Ok(server_id.map(String::from)));
            gw
        }

        fn rejecting(status: u16, message: &str) -> Self {
            let gw = FakeGateway::default();
            gw.replies.lock().unwrap().push(Err(ClientError::Rejected {
                status,
                message: message.to_string(),
            }));
            gw
        }
    }

    impl BookingGateway for FakeGateway {
        async fn create_booking(
            &self,
            _session: &Session,
            record: &BookingRecord,
        ) -> ClientResult<BookingRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.replies.lock().unwrap().pop().unwrap_or(Ok(None));
            let server_id = reply?;
            let mut created = record.clone();
            if let Some(id) = server_id {
                created.booking_id = id;
            }
            self.stored.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn list_user_bookings(
            &self,
            _session: &Session,
            user_name: &str,
        ) -> ClientResult<Vec<BookingRecord>> {
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_name == user_name)
                .cloned()
                .collect())
        }

        async fn cancel_booking(&self, _session: &Session, booking_id: &str) -> ClientResult<()> {
            let mut stored = self.stored.lock().unwrap();
            match stored.iter_mut().find(|r| r.booking_id == booking_id) {
                Some(r) => {
                    r.status = BookingStatus::Cancelled;
                    Ok(())
                }
                None => Err(ClientError::Rejected {
                    status: 404,
                    message: "Booking not found".into(),
                }),
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap()
    }

    fn filled_form() -> BookingForm {
        let today = now().date_naive();
        let mut form = BookingForm::new(PackageOffering {
            hotel_name: "Lagoon View".to_string(),
            package_name: "Deluxe".to_string(),
            unit_price: Money::from_cents(10000),
            rooms_available: 5,
        });
        form.set_rooms("2");
        form.set_check_in(NaiveDate::from_ymd_opt(2024, 6, 1));
        form.set_check_out(NaiveDate::from_ymd_opt(2024, 6, 3));
        form.set_card_type(Some(CardType::Visa));
        form.set_card_number("4111111111111111");
        form.set_card_expiry("12/26", today);
        form.set_cvv("123");
        form
    }

    fn alice() -> Session {
        Session::new("alice", Some("token".into()))
    }

    #[tokio::test]
    async fn test_expiry_judged_on_local_calendar_date() {
        // 05:00 on June 1 at UTC+10 is still May 31 in UTC.
        let tz = FixedOffset::east_opt(10 * 3600).unwrap();
        let local_now = tz.with_ymd_and_hms(2024, 6, 1, 5, 0, 0).unwrap();
        assert_eq!(
            local_now.with_timezone(&Utc).date_naive(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
        );

        let mut submitter = BookingSubmitter::new(FakeGateway::accepting(None), BookingIdScheme::Timestamp);
        let mut form = filled_form();
        form.set_card_expiry("05/24", now().date_naive());

        let outcome = submitter.submit(&mut form, None, &alice(), local_now).await.unwrap();
        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected the card to be expired on the local date");
        };
        assert_eq!(errors.get(Field::CardExpiry), Some("card has expired"));
        assert_eq!(submitter.gateway().calls.load(Ordering::SeqCst), 0);

        let outcome = submitter
            .submit(&mut form, None, &alice(), local_now.with_timezone(&Utc))
            .await
            .unwrap();
        let SubmitOutcome::Confirmed { record, .. } = outcome else {
            panic!("expected confirmation on the UTC date");
        };
        assert_eq!(
            record.booking_id,
            format!("BK-{}", local_now.timestamp_millis())
        );
    }

    #[tokio::test]
    async fn test_successful_submit_resets_form_and_projects_receipt() {
        let mut submitter = BookingSubmitter::new(FakeGateway::accepting(None), BookingIdScheme::Timestamp);
        let mut form = filled_form();

        let outcome = submitter.submit(&mut form, None, &alice(), now()).await.unwrap();

        match outcome {
            SubmitOutcome::Confirmed { record, receipt, navigate_to } => {
                assert_eq!(record.booking_id, format!("BK-{}", now().timestamp_millis()));
                assert_eq!(record.amount, Money::from_cents(60000));
                assert_eq!(record.user_name, "alice");
                assert_eq!(receipt.total_display, "$600.00");
                assert_eq!(receipt.masked_card, "4111-XXXX-XXXX-1111");
                assert_eq!(navigate_to, Navigation::BookingsList);
            }
            other => panic!("expected confirmation, got {other:?}"),
        }
        assert_eq!(submitter.state(), SubmissionState::Confirmed);
        assert!(form.draft().card_number.is_empty());
        assert!(form.quote().is_none());
    }

    #[tokio::test]
    async fn test_server_id_is_authoritative() {
        let mut submitter =
            BookingSubmitter::new(FakeGateway::accepting(Some("BK-SRV-42")), BookingIdScheme::Uuid);
        let mut form = filled_form();

        let outcome = submitter.submit(&mut form, None, &alice(), now()).await.unwrap();
        let SubmitOutcome::Confirmed { record, receipt, .. } = outcome else {
            panic!("expected confirmation");
        };
        assert_eq!(record.booking_id, "BK-SRV-42");
        assert_eq!(receipt.booking_id, "BK-SRV-42");
    }

    #[tokio::test]
    async fn test_rejection_keeps_draft_and_shows_server_message() {
        let mut submitter = BookingSubmitter::new(
            FakeGateway::rejecting(400, "Duplicate booking_id"),
            BookingIdScheme::Timestamp,
        );
        let mut form = filled_form();
        let before = form.draft().clone();

        let outcome = submitter.submit(&mut form, None, &alice(), now()).await.unwrap();

        match outcome {
            SubmitOutcome::Failed { message, .. } => assert_eq!(message, "Duplicate booking_id"),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(form.draft(), &before);
        assert_eq!(submitter.state(), SubmissionState::Failed);

        // resubmission is allowed after a failure
        let outcome = submitter.submit(&mut form, None, &alice(), now()).await.unwrap();
        assert!(outcome.is_confirmed());
    }

    #[tokio::test]
    async fn test_network_failure_gets_retry_text() {
        let gw = FakeGateway::default();
        gw.replies
            .lock()
            .unwrap()
            .push(Err(ClientError::Network("connection reset".into())));
        let mut submitter = BookingSubmitter::new(gw, BookingIdScheme::Timestamp);
        let mut form = filled_form();

        let outcome = submitter.submit(&mut form, None, &alice(), now()).await.unwrap();
        let SubmitOutcome::Failed { message, error } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(message, crate::error::NETWORK_RETRY_MESSAGE);
        assert!(error.is_retryable());
    }

    #[tokio::test]
    async fn test_invalid_form_never_calls_backend() {
        let mut submitter = BookingSubmitter::new(FakeGateway::accepting(None), BookingIdScheme::Timestamp);
        let mut form = filled_form();
        form.set_cvv("12");

        let outcome = submitter.submit(&mut form, None, &alice(), now()).await.unwrap();

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation errors");
        };
        assert!(errors.get(Field::Cvv).is_some());
        assert_eq!(submitter.gateway().calls.load(Ordering::SeqCst), 0);
        assert_eq!(submitter.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_missing_session() {
        let mut submitter = BookingSubmitter::new(FakeGateway::accepting(None), BookingIdScheme::Timestamp);
        let mut form = filled_form();
        let result = submitter
            .submit(&mut form, None, &Session::anonymous(""), now())
            .await;
        assert!(matches!(result, Err(ClientError::MissingSession)));
        assert_eq!(submitter.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_abandoned_request_blocks_until_reset() {
        let mut submitter = BookingSubmitter::new(FakeGateway::accepting(None), BookingIdScheme::Timestamp);
        // simulate a submit future dropped mid-request
        submitter.submission.begin().unwrap();
        submitter.submission.send().unwrap();

        let mut form = filled_form();
        let result = submitter.submit(&mut form, None, &alice(), now()).await;
        assert!(matches!(
            result,
            Err(ClientError::Core(CoreError::SubmissionInProgress))
        ));

        assert!(submitter.abandon());
        let outcome = submitter.submit(&mut form, None, &alice(), now()).await.unwrap();
        assert!(outcome.is_confirmed());
        submitter.acknowledge().unwrap();
        assert_eq!(submitter.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_history_and_cancel() {
        let gw = FakeGateway::accepting(None);
        let mut submitter = BookingSubmitter::new(gw, BookingIdScheme::Timestamp);
        let mut form = filled_form();
        submitter.submit(&mut form, None, &alice(), now()).await.unwrap();

        let gw = submitter.gateway();
        let bookings = load_bookings(gw, &alice(), &BookingQuery::default()).await.unwrap();
        assert_eq!(bookings.len(), 1);

        cancel_booking(gw, &alice(), &bookings[0]).await.unwrap();
        let bookings = load_bookings(gw, &alice(), &BookingQuery::default()).await.unwrap();
        assert_eq!(bookings[0].status, BookingStatus::Cancelled);

        let err = cancel_booking(gw, &alice(), &bookings[0]).await.unwrap_err();
        assert!(matches!(err, ClientError::Core(CoreError::NotCancellable { .. })));
    }
}
