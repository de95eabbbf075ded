//! Submission workflow against a mocked booking API over real HTTP.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::json;
use travelmate_client::{BookingClient, BookingSubmitter, Session, SubmitOutcome};
use travelmate_core::{BookingIdScheme, BookingForm, CardType, Money, PackageOffering, SubmissionState};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap()
}

fn filled_form() -> BookingForm {
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
    form.set_card_number("4111 1111 1111 1111");
    form.set_card_expiry("12/26", now().date_naive());
    form.set_cvv("123");
    form
}

async fn submitter_for(server: &MockServer) -> BookingSubmitter<BookingClient> {
    let base = server.uri().parse::<Url>().unwrap();
    BookingSubmitter::new(BookingClient::with_base_url(base).unwrap(), BookingIdScheme::Timestamp)
}

#[tokio::test]
async fn duplicate_booking_id_is_shown_verbatim_and_draft_survives() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/booking"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "Duplicate booking_id" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut submitter = submitter_for(&server).await;
    let mut form = filled_form();
    let before = form.draft().clone();

    let outcome = submitter
        .submit(&mut form, None, &Session::anonymous("alice"), now())
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Failed { message, .. } => assert_eq!(message, "Duplicate booking_id"),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(form.draft(), &before);
    assert_eq!(submitter.state(), SubmissionState::Failed);
}

#[tokio::test]
async fn created_booking_echo_produces_receipt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/booking"))
        .respond_with(|req: &Request| {
            let sent: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            ResponseTemplate::new(201).set_body_json(json!({ "data": sent }))
        })
        .expect(1)
        .mount(&server)
        .await;

    let mut submitter = submitter_for(&server).await;
    let mut form = filled_form();

    let outcome = submitter
        .submit(&mut form, None, &Session::anonymous("alice"), now())
        .await
        .unwrap();

    let SubmitOutcome::Confirmed { record, receipt, .. } = outcome else {
        panic!("expected confirmation");
    };
    assert_eq!(record.card_number, "4111111111111111");
    assert_eq!(record.amount, Money::from_cents(60000));
    assert_eq!(receipt.total_display, "$600.00");
    assert_eq!(receipt.masked_card, "4111-XXXX-XXXX-1111");
    assert!(receipt.amount_matches);
    assert!(form.draft().card_number.is_empty());
}
