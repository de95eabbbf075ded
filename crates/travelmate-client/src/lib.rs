//! # travelmate-client: I/O Boundary for TravelMate
//!
//! Configuration, session context, the REST client for the booking
//! endpoints, and the async submission workflow built on top of them.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       travelmate-client                                 │
//! │                                                                         │
//! │   ClientConfig ──► BookingClient ──────────┐                            │
//! │   (TOML + env)     (reqwest, bearer token) │ impl BookingGateway        │
//! │                                            ▼                            │
//! │   Session ───────► BookingSubmitter<G: BookingGateway>                  │
//! │   (explicit)         │                                                  │
//! │                      ├─► travelmate_core::BookingForm::validate_all     │
//! │                      ├─► gateway.create_booking ──► api::decode_*       │
//! │                      └─► travelmate_core::receipt::project              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Layered configuration (defaults, file, environment)
//! - [`session`] - Signed-in user context
//! - [`api`] - Wire types and response envelope decoding
//! - [`client`] - HTTP client for `/booking` endpoints
//! - [`gateway`] - Backend trait used by the workflow
//! - [`submission`] - Submit flow, booking history and cancellation
//! - [`error`] - Client error types

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod submission;

pub use client::BookingClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::BookingGateway;
pub use session::Session;
pub use submission::{cancel_booking, load_bookings, BookingSubmitter, Navigation, SubmitOutcome};
