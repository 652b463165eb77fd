//! # booking-client
//!
//! Backend-facing layer for the tutoring session-booking front end: typed
//! REST contracts over `reqwest`, and a [`session::BookingSession`] view
//! controller that owns the schedule cache, the per-date conflict cache,
//! and the selection state, with generation tickets discarding fetch
//! responses that arrive for a day the user has already left.
//!
//! All scheduling logic lives in `booking-engine`; this crate only moves
//! data and sequences the fetch lifecycle.
//!
//! ## Modules
//!
//! - [`api`] — REST client for the three backend contracts
//! - [`session`] — the booking view session and fetch lifecycle
//! - [`error`] — error types

pub mod api;
pub mod error;
pub mod session;

pub use api::{BookingApi, NewSessionRequest, SessionRequest};
pub use error::{ClientError, SessionError};
pub use session::{BookedState, BookingSession, FetchTicket};
