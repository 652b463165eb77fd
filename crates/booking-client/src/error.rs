//! Error types for the backend client and the booking session.

use booking_engine::SelectionError;
use thiserror::Error;

/// Failures talking to the booking backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The backend rejected a session request because another student
    /// booked the same time first.
    #[error("This time was just booked by someone else")]
    SlotTaken(String),

    #[error("Invalid backend URL: {0}")]
    BaseUrl(String),
}

/// User-facing failures of the booking session itself.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Booked intervals for the selected date are loading or could not be
    /// fetched; selection and submission stay blocked until confirmed.
    #[error("Booked times for this day are not confirmed yet")]
    ConflictsUnknown,

    #[error("Select a start and end time first")]
    NoSelection,

    /// The selected slot no longer maps to a real instant (the selection
    /// outlived a schedule or timezone change).
    #[error("The selected time could not be resolved; pick it again")]
    StaleSelection,

    #[error(transparent)]
    Selection(#[from] SelectionError),
}
