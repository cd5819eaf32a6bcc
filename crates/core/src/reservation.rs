//! Reservation status values and the transitions open to clients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Query value meaning "no status filter" on admin listings.
pub const STATUS_FILTER_ALL: &str = "all";

/// Lifecycle status of a reservation.
///
/// Stored and serialized as the variant name (`"Pending"`, `"Confirmed"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Completed => "Completed",
        }
    }

    /// Whether the reservation has reached a state nothing but an admin can change.
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Completed
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = CoreError;

    /// Exact, case-sensitive match on the four status names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReservationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid reservation status '{s}'")))
    }
}

impl TryFrom<String> for ReservationStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Check that a client may cancel a reservation currently in `current`.
///
/// Cancelling twice is an error, not a no-op.
pub fn ensure_client_can_cancel(current: ReservationStatus) -> Result<(), CoreError> {
    if current.is_closed() {
        return Err(CoreError::InvalidTransition(format!(
            "A {} reservation cannot be cancelled",
            current.as_str().to_lowercase()
        )));
    }
    Ok(())
}

/// The `?status=` filter of the admin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// No restriction.
    Any,
    Only(ReservationStatus),
    /// A value no reservation can carry; the listing is empty.
    Nothing,
}

/// Absent, empty, or exactly [`STATUS_FILTER_ALL`] mean every status. Any
/// other value is an exact status match, so an unknown one matches nothing.
pub fn parse_status_filter(raw: Option<&str>) -> StatusFilter {
    match raw {
        None | Some("") | Some(STATUS_FILTER_ALL) => StatusFilter::Any,
        Some(value) => value
            .parse()
            .map_or(StatusFilter::Nothing, StatusFilter::Only),
    }
}
