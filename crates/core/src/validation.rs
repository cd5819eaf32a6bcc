//! Field validators shared by the create and update paths.
//!
//! Reservation creation and admin edits both go through these functions so
//! the two paths can never drift apart on what a valid email or booking time is.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;

use crate::error::CoreError;
use crate::types::Timestamp;

/// `local@domain.tld` with a 2 to 6 letter top-level segment.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Minimum accepted length for a new plaintext password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Reject an empty or whitespace-only value for a required text field.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Check an email address against the conventional `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !EMAIL_RE.is_match(email) {
        return Err(CoreError::Validation(format!("Invalid email address '{email}'")));
    }
    Ok(())
}

/// Party size must be strictly positive.
pub fn validate_party_size(num_guests: i32) -> Result<(), CoreError> {
    if num_guests <= 0 {
        return Err(CoreError::Validation(
            "Number of guests must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Validate the date-time of a new booking.
///
/// The calendar-day check uses the day as seen from `now`'s offset (the
/// restaurant's local day). A booking for an earlier day is rejected; a
/// booking for today must not be earlier than `now`.
pub fn validate_booking_time(at: Timestamp, now: &DateTime<FixedOffset>) -> Result<(), CoreError> {
    let booked_day = at.with_timezone(&now.timezone()).date_naive();
    let today = now.date_naive();

    if booked_day < today {
        return Err(CoreError::Validation(
            "Reservation date cannot be in the past".into(),
        ));
    }
    if booked_day == today && at < now.with_timezone(&Utc) {
        return Err(CoreError::Validation(
            "Reservation time cannot be earlier than the current time".into(),
        ));
    }
    Ok(())
}

/// Validate a date-time an administrator moves a booking to.
///
/// Full timestamp comparison, no calendar-day leniency.
pub fn validate_rescheduled_time(
    at: Timestamp,
    now: &DateTime<FixedOffset>,
) -> Result<(), CoreError> {
    if at < now.with_timezone(&Utc) {
        return Err(CoreError::Validation(
            "Reservation date and time cannot be in the past".into(),
        ));
    }
    Ok(())
}

/// Password policy for signup, admin creation and resets.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}
