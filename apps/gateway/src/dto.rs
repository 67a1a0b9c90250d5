//! Request bodies validated at the gateway before anything crosses the wire.

use axum_helpers::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Booking request. Beyond the derive checks, the date window is validated
/// against the current instant before forwarding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookItemRequest {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BookItemRequest {
    /// end strictly after start, start not in the past.
    pub fn ensure_period_valid(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        if self.end <= self.start {
            return Err(AppError::BadRequest(
                "End date must be after start date".to_string(),
            ));
        }
        if self.start < now {
            return Err(AppError::BadRequest(
                "Start date must not be in the past".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 255))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequestRequest {
    #[validate(length(min = 1))]
    pub description: String,
}

const KNOWN_STATES: [&str; 6] = ["ALL", "CURRENT", "PAST", "FUTURE", "WAITING", "REJECTED"];

/// Normalizes a state filter, rejecting values the server would not accept.
pub fn validate_state(state: &str) -> Result<String, AppError> {
    let normalized = state.to_ascii_uppercase();
    if KNOWN_STATES.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(AppError::BadRequest(format!("Unknown state: {}", state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(start_offset: Duration, end_offset: Duration) -> BookItemRequest {
        let now = Utc::now();
        BookItemRequest {
            item_id: 1,
            start: now + start_offset,
            end: now + end_offset,
        }
    }

    #[test]
    fn valid_future_period_passes() {
        let req = request(Duration::days(1), Duration::days(2));
        assert!(req.ensure_period_valid(Utc::now()).is_ok());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let req = request(Duration::days(2), Duration::days(1));
        let err = req.ensure_period_valid(Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("after start")));
    }

    #[test]
    fn end_equal_to_start_is_rejected() {
        let now = Utc::now();
        let instant = now + Duration::days(1);
        let req = BookItemRequest {
            item_id: 1,
            start: instant,
            end: instant,
        };
        assert!(req.ensure_period_valid(now).is_err());
    }

    #[test]
    fn past_start_is_rejected() {
        let req = request(Duration::days(-1), Duration::days(1));
        let err = req.ensure_period_valid(Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("past")));
    }

    #[test]
    fn start_exactly_now_passes() {
        let now = Utc::now();
        let req = BookItemRequest {
            item_id: 1,
            start: now,
            end: now + Duration::days(1),
        };
        assert!(req.ensure_period_valid(now).is_ok());
    }

    #[test]
    fn known_states_normalize_case_insensitively() {
        assert_eq!(validate_state("all").unwrap(), "ALL");
        assert_eq!(validate_state("Waiting").unwrap(), "WAITING");
        assert_eq!(validate_state("REJECTED").unwrap(), "REJECTED");
    }

    #[test]
    fn unknown_state_is_rejected_with_the_offending_value() {
        let err = validate_state("SOMETIME").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Unknown state: SOMETIME"));
    }
}
