//! Wire types for the Zoom meeting endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Zoom's meeting type code for a one-off scheduled meeting.
pub const SCHEDULED_MEETING: i32 = 2;

/// Body for `POST /users/me/meetings`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMeeting {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    #[serde(rename = "type", default = "scheduled")]
    pub meeting_type: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Minutes.
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    /// Zoom caps passcodes at 10 characters.
    #[validate(length(max = 10))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn scheduled() -> i32 {
    SCHEDULED_MEETING
}

/// Body for `PATCH /meetings/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMeeting {
    #[validate(length(min = 1, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub host_id: Option<String>,
    pub topic: String,
    #[serde(rename = "type", default)]
    pub meeting_type: i32,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default)]
    pub join_url: Option<String>,
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of `GET /users/me/meetings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingList {
    #[serde(default)]
    pub page_size: i32,
    #[serde(default)]
    pub total_records: i32,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
}

/// Response of the OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}
