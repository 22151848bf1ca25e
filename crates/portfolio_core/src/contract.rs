use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub const CONTACT_TABLE_NAME: &str = "ContactFormSubmissions";
pub const VISITOR_TABLE_NAME: &str = "VisitorLogs";

pub const DEFAULT_REFERRAL_CODE: &str = "Direct";
pub const DEFAULT_PAGE: &str = "unknown";

pub const CONTACT_SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const CONTACT_FAILURE_MESSAGE: &str = "Failed to submit form.";
pub const VISIT_SUCCESS_MESSAGE: &str = "Visit logged!";
pub const VISIT_FAILURE_MESSAGE: &str = "Something went wrong";

const CONTACT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const VISIT_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const MICROS_SUFFIX_FORMAT: &str = "%.6f";

/// Reasons an incoming event could not be turned into a request body.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("event payload must be a JSON object")]
    NotAnObject,
    #[error("event has no body")]
    MissingBody,
    #[error("event body must be a JSON-encoded string")]
    BodyNotString,
    #[error("request body must be a JSON object")]
    BodyNotObject,
    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

/// Fields read from a contact-form submission. All of them may be absent.
/// A present field must be a string or null; numbers, booleans, and nested
/// values fail decoding as a malformed body.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "referralCode")]
    pub referral_code: Option<String>,
}

/// Fields read from a page-visit beacon. Anything else the client sends,
/// including its own `timestamp`, is ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct VisitRequest {
    pub page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "referralCode")]
    pub referral_code: String,
    pub timestamp: String,
}

impl ContactSubmission {
    pub fn from_request(request: ContactRequest, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: request.name,
            email: request.email,
            message: request.message,
            referral_code: resolve_referral_code(request.referral_code),
            timestamp: contact_timestamp(now),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisitorLog {
    #[serde(rename = "VisitorID")]
    pub visitor_id: Uuid,
    pub page: String,
    pub timestamp: String,
}

impl VisitorLog {
    pub fn from_request(request: VisitRequest, visitor_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            visitor_id,
            page: resolve_page(request.page),
            timestamp: visit_timestamp(now),
        }
    }
}

/// A record bound for the store. Serializes as the inner record's attributes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StoredRecord {
    Contact(ContactSubmission),
    Visit(VisitorLog),
}

impl StoredRecord {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Contact(record) => record.id,
            Self::Visit(record) => record.visitor_id,
        }
    }
}

/// Empty strings count as absent, so `""` also takes the default.
pub fn resolve_referral_code(value: Option<String>) -> String {
    non_empty_or(value, DEFAULT_REFERRAL_CODE)
}

pub fn resolve_page(value: Option<String>) -> String {
    non_empty_or(value, DEFAULT_PAGE)
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub fn contact_timestamp(now: DateTime<Utc>) -> String {
    format_timestamp(now, CONTACT_DATE_TIME_FORMAT)
}

pub fn visit_timestamp(now: DateTime<Utc>) -> String {
    format_timestamp(now, VISIT_DATE_TIME_FORMAT)
}

// The fraction is omitted entirely on whole seconds, never printed as `.000000`.
fn format_timestamp(now: DateTime<Utc>, date_time_format: &str) -> String {
    let mut text = now.format(date_time_format).to_string();
    if now.timestamp_subsec_micros() != 0 {
        text.push_str(&now.format(MICROS_SUFFIX_FORMAT).to_string());
    }
    text
}

/// Extracts and parses the JSON-encoded `body` of an API Gateway proxy event.
pub fn decode_event_body<T: DeserializeOwned>(event: &Value) -> Result<T, InputError> {
    let Some(object) = event.as_object() else {
        return Err(InputError::NotAnObject);
    };

    let Some(body) = object.get("body") else {
        return Err(InputError::MissingBody);
    };

    let Value::String(text) = body else {
        return Err(InputError::BodyNotString);
    };

    let parsed: Value = serde_json::from_str(text).map_err(InputError::MalformedBody)?;
    if !parsed.is_object() {
        return Err(InputError::BodyNotObject);
    }

    serde_json::from_value(parsed).map_err(InputError::MalformedBody)
}
