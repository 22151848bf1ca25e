use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";
pub const ALLOW_HEADERS_HEADER: &str = "Access-Control-Allow-Headers";

/// API Gateway proxy integration response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Headers attached to every response, success or failure.
pub fn cors_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        (ALLOW_ORIGIN_HEADER.to_string(), "*".to_string()),
        (ALLOW_HEADERS_HEADER.to_string(), "*".to_string()),
    ])
}

pub fn message_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    json_response(status_code, json!({ "message": message }))
}

pub fn error_response(status_code: u16, error: &str) -> ApiGatewayResponse {
    json_response(status_code, json!({ "error": error }))
}

pub fn not_found_response() -> ApiGatewayResponse {
    error_response(404, "Not found")
}

fn json_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: cors_headers(),
        body: payload.to_string(),
    }
}
