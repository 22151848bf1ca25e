pub mod contact;
pub mod route;
pub mod visitor;

use serde_json::Value;

fn log_event_received(component: &str, event: &Value) {
    tracing::info!(component, event = "event_received", payload = %event);
}
