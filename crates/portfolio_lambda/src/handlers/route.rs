use serde_json::Value;
use tracing::warn;

use crate::adapters::metrics_sink::MetricsSink;
use crate::adapters::record_store::RecordStore;
use crate::config::{ContactHandlerConfig, VisitorHandlerConfig};
use crate::handlers::contact::handle_contact_event;
use crate::handlers::visitor::handle_visit_event;
use crate::runtime::response::{not_found_response, ApiGatewayResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Contact,
    Visit,
}

/// Both handlers behind one function, dispatched on the request path.
pub struct PortfolioRouter<S, M> {
    pub contact_config: ContactHandlerConfig,
    pub visitor_config: VisitorHandlerConfig,
    pub store: S,
    pub metrics: M,
}

impl<S: RecordStore, M: MetricsSink> PortfolioRouter<S, M> {
    pub fn dispatch(&self, event: &Value) -> ApiGatewayResponse {
        match resolve_route(event) {
            Some(Route::Contact) => {
                handle_contact_event(event, &self.contact_config, &self.store, &self.metrics)
            }
            Some(Route::Visit) => {
                handle_visit_event(event, &self.visitor_config, &self.store, &self.metrics)
            }
            None => {
                warn!(
                    component = "router",
                    event = "route_not_found",
                    path = request_path(event).unwrap_or("<none>"),
                    "no handler for request path"
                );
                not_found_response()
            }
        }
    }
}

/// Matches on the last path segment so stage prefixes such as `/prod` pass.
pub fn resolve_route(event: &Value) -> Option<Route> {
    let path = request_path(event)?;
    match path.trim_end_matches('/').rsplit('/').next()? {
        "contact" => Some(Route::Contact),
        "visit" => Some(Route::Visit),
        _ => None,
    }
}

// HTTP API (v2) events carry `rawPath`; REST API (v1) events carry `path`.
fn request_path(event: &Value) -> Option<&str> {
    ["rawPath", "path", "resource"]
        .into_iter()
        .find_map(|key| event.get(key).and_then(Value::as_str))
}
