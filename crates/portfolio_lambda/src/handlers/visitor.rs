use chrono::Utc;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::adapters::metrics_sink::MetricsSink;
use crate::adapters::record_store::RecordStore;
use crate::config::VisitorHandlerConfig;
use crate::error::HandlerError;
use crate::runtime::contract::{
    decode_event_body, StoredRecord, VisitRequest, VisitorLog, VISIT_FAILURE_MESSAGE,
    VISIT_SUCCESS_MESSAGE,
};
use crate::runtime::metrics::page_visit_metrics;
use crate::runtime::response::{error_response, message_response, ApiGatewayResponse};

const COMPONENT: &str = "visitor_handler";

pub fn handle_visit_event(
    event: &Value,
    config: &VisitorHandlerConfig,
    store: &dyn RecordStore,
    metrics: &dyn MetricsSink,
) -> ApiGatewayResponse {
    super::log_event_received(COMPONENT, event);

    match log_visit(event, config, store, metrics) {
        Ok(visit) => {
            info!(
                component = COMPONENT,
                event = "visit_logged",
                visitor_id = %visit.visitor_id,
                page = %visit.page,
                "visit logged"
            );
            message_response(200, VISIT_SUCCESS_MESSAGE)
        }
        Err(failure) => {
            error!(
                component = COMPONENT,
                event = "visit_failed",
                kind = failure.kind(),
                error = %failure,
                "visit logging failed"
            );
            error_response(500, VISIT_FAILURE_MESSAGE)
        }
    }
}

pub fn log_visit(
    event: &Value,
    config: &VisitorHandlerConfig,
    store: &dyn RecordStore,
    metrics: &dyn MetricsSink,
) -> Result<VisitorLog, HandlerError> {
    let request: VisitRequest = decode_event_body(event)?;
    let visit = VisitorLog::from_request(request, Uuid::new_v4(), Utc::now());

    store
        .put_record(&config.table_name, &StoredRecord::Visit(visit.clone()))
        .map_err(HandlerError::Store)?;

    metrics
        .put_metrics(&config.metrics_namespace, &page_visit_metrics(&visit.page))
        .map_err(HandlerError::Metrics)?;

    Ok(visit)
}
