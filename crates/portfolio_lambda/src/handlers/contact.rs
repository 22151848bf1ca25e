use chrono::Utc;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::adapters::metrics_sink::MetricsSink;
use crate::adapters::record_store::RecordStore;
use crate::config::ContactHandlerConfig;
use crate::error::HandlerError;
use crate::runtime::contract::{
    decode_event_body, ContactRequest, ContactSubmission, StoredRecord, CONTACT_FAILURE_MESSAGE,
    CONTACT_SUCCESS_MESSAGE,
};
use crate::runtime::metrics::contact_submission_metrics;
use crate::runtime::response::{error_response, message_response, ApiGatewayResponse};

const COMPONENT: &str = "contact_handler";

/// Persists a contact-form submission and counts it. Every failure collapses
/// into the same 500 body.
pub fn handle_contact_event(
    event: &Value,
    config: &ContactHandlerConfig,
    store: &dyn RecordStore,
    metrics: &dyn MetricsSink,
) -> ApiGatewayResponse {
    super::log_event_received(COMPONENT, event);

    match submit_contact(event, config, store, metrics) {
        Ok(submission) => {
            info!(
                component = COMPONENT,
                event = "contact_submitted",
                id = %submission.id,
                referral_code = %submission.referral_code,
                "contact submitted"
            );
            message_response(200, CONTACT_SUCCESS_MESSAGE)
        }
        Err(failure) => {
            error!(
                component = COMPONENT,
                event = "contact_failed",
                kind = failure.kind(),
                error = %failure,
                "contact submission failed"
            );
            error_response(500, CONTACT_FAILURE_MESSAGE)
        }
    }
}

/// The record write happens before metric emission, so a metrics failure
/// leaves the record in place.
pub fn submit_contact(
    event: &Value,
    config: &ContactHandlerConfig,
    store: &dyn RecordStore,
    metrics: &dyn MetricsSink,
) -> Result<ContactSubmission, HandlerError> {
    let request: ContactRequest = decode_event_body(event)?;
    let submission = ContactSubmission::from_request(request, Uuid::new_v4(), Utc::now());

    store
        .put_record(&config.table_name, &StoredRecord::Contact(submission.clone()))
        .map_err(HandlerError::Store)?;

    metrics
        .put_metrics(
            &config.metrics_namespace,
            &contact_submission_metrics(&submission.referral_code),
        )
        .map_err(HandlerError::Metrics)?;

    Ok(submission)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::runtime::metrics::MetricDatum;

    fn body_json(response: &ApiGatewayResponse) -> Option<Value> {
        serde_json::from_str(&response.body).ok()
    }

    struct RecordingStore {
        writes: Mutex<Vec<(String, StoredRecord)>>,
        fail_with: Option<&'static str>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail_with: Some(message),
            }
        }

        fn writes(&self) -> Vec<(String, StoredRecord)> {
            self.writes.lock().expect("poisoned mutex").clone()
        }
    }

    impl RecordStore for RecordingStore {
        fn put_record(&self, table_name: &str, record: &StoredRecord) -> Result<(), String> {
            if let Some(message) = self.fail_with {
                return Err(message.to_string());
            }
            self.writes
                .lock()
                .expect("poisoned mutex")
                .push((table_name.to_string(), record.clone()));
            Ok(())
        }
    }

    struct RecordingSink {
        calls: Mutex<Vec<(String, Vec<MetricDatum>)>>,
        fail_with: Option<&'static str>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(message),
            }
        }

        fn calls(&self) -> Vec<(String, Vec<MetricDatum>)> {
            self.calls.lock().expect("poisoned mutex").clone()
        }
    }

    impl MetricsSink for RecordingSink {
        fn put_metrics(&self, namespace: &str, datums: &[MetricDatum]) -> Result<(), String> {
            if let Some(message) = self.fail_with {
                return Err(message.to_string());
            }
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push((namespace.to_string(), datums.to_vec()));
            Ok(())
        }
    }

    fn contact_event(body: Value) -> Value {
        json!({ "body": body.to_string() })
    }

    fn stored_contact(store: &RecordingStore) -> ContactSubmission {
        match store.writes().pop().expect("one record should be stored").1 {
            StoredRecord::Contact(record) => record,
            other => panic!("unexpected record kind: {other:?}"),
        }
    }

    #[test]
    fn stores_submission_and_emits_both_counters() {
        let store = RecordingStore::new();
        let sink = RecordingSink::new();
        let event = contact_event(json!({
            "name": "Ana",
            "email": "a@example.com",
            "message": "Hi",
            "referralCode": "TwitterAd",
        }));

        let response =
            handle_contact_event(&event, &ContactHandlerConfig::default(), &store, &sink);

        assert_eq!(response.status_code, 200);
        assert_eq!(
            body_json(&response),
            Some(json!({"message": "Message sent successfully!"}))
        );

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, "ContactFormSubmissions");
        let record = stored_contact(&store);
        assert_eq!(record.name.as_deref(), Some("Ana"));
        assert_eq!(record.email.as_deref(), Some("a@example.com"));
        assert_eq!(record.message.as_deref(), Some("Hi"));
        assert_eq!(record.referral_code, "TwitterAd");

        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Portfolio/Metrics");
        assert_eq!(calls[0].1, contact_submission_metrics("TwitterAd"));
    }

    #[test]
    fn missing_or_empty_referral_code_becomes_direct() {
        for body in [
            json!({"name": "Ana"}),
            json!({"name": "Ana", "referralCode": ""}),
            json!({"name": "Ana", "referralCode": null}),
        ] {
            let store = RecordingStore::new();
            let sink = RecordingSink::new();
            let response = handle_contact_event(
                &contact_event(body),
                &ContactHandlerConfig::default(),
                &store,
                &sink,
            );

            assert_eq!(response.status_code, 200);
            assert_eq!(stored_contact(&store).referral_code, "Direct");
            assert_eq!(sink.calls()[0].1[1].dimension("Source"), Some("Direct"));
        }
    }

    #[test]
    fn absent_fields_are_stored_as_none() {
        let store = RecordingStore::new();
        let sink = RecordingSink::new();
        let response = handle_contact_event(
            &contact_event(json!({})),
            &ContactHandlerConfig::default(),
            &store,
            &sink,
        );

        assert_eq!(response.status_code, 200);
        let record = stored_contact(&store);
        assert_eq!(record.name, None);
        assert_eq!(record.email, None);
        assert_eq!(record.message, None);
    }

    #[test]
    fn store_failure_returns_generic_error_without_metrics() {
        let store = RecordingStore::failing("ProvisionedThroughputExceededException");
        let sink = RecordingSink::new();
        let response = handle_contact_event(
            &contact_event(json!({"name": "Ana"})),
            &ContactHandlerConfig::default(),
            &store,
            &sink,
        );

        assert_eq!(response.status_code, 500);
        assert_eq!(
            body_json(&response),
            Some(json!({"error": "Failed to submit form."}))
        );
        assert!(!response.body.contains("ProvisionedThroughput"));
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn metrics_failure_after_store_write_still_fails() {
        let store = RecordingStore::new();
        let sink = RecordingSink::failing("AccessDenied");

        let error = submit_contact(
            &contact_event(json!({"name": "Ana"})),
            &ContactHandlerConfig::default(),
            &store,
            &sink,
        )
        .expect_err("metrics failure should surface");
        assert_eq!(error.kind(), "metrics");
        assert_eq!(store.writes().len(), 1);

        let response = handle_contact_event(
            &contact_event(json!({"name": "Ana"})),
            &ContactHandlerConfig::default(),
            &store,
            &sink,
        );
        assert_eq!(response.status_code, 500);
        assert_eq!(store.writes().len(), 2);
    }

    #[test]
    fn malformed_body_is_an_input_error() {
        let store = RecordingStore::new();
        let sink = RecordingSink::new();
        let event = json!({"body": "{\"name\": \"Ana\""});

        let error = submit_contact(&event, &ContactHandlerConfig::default(), &store, &sink)
            .expect_err("malformed body should fail");
        assert_eq!(error.kind(), "input");

        let response =
            handle_contact_event(&event, &ContactHandlerConfig::default(), &store, &sink);
        assert_eq!(response.status_code, 500);
        assert_eq!(
            response
                .headers
                .get("Access-Control-Allow-Origin")
                .map(String::as_str),
            Some("*")
        );
        assert!(store.writes().is_empty());
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn writes_to_configured_table_and_namespace() {
        let store = RecordingStore::new();
        let sink = RecordingSink::new();
        let config = ContactHandlerConfig {
            table_name: "StagingContacts".to_string(),
            metrics_namespace: "Portfolio/Staging".to_string(),
        };

        handle_contact_event(&contact_event(json!({})), &config, &store, &sink);

        assert_eq!(store.writes()[0].0, "StagingContacts");
        assert_eq!(sink.calls()[0].0, "Portfolio/Staging");
    }
}
