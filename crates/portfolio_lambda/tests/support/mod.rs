#![allow(dead_code)]

use std::sync::Mutex;

use portfolio_lambda::adapters::metrics_sink::MetricsSink;
use portfolio_lambda::adapters::record_store::RecordStore;
use portfolio_lambda::runtime::contract::StoredRecord;
use portfolio_lambda::runtime::metrics::MetricDatum;
use portfolio_lambda::runtime::response::ApiGatewayResponse;
use serde_json::{json, Value};

/// In-memory store that can be told to reject every write.
#[derive(Default)]
pub struct FakeRecordStore {
    records: Mutex<Vec<(String, StoredRecord)>>,
    pub fail: bool,
}

impl FakeRecordStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<(String, StoredRecord)> {
        self.records.lock().expect("poisoned mutex").clone()
    }
}

impl RecordStore for FakeRecordStore {
    fn put_record(&self, table_name: &str, record: &StoredRecord) -> Result<(), String> {
        if self.fail {
            return Err(format!("simulated write failure for table: {table_name}"));
        }
        self.records
            .lock()
            .expect("poisoned mutex")
            .push((table_name.to_string(), record.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeMetricsSink {
    calls: Mutex<Vec<(String, Vec<MetricDatum>)>>,
    pub fail: bool,
}

impl FakeMetricsSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<MetricDatum>)> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub fn datums(&self) -> Vec<MetricDatum> {
        self.calls()
            .into_iter()
            .flat_map(|(_, datums)| datums)
            .collect()
    }
}

impl MetricsSink for FakeMetricsSink {
    fn put_metrics(&self, namespace: &str, datums: &[MetricDatum]) -> Result<(), String> {
        if self.fail {
            return Err(format!("simulated metrics failure for namespace: {namespace}"));
        }
        self.calls
            .lock()
            .expect("poisoned mutex")
            .push((namespace.to_string(), datums.to_vec()));
        Ok(())
    }
}

pub fn body_json(response: &ApiGatewayResponse) -> Option<Value> {
    serde_json::from_str(&response.body).ok()
}

/// API Gateway REST proxy event carrying `body` as a JSON-encoded string.
pub fn proxy_event(path: &str, body: &str) -> Value {
    json!({
        "resource": path,
        "path": format!("/prod{path}"),
        "httpMethod": "POST",
        "headers": {"Content-Type": "application/json"},
        "isBase64Encoded": false,
        "body": body,
    })
}
