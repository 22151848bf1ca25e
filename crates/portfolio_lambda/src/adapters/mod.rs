pub mod metrics_sink;
pub mod record_store;
