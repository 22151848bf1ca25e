use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::types::{Dimension, StandardUnit};

use crate::runtime::metrics::MetricDatum;

/// Accepts named, dimensioned counter increments.
pub trait MetricsSink {
    fn put_metrics(&self, namespace: &str, datums: &[MetricDatum]) -> Result<(), String>;
}

pub struct CloudWatchMetricsSink {
    client: aws_sdk_cloudwatch::Client,
}

impl CloudWatchMetricsSink {
    pub fn new(client: aws_sdk_cloudwatch::Client) -> Self {
        Self { client }
    }
}

impl MetricsSink for CloudWatchMetricsSink {
    fn put_metrics(&self, namespace: &str, datums: &[MetricDatum]) -> Result<(), String> {
        let metric_data = datums.iter().map(to_cloudwatch_datum).collect();
        let client = self.client.clone();
        let namespace = namespace.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_metric_data()
                    .namespace(namespace)
                    .set_metric_data(Some(metric_data))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!(
                            "failed to put metric data to cloudwatch: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

/// Units map by name, so `MetricUnit::as_str` must match a CloudWatch unit.
pub fn to_cloudwatch_datum(datum: &MetricDatum) -> aws_sdk_cloudwatch::types::MetricDatum {
    let dimensions = datum
        .dimensions
        .iter()
        .map(|dimension| {
            Dimension::builder()
                .name(&dimension.name)
                .value(&dimension.value)
                .build()
        })
        .collect();

    aws_sdk_cloudwatch::types::MetricDatum::builder()
        .metric_name(&datum.name)
        .set_dimensions(Some(dimensions))
        .unit(StandardUnit::from(datum.unit.as_str()))
        .value(datum.value)
        .build()
}
