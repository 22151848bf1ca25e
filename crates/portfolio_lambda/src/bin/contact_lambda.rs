use lambda_runtime::{service_fn, Error, LambdaEvent};
use portfolio_lambda::adapters::metrics_sink::CloudWatchMetricsSink;
use portfolio_lambda::adapters::record_store::DynamoDbRecordStore;
use portfolio_lambda::config::ContactHandlerConfig;
use portfolio_lambda::handlers::contact::handle_contact_event;
use portfolio_lambda::runtime::response::ApiGatewayResponse;
use portfolio_lambda::telemetry::init_tracing;
use serde_json::Value;

struct RuntimeDependencies {
    config: ContactHandlerConfig,
    store: DynamoDbRecordStore,
    metrics: CloudWatchMetricsSink,
}

async fn handle_request(
    deps: &RuntimeDependencies,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_contact_event(
        &event.payload,
        &deps.config,
        &deps.store,
        &deps.metrics,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        config: ContactHandlerConfig::from_env(),
        store: DynamoDbRecordStore::new(aws_sdk_dynamodb::Client::new(&aws_config)),
        metrics: CloudWatchMetricsSink::new(aws_sdk_cloudwatch::Client::new(&aws_config)),
    };
    tracing::info!(
        component = "contact_lambda",
        table_name = %deps.config.table_name,
        metrics_namespace = %deps.config.metrics_namespace,
        "configured"
    );

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event| handle_request(deps, event))).await
}
