use lambda_runtime::{service_fn, Error, LambdaEvent};
use portfolio_lambda::adapters::metrics_sink::CloudWatchMetricsSink;
use portfolio_lambda::adapters::record_store::DynamoDbRecordStore;
use portfolio_lambda::config::{ContactHandlerConfig, VisitorHandlerConfig};
use portfolio_lambda::handlers::route::PortfolioRouter;
use portfolio_lambda::runtime::response::ApiGatewayResponse;
use portfolio_lambda::telemetry::init_tracing;
use serde_json::Value;

type AwsRouter = PortfolioRouter<DynamoDbRecordStore, CloudWatchMetricsSink>;

async fn handle_request(
    router: &AwsRouter,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    Ok(router.dispatch(&event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let router = PortfolioRouter {
        contact_config: ContactHandlerConfig::from_env(),
        visitor_config: VisitorHandlerConfig::from_env(),
        store: DynamoDbRecordStore::new(aws_sdk_dynamodb::Client::new(&aws_config)),
        metrics: CloudWatchMetricsSink::new(aws_sdk_cloudwatch::Client::new(&aws_config)),
    };
    tracing::info!(
        component = "portfolio_runtime",
        contact_table = %router.contact_config.table_name,
        visitor_table = %router.visitor_config.table_name,
        "configured"
    );

    let router = &router;
    lambda_runtime::run(service_fn(move |event| handle_request(router, event))).await
}
