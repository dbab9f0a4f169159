//! AWS SDK client setup (Imperative Shell).

use aws_config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::Client;

use crate::config::Config;

/// Creates a DynamoDB client for the configured region and endpoint.
///
/// Every operation issued through the client is bounded by the configured
/// operation timeout.
pub async fn create_client(config: &Config) -> Client {
    let timeouts = TimeoutConfig::builder()
        .operation_timeout(config.operation_timeout())
        .build();

    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .timeout_config(timeouts);

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// Returns a display string for the target environment.
pub fn target_display(config: &Config) -> String {
    match &config.endpoint_url {
        Some(url) => format!("Local DynamoDB ({})", url),
        None => format!("AWS DynamoDB (region: {})", config.region),
    }
}
