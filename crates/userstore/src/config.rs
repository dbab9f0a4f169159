use std::{env, time::Duration};

/// Store configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// Custom endpoint, e.g. DynamoDB Local (default: unset)
    pub endpoint_url: Option<String>,
    /// Users table name (default: "Users")
    pub table_name: String,
    /// Email GSI name (default: "EmailIndex")
    pub email_index: String,
    /// Per-operation store timeout in milliseconds (default: 5,000)
    pub operation_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: unset)
    /// - `DYNAMODB_TABLE_NAME` - Users table (default: "Users")
    /// - `DYNAMODB_EMAIL_INDEX` - Email GSI (default: "EmailIndex")
    /// - `DYNAMODB_OPERATION_TIMEOUT_MS` - Store call timeout (default: 5,000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|url| !url.is_empty()),
            table_name: lookup("DYNAMODB_TABLE_NAME").unwrap_or_else(|| "Users".to_string()),
            email_index: lookup("DYNAMODB_EMAIL_INDEX")
                .unwrap_or_else(|| "EmailIndex".to_string()),
            operation_timeout_ms: lookup("DYNAMODB_OPERATION_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
        }
    }

    /// Get the store operation timeout as a Duration.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]);

        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.table_name, "Users");
        assert_eq!(config.email_index, "EmailIndex");
        assert_eq!(config.operation_timeout(), Duration::from_millis(5_000));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ENDPOINT_URL", "http://localhost:8000"),
            ("DYNAMODB_TABLE_NAME", "UsersTest"),
            ("DYNAMODB_OPERATION_TIMEOUT_MS", "250"),
        ]);

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.table_name, "UsersTest");
        assert_eq!(config.operation_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        let config = config_from(&[("DYNAMODB_OPERATION_TIMEOUT_MS", "soon")]);

        assert_eq!(config.operation_timeout_ms, 5_000);
    }

    #[test]
    fn test_empty_endpoint_means_aws() {
        let config = config_from(&[("AWS_ENDPOINT_URL", "")]);

        assert_eq!(config.endpoint_url, None);
    }
}
