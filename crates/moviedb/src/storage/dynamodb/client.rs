//! AWS SDK client setup.

use std::time::Duration;

use aws_sdk_dynamodb::types::TableStatus;
use aws_sdk_dynamodb::Client;
use moviedb_core::storage::{StoreError, StoreResult};

use super::error::map_describe_table_error;

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
pub async fn create_client(config: &AwsConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// Fetches the table status.
///
/// `None` when the table does not exist or the response carries no table.
/// DescribeTable is eventually consistent, so a table created a moment ago
/// may still be reported as missing.
pub async fn table_status(client: &Client, table_name: &str) -> StoreResult<Option<TableStatus>> {
    let response = match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
        .map_err(map_describe_table_error)
    {
        Ok(response) => response,
        Err(StoreError::ResourceNotFound(_)) => return Ok(None),
        Err(err) => return Err(err),
    };

    Ok(response
        .table()
        .and_then(|table| table.table_status())
        .cloned())
}

const MAX_ATTEMPTS: u32 = 60;
const POLL_DELAY: Duration = Duration::from_secs(2);

/// Polls until the table is `ACTIVE`.
///
/// A freshly created table accepts no item requests while it is `CREATING`.
pub async fn wait_for_table_active(client: &Client, table_name: &str) -> StoreResult<()> {
    poll_until_active(client, table_name, POLL_DELAY).await
}

/// Polls until the table is gone.
///
/// A deleted table stays listed while it is `DELETING`.
pub async fn wait_for_table_deleted(client: &Client, table_name: &str) -> StoreResult<()> {
    poll_until_deleted(client, table_name, POLL_DELAY).await
}

async fn poll_until_active(client: &Client, table_name: &str, delay: Duration) -> StoreResult<()> {
    for attempt in 0..MAX_ATTEMPTS {
        if let Some(TableStatus::Active) = table_status(client, table_name).await? {
            return Ok(());
        }
        tracing::debug!(table = %table_name, attempt, "Waiting for table to become active");
        tokio::time::sleep(delay).await;
    }

    Err(StoreError::Transport(format!(
        "Timeout waiting for table {table_name} to become active"
    )))
}

async fn poll_until_deleted(client: &Client, table_name: &str, delay: Duration) -> StoreResult<()> {
    for attempt in 0..MAX_ATTEMPTS {
        if table_status(client, table_name).await?.is_none() {
            return Ok(());
        }
        tracing::debug!(table = %table_name, attempt, "Waiting for table to be deleted");
        tokio::time::sleep(delay).await;
    }

    Err(StoreError::Transport(format!(
        "Timeout waiting for table {table_name} to be deleted"
    )))
}
