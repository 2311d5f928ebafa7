//! DynamoDB store connection.
//!
//! Implements `StoreConnection` from `moviedb_core::storage` on top of
//! `aws-sdk-dynamodb`. Every expression is rendered with a fresh
//! `ExpressionBuilder`, so placeholder maps never leak between requests.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue as SdkValue;
use aws_sdk_dynamodb::Client;

use moviedb_core::attribute::Item;
use moviedb_core::expression::ExpressionBuilder;
use moviedb_core::storage::{
    DeleteItemRequest, GetItemRequest, ItemPage, PutItemRequest, QueryRequest, ScanRequest,
    StoreConnection, StoreResult, TableSpec, UpdateItemRequest,
};

use super::client::{create_client, wait_for_table_active, wait_for_table_deleted, AwsConfig};
use super::conversions::{
    attribute_definitions, from_sdk_item, key_schema, non_empty_names, provisioned_throughput,
    to_sdk_item, to_sdk_values,
};
use super::error::{
    map_create_table_error, map_delete_item_error, map_delete_table_error, map_get_item_error,
    map_list_tables_error, map_put_item_error, map_query_error, map_scan_error,
    map_update_item_error,
};

/// DynamoDB-backed store connection.
///
/// Cheap to clone; clones share the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    wait_for_tables: bool,
}

impl DynamoDbStore {
    /// Creates a store around an already configured client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            wait_for_tables: true,
        }
    }

    /// Creates a store from configuration (endpoint override and region).
    pub async fn from_config(config: &AwsConfig) -> Self {
        tracing::debug!(target_env = %config.target_display(), "Creating DynamoDB client");
        Self::new(create_client(config).await)
    }

    /// Whether table administration waits for the change to settle:
    /// `create_table` until the table is `ACTIVE`, `delete_table` until it
    /// is gone.
    pub fn with_table_waits(mut self, wait: bool) -> Self {
        self.wait_for_tables = wait;
        self
    }

    /// The underlying SDK client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn decode_items(items: Option<Vec<HashMap<String, SdkValue>>>) -> Vec<Item> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(from_sdk_item)
        .collect()
}

#[async_trait]
impl StoreConnection for DynamoDbStore {
    async fn list_tables(&self) -> StoreResult<Vec<String>> {
        let result = self
            .client
            .list_tables()
            .send()
            .await
            .map_err(map_list_tables_error)?;

        if result.last_evaluated_table_name.is_some() {
            tracing::warn!("Table listing was truncated; only the first page was read");
        }
        Ok(result.table_names.unwrap_or_default())
    }

    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()> {
        self.client
            .create_table()
            .table_name(&spec.table_name)
            .set_key_schema(Some(key_schema(spec)?))
            .set_attribute_definitions(Some(attribute_definitions(spec)?))
            .provisioned_throughput(provisioned_throughput(spec)?)
            .send()
            .await
            .map_err(map_create_table_error)?;

        if self.wait_for_tables {
            wait_for_table_active(&self.client, &spec.table_name).await?;
        }
        Ok(())
    }

    async fn delete_table(&self, table_name: &str) -> StoreResult<()> {
        self.client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(map_delete_table_error)?;

        if self.wait_for_tables {
            wait_for_table_deleted(&self.client, table_name).await?;
        }
        Ok(())
    }

    async fn put_item(&self, request: &PutItemRequest) -> StoreResult<()> {
        let mut builder = self
            .client
            .put_item()
            .table_name(&request.table_name)
            .set_item(Some(to_sdk_item(&request.item)));

        if let Some(condition) = &request.condition {
            let mut expression = ExpressionBuilder::new();
            let condition_expression = expression.condition(condition);
            let attributes = expression.build();
            builder = builder
                .condition_expression(condition_expression)
                .set_expression_attribute_names(non_empty_names(attributes.names))
                .set_expression_attribute_values(to_sdk_values(attributes.values));
        }

        builder.send().await.map_err(map_put_item_error)?;
        Ok(())
    }

    async fn update_item(&self, request: &UpdateItemRequest) -> StoreResult<()> {
        let mut expression = ExpressionBuilder::new();
        let update_expression = expression.update(&request.update);
        let condition_expression = request
            .condition
            .as_ref()
            .map(|condition| expression.condition(condition));
        let attributes = expression.build();

        self.client
            .update_item()
            .table_name(&request.table_name)
            .set_key(Some(to_sdk_item(&request.key)))
            .update_expression(update_expression)
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(non_empty_names(attributes.names))
            .set_expression_attribute_values(to_sdk_values(attributes.values))
            .send()
            .await
            .map_err(map_update_item_error)?;
        Ok(())
    }

    async fn get_item(&self, request: &GetItemRequest) -> StoreResult<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&request.table_name)
            .set_key(Some(to_sdk_item(&request.key)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item.map(from_sdk_item))
    }

    async fn delete_item(&self, request: &DeleteItemRequest) -> StoreResult<()> {
        let mut builder = self
            .client
            .delete_item()
            .table_name(&request.table_name)
            .set_key(Some(to_sdk_item(&request.key)));

        if let Some(condition) = &request.condition {
            let mut expression = ExpressionBuilder::new();
            let condition_expression = expression.condition(condition);
            let attributes = expression.build();
            builder = builder
                .condition_expression(condition_expression)
                .set_expression_attribute_names(non_empty_names(attributes.names))
                .set_expression_attribute_values(to_sdk_values(attributes.values));
        }

        builder.send().await.map_err(map_delete_item_error)?;
        Ok(())
    }

    async fn query(&self, request: &QueryRequest) -> StoreResult<ItemPage> {
        let mut expression = ExpressionBuilder::new();
        let key_condition = expression.condition(&request.key_condition);
        let attributes = expression.build();

        let result = self
            .client
            .query()
            .table_name(&request.table_name)
            .key_condition_expression(key_condition)
            .set_expression_attribute_names(non_empty_names(attributes.names))
            .set_expression_attribute_values(to_sdk_values(attributes.values))
            .scan_index_forward(request.scan_index_forward)
            .send()
            .await
            .map_err(map_query_error)?;

        Ok(ItemPage {
            scanned_count: result.scanned_count.max(0) as usize,
            truncated: result.last_evaluated_key.is_some(),
            items: decode_items(result.items),
        })
    }

    async fn scan(&self, request: &ScanRequest) -> StoreResult<ItemPage> {
        let mut builder = self.client.scan().table_name(&request.table_name);

        if let Some(filter) = &request.filter {
            let mut expression = ExpressionBuilder::new();
            let filter_expression = expression.condition(filter);
            let attributes = expression.build();
            builder = builder
                .filter_expression(filter_expression)
                .set_expression_attribute_names(non_empty_names(attributes.names))
                .set_expression_attribute_values(to_sdk_values(attributes.values));
        }

        let result = builder.send().await.map_err(map_scan_error)?;

        Ok(ItemPage {
            scanned_count: result.scanned_count.max(0) as usize,
            truncated: result.last_evaluated_key.is_some(),
            items: decode_items(result.items),
        })
    }
}
