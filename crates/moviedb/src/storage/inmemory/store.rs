//! In-memory store connection.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use moviedb_core::attribute::{AttributeValue, Item};
use moviedb_core::expression::{Condition, ExpressionBuilder};
use moviedb_core::storage::{
    DeleteItemRequest, GetItemRequest, ItemPage, KeyAttribute, PutItemRequest, QueryRequest,
    ScalarType, ScanRequest, StoreConnection, StoreError, StoreResult, TableSpec,
    UpdateItemRequest,
};

use super::eval::{check_expression, compare, evaluate};

/// A table held in memory. Items keep insertion order.
#[derive(Debug, Clone)]
struct Table {
    spec: TableSpec,
    items: Vec<Item>,
}

impl Table {
    /// Index of the item stored under `key`. Numbers match by value, so
    /// `1999` and `1999.0` address the same item.
    fn position(&self, key: &Item) -> Option<usize> {
        let names = [&self.spec.partition_key.name, &self.spec.sort_key.name];
        self.items.iter().position(|item| {
            names.iter().all(|name| match (item.get(*name), key.get(*name)) {
                (Some(stored), Some(wanted)) => compare(stored, wanted) == Some(Ordering::Equal),
                _ => false,
            })
        })
    }

    /// Checks that `key` holds both key attributes with their declared types.
    fn validate_key(&self, key: &Item) -> StoreResult<()> {
        for attribute in [&self.spec.partition_key, &self.spec.sort_key] {
            validate_key_attribute(attribute, key.get(&attribute.name))?;
        }
        Ok(())
    }
}

fn validate_key_attribute(
    attribute: &KeyAttribute,
    value: Option<&AttributeValue>,
) -> StoreResult<()> {
    let valid = match (attribute.attribute_type, value) {
        (ScalarType::Number, Some(AttributeValue::N(n))) => n.trim().parse::<f64>().is_ok(),
        (ScalarType::String, Some(AttributeValue::S(s))) if s.is_empty() => {
            return Err(StoreError::Validation(format!(
                "One or more parameter values are not valid. The AttributeValue for a key \
                 attribute cannot contain an empty string value. Key: {}",
                attribute.name
            )))
        }
        (ScalarType::String, Some(AttributeValue::S(_))) => true,
        (_, None) => {
            return Err(StoreError::Validation(format!(
                "One or more parameter values were invalid: Missing the key {} in the item",
                attribute.name
            )))
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StoreError::Validation(format!(
            "One or more parameter values were invalid: Type mismatch for key {} expected: {}",
            attribute.name,
            attribute.attribute_type.descriptor()
        )))
    }
}

/// In-memory store for testing.
///
/// Evaluates conditions the way the remote store does, orders query results
/// by sort key and rejects expressions that name a reserved word without an
/// alias. Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
    fault: Arc<Mutex<Option<StoreError>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call fail with `err`.
    pub async fn inject_fault(&self, err: StoreError) {
        *self.fault.lock().await = Some(err);
    }

    /// Appends an item to a table without any key validation.
    ///
    /// Lets tests plant items that a well-behaved writer would never produce.
    pub async fn insert_raw(&self, table_name: &str, item: Item) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let table = table_mut(&mut tables, table_name)?;
        table.items.push(item);
        Ok(())
    }

    async fn take_fault(&self) -> StoreResult<()> {
        match self.fault.lock().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn not_found() -> StoreError {
    StoreError::ResourceNotFound("Requested resource not found".to_string())
}

fn table_ref<'a>(tables: &'a HashMap<String, Table>, name: &str) -> StoreResult<&'a Table> {
    tables.get(name).ok_or_else(not_found)
}

fn table_mut<'a>(
    tables: &'a mut HashMap<String, Table>,
    name: &str,
) -> StoreResult<&'a mut Table> {
    tables.get_mut(name).ok_or_else(not_found)
}

/// Renders the condition the way it would go over the wire and checks it.
fn check_condition(condition: Option<&Condition>) -> StoreResult<()> {
    if let Some(condition) = condition {
        let mut builder = ExpressionBuilder::new();
        check_expression(&builder.condition(condition))?;
    }
    Ok(())
}

fn guard(condition: Option<&Condition>, item: Option<&Item>) -> StoreResult<()> {
    match condition {
        Some(condition) if !evaluate(condition, item)? => Err(StoreError::ConditionalCheckFailed),
        _ => Ok(()),
    }
}

#[async_trait]
impl StoreConnection for InMemoryStore {
    async fn list_tables(&self) -> StoreResult<Vec<String>> {
        self.take_fault().await?;
        let tables = self.tables.read().await;
        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()> {
        self.take_fault().await?;
        let mut tables = self.tables.write().await;
        if tables.contains_key(&spec.table_name) {
            return Err(StoreError::ResourceInUse(format!(
                "Table already exists: {}",
                spec.table_name
            )));
        }
        tables.insert(
            spec.table_name.clone(),
            Table {
                spec: spec.clone(),
                items: Vec::new(),
            },
        );
        Ok(())
    }

    async fn delete_table(&self, table_name: &str) -> StoreResult<()> {
        self.take_fault().await?;
        let mut tables = self.tables.write().await;
        match tables.remove(table_name) {
            Some(_) => Ok(()),
            None => Err(StoreError::ResourceNotFound(format!(
                "Requested resource not found: Table: {table_name} not found"
            ))),
        }
    }

    async fn put_item(&self, request: &PutItemRequest) -> StoreResult<()> {
        self.take_fault().await?;
        check_condition(request.condition.as_ref())?;

        let mut tables = self.tables.write().await;
        let table = table_mut(&mut tables, &request.table_name)?;
        table.validate_key(&request.item)?;

        let position = table.position(&request.item);
        guard(
            request.condition.as_ref(),
            position.map(|i| &table.items[i]),
        )?;

        match position {
            Some(i) => table.items[i] = request.item.clone(),
            None => table.items.push(request.item.clone()),
        }
        Ok(())
    }

    async fn update_item(&self, request: &UpdateItemRequest) -> StoreResult<()> {
        self.take_fault().await?;
        check_condition(request.condition.as_ref())?;
        if request.update.is_empty() {
            return Err(StoreError::Validation(
                "Invalid UpdateExpression: The expression can not be empty".to_string(),
            ));
        }
        let mut builder = ExpressionBuilder::new();
        check_expression(&builder.update(&request.update))?;

        let mut tables = self.tables.write().await;
        let table = table_mut(&mut tables, &request.table_name)?;
        table.validate_key(&request.key)?;

        for (name, _) in &request.update.set {
            if *name == table.spec.partition_key.name || *name == table.spec.sort_key.name {
                return Err(StoreError::Validation(format!(
                    "Cannot update attribute {name}. This attribute is part of the key"
                )));
            }
        }

        let position = table.position(&request.key);
        guard(
            request.condition.as_ref(),
            position.map(|i| &table.items[i]),
        )?;

        let target = match position {
            Some(i) => &mut table.items[i],
            None => {
                table.items.push(request.key.clone());
                let last = table.items.len() - 1;
                &mut table.items[last]
            }
        };
        for (name, value) in &request.update.set {
            target.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    async fn get_item(&self, request: &GetItemRequest) -> StoreResult<Option<Item>> {
        self.take_fault().await?;
        let tables = self.tables.read().await;
        let table = table_ref(&tables, &request.table_name)?;
        table.validate_key(&request.key)?;

        Ok(table.position(&request.key).map(|i| table.items[i].clone()))
    }

    async fn delete_item(&self, request: &DeleteItemRequest) -> StoreResult<()> {
        self.take_fault().await?;
        check_condition(request.condition.as_ref())?;

        let mut tables = self.tables.write().await;
        let table = table_mut(&mut tables, &request.table_name)?;
        table.validate_key(&request.key)?;

        let position = table.position(&request.key);
        guard(
            request.condition.as_ref(),
            position.map(|i| &table.items[i]),
        )?;

        if let Some(i) = position {
            table.items.remove(i);
        }
        Ok(())
    }

    async fn query(&self, request: &QueryRequest) -> StoreResult<ItemPage> {
        self.take_fault().await?;
        check_condition(Some(&request.key_condition))?;

        let tables = self.tables.read().await;
        let table = table_ref(&tables, &request.table_name)?;

        let partition = &table.spec.partition_key.name;
        if !selects_partition(&request.key_condition, partition) {
            return Err(StoreError::Validation(format!(
                "Query condition missed key schema element: {partition}"
            )));
        }

        let mut items = Vec::new();
        for item in &table.items {
            if evaluate(&request.key_condition, Some(item))? {
                items.push(item.clone());
            }
        }

        let sort = &table.spec.sort_key.name;
        items.sort_by(|a, b| match (a.get(sort), b.get(sort)) {
            (Some(a), Some(b)) => compare(a, b).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        });
        if !request.scan_index_forward {
            items.reverse();
        }

        Ok(ItemPage {
            scanned_count: items.len(),
            items,
            truncated: false,
        })
    }

    async fn scan(&self, request: &ScanRequest) -> StoreResult<ItemPage> {
        self.take_fault().await?;
        check_condition(request.filter.as_ref())?;

        let tables = self.tables.read().await;
        let table = table_ref(&tables, &request.table_name)?;

        let mut items = Vec::new();
        for item in &table.items {
            let keep = match &request.filter {
                Some(filter) => evaluate(filter, Some(item))?,
                None => true,
            };
            if keep {
                items.push(item.clone());
            }
        }

        Ok(ItemPage {
            items,
            scanned_count: table.items.len(),
            truncated: false,
        })
    }
}

/// True when the key condition pins the partition key to a single value.
fn selects_partition(condition: &Condition, partition: &str) -> bool {
    match condition {
        Condition::Equals(name, _) => name == partition,
        Condition::And(parts) => parts.iter().any(|p| selects_partition(p, partition)),
        _ => false,
    }
}
