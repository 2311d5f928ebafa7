//! Request and response shapes exchanged with a store connection.

use crate::attribute::Item;
use crate::expression::{Condition, UpdateExpression};

/// Insert or replace a whole item, optionally guarded by a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct PutItemRequest {
    pub table_name: String,
    pub item: Item,
    pub condition: Option<Condition>,
}

impl PutItemRequest {
    pub fn new(table_name: impl Into<String>, item: Item) -> Self {
        Self {
            table_name: table_name.into(),
            item,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Apply attribute actions to the item at `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateItemRequest {
    pub table_name: String,
    pub key: Item,
    pub update: UpdateExpression,
    pub condition: Option<Condition>,
}

impl UpdateItemRequest {
    pub fn new(table_name: impl Into<String>, key: Item, update: UpdateExpression) -> Self {
        Self {
            table_name: table_name.into(),
            key,
            update,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Fetch the item at `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct GetItemRequest {
    pub table_name: String,
    pub key: Item,
}

impl GetItemRequest {
    pub fn new(table_name: impl Into<String>, key: Item) -> Self {
        Self {
            table_name: table_name.into(),
            key,
        }
    }
}

/// Delete the item at `key`, optionally guarded by a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteItemRequest {
    pub table_name: String,
    pub key: Item,
    pub condition: Option<Condition>,
}

impl DeleteItemRequest {
    pub fn new(table_name: impl Into<String>, key: Item) -> Self {
        Self {
            table_name: table_name.into(),
            key,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Read items of one partition, ordered by sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub table_name: String,
    pub key_condition: Condition,
    /// Ascending sort-key order when true.
    pub scan_index_forward: bool,
}

impl QueryRequest {
    pub fn new(table_name: impl Into<String>, key_condition: Condition) -> Self {
        Self {
            table_name: table_name.into(),
            key_condition,
            scan_index_forward: true,
        }
    }
}

/// Read every item of a table, optionally filtered server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    pub table_name: String,
    pub filter: Option<Condition>,
}

impl ScanRequest {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Condition) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// One page of a query or scan response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPage {
    pub items: Vec<Item>,
    /// Items evaluated by the store before filtering.
    pub scanned_count: usize,
    /// The store stopped early and more items exist beyond this page.
    pub truncated: bool,
}
