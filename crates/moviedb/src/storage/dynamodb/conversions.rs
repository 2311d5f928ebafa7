//! Conversions between core values and AWS SDK types.
//!
//! Pure functions; testable without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue as SdkValue, KeySchemaElement, KeyType,
    ProvisionedThroughput, ScalarAttributeType,
};
use moviedb_core::attribute::{AttributeValue, Item};
use moviedb_core::storage::{KeyAttribute, ScalarType, StoreError, StoreResult, TableSpec};

// ============================================================================
// Attribute values
// ============================================================================

/// Convert a core attribute value to the SDK representation.
pub fn to_sdk_value(value: &AttributeValue) -> SdkValue {
    match value {
        AttributeValue::B(bytes) => SdkValue::B(Blob::new(bytes.clone())),
        AttributeValue::Bool(b) => SdkValue::Bool(*b),
        AttributeValue::Bs(set) => {
            SdkValue::Bs(set.iter().map(|b| Blob::new(b.clone())).collect())
        }
        AttributeValue::L(list) => SdkValue::L(list.iter().map(to_sdk_value).collect()),
        AttributeValue::M(map) => SdkValue::M(to_sdk_item(map)),
        AttributeValue::N(n) => SdkValue::N(n.clone()),
        AttributeValue::Ns(set) => SdkValue::Ns(set.clone()),
        AttributeValue::Null(b) => SdkValue::Null(*b),
        AttributeValue::S(s) => SdkValue::S(s.clone()),
        AttributeValue::Ss(set) => SdkValue::Ss(set.clone()),
    }
}

/// Convert an SDK attribute value to the core representation.
///
/// `None` for a value type this client does not recognise; nested unknown
/// values are dropped from their list or map.
pub fn from_sdk_value(value: SdkValue) -> Option<AttributeValue> {
    Some(match value {
        SdkValue::B(blob) => AttributeValue::B(blob.into_inner()),
        SdkValue::Bool(b) => AttributeValue::Bool(b),
        SdkValue::Bs(set) => AttributeValue::Bs(set.into_iter().map(Blob::into_inner).collect()),
        SdkValue::L(list) => {
            AttributeValue::L(list.into_iter().filter_map(from_sdk_value).collect())
        }
        SdkValue::M(map) => AttributeValue::M(from_sdk_item(map)),
        SdkValue::N(n) => AttributeValue::N(n),
        SdkValue::Ns(set) => AttributeValue::Ns(set),
        SdkValue::Null(b) => AttributeValue::Null(b),
        SdkValue::S(s) => AttributeValue::S(s),
        SdkValue::Ss(set) => AttributeValue::Ss(set),
        _ => return None,
    })
}

/// Convert a core item to an SDK item.
pub fn to_sdk_item(item: &Item) -> HashMap<String, SdkValue> {
    item.iter()
        .map(|(name, value)| (name.clone(), to_sdk_value(value)))
        .collect()
}

/// Convert an SDK item to a core item.
///
/// Attributes of an unrecognised type are left out, so a broken key
/// attribute surfaces as a decode fault for that item alone.
pub fn from_sdk_item(item: HashMap<String, SdkValue>) -> Item {
    item.into_iter()
        .filter_map(|(name, value)| match from_sdk_value(value) {
            Some(value) => Some((name, value)),
            None => {
                tracing::warn!(attribute = %name, "Dropping attribute of unrecognised type");
                None
            }
        })
        .collect()
}

/// Convert placeholder values, dropping the map entirely when empty.
///
/// DynamoDB rejects an empty `ExpressionAttributeValues` map.
pub fn to_sdk_values(
    values: HashMap<String, AttributeValue>,
) -> Option<HashMap<String, SdkValue>> {
    if values.is_empty() {
        return None;
    }
    Some(to_sdk_item(&values))
}

/// Drop the alias map when empty; DynamoDB rejects empty maps.
pub fn non_empty_names(names: HashMap<String, String>) -> Option<HashMap<String, String>> {
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

// ============================================================================
// Table schema
// ============================================================================

fn to_scalar_type(attribute_type: ScalarType) -> ScalarAttributeType {
    match attribute_type {
        ScalarType::Number => ScalarAttributeType::N,
        ScalarType::String => ScalarAttributeType::S,
    }
}

fn key_schema_element(key: &KeyAttribute, key_type: KeyType) -> StoreResult<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(&key.name)
        .key_type(key_type)
        .build()
        .map_err(|e| StoreError::Validation(e.to_string()))
}

fn attribute_definition(key: &KeyAttribute) -> StoreResult<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(&key.name)
        .attribute_type(to_scalar_type(key.attribute_type))
        .build()
        .map_err(|e| StoreError::Validation(e.to_string()))
}

/// Key schema for a table spec: partition (HASH) then sort (RANGE).
pub fn key_schema(spec: &TableSpec) -> StoreResult<Vec<KeySchemaElement>> {
    Ok(vec![
        key_schema_element(&spec.partition_key, KeyType::Hash)?,
        key_schema_element(&spec.sort_key, KeyType::Range)?,
    ])
}

/// Attribute definitions for the key attributes of a table spec.
pub fn attribute_definitions(spec: &TableSpec) -> StoreResult<Vec<AttributeDefinition>> {
    Ok(vec![
        attribute_definition(&spec.partition_key)?,
        attribute_definition(&spec.sort_key)?,
    ])
}

/// Provisioned throughput for a table spec.
pub fn provisioned_throughput(spec: &TableSpec) -> StoreResult<ProvisionedThroughput> {
    ProvisionedThroughput::builder()
        .read_capacity_units(spec.throughput.read_capacity_units)
        .write_capacity_units(spec.throughput.write_capacity_units)
        .build()
        .map_err(|e| StoreError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviedb_core::attribute::{number, string};
    use moviedb_core::storage::movies_table_spec;

    #[test]
    fn test_value_round_trip_nested() {
        let mut inner = Item::new();
        inner.insert("Rank".to_string(), number(2));
        let value = AttributeValue::L(vec![
            string("Rush"),
            AttributeValue::M(inner),
            AttributeValue::Bool(true),
            AttributeValue::B(vec![1, 2, 3]),
        ]);

        let back = from_sdk_value(to_sdk_value(&value)).unwrap();

        assert_eq!(back, value);
    }

    #[test]
    fn test_number_stays_text() {
        assert_eq!(to_sdk_value(&number(1999)), SdkValue::N("1999".to_string()));
    }

    #[test]
    fn test_empty_maps_are_omitted() {
        assert!(to_sdk_values(HashMap::new()).is_none());
        assert!(non_empty_names(HashMap::new()).is_none());

        let mut names = HashMap::new();
        names.insert("#Year".to_string(), "Year".to_string());
        assert_eq!(non_empty_names(names.clone()), Some(names));
    }

    #[test]
    fn test_movies_key_schema() {
        let spec = movies_table_spec("movies");

        let schema = key_schema(&spec).unwrap();
        assert_eq!(schema[0].attribute_name(), "Year");
        assert_eq!(schema[0].key_type(), &KeyType::Hash);
        assert_eq!(schema[1].attribute_name(), "Title");
        assert_eq!(schema[1].key_type(), &KeyType::Range);

        let definitions = attribute_definitions(&spec).unwrap();
        assert_eq!(definitions[0].attribute_type(), &ScalarAttributeType::N);
        assert_eq!(definitions[1].attribute_type(), &ScalarAttributeType::S);

        let throughput = provisioned_throughput(&spec).unwrap();
        assert_eq!(throughput.read_capacity_units(), 10);
        assert_eq!(throughput.write_capacity_units(), 10);
    }
}
