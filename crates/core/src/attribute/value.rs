use std::collections::HashMap;

/// A raw item: attribute name to attribute value.
pub type Item = HashMap<String, AttributeValue>;

/// A single attribute value as transmitted to and from the store.
///
/// Numbers are decimal text (`N("1999")`), never binary floats.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Binary blob.
    B(Vec<u8>),
    /// Boolean.
    Bool(bool),
    /// Binary set.
    Bs(Vec<Vec<u8>>),
    /// Heterogeneous list.
    L(Vec<AttributeValue>),
    /// Nested map.
    M(HashMap<String, AttributeValue>),
    /// Number, as decimal text.
    N(String),
    /// Number set.
    Ns(Vec<String>),
    /// Null marker.
    Null(bool),
    /// String.
    S(String),
    /// String set.
    Ss(Vec<String>),
}

impl AttributeValue {
    /// Returns the string payload if this is an `S` value.
    pub fn as_s(&self) -> Result<&String, &Self> {
        match self {
            AttributeValue::S(s) => Ok(s),
            other => Err(other),
        }
    }

    /// Returns the decimal text if this is an `N` value.
    pub fn as_n(&self) -> Result<&String, &Self> {
        match self {
            AttributeValue::N(n) => Ok(n),
            other => Err(other),
        }
    }

    /// The store's type descriptor for this value (`"S"`, `"N"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::B(_) => "B",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Bs(_) => "BS",
            AttributeValue::L(_) => "L",
            AttributeValue::M(_) => "M",
            AttributeValue::N(_) => "N",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::S(_) => "S",
            AttributeValue::Ss(_) => "SS",
        }
    }
}
