use crate::attribute::AttributeValue;

/// A typed condition over item attributes.
///
/// Used as put/update/delete guard, query key-condition and scan filter.
/// Attribute names are plain names here; aliasing happens at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `attribute_exists(name)`
    AttributeExists(String),
    /// `attribute_not_exists(name)`
    AttributeNotExists(String),
    /// `name = value`
    Equals(String, AttributeValue),
    /// `name BETWEEN low AND high`, inclusive on both ends.
    Between {
        name: String,
        low: AttributeValue,
        high: AttributeValue,
    },
    /// Conjunction of all inner conditions.
    And(Vec<Condition>),
}

impl Condition {
    pub fn attribute_exists(name: impl Into<String>) -> Self {
        Self::AttributeExists(name.into())
    }

    pub fn attribute_not_exists(name: impl Into<String>) -> Self {
        Self::AttributeNotExists(name.into())
    }

    pub fn equals(name: impl Into<String>, value: AttributeValue) -> Self {
        Self::Equals(name.into(), value)
    }

    pub fn between(name: impl Into<String>, low: AttributeValue, high: AttributeValue) -> Self {
        Self::Between {
            name: name.into(),
            low,
            high,
        }
    }

    /// Conjoin with another condition, flattening nested `And`s.
    pub fn and(self, other: Condition) -> Self {
        let mut parts = match self {
            Condition::And(parts) => parts,
            single => vec![single],
        };
        match other {
            Condition::And(more) => parts.extend(more),
            single => parts.push(single),
        }
        Condition::And(parts)
    }
}

/// A `SET` update: each listed attribute is replaced with the given value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExpression {
    pub set: Vec<(String, AttributeValue)>,
}

impl UpdateExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name = value` to the `SET` clause.
    pub fn set(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.set.push((name.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
