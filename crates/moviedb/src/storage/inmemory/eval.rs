//! Evaluation of typed conditions against stored items.

use std::cmp::Ordering;

use moviedb_core::attribute::{AttributeValue, Item};
use moviedb_core::expression::{unaliased_reserved_word, Condition};
use moviedb_core::storage::{StoreError, StoreResult};

/// Evaluates `condition` against `item`. A missing item has no attributes.
pub fn evaluate(condition: &Condition, item: Option<&Item>) -> StoreResult<bool> {
    let attribute = |name: &String| item.and_then(|item| item.get(name));

    match condition {
        Condition::AttributeExists(name) => Ok(attribute(name).is_some()),
        Condition::AttributeNotExists(name) => Ok(attribute(name).is_none()),
        Condition::Equals(name, value) => Ok(attribute(name)
            .map(|stored| compare(stored, value) == Some(Ordering::Equal))
            .unwrap_or(false)),
        Condition::Between { name, low, high } => {
            if compare(low, high) == Some(Ordering::Greater) {
                return Err(StoreError::Validation(
                    "Invalid BETWEEN expression: lower bound is greater than upper bound"
                        .to_string(),
                ));
            }
            Ok(attribute(name)
                .map(|stored| {
                    matches!(
                        compare(stored, low),
                        Some(Ordering::Greater | Ordering::Equal)
                    ) && matches!(compare(stored, high), Some(Ordering::Less | Ordering::Equal))
                })
                .unwrap_or(false))
        }
        Condition::And(parts) => {
            for part in parts {
                if !evaluate(part, item)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}

/// Orders two scalar values of the same type. Numbers compare numerically,
/// strings by code point. Mismatched or non-scalar types do not compare.
pub fn compare(a: &AttributeValue, b: &AttributeValue) -> Option<Ordering> {
    match (a, b) {
        (AttributeValue::N(a), AttributeValue::N(b)) => {
            let a: f64 = a.trim().parse().ok()?;
            let b: f64 = b.trim().parse().ok()?;
            a.partial_cmp(&b)
        }
        (AttributeValue::S(a), AttributeValue::S(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Rejects an expression that names a reserved word without an alias.
pub fn check_expression(expression: &str) -> StoreResult<()> {
    match unaliased_reserved_word(expression) {
        Some(word) => Err(StoreError::Validation(format!(
            "Invalid expression: Attribute name is a reserved keyword; reserved keyword: {word}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviedb_core::attribute::{number, string};

    fn matrix() -> Item {
        let mut item = Item::new();
        item.insert("Year".to_string(), number(1999));
        item.insert("Title".to_string(), string("The Matrix"));
        item
    }

    #[test]
    fn test_exists_on_missing_item() {
        assert!(!evaluate(&Condition::attribute_exists("Year"), None).unwrap());
        assert!(evaluate(&Condition::attribute_not_exists("Year"), None).unwrap());
    }

    #[test]
    fn test_equals_compares_numbers_numerically() {
        let item = matrix();
        let condition = Condition::equals("Year", AttributeValue::N("1999.0".to_string()));
        assert!(evaluate(&condition, Some(&item)).unwrap());
    }

    #[test]
    fn test_between_is_inclusive() {
        let item = matrix();
        assert!(evaluate(
            &Condition::between("Year", number(1999), number(2000)),
            Some(&item)
        )
        .unwrap());
        assert!(evaluate(
            &Condition::between("Year", number(1990), number(1999)),
            Some(&item)
        )
        .unwrap());
        assert!(!evaluate(
            &Condition::between("Year", number(2000), number(2010)),
            Some(&item)
        )
        .unwrap());
    }

    #[test]
    fn test_between_inverted_bounds_is_validation_error() {
        let result = evaluate(
            &Condition::between("Year", number(2010), number(2000)),
            Some(&matrix()),
        );
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_and_short_circuits() {
        let item = matrix();
        let condition = Condition::attribute_exists("Plot").and(Condition::attribute_exists("Year"));
        assert!(!evaluate(&condition, Some(&item)).unwrap());
    }

    #[test]
    fn test_type_mismatch_never_matches() {
        let item = matrix();
        let condition = Condition::equals("Year", string("1999"));
        assert!(!evaluate(&condition, Some(&item)).unwrap());
    }

    #[test]
    fn test_check_expression() {
        assert!(check_expression("#Year = :v0").is_ok());
        assert!(matches!(
            check_expression("Year = :v0"),
            Err(StoreError::Validation(_))
        ));
    }
}
