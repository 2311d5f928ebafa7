//! Rendering of typed conditions and updates into expression text.
//!
//! A builder is created per request and dropped with it. The placeholders it
//! hands out are only meaningful together with the maps it returns.

use std::collections::HashMap;

use crate::attribute::AttributeValue;

use super::condition::{Condition, UpdateExpression};
use super::reserved::is_reserved;

/// Grammar keywords that may appear bare in rendered expressions.
const GRAMMAR_KEYWORDS: [&str; 9] = [
    "ADD", "AND", "BETWEEN", "DELETE", "IN", "NOT", "OR", "REMOVE", "SET",
];

/// Placeholder maps that accompany a rendered expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionAttributes {
    /// `#placeholder` -> attribute name.
    pub names: HashMap<String, String>,
    /// `:placeholder` -> bound value.
    pub values: HashMap<String, AttributeValue>,
}

/// A single rendered expression with its placeholder maps.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedExpression {
    pub expression: String,
    pub attributes: ExpressionAttributes,
}

/// Returns the fragment that references `name` inside an expression and,
/// when the name cannot appear bare, the `(placeholder, name)` alias entry.
pub fn attribute_ref(name: &str) -> (String, Option<(String, String)>) {
    if !needs_alias(name) {
        return (name.to_string(), None);
    }

    let mut sanitized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if sanitized.is_empty() {
        sanitized.push_str("attr");
    }
    let placeholder = format!("#{sanitized}");
    (placeholder.clone(), Some((placeholder, name.to_string())))
}

fn needs_alias(name: &str) -> bool {
    is_reserved(name) || !is_plain_identifier(name)
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Finds the first reserved word referenced bare in `expression`.
///
/// The store rejects such expressions as a syntax error.
pub fn unaliased_reserved_word(expression: &str) -> Option<&str> {
    expression
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '#' || c == ':'))
        .filter(|token| !token.is_empty())
        .filter(|token| !token.starts_with('#') && !token.starts_with(':'))
        .filter(|token| !GRAMMAR_KEYWORDS.contains(token))
        .find(|token| is_reserved(token))
}

/// Per-request expression builder.
#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference an attribute by name, registering an alias when needed.
    pub fn name(&mut self, attribute: &str) -> String {
        let (fragment, alias) = attribute_ref(attribute);
        let Some((base, name)) = alias else {
            return fragment;
        };

        let mut placeholder = base.clone();
        let mut suffix = 1;
        loop {
            match self.names.get(&placeholder) {
                None => {
                    self.names.insert(placeholder.clone(), name);
                    return placeholder;
                }
                Some(existing) if *existing == name => return placeholder,
                Some(_) => {
                    placeholder = format!("{base}{suffix}");
                    suffix += 1;
                }
            }
        }
    }

    /// Bind a value, returning its `:vN` placeholder.
    pub fn value(&mut self, value: AttributeValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    /// Render a condition.
    pub fn condition(&mut self, condition: &Condition) -> String {
        match condition {
            Condition::AttributeExists(name) => {
                format!("attribute_exists({})", self.name(name))
            }
            Condition::AttributeNotExists(name) => {
                format!("attribute_not_exists({})", self.name(name))
            }
            Condition::Equals(name, value) => {
                let name = self.name(name);
                let value = self.value(value.clone());
                format!("{name} = {value}")
            }
            Condition::Between { name, low, high } => {
                let name = self.name(name);
                let low = self.value(low.clone());
                let high = self.value(high.clone());
                format!("{name} BETWEEN {low} AND {high}")
            }
            Condition::And(parts) => {
                let mut rendered = Vec::with_capacity(parts.len());
                for part in parts {
                    let text = self.condition(part);
                    match part {
                        Condition::And(_) => rendered.push(format!("({text})")),
                        _ => rendered.push(text),
                    }
                }
                rendered.join(" AND ")
            }
        }
    }

    /// Render a `SET` update.
    pub fn update(&mut self, update: &UpdateExpression) -> String {
        let mut assignments = Vec::with_capacity(update.set.len());
        for (name, value) in &update.set {
            let name = self.name(name);
            let value = self.value(value.clone());
            assignments.push(format!("{name} = {value}"));
        }
        format!("SET {}", assignments.join(", "))
    }

    /// Consume the builder, returning the accumulated placeholder maps.
    pub fn build(self) -> ExpressionAttributes {
        ExpressionAttributes {
            names: self.names,
            values: self.values,
        }
    }
}

/// Render a standalone condition with a fresh builder.
pub fn render_condition(condition: &Condition) -> RenderedExpression {
    let mut builder = ExpressionBuilder::new();
    let expression = builder.condition(condition);
    RenderedExpression {
        expression,
        attributes: builder.build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{number, string};

    #[test]
    fn test_attribute_ref_reserved() {
        let (fragment, alias) = attribute_ref("Year");
        assert_eq!(fragment, "#Year");
        assert_eq!(alias, Some(("#Year".to_string(), "Year".to_string())));
    }

    #[test]
    fn test_attribute_ref_plain() {
        assert_eq!(attribute_ref("Title"), ("Title".to_string(), None));
        assert_eq!(attribute_ref("Plot"), ("Plot".to_string(), None));
    }

    #[test]
    fn test_attribute_ref_non_identifier() {
        let (fragment, alias) = attribute_ref("box-office");
        assert_eq!(fragment, "#boxoffice");
        assert_eq!(alias.unwrap().1, "box-office");
    }

    #[test]
    fn test_render_put_guard() {
        let condition = Condition::attribute_not_exists("Year")
            .and(Condition::attribute_not_exists("Title"));

        let rendered = render_condition(&condition);

        assert_eq!(
            rendered.expression,
            "attribute_not_exists(#Year) AND attribute_not_exists(Title)"
        );
        assert_eq!(
            rendered.attributes.names.get("#Year").map(String::as_str),
            Some("Year")
        );
        assert_eq!(rendered.attributes.names.len(), 1);
        assert!(rendered.attributes.values.is_empty());
    }

    #[test]
    fn test_render_between() {
        let condition = Condition::between("Year", number(2000), number(2010));

        let rendered = render_condition(&condition);

        assert_eq!(rendered.expression, "#Year BETWEEN :v0 AND :v1");
        assert_eq!(rendered.attributes.values.get(":v0"), Some(&number(2000)));
        assert_eq!(rendered.attributes.values.get(":v1"), Some(&number(2010)));
    }

    #[test]
    fn test_render_update_aliases_rank() {
        let update = UpdateExpression::new()
            .set("Plot", string("Neo wakes up."))
            .set("Rank", number(1));

        let mut builder = ExpressionBuilder::new();
        let expression = builder.update(&update);
        let attributes = builder.build();

        assert_eq!(expression, "SET Plot = :v0, #Rank = :v1");
        assert_eq!(attributes.names.get("#Rank").map(String::as_str), Some("Rank"));
        assert_eq!(attributes.values.len(), 2);
    }

    #[test]
    fn test_same_name_reuses_alias() {
        let condition =
            Condition::attribute_exists("Year").and(Condition::equals("Year", number(1999)));

        let rendered = render_condition(&condition);

        assert_eq!(
            rendered.expression,
            "attribute_exists(#Year) AND #Year = :v0"
        );
        assert_eq!(rendered.attributes.names.len(), 1);
    }

    #[test]
    fn test_alias_collision_gets_suffix() {
        let mut builder = ExpressionBuilder::new();
        assert_eq!(builder.name("a-b"), "#ab");
        assert_eq!(builder.name("a.b"), "#ab1");
        assert_eq!(builder.build().names.len(), 2);
    }

    #[test]
    fn test_builders_do_not_share_state() {
        let first = render_condition(&Condition::equals("Year", number(1)));
        let second = render_condition(&Condition::equals("Year", number(2)));

        assert_eq!(first.expression, second.expression);
        assert_eq!(second.attributes.values.get(":v0"), Some(&number(2)));
    }

    #[test]
    fn test_unaliased_reserved_word() {
        assert_eq!(unaliased_reserved_word("Year = :v0"), Some("Year"));
        assert_eq!(unaliased_reserved_word("#Year = :v0"), None);
        assert_eq!(
            unaliased_reserved_word("attribute_not_exists(#Year) AND attribute_not_exists(Title)"),
            None
        );
        assert_eq!(unaliased_reserved_word("SET Plot = :v0, Rank = :v1"), Some("Rank"));
    }
}
