//! Table schema configuration (pure data).

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: KeyAttribute,
    pub throughput: Throughput,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: ScalarType,
}

/// Scalar types a key attribute may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Number,
    String,
}

impl ScalarType {
    /// The store's type descriptor.
    pub fn descriptor(&self) -> &'static str {
        match self {
            ScalarType::Number => "N",
            ScalarType::String => "S",
        }
    }
}

/// Provisioned read/write capacity units. Advisory from the client's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throughput {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl Default for Throughput {
    fn default() -> Self {
        Self {
            read_capacity_units: 10,
            write_capacity_units: 10,
        }
    }
}

impl TableSpec {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Sets the provisioned throughput.
    pub fn with_throughput(mut self, throughput: Throughput) -> Self {
        self.throughput = throughput;
        self
    }
}

/// Returns the table configuration every movie table is created with.
pub fn movies_table_spec(table_name: &str) -> TableSpec {
    use crate::movie::keys::{TITLE, YEAR};

    TableSpec {
        table_name: table_name.to_string(),
        partition_key: KeyAttribute {
            name: YEAR.to_string(),
            attribute_type: ScalarType::Number,
        },
        sort_key: KeyAttribute {
            name: TITLE.to_string(),
            attribute_type: ScalarType::String,
        },
        throughput: Throughput::default(),
    }
}

/// Format a table spec for display.
pub fn format_table_spec(spec: &TableSpec) -> Vec<String> {
    vec![
        format!("+ Create table: {}", spec.table_name),
        format!(
            "  Partition key: {} ({})",
            spec.partition_key.name,
            spec.partition_key.attribute_type.descriptor()
        ),
        format!(
            "  Sort key: {} ({})",
            spec.sort_key.name,
            spec.sort_key.attribute_type.descriptor()
        ),
        format!(
            "  Throughput: {} RCU / {} WCU",
            spec.throughput.read_capacity_units, spec.throughput.write_capacity_units
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movies_table_spec() {
        let spec = movies_table_spec("movies");

        assert_eq!(spec.table_name, "movies");
        assert_eq!(spec.partition_key.name, "Year");
        assert_eq!(spec.partition_key.attribute_type, ScalarType::Number);
        assert_eq!(spec.sort_key.name, "Title");
        assert_eq!(spec.sort_key.attribute_type, ScalarType::String);
        assert_eq!(spec.throughput, Throughput::default());
    }

    #[test]
    fn test_with_overrides() {
        let spec = movies_table_spec("movies")
            .with_table_name("films")
            .with_throughput(Throughput {
                read_capacity_units: 5,
                write_capacity_units: 1,
            });

        assert_eq!(spec.table_name, "films");
        assert_eq!(spec.throughput.write_capacity_units, 1);
    }

    #[test]
    fn test_format_table_spec() {
        let lines = format_table_spec(&movies_table_spec("movies"));
        assert_eq!(
            lines,
            vec![
                "+ Create table: movies",
                "  Partition key: Year (N)",
                "  Sort key: Title (S)",
                "  Throughput: 10 RCU / 10 WCU",
            ]
        );
    }
}
