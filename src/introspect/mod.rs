//! Database introspection
//!
//! This module provides functionality for extracting table metadata from
//! databases. Each supported database has its own feature-gated submodule.

use crate::prelude::{ExemplarError, IntrospectedTable};

/// Filters to apply during introspection
#[derive(Debug, Default, Clone)]
pub struct TableFilter {
    /// Only include these tables (if Some)
    pub include: Option<Vec<String>>,
    /// Exclude these tables
    pub exclude: Option<Vec<String>>,
}

impl TableFilter {
    /// Check if a table should be included
    pub fn should_include(&self, table_name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.iter().any(|t| t == table_name) {
                return false;
            }
        }

        if let Some(exclude) = &self.exclude {
            if exclude.iter().any(|t| t == table_name) {
                return false;
            }
        }

        true
    }
}

/// Trait for database introspection implementations
pub trait Introspector {
    /// Introspect the tables of a schema, in name order
    fn introspect(
        &mut self,
        schema_name: &str,
        filter: &TableFilter,
    ) -> Result<Vec<IntrospectedTable>, ExemplarError>;
}

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PostgresIntrospector;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_include_and_exclude() {
        let filter = TableFilter {
            include: Some(vec!["users".to_string(), "orders".to_string()]),
            exclude: Some(vec!["orders".to_string()]),
        };
        assert!(filter.should_include("users"));
        assert!(!filter.should_include("orders"));
        assert!(!filter.should_include("audit"));
        assert!(TableFilter::default().should_include("anything"));
    }
}
