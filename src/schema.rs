//! Schema data structures
//!
//! These types represent introspected table information and form the contract
//! between introspection (produces) and code generation (consumes). Column
//! descriptors are built once and never mutated by the generators.

use crate::dom::JavaType;

/// JDBC type of a column, named after `java.sql.Types`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JdbcType {
    Array,
    BigInt,
    Binary,
    Bit,
    Blob,
    Boolean,
    Char,
    Clob,
    Date,
    Decimal,
    Double,
    Float,
    Integer,
    JavaObject,
    LongNVarchar,
    LongVarBinary,
    LongVarchar,
    NChar,
    NClob,
    Numeric,
    NVarchar,
    Other,
    Real,
    SmallInt,
    Time,
    Timestamp,
    TinyInt,
    VarBinary,
    Varchar,
}

impl JdbcType {
    /// The name used in MyBatis `jdbcType=` attributes
    pub fn name(self) -> &'static str {
        match self {
            JdbcType::Array => "ARRAY",
            JdbcType::BigInt => "BIGINT",
            JdbcType::Binary => "BINARY",
            JdbcType::Bit => "BIT",
            JdbcType::Blob => "BLOB",
            JdbcType::Boolean => "BOOLEAN",
            JdbcType::Char => "CHAR",
            JdbcType::Clob => "CLOB",
            JdbcType::Date => "DATE",
            JdbcType::Decimal => "DECIMAL",
            JdbcType::Double => "DOUBLE",
            JdbcType::Float => "FLOAT",
            JdbcType::Integer => "INTEGER",
            JdbcType::JavaObject => "JAVA_OBJECT",
            JdbcType::LongNVarchar => "LONGNVARCHAR",
            JdbcType::LongVarBinary => "LONGVARBINARY",
            JdbcType::LongVarchar => "LONGVARCHAR",
            JdbcType::NChar => "NCHAR",
            JdbcType::NClob => "NCLOB",
            JdbcType::Numeric => "NUMERIC",
            JdbcType::NVarchar => "NVARCHAR",
            JdbcType::Other => "OTHER",
            JdbcType::Real => "REAL",
            JdbcType::SmallInt => "SMALLINT",
            JdbcType::Time => "TIME",
            JdbcType::Timestamp => "TIMESTAMP",
            JdbcType::TinyInt => "TINYINT",
            JdbcType::VarBinary => "VARBINARY",
            JdbcType::Varchar => "VARCHAR",
        }
    }

    pub fn is_character(self) -> bool {
        matches!(
            self,
            JdbcType::Char
                | JdbcType::Clob
                | JdbcType::LongVarchar
                | JdbcType::Varchar
                | JdbcType::LongNVarchar
                | JdbcType::NChar
                | JdbcType::NClob
                | JdbcType::NVarchar
        )
    }

    pub fn is_blob(self) -> bool {
        matches!(
            self,
            JdbcType::Binary
                | JdbcType::Blob
                | JdbcType::Clob
                | JdbcType::LongNVarchar
                | JdbcType::LongVarBinary
                | JdbcType::LongVarchar
                | JdbcType::NClob
                | JdbcType::VarBinary
        )
    }

    /// Default Java type for a column of this JDBC type
    ///
    /// Exact numerics resolve by precision: a positive scale or more than 18
    /// digits needs `BigDecimal`, otherwise the narrowest integral wrapper
    /// that holds the declared length.
    pub fn default_java_type(self, length: u32, scale: u32) -> JavaType {
        let name = match self {
            JdbcType::BigInt => "java.lang.Long",
            JdbcType::Binary | JdbcType::Blob | JdbcType::LongVarBinary | JdbcType::VarBinary => {
                "byte[]"
            }
            JdbcType::Bit | JdbcType::Boolean => "java.lang.Boolean",
            JdbcType::Char
            | JdbcType::Clob
            | JdbcType::LongNVarchar
            | JdbcType::LongVarchar
            | JdbcType::NChar
            | JdbcType::NClob
            | JdbcType::NVarchar
            | JdbcType::Varchar => "java.lang.String",
            JdbcType::Date | JdbcType::Time | JdbcType::Timestamp => "java.util.Date",
            JdbcType::Decimal | JdbcType::Numeric => {
                if scale > 0 || length > 18 {
                    "java.math.BigDecimal"
                } else if length > 9 {
                    "java.lang.Long"
                } else if length > 4 {
                    "java.lang.Integer"
                } else {
                    "java.lang.Short"
                }
            }
            JdbcType::Double | JdbcType::Float => "java.lang.Double",
            JdbcType::Integer => "java.lang.Integer",
            JdbcType::Real => "java.lang.Float",
            JdbcType::SmallInt => "java.lang.Short",
            JdbcType::TinyInt => "java.lang.Byte",
            JdbcType::Array | JdbcType::JavaObject | JdbcType::Other => "java.lang.Object",
        };
        JavaType::new(name)
    }
}

/// Introspected metadata for one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub actual_column_name: String,
    pub java_property: String,
    pub java_type: JavaType,
    pub jdbc_type: JdbcType,
    pub nullable: bool,
    pub type_handler: Option<String>,
    pub length: u32,
    pub scale: u32,
}

impl ColumnDescriptor {
    /// Describe a column with the default Java type and property name
    pub fn new(actual_column_name: &str, jdbc_type: JdbcType) -> Self {
        Self {
            actual_column_name: actual_column_name.to_string(),
            java_property: to_camel_case(actual_column_name),
            java_type: jdbc_type.default_java_type(0, 0),
            jdbc_type,
            nullable: true,
            type_handler: None,
            length: 0,
            scale: 0,
        }
    }

    pub fn with_precision(mut self, length: u32, scale: u32) -> Self {
        self.length = length;
        self.scale = scale;
        self.java_type = self.jdbc_type.default_java_type(length, scale);
        self
    }

    pub fn with_java_type(mut self, java_type: JavaType) -> Self {
        self.java_type = java_type;
        self
    }

    pub fn with_type_handler(mut self, type_handler: &str) -> Self {
        self.type_handler = Some(type_handler.to_string());
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn jdbc_type_name(&self) -> &'static str {
        self.jdbc_type.name()
    }

    /// `java.util.Date` stored in a DATE column
    pub fn is_jdbc_date(&self) -> bool {
        self.java_type == JavaType::date() && self.jdbc_type == JdbcType::Date
    }

    /// `java.util.Date` stored in a TIME column
    pub fn is_jdbc_time(&self) -> bool {
        self.java_type == JavaType::date() && self.jdbc_type == JdbcType::Time
    }

    pub fn is_character_column(&self) -> bool {
        self.jdbc_type.is_character()
    }

    pub fn is_blob(&self) -> bool {
        self.jdbc_type.is_blob()
    }

    /// The non-empty custom type handler, if any
    pub fn type_handler(&self) -> Option<&str> {
        self.type_handler.as_deref().filter(|h| !h.trim().is_empty())
    }

    pub fn has_type_handler(&self) -> bool {
        self.type_handler().is_some()
    }

    /// Handler condition values are bound with
    ///
    /// JDBC DATE and TIME columns go through the date/time helpers, which
    /// store plain values, so their handler never reaches a placeholder.
    pub fn criterion_type_handler(&self) -> Option<&str> {
        if self.is_jdbc_date() || self.is_jdbc_time() {
            None
        } else {
            self.type_handler()
        }
    }

    /// Property name with its first character upper-cased
    pub fn capitalized_property(&self) -> String {
        capitalize(&self.java_property)
    }
}

/// Which statements a table gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRules {
    pub count_by_example: bool,
    pub delete_by_example: bool,
    pub select_by_example: bool,
    pub update_by_example_selective: bool,
    /// `updateByExample`, which leaves BLOB columns alone
    pub update_by_example: bool,
    pub update_by_example_with_blobs: bool,
    /// `insert` and `insertSelective`
    pub insert: bool,
    pub select_by_primary_key: bool,
    pub delete_by_primary_key: bool,
    /// `updateByPrimaryKey` and `updateByPrimaryKeySelective`
    pub update_by_primary_key: bool,
}

impl TableRules {
    /// Every statement switched off
    pub fn none() -> Self {
        Self {
            count_by_example: false,
            delete_by_example: false,
            select_by_example: false,
            update_by_example_selective: false,
            update_by_example: false,
            update_by_example_with_blobs: false,
            insert: false,
            select_by_primary_key: false,
            delete_by_primary_key: false,
            update_by_primary_key: false,
        }
    }
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            count_by_example: true,
            delete_by_example: true,
            select_by_example: true,
            update_by_example_selective: true,
            update_by_example: true,
            update_by_example_with_blobs: true,
            insert: true,
            select_by_primary_key: true,
            delete_by_primary_key: true,
            update_by_primary_key: true,
        }
    }
}

/// An introspected table
#[derive(Debug, Clone, PartialEq)]
pub struct IntrospectedTable {
    pub name: String,
    pub schema: Option<String>,
    /// Alias used to qualify column references at runtime
    pub alias: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
    /// Column names that form the primary key (in order)
    pub primary_key: Vec<String>,
    pub rules: TableRules,
}

impl IntrospectedTable {
    pub fn new(name: &str, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            schema: None,
            alias: None,
            columns,
            primary_key: Vec::new(),
            rules: TableRules::default(),
        }
    }

    /// PascalCase name used for every generated type of this table
    pub fn domain_object_name(&self) -> String {
        to_pascal_case(&self.name)
    }

    pub fn fully_qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Table reference for FROM / UPDATE clauses
    pub fn aliased_fully_qualified_name(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} {}", self.fully_qualified_name(), alias),
            None => self.fully_qualified_name(),
        }
    }

    /// Column reference used inside conditions
    pub fn aliased_column_name(&self, column: &ColumnDescriptor) -> String {
        match &self.alias {
            Some(alias) => format!("{}.{}", alias, column.actual_column_name),
            None => column.actual_column_name.clone(),
        }
    }

    /// Column reference used in a select list
    pub fn select_list_phrase(&self, column: &ColumnDescriptor) -> String {
        match &self.alias {
            Some(alias) => format!(
                "{}.{} as {}_{}",
                alias, column.actual_column_name, alias, column.actual_column_name
            ),
            None => column.actual_column_name.clone(),
        }
    }

    /// Name of the column as it appears in result sets
    pub fn result_column_name(&self, column: &ColumnDescriptor) -> String {
        match &self.alias {
            Some(alias) => format!("{}_{}", alias, column.actual_column_name),
            None => column.actual_column_name.clone(),
        }
    }

    pub fn all_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().collect()
    }

    pub fn non_blob_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().filter(|c| !c.is_blob()).collect()
    }

    pub fn blob_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_blob()).collect()
    }

    /// Get primary key columns in order
    pub fn primary_key_columns(&self) -> Vec<&ColumnDescriptor> {
        self.primary_key
            .iter()
            .filter_map(|pk| self.columns.iter().find(|c| &c.actual_column_name == pk))
            .collect()
    }

    /// Every column outside the primary key, BLOBs included
    pub fn non_primary_key_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns
            .iter()
            .filter(|c| !self.primary_key.contains(&c.actual_column_name))
            .collect()
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key_columns().is_empty()
    }

    /// Non-BLOB, non-key columns
    pub fn base_columns(&self) -> Vec<&ColumnDescriptor> {
        self.columns
            .iter()
            .filter(|c| !c.is_blob() && !self.primary_key.contains(&c.actual_column_name))
            .collect()
    }

    pub fn has_blob_columns(&self) -> bool {
        self.columns.iter().any(ColumnDescriptor::is_blob)
    }

    pub fn has_jdbc_date_columns(&self) -> bool {
        self.non_blob_columns().iter().any(|c| c.is_jdbc_date())
    }

    pub fn has_jdbc_time_columns(&self) -> bool {
        self.non_blob_columns().iter().any(|c| c.is_jdbc_time())
    }

    pub fn generates_count_by_example(&self) -> bool {
        self.rules.count_by_example
    }

    pub fn generates_delete_by_example(&self) -> bool {
        self.rules.delete_by_example
    }

    pub fn generates_select_by_example_without_blobs(&self) -> bool {
        self.rules.select_by_example
    }

    pub fn generates_select_by_example_with_blobs(&self) -> bool {
        self.rules.select_by_example && self.has_blob_columns()
    }

    pub fn generates_update_by_example_selective(&self) -> bool {
        self.rules.update_by_example_selective
    }

    pub fn generates_update_by_example_without_blobs(&self) -> bool {
        self.rules.update_by_example
    }

    pub fn generates_update_by_example_with_blobs(&self) -> bool {
        self.rules.update_by_example_with_blobs && self.has_blob_columns()
    }

    /// Any update-by-example variant; the example class then needs a copy constructor
    pub fn generates_any_update_by_example(&self) -> bool {
        self.generates_update_by_example_selective()
            || self.generates_update_by_example_without_blobs()
            || self.generates_update_by_example_with_blobs()
    }

    /// Any statement that takes an example parameter
    pub fn generates_any_by_example(&self) -> bool {
        self.generates_count_by_example()
            || self.generates_delete_by_example()
            || self.generates_select_by_example_without_blobs()
            || self.generates_any_update_by_example()
    }

    pub fn generates_insert(&self) -> bool {
        self.rules.insert
    }

    pub fn generates_insert_selective(&self) -> bool {
        self.rules.insert
    }

    pub fn generates_select_by_primary_key(&self) -> bool {
        self.rules.select_by_primary_key && self.has_primary_key()
    }

    pub fn generates_delete_by_primary_key(&self) -> bool {
        self.rules.delete_by_primary_key && self.has_primary_key()
    }

    /// Needs a key to match on and at least one column to set
    pub fn generates_update_by_primary_key(&self) -> bool {
        self.rules.update_by_primary_key
            && self.has_primary_key()
            && !self.non_primary_key_columns().is_empty()
    }

    pub fn generates_update_by_primary_key_selective(&self) -> bool {
        self.generates_update_by_primary_key()
    }

    /// `BaseResultMap` backs `selectByExample` and key selects on tables without BLOBs
    pub fn generates_base_result_map(&self) -> bool {
        self.generates_select_by_example_without_blobs() || self.generates_select_by_primary_key()
    }

    /// `ResultMapWithBLOBs` backs `selectByExampleWithBLOBs` and key selects
    pub fn generates_result_map_with_blobs(&self) -> bool {
        self.has_blob_columns()
            && (self.generates_select_by_example_with_blobs() || self.generates_select_by_primary_key())
    }
}

/// Convert snake_case to PascalCase
pub fn to_pascal_case(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Convert a column name to a Java property name (`user_name` -> `userName`)
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for ch in s.chars() {
        if ch == '_' || ch == '-' || ch == ' ' || ch == '@' || ch == '$' || ch == '#' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Upper-case the first character
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_object_name() {
        let table = IntrospectedTable::new("order_line_items", vec![]);
        assert_eq!(table.domain_object_name(), "OrderLineItems");
    }

    #[test]
    fn test_camel_case_property() {
        assert_eq!(to_camel_case("first_name"), "firstName");
        assert_eq!(to_camel_case("ID"), "id");
        assert_eq!(to_camel_case("_leading"), "leading");
        assert_eq!(to_camel_case("UNIT_PRICE"), "unitPrice");
    }

    #[test]
    fn test_character_columns() {
        assert!(ColumnDescriptor::new("name", JdbcType::Varchar).is_character_column());
        assert!(ColumnDescriptor::new("code", JdbcType::NChar).is_character_column());
        assert!(!ColumnDescriptor::new("id", JdbcType::Integer).is_character_column());
    }

    #[test]
    fn test_jdbc_temporal_columns() {
        let date = ColumnDescriptor::new("born", JdbcType::Date);
        let time = ColumnDescriptor::new("alarm", JdbcType::Time);
        let stamp = ColumnDescriptor::new("created", JdbcType::Timestamp);
        assert!(date.is_jdbc_date() && !date.is_jdbc_time());
        assert!(time.is_jdbc_time() && !time.is_jdbc_date());
        assert!(!stamp.is_jdbc_date() && !stamp.is_jdbc_time());

        let overridden = date.with_java_type(JavaType::new("java.time.LocalDate"));
        assert!(!overridden.is_jdbc_date());
    }

    #[test]
    fn test_temporal_columns_bind_without_handler() {
        let date = ColumnDescriptor::new("born", JdbcType::Date).with_type_handler("x.DateH");
        assert_eq!(date.type_handler(), Some("x.DateH"));
        assert_eq!(date.criterion_type_handler(), None);

        let status = ColumnDescriptor::new("status", JdbcType::Varchar).with_type_handler("x.H");
        assert_eq!(status.criterion_type_handler(), Some("x.H"));
    }

    #[test]
    fn test_decimal_resolution() {
        let t = |len, scale| JdbcType::Decimal.default_java_type(len, scale).short_name();
        assert_eq!(t(4, 0), "Short");
        assert_eq!(t(9, 0), "Integer");
        assert_eq!(t(18, 0), "Long");
        assert_eq!(t(19, 0), "BigDecimal");
        assert_eq!(t(10, 2), "BigDecimal");
    }

    #[test]
    fn test_blank_type_handler_ignored() {
        let col = ColumnDescriptor::new("status", JdbcType::Varchar).with_type_handler("  ");
        assert!(!col.has_type_handler());
    }

    #[test]
    fn test_column_views() {
        let mut table = IntrospectedTable::new(
            "docs",
            vec![
                ColumnDescriptor::new("id", JdbcType::Integer),
                ColumnDescriptor::new("title", JdbcType::Varchar),
                ColumnDescriptor::new("body", JdbcType::LongVarchar),
            ],
        );
        table.primary_key = vec!["id".to_string()];

        assert_eq!(table.non_blob_columns().len(), 2);
        assert_eq!(table.blob_columns()[0].actual_column_name, "body");
        assert_eq!(table.base_columns()[0].actual_column_name, "title");
        assert_eq!(table.primary_key_columns()[0].actual_column_name, "id");
        let non_key: Vec<&str> = table
            .non_primary_key_columns()
            .iter()
            .map(|c| c.actual_column_name.as_str())
            .collect();
        assert_eq!(non_key, vec!["title", "body"]);
        assert!(table.generates_select_by_example_with_blobs());
    }

    #[test]
    fn test_update_by_example_switches_are_independent() {
        let mut table = IntrospectedTable::new(
            "docs",
            vec![
                ColumnDescriptor::new("id", JdbcType::Integer),
                ColumnDescriptor::new("body", JdbcType::LongVarchar),
            ],
        );
        table.rules.update_by_example = false;
        assert!(!table.generates_update_by_example_without_blobs());
        assert!(table.generates_update_by_example_with_blobs());

        table.rules = TableRules {
            update_by_example_with_blobs: false,
            ..TableRules::default()
        };
        assert!(table.generates_update_by_example_without_blobs());
        assert!(!table.generates_update_by_example_with_blobs());
        assert!(table.generates_any_update_by_example());
    }

    #[test]
    fn test_primary_key_statements_need_a_key() {
        let mut table = IntrospectedTable::new(
            "docs",
            vec![
                ColumnDescriptor::new("id", JdbcType::Integer),
                ColumnDescriptor::new("title", JdbcType::Varchar),
            ],
        );
        assert!(table.generates_insert());
        assert!(!table.generates_select_by_primary_key());
        assert!(!table.generates_delete_by_primary_key());
        assert!(!table.generates_update_by_primary_key());

        table.primary_key = vec!["id".to_string()];
        assert!(table.generates_select_by_primary_key());
        assert!(table.generates_update_by_primary_key_selective());

        // Nothing left to set
        table.primary_key = vec!["id".to_string(), "title".to_string()];
        assert!(table.generates_delete_by_primary_key());
        assert!(!table.generates_update_by_primary_key());

        table.rules = TableRules::none();
        assert!(!table.generates_insert_selective());
        assert!(!table.generates_select_by_primary_key());
        assert!(!table.generates_any_by_example());
    }

    #[test]
    fn test_alias_phrases() {
        let mut table = IntrospectedTable::new("users", vec![ColumnDescriptor::new("id", JdbcType::Integer)]);
        table.alias = Some("u".to_string());
        let col = &table.columns[0];
        assert_eq!(table.aliased_column_name(col), "u.id");
        assert_eq!(table.select_list_phrase(col), "u.id as u_id");
        assert_eq!(table.aliased_fully_qualified_name(), "users u");
    }
}
