//! SQL text for the insert and primary-key statements
//!
//! The annotated mapper and the XML mapper lay out the same lines. Insert
//! and update statements address the bare table; only the key select goes
//! through the runtime alias, like the by-example selects.

use crate::codegen::parameter_clause;
use crate::dom::Parameter;
use crate::schema::{ColumnDescriptor, IntrospectedTable};

/// `where id = #{id,jdbcType=INTEGER}`, then `  and ...` per further key column
pub fn key_conditions(table: &IntrospectedTable, aliased: bool) -> Vec<String> {
    table
        .primary_key_columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let lead = if i == 0 { "where " } else { "  and " };
            let name = if aliased {
                table.aliased_column_name(column)
            } else {
                column.actual_column_name.clone()
            };
            format!("{}{} = {}", lead, name, parameter_clause(column, None))
        })
        .collect()
}

/// Column and value lists of a full insert
pub fn insert_lines(table: &IntrospectedTable) -> Vec<String> {
    let columns = table.all_columns();
    let names: Vec<&str> = columns
        .iter()
        .map(|c| c.actual_column_name.as_str())
        .collect();
    let values: Vec<String> = columns.iter().map(|c| parameter_clause(c, None)).collect();
    vec![
        format!(
            "insert into {} ({})",
            table.fully_qualified_name(),
            names.join(", ")
        ),
        format!("values ({})", values.join(", ")),
    ]
}

/// `set a = #{a},` then `  b = #{b}` for each further column
pub fn set_lines(columns: &[&ColumnDescriptor]) -> Vec<String> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let lead = if i == 0 { "set " } else { "  " };
            let trail = if i + 1 < columns.len() { "," } else { "" };
            format!(
                "{}{} = {}{}",
                lead,
                column.actual_column_name,
                parameter_clause(column, None),
                trail
            )
        })
        .collect()
}

/// Mapper parameters for the key; a composite key binds each column by name
pub fn key_parameters(table: &IntrospectedTable) -> Vec<Parameter> {
    let columns = table.primary_key_columns();
    let composite = columns.len() > 1;
    columns
        .iter()
        .map(|column| {
            let parameter = Parameter::new(column.java_type.clone(), &column.java_property);
            if composite {
                parameter.with_annotation(&format!("@Param(\"{}\")", column.java_property))
            } else {
                parameter
            }
        })
        .collect()
}

/// `parameterType` of the by-key XML statements
pub fn key_parameter_type(table: &IntrospectedTable) -> String {
    match table.primary_key_columns().as_slice() {
        [single] => single.java_type.full_name(),
        _ => "map".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::JdbcType;
    use pretty_assertions::assert_eq;

    fn line_items() -> IntrospectedTable {
        let mut table = IntrospectedTable::new(
            "line_items",
            vec![
                ColumnDescriptor::new("order_id", JdbcType::Integer),
                ColumnDescriptor::new("line_no", JdbcType::SmallInt),
                ColumnDescriptor::new("sku", JdbcType::Varchar),
            ],
        );
        table.primary_key = vec!["order_id".to_string(), "line_no".to_string()];
        table.alias = Some("li".to_string());
        table
    }

    #[test]
    fn test_composite_key_conditions() {
        let table = line_items();
        assert_eq!(
            key_conditions(&table, false),
            vec![
                "where order_id = #{orderId,jdbcType=INTEGER}",
                "  and line_no = #{lineNo,jdbcType=SMALLINT}",
            ]
        );
        assert_eq!(
            key_conditions(&table, true)[0],
            "where li.order_id = #{orderId,jdbcType=INTEGER}"
        );
    }

    #[test]
    fn test_insert_and_set_lines() {
        let table = line_items();
        assert_eq!(
            insert_lines(&table),
            vec![
                "insert into line_items (order_id, line_no, sku)",
                "values (#{orderId,jdbcType=INTEGER}, #{lineNo,jdbcType=SMALLINT}, #{sku,jdbcType=VARCHAR})",
            ]
        );
        assert_eq!(
            set_lines(&table.all_columns()),
            vec![
                "set order_id = #{orderId,jdbcType=INTEGER},",
                "  line_no = #{lineNo,jdbcType=SMALLINT},",
                "  sku = #{sku,jdbcType=VARCHAR}",
            ]
        );
    }

    #[test]
    fn test_key_parameters() {
        let table = line_items();
        let parameters = key_parameters(&table);
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[1].name, "lineNo");
        assert_eq!(parameters[1].annotations, vec!["@Param(\"lineNo\")"]);
        assert_eq!(key_parameter_type(&table), "map");

        let mut single = table.clone();
        single.primary_key = vec!["order_id".to_string()];
        assert!(key_parameters(&single)[0].annotations.is_empty());
        assert_eq!(key_parameter_type(&single), "java.lang.Integer");
    }
}
