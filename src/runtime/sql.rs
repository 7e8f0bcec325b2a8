//! Minimal statement builder with the clause layout of MyBatis `SQL`
//!
//! Also hosts the by-example statements the generated provider class
//! assembles, so their output can be inspected directly.

use std::fmt;

use crate::codegen::parameter_clause;
use crate::runtime::{apply_where, Example};
use crate::schema::{ColumnDescriptor, IntrospectedTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Select,
    Delete,
    Update,
}

#[derive(Debug, Clone, Default)]
pub struct SqlBuilder {
    verb: Option<Verb>,
    distinct: bool,
    select: Vec<String>,
    tables: Vec<String>,
    sets: Vec<String>,
    wheres: Vec<String>,
    order_by: Vec<String>,
}

impl SqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, columns: &str) -> &mut Self {
        self.verb = Some(Verb::Select);
        self.select.push(columns.to_string());
        self
    }

    pub fn select_distinct(&mut self, columns: &str) -> &mut Self {
        self.distinct = true;
        self.select(columns)
    }

    pub fn from(&mut self, table: &str) -> &mut Self {
        self.tables.push(table.to_string());
        self
    }

    pub fn delete_from(&mut self, table: &str) -> &mut Self {
        self.verb = Some(Verb::Delete);
        self.from(table)
    }

    pub fn update(&mut self, table: &str) -> &mut Self {
        self.verb = Some(Verb::Update);
        self.from(table)
    }

    pub fn set(&mut self, assignment: &str) -> &mut Self {
        self.sets.push(assignment.to_string());
        self
    }

    pub fn where_clause(&mut self, condition: &str) -> &mut Self {
        self.wheres.push(condition.to_string());
        self
    }

    pub fn order_by(&mut self, clause: &str) -> &mut Self {
        self.order_by.push(clause.to_string());
        self
    }
}

impl fmt::Display for SqlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = Vec::new();
        let tables = self.tables.join(", ");
        match self.verb {
            Some(Verb::Select) => {
                let keyword = if self.distinct { "SELECT DISTINCT" } else { "SELECT" };
                clauses.push(format!("{} {}", keyword, self.select.join(", ")));
                clauses.push(format!("FROM {}", tables));
            }
            Some(Verb::Delete) => clauses.push(format!("DELETE FROM {}", tables)),
            Some(Verb::Update) => {
                clauses.push(format!("UPDATE {}", tables));
                if !self.sets.is_empty() {
                    clauses.push(format!("SET {}", self.sets.join(", ")));
                }
            }
            None => {}
        }
        if !self.wheres.is_empty() {
            let conditions: Vec<String> = self.wheres.iter().map(|w| format!("({})", w)).collect();
            clauses.push(format!("WHERE {}", conditions.join(" AND ")));
        }
        if !self.order_by.is_empty() {
            clauses.push(format!("ORDER BY {}", self.order_by.join(", ")));
        }
        write!(f, "{}", clauses.join("\n"))
    }
}

pub fn count_by_example(table: &IntrospectedTable, example: Option<&Example>) -> String {
    let mut sql = SqlBuilder::new();
    sql.select("count(*)").from(&table.aliased_fully_qualified_name());
    apply_where(&mut sql, example, false);
    sql.to_string()
}

pub fn delete_by_example(table: &IntrospectedTable, example: Option<&Example>) -> String {
    let mut sql = SqlBuilder::new();
    sql.delete_from(&table.aliased_fully_qualified_name());
    apply_where(&mut sql, example, false);
    sql.to_string()
}

pub fn select_by_example(
    table: &IntrospectedTable,
    example: Option<&Example>,
    with_blobs: bool,
) -> String {
    let columns = if with_blobs {
        table.all_columns()
    } else {
        table.non_blob_columns()
    };

    let mut sql = SqlBuilder::new();
    for (i, column) in columns.iter().enumerate() {
        let phrase = table.select_list_phrase(column);
        if i == 0 && example.is_some_and(Example::is_distinct) {
            sql.select_distinct(&phrase);
        } else {
            sql.select(&phrase);
        }
    }
    sql.from(&table.aliased_fully_qualified_name());
    apply_where(&mut sql, example, false);
    if let Some(order_by) = example.and_then(Example::order_by_clause) {
        sql.order_by(order_by);
    }
    sql.to_string()
}

/// Unconditional update of the given columns; the example sits under the
/// `example` key of the parameter map
pub fn update_by_example(
    table: &IntrospectedTable,
    example: Option<&Example>,
    columns: &[&ColumnDescriptor],
) -> String {
    let mut sql = SqlBuilder::new();
    sql.update(&table.aliased_fully_qualified_name());
    for column in columns {
        sql.set(&format!(
            "{} = {}",
            table.aliased_column_name(column),
            parameter_clause(column, Some("record."))
        ));
    }
    apply_where(&mut sql, example, true);
    sql.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::operator::Operator;
    use crate::runtime::{ColumnRef, Operand};
    use crate::schema::JdbcType;
    use pretty_assertions::assert_eq;

    fn table() -> IntrospectedTable {
        let mut table = IntrospectedTable::new(
            "docs",
            vec![
                ColumnDescriptor::new("id", JdbcType::Integer),
                ColumnDescriptor::new("title", JdbcType::Varchar),
                ColumnDescriptor::new("body", JdbcType::LongVarchar),
            ],
        );
        table.alias = Some("d".to_string());
        table
    }

    fn example(table: &IntrospectedTable) -> Example {
        let example = Example::new();
        let title = ColumnRef::for_column(table, &table.columns[1]);
        example
            .create_criteria()
            .borrow_mut()
            .and(&title, Operator::Like, Operand::Single(Some("a%".into())))
            .unwrap();
        example
    }

    #[test]
    fn test_count_without_example() {
        assert_eq!(count_by_example(&table(), None), "SELECT count(*)\nFROM docs d");
    }

    #[test]
    fn test_select_distinct_ordered() {
        let table = table();
        let mut example = example(&table);
        example.set_distinct(true);
        example.set_order_by_clause(Some("d.id desc"));
        assert_eq!(
            select_by_example(&table, Some(&example), false),
            "SELECT DISTINCT d.id as d_id, d.title as d_title\nFROM docs d\nWHERE ((d.title like #{oredCriteria[0].allCriteria[0].value}))\nORDER BY d.id desc"
        );
        assert!(select_by_example(&table, Some(&example), true).starts_with(
            "SELECT DISTINCT d.id as d_id, d.title as d_title, d.body as d_body\n"
        ));
    }

    #[test]
    fn test_delete_uses_aliased_table() {
        let table = table();
        let example = example(&table);
        assert_eq!(
            delete_by_example(&table, Some(&example)),
            "DELETE FROM docs d\nWHERE ((d.title like #{oredCriteria[0].allCriteria[0].value}))"
        );
    }

    #[test]
    fn test_update_uses_example_phrase() {
        let table = table();
        let example = example(&table);
        let columns = table.non_blob_columns();
        assert_eq!(
            update_by_example(&table, Some(&example), &columns),
            "UPDATE docs d\nSET d.id = #{record.id,jdbcType=INTEGER}, d.title = #{record.title,jdbcType=VARCHAR}\nWHERE ((d.title like #{example.oredCriteria[0].allCriteria[0].value}))"
        );
    }
}
