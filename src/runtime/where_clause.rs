//! WHERE rendering for the runtime model
//!
//! Produces the same text the generated `applyWhere` builds, so the
//! placeholders can be checked without a JVM.

use crate::codegen::placeholder::PlaceholderStyle;
use crate::runtime::{Criteria, Criterion, Example, SqlBuilder};

/// Render one group as `(c0 and c1 ...)`, or `None` when it is not valid
pub fn render_group(criteria: &Criteria, index: usize, style: PlaceholderStyle) -> Option<String> {
    if !criteria.is_valid() {
        return None;
    }

    let conditions: Vec<String> = criteria
        .all_criteria()
        .iter()
        .enumerate()
        .map(|(j, criterion)| render_criterion(criterion, index, j, style))
        .collect();

    Some(format!("({})", conditions.join(" and ")))
}

fn render_criterion(criterion: &Criterion, i: usize, j: usize, style: PlaceholderStyle) -> String {
    let handler = criterion.type_handler();
    match criterion {
        Criterion::NoValue { condition } => condition.clone(),
        Criterion::Single { condition, .. } => style.single(condition, i, j, handler),
        Criterion::Between { condition, .. } => style.between(condition, i, j, handler),
        Criterion::List {
            condition, values, ..
        } => {
            let items: Vec<String> = (0..values.len())
                .map(|k| style.list_item(i, j, k, handler))
                .collect();
            format!("{} ({})", condition, items.join(", "))
        }
    }
}

/// Body of the WHERE clause; empty when no group is valid
pub fn render_where(example: &Example, style: PlaceholderStyle) -> String {
    example
        .ored_criteria()
        .iter()
        .enumerate()
        .filter_map(|(i, criteria)| render_group(&criteria.borrow(), i, style))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Attach the example's conditions to a statement
pub fn apply_where(sql: &mut SqlBuilder, example: Option<&Example>, include_example_phrase: bool) {
    let Some(example) = example else {
        return;
    };

    let clause = render_where(example, PlaceholderStyle::new(include_example_phrase));
    if !clause.is_empty() {
        sql.where_clause(&clause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::operator::Operator;
    use crate::codegen::placeholder::test_support::java_format;
    use crate::codegen::placeholder::Phrase;
    use crate::runtime::{ColumnRef, Operand};
    use pretty_assertions::assert_eq;

    fn column_a() -> ColumnRef {
        ColumnRef::new("COLUMN_A", "columnA")
    }

    fn column_b() -> ColumnRef {
        ColumnRef::new("COLUMN_B", "columnB")
    }

    #[test]
    fn test_single_and_between_group() {
        let example = Example::new();
        let criteria = example.create_criteria();
        criteria
            .borrow_mut()
            .and(&column_a(), Operator::EqualTo, Operand::Single(Some(5.into())))
            .unwrap()
            .and(
                &column_b(),
                Operator::Between,
                Operand::Pair(Some(1.into()), Some(3.into())),
            )
            .unwrap();

        assert_eq!(
            render_where(&example, PlaceholderStyle::default()),
            "(COLUMN_A = #{oredCriteria[0].allCriteria[0].value} and COLUMN_B between #{oredCriteria[0].allCriteria[1].value} and #{oredCriteria[0].allCriteria[1].secondValue})"
        );
    }

    #[test]
    fn test_invalid_groups_are_skipped() {
        let example = Example::new();
        example
            .or()
            .borrow_mut()
            .and(&column_a(), Operator::IsNull, Operand::None)
            .unwrap();
        example.or();
        example
            .or()
            .borrow_mut()
            .and(&column_b(), Operator::IsNotNull, Operand::None)
            .unwrap();

        assert_eq!(
            render_where(&example, PlaceholderStyle::default()),
            "(COLUMN_A is null) or (COLUMN_B is not null)"
        );
    }

    #[test]
    fn test_list_values_with_type_handler() {
        let status = ColumnRef::new("u.status", "status").with_type_handler("com.acme.StatusHandler");
        let example = Example::new();
        example
            .create_criteria()
            .borrow_mut()
            .and(&status, Operator::In, Operand::List(Some(vec!["A".into(), "B".into()])))
            .unwrap();

        assert_eq!(
            render_where(&example, PlaceholderStyle::new(true)),
            "(u.status in (#{example.oredCriteria[0].allCriteria[0].value[0],typeHandler=com.acme.StatusHandler}, #{example.oredCriteria[0].allCriteria[0].value[1],typeHandler=com.acme.StatusHandler}))"
        );
    }

    #[test]
    fn test_matches_generated_format_patterns() {
        let handled = ColumnRef::new("COLUMN_C", "columnC").with_type_handler("x.H");
        let example = Example::new();
        example
            .create_criteria()
            .borrow_mut()
            .and(&column_a(), Operator::LessThan, Operand::Single(Some(9.into())))
            .unwrap()
            .and(
                &handled,
                Operator::NotBetween,
                Operand::Pair(Some(1.into()), Some(2.into())),
            )
            .unwrap();

        for include in [false, true] {
            let first = java_format(&Phrase::Single.pattern(include), &["COLUMN_A <", "0", "0"]);
            let second = java_format(
                &Phrase::BetweenTypeHandled.pattern(include),
                &["COLUMN_C not between", "0", "1", "x.H", "0", "1", "x.H"],
            );
            assert_eq!(
                render_where(&example, PlaceholderStyle::new(include)),
                format!("({} and {})", first, second)
            );
        }
    }

    #[test]
    fn test_apply_where_on_builder() {
        let example = Example::new();
        let mut sql = SqlBuilder::new();
        sql.select("id").from("users");
        apply_where(&mut sql, Some(&example), false);
        assert_eq!(sql.to_string(), "SELECT id\nFROM users");

        example
            .create_criteria()
            .borrow_mut()
            .and(&column_a(), Operator::IsNull, Operand::None)
            .unwrap();
        apply_where(&mut sql, Some(&example), false);
        apply_where(&mut sql, None, false);
        assert_eq!(sql.to_string(), "SELECT id\nFROM users\nWHERE ((COLUMN_A is null))");
    }
}
