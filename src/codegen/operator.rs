//! Criteria operator catalog
//!
//! The fixed set of comparison operators a generated `Criteria` class
//! offers per column. Every generator that needs to know which
//! `and<Property><Operator>` methods exist goes through [`operators_for`].

use crate::schema::ColumnDescriptor;

/// How many values an operator takes, which also decides how the condition
/// is stored and rendered at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Single,
    Pair,
    ListValued,
}

/// Runtime condition category a criterion lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionCategory {
    NoValue,
    SingleValue,
    ListValue,
    BetweenValue,
}

impl Arity {
    pub fn category(self) -> ConditionCategory {
        match self {
            Arity::None => ConditionCategory::NoValue,
            Arity::Single => ConditionCategory::SingleValue,
            Arity::ListValued => ConditionCategory::ListValue,
            Arity::Pair => ConditionCategory::BetweenValue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    IsNull,
    IsNotNull,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
}

/// Emission order; `Like`/`NotLike` are filtered by applicability
pub const ALL_OPERATORS: [Operator; 14] = [
    Operator::IsNull,
    Operator::IsNotNull,
    Operator::EqualTo,
    Operator::NotEqualTo,
    Operator::GreaterThan,
    Operator::GreaterThanOrEqualTo,
    Operator::LessThan,
    Operator::LessThanOrEqualTo,
    Operator::Like,
    Operator::NotLike,
    Operator::In,
    Operator::NotIn,
    Operator::Between,
    Operator::NotBetween,
];

impl Operator {
    /// Method name suffix
    pub fn name_fragment(self) -> &'static str {
        match self {
            Operator::IsNull => "IsNull",
            Operator::IsNotNull => "IsNotNull",
            Operator::EqualTo => "EqualTo",
            Operator::NotEqualTo => "NotEqualTo",
            Operator::GreaterThan => "GreaterThan",
            Operator::GreaterThanOrEqualTo => "GreaterThanOrEqualTo",
            Operator::LessThan => "LessThan",
            Operator::LessThanOrEqualTo => "LessThanOrEqualTo",
            Operator::Like => "Like",
            Operator::NotLike => "NotLike",
            Operator::In => "In",
            Operator::NotIn => "NotIn",
            Operator::Between => "Between",
            Operator::NotBetween => "NotBetween",
        }
    }

    /// SQL text placed after the column reference
    pub fn sql_token(self) -> &'static str {
        match self {
            Operator::IsNull => "is null",
            Operator::IsNotNull => "is not null",
            Operator::EqualTo => "=",
            Operator::NotEqualTo => "<>",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqualTo => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqualTo => "<=",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Between => "between",
            Operator::NotBetween => "not between",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Operator::IsNull | Operator::IsNotNull => Arity::None,
            Operator::In | Operator::NotIn => Arity::ListValued,
            Operator::Between | Operator::NotBetween => Arity::Pair,
            Operator::EqualTo
            | Operator::NotEqualTo
            | Operator::GreaterThan
            | Operator::GreaterThanOrEqualTo
            | Operator::LessThan
            | Operator::LessThanOrEqualTo
            | Operator::Like
            | Operator::NotLike => Arity::Single,
        }
    }

    pub fn applies_to(self, column: &ColumnDescriptor) -> bool {
        self.applies_to_kind(column.is_character_column())
    }

    /// Applicability by column kind alone; pattern matching needs character data
    pub fn applies_to_kind(self, is_character_column: bool) -> bool {
        match self {
            Operator::Like | Operator::NotLike => is_character_column,
            _ => true,
        }
    }

    /// `and` + capitalized property + name fragment
    pub fn method_name(self, column: &ColumnDescriptor) -> String {
        format!(
            "and{}{}",
            column.capitalized_property(),
            self.name_fragment()
        )
    }

    /// Condition text stored by the generated method, e.g. `NAME like`
    pub fn condition(self, column_reference: &str) -> String {
        format!("{} {}", column_reference, self.sql_token())
    }
}

/// Operators applicable to a column, in emission order
pub fn operators_for(column: &ColumnDescriptor) -> Vec<Operator> {
    ALL_OPERATORS
        .iter()
        .copied()
        .filter(|op| op.applies_to(column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::JdbcType;

    #[test]
    fn test_character_column_gets_like() {
        let col = ColumnDescriptor::new("first_name", JdbcType::Varchar);
        let ops = operators_for(&col);
        assert_eq!(ops.len(), 14);
        assert!(ops.contains(&Operator::Like));
        assert!(ops.contains(&Operator::NotLike));
    }

    #[test]
    fn test_numeric_column_has_no_like() {
        let col = ColumnDescriptor::new("id", JdbcType::Integer);
        let ops = operators_for(&col);
        assert_eq!(ops.len(), 12);
        assert!(!ops.contains(&Operator::Like));
        assert!(!ops.contains(&Operator::NotLike));
    }

    #[test]
    fn test_order_places_like_before_in() {
        let col = ColumnDescriptor::new("name", JdbcType::Char);
        let names: Vec<_> = operators_for(&col)
            .into_iter()
            .map(Operator::name_fragment)
            .collect();
        assert_eq!(
            names,
            vec![
                "IsNull",
                "IsNotNull",
                "EqualTo",
                "NotEqualTo",
                "GreaterThan",
                "GreaterThanOrEqualTo",
                "LessThan",
                "LessThanOrEqualTo",
                "Like",
                "NotLike",
                "In",
                "NotIn",
                "Between",
                "NotBetween",
            ]
        );
    }

    #[test]
    fn test_method_name() {
        let col = ColumnDescriptor::new("first_name", JdbcType::Varchar);
        assert_eq!(
            Operator::GreaterThanOrEqualTo.method_name(&col),
            "andFirstNameGreaterThanOrEqualTo"
        );
        assert_eq!(Operator::IsNull.method_name(&col), "andFirstNameIsNull");
    }

    #[test]
    fn test_arity_categories() {
        assert_eq!(Operator::IsNotNull.arity().category(), ConditionCategory::NoValue);
        assert_eq!(Operator::Like.arity().category(), ConditionCategory::SingleValue);
        assert_eq!(Operator::NotIn.arity().category(), ConditionCategory::ListValue);
        assert_eq!(Operator::NotBetween.arity().category(), ConditionCategory::BetweenValue);
    }

    #[test]
    fn test_condition_text() {
        assert_eq!(Operator::NotEqualTo.condition("u.id"), "u.id <>");
        assert_eq!(Operator::IsNull.condition("NAME"), "NAME is null");
    }
}
