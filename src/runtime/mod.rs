//! Runtime model of the generated example classes
//!
//! A Rust rendition of what the generated `Example`/`Criteria` pair does at
//! run time: conditions accumulate in call order as tagged [`Criterion`]
//! values, groups are OR'd together, and [`where_clause`] renders them the
//! way the generated `applyWhere` does. Instances are single-owner and not
//! thread-safe, like their Java counterparts.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::codegen::operator::{Arity, ConditionCategory, Operator};
use crate::schema::{ColumnDescriptor, IntrospectedTable};

pub mod sql;
pub mod where_clause;

pub use sql::SqlBuilder;
pub use where_clause::{apply_where, render_where};

/// Errors raised while building criteria, mirroring the generated guards
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("Value for condition cannot be null")]
    NullCondition,

    #[error("Value for {property} cannot be null")]
    NullValue { property: String },

    #[error("Value list for {property} cannot be null or empty")]
    EmptyValueList { property: String },

    #[error("Between values for {property} cannot be null")]
    NullBetweenValues { property: String },

    #[error("Operator {operator} does not apply to {property}")]
    NotApplicable {
        property: String,
        operator: &'static str,
    },

    #[error("Operator {operator} on {property} takes {expected:?} operands")]
    OperandMismatch {
        property: String,
        operator: &'static str,
        expected: Arity,
    },
}

/// A bound value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// One stored condition
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    NoValue {
        condition: String,
    },
    Single {
        condition: String,
        value: Value,
        type_handler: Option<String>,
    },
    List {
        condition: String,
        values: Vec<Value>,
        type_handler: Option<String>,
    },
    Between {
        condition: String,
        value: Value,
        second_value: Value,
        type_handler: Option<String>,
    },
}

impl Criterion {
    pub fn condition(&self) -> &str {
        match self {
            Criterion::NoValue { condition }
            | Criterion::Single { condition, .. }
            | Criterion::List { condition, .. }
            | Criterion::Between { condition, .. } => condition,
        }
    }

    pub fn type_handler(&self) -> Option<&str> {
        match self {
            Criterion::NoValue { .. } => None,
            Criterion::Single { type_handler, .. }
            | Criterion::List { type_handler, .. }
            | Criterion::Between { type_handler, .. } => type_handler.as_deref(),
        }
    }

    pub fn category(&self) -> ConditionCategory {
        match self {
            Criterion::NoValue { .. } => ConditionCategory::NoValue,
            Criterion::Single { .. } => ConditionCategory::SingleValue,
            Criterion::List { .. } => ConditionCategory::ListValue,
            Criterion::Between { .. } => ConditionCategory::BetweenValue,
        }
    }
}

/// What a condition method is called with; `None` models a Java `null`
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    Single(Option<Value>),
    Pair(Option<Value>, Option<Value>),
    List(Option<Vec<Value>>),
}

/// A column as the criteria methods see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    /// Column reference used in conditions, alias-qualified when the table has one
    pub reference: String,
    pub property: String,
    pub type_handler: Option<String>,
    /// Character columns also accept `Like` and `NotLike`
    pub is_character_column: bool,
}

impl ColumnRef {
    pub fn new(reference: &str, property: &str) -> Self {
        Self {
            reference: reference.to_string(),
            property: property.to_string(),
            type_handler: None,
            is_character_column: false,
        }
    }

    pub fn character(mut self) -> Self {
        self.is_character_column = true;
        self
    }

    pub fn with_type_handler(mut self, type_handler: &str) -> Self {
        self.type_handler = Some(type_handler.to_string());
        self
    }

    pub fn for_column(table: &IntrospectedTable, column: &ColumnDescriptor) -> Self {
        Self {
            reference: table.aliased_column_name(column),
            property: column.java_property.clone(),
            type_handler: column.criterion_type_handler().map(str::to_string),
            is_character_column: column.is_character_column(),
        }
    }
}

/// One AND-combined group of conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    criteria: Vec<Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        !self.criteria.is_empty()
    }

    /// Conditions in call order
    pub fn all_criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn add_condition(&mut self, condition: Option<&str>) -> Result<&mut Self, CriteriaError> {
        let condition = condition.ok_or(CriteriaError::NullCondition)?;
        self.criteria.push(Criterion::NoValue {
            condition: condition.to_string(),
        });
        Ok(self)
    }

    pub fn add_value(
        &mut self,
        condition: &str,
        value: Option<Value>,
        property: &str,
        type_handler: Option<&str>,
    ) -> Result<&mut Self, CriteriaError> {
        let value = value.ok_or_else(|| CriteriaError::NullValue {
            property: property.to_string(),
        })?;
        self.criteria.push(Criterion::Single {
            condition: condition.to_string(),
            value,
            type_handler: type_handler.map(str::to_string),
        });
        Ok(self)
    }

    pub fn add_values(
        &mut self,
        condition: &str,
        values: Option<Vec<Value>>,
        property: &str,
        type_handler: Option<&str>,
    ) -> Result<&mut Self, CriteriaError> {
        let values = values
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CriteriaError::EmptyValueList {
                property: property.to_string(),
            })?;
        self.criteria.push(Criterion::List {
            condition: condition.to_string(),
            values,
            type_handler: type_handler.map(str::to_string),
        });
        Ok(self)
    }

    pub fn add_between(
        &mut self,
        condition: &str,
        value1: Option<Value>,
        value2: Option<Value>,
        property: &str,
        type_handler: Option<&str>,
    ) -> Result<&mut Self, CriteriaError> {
        let (value, second_value) = value1.zip(value2).ok_or_else(|| {
            CriteriaError::NullBetweenValues {
                property: property.to_string(),
            }
        })?;
        self.criteria.push(Criterion::Between {
            condition: condition.to_string(),
            value,
            second_value,
            type_handler: type_handler.map(str::to_string),
        });
        Ok(self)
    }

    /// Apply an operator to a column, as the generated `and<Property><Operator>` methods do
    pub fn and(
        &mut self,
        column: &ColumnRef,
        operator: Operator,
        operand: Operand,
    ) -> Result<&mut Self, CriteriaError> {
        if !operator.applies_to_kind(column.is_character_column) {
            return Err(CriteriaError::NotApplicable {
                property: column.property.clone(),
                operator: operator.name_fragment(),
            });
        }

        let condition = operator.condition(&column.reference);
        let handler = column.type_handler.as_deref();
        match (operator.arity(), operand) {
            (Arity::None, Operand::None) => self.add_condition(Some(&condition)),
            (Arity::Single, Operand::Single(value)) => {
                self.add_value(&condition, value, &column.property, handler)
            }
            (Arity::ListValued, Operand::List(values)) => {
                self.add_values(&condition, values, &column.property, handler)
            }
            (Arity::Pair, Operand::Pair(value1, value2)) => {
                self.add_between(&condition, value1, value2, &column.property, handler)
            }
            (expected, _) => Err(CriteriaError::OperandMismatch {
                property: column.property.clone(),
                operator: operator.name_fragment(),
                expected,
            }),
        }
    }
}

/// Criteria group handle shared between an example and its callers
pub type SharedCriteria = Rc<RefCell<Criteria>>;

/// OR'd criteria groups plus ordering and distinct flags
#[derive(Debug, Default)]
pub struct Example {
    order_by_clause: Option<String>,
    distinct: bool,
    ored_criteria: Rc<RefCell<Vec<SharedCriteria>>>,
}

impl Example {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy flags and share the criteria groups, as the protected Java copy constructor does
    pub fn shallow_copy(&self) -> Self {
        Self {
            order_by_clause: self.order_by_clause.clone(),
            distinct: self.distinct,
            ored_criteria: Rc::clone(&self.ored_criteria),
        }
    }

    /// Whether both examples see the same criteria groups
    pub fn shares_criteria_with(&self, other: &Example) -> bool {
        Rc::ptr_eq(&self.ored_criteria, &other.ored_criteria)
    }

    pub fn set_order_by_clause(&mut self, clause: Option<&str>) {
        self.order_by_clause = clause.map(str::to_string);
    }

    pub fn order_by_clause(&self) -> Option<&str> {
        self.order_by_clause.as_deref()
    }

    pub fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn ored_criteria(&self) -> Vec<SharedCriteria> {
        self.ored_criteria.borrow().clone()
    }

    /// Append an externally built group
    pub fn or_with(&self, criteria: SharedCriteria) {
        self.ored_criteria.borrow_mut().push(criteria);
    }

    /// Create a group and append it
    pub fn or(&self) -> SharedCriteria {
        let criteria = Rc::new(RefCell::new(Criteria::new()));
        self.ored_criteria.borrow_mut().push(Rc::clone(&criteria));
        criteria
    }

    /// Create a group; it is only retained when no group exists yet
    pub fn create_criteria(&self) -> SharedCriteria {
        let criteria = Rc::new(RefCell::new(Criteria::new()));
        let mut groups = self.ored_criteria.borrow_mut();
        if groups.is_empty() {
            groups.push(Rc::clone(&criteria));
        }
        criteria
    }

    pub fn clear(&mut self) {
        self.ored_criteria.borrow_mut().clear();
        self.order_by_clause = None;
        self.distinct = false;
    }
}
