//! # exemplar
//!
//! Generate MyBatis query-by-example code from database schemas
//!
//! This crate provides a CLI tool and library for introspecting database
//! tables and generating the example, criteria, SQL provider, mapper and
//! XML artifacts that let callers build dynamic WHERE clauses.

pub mod codegen;
pub mod config;
pub mod dom;
pub mod error;
pub mod introspect;
pub mod plugin;
pub mod render;
pub mod runtime;
pub mod schema;

pub mod prelude {
    pub use crate::codegen::{
        CodeGenConfig, CodeGenerator, GenerationReport, JavaGenerator, SqlBuilderStyle,
    };
    pub use crate::config::{DbConfig, TableAlias, TypeHandlerOverride};
    pub use crate::error::ExemplarError;
    pub use crate::introspect::{Introspector, TableFilter};
    pub use crate::plugin::{Plugin, PluginChain, SuppressPlugin};
    pub use crate::schema::{ColumnDescriptor, IntrospectedTable, JdbcType, TableRules};
}

#[cfg(feature = "postgres")]
pub use introspect::PostgresIntrospector;
