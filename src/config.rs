//! Configuration loading
//!
//! Loads database connection configuration from environment variables,
//! optionally reading from a .env file first, and parses the per-table
//! overrides given on the command line.

use crate::prelude::{ExemplarError, IntrospectedTable};
use std::{env, path::Path, str::FromStr};
use tracing::{debug, error, trace, warn};

/// Database connection configuration
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    /// Load configuration from environment variables
    ///
    /// Expected variables:
    /// - DB_HOST (default: localhost)
    /// - DB_PORT (default: 5432)
    /// - DB_NAME (required)
    /// - DB_USER (required)
    /// - DB_PASSWORD (required)
    pub fn from_env() -> Result<Self, ExemplarError> {
        debug!("Loading database configuration from environment");

        let host = env::var("DB_HOST").unwrap_or_else(|_| {
            trace!("DB_HOST not set, using default");
            "localhost".to_string()
        });

        let port_str = env::var("DB_PORT").unwrap_or_else(|_| {
            trace!("DB_PORT not set, using default");
            "5432".to_string()
        });

        let port = port_str.parse::<u16>().map_err(|e| {
            error!(port = ?port_str, error = ?e, "Invalid DB_PORT value");
            ExemplarError::Config("DB_PORT must be a valid port number".to_string())
        })?;

        let database = required("DB_NAME")?;
        let user = required("DB_USER")?;
        let password = required("DB_PASSWORD")?;

        debug!(host = ?host, port = ?port, database = ?database, user = ?user, "Configuration loaded");

        Ok(Self {
            host,
            port,
            database,
            user,
            password,
        })
    }

    /// Load a .env file and then read configuration from environment
    pub fn load(env_file: &Path) -> Result<Self, ExemplarError> {
        if env_file.exists() {
            debug!(path = ?env_file, "Loading environment file");
            dotenvy::from_path(env_file).map_err(|e| {
                error!(path = ?env_file, error = ?e, "Failed to load environment file");
                ExemplarError::Config(format!("Failed to load {}: {}", env_file.display(), e))
            })?;
        } else {
            warn!(path = ?env_file, "Environment file not found, using existing environment");
        }

        Self::from_env()
    }

    /// Build a PostgreSQL connection string
    pub fn postgres_connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            self.host, self.port, self.database, self.user, self.password
        )
    }

    /// Build a connection string with password redacted (for error messages)
    pub fn redacted_connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password=***",
            self.host, self.port, self.database, self.user
        )
    }
}

fn required(name: &str) -> Result<String, ExemplarError> {
    env::var(name).map_err(|_| {
        error!(variable = name, "Required environment variable is not set");
        ExemplarError::Config(format!("{} environment variable is required", name))
    })
}

/// Custom type handler for one column, written `table.column=fully.qualified.Handler`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHandlerOverride {
    pub table: String,
    pub column: String,
    pub type_handler: String,
}

impl FromStr for TypeHandlerOverride {
    type Err = ExemplarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ExemplarError::Config(format!(
                "Invalid type handler override '{}', expected table.column=Handler",
                s
            ))
        };

        let (target, handler) = s.split_once('=').ok_or_else(invalid)?;
        let (table, column) = target.trim().split_once('.').ok_or_else(invalid)?;
        let (table, column, handler) = (table.trim(), column.trim(), handler.trim());
        if table.is_empty() || column.is_empty() || handler.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            table: table.to_string(),
            column: column.to_string(),
            type_handler: handler.to_string(),
        })
    }
}

/// Runtime alias for one table, written `table=alias`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAlias {
    pub table: String,
    pub alias: String,
}

impl FromStr for TableAlias {
    type Err = ExemplarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((table, alias))
                if !table.trim().is_empty()
                    && !alias.trim().is_empty()
                    && alias.trim().chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                Ok(Self {
                    table: table.trim().to_string(),
                    alias: alias.trim().to_string(),
                })
            }
            _ => Err(ExemplarError::Config(format!(
                "Invalid table alias '{}', expected table=alias",
                s
            ))),
        }
    }
}

/// Parse a list of CLI override values
pub fn parse_overrides<T>(values: &[String]) -> Result<Vec<T>, ExemplarError>
where
    T: FromStr<Err = ExemplarError>,
{
    values.iter().map(|v| v.parse()).collect()
}

/// Apply overrides to introspected tables
///
/// Overrides naming a table or column that was not introspected are
/// reported back as warnings.
pub fn apply_overrides(
    tables: &mut [IntrospectedTable],
    type_handlers: &[TypeHandlerOverride],
    aliases: &[TableAlias],
) -> Vec<String> {
    let mut warnings = Vec::new();

    for entry in type_handlers {
        let column = tables
            .iter_mut()
            .filter(|t| t.name == entry.table)
            .flat_map(|t| t.columns.iter_mut())
            .find(|c| c.actual_column_name == entry.column);
        match column {
            Some(column) => {
                debug!(
                    table = ?entry.table,
                    column = ?entry.column,
                    type_handler = ?entry.type_handler,
                    "Applying type handler"
                );
                column.type_handler = Some(entry.type_handler.clone());
            }
            None => warnings.push(format!(
                "Type handler override for {}.{} matches no introspected column",
                entry.table, entry.column
            )),
        }
    }

    for entry in aliases {
        match tables.iter_mut().find(|t| t.name == entry.table) {
            Some(table) => {
                debug!(table = ?entry.table, alias = ?entry.alias, "Applying table alias");
                table.alias = Some(entry.alias.clone());
            }
            None => warnings.push(format!(
                "Alias for {} matches no introspected table",
                entry.table
            )),
        }
    }

    for message in &warnings {
        warn!("{}", message);
    }
    warnings
}
