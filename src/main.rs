use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use exemplar::codegen::{CodeGenConfig, CodeGenerator, JavaGenerator, SqlBuilderStyle};
use exemplar::config::{apply_overrides, parse_overrides, DbConfig, TableAlias, TypeHandlerOverride};
use exemplar::introspect::{Introspector, TableFilter};
use exemplar::plugin::{PluginChain, SuppressPlugin};
use exemplar::schema::{IntrospectedTable, TableRules};

#[derive(Debug, Clone, ValueEnum)]
enum Database {
    Postgres,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum CliSqlBuilder {
    /// Static SqlBuilder methods in a provider class
    Legacy,
    /// SQL builder instances in a provider class
    #[default]
    Provider,
    /// Dynamic SQL in an XML mapper
    Xml,
}

impl From<CliSqlBuilder> for SqlBuilderStyle {
    fn from(style: CliSqlBuilder) -> Self {
        match style {
            CliSqlBuilder::Legacy => SqlBuilderStyle::Legacy,
            CliSqlBuilder::Provider => SqlBuilderStyle::Provider,
            CliSqlBuilder::Xml => SqlBuilderStyle::Xml,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "exemplar")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Target database type
    database: Database,

    /// Output source root
    #[arg(short, long, default_value = "./src/main/java")]
    output: PathBuf,

    /// Package for record and example classes
    #[arg(long, default_value = "model")]
    model_package: String,

    /// Package for mapper interfaces, SQL providers and XML mappers
    #[arg(long, default_value = "mapper")]
    mapper_package: String,

    /// How by-example SQL is assembled
    #[arg(long, value_enum, default_value_t = CliSqlBuilder::Provider)]
    sql_builder: CliSqlBuilder,

    /// Emit raw types and casts instead of type arguments
    #[arg(long)]
    no_generics: bool,

    /// Database schema to introspect
    #[arg(long, default_value = "public")]
    schema: String,

    /// Path to .env file for connection config
    #[arg(long, default_value = "./.env")]
    env_file: PathBuf,

    /// Comma-separated list of tables to include (default: all)
    #[arg(long, value_delimiter = ',')]
    tables: Option<Vec<String>>,

    /// Comma-separated list of tables to exclude
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Custom type handler, as table.column=fully.qualified.Handler (repeatable)
    #[arg(long = "type-handler")]
    type_handlers: Vec<String>,

    /// Runtime table alias, as table=alias (repeatable)
    #[arg(long = "alias")]
    aliases: Vec<String>,

    /// Comma-separated element names to leave out (method, field or Owner.member)
    #[arg(long, value_delimiter = ',')]
    suppress: Vec<String>,

    /// Skip countByExample
    #[arg(long)]
    no_count_by_example: bool,

    /// Skip deleteByExample
    #[arg(long)]
    no_delete_by_example: bool,

    /// Skip selectByExample
    #[arg(long)]
    no_select_by_example: bool,

    /// Skip updateByExampleSelective
    #[arg(long)]
    no_update_by_example_selective: bool,

    /// Skip updateByExample
    #[arg(long)]
    no_update_by_example: bool,

    /// Skip updateByExampleWithBLOBs
    #[arg(long)]
    no_update_by_example_with_blobs: bool,

    /// Skip insert and insertSelective
    #[arg(long)]
    no_insert: bool,

    /// Skip selectByPrimaryKey
    #[arg(long)]
    no_select_by_primary_key: bool,

    /// Skip deleteByPrimaryKey
    #[arg(long)]
    no_delete_by_primary_key: bool,

    /// Skip updateByPrimaryKey and updateByPrimaryKeySelective
    #[arg(long)]
    no_update_by_primary_key: bool,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn rules(&self) -> TableRules {
        TableRules {
            count_by_example: !self.no_count_by_example,
            delete_by_example: !self.no_delete_by_example,
            select_by_example: !self.no_select_by_example,
            update_by_example_selective: !self.no_update_by_example_selective,
            update_by_example: !self.no_update_by_example,
            update_by_example_with_blobs: !self.no_update_by_example_with_blobs,
            insert: !self.no_insert,
            select_by_primary_key: !self.no_select_by_primary_key,
            delete_by_primary_key: !self.no_delete_by_primary_key,
            update_by_primary_key: !self.no_update_by_primary_key,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        error!(error = ?e, "Fatal error");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("exemplar v{}", env!("CARGO_PKG_VERSION"));
    info!(
        database = ?cli.database,
        output = ?cli.output,
        sql_builder = ?cli.sql_builder,
        schema = ?cli.schema,
        "Starting code generation"
    );

    // Parse overrides before touching the database
    let type_handlers: Vec<TypeHandlerOverride> =
        parse_overrides(&cli.type_handlers).context("Invalid --type-handler value")?;
    let aliases: Vec<TableAlias> =
        parse_overrides(&cli.aliases).context("Invalid --alias value")?;

    let config = DbConfig::load(&cli.env_file).context("Failed to load database configuration")?;
    debug!(connection = ?config.redacted_connection_string(), "Loaded configuration");

    let filter = TableFilter {
        include: cli.tables.clone(),
        exclude: cli.exclude.clone(),
    };

    if filter.include.is_some() || filter.exclude.is_some() {
        debug!(filter = ?filter, "Table filter configured");
    }

    let mut tables = introspect_database(&cli.database, &config, &cli.schema, &filter)?;

    if tables.is_empty() {
        warn!("No tables found after filtering");
        return Ok(());
    }

    let rules = cli.rules();
    for table in &mut tables {
        table.rules = rules;
    }
    let override_warnings = apply_overrides(&mut tables, &type_handlers, &aliases);

    info!(tables = ?tables.len(), "Schema ready for code generation");

    for table in &tables {
        debug!(
            table = ?table.name,
            columns = ?table.columns.len(),
            primary_key = ?table.primary_key,
            alias = ?table.alias,
            "Table"
        );
    }

    let codegen_config = CodeGenConfig::new(cli.output)
        .with_model_package(&cli.model_package)
        .with_mapper_package(&cli.mapper_package)
        .with_sql_builder(cli.sql_builder.into())
        .with_generics(!cli.no_generics);
    debug!(codegen_config = ?codegen_config, "Code generation config");

    let mut plugins = PluginChain::new();
    if !cli.suppress.is_empty() {
        debug!(suppress = ?cli.suppress, "Suppressing elements");
        plugins.push(SuppressPlugin::new(cli.suppress.iter().map(String::as_str)));
    }

    let generator = JavaGenerator::new(plugins);
    let mut report = generator
        .generate(&tables, &codegen_config)
        .context("Code generation failed")?;
    report.prepend_warnings(override_warnings);

    // Each warning was logged where it was raised
    if !report.warnings.is_empty() {
        warn!(warnings = report.warnings.len(), "Generation finished with warnings");
    }
    info!(
        files = report.files_written.len(),
        output = ?codegen_config.output_path,
        "Done"
    );

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn introspect_database(
    database: &Database,
    config: &DbConfig,
    schema_name: &str,
    filter: &TableFilter,
) -> Result<Vec<IntrospectedTable>> {
    match database {
        Database::Postgres => introspect_postgres(config, schema_name, filter),
    }
}

#[cfg(feature = "postgres")]
fn introspect_postgres(
    config: &DbConfig,
    schema_name: &str,
    filter: &TableFilter,
) -> Result<Vec<IntrospectedTable>> {
    use exemplar::PostgresIntrospector;
    use postgres::NoTls;

    info!(connection = ?config.redacted_connection_string(), "Connecting to PostgreSQL");

    let mut client = postgres::Client::connect(&config.postgres_connection_string(), NoTls)
        .with_context(|| {
            format!(
                "Failed to connect to PostgreSQL at {}",
                config.redacted_connection_string()
            )
        })?;

    info!("Connected to database");

    let mut introspector = PostgresIntrospector::new(&mut client);
    let tables = introspector
        .introspect(schema_name, filter)
        .context("Failed to introspect schema")?;

    Ok(tables)
}

#[cfg(not(feature = "postgres"))]
fn introspect_postgres(
    _config: &DbConfig,
    _schema_name: &str,
    _filter: &TableFilter,
) -> Result<Vec<IntrospectedTable>> {
    bail!("PostgreSQL support not enabled. Rebuild with --features postgres")
}
