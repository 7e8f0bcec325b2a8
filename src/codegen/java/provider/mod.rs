//! SQL provider class generation
//!
//! Two backends produce the same statements: the legacy one calls the
//! static, thread-bound `SqlBuilder` methods, the builder one keeps an
//! explicit `SQL` instance per statement.

mod apply_where;

pub use apply_where::apply_where_method;

use crate::codegen::{escape_java, parameter_clause, statement, GenContext, SqlBuilderStyle};
use crate::dom::{JavaType, Method, TopLevelClass};
use crate::plugin::ArtifactKind;
use crate::schema::ColumnDescriptor;

const ARTIFACT: ArtifactKind = ArtifactKind::SqlProvider;

const SQL_BUILDER: &str = "org.apache.ibatis.jdbc.SqlBuilder";
const SQL_CLASS: &str = "org.apache.ibatis.jdbc.SQL";

const STATIC_VERBS: [&str; 11] = [
    "BEGIN",
    "DELETE_FROM",
    "FROM",
    "INSERT_INTO",
    "ORDER_BY",
    "SELECT",
    "SELECT_DISTINCT",
    "SET",
    "UPDATE",
    "VALUES",
    "WHERE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Static `SqlBuilder` calls
    Static,
    /// `new SQL()` instance
    Builder,
}

impl Backend {
    pub fn from_style(style: SqlBuilderStyle) -> Option<Self> {
        match style {
            SqlBuilderStyle::Legacy => Some(Backend::Static),
            SqlBuilderStyle::Provider => Some(Backend::Builder),
            SqlBuilderStyle::Xml => None,
        }
    }

    /// Receiver for builder calls
    pub fn call_prefix(self) -> &'static str {
        match self {
            Backend::Static => "",
            Backend::Builder => "sql.",
        }
    }

    fn begin(self) -> &'static str {
        match self {
            Backend::Static => "BEGIN();",
            Backend::Builder => "SQL sql = new SQL();",
        }
    }

    fn finish(self) -> &'static str {
        match self {
            Backend::Static => "return SQL();",
            Backend::Builder => "return sql.toString();",
        }
    }

    fn apply_where(self, include_example_phrase: bool) -> String {
        match self {
            Backend::Static => format!("applyWhere(example, {});", include_example_phrase),
            Backend::Builder => format!("applyWhere(sql, example, {});", include_example_phrase),
        }
    }

    fn call(self, verb: &str, argument: &str) -> String {
        format!("{}{}({});", self.call_prefix(), verb, argument)
    }
}

fn quoted(s: &str) -> String {
    format!("\"{}\"", escape_java(s))
}

/// Build the provider class, or `None` when no statement needs one
pub fn sql_provider_class(ctx: &GenContext<'_>, backend: Backend) -> Option<TopLevelClass> {
    let table = ctx.table;
    let by_example = table.generates_any_by_example();
    if !by_example
        && !table.generates_insert_selective()
        && !table.generates_update_by_primary_key_selective()
    {
        return None;
    }

    let mut class = TopLevelClass::new(ctx.names.sql_provider.clone());
    // Types named only inside method bodies
    class.add_imported_type(&ctx.names.record);
    if by_example {
        let example = ctx.names.example.full_name();
        class.add_imported_type(&ctx.names.example);
        class.add_imported_type(&JavaType::new(&format!("{}.Criteria", example)));
        class.add_imported_type(&JavaType::new(&format!("{}.Criterion", example)));
        class.add_imported_type(&JavaType::list());
    }
    match backend {
        Backend::Static => {}
        Backend::Builder => class.add_imported_type(&JavaType::new(SQL_CLASS)),
    }

    if table.generates_count_by_example() {
        ctx.add_method(ARTIFACT, &mut class, count_by_example(ctx, backend));
    }
    if table.generates_delete_by_example() {
        ctx.add_method(ARTIFACT, &mut class, delete_by_example(ctx, backend));
    }
    if table.generates_insert_selective() {
        ctx.add_method(ARTIFACT, &mut class, insert_selective(ctx, backend));
    }
    if table.generates_select_by_example_with_blobs() {
        let method = select_by_example(
            ctx,
            backend,
            statement::SELECT_BY_EXAMPLE_WITH_BLOBS,
            table.all_columns(),
        );
        ctx.add_method(ARTIFACT, &mut class, method);
    }
    if table.generates_select_by_example_without_blobs() {
        let method = select_by_example(
            ctx,
            backend,
            statement::SELECT_BY_EXAMPLE,
            table.non_blob_columns(),
        );
        ctx.add_method(ARTIFACT, &mut class, method);
    }
    if table.generates_update_by_example_selective() {
        ctx.add_method(ARTIFACT, &mut class, update_by_example_selective(ctx, backend));
    }
    if table.generates_update_by_example_with_blobs() {
        let method = update_by_example(
            ctx,
            backend,
            statement::UPDATE_BY_EXAMPLE_WITH_BLOBS,
            table.all_columns(),
        );
        ctx.add_method(ARTIFACT, &mut class, method);
    }
    if table.generates_update_by_example_without_blobs() {
        let method = update_by_example(
            ctx,
            backend,
            statement::UPDATE_BY_EXAMPLE,
            table.non_blob_columns(),
        );
        ctx.add_method(ARTIFACT, &mut class, method);
    }
    if table.generates_update_by_primary_key_selective() {
        ctx.add_method(ARTIFACT, &mut class, update_by_primary_key_selective(ctx, backend));
    }
    if by_example {
        ctx.add_method(ARTIFACT, &mut class, apply_where_method(ctx, backend));
    }

    if backend == Backend::Static {
        add_static_imports(&mut class);
    }

    ctx.accept_class(ARTIFACT, class)
}

/// Import only the `SqlBuilder` methods the surviving bodies call
fn add_static_imports(class: &mut TopLevelClass) {
    let imports = static_imports_for(class);
    for import in imports {
        class.add_static_import(&import);
    }
}

fn static_imports_for(class: &TopLevelClass) -> Vec<String> {
    let lines: Vec<&str> = class
        .methods
        .iter()
        .flat_map(|m| m.body.iter())
        .map(|l| l.trim_start())
        .collect();
    let mut imports: Vec<String> = STATIC_VERBS
        .iter()
        .filter(|verb| {
            let call = format!("{}(", verb);
            lines.iter().any(|l| l.starts_with(&call))
        })
        .map(|verb| format!("{}.{}", SQL_BUILDER, verb))
        .collect();
    if lines.iter().any(|l| l.contains("SQL()")) {
        imports.push(format!("{}.SQL", SQL_BUILDER));
    }
    imports
}

fn by_example_method(ctx: &GenContext<'_>, name: &str) -> Method {
    Method::new(name)
        .returning(JavaType::string())
        .with_parameter(ctx.names.example.clone(), "example")
}

fn parameter_map_method(ctx: &GenContext<'_>, name: &str) -> Method {
    let map = if ctx.config.use_generics {
        JavaType::new("java.util.Map<java.lang.String, java.lang.Object>")
    } else {
        JavaType::new("java.util.Map")
    };
    Method::new(name)
        .returning(JavaType::string())
        .with_parameter(map, "parameter")
}

fn count_by_example(ctx: &GenContext<'_>, backend: Backend) -> Method {
    let mut method = by_example_method(ctx, statement::COUNT_BY_EXAMPLE);
    method.add_body_lines([
        backend.begin().to_string(),
        backend.call("SELECT", &quoted("count(*)")),
        backend.call("FROM", &quoted(&ctx.table.aliased_fully_qualified_name())),
        backend.apply_where(false),
        backend.finish().to_string(),
    ]);
    method
}

fn delete_by_example(ctx: &GenContext<'_>, backend: Backend) -> Method {
    let mut method = by_example_method(ctx, statement::DELETE_BY_EXAMPLE);
    method.add_body_lines([
        backend.begin().to_string(),
        backend.call("DELETE_FROM", &quoted(&ctx.table.aliased_fully_qualified_name())),
        backend.apply_where(false),
        backend.finish().to_string(),
    ]);
    method
}

fn select_by_example(
    ctx: &GenContext<'_>,
    backend: Backend,
    name: &str,
    columns: Vec<&ColumnDescriptor>,
) -> Method {
    let mut method = by_example_method(ctx, name);
    let mut lines = vec![backend.begin().to_string()];
    for (i, column) in columns.iter().enumerate() {
        let phrase = quoted(&ctx.table.select_list_phrase(column));
        if i == 0 {
            lines.push("if (example != null && example.isDistinct()) {".to_string());
            lines.push(backend.call("SELECT_DISTINCT", &phrase));
            lines.push("} else {".to_string());
            lines.push(backend.call("SELECT", &phrase));
            lines.push("}".to_string());
        } else {
            lines.push(backend.call("SELECT", &phrase));
        }
    }
    lines.push(backend.call("FROM", &quoted(&ctx.table.aliased_fully_qualified_name())));
    lines.push(backend.apply_where(false));
    lines.push(String::new());
    lines.push("if (example != null && example.getOrderByClause() != null) {".to_string());
    lines.push(backend.call("ORDER_BY", "example.getOrderByClause()"));
    lines.push("}".to_string());
    lines.push(String::new());
    lines.push(backend.finish().to_string());
    method.add_body_lines(lines);
    method
}

fn set_phrase(ctx: &GenContext<'_>, column: &ColumnDescriptor) -> String {
    quoted(&format!(
        "{} = {}",
        ctx.table.aliased_column_name(column),
        parameter_clause(column, Some("record."))
    ))
}

fn update_by_example_selective(ctx: &GenContext<'_>, backend: Backend) -> Method {
    let record = ctx.names.record.base_short_name().to_string();
    let example = ctx.names.example.base_short_name().to_string();
    let mut method = parameter_map_method(ctx, statement::UPDATE_BY_EXAMPLE_SELECTIVE);
    method.add_body_line(format!(
        "{0} record = ({0}) parameter.get(\"record\");",
        record
    ));
    method.add_body_line(format!(
        "{0} example = ({0}) parameter.get(\"example\");",
        example
    ));
    method.add_body_line(String::new());
    method.add_body_line(backend.begin());
    method.add_body_line(backend.call("UPDATE", &quoted(&ctx.table.aliased_fully_qualified_name())));
    method.add_body_line(String::new());

    for column in ctx.table.all_columns() {
        add_unless_null(&mut method, column, backend.call("SET", &set_phrase(ctx, column)));
        method.add_body_line(String::new());
    }

    method.add_body_line(backend.apply_where(true));
    method.add_body_line(backend.finish());
    method
}

/// Emit `line` only when the record property is set; primitives always are
fn add_unless_null(method: &mut Method, column: &ColumnDescriptor, line: String) {
    if column.java_type.is_primitive() {
        method.add_body_line(line);
    } else {
        method.add_body_line(format!(
            "if (record.get{}() != null) {{",
            column.capitalized_property()
        ));
        method.add_body_line(line);
        method.add_body_line("}");
    }
}

fn record_method(ctx: &GenContext<'_>, name: &str) -> Method {
    Method::new(name)
        .returning(JavaType::string())
        .with_parameter(ctx.names.record.clone(), "record")
}

/// `name = #{name,...}` against the record itself
fn key_phrase(column: &ColumnDescriptor) -> String {
    quoted(&format!(
        "{} = {}",
        column.actual_column_name,
        parameter_clause(column, None)
    ))
}

fn insert_selective(ctx: &GenContext<'_>, backend: Backend) -> Method {
    let mut method = record_method(ctx, statement::INSERT_SELECTIVE);
    method.add_body_line(backend.begin());
    method.add_body_line(backend.call("INSERT_INTO", &quoted(&ctx.table.fully_qualified_name())));
    for column in ctx.table.all_columns() {
        method.add_body_line(String::new());
        let values = format!(
            "{}, {}",
            quoted(&column.actual_column_name),
            quoted(&parameter_clause(column, None))
        );
        add_unless_null(&mut method, column, backend.call("VALUES", &values));
    }
    method.add_body_line(String::new());
    method.add_body_line(backend.finish());
    method
}

fn update_by_primary_key_selective(ctx: &GenContext<'_>, backend: Backend) -> Method {
    let table = ctx.table;
    let mut method = record_method(ctx, statement::UPDATE_BY_PRIMARY_KEY_SELECTIVE);
    method.add_body_line(backend.begin());
    method.add_body_line(backend.call("UPDATE", &quoted(&table.fully_qualified_name())));
    method.add_body_line(String::new());
    for column in table.non_primary_key_columns() {
        add_unless_null(&mut method, column, backend.call("SET", &key_phrase(column)));
        method.add_body_line(String::new());
    }
    for column in table.primary_key_columns() {
        method.add_body_line(backend.call("WHERE", &key_phrase(column)));
    }
    method.add_body_line(String::new());
    method.add_body_line(backend.finish());
    method
}

fn update_by_example(
    ctx: &GenContext<'_>,
    backend: Backend,
    name: &str,
    columns: Vec<&ColumnDescriptor>,
) -> Method {
    let example = ctx.names.example.base_short_name().to_string();
    let mut method = parameter_map_method(ctx, name);
    method.add_body_line(backend.begin());
    method.add_body_line(backend.call("UPDATE", &quoted(&ctx.table.aliased_fully_qualified_name())));
    method.add_body_line(String::new());
    for column in columns {
        method.add_body_line(backend.call("SET", &set_phrase(ctx, column)));
    }
    method.add_body_line(String::new());
    method.add_body_line(format!(
        "{0} example = ({0}) parameter.get(\"example\");",
        example
    ));
    method.add_body_line(backend.apply_where(true));
    method.add_body_line(backend.finish());
    method
}
