//! Mapper interface generation
//!
//! With a provider backend, by-example and selective statements carry a
//! `@...Provider` annotation pointing at the SQL provider class, while the
//! fixed-shape insert and key statements carry their SQL inline. With the
//! XML backend the interface is plain and the XML mapper binds by
//! statement id.

use crate::codegen::java::key_sql;
use crate::codegen::java::provider::Backend;
use crate::codegen::{escape_java, statement, GenContext};
use crate::dom::{Interface, JavaType, Method, Parameter};
use crate::plugin::ArtifactKind;
use crate::schema::ColumnDescriptor;

const ARTIFACT: ArtifactKind = ArtifactKind::Mapper;
const ANNOTATIONS: &str = "org.apache.ibatis.annotations";

fn annotation_type(name: &str) -> JavaType {
    JavaType::new(&format!("{}.{}", ANNOTATIONS, name))
}

/// Where a provider-backed mapper method gets its SQL
enum Binding {
    /// `@SelectProvider` and friends
    Provider(&'static str),
    /// `@Select({...})` and friends, one string per line
    Inline(&'static str, Vec<String>),
}

struct Statement<'t> {
    method: Method,
    binding: Binding,
    results: Option<Vec<&'t ColumnDescriptor>>,
}

impl<'t> Statement<'t> {
    fn new(method: Method, binding: Binding) -> Self {
        Self {
            method,
            binding,
            results: None,
        }
    }

    fn with_results(mut self, columns: Vec<&'t ColumnDescriptor>) -> Self {
        self.results = Some(columns);
        self
    }
}

pub fn mapper_interface(ctx: &GenContext<'_>, backend: Option<Backend>) -> Option<Interface> {
    let table = ctx.table;
    let mut interface = Interface::new(ctx.names.mapper.clone());
    interface.javadoc.push(format!(
        "Mapped statements for table {}",
        table.fully_qualified_name()
    ));

    let record_list = ctx.list_of(ctx.names.record.clone());
    let int = || JavaType::new("int");
    let mut statements = Vec::new();

    if table.generates_count_by_example() {
        statements.push(Statement::new(
            by_example(ctx, statement::COUNT_BY_EXAMPLE, JavaType::new("long")),
            Binding::Provider("SelectProvider"),
        ));
    }
    if table.generates_delete_by_example() {
        statements.push(Statement::new(
            by_example(ctx, statement::DELETE_BY_EXAMPLE, int()),
            Binding::Provider("DeleteProvider"),
        ));
    }
    if table.generates_delete_by_primary_key() {
        let mut lines = vec![format!("delete from {}", table.fully_qualified_name())];
        lines.extend(key_sql::key_conditions(table, false));
        statements.push(Statement::new(
            by_key(ctx, statement::DELETE_BY_PRIMARY_KEY, int()),
            Binding::Inline("Delete", lines),
        ));
    }
    if table.generates_insert() {
        statements.push(Statement::new(
            by_record(ctx, statement::INSERT),
            Binding::Inline("Insert", key_sql::insert_lines(table)),
        ));
    }
    if table.generates_insert_selective() {
        statements.push(Statement::new(
            by_record(ctx, statement::INSERT_SELECTIVE),
            Binding::Provider("InsertProvider"),
        ));
    }
    if table.generates_select_by_example_with_blobs() {
        statements.push(
            Statement::new(
                by_example(ctx, statement::SELECT_BY_EXAMPLE_WITH_BLOBS, record_list.clone()),
                Binding::Provider("SelectProvider"),
            )
            .with_results(table.all_columns()),
        );
    }
    if table.generates_select_by_example_without_blobs() {
        statements.push(
            Statement::new(
                by_example(ctx, statement::SELECT_BY_EXAMPLE, record_list.clone()),
                Binding::Provider("SelectProvider"),
            )
            .with_results(table.non_blob_columns()),
        );
    }
    if table.generates_select_by_primary_key() {
        let select_list: Vec<String> = table
            .all_columns()
            .iter()
            .map(|c| table.select_list_phrase(c))
            .collect();
        let mut lines = vec![
            "select".to_string(),
            select_list.join(", "),
            format!("from {}", table.aliased_fully_qualified_name()),
        ];
        lines.extend(key_sql::key_conditions(table, true));
        statements.push(
            Statement::new(
                by_key(ctx, statement::SELECT_BY_PRIMARY_KEY, ctx.names.record.clone()),
                Binding::Inline("Select", lines),
            )
            .with_results(table.all_columns()),
        );
    }
    if table.generates_update_by_example_selective() {
        statements.push(Statement::new(
            update(ctx, statement::UPDATE_BY_EXAMPLE_SELECTIVE),
            Binding::Provider("UpdateProvider"),
        ));
    }
    if table.generates_update_by_example_with_blobs() {
        statements.push(Statement::new(
            update(ctx, statement::UPDATE_BY_EXAMPLE_WITH_BLOBS),
            Binding::Provider("UpdateProvider"),
        ));
    }
    if table.generates_update_by_example_without_blobs() {
        statements.push(Statement::new(
            update(ctx, statement::UPDATE_BY_EXAMPLE),
            Binding::Provider("UpdateProvider"),
        ));
    }
    if table.generates_update_by_primary_key_selective() {
        statements.push(Statement::new(
            by_record(ctx, statement::UPDATE_BY_PRIMARY_KEY_SELECTIVE),
            Binding::Provider("UpdateProvider"),
        ));
    }
    if table.generates_update_by_primary_key() {
        let mut lines = vec![format!("update {}", table.fully_qualified_name())];
        lines.extend(key_sql::set_lines(&table.non_primary_key_columns()));
        lines.extend(key_sql::key_conditions(table, false));
        statements.push(Statement::new(
            by_record(ctx, statement::UPDATE_BY_PRIMARY_KEY),
            Binding::Inline("Update", lines),
        ));
    }

    for Statement {
        mut method,
        binding,
        results,
    } in statements
    {
        if backend.is_some() {
            match binding {
                Binding::Provider(provider) => {
                    method.add_annotation(format!(
                        "@{}(type={}.class, method=\"{}\")",
                        provider,
                        ctx.names.sql_provider.base_short_name(),
                        method.name
                    ));
                    interface.add_imported_type(&annotation_type(provider));
                    interface.add_imported_type(&ctx.names.sql_provider);
                }
                Binding::Inline(annotation, lines) => {
                    for line in inline_sql(annotation, &lines) {
                        method.add_annotation(line);
                    }
                    interface.add_imported_type(&annotation_type(annotation));
                }
            }
            if let Some(columns) = results {
                add_results(ctx, &mut interface, &mut method, &columns);
            }
        }
        if method.parameters.iter().any(|p| !p.annotations.is_empty()) {
            interface.add_imported_type(&annotation_type("Param"));
        }
        ctx.add_interface_method(ARTIFACT, &mut interface, method);
    }

    ctx.accept_interface(interface)
}

/// `@Insert({` ... `})` with one quoted string per line
fn inline_sql(annotation: &str, lines: &[String]) -> Vec<String> {
    let mut out = vec![format!("@{}({{", annotation)];
    for (i, line) in lines.iter().enumerate() {
        let trail = if i + 1 < lines.len() { "," } else { "" };
        out.push(format!("    \"{}\"{}", escape_java(line), trail));
    }
    out.push("})".to_string());
    out
}

fn by_example(ctx: &GenContext<'_>, name: &str, return_type: JavaType) -> Method {
    Method::new(name)
        .returning(return_type)
        .with_parameter(ctx.names.example.clone(), "example")
}

fn by_key(ctx: &GenContext<'_>, name: &str, return_type: JavaType) -> Method {
    let mut method = Method::new(name).returning(return_type);
    for parameter in key_sql::key_parameters(ctx.table) {
        method.add_parameter(parameter);
    }
    method
}

fn by_record(ctx: &GenContext<'_>, name: &str) -> Method {
    Method::new(name)
        .returning(JavaType::new("int"))
        .with_parameter(ctx.names.record.clone(), "record")
}

fn update(ctx: &GenContext<'_>, name: &str) -> Method {
    let mut method = Method::new(name).returning(JavaType::new("int"));
    method.add_parameter(
        Parameter::new(ctx.names.record.clone(), "record").with_annotation("@Param(\"record\")"),
    );
    method.add_parameter(
        Parameter::new(ctx.names.example.clone(), "example").with_annotation("@Param(\"example\")"),
    );
    method
}

/// `@Results` mapping for provider-backed selects
fn add_results(
    ctx: &GenContext<'_>,
    interface: &mut Interface,
    method: &mut Method,
    columns: &[&ColumnDescriptor],
) {
    interface.add_imported_type(&annotation_type("Results"));
    interface.add_imported_type(&annotation_type("Result"));
    interface.add_imported_type(&JavaType::new("org.apache.ibatis.type.JdbcType"));

    method.add_annotation("@Results({");
    for (i, column) in columns.iter().enumerate() {
        let mut result = format!(
            "    @Result(column=\"{}\", property=\"{}\", jdbcType=JdbcType.{}",
            ctx.table.result_column_name(column),
            column.java_property,
            column.jdbc_type_name()
        );
        if let Some(handler) = column.type_handler() {
            let handler_type = JavaType::new(handler);
            result.push_str(&format!(", typeHandler={}.class", handler_type.short_name()));
            interface.add_imported_type(&handler_type);
        }
        if ctx.table.primary_key.contains(&column.actual_column_name) {
            result.push_str(", id=true");
        }
        result.push(')');
        if i + 1 < columns.len() {
            result.push(',');
        }
        method.add_annotation(result);
    }
    method.add_annotation("})");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::CodeGenConfig;
    use crate::plugin::PluginChain;
    use crate::schema::{IntrospectedTable, JdbcType};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn table() -> IntrospectedTable {
        let mut table = IntrospectedTable::new(
            "users",
            vec![
                ColumnDescriptor::new("id", JdbcType::Integer),
                ColumnDescriptor::new("status", JdbcType::Varchar).with_type_handler("com.acme.StatusHandler"),
            ],
        );
        table.primary_key = vec!["id".to_string()];
        table
    }

    fn config() -> CodeGenConfig {
        CodeGenConfig::new(PathBuf::from("out"))
            .with_model_package("com.acme.model")
            .with_mapper_package("com.acme.mapper")
    }

    #[test]
    fn test_provider_annotations() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let interface = mapper_interface(&ctx, Some(Backend::Builder)).unwrap();

        let count = interface.method("countByExample").unwrap();
        assert_eq!(
            count.annotations,
            vec!["@SelectProvider(type=UsersSqlProvider.class, method=\"countByExample\")"]
        );

        let select = interface.method("selectByExample").unwrap();
        assert_eq!(select.return_type.as_ref().unwrap().short_name(), "List<Users>");
        assert_eq!(
            select.annotations[1..].to_vec(),
            vec![
                "@Results({",
                "    @Result(column=\"id\", property=\"id\", jdbcType=JdbcType.INTEGER, id=true),",
                "    @Result(column=\"status\", property=\"status\", jdbcType=JdbcType.VARCHAR, typeHandler=StatusHandler.class)",
                "})",
            ]
        );
        assert!(interface.imported_types.contains("com.acme.StatusHandler"));
        assert!(interface.imported_types.contains("org.apache.ibatis.annotations.UpdateProvider"));
        assert!(!interface.imported_types.contains("com.acme.mapper.UsersSqlProvider"));
    }

    #[test]
    fn test_statement_order() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let interface = mapper_interface(&ctx, Some(Backend::Builder)).unwrap();
        let names: Vec<&str> = interface.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "countByExample",
                "deleteByExample",
                "deleteByPrimaryKey",
                "insert",
                "insertSelective",
                "selectByExample",
                "selectByPrimaryKey",
                "updateByExampleSelective",
                "updateByExample",
                "updateByPrimaryKeySelective",
                "updateByPrimaryKey",
            ]
        );
    }

    #[test]
    fn test_inline_key_statements() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let interface = mapper_interface(&ctx, Some(Backend::Builder)).unwrap();

        let delete = interface.method("deleteByPrimaryKey").unwrap();
        assert_eq!(
            delete.annotations,
            vec![
                "@Delete({",
                "    \"delete from users\",",
                "    \"where id = #{id,jdbcType=INTEGER}\"",
                "})",
            ]
        );
        assert_eq!(delete.parameters[0].java_type.short_name(), "Integer");
        assert!(delete.parameters[0].annotations.is_empty());

        let insert = interface.method("insert").unwrap();
        assert_eq!(
            insert.annotations,
            vec![
                "@Insert({",
                "    \"insert into users (id, status)\",",
                "    \"values (#{id,jdbcType=INTEGER}, #{status,jdbcType=VARCHAR,typeHandler=com.acme.StatusHandler})\"",
                "})",
            ]
        );

        let update = interface.method("updateByPrimaryKey").unwrap();
        assert_eq!(
            update.annotations,
            vec![
                "@Update({",
                "    \"update users\",",
                "    \"set status = #{status,jdbcType=VARCHAR,typeHandler=com.acme.StatusHandler}\",",
                "    \"where id = #{id,jdbcType=INTEGER}\"",
                "})",
            ]
        );

        let select = interface.method("selectByPrimaryKey").unwrap();
        assert_eq!(select.return_type.as_ref().unwrap().short_name(), "Users");
        assert_eq!(select.annotations[2], "    \"id, status\",");
        assert_eq!(select.annotations[6], "@Results({");

        let selective = interface.method("insertSelective").unwrap();
        assert_eq!(
            selective.annotations,
            vec!["@InsertProvider(type=UsersSqlProvider.class, method=\"insertSelective\")"]
        );
        for name in ["Delete", "Insert", "InsertProvider", "Select", "Update"] {
            assert!(interface
                .imported_types
                .contains(&format!("org.apache.ibatis.annotations.{}", name)));
        }
    }

    #[test]
    fn test_composite_key_binds_parameters_by_name() {
        let mut table = IntrospectedTable::new(
            "line_items",
            vec![
                ColumnDescriptor::new("order_id", JdbcType::Integer),
                ColumnDescriptor::new("line_no", JdbcType::Integer),
            ],
        );
        table.primary_key = vec!["order_id".to_string(), "line_no".to_string()];
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let interface = mapper_interface(&ctx, None).unwrap();

        let delete = interface.method("deleteByPrimaryKey").unwrap();
        assert!(delete.annotations.is_empty());
        assert_eq!(delete.parameters[0].annotations, vec!["@Param(\"orderId\")"]);
        // Every column is part of the key
        assert!(interface.method("updateByPrimaryKey").is_none());
        assert!(interface.imported_types.contains("org.apache.ibatis.annotations.Param"));
    }

    #[test]
    fn test_update_parameters() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let interface = mapper_interface(&ctx, None).unwrap();

        let update = interface.method("updateByExampleSelective").unwrap();
        assert_eq!(update.parameters[0].annotations, vec!["@Param(\"record\")"]);
        assert_eq!(update.parameters[1].java_type.full_name(), "com.acme.model.UsersExample");
        assert!(update.annotations.is_empty());
        assert!(interface.imported_types.contains("org.apache.ibatis.annotations.Param"));
        assert!(!interface.imported_types.contains("org.apache.ibatis.annotations.SelectProvider"));
    }
}
