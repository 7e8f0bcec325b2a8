//! XML mapper generation
//!
//! The XML backend renders WHERE clauses with dynamic SQL tags instead of a
//! provider class. Type handlers are static attributes of each placeholder,
//! so every per-column criterion list gets its own loop.

use crate::codegen::java::key_sql;
use crate::codegen::{parameter_clause, statement, GenContext};
use crate::dom::{XmlDocument, XmlElement};
use crate::schema::ColumnDescriptor;

pub const MAPPER_PUBLIC_ID: &str = "-//mybatis.org//DTD Mapper 3.0//EN";
pub const MAPPER_SYSTEM_ID: &str = "http://mybatis.org/dtd/mybatis-3-mapper.dtd";

pub fn xml_mapper(ctx: &GenContext<'_>) -> Option<XmlDocument> {
    let table = ctx.table;
    let mut root = XmlElement::new("mapper").with_attribute("namespace", ctx.names.mapper.full_name());

    if table.generates_base_result_map() {
        ctx.add_xml_element(&mut root, base_result_map(ctx));
    }
    if table.generates_result_map_with_blobs() {
        ctx.add_xml_element(&mut root, blob_result_map(ctx));
    }
    if table.generates_count_by_example()
        || table.generates_delete_by_example()
        || table.generates_select_by_example_without_blobs()
    {
        ctx.add_xml_element(&mut root, example_where_clause(ctx, false));
    }
    if table.generates_any_update_by_example() {
        ctx.add_xml_element(&mut root, example_where_clause(ctx, true));
    }

    let mut base_list = XmlElement::new("sql").with_attribute("id", statement::BASE_COLUMN_LIST);
    base_list.add_text(select_list(ctx, &table.non_blob_columns()));
    ctx.add_xml_element(&mut root, base_list);
    if table.has_blob_columns() {
        let mut blob_list = XmlElement::new("sql").with_attribute("id", statement::BLOB_COLUMN_LIST);
        blob_list.add_text(select_list(ctx, &table.blob_columns()));
        ctx.add_xml_element(&mut root, blob_list);
    }

    if table.generates_select_by_example_with_blobs() {
        ctx.add_xml_element(&mut root, select_by_example(ctx, true));
    }
    if table.generates_select_by_example_without_blobs() {
        ctx.add_xml_element(&mut root, select_by_example(ctx, false));
    }
    if table.generates_select_by_primary_key() {
        ctx.add_xml_element(&mut root, select_by_primary_key(ctx));
    }
    if table.generates_delete_by_primary_key() {
        let mut delete = XmlElement::new("delete")
            .with_attribute("id", statement::DELETE_BY_PRIMARY_KEY)
            .with_attribute("parameterType", key_sql::key_parameter_type(table));
        delete.add_text(format!("delete from {}", table.fully_qualified_name()));
        for line in key_sql::key_conditions(table, false) {
            delete.add_text(line);
        }
        ctx.add_xml_element(&mut root, delete);
    }
    if table.generates_delete_by_example() {
        let mut delete = XmlElement::new("delete")
            .with_attribute("id", statement::DELETE_BY_EXAMPLE)
            .with_attribute("parameterType", ctx.names.example.full_name());
        delete.add_text(format!("delete from {}", table.aliased_fully_qualified_name()));
        delete.add_element(where_include(statement::EXAMPLE_WHERE_CLAUSE));
        ctx.add_xml_element(&mut root, delete);
    }
    if table.generates_insert() {
        let mut insert = XmlElement::new("insert")
            .with_attribute("id", statement::INSERT)
            .with_attribute("parameterType", ctx.names.record.full_name());
        for line in key_sql::insert_lines(table) {
            insert.add_text(line);
        }
        ctx.add_xml_element(&mut root, insert);
    }
    if table.generates_insert_selective() {
        ctx.add_xml_element(&mut root, insert_selective(ctx));
    }
    if table.generates_count_by_example() {
        let mut count = XmlElement::new("select")
            .with_attribute("id", statement::COUNT_BY_EXAMPLE)
            .with_attribute("parameterType", ctx.names.example.full_name())
            .with_attribute("resultType", "java.lang.Long");
        count.add_text(format!("select count(*) from {}", table.aliased_fully_qualified_name()));
        count.add_element(where_include(statement::EXAMPLE_WHERE_CLAUSE));
        ctx.add_xml_element(&mut root, count);
    }
    if table.generates_update_by_example_selective() {
        ctx.add_xml_element(&mut root, update_by_example_selective(ctx));
    }
    if table.generates_update_by_example_with_blobs() {
        let element = update_by_example(ctx, statement::UPDATE_BY_EXAMPLE_WITH_BLOBS, &table.all_columns());
        ctx.add_xml_element(&mut root, element);
    }
    if table.generates_update_by_example_without_blobs() {
        let element = update_by_example(ctx, statement::UPDATE_BY_EXAMPLE, &table.non_blob_columns());
        ctx.add_xml_element(&mut root, element);
    }
    if table.generates_update_by_primary_key_selective() {
        ctx.add_xml_element(&mut root, update_by_primary_key_selective(ctx));
    }
    if table.generates_update_by_primary_key() {
        let mut update = XmlElement::new("update")
            .with_attribute("id", statement::UPDATE_BY_PRIMARY_KEY)
            .with_attribute("parameterType", ctx.names.record.full_name());
        update.add_text(format!("update {}", table.fully_qualified_name()));
        for line in key_sql::set_lines(&table.non_primary_key_columns()) {
            update.add_text(line);
        }
        for line in key_sql::key_conditions(table, false) {
            update.add_text(line);
        }
        ctx.add_xml_element(&mut root, update);
    }

    ctx.accept_xml_document(XmlDocument::new(MAPPER_PUBLIC_ID, MAPPER_SYSTEM_ID, root))
}

fn result_element(ctx: &GenContext<'_>, name: &str, column: &ColumnDescriptor) -> XmlElement {
    let mut element = XmlElement::new(name)
        .with_attribute("column", ctx.table.result_column_name(column))
        .with_attribute("jdbcType", column.jdbc_type_name())
        .with_attribute("property", column.java_property.clone());
    if let Some(handler) = column.type_handler() {
        element.add_attribute("typeHandler", handler);
    }
    element
}

fn base_result_map(ctx: &GenContext<'_>) -> XmlElement {
    let table = ctx.table;
    let mut map = XmlElement::new("resultMap")
        .with_attribute("id", statement::BASE_RESULT_MAP)
        .with_attribute("type", ctx.names.record.full_name());
    for column in table.primary_key_columns() {
        map.add_element(result_element(ctx, "id", column));
    }
    for column in table.base_columns() {
        map.add_element(result_element(ctx, "result", column));
    }
    map
}

fn blob_result_map(ctx: &GenContext<'_>) -> XmlElement {
    let mut map = XmlElement::new("resultMap")
        .with_attribute("id", statement::RESULT_MAP_WITH_BLOBS)
        .with_attribute("type", ctx.names.record.full_name())
        .with_attribute("extends", statement::BASE_RESULT_MAP);
    for column in ctx.table.blob_columns() {
        map.add_element(result_element(ctx, "result", column));
    }
    map
}

fn select_list(ctx: &GenContext<'_>, columns: &[&ColumnDescriptor]) -> String {
    columns
        .iter()
        .map(|c| ctx.table.select_list_phrase(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn include(refid: &str) -> XmlElement {
    XmlElement::new("include").with_attribute("refid", refid)
}

/// `<if test="_parameter != null"><include refid=.../></if>`
fn where_include(refid: &str) -> XmlElement {
    let mut guard = XmlElement::new("if").with_attribute("test", "_parameter != null");
    guard.add_element(include(refid));
    guard
}

fn placeholder(expression: &str, type_handler: Option<&str>) -> String {
    match type_handler {
        Some(handler) => format!("#{{{},typeHandler={}}}", expression, handler),
        None => format!("#{{{}}}", expression),
    }
}

/// One `<foreach>` over a criterion list
fn criterion_loop(collection: &str, type_handler: Option<&str>) -> XmlElement {
    let mut choose = XmlElement::new("choose");

    let mut no_value = XmlElement::new("when").with_attribute("test", "criterion.noValue");
    no_value.add_text("and ${criterion.condition}");
    choose.add_element(no_value);

    let mut single = XmlElement::new("when").with_attribute("test", "criterion.singleValue");
    single.add_text(format!(
        "and ${{criterion.condition}} {}",
        placeholder("criterion.value", type_handler)
    ));
    choose.add_element(single);

    let mut between = XmlElement::new("when").with_attribute("test", "criterion.betweenValue");
    between.add_text(format!(
        "and ${{criterion.condition}} {} and {}",
        placeholder("criterion.value", type_handler),
        placeholder("criterion.secondValue", type_handler)
    ));
    choose.add_element(between);

    let mut list = XmlElement::new("when").with_attribute("test", "criterion.listValue");
    list.add_text("and ${criterion.condition}");
    let mut items = XmlElement::new("foreach")
        .with_attribute("close", ")")
        .with_attribute("collection", "criterion.value")
        .with_attribute("item", "listItem")
        .with_attribute("open", "(")
        .with_attribute("separator", ",");
    items.add_text(placeholder("listItem", type_handler));
    list.add_element(items);
    choose.add_element(list);

    let mut foreach = XmlElement::new("foreach")
        .with_attribute("collection", collection)
        .with_attribute("item", "criterion");
    foreach.add_element(choose);
    foreach
}

pub fn example_where_clause(ctx: &GenContext<'_>, for_update: bool) -> XmlElement {
    let (id, prefix) = if for_update {
        (statement::UPDATE_BY_EXAMPLE_WHERE_CLAUSE, "example.")
    } else {
        (statement::EXAMPLE_WHERE_CLAUSE, "")
    };

    let mut trim = XmlElement::new("trim")
        .with_attribute("prefix", "(")
        .with_attribute("prefixOverrides", "and")
        .with_attribute("suffix", ")");
    trim.add_element(criterion_loop("criteria.criteria", None));
    for column in ctx.table.non_blob_columns() {
        if let Some(handler) = column.type_handler() {
            trim.add_element(criterion_loop(
                &format!("criteria.{}Criteria", column.java_property),
                Some(handler),
            ));
        }
    }

    let mut valid = XmlElement::new("if").with_attribute("test", "criteria.valid");
    valid.add_element(trim);

    let mut groups = XmlElement::new("foreach")
        .with_attribute("collection", format!("{}oredCriteria", prefix))
        .with_attribute("item", "criteria")
        .with_attribute("separator", "or");
    groups.add_element(valid);

    let mut where_element = XmlElement::new("where");
    where_element.add_element(groups);

    let mut sql = XmlElement::new("sql").with_attribute("id", id);
    sql.add_element(where_element);
    sql
}

fn select_by_example(ctx: &GenContext<'_>, with_blobs: bool) -> XmlElement {
    let (id, result_map) = if with_blobs {
        (statement::SELECT_BY_EXAMPLE_WITH_BLOBS, statement::RESULT_MAP_WITH_BLOBS)
    } else {
        (statement::SELECT_BY_EXAMPLE, statement::BASE_RESULT_MAP)
    };
    let mut select = XmlElement::new("select")
        .with_attribute("id", id)
        .with_attribute("parameterType", ctx.names.example.full_name())
        .with_attribute("resultMap", result_map);
    select.add_text("select");
    let mut distinct = XmlElement::new("if").with_attribute("test", "distinct");
    distinct.add_text("distinct");
    select.add_element(distinct);
    select.add_element(include(statement::BASE_COLUMN_LIST));
    if with_blobs {
        select.add_text(",");
        select.add_element(include(statement::BLOB_COLUMN_LIST));
    }
    select.add_text(format!("from {}", ctx.table.aliased_fully_qualified_name()));
    select.add_element(where_include(statement::EXAMPLE_WHERE_CLAUSE));
    let mut order = XmlElement::new("if").with_attribute("test", "orderByClause != null");
    order.add_text("order by ${orderByClause}");
    select.add_element(order);
    select
}

fn select_by_primary_key(ctx: &GenContext<'_>) -> XmlElement {
    let table = ctx.table;
    let result_map = if table.has_blob_columns() {
        statement::RESULT_MAP_WITH_BLOBS
    } else {
        statement::BASE_RESULT_MAP
    };
    let mut select = XmlElement::new("select")
        .with_attribute("id", statement::SELECT_BY_PRIMARY_KEY)
        .with_attribute("parameterType", key_sql::key_parameter_type(table))
        .with_attribute("resultMap", result_map);
    select.add_text("select");
    select.add_element(include(statement::BASE_COLUMN_LIST));
    if table.has_blob_columns() {
        select.add_text(",");
        select.add_element(include(statement::BLOB_COLUMN_LIST));
    }
    select.add_text(format!("from {}", table.aliased_fully_qualified_name()));
    for line in key_sql::key_conditions(table, true) {
        select.add_text(line);
    }
    select
}

/// `<if test="prop != null">text</if>`
fn unless_null(column: &ColumnDescriptor, text: String) -> XmlElement {
    let mut guard = XmlElement::new("if")
        .with_attribute("test", format!("{} != null", column.java_property));
    guard.add_text(text);
    guard
}

fn insert_selective(ctx: &GenContext<'_>) -> XmlElement {
    let table = ctx.table;
    let mut insert = XmlElement::new("insert")
        .with_attribute("id", statement::INSERT_SELECTIVE)
        .with_attribute("parameterType", ctx.names.record.full_name());
    insert.add_text(format!("insert into {}", table.fully_qualified_name()));

    let trim = |prefix: &str| {
        XmlElement::new("trim")
            .with_attribute("prefix", prefix)
            .with_attribute("suffix", ")")
            .with_attribute("suffixOverrides", ",")
    };
    let mut names = trim("(");
    let mut values = trim("values (");
    for column in table.all_columns() {
        let name = format!("{},", column.actual_column_name);
        let value = format!("{},", parameter_clause(column, None));
        if column.java_type.is_primitive() {
            names.add_text(name);
            values.add_text(value);
        } else {
            names.add_element(unless_null(column, name));
            values.add_element(unless_null(column, value));
        }
    }
    insert.add_element(names);
    insert.add_element(values);
    insert
}

fn update_by_primary_key_selective(ctx: &GenContext<'_>) -> XmlElement {
    let table = ctx.table;
    let mut update = XmlElement::new("update")
        .with_attribute("id", statement::UPDATE_BY_PRIMARY_KEY_SELECTIVE)
        .with_attribute("parameterType", ctx.names.record.full_name());
    update.add_text(format!("update {}", table.fully_qualified_name()));

    let mut set = XmlElement::new("set");
    for column in table.non_primary_key_columns() {
        let assignment = format!(
            "{} = {},",
            column.actual_column_name,
            parameter_clause(column, None)
        );
        if column.java_type.is_primitive() {
            set.add_text(assignment);
        } else {
            set.add_element(unless_null(column, assignment));
        }
    }
    update.add_element(set);
    for line in key_sql::key_conditions(table, false) {
        update.add_text(line);
    }
    update
}

fn update_by_example_selective(ctx: &GenContext<'_>) -> XmlElement {
    let table = ctx.table;
    let mut update = XmlElement::new("update")
        .with_attribute("id", statement::UPDATE_BY_EXAMPLE_SELECTIVE)
        .with_attribute("parameterType", "map");
    update.add_text(format!("update {}", table.aliased_fully_qualified_name()));

    let mut set = XmlElement::new("set");
    for column in table.all_columns() {
        let assignment = format!(
            "{} = {},",
            table.aliased_column_name(column),
            parameter_clause(column, Some("record."))
        );
        if column.java_type.is_primitive() {
            set.add_text(assignment);
        } else {
            let mut guard = XmlElement::new("if")
                .with_attribute("test", format!("record.{} != null", column.java_property));
            guard.add_text(assignment);
            set.add_element(guard);
        }
    }
    update.add_element(set);
    update.add_element(where_include(statement::UPDATE_BY_EXAMPLE_WHERE_CLAUSE));
    update
}

fn update_by_example(ctx: &GenContext<'_>, id: &str, columns: &[&ColumnDescriptor]) -> XmlElement {
    let table = ctx.table;
    let mut update = XmlElement::new("update")
        .with_attribute("id", id)
        .with_attribute("parameterType", "map");
    update.add_text(format!("update {}", table.aliased_fully_qualified_name()));
    for (i, column) in columns.iter().enumerate() {
        let lead = if i == 0 { "set " } else { "  " };
        let trail = if i + 1 < columns.len() { "," } else { "" };
        update.add_text(format!(
            "{}{} = {}{}",
            lead,
            table.aliased_column_name(column),
            parameter_clause(column, Some("record.")),
            trail
        ));
    }
    update.add_element(where_include(statement::UPDATE_BY_EXAMPLE_WHERE_CLAUSE));
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::CodeGenConfig;
    use crate::dom::XmlNode;
    use crate::plugin::{PluginChain, SuppressPlugin};
    use crate::schema::{IntrospectedTable, JdbcType};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn table() -> IntrospectedTable {
        let mut table = IntrospectedTable::new(
            "users",
            vec![
                ColumnDescriptor::new("id", JdbcType::Integer),
                ColumnDescriptor::new("status", JdbcType::Varchar).with_type_handler("x.StatusHandler"),
                ColumnDescriptor::new("bio", JdbcType::Clob),
            ],
        );
        table.primary_key = vec!["id".to_string()];
        table
    }

    fn config() -> CodeGenConfig {
        CodeGenConfig::new(PathBuf::from("out"))
            .with_model_package("com.acme.model")
            .with_mapper_package("com.acme.mapper")
            .with_sql_builder(crate::codegen::SqlBuilderStyle::Xml)
    }

    fn texts(element: &XmlElement) -> Vec<&str> {
        element
            .children
            .iter()
            .filter_map(|c| match c {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_statement_order() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let doc = xml_mapper(&ctx).unwrap();

        assert_eq!(doc.root.attribute("namespace"), Some("com.acme.mapper.UsersMapper"));
        let ids: Vec<&str> = doc.root.elements().filter_map(|e| e.attribute("id")).collect();
        assert_eq!(
            ids,
            vec![
                "BaseResultMap",
                "ResultMapWithBLOBs",
                "Example_Where_Clause",
                "Update_By_Example_Where_Clause",
                "Base_Column_List",
                "Blob_Column_List",
                "selectByExampleWithBLOBs",
                "selectByExample",
                "selectByPrimaryKey",
                "deleteByPrimaryKey",
                "deleteByExample",
                "insert",
                "insertSelective",
                "countByExample",
                "updateByExampleSelective",
                "updateByExampleWithBLOBs",
                "updateByExample",
                "updateByPrimaryKeySelective",
                "updateByPrimaryKey",
            ]
        );
    }

    #[test]
    fn test_primary_key_statements() {
        let mut table = table();
        table.alias = Some("u".to_string());
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let doc = xml_mapper(&ctx).unwrap();

        let select = doc.root.element_with_id("selectByPrimaryKey").unwrap();
        assert_eq!(select.attribute("parameterType"), Some("java.lang.Integer"));
        assert_eq!(select.attribute("resultMap"), Some("ResultMapWithBLOBs"));
        assert_eq!(
            texts(select),
            vec!["select", ",", "from users u", "where u.id = #{id,jdbcType=INTEGER}"]
        );

        let delete = doc.root.element_with_id("deleteByPrimaryKey").unwrap();
        assert_eq!(
            texts(delete),
            vec!["delete from users", "where id = #{id,jdbcType=INTEGER}"]
        );

        let update = doc.root.element_with_id("updateByPrimaryKey").unwrap();
        assert_eq!(update.attribute("parameterType"), Some("com.acme.model.Users"));
        assert_eq!(
            texts(update),
            vec![
                "update users",
                "set status = #{status,jdbcType=VARCHAR,typeHandler=x.StatusHandler},",
                "  bio = #{bio,jdbcType=CLOB}",
                "where id = #{id,jdbcType=INTEGER}",
            ]
        );
    }

    #[test]
    fn test_selective_record_statements() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let doc = xml_mapper(&ctx).unwrap();

        let insert = doc.root.element_with_id("insertSelective").unwrap();
        assert_eq!(texts(insert), vec!["insert into users"]);
        let trims: Vec<&XmlElement> = insert.elements().collect();
        assert_eq!(trims[1].attribute("prefix"), Some("values ("));
        assert_eq!(trims[1].attribute("suffixOverrides"), Some(","));
        let first = trims[1].elements().next().unwrap();
        assert_eq!(first.attribute("test"), Some("id != null"));
        assert_eq!(texts(first), vec!["#{id,jdbcType=INTEGER},"]);

        let update = doc.root.element_with_id("updateByPrimaryKeySelective").unwrap();
        let set = update.elements().next().unwrap();
        let guards: Vec<&str> = set.elements().filter_map(|e| e.attribute("test")).collect();
        assert_eq!(guards, vec!["status != null", "bio != null"]);
        assert_eq!(
            texts(update),
            vec!["update users", "where id = #{id,jdbcType=INTEGER}"]
        );
    }

    #[test]
    fn test_keyless_table_skips_key_statements() {
        let mut table = table();
        table.primary_key.clear();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let doc = xml_mapper(&ctx).unwrap();
        assert!(doc.root.element_with_id("selectByPrimaryKey").is_none());
        assert!(doc.root.element_with_id("updateByPrimaryKey").is_none());
        assert!(doc.root.element_with_id("insert").is_some());
    }

    #[test]
    fn test_where_clause_loops_per_list() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let sql = example_where_clause(&ctx, true);

        let groups = sql.elements().next().unwrap().elements().next().unwrap();
        assert_eq!(groups.attribute("collection"), Some("example.oredCriteria"));
        let trim = groups.elements().next().unwrap().elements().next().unwrap();
        assert_eq!(trim.attribute("prefixOverrides"), Some("and"));

        let loops: Vec<&XmlElement> = trim.elements().collect();
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[0].attribute("collection"), Some("criteria.criteria"));
        assert_eq!(loops[1].attribute("collection"), Some("criteria.statusCriteria"));

        let whens: Vec<&XmlElement> = loops[1].elements().next().unwrap().elements().collect();
        assert_eq!(
            texts(whens[2]),
            vec!["and ${criterion.condition} #{criterion.value,typeHandler=x.StatusHandler} and #{criterion.secondValue,typeHandler=x.StatusHandler}"]
        );
        let items = whens[3].elements().next().unwrap();
        assert_eq!(texts(items), vec!["#{listItem,typeHandler=x.StatusHandler}"]);

        let plain: Vec<&XmlElement> = loops[0].elements().next().unwrap().elements().collect();
        assert_eq!(texts(plain[1]), vec!["and ${criterion.condition} #{criterion.value}"]);
    }

    #[test]
    fn test_result_maps() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let doc = xml_mapper(&ctx).unwrap();

        let base = doc.root.element_with_id("BaseResultMap").unwrap();
        let children: Vec<&str> = base.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(children, vec!["id", "result"]);
        let status = base.elements().nth(1).unwrap();
        assert_eq!(status.attribute("typeHandler"), Some("x.StatusHandler"));

        let blobs = doc.root.element_with_id("ResultMapWithBLOBs").unwrap();
        assert_eq!(blobs.attribute("extends"), Some("BaseResultMap"));
    }

    #[test]
    fn test_update_statements() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new();
        let ctx = GenContext::new(&table, &config, &plugins);
        let doc = xml_mapper(&ctx).unwrap();

        let update = doc.root.element_with_id("updateByExample").unwrap();
        assert_eq!(
            texts(update),
            vec![
                "update users",
                "set id = #{record.id,jdbcType=INTEGER},",
                "  status = #{record.status,jdbcType=VARCHAR,typeHandler=x.StatusHandler}",
            ]
        );

        let selective = doc.root.element_with_id("updateByExampleSelective").unwrap();
        let set = selective.elements().next().unwrap();
        let guards: Vec<&str> = set.elements().filter_map(|e| e.attribute("test")).collect();
        assert_eq!(guards, vec!["record.id != null", "record.status != null", "record.bio != null"]);
    }

    #[test]
    fn test_suppressed_statement() {
        let table = table();
        let config = config();
        let plugins = PluginChain::new().with(SuppressPlugin::new(["countByExample"]));
        let ctx = GenContext::new(&table, &config, &plugins);
        let doc = xml_mapper(&ctx).unwrap();
        assert!(doc.root.element_with_id("countByExample").is_none());
        assert!(doc.root.element_with_id("deleteByExample").is_some());
    }
}
