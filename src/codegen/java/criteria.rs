//! `GeneratedCriteria`, `Criteria` and `Criterion` inner classes
//!
//! Conditions land in one of several lists: the shared `criteria` list, or a
//! per-column list for columns with a custom type handler. When more than
//! one list exists, every helper also appends to `allCriteria` so the
//! provider backends see conditions in call order.

use crate::codegen::operator::{operators_for, Arity};
use crate::codegen::{escape_java, GenContext};
use crate::dom::{Field, InnerClass, JavaType, Method, Parameter, Visibility};
use crate::plugin::ArtifactKind;
use crate::schema::ColumnDescriptor;

const ARTIFACT: ArtifactKind = ArtifactKind::Example;

/// Which helper a column's value-taking methods delegate to
#[derive(Debug, Clone, PartialEq, Eq)]
enum AddHelper {
    Shared,
    JdbcDate,
    JdbcTime,
    TypeHandled(String),
}

impl AddHelper {
    fn for_column(column: &ColumnDescriptor) -> Self {
        if column.is_jdbc_date() {
            AddHelper::JdbcDate
        } else if column.is_jdbc_time() {
            AddHelper::JdbcTime
        } else if column.has_type_handler() {
            AddHelper::TypeHandled(format!("add{}Criterion", column.capitalized_property()))
        } else {
            AddHelper::Shared
        }
    }

    fn method_name(&self) -> &str {
        match self {
            AddHelper::Shared => "addCriterion",
            AddHelper::JdbcDate => "addCriterionForJDBCDate",
            AddHelper::JdbcTime => "addCriterionForJDBCTime",
            AddHelper::TypeHandled(name) => name,
        }
    }
}

/// Columns that get their own criterion list
fn type_handled_columns<'t>(ctx: &GenContext<'t>) -> Vec<&'t ColumnDescriptor> {
    ctx.table
        .non_blob_columns()
        .into_iter()
        .filter(|c| c.has_type_handler())
        .collect()
}

fn list_field_name(column: &ColumnDescriptor) -> String {
    format!("{}Criteria", column.java_property)
}

fn criterion_list(ctx: &GenContext<'_>) -> JavaType {
    ctx.list_of(JavaType::criterion())
}

/// `List<?>` with generics, raw `List` without
fn any_list(ctx: &GenContext<'_>) -> JavaType {
    if ctx.config.use_generics {
        JavaType::new("java.util.List<?>")
    } else {
        JavaType::list()
    }
}

/// Return type and final statement of the fluent methods
fn self_return(ctx: &GenContext<'_>) -> (JavaType, &'static str) {
    if ctx.config.use_generics {
        (JavaType::new("T"), "return self();")
    } else {
        (JavaType::criteria(), "return (Criteria) this;")
    }
}

fn throw_if(lines: &mut Vec<String>, test: &str, message: &str) {
    lines.push(format!("if ({}) {{", test));
    lines.push(format!("throw new RuntimeException({});", message));
    lines.push("}".to_string());
}

fn null_value_guard(lines: &mut Vec<String>) {
    throw_if(
        lines,
        "value == null",
        "\"Value for \" + property + \" cannot be null\"",
    );
}

fn empty_list_guard(lines: &mut Vec<String>) {
    throw_if(
        lines,
        "values == null || values.isEmpty()",
        "\"Value list for \" + property + \" cannot be null or empty\"",
    );
}

fn between_guard(lines: &mut Vec<String>) {
    throw_if(
        lines,
        "value1 == null || value2 == null",
        "\"Between values for \" + property + \" cannot be null\"",
    );
}

/// Store a new criterion, mirroring it into `allCriteria` when that exists
fn store(lines: &mut Vec<String>, list: &str, construct: String, tracks_all: bool) {
    if tracks_all {
        lines.push(format!("Criterion criterion = {};", construct));
        lines.push(format!("{}.add(criterion);", list));
        lines.push("allCriteria.add(criterion);".to_string());
    } else {
        lines.push(format!("{}.add({});", list, construct));
    }
}

fn helper(name: &str) -> Method {
    Method::new(name)
        .with_visibility(Visibility::Protected)
        .with_parameter(JavaType::string(), "condition")
}

pub fn generated_criteria_class(ctx: &GenContext<'_>) -> InnerClass {
    let handled = type_handled_columns(ctx);
    let tracks_all = !handled.is_empty();
    let list_type = criterion_list(ctx);

    let mut class = InnerClass::new(JavaType::generated_criteria());
    class.visibility = Visibility::Protected;
    class.is_abstract = true;
    class.is_static = true;
    if ctx.config.use_generics {
        class.type_parameters.push("T extends GeneratedCriteria<T>".to_string());
    }

    ctx.add_inner_field(
        ARTIFACT,
        &mut class,
        Field::new("criteria", list_type.clone()).with_visibility(Visibility::Protected),
    );
    for column in &handled {
        ctx.add_inner_field(
            ARTIFACT,
            &mut class,
            Field::new(&list_field_name(column), list_type.clone())
                .with_visibility(Visibility::Protected),
        );
    }
    if tracks_all {
        ctx.add_inner_field(
            ARTIFACT,
            &mut class,
            Field::new("allCriteria", list_type.clone()).with_visibility(Visibility::Protected),
        );
    }

    let mut constructor =
        Method::constructor("GeneratedCriteria").with_visibility(Visibility::Protected);
    constructor.add_body_line("super();");
    constructor.add_body_line(format!("criteria = {};", ctx.new_array_list("Criterion")));
    for column in &handled {
        constructor.add_body_line(format!(
            "{} = {};",
            list_field_name(column),
            ctx.new_array_list("Criterion")
        ));
    }
    if tracks_all {
        constructor.add_body_line(format!("allCriteria = {};", ctx.new_array_list("Criterion")));
    }
    ctx.add_inner_method(ARTIFACT, &mut class, constructor);

    if ctx.config.use_generics {
        let mut method = Method::new("self")
            .with_visibility(Visibility::Protected)
            .returning(JavaType::new("T"));
        method.is_abstract = true;
        ctx.add_inner_method(ARTIFACT, &mut class, method);
    }

    let mut is_valid = Method::new("isValid").returning(JavaType::boolean_primitive());
    if handled.is_empty() {
        is_valid.add_body_line("return criteria.size() > 0;");
    } else {
        is_valid.add_body_line("return criteria.size() > 0");
        for (i, column) in handled.iter().enumerate() {
            let end = if i + 1 == handled.len() { ";" } else { "" };
            is_valid.add_body_line(format!(
                "    || {}.size() > 0{}",
                list_field_name(column),
                end
            ));
        }
    }
    ctx.add_inner_method(ARTIFACT, &mut class, is_valid);

    let mut all = Method::new("getAllCriteria").returning(list_type.clone());
    all.add_body_line(if tracks_all {
        "return allCriteria;"
    } else {
        "return criteria;"
    });
    ctx.add_inner_method(ARTIFACT, &mut class, all);

    let mut getter = Method::new("getCriteria").returning(list_type.clone());
    getter.add_body_line("return criteria;");
    ctx.add_inner_method(ARTIFACT, &mut class, getter);

    for column in &handled {
        let field = list_field_name(column);
        let mut getter = Method::new(&format!("get{}Criteria", column.capitalized_property()))
            .returning(list_type.clone());
        getter.add_body_line(format!("return {};", field));
        ctx.add_inner_method(ARTIFACT, &mut class, getter);
    }

    for method in shared_helpers(ctx, tracks_all) {
        ctx.add_inner_method(ARTIFACT, &mut class, method);
    }
    if ctx.table.has_jdbc_date_columns() {
        for method in jdbc_helpers(ctx, "addCriterionForJDBCDate", "java.sql.Date", "dateList") {
            ctx.add_inner_method(ARTIFACT, &mut class, method);
        }
    }
    if ctx.table.has_jdbc_time_columns() {
        for method in jdbc_helpers(ctx, "addCriterionForJDBCTime", "java.sql.Time", "timeList") {
            ctx.add_inner_method(ARTIFACT, &mut class, method);
        }
    }
    for column in &handled {
        for method in type_handled_helpers(ctx, column) {
            ctx.add_inner_method(ARTIFACT, &mut class, method);
        }
    }

    let columns = ctx.table.non_blob_columns();
    if columns.is_empty() {
        ctx.warn("Table has no non-BLOB columns, criteria methods will not be generated");
    }
    for column in columns {
        for method in column_methods(ctx, column) {
            ctx.add_inner_method(ARTIFACT, &mut class, method);
        }
    }

    class
}

/// `addCriterion` overloads storing into the shared list
fn shared_helpers(ctx: &GenContext<'_>, tracks_all: bool) -> Vec<Method> {
    let mut no_value = helper("addCriterion");
    let mut lines = Vec::new();
    throw_if(
        &mut lines,
        "condition == null",
        "\"Value for condition cannot be null\"",
    );
    store(&mut lines, "criteria", "new Criterion(condition)".to_string(), tracks_all);
    no_value.add_body_lines(lines);

    let mut single = helper("addCriterion")
        .with_parameter(JavaType::object(), "value")
        .with_parameter(JavaType::string(), "property");
    let mut lines = Vec::new();
    null_value_guard(&mut lines);
    store(&mut lines, "criteria", "new Criterion(condition, value)".to_string(), tracks_all);
    single.add_body_lines(lines);

    let mut list = helper("addCriterion")
        .with_parameter(any_list(ctx), "values")
        .with_parameter(JavaType::string(), "property");
    let mut lines = Vec::new();
    empty_list_guard(&mut lines);
    store(&mut lines, "criteria", "new Criterion(condition, values)".to_string(), tracks_all);
    list.add_body_lines(lines);

    let mut between = helper("addCriterion")
        .with_parameter(JavaType::object(), "value1")
        .with_parameter(JavaType::object(), "value2")
        .with_parameter(JavaType::string(), "property");
    let mut lines = Vec::new();
    between_guard(&mut lines);
    store(
        &mut lines,
        "criteria",
        "new Criterion(condition, value1, value2)".to_string(),
        tracks_all,
    );
    between.add_body_lines(lines);

    vec![no_value, single, list, between]
}

/// Helpers narrowing `java.util.Date` to `java.sql.Date` or `java.sql.Time`
fn jdbc_helpers(ctx: &GenContext<'_>, name: &str, sql_type: &str, list_var: &str) -> Vec<Method> {
    let generics = ctx.config.use_generics;

    let mut single = helper(name)
        .with_parameter(JavaType::date(), "value")
        .with_parameter(JavaType::string(), "property");
    let mut lines = Vec::new();
    null_value_guard(&mut lines);
    lines.push(format!(
        "addCriterion(condition, new {}(value.getTime()), property);",
        sql_type
    ));
    single.add_body_lines(lines);

    let mut list = helper(name)
        .with_parameter(ctx.list_of(JavaType::date()), "values")
        .with_parameter(JavaType::string(), "property");
    let mut lines = Vec::new();
    empty_list_guard(&mut lines);
    if generics {
        lines.push(format!(
            "List<{0}> {1} = {2};",
            sql_type,
            list_var,
            ctx.new_array_list(sql_type)
        ));
        lines.push("Iterator<Date> iter = values.iterator();".to_string());
        lines.push("while (iter.hasNext()) {".to_string());
        lines.push(format!("{}.add(new {}(iter.next().getTime()));", list_var, sql_type));
    } else {
        lines.push(format!("List {} = {};", list_var, ctx.new_array_list(sql_type)));
        lines.push("Iterator iter = values.iterator();".to_string());
        lines.push("while (iter.hasNext()) {".to_string());
        lines.push(format!(
            "{}.add(new {}(((Date) iter.next()).getTime()));",
            list_var, sql_type
        ));
    }
    lines.push("}".to_string());
    lines.push(format!("addCriterion(condition, {}, property);", list_var));
    list.add_body_lines(lines);

    let mut between = helper(name)
        .with_parameter(JavaType::date(), "value1")
        .with_parameter(JavaType::date(), "value2")
        .with_parameter(JavaType::string(), "property");
    let mut lines = Vec::new();
    between_guard(&mut lines);
    lines.push(format!(
        "addCriterion(condition, new {0}(value1.getTime()), new {0}(value2.getTime()), property);",
        sql_type
    ));
    between.add_body_lines(lines);

    vec![single, list, between]
}

/// Helpers storing into a column's own list with its type handler attached
fn type_handled_helpers(ctx: &GenContext<'_>, column: &ColumnDescriptor) -> Vec<Method> {
    let name = format!("add{}Criterion", column.capitalized_property());
    let list_field = list_field_name(column);
    let handler = escape_java(column.type_handler().unwrap_or_default());

    let mut single = helper(&name)
        .with_parameter(JavaType::object(), "value")
        .with_parameter(JavaType::string(), "property");
    let mut lines = Vec::new();
    null_value_guard(&mut lines);
    store(
        &mut lines,
        &list_field,
        format!("new Criterion(condition, value, \"{}\")", handler),
        true,
    );
    single.add_body_lines(lines);

    let mut list = helper(&name)
        .with_parameter(any_list(ctx), "values")
        .with_parameter(JavaType::string(), "property");
    let mut lines = Vec::new();
    empty_list_guard(&mut lines);
    store(
        &mut lines,
        &list_field,
        format!("new Criterion(condition, values, \"{}\")", handler),
        true,
    );
    list.add_body_lines(lines);

    let mut between = helper(&name)
        .with_parameter(column.java_type.clone(), "value1")
        .with_parameter(column.java_type.clone(), "value2")
        .with_parameter(JavaType::string(), "property");
    let mut lines = Vec::new();
    if !column.java_type.is_primitive() {
        between_guard(&mut lines);
    }
    store(
        &mut lines,
        &list_field,
        format!(
            "new Criterion(condition, {}, {}, \"{}\")",
            ctx.boxed_argument(&column.java_type, "value1"),
            ctx.boxed_argument(&column.java_type, "value2"),
            handler
        ),
        true,
    );
    between.add_body_lines(lines);

    vec![single, list, between]
}

/// The `and<Property><Operator>` methods for one column
fn column_methods(ctx: &GenContext<'_>, column: &ColumnDescriptor) -> Vec<Method> {
    let (return_type, return_line) = self_return(ctx);
    let helper = AddHelper::for_column(column);
    let reference = ctx.table.aliased_column_name(column);
    let property = &column.java_property;
    let java_type = &column.java_type;

    // Helpers declared with Object parameters need explicit boxing
    // for primitives on pre-generics targets
    let single_arg = |var: &str| match helper {
        AddHelper::Shared | AddHelper::TypeHandled(_) => ctx.boxed_argument(java_type, var),
        AddHelper::JdbcDate | AddHelper::JdbcTime => var.to_string(),
    };
    let pair_arg = |var: &str| match helper {
        AddHelper::Shared => ctx.boxed_argument(java_type, var),
        _ => var.to_string(),
    };

    operators_for(column)
        .into_iter()
        .map(|op| {
            let condition = escape_java(&op.condition(&reference));
            let mut method = Method::new(&op.method_name(column)).returning(return_type.clone());
            match op.arity() {
                Arity::None => {
                    method.add_body_line(format!("addCriterion(\"{}\");", condition));
                }
                Arity::Single => {
                    method.add_parameter(Parameter::new(java_type.clone(), "value"));
                    method.add_body_line(format!(
                        "{}(\"{}\", {}, \"{}\");",
                        helper.method_name(),
                        condition,
                        single_arg("value"),
                        property
                    ));
                }
                Arity::ListValued => {
                    method.add_parameter(Parameter::new(ctx.list_of(java_type.boxed()), "values"));
                    method.add_body_line(format!(
                        "{}(\"{}\", values, \"{}\");",
                        helper.method_name(),
                        condition,
                        property
                    ));
                }
                Arity::Pair => {
                    method.add_parameter(Parameter::new(java_type.clone(), "value1"));
                    method.add_parameter(Parameter::new(java_type.clone(), "value2"));
                    method.add_body_line(format!(
                        "{}(\"{}\", {}, {}, \"{}\");",
                        helper.method_name(),
                        condition,
                        pair_arg("value1"),
                        pair_arg("value2"),
                        property
                    ));
                }
            }
            method.add_body_line(return_line);
            method
        })
        .collect()
}

pub fn criteria_class(ctx: &GenContext<'_>) -> InnerClass {
    let mut class = InnerClass::new(JavaType::criteria());
    class.is_static = true;
    class.super_class = Some(if ctx.config.use_generics {
        JavaType::generated_criteria().with_argument(JavaType::criteria())
    } else {
        JavaType::generated_criteria()
    });

    let mut constructor = Method::constructor("Criteria").with_visibility(Visibility::Protected);
    constructor.add_body_line("super();");
    ctx.add_inner_method(ARTIFACT, &mut class, constructor);

    if ctx.config.use_generics {
        let mut method = Method::new("self")
            .with_visibility(Visibility::Protected)
            .returning(JavaType::criteria());
        method.add_annotation("@Override");
        method.add_body_line("return this;");
        ctx.add_inner_method(ARTIFACT, &mut class, method);
    }

    class
}

pub fn criterion_class(ctx: &GenContext<'_>) -> InnerClass {
    let mut class = InnerClass::new(JavaType::criterion());
    class.is_static = true;

    let fields = [
        ("condition", JavaType::string()),
        ("value", JavaType::object()),
        ("secondValue", JavaType::object()),
        ("noValue", JavaType::boolean_primitive()),
        ("singleValue", JavaType::boolean_primitive()),
        ("betweenValue", JavaType::boolean_primitive()),
        ("listValue", JavaType::boolean_primitive()),
        ("typeHandler", JavaType::string()),
    ];
    for (name, java_type) in &fields {
        ctx.add_inner_field(ARTIFACT, &mut class, Field::new(name, java_type.clone()));
    }
    for (name, java_type) in &fields {
        let prefix = if *java_type == JavaType::boolean_primitive() {
            "is"
        } else {
            "get"
        };
        let mut getter = Method::new(&format!("{}{}", prefix, crate::schema::capitalize(name)))
            .returning(java_type.clone());
        getter.add_body_line(format!("return {};", name));
        ctx.add_inner_method(ARTIFACT, &mut class, getter);
    }

    let list_check = if ctx.config.use_generics {
        "if (value instanceof List<?>) {"
    } else {
        "if (value instanceof List) {"
    };

    let ctor = || Method::constructor("Criterion").with_visibility(Visibility::Protected);

    let mut no_value = ctor().with_parameter(JavaType::string(), "condition");
    no_value.add_body_lines([
        "super();",
        "this.condition = condition;",
        "this.typeHandler = null;",
        "this.noValue = true;",
    ]);
    ctx.add_inner_method(ARTIFACT, &mut class, no_value);

    let mut handled = ctor()
        .with_parameter(JavaType::string(), "condition")
        .with_parameter(JavaType::object(), "value")
        .with_parameter(JavaType::string(), "typeHandler");
    handled.add_body_lines([
        "super();",
        "this.condition = condition;",
        "this.value = value;",
        "this.typeHandler = typeHandler;",
        list_check,
        "this.listValue = true;",
        "} else {",
        "this.singleValue = true;",
        "}",
    ]);
    ctx.add_inner_method(ARTIFACT, &mut class, handled);

    let mut single = ctor()
        .with_parameter(JavaType::string(), "condition")
        .with_parameter(JavaType::object(), "value");
    single.add_body_line("this(condition, value, null);");
    ctx.add_inner_method(ARTIFACT, &mut class, single);

    let mut between_handled = ctor()
        .with_parameter(JavaType::string(), "condition")
        .with_parameter(JavaType::object(), "value")
        .with_parameter(JavaType::object(), "secondValue")
        .with_parameter(JavaType::string(), "typeHandler");
    between_handled.add_body_lines([
        "super();",
        "this.condition = condition;",
        "this.value = value;",
        "this.secondValue = secondValue;",
        "this.typeHandler = typeHandler;",
        "this.betweenValue = true;",
    ]);
    ctx.add_inner_method(ARTIFACT, &mut class, between_handled);

    let mut between = ctor()
        .with_parameter(JavaType::string(), "condition")
        .with_parameter(JavaType::object(), "value")
        .with_parameter(JavaType::object(), "secondValue");
    between.add_body_line("this(condition, value, secondValue, null);");
    ctx.add_inner_method(ARTIFACT, &mut class, between);

    class
}
