//! Example class generation

use crate::codegen::java::criteria::{criteria_class, criterion_class, generated_criteria_class};
use crate::codegen::GenContext;
use crate::dom::{Field, InnerClass, JavaType, Method, TopLevelClass, Visibility};
use crate::plugin::ArtifactKind;

const ARTIFACT: ArtifactKind = ArtifactKind::Example;

/// Build the example class, or `None` when a plugin drops it
pub fn example_class(ctx: &GenContext<'_>) -> Option<TopLevelClass> {
    let example_type = ctx.names.example.clone();
    let short = example_type.base_short_name().to_string();
    let criteria_list = ctx.list_of(JavaType::criteria());

    let mut class = TopLevelClass::new(example_type.clone());
    class.javadoc.push(format!(
        "Query conditions for table {}",
        ctx.table.fully_qualified_name()
    ));
    class.add_imported_type(&JavaType::array_list());

    let mut constructor = Method::constructor(&short);
    constructor.add_body_line(format!("oredCriteria = {};", ctx.new_array_list("Criteria")));
    ctx.add_method(ARTIFACT, &mut class, constructor);

    if ctx.table.generates_any_update_by_example() {
        let mut copy = Method::constructor(&short)
            .with_visibility(Visibility::Protected)
            .with_parameter(example_type.clone(), "example");
        copy.add_body_lines([
            "this.orderByClause = example.orderByClause;",
            "this.oredCriteria = example.oredCriteria;",
            "this.distinct = example.distinct;",
        ]);
        ctx.add_method(ARTIFACT, &mut class, copy);
    }

    ctx.add_field(
        ARTIFACT,
        &mut class,
        Field::new("orderByClause", JavaType::string()).with_visibility(Visibility::Protected),
    );
    let mut setter = Method::new("setOrderByClause").with_parameter(JavaType::string(), "orderByClause");
    setter.add_body_line("this.orderByClause = orderByClause;");
    ctx.add_method(ARTIFACT, &mut class, setter);
    let mut getter = Method::new("getOrderByClause").returning(JavaType::string());
    getter.add_body_line("return orderByClause;");
    ctx.add_method(ARTIFACT, &mut class, getter);

    ctx.add_field(
        ARTIFACT,
        &mut class,
        Field::new("distinct", JavaType::boolean_primitive()).with_visibility(Visibility::Protected),
    );
    let mut setter = Method::new("setDistinct").with_parameter(JavaType::boolean_primitive(), "distinct");
    setter.add_body_line("this.distinct = distinct;");
    ctx.add_method(ARTIFACT, &mut class, setter);
    let mut getter = Method::new("isDistinct").returning(JavaType::boolean_primitive());
    getter.add_body_line("return distinct;");
    ctx.add_method(ARTIFACT, &mut class, getter);

    ctx.add_field(
        ARTIFACT,
        &mut class,
        Field::new("oredCriteria", criteria_list.clone()).with_visibility(Visibility::Protected),
    );
    let mut getter = Method::new("getOredCriteria").returning(criteria_list);
    getter.add_body_line("return oredCriteria;");
    ctx.add_method(ARTIFACT, &mut class, getter);

    let mut or_existing = Method::new("or").with_parameter(JavaType::criteria(), "criteria");
    or_existing.add_body_line("oredCriteria.add(criteria);");
    ctx.add_method(ARTIFACT, &mut class, or_existing);

    let mut or_new = Method::new("or").returning(JavaType::criteria());
    or_new.add_body_lines([
        "Criteria criteria = createCriteriaInternal();",
        "oredCriteria.add(criteria);",
        "return criteria;",
    ]);
    ctx.add_method(ARTIFACT, &mut class, or_new);

    let mut create = Method::new("createCriteria").returning(JavaType::criteria());
    create.add_body_lines([
        "Criteria criteria = createCriteriaInternal();",
        "if (oredCriteria.size() == 0) {",
        "oredCriteria.add(criteria);",
        "}",
        "return criteria;",
    ]);
    ctx.add_method(ARTIFACT, &mut class, create);

    let mut internal = Method::new("createCriteriaInternal")
        .with_visibility(Visibility::Protected)
        .returning(JavaType::criteria());
    internal.add_body_lines(["Criteria criteria = new Criteria();", "return criteria;"]);
    ctx.add_method(ARTIFACT, &mut class, internal);

    let mut clear = Method::new("clear");
    clear.add_body_lines([
        "oredCriteria.clear();",
        "orderByClause = null;",
        "distinct = false;",
    ]);
    ctx.add_method(ARTIFACT, &mut class, clear);

    for inner in [
        generated_criteria_class(ctx),
        criteria_class(ctx),
        criterion_class(ctx),
    ] {
        import_inner_types(&mut class, &inner);
        ctx.add_inner_class(ARTIFACT, &mut class, inner);
    }

    ctx.accept_class(ARTIFACT, class)
}

/// Inner classes share the enclosing file's imports
fn import_inner_types(class: &mut TopLevelClass, inner: &InnerClass) {
    for field in &inner.fields {
        class.add_imported_type(&field.java_type);
    }
    for method in &inner.methods {
        for java_type in method.signature_types() {
            class.add_imported_type(java_type);
        }
        if method.body.iter().any(|line| line.contains("Iterator")) {
            class.add_imported_type(&JavaType::iterator());
        }
    }
}
