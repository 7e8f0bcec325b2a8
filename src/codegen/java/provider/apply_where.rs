//! The `applyWhere` method of the SQL provider class
//!
//! Walks the example's OR groups at runtime and formats bind placeholders
//! from the patterns in [`crate::codegen::placeholder`]. Indices address
//! `allCriteria`, so conditions stored in type-handler lists resolve to the
//! same criterion the loop is looking at.

use crate::codegen::placeholder::{Phrase, ALL_PHRASES};
use crate::codegen::{escape_java, statement, GenContext};
use crate::dom::{JavaType, Method, Visibility};

use super::Backend;

pub fn apply_where_method(ctx: &GenContext<'_>, backend: Backend) -> Method {
    let generics = ctx.config.use_generics;
    let mut method = Method::new(statement::APPLY_WHERE).with_visibility(Visibility::Protected);
    if backend == Backend::Builder {
        method = method.with_parameter(JavaType::new("org.apache.ibatis.jdbc.SQL"), "sql");
    }
    method = method
        .with_parameter(ctx.names.example.clone(), "example")
        .with_parameter(JavaType::boolean_primitive(), "includeExamplePhrase");

    let mut lines: Vec<String> = vec![
        "if (example == null) {".into(),
        "return;".into(),
        "}".into(),
        String::new(),
    ];

    for phrase in ALL_PHRASES {
        lines.push(format!("String {};", phrase.variable()));
    }
    lines.push("if (includeExamplePhrase) {".into());
    for phrase in ALL_PHRASES {
        lines.push(assign(phrase, true));
    }
    lines.push("} else {".into());
    for phrase in ALL_PHRASES {
        lines.push(assign(phrase, false));
    }
    lines.push("}".into());
    lines.push(String::new());

    lines.push("StringBuilder sb = new StringBuilder();".into());
    if generics {
        lines.push("List<Criteria> oredCriteria = example.getOredCriteria();".into());
    } else {
        lines.push("List oredCriteria = example.getOredCriteria();".into());
    }
    lines.push("boolean firstCriteria = true;".into());
    lines.push("for (int i = 0; i < oredCriteria.size(); i++) {".into());
    if generics {
        lines.push("Criteria criteria = oredCriteria.get(i);".into());
    } else {
        lines.push("Criteria criteria = (Criteria) oredCriteria.get(i);".into());
    }
    lines.extend(
        [
            "if (criteria.isValid()) {",
            "if (firstCriteria) {",
            "firstCriteria = false;",
            "} else {",
            "sb.append(\" or \");",
            "}",
            "",
            "sb.append('(');",
        ]
        .map(String::from),
    );
    if generics {
        lines.push("List<Criterion> criterions = criteria.getAllCriteria();".into());
    } else {
        lines.push("List criterions = criteria.getAllCriteria();".into());
    }
    lines.push("boolean firstCriterion = true;".into());
    lines.push("for (int j = 0; j < criterions.size(); j++) {".into());
    if generics {
        lines.push("Criterion criterion = criterions.get(j);".into());
    } else {
        lines.push("Criterion criterion = (Criterion) criterions.get(j);".into());
    }
    lines.extend(
        [
            "if (firstCriterion) {",
            "firstCriterion = false;",
            "} else {",
            "sb.append(\" and \");",
            "}",
            "",
            "if (criterion.isNoValue()) {",
            "sb.append(criterion.getCondition());",
            "} else if (criterion.isSingleValue()) {",
            "if (criterion.getTypeHandler() == null) {",
            "sb.append(String.format(parmPhrase1, criterion.getCondition(), i, j));",
            "} else {",
            "sb.append(String.format(parmPhrase1_th, criterion.getCondition(), i, j, criterion.getTypeHandler()));",
            "}",
            "} else if (criterion.isBetweenValue()) {",
            "if (criterion.getTypeHandler() == null) {",
            "sb.append(String.format(parmPhrase2, criterion.getCondition(), i, j, i, j));",
            "} else {",
            "sb.append(String.format(parmPhrase2_th, criterion.getCondition(), i, j, criterion.getTypeHandler(), i, j, criterion.getTypeHandler()));",
            "}",
            "} else if (criterion.isListValue()) {",
            "sb.append(criterion.getCondition());",
            "sb.append(\" (\");",
        ]
        .map(String::from),
    );
    if generics {
        lines.push("List<?> listItems = (List<?>) criterion.getValue();".into());
    } else {
        lines.push("List listItems = (List) criterion.getValue();".into());
    }
    lines.extend(
        [
            "boolean comma = false;",
            "for (int k = 0; k < listItems.size(); k++) {",
            "if (comma) {",
            "sb.append(\", \");",
            "} else {",
            "comma = true;",
            "}",
            "if (criterion.getTypeHandler() == null) {",
            "sb.append(String.format(parmPhrase3, i, j, k));",
            "} else {",
            "sb.append(String.format(parmPhrase3_th, i, j, k, criterion.getTypeHandler()));",
            "}",
            "}",
            "sb.append(')');",
            "}",
            "}",
            "sb.append(')');",
            "}",
            "}",
            "",
            "if (sb.length() > 0) {",
        ]
        .map(String::from),
    );
    lines.push(format!("{}WHERE(sb.toString());", backend.call_prefix()));
    lines.push("}".into());

    method.add_body_lines(lines);
    method
}

fn assign(phrase: Phrase, include_example_phrase: bool) -> String {
    format!(
        "{} = \"{}\";",
        phrase.variable(),
        escape_java(&phrase.pattern(include_example_phrase))
    )
}
