//! Record class generation
//!
//! One flat class per table holding every column as a property.

use crate::codegen::GenContext;
use crate::dom::{Field, JavaType, Method, TopLevelClass};
use crate::plugin::ArtifactKind;

const ARTIFACT: ArtifactKind = ArtifactKind::Record;

pub fn record_class(ctx: &GenContext<'_>) -> Option<TopLevelClass> {
    let mut class = TopLevelClass::new(ctx.names.record.clone());
    class.javadoc.push(format!(
        "Row of table {}",
        ctx.table.fully_qualified_name()
    ));

    for column in &ctx.table.columns {
        let mut field = Field::new(&column.java_property, column.java_type.clone());
        field.javadoc.push(format!("Column {}", column.actual_column_name));
        ctx.add_field(ARTIFACT, &mut class, field);
    }

    for column in &ctx.table.columns {
        let property = &column.java_property;
        let capitalized = column.capitalized_property();

        let mut getter = Method::new(&format!("get{}", capitalized)).returning(column.java_type.clone());
        getter.add_body_line(format!("return {};", property));
        ctx.add_method(ARTIFACT, &mut class, getter);

        let mut setter =
            Method::new(&format!("set{}", capitalized)).with_parameter(column.java_type.clone(), property);
        if column.java_type == JavaType::string() {
            setter.add_body_line(format!(
                "this.{0} = {0} == null ? null : {0}.trim();",
                property
            ));
        } else {
            setter.add_body_line(format!("this.{0} = {0};", property));
        }
        ctx.add_method(ARTIFACT, &mut class, setter);
    }

    ctx.accept_class(ARTIFACT, class)
}
