//! Text rendering
//!
//! Turns the element model into Java and XML source. File framing (package,
//! imports, XML prolog) comes from minijinja templates; class and element
//! bodies are laid out here.

use minijinja::{context, AutoEscape, Environment};

use crate::codegen::GeneratedArtifact;
use crate::dom::{
    Field, InnerClass, Interface, Method, Parameter, TopLevelClass, XmlDocument, XmlElement,
    XmlNode,
};
use crate::error::ExemplarError;

const INDENT: &str = "    ";

/// Renders generated artifacts to file contents
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_template("java_file", include_str!("templates/java_file.jinja"))
            .expect("Failed to load java file template");
        env.add_template("xml_file", include_str!("templates/xml_file.jinja"))
            .expect("Failed to load xml file template");

        Self { env }
    }

    pub fn render(&self, artifact: &GeneratedArtifact) -> Result<String, ExemplarError> {
        match artifact {
            GeneratedArtifact::Class(class) => self.render_class(class),
            GeneratedArtifact::Interface(interface) => self.render_interface(interface),
            GeneratedArtifact::Xml { document, .. } => self.render_xml(document),
        }
    }

    pub fn render_class(&self, class: &TopLevelClass) -> Result<String, ExemplarError> {
        self.render_java_file(
            &class.file_comments,
            class.java_type.package(),
            &class.static_imports.iter().collect::<Vec<_>>(),
            &class.imported_types.iter().collect::<Vec<_>>(),
            class_body(class),
        )
    }

    pub fn render_interface(&self, interface: &Interface) -> Result<String, ExemplarError> {
        self.render_java_file(
            &interface.file_comments,
            interface.java_type.package(),
            &interface.static_imports.iter().collect::<Vec<_>>(),
            &interface.imported_types.iter().collect::<Vec<_>>(),
            interface_body(interface),
        )
    }

    fn render_java_file(
        &self,
        file_comments: &[String],
        package: &str,
        static_imports: &[&String],
        imports: &[&String],
        body: String,
    ) -> Result<String, ExemplarError> {
        let ctx = context! {
            file_comments => file_comments,
            package => package,
            static_imports => static_imports,
            imports => imports,
            body => body,
        };
        self.render_template("java_file", ctx)
    }

    pub fn render_xml(&self, document: &XmlDocument) -> Result<String, ExemplarError> {
        let ctx = context! {
            root => &document.root.name,
            public_id => &document.public_id,
            system_id => &document.system_id,
            body => xml_body(&document.root),
        };
        self.render_template("xml_file", ctx)
    }

    fn render_template(&self, name: &str, ctx: minijinja::Value) -> Result<String, ExemplarError> {
        let template = self.env.get_template(name).map_err(|e| ExemplarError::Template {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        template.render(ctx).map_err(|e| ExemplarError::Template {
            name: name.to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

fn push_javadoc(lines: &mut Vec<String>, level: usize, javadoc: &[String]) {
    if javadoc.is_empty() {
        return;
    }
    let pad = indent(level);
    lines.push(format!("{}/**", pad));
    for line in javadoc {
        if line.is_empty() {
            lines.push(format!("{} *", pad));
        } else {
            lines.push(format!("{} * {}", pad, line));
        }
    }
    lines.push(format!("{} */", pad));
}

fn field_lines(field: &Field, level: usize) -> Vec<String> {
    let mut lines = Vec::new();
    push_javadoc(&mut lines, level, &field.javadoc);
    let mut decl = format!("{}{}", indent(level), field.visibility.keyword());
    if field.is_static {
        decl.push_str("static ");
    }
    if field.is_final {
        decl.push_str("final ");
    }
    decl.push_str(&field.java_type.short_name());
    decl.push(' ');
    decl.push_str(&field.name);
    if let Some(init) = &field.initializer {
        decl.push_str(" = ");
        decl.push_str(init);
    }
    decl.push(';');
    lines.push(decl);
    lines
}

fn parameter_text(parameter: &Parameter) -> String {
    let mut text = String::new();
    for annotation in &parameter.annotations {
        text.push_str(annotation);
        text.push(' ');
    }
    text.push_str(&parameter.java_type.short_name());
    text.push(' ');
    text.push_str(&parameter.name);
    text
}

fn method_lines(method: &Method, level: usize, in_interface: bool) -> Vec<String> {
    let mut lines = Vec::new();
    push_javadoc(&mut lines, level, &method.javadoc);
    for annotation in &method.annotations {
        lines.push(format!("{}{}", indent(level), annotation));
    }

    let mut signature = indent(level);
    if !in_interface {
        signature.push_str(method.visibility.keyword());
    }
    if method.is_static {
        signature.push_str("static ");
    }
    if method.is_abstract {
        signature.push_str("abstract ");
    }
    if !method.constructor {
        match &method.return_type {
            Some(ret) => signature.push_str(&ret.short_name()),
            None => signature.push_str("void"),
        }
        signature.push(' ');
    }
    signature.push_str(&method.name);
    signature.push('(');
    let params: Vec<String> = method.parameters.iter().map(parameter_text).collect();
    signature.push_str(&params.join(", "));
    signature.push(')');

    if in_interface || method.is_abstract {
        signature.push(';');
        lines.push(signature);
        return lines;
    }

    signature.push_str(" {");
    lines.push(signature);
    lines.extend(body_lines(&method.body, level + 1));
    lines.push(format!("{}}}", indent(level)));
    lines
}

/// Indent statement lines by brace depth
fn body_lines(body: &[String], level: usize) -> Vec<String> {
    let mut depth = level;
    let mut lines = Vec::with_capacity(body.len());
    for line in body {
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        if line.starts_with('}') {
            depth = depth.saturating_sub(1);
        }
        lines.push(format!("{}{}", indent(depth), line));
        if line.ends_with('{') {
            depth += 1;
        }
    }
    lines
}

fn members(
    fields: &[Field],
    methods: &[Method],
    inner_classes: &[InnerClass],
    level: usize,
) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();
    blocks.extend(fields.iter().map(|f| field_lines(f, level)));
    blocks.extend(methods.iter().map(|m| method_lines(m, level, false)));
    blocks.extend(inner_classes.iter().map(|c| inner_class_lines(c, level)));
    blocks
}

fn join_blocks(lines: &mut Vec<String>, blocks: Vec<Vec<String>>) {
    for (i, block) in blocks.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(block);
    }
}

fn inner_class_lines(class: &InnerClass, level: usize) -> Vec<String> {
    let mut lines = Vec::new();
    push_javadoc(&mut lines, level, &class.javadoc);
    let mut decl = format!("{}{}", indent(level), class.visibility.keyword());
    if class.is_abstract {
        decl.push_str("abstract ");
    }
    if class.is_static {
        decl.push_str("static ");
    }
    decl.push_str("class ");
    decl.push_str(class.java_type.base_short_name());
    if !class.type_parameters.is_empty() {
        decl.push('<');
        decl.push_str(&class.type_parameters.join(", "));
        decl.push('>');
    }
    if let Some(super_class) = &class.super_class {
        decl.push_str(" extends ");
        decl.push_str(&super_class.short_name());
    }
    decl.push_str(" {");
    lines.push(decl);
    join_blocks(
        &mut lines,
        members(&class.fields, &class.methods, &class.inner_classes, level + 1),
    );
    lines.push(format!("{}}}", indent(level)));
    lines
}

/// Class declaration and members, without package or imports
pub fn class_body(class: &TopLevelClass) -> String {
    let mut lines = Vec::new();
    push_javadoc(&mut lines, 0, &class.javadoc);
    let mut decl = class.visibility.keyword().to_string();
    if class.is_abstract {
        decl.push_str("abstract ");
    }
    decl.push_str("class ");
    decl.push_str(&class.java_type.short_name());
    if let Some(super_class) = &class.super_class {
        decl.push_str(" extends ");
        decl.push_str(&super_class.short_name());
    }
    decl.push_str(" {");
    lines.push(decl);
    join_blocks(
        &mut lines,
        members(&class.fields, &class.methods, &class.inner_classes, 1),
    );
    lines.push("}".to_string());
    lines.join("\n")
}

/// Interface declaration and abstract methods, without package or imports
pub fn interface_body(interface: &Interface) -> String {
    let mut lines = Vec::new();
    push_javadoc(&mut lines, 0, &interface.javadoc);
    lines.push(format!(
        "{}interface {} {{",
        interface.visibility.keyword(),
        interface.java_type.short_name()
    ));
    let blocks = interface
        .methods
        .iter()
        .map(|m| method_lines(m, 1, true))
        .collect();
    join_blocks(&mut lines, blocks);
    lines.push("}".to_string());
    lines.join("\n")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn element_lines(element: &XmlElement, level: usize, lines: &mut Vec<String>) {
    let mut open = format!("{}<{}", indent(level), element.name);
    for (name, value) in &element.attributes {
        open.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
    }
    if element.children.is_empty() {
        open.push_str(" />");
        lines.push(open);
        return;
    }
    open.push('>');
    lines.push(open);
    for child in &element.children {
        match child {
            XmlNode::Element(e) => element_lines(e, level + 1, lines),
            XmlNode::Text(text) => {
                for line in text.lines() {
                    lines.push(format!("{}{}", indent(level + 1), escape_text(line)));
                }
            }
        }
    }
    lines.push(format!("{}</{}>", indent(level), element.name));
}

/// Root element and its descendants
pub fn xml_body(root: &XmlElement) -> String {
    let mut lines = Vec::new();
    element_lines(root, 0, &mut lines);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{JavaType, Visibility};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_body_indentation_follows_braces() {
        let mut method = Method::new("clear").returning(JavaType::new("void"));
        method.add_body_lines(["if (x) {", "a();", "} else {", "b();", "}", "", "c();"]);
        let lines = method_lines(&method, 1, false);
        assert_eq!(
            lines.join("\n"),
            [
                "    public void clear() {",
                "        if (x) {",
                "            a();",
                "        } else {",
                "            b();",
                "        }",
                "",
                "        c();",
                "    }",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_abstract_and_interface_methods_have_no_body() {
        let mut method = Method::new("self")
            .with_visibility(Visibility::Protected)
            .returning(JavaType::new("T"));
        method.is_abstract = true;
        assert_eq!(method_lines(&method, 0, false), vec!["protected abstract T self();"]);

        let mut count = Method::new("countByExample")
            .returning(JavaType::new("long"))
            .with_parameter(JavaType::new("com.acme.UsersExample"), "example");
        count.add_annotation("@SelectProvider(type=UsersSqlProvider.class, method=\"countByExample\")");
        assert_eq!(
            method_lines(&count, 1, true),
            vec![
                "    @SelectProvider(type=UsersSqlProvider.class, method=\"countByExample\")",
                "    long countByExample(UsersExample example);",
            ]
        );
    }

    #[test]
    fn test_class_layout() {
        let mut class = TopLevelClass::new(JavaType::new("com.acme.Users"));
        class.fields.push(Field::new("id", JavaType::new("java.lang.Integer")));
        let mut getter = Method::new("getId").returning(JavaType::new("java.lang.Integer"));
        getter.add_body_line("return id;");
        class.methods.push(getter);
        let mut inner = InnerClass::new(JavaType::criteria());
        inner.is_static = true;
        inner.super_class = Some(JavaType::new("GeneratedCriteria<Criteria>"));
        class.inner_classes.push(inner);

        assert_eq!(
            class_body(&class),
            [
                "public class Users {",
                "    private Integer id;",
                "",
                "    public Integer getId() {",
                "        return id;",
                "    }",
                "",
                "    public static class Criteria extends GeneratedCriteria<Criteria> {",
                "    }",
                "}",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_java_file_framing() {
        let mut class = TopLevelClass::new(JavaType::new("com.acme.UsersSqlProvider"));
        class.add_static_import("org.apache.ibatis.jdbc.SqlBuilder.BEGIN");
        class.add_imported_type(&JavaType::new("java.util.Map"));
        let text = Renderer::new().render_class(&class).unwrap();
        assert_eq!(
            text,
            [
                "package com.acme;",
                "",
                "import static org.apache.ibatis.jdbc.SqlBuilder.BEGIN;",
                "",
                "import java.util.Map;",
                "",
                "public class UsersSqlProvider {",
                "}",
                "",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_xml_rendering_escapes() {
        let mut root = XmlElement::new("mapper").with_attribute("namespace", "a.B");
        let mut when = XmlElement::new("when").with_attribute("test", "a < b && \"c\"");
        when.add_text("and x <> 1");
        root.add_element(when);
        root.add_element(XmlElement::new("include").with_attribute("refid", "Base_Column_List"));
        let doc = XmlDocument::new(
            "-//mybatis.org//DTD Mapper 3.0//EN",
            "http://mybatis.org/dtd/mybatis-3-mapper.dtd",
            root,
        );
        let text = Renderer::new().render_xml(&doc).unwrap();
        assert_eq!(
            text,
            [
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
                "<!DOCTYPE mapper PUBLIC \"-//mybatis.org//DTD Mapper 3.0//EN\" \"http://mybatis.org/dtd/mybatis-3-mapper.dtd\">",
                "<mapper namespace=\"a.B\">",
                "    <when test=\"a &lt; b &amp;&amp; &quot;c&quot;\">",
                "        and x &lt;&gt; 1",
                "    </when>",
                "    <include refid=\"Base_Column_List\" />",
                "</mapper>",
                "",
            ]
            .join("\n")
        );
    }
}
