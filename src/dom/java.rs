//! Java element model

use std::collections::BTreeSet;

const PRIMITIVES: [(&str, &str); 8] = [
    ("boolean", "java.lang.Boolean"),
    ("byte", "java.lang.Byte"),
    ("char", "java.lang.Character"),
    ("double", "java.lang.Double"),
    ("float", "java.lang.Float"),
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("short", "java.lang.Short"),
];

/// A (possibly parameterized) Java type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JavaType {
    base: String,
    arguments: Vec<JavaType>,
}

impl JavaType {
    /// Parse a type name such as `java.util.List<java.lang.Integer>`
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        match (name.find('<'), name.rfind('>')) {
            (Some(open), Some(close)) if close > open => Self {
                base: name[..open].trim().to_string(),
                arguments: split_arguments(&name[open + 1..close])
                    .into_iter()
                    .map(|arg| JavaType::new(&arg))
                    .collect(),
            },
            _ => Self {
                base: name.to_string(),
                arguments: Vec::new(),
            },
        }
    }

    pub fn string() -> Self {
        Self::new("java.lang.String")
    }

    pub fn object() -> Self {
        Self::new("java.lang.Object")
    }

    pub fn boolean_primitive() -> Self {
        Self::new("boolean")
    }

    pub fn date() -> Self {
        Self::new("java.util.Date")
    }

    pub fn list() -> Self {
        Self::new("java.util.List")
    }

    pub fn array_list() -> Self {
        Self::new("java.util.ArrayList")
    }

    pub fn iterator() -> Self {
        Self::new("java.util.Iterator")
    }

    pub fn criteria() -> Self {
        Self::new("Criteria")
    }

    pub fn generated_criteria() -> Self {
        Self::new("GeneratedCriteria")
    }

    pub fn criterion() -> Self {
        Self::new("Criterion")
    }

    /// Add a type argument
    pub fn with_argument(mut self, argument: JavaType) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn full_name(&self) -> String {
        if self.arguments.is_empty() {
            return self.base.clone();
        }
        let args: Vec<String> = self.arguments.iter().map(JavaType::full_name).collect();
        format!("{}<{}>", self.base, args.join(", "))
    }

    pub fn base_short_name(&self) -> &str {
        match self.base.rfind('.') {
            Some(idx) => &self.base[idx + 1..],
            None => &self.base,
        }
    }

    pub fn short_name(&self) -> String {
        if self.arguments.is_empty() {
            return self.base_short_name().to_string();
        }
        let args: Vec<String> = self.arguments.iter().map(JavaType::short_name).collect();
        format!("{}<{}>", self.base_short_name(), args.join(", "))
    }

    /// Package of the base type, empty for primitives and unqualified names
    pub fn package(&self) -> &str {
        let base = self.base.trim_end_matches("[]");
        match base.rfind('.') {
            Some(idx) => &base[..idx],
            None => "",
        }
    }

    pub fn is_primitive(&self) -> bool {
        PRIMITIVES.iter().any(|(p, _)| *p == self.base)
    }

    /// Wrapper type of a primitive, `None` for reference types
    pub fn primitive_wrapper(&self) -> Option<JavaType> {
        PRIMITIVES
            .iter()
            .find(|(p, _)| *p == self.base)
            .map(|(_, wrapper)| JavaType::new(wrapper))
    }

    /// The wrapper for primitives, the type itself otherwise
    pub fn boxed(&self) -> JavaType {
        self.primitive_wrapper().unwrap_or_else(|| self.clone())
    }

    /// Names that need an import statement for this type and its arguments
    pub fn import_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let package = self.package();
        if !package.is_empty() && package != "java.lang" {
            names.push(self.base.trim_end_matches("[]").to_string());
        }
        for arg in &self.arguments {
            names.extend(arg.import_names());
        }
        names
    }
}

fn split_arguments(args: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in args.chars() {
        match ch {
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
    Package,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public ",
            Visibility::Protected => "protected ",
            Visibility::Private => "private ",
            Visibility::Package => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub java_type: JavaType,
    pub name: String,
    pub annotations: Vec<String>,
}

impl Parameter {
    pub fn new(java_type: JavaType, name: &str) -> Self {
        Self {
            java_type,
            name: name.to_string(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: &str) -> Self {
        self.annotations.push(annotation.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub java_type: JavaType,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub initializer: Option<String>,
    pub javadoc: Vec<String>,
}

impl Field {
    pub fn new(name: &str, java_type: JavaType) -> Self {
        Self {
            name: name.to_string(),
            java_type,
            visibility: Visibility::Private,
            is_static: false,
            is_final: false,
            initializer: None,
            javadoc: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub visibility: Visibility,
    pub constructor: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub return_type: Option<JavaType>,
    pub parameters: Vec<Parameter>,
    pub annotations: Vec<String>,
    pub javadoc: Vec<String>,
    pub body: Vec<String>,
}

impl Method {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            visibility: Visibility::Public,
            constructor: false,
            is_static: false,
            is_abstract: false,
            return_type: None,
            parameters: Vec::new(),
            annotations: Vec::new(),
            javadoc: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn constructor(name: &str) -> Self {
        let mut method = Self::new(name);
        method.constructor = true;
        method
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn returning(mut self, java_type: JavaType) -> Self {
        self.return_type = Some(java_type);
        self
    }

    pub fn with_parameter(mut self, java_type: JavaType, name: &str) -> Self {
        self.parameters.push(Parameter::new(java_type, name));
        self
    }

    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    pub fn add_body_line(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }

    pub fn add_body_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.extend(lines.into_iter().map(Into::into));
    }

    pub fn add_annotation(&mut self, annotation: impl Into<String>) {
        self.annotations.push(annotation.into());
    }

    /// Types referenced by the signature
    pub fn signature_types(&self) -> Vec<&JavaType> {
        self.return_type
            .iter()
            .chain(self.parameters.iter().map(|p| &p.java_type))
            .collect()
    }
}

/// A nested class
#[derive(Debug, Clone, PartialEq)]
pub struct InnerClass {
    pub java_type: JavaType,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub type_parameters: Vec<String>,
    pub super_class: Option<JavaType>,
    pub javadoc: Vec<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub inner_classes: Vec<InnerClass>,
}

impl InnerClass {
    pub fn new(java_type: JavaType) -> Self {
        Self {
            java_type,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            type_parameters: Vec::new(),
            super_class: None,
            javadoc: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes: Vec::new(),
        }
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A class that becomes its own source file
#[derive(Debug, Clone, PartialEq)]
pub struct TopLevelClass {
    pub java_type: JavaType,
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub super_class: Option<JavaType>,
    pub file_comments: Vec<String>,
    pub javadoc: Vec<String>,
    pub imported_types: BTreeSet<String>,
    pub static_imports: BTreeSet<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub inner_classes: Vec<InnerClass>,
}

impl TopLevelClass {
    pub fn new(java_type: JavaType) -> Self {
        Self {
            java_type,
            visibility: Visibility::Public,
            is_abstract: false,
            super_class: None,
            file_comments: Vec::new(),
            javadoc: Vec::new(),
            imported_types: BTreeSet::new(),
            static_imports: BTreeSet::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes: Vec::new(),
        }
    }

    pub fn add_imported_type(&mut self, java_type: &JavaType) {
        add_imports(&mut self.imported_types, self.java_type.package(), java_type);
    }

    pub fn add_static_import(&mut self, name: &str) {
        self.static_imports.insert(name.to_string());
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn inner_class(&self, short_name: &str) -> Option<&InnerClass> {
        self.inner_classes
            .iter()
            .find(|c| c.java_type.base_short_name() == short_name)
    }
}

/// A Java interface
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub java_type: JavaType,
    pub visibility: Visibility,
    pub file_comments: Vec<String>,
    pub javadoc: Vec<String>,
    pub imported_types: BTreeSet<String>,
    pub static_imports: BTreeSet<String>,
    pub methods: Vec<Method>,
}

impl Interface {
    pub fn new(java_type: JavaType) -> Self {
        Self {
            java_type,
            visibility: Visibility::Public,
            file_comments: Vec::new(),
            javadoc: Vec::new(),
            imported_types: BTreeSet::new(),
            static_imports: BTreeSet::new(),
            methods: Vec::new(),
        }
    }

    pub fn add_imported_type(&mut self, java_type: &JavaType) {
        add_imports(&mut self.imported_types, self.java_type.package(), java_type);
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

fn add_imports(imports: &mut BTreeSet<String>, own_package: &str, java_type: &JavaType) {
    for name in java_type.import_names() {
        let package = match name.rfind('.') {
            Some(idx) => &name[..idx],
            None => "",
        };
        if package != own_package {
            imports.insert(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generic_type() {
        let t = JavaType::new("java.util.List<java.lang.Integer>");
        assert_eq!(t.short_name(), "List<Integer>");
        assert_eq!(t.full_name(), "java.util.List<java.lang.Integer>");
        assert_eq!(t.import_names(), vec!["java.util.List".to_string()]);
    }

    #[test]
    fn test_nested_generic_arguments() {
        let t = JavaType::new("java.util.Map<java.lang.String, java.util.List<java.util.Date>>");
        assert_eq!(t.short_name(), "Map<String, List<Date>>");
        assert_eq!(
            t.import_names(),
            vec!["java.util.Map".to_string(), "java.util.List".to_string(), "java.util.Date".to_string()]
        );
    }

    #[test]
    fn test_primitive_wrapper() {
        let t = JavaType::new("int");
        assert!(t.is_primitive());
        assert_eq!(t.boxed().short_name(), "Integer");
        assert!(JavaType::string().primitive_wrapper().is_none());
        assert!(t.import_names().is_empty());
    }

    #[test]
    fn test_array_import() {
        let t = JavaType::new("byte[]");
        assert_eq!(t.short_name(), "byte[]");
        assert!(t.import_names().is_empty());
    }

    #[test]
    fn test_same_package_not_imported() {
        let mut class = TopLevelClass::new(JavaType::new("com.acme.model.UserExample"));
        class.add_imported_type(&JavaType::new("com.acme.model.User"));
        class.add_imported_type(&JavaType::new("java.util.List<com.acme.other.Thing>"));
        let imports: Vec<_> = class.imported_types.iter().cloned().collect();
        assert_eq!(imports, vec!["com.acme.other.Thing", "java.util.List"]);
    }
}
