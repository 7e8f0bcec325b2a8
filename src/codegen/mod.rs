//! Code generation
//!
//! This module provides the configuration, shared context and artifact types
//! used by the generators, plus the operator catalog and placeholder
//! patterns they all agree on.

use std::cell::RefCell;
use std::path::PathBuf;

use tracing::warn;

use crate::dom::{
    Field, InnerClass, Interface, JavaType, Method, TopLevelClass, XmlDocument, XmlElement,
};
use crate::plugin::{ArtifactKind, PluginChain, PluginContext};
use crate::prelude::{ExemplarError, IntrospectedTable};
use crate::schema::ColumnDescriptor;

pub mod java;
pub mod operator;
pub mod placeholder;

pub use java::JavaGenerator;

/// Statement and fragment ids shared by the mapper interface, the SQL
/// provider and the XML mapper
pub mod statement {
    pub const COUNT_BY_EXAMPLE: &str = "countByExample";
    pub const DELETE_BY_EXAMPLE: &str = "deleteByExample";
    pub const SELECT_BY_EXAMPLE: &str = "selectByExample";
    pub const SELECT_BY_EXAMPLE_WITH_BLOBS: &str = "selectByExampleWithBLOBs";
    pub const UPDATE_BY_EXAMPLE_SELECTIVE: &str = "updateByExampleSelective";
    pub const UPDATE_BY_EXAMPLE: &str = "updateByExample";
    pub const UPDATE_BY_EXAMPLE_WITH_BLOBS: &str = "updateByExampleWithBLOBs";
    pub const APPLY_WHERE: &str = "applyWhere";

    pub const INSERT: &str = "insert";
    pub const INSERT_SELECTIVE: &str = "insertSelective";
    pub const SELECT_BY_PRIMARY_KEY: &str = "selectByPrimaryKey";
    pub const DELETE_BY_PRIMARY_KEY: &str = "deleteByPrimaryKey";
    pub const UPDATE_BY_PRIMARY_KEY: &str = "updateByPrimaryKey";
    pub const UPDATE_BY_PRIMARY_KEY_SELECTIVE: &str = "updateByPrimaryKeySelective";

    pub const EXAMPLE_WHERE_CLAUSE: &str = "Example_Where_Clause";
    pub const UPDATE_BY_EXAMPLE_WHERE_CLAUSE: &str = "Update_By_Example_Where_Clause";
    pub const BASE_RESULT_MAP: &str = "BaseResultMap";
    pub const RESULT_MAP_WITH_BLOBS: &str = "ResultMapWithBLOBs";
    pub const BASE_COLUMN_LIST: &str = "Base_Column_List";
    pub const BLOB_COLUMN_LIST: &str = "Blob_Column_List";
}

/// How SQL for by-example statements is assembled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SqlBuilderStyle {
    /// Static `org.apache.ibatis.jdbc.SqlBuilder` methods in a provider class
    Legacy,
    /// `org.apache.ibatis.jdbc.SQL` instances in a provider class
    #[default]
    Provider,
    /// Dynamic SQL tags in an XML mapper
    Xml,
}

/// Configuration for code generation
#[derive(Debug, Clone)]
pub struct CodeGenConfig {
    /// Output directory
    pub output_path: PathBuf,
    /// Package for record and example classes
    pub model_package: String,
    /// Package for mapper interfaces, SQL providers and XML mappers
    pub mapper_package: String,
    pub sql_builder: SqlBuilderStyle,
    /// Emit type arguments (`List<Criteria>`); otherwise raw types and casts
    pub use_generics: bool,
}

impl CodeGenConfig {
    pub fn new(output_path: PathBuf) -> Self {
        Self {
            output_path,
            model_package: "model".to_string(),
            mapper_package: "mapper".to_string(),
            sql_builder: SqlBuilderStyle::default(),
            use_generics: true,
        }
    }

    pub fn with_model_package(mut self, package: &str) -> Self {
        self.model_package = package.to_string();
        self
    }

    pub fn with_mapper_package(mut self, package: &str) -> Self {
        self.mapper_package = package.to_string();
        self
    }

    pub fn with_sql_builder(mut self, style: SqlBuilderStyle) -> Self {
        self.sql_builder = style;
        self
    }

    pub fn with_generics(mut self, use_generics: bool) -> Self {
        self.use_generics = use_generics;
        self
    }
}

/// Fully qualified names of everything generated for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNames {
    pub record: JavaType,
    pub example: JavaType,
    pub sql_provider: JavaType,
    pub mapper: JavaType,
}

impl TypeNames {
    pub fn new(table: &IntrospectedTable, config: &CodeGenConfig) -> Self {
        let domain = table.domain_object_name();
        let qualify = |package: &str, name: String| {
            if package.is_empty() {
                JavaType::new(&name)
            } else {
                JavaType::new(&format!("{}.{}", package, name))
            }
        };
        Self {
            record: qualify(&config.model_package, domain.clone()),
            example: qualify(&config.model_package, format!("{}Example", domain)),
            sql_provider: qualify(&config.mapper_package, format!("{}SqlProvider", domain)),
            mapper: qualify(&config.mapper_package, format!("{}Mapper", domain)),
        }
    }
}

/// One generated output unit
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedArtifact {
    Class(TopLevelClass),
    Interface(Interface),
    Xml {
        package: String,
        file_name: String,
        document: XmlDocument,
    },
}

impl GeneratedArtifact {
    /// Path relative to the output directory
    pub fn relative_path(&self) -> PathBuf {
        let (package, file_name) = match self {
            GeneratedArtifact::Class(class) => (
                class.java_type.package().to_string(),
                format!("{}.java", class.java_type.base_short_name()),
            ),
            GeneratedArtifact::Interface(interface) => (
                interface.java_type.package().to_string(),
                format!("{}.java", interface.java_type.base_short_name()),
            ),
            GeneratedArtifact::Xml {
                package, file_name, ..
            } => (package.clone(), file_name.clone()),
        };
        let mut path: PathBuf = package.split('.').filter(|s| !s.is_empty()).collect();
        path.push(file_name);
        path
    }

    pub fn as_class(&self) -> Option<&TopLevelClass> {
        match self {
            GeneratedArtifact::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&Interface> {
        match self {
            GeneratedArtifact::Interface(interface) => Some(interface),
            _ => None,
        }
    }

    pub fn as_xml(&self) -> Option<&XmlDocument> {
        match self {
            GeneratedArtifact::Xml { document, .. } => Some(document),
            _ => None,
        }
    }
}

/// Everything produced for one table
#[derive(Debug, Clone, Default)]
pub struct TableArtifacts {
    pub table: String,
    pub artifacts: Vec<GeneratedArtifact>,
    pub warnings: Vec<String>,
}

impl TableArtifacts {
    /// Find a generated class by short name
    pub fn class(&self, short_name: &str) -> Option<&TopLevelClass> {
        self.artifacts
            .iter()
            .filter_map(GeneratedArtifact::as_class)
            .find(|c| c.java_type.base_short_name() == short_name)
    }

    pub fn interface(&self, short_name: &str) -> Option<&Interface> {
        self.artifacts
            .iter()
            .filter_map(GeneratedArtifact::as_interface)
            .find(|i| i.java_type.base_short_name() == short_name)
    }

    pub fn xml(&self) -> Option<&XmlDocument> {
        self.artifacts.iter().find_map(GeneratedArtifact::as_xml)
    }
}

/// Summary of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub files_written: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl GenerationReport {
    /// Put warnings raised before generation ahead of the generator's own
    pub fn prepend_warnings(&mut self, warnings: Vec<String>) {
        self.warnings.splice(0..0, warnings);
    }
}

/// Trait for target-specific code generators
pub trait CodeGenerator {
    /// Generate and write code for the given tables
    fn generate(
        &self,
        tables: &[IntrospectedTable],
        config: &CodeGenConfig,
    ) -> Result<GenerationReport, ExemplarError>;
}

/// Per-table state shared by the element generators
///
/// Every element goes through one of the `add_*` methods so the plugin
/// chain sees it before it lands in its parent.
pub struct GenContext<'a> {
    pub table: &'a IntrospectedTable,
    pub config: &'a CodeGenConfig,
    pub plugins: &'a PluginChain,
    pub names: TypeNames,
    warnings: RefCell<Vec<String>>,
}

impl<'a> GenContext<'a> {
    pub fn new(
        table: &'a IntrospectedTable,
        config: &'a CodeGenConfig,
        plugins: &'a PluginChain,
    ) -> Self {
        Self {
            table,
            config,
            plugins,
            names: TypeNames::new(table, config),
            warnings: RefCell::new(Vec::new()),
        }
    }

    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(table = ?self.table.name, "{}", message);
        self.warnings.borrow_mut().push(message);
    }

    pub fn take_warnings(&self) -> Vec<String> {
        self.warnings.take()
    }

    fn plugin_context<'b>(&'b self, artifact: ArtifactKind, owner: &'b str) -> PluginContext<'b> {
        PluginContext {
            table: self.table,
            artifact,
            owner,
        }
    }

    pub fn add_field(&self, artifact: ArtifactKind, class: &mut TopLevelClass, mut field: Field) -> bool {
        let owner = class.java_type.base_short_name().to_string();
        let accepted = self
            .plugins
            .field_generated(&mut field, &self.plugin_context(artifact, &owner));
        if accepted {
            class.add_imported_type(&field.java_type);
            class.fields.push(field);
        }
        accepted
    }

    pub fn add_method(&self, artifact: ArtifactKind, class: &mut TopLevelClass, mut method: Method) -> bool {
        let owner = class.java_type.base_short_name().to_string();
        let accepted = self
            .plugins
            .method_generated(&mut method, &self.plugin_context(artifact, &owner));
        if accepted {
            for java_type in method.signature_types() {
                class.add_imported_type(java_type);
            }
            class.methods.push(method);
        }
        accepted
    }

    pub fn add_inner_class(&self, artifact: ArtifactKind, class: &mut TopLevelClass, mut inner: InnerClass) -> bool {
        let owner = class.java_type.base_short_name().to_string();
        let accepted = self
            .plugins
            .inner_class_generated(&mut inner, &self.plugin_context(artifact, &owner));
        if accepted {
            class.inner_classes.push(inner);
        }
        accepted
    }

    pub fn add_inner_field(&self, artifact: ArtifactKind, class: &mut InnerClass, mut field: Field) -> bool {
        let owner = class.java_type.base_short_name().to_string();
        let accepted = self
            .plugins
            .field_generated(&mut field, &self.plugin_context(artifact, &owner));
        if accepted {
            class.fields.push(field);
        }
        accepted
    }

    pub fn add_inner_method(&self, artifact: ArtifactKind, class: &mut InnerClass, mut method: Method) -> bool {
        let owner = class.java_type.base_short_name().to_string();
        let accepted = self
            .plugins
            .method_generated(&mut method, &self.plugin_context(artifact, &owner));
        if accepted {
            class.methods.push(method);
        }
        accepted
    }

    pub fn add_interface_method(&self, artifact: ArtifactKind, interface: &mut Interface, mut method: Method) -> bool {
        let owner = interface.java_type.base_short_name().to_string();
        let accepted = self
            .plugins
            .method_generated(&mut method, &self.plugin_context(artifact, &owner));
        if accepted {
            for java_type in method.signature_types() {
                interface.add_imported_type(java_type);
            }
            interface.methods.push(method);
        }
        accepted
    }

    pub fn add_xml_element(&self, parent: &mut XmlElement, mut element: XmlElement) -> bool {
        let owner = parent.name.clone();
        let accepted = self
            .plugins
            .xml_element_generated(&mut element, &self.plugin_context(ArtifactKind::XmlMapper, &owner));
        if accepted {
            parent.add_element(element);
        }
        accepted
    }

    /// Offer a finished top-level class to the plugins
    pub fn accept_class(&self, artifact: ArtifactKind, mut class: TopLevelClass) -> Option<TopLevelClass> {
        let owner = class.java_type.base_short_name().to_string();
        self.plugins
            .class_generated(&mut class, &self.plugin_context(artifact, &owner))
            .then_some(class)
    }

    pub fn accept_interface(&self, mut interface: Interface) -> Option<Interface> {
        let owner = interface.java_type.base_short_name().to_string();
        self.plugins
            .interface_generated(&mut interface, &self.plugin_context(ArtifactKind::Mapper, &owner))
            .then_some(interface)
    }

    pub fn accept_xml_document(&self, mut document: XmlDocument) -> Option<XmlDocument> {
        let owner = document.root.name.clone();
        self.plugins
            .xml_document_generated(&mut document, &self.plugin_context(ArtifactKind::XmlMapper, &owner))
            .then_some(document)
    }

    /// `List<T>` with generics, raw `List` without
    pub fn list_of(&self, element: JavaType) -> JavaType {
        if self.config.use_generics {
            JavaType::list().with_argument(element)
        } else {
            JavaType::list()
        }
    }

    /// Constructor expression for a new, empty `ArrayList` of `element`
    ///
    /// Type arguments are spelled out; the diamond operator is not
    /// available to the Java 5 targets generics mode emits for.
    pub fn new_array_list(&self, element: &str) -> String {
        if self.config.use_generics {
            format!("new ArrayList<{}>()", element)
        } else {
            "new ArrayList()".to_string()
        }
    }

    /// Expression passing `var` where an `Object` is expected
    ///
    /// Without generics the target runtime predates autoboxing, so
    /// primitives are wrapped explicitly.
    pub fn boxed_argument(&self, java_type: &JavaType, var: &str) -> String {
        match java_type.primitive_wrapper() {
            Some(wrapper) if !self.config.use_generics => {
                format!("new {}({})", wrapper.short_name(), var)
            }
            _ => var.to_string(),
        }
    }
}

/// Escape text for use inside a Java string literal
pub fn escape_java(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

/// MyBatis inline parameter, e.g. `#{record.name,jdbcType=VARCHAR}`
pub fn parameter_clause(column: &ColumnDescriptor, prefix: Option<&str>) -> String {
    let mut clause = String::from("#{");
    if let Some(prefix) = prefix {
        clause.push_str(prefix);
    }
    clause.push_str(&column.java_property);
    clause.push_str(",jdbcType=");
    clause.push_str(column.jdbc_type_name());
    if let Some(handler) = column.type_handler() {
        clause.push_str(",typeHandler=");
        clause.push_str(handler);
    }
    clause.push('}');
    clause
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::JdbcType;

    #[test]
    fn test_type_names() {
        let table = IntrospectedTable::new("order_items", vec![]);
        let config = CodeGenConfig::new(PathBuf::from("out"))
            .with_model_package("com.acme.model")
            .with_mapper_package("com.acme.mapper");
        let names = TypeNames::new(&table, &config);
        assert_eq!(names.example.full_name(), "com.acme.model.OrderItemsExample");
        assert_eq!(names.sql_provider.full_name(), "com.acme.mapper.OrderItemsSqlProvider");
        assert_eq!(names.mapper.short_name(), "OrderItemsMapper");
    }

    #[test]
    fn test_relative_path() {
        let class = TopLevelClass::new(JavaType::new("com.acme.model.UsersExample"));
        let path = GeneratedArtifact::Class(class).relative_path();
        assert_eq!(path, PathBuf::from("com/acme/model/UsersExample.java"));
    }

    #[test]
    fn test_parameter_clause() {
        let plain = ColumnDescriptor::new("first_name", JdbcType::Varchar);
        assert_eq!(parameter_clause(&plain, Some("record.")), "#{record.firstName,jdbcType=VARCHAR}");

        let handled = ColumnDescriptor::new("status", JdbcType::Varchar).with_type_handler("x.StatusHandler");
        assert_eq!(
            parameter_clause(&handled, None),
            "#{status,jdbcType=VARCHAR,typeHandler=x.StatusHandler}"
        );
    }

    #[test]
    fn test_escape_java() {
        assert_eq!(escape_java(r#""Order" \ x"#), r#"\"Order\" \\ x"#);
    }

    #[test]
    fn test_report_keeps_override_warnings_first() {
        let mut report = GenerationReport {
            files_written: vec![],
            warnings: vec!["Table t has no columns".to_string()],
        };
        report.prepend_warnings(vec!["Alias for ghosts matches no introspected table".to_string()]);
        assert_eq!(
            report.warnings,
            vec![
                "Alias for ghosts matches no introspected table",
                "Table t has no columns",
            ]
        );
    }

    #[test]
    fn test_new_array_list_names_element_type() {
        let table = IntrospectedTable::new("t", vec![]);
        let plugins = PluginChain::new();
        let modern = CodeGenConfig::new(PathBuf::from("out"));
        let ctx = GenContext::new(&table, &modern, &plugins);
        assert_eq!(ctx.new_array_list("Criteria"), "new ArrayList<Criteria>()");

        let legacy = CodeGenConfig::new(PathBuf::from("out")).with_generics(false);
        let ctx = GenContext::new(&table, &legacy, &plugins);
        assert_eq!(ctx.new_array_list("Criteria"), "new ArrayList()");
    }

    #[test]
    fn test_boxed_argument_without_generics() {
        let table = IntrospectedTable::new("t", vec![]);
        let plugins = PluginChain::new();
        let legacy = CodeGenConfig::new(PathBuf::from("out")).with_generics(false);
        let ctx = GenContext::new(&table, &legacy, &plugins);
        assert_eq!(ctx.boxed_argument(&JavaType::new("int"), "value"), "new Integer(value)");
        assert_eq!(ctx.boxed_argument(&JavaType::string(), "value"), "value");

        let modern = CodeGenConfig::new(PathBuf::from("out"));
        let ctx = GenContext::new(&table, &modern, &plugins);
        assert_eq!(ctx.boxed_argument(&JavaType::new("int"), "value"), "value");
    }
}
