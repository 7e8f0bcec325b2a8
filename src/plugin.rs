//! Plugin extension points
//!
//! Before any class, interface, field, method or XML element is added to
//! generated output, the generators ask the configured plugins. Plugins may
//! modify the element in place; returning `false` drops it from the output.
//! A dropped element is not an error.

use std::collections::HashSet;

use tracing::trace;

use crate::dom::{Field, InnerClass, Interface, Method, TopLevelClass, XmlDocument, XmlElement};
use crate::schema::IntrospectedTable;

/// Which generated artifact an element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Record,
    Example,
    SqlProvider,
    Mapper,
    XmlMapper,
}

/// What a plugin gets to see alongside the element
#[derive(Debug, Clone, Copy)]
pub struct PluginContext<'a> {
    pub table: &'a IntrospectedTable,
    pub artifact: ArtifactKind,
    /// Short name of the type (or XML root) the element is being added to
    pub owner: &'a str,
}

pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn class_generated(&self, _class: &mut TopLevelClass, _ctx: &PluginContext<'_>) -> bool {
        true
    }

    fn interface_generated(&self, _interface: &mut Interface, _ctx: &PluginContext<'_>) -> bool {
        true
    }

    fn inner_class_generated(&self, _class: &mut InnerClass, _ctx: &PluginContext<'_>) -> bool {
        true
    }

    fn field_generated(&self, _field: &mut Field, _ctx: &PluginContext<'_>) -> bool {
        true
    }

    fn method_generated(&self, _method: &mut Method, _ctx: &PluginContext<'_>) -> bool {
        true
    }

    fn xml_element_generated(&self, _element: &mut XmlElement, _ctx: &PluginContext<'_>) -> bool {
        true
    }

    fn xml_document_generated(&self, _document: &mut XmlDocument, _ctx: &PluginContext<'_>) -> bool {
        true
    }
}

/// Ordered plugins; the first rejection wins and later plugins are not asked
#[derive(Default)]
pub struct PluginChain {
    plugins: Vec<Box<dyn Plugin>>,
}

impl std::fmt::Debug for PluginChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.plugins.iter().map(|p| p.name()))
            .finish()
    }
}

impl PluginChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, plugin: impl Plugin + 'static) -> Self {
        self.push(plugin);
        self
    }

    pub fn push(&mut self, plugin: impl Plugin + 'static) {
        self.plugins.push(Box::new(plugin));
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    fn run(&self, element: &str, ctx: &PluginContext<'_>, mut hook: impl FnMut(&dyn Plugin) -> bool) -> bool {
        for plugin in &self.plugins {
            if !hook(plugin.as_ref()) {
                trace!(
                    plugin = plugin.name(),
                    table = ?ctx.table.name,
                    owner = ctx.owner,
                    element,
                    "Element suppressed by plugin"
                );
                return false;
            }
        }
        true
    }

    pub fn class_generated(&self, class: &mut TopLevelClass, ctx: &PluginContext<'_>) -> bool {
        let name = class.java_type.short_name();
        self.run(&name, ctx, |p| p.class_generated(class, ctx))
    }

    pub fn interface_generated(&self, interface: &mut Interface, ctx: &PluginContext<'_>) -> bool {
        let name = interface.java_type.short_name();
        self.run(&name, ctx, |p| p.interface_generated(interface, ctx))
    }

    pub fn inner_class_generated(&self, class: &mut InnerClass, ctx: &PluginContext<'_>) -> bool {
        let name = class.java_type.short_name();
        self.run(&name, ctx, |p| p.inner_class_generated(class, ctx))
    }

    pub fn field_generated(&self, field: &mut Field, ctx: &PluginContext<'_>) -> bool {
        let name = field.name.clone();
        self.run(&name, ctx, |p| p.field_generated(field, ctx))
    }

    pub fn method_generated(&self, method: &mut Method, ctx: &PluginContext<'_>) -> bool {
        let name = method.name.clone();
        self.run(&name, ctx, |p| p.method_generated(method, ctx))
    }

    pub fn xml_element_generated(&self, element: &mut XmlElement, ctx: &PluginContext<'_>) -> bool {
        let name = element
            .attribute("id")
            .unwrap_or(element.name.as_str())
            .to_string();
        self.run(&name, ctx, |p| p.xml_element_generated(element, ctx))
    }

    pub fn xml_document_generated(&self, document: &mut XmlDocument, ctx: &PluginContext<'_>) -> bool {
        let name = document.root.name.clone();
        self.run(&name, ctx, |p| p.xml_document_generated(document, ctx))
    }
}

/// Drops elements by name
///
/// A name is either bare (`selectByExample`) and matches anywhere, or
/// qualified by its owner (`UsersExample.clear`, `GeneratedCriteria.isValid`).
/// XML elements match on their `id` attribute.
#[derive(Debug, Clone, Default)]
pub struct SuppressPlugin {
    names: HashSet<String>,
}

impl SuppressPlugin {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    fn keeps(&self, name: &str, ctx: &PluginContext<'_>) -> bool {
        !(self.names.contains(name) || self.names.contains(&format!("{}.{}", ctx.owner, name)))
    }
}

impl Plugin for SuppressPlugin {
    fn name(&self) -> &str {
        "suppress"
    }

    fn class_generated(&self, class: &mut TopLevelClass, ctx: &PluginContext<'_>) -> bool {
        self.keeps(class.java_type.base_short_name(), ctx)
    }

    fn interface_generated(&self, interface: &mut Interface, ctx: &PluginContext<'_>) -> bool {
        self.keeps(interface.java_type.base_short_name(), ctx)
    }

    fn inner_class_generated(&self, class: &mut InnerClass, ctx: &PluginContext<'_>) -> bool {
        self.keeps(class.java_type.base_short_name(), ctx)
    }

    fn field_generated(&self, field: &mut Field, ctx: &PluginContext<'_>) -> bool {
        self.keeps(&field.name, ctx)
    }

    fn method_generated(&self, method: &mut Method, ctx: &PluginContext<'_>) -> bool {
        self.keeps(&method.name, ctx)
    }

    fn xml_element_generated(&self, element: &mut XmlElement, ctx: &PluginContext<'_>) -> bool {
        match element.attribute("id") {
            Some(id) => self.keeps(id, ctx),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::JavaType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting(Arc<AtomicUsize>);

    impl Plugin for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn method_generated(&self, _method: &mut Method, _ctx: &PluginContext<'_>) -> bool {
            self.0.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    fn ctx(table: &IntrospectedTable) -> PluginContext<'_> {
        PluginContext {
            table,
            artifact: ArtifactKind::Example,
            owner: "UsersExample",
        }
    }

    #[test]
    fn test_empty_chain_accepts() {
        let table = IntrospectedTable::new("users", vec![]);
        let mut method = Method::new("clear");
        assert!(PluginChain::new().method_generated(&mut method, &ctx(&table)));
    }

    #[test]
    fn test_rejection_short_circuits() {
        let table = IntrospectedTable::new("users", vec![]);
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = PluginChain::new()
            .with(SuppressPlugin::new(["clear"]))
            .with(Counting(calls.clone()));

        let mut method = Method::new("clear");
        assert!(!chain.method_generated(&mut method, &ctx(&table)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let mut other = Method::new("or");
        assert!(chain.method_generated(&mut other, &ctx(&table)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_qualified_suppression() {
        let table = IntrospectedTable::new("users", vec![]);
        let plugin = SuppressPlugin::new(["UsersExample.distinct"]);
        let mut field = Field::new("distinct", JavaType::boolean_primitive());
        assert!(!plugin.field_generated(&mut field, &ctx(&table)));

        let other_owner = PluginContext {
            owner: "OrdersExample",
            ..ctx(&table)
        };
        assert!(plugin.field_generated(&mut field, &other_owner));
    }

    #[test]
    fn test_xml_elements_match_on_id() {
        let table = IntrospectedTable::new("users", vec![]);
        let plugin = SuppressPlugin::new(["countByExample"]);
        let mut select = XmlElement::new("select").with_attribute("id", "countByExample");
        let mut plain = XmlElement::new("where");
        assert!(!plugin.xml_element_generated(&mut select, &ctx(&table)));
        assert!(plugin.xml_element_generated(&mut plain, &ctx(&table)));
    }
}
