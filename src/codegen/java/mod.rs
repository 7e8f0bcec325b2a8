//! MyBatis Java code generator
//!
//! Produces, per table, a record class, an example class with its criteria
//! classes, a mapper interface, and either a SQL provider class or an XML
//! mapper depending on the configured SQL builder style.

use std::fs;

use tracing::{debug, info, warn};

use crate::codegen::{
    CodeGenConfig, CodeGenerator, GenContext, GeneratedArtifact, GenerationReport, TableArtifacts,
};
use crate::error::ExemplarError;
use crate::plugin::PluginChain;
use crate::render::Renderer;
use crate::schema::IntrospectedTable;

pub mod criteria;
pub mod example;
pub mod key_sql;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod xml_mapper;

use provider::Backend;

/// Java code generator
pub struct JavaGenerator {
    renderer: Renderer,
    plugins: PluginChain,
}

impl JavaGenerator {
    pub fn new(plugins: PluginChain) -> Self {
        Self {
            renderer: Renderer::new(),
            plugins,
        }
    }

    /// Build every artifact for one table without touching the filesystem
    pub fn generate_table(
        &self,
        table: &IntrospectedTable,
        config: &CodeGenConfig,
    ) -> Result<TableArtifacts, ExemplarError> {
        let mut result = TableArtifacts {
            table: table.name.clone(),
            ..TableArtifacts::default()
        };

        if table.columns.is_empty() {
            let message = format!("Table {} has no columns and was skipped", table.name);
            warn!(table = ?table.name, "Table has no columns, skipping");
            result.warnings.push(message);
            return Ok(result);
        }

        let ctx = GenContext::new(table, config, &self.plugins);
        let backend = Backend::from_style(config.sql_builder);
        debug!(table = ?table.name, backend = ?config.sql_builder, "Generating table artifacts");

        if let Some(class) = model::record_class(&ctx) {
            result.artifacts.push(GeneratedArtifact::Class(class));
        }
        if table.generates_any_by_example() {
            if let Some(class) = example::example_class(&ctx) {
                result.artifacts.push(GeneratedArtifact::Class(class));
            }
        } else {
            ctx.warn("No by-example statements enabled, example class not generated");
        }
        if let Some(interface) = mapper::mapper_interface(&ctx, backend) {
            result.artifacts.push(GeneratedArtifact::Interface(interface));
        }

        match backend {
            Some(backend) => {
                if let Some(class) = provider::sql_provider_class(&ctx, backend) {
                    result.artifacts.push(GeneratedArtifact::Class(class));
                }
            }
            None => {
                if let Some(document) = xml_mapper::xml_mapper(&ctx) {
                    result.artifacts.push(GeneratedArtifact::Xml {
                        package: config.mapper_package.clone(),
                        file_name: format!("{}.xml", ctx.names.mapper.base_short_name()),
                        document,
                    });
                }
            }
        }

        result.warnings.extend(ctx.take_warnings());
        Ok(result)
    }

    /// Render and write one table's artifacts
    fn write_table(
        &self,
        artifacts: &TableArtifacts,
        config: &CodeGenConfig,
        report: &mut GenerationReport,
    ) -> Result<(), ExemplarError> {
        for artifact in &artifacts.artifacts {
            let path = config.output_path.join(artifact.relative_path());
            let contents = self.renderer.render(artifact)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
            debug!(path = ?path, "Wrote file");
            report.files_written.push(path);
        }
        Ok(())
    }
}

impl Default for JavaGenerator {
    fn default() -> Self {
        Self::new(PluginChain::new())
    }
}

impl CodeGenerator for JavaGenerator {
    fn generate(
        &self,
        tables: &[IntrospectedTable],
        config: &CodeGenConfig,
    ) -> Result<GenerationReport, ExemplarError> {
        info!(
            output = ?config.output_path,
            model_package = ?config.model_package,
            mapper_package = ?config.mapper_package,
            sql_builder = ?config.sql_builder,
            generics = config.use_generics,
            "Generating MyBatis code"
        );

        fs::create_dir_all(&config.output_path)?;

        let mut report = GenerationReport::default();
        for table in tables {
            let artifacts = self.generate_table(table, config)?;
            self.write_table(&artifacts, config, &mut report)?;
            report.warnings.extend(artifacts.warnings);
            info!(table = ?table.name, files = artifacts.artifacts.len(), "Generated table");
        }

        info!(
            files = report.files_written.len(),
            warnings = report.warnings.len(),
            "Code generation complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::SqlBuilderStyle;
    use crate::plugin::SuppressPlugin;
    use crate::schema::{ColumnDescriptor, JdbcType};
    use std::path::PathBuf;

    fn table() -> IntrospectedTable {
        let mut table = IntrospectedTable::new(
            "users",
            vec![
                ColumnDescriptor::new("id", JdbcType::Integer),
                ColumnDescriptor::new("name", JdbcType::Varchar),
            ],
        );
        table.primary_key = vec!["id".to_string()];
        table
    }

    fn config(style: SqlBuilderStyle) -> CodeGenConfig {
        CodeGenConfig::new(PathBuf::from("out"))
            .with_model_package("com.acme.model")
            .with_mapper_package("com.acme.mapper")
            .with_sql_builder(style)
    }

    #[test]
    fn test_provider_backend_artifacts() {
        let generator = JavaGenerator::default();
        let result = generator
            .generate_table(&table(), &config(SqlBuilderStyle::Provider))
            .unwrap();
        let paths: Vec<PathBuf> = result.artifacts.iter().map(|a| a.relative_path()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("com/acme/model/Users.java"),
                PathBuf::from("com/acme/model/UsersExample.java"),
                PathBuf::from("com/acme/mapper/UsersMapper.java"),
                PathBuf::from("com/acme/mapper/UsersSqlProvider.java"),
            ]
        );
        assert!(result.xml().is_none());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_xml_backend_artifacts() {
        let generator = JavaGenerator::default();
        let result = generator
            .generate_table(&table(), &config(SqlBuilderStyle::Xml))
            .unwrap();
        assert!(result.class("UsersSqlProvider").is_none());
        assert!(result.xml().is_some());
        assert_eq!(
            result.artifacts.last().unwrap().relative_path(),
            PathBuf::from("com/acme/mapper/UsersMapper.xml")
        );
        let mapper = result.interface("UsersMapper").unwrap();
        assert!(mapper.methods.iter().all(|m| m.annotations.is_empty()));
    }

    #[test]
    fn test_empty_table_is_skipped_with_warning() {
        let generator = JavaGenerator::default();
        let empty = IntrospectedTable::new("nothing", vec![]);
        let result = generator
            .generate_table(&empty, &config(SqlBuilderStyle::Provider))
            .unwrap();
        assert!(result.artifacts.is_empty());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_rendered_example_compiles_to_expected_shape() {
        let generator = JavaGenerator::default();
        let result = generator
            .generate_table(&table(), &config(SqlBuilderStyle::Provider))
            .unwrap();
        let example = result.class("UsersExample").unwrap();
        let text = Renderer::new().render_class(example).unwrap();
        assert!(text.starts_with("package com.acme.model;\n\nimport java.util.ArrayList;\nimport java.util.List;\n"));
        assert!(text.contains("    protected abstract static class GeneratedCriteria<T extends GeneratedCriteria<T>> {"));
        assert!(text.contains("        public T andNameLike(String value) {\n            addCriterion(\"name like\", value, \"name\");\n            return self();\n        }"));
        assert!(text.contains("    public static class Criteria extends GeneratedCriteria<Criteria> {"));
    }

    #[test]
    fn test_plugins_reach_every_artifact() {
        let generator = JavaGenerator::new(PluginChain::new().with(SuppressPlugin::new(["UsersMapper", "clear"])));
        let result = generator
            .generate_table(&table(), &config(SqlBuilderStyle::Legacy))
            .unwrap();
        assert!(result.interface("UsersMapper").is_none());
        assert!(result.class("UsersExample").unwrap().method("clear").is_none());
    }

    #[test]
    fn test_generate_writes_files() {
        let dir = std::env::temp_dir().join(format!("exemplar-test-{}", std::process::id()));
        let config = CodeGenConfig::new(dir.clone())
            .with_model_package("com.acme.model")
            .with_mapper_package("com.acme.mapper")
            .with_sql_builder(SqlBuilderStyle::Xml);
        let report = JavaGenerator::default().generate(&[table()], &config).unwrap();
        assert_eq!(report.files_written.len(), 4);
        let xml = fs::read_to_string(dir.join("com/acme/mapper/UsersMapper.xml")).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE mapper PUBLIC"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
