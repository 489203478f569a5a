// HTML report generator
//
// Renders a single self-contained report page through Tera, embedding the
// summary paragraph and the Mermaid diagram sources, and writes the raw
// `.mmd` files next to it for external diagram tooling.

use crate::analysis::record::AnalysisRecord;
use crate::error::Result;
use crate::output::diagrams::{render_class_diagram, render_dependency_graph};
use crate::output::summary::render_summary;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

/// Configuration for report generation
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Output directory
    pub output_dir: PathBuf,
    /// Report title
    pub title: String,
    /// Whether to embed diagrams and write `.mmd` files
    pub include_diagrams: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("codeviz-out"),
            title: "CodeViz Report".to_string(),
            include_diagrams: true,
        }
    }
}

/// HTML report generator
pub struct ReportGenerator {
    config: ReportConfig,
    tera: Tera,
}

impl ReportGenerator {
    /// Create a new generator with the embedded template
    pub fn new(config: ReportConfig) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(
            "report.html",
            include_str!("../../templates/report.html.tera"),
        )])?;
        Ok(Self { config, tera })
    }

    /// Write the report; returns the path of the generated page
    pub fn generate(&self, record: &AnalysisRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.output_dir)?;

        let class_diagram = render_class_diagram(&record.classes, &record.relationships.inheritance);
        let dependency_graph = render_dependency_graph(&record.classes, &record.imports);

        let mut context = Context::new();
        context.insert("title", &self.config.title);
        context.insert("record", record);
        context.insert("summary_text", &render_summary(record));
        context.insert("include_diagrams", &self.config.include_diagrams);
        context.insert("class_diagram", &class_diagram);
        context.insert("dependency_graph", &dependency_graph);

        let html = self.tera.render("report.html", &context)?;
        let page_path = self.config.output_dir.join("index.html");
        fs::write(&page_path, html)?;

        if self.config.include_diagrams {
            fs::write(
                self.config.output_dir.join("class_diagram.mmd"),
                &class_diagram,
            )?;
            fs::write(
                self.config.output_dir.join("dependency_graph.mmd"),
                &dependency_graph,
            )?;
        }

        Ok(page_path)
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }
}
