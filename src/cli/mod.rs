//! CLI module for CodeViz

mod args;

pub use args::{Args, Command};

use crate::analysis::record::AnalysisRecord;
use crate::analysis::Analyzer;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::diagrams::{render_class_diagram, render_dependency_graph};
use crate::output::html::{ReportConfig, ReportGenerator};
use crate::output::summary::render_summary;
use crate::server;
use std::path::Path;
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    init_tracing();
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize diagnostic logging, filtered by RUST_LOG
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Analyze {
            path,
            output,
            format,
            config,
            no_diagrams,
            verbose,
        } => {
            let mut cfg = load_config(config.as_deref());
            let format = OutputFormat::from_name(&format)?;
            cfg.merge_cli(Some(output), Some(format), no_diagrams);

            if verbose {
                println!("Analyzing: {}", path.display());
                println!("Output: {}", cfg.output.directory.display());
                println!("Format: {:?}", cfg.output.format);
                println!("Diagrams: {}", cfg.diagrams.enabled);
            }

            if !path.exists() {
                return Err(crate::error::Error::PathNotFound(path));
            }

            let mut analyzer = Analyzer::new()?;
            let record = analyzer.analyze_file(&path)?;

            println!(
                "Analysis complete: {} classes, {} functions, {} imports",
                record.summary.total_classes,
                record.summary.total_functions,
                record.summary.total_imports
            );

            let title = report_title(&cfg, &path);
            std::fs::create_dir_all(&cfg.output.directory)?;

            match cfg.output.format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&record)?;
                    let output_path = cfg.output.directory.join("analysis.json");
                    std::fs::write(&output_path, json)?;
                    println!("JSON written to: {}", output_path.display());
                }
                OutputFormat::Markdown => {
                    let md = generate_markdown(&record, &title, cfg.diagrams.enabled);
                    let output_path = cfg.output.directory.join("report.md");
                    std::fs::write(&output_path, md)?;
                    println!("Markdown written to: {}", output_path.display());
                }
                OutputFormat::Html => {
                    let generator = ReportGenerator::new(ReportConfig {
                        output_dir: cfg.output.directory.clone(),
                        title,
                        include_diagrams: cfg.diagrams.enabled,
                    })?;
                    let page = generator.generate(&record)?;
                    println!("Report written to: {}", page.display());
                }
            }

            println!();
            println!("{}", render_summary(&record));

            Ok(())
        }

        Command::Serve { host, port, config } => {
            let mut cfg = load_config(config.as_deref());
            if let Some(host) = host {
                cfg.server.host = host;
            }
            if let Some(port) = port {
                cfg.server.port = port;
            }
            cfg.validate()?;

            server::serve(&cfg.server)
        }

        Command::Version => {
            println!("codeviz {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(path) => Config::load_or_default(path),
        None => Config::load_or_default(Path::new("codeviz.toml")),
    }
}

/// Report title: the configured project name, or the analyzed file's name
/// when the config is untouched
fn report_title(cfg: &Config, path: &Path) -> String {
    if cfg.project.name.is_empty() || cfg.project.name == "CodeViz" {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("CodeViz")
            .to_string()
    } else {
        cfg.project.name.clone()
    }
}

/// Generate a markdown report
fn generate_markdown(record: &AnalysisRecord, title: &str, include_diagrams: bool) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", title));
    md.push_str(&format!("{}\n\n", render_summary(record)));

    if !record.classes.is_empty() {
        md.push_str("## Classes\n\n");
        for class in &record.classes {
            md.push_str(&format!("### {} (line {})\n\n", class.name, class.line));
            if !class.bases.is_empty() {
                md.push_str(&format!("Inherits from: {}\n\n", class.bases.join(", ")));
            }
            if !class.methods.is_empty() {
                md.push_str(&format!("Methods: {}\n\n", class.methods.join(", ")));
            }
        }
    }

    if !record.functions.is_empty() {
        md.push_str("## Functions\n\n");
        for function in &record.functions {
            md.push_str(&format!(
                "- `{}({})` (line {})\n",
                function.name,
                function.args.join(", "),
                function.line
            ));
        }
        md.push('\n');
    }

    if !record.imports.is_empty() {
        md.push_str("## Imports\n\n");
        for import in &record.imports {
            md.push_str(&format!("- `{}`\n", import.module()));
        }
        md.push('\n');
    }

    if include_diagrams {
        md.push_str("## Class diagram\n\n```mermaid\n");
        md.push_str(&render_class_diagram(
            &record.classes,
            &record.relationships.inheritance,
        ));
        md.push_str("\n```\n\n## Dependency graph\n\n```mermaid\n");
        md.push_str(&render_dependency_graph(&record.classes, &record.imports));
        md.push_str("\n```\n");
    }

    md
}
