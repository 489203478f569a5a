// Integration tests for CodeViz

use codeviz::analysis::record::ImportRecord;
use codeviz::analysis::{analyze_source, Analyzer};
use codeviz::output::diagrams::{render_class_diagram, render_dependency_graph, top_level_modules};
use codeviz::output::html::{ReportConfig, ReportGenerator};
use codeviz::output::summary::{complexity_band, render_summary};
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

const SAMPLE: &str = r#"class Animal:
    def speak(self):
        pass
    def eat(self):
        pass

class Dog(Animal):
    def speak(self):
        return "Woof"
    def fetch(self):
        return "Fetching!"

def create_animal(animal_type):
    if animal_type == "dog":
        return Dog()
    return Cat()

import os
from fastapi import FastAPI
"#;

// ============================================================================
// Analysis Tests
// ============================================================================

#[test]
fn test_analyze_sample_classes() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");

    let class_names: Vec<&str> = record.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(class_names, vec!["Animal", "Dog"]);

    let animal = &record.classes[0];
    assert_eq!(animal.methods, vec!["speak", "eat"]);
    assert!(animal.bases.is_empty());

    let dog = &record.classes[1];
    assert_eq!(dog.methods, vec!["speak", "fetch"]);
    assert_eq!(dog.bases, vec!["Animal"]);
}

#[test]
fn test_analyze_sample_functions() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");

    assert_eq!(record.functions.len(), 1);
    assert_eq!(record.functions[0].name, "create_animal");
    assert_eq!(record.functions[0].args, vec!["animal_type"]);
}

#[test]
fn test_methods_never_appear_as_functions() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");

    let function_names: Vec<&str> = record.functions.iter().map(|f| f.name.as_str()).collect();
    let method_names: Vec<&str> = record
        .classes
        .iter()
        .flat_map(|c| c.methods.iter().map(String::as_str))
        .collect();

    for method in &method_names {
        assert!(
            !function_names.contains(method),
            "{} is a method, not a function",
            method
        );
    }
    for function in &function_names {
        assert!(
            !method_names.contains(function),
            "{} is a function, not a method",
            function
        );
    }
}

#[test]
fn test_analyze_sample_imports() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");

    assert_eq!(record.imports.len(), 2);
    assert_eq!(
        record.imports[0],
        ImportRecord::Direct {
            module: "os".to_string(),
            alias: None,
        }
    );
    assert_eq!(
        record.imports[1],
        ImportRecord::From {
            module: "fastapi".to_string(),
            name: "FastAPI".to_string(),
            alias: None,
        }
    );
}

#[test]
fn test_analyze_sample_summary() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");

    assert_eq!(record.summary.total_classes, 2);
    assert_eq!(record.summary.total_functions, 1);
    assert_eq!(record.summary.total_imports, 2);
    assert_eq!(record.summary.complexity_score, 5);
    assert_eq!(complexity_band(record.summary.complexity_score), "moderate");
}

#[test]
fn test_analyze_sample_inheritance() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");

    assert_eq!(record.relationships.inheritance.len(), 1);
    let edge = &record.relationships.inheritance[0];
    assert_eq!(edge.child, "Dog");
    assert_eq!(edge.parent, "Animal");
}

#[test]
fn test_analyze_empty_source() {
    let record = analyze_source("").expect("Analysis failed");

    assert!(record.classes.is_empty());
    assert!(record.functions.is_empty());
    assert!(record.imports.is_empty());
    assert!(record.relationships.inheritance.is_empty());
    assert!(record.relationships.calls.is_empty());
    assert_eq!(record.summary.complexity_score, 0);
    assert_eq!(complexity_band(record.summary.complexity_score), "simple");
}

#[test]
fn test_call_attribution() {
    let source = "class Dog:\n    def speak(self):\n        dog.speak()\n\nspeak()\n";
    let record = analyze_source(source).expect("Analysis failed");

    assert_eq!(record.relationships.calls.len(), 2);

    let method_call = &record.relationships.calls[0];
    assert_eq!(method_call.from_scope, "Dog");
    assert_eq!(method_call.to, "dog.speak");

    let global_call = &record.relationships.calls[1];
    assert_eq!(global_call.from_scope, "global");
    assert_eq!(global_call.to, "speak");
}

#[test]
fn test_complexity_invariant_holds() {
    let sources = [
        "",
        SAMPLE,
        "class A:\n    pass\n",
        "def f():\n    pass\ndef g():\n    pass\n",
        "class A:\n    pass\nclass B:\n    pass\nclass C:\n    pass\n",
    ];

    for source in sources {
        let record = analyze_source(source).expect("Analysis failed");
        assert_eq!(
            record.summary.complexity_score,
            2 * record.summary.total_classes + record.summary.total_functions
        );
    }
}

#[test]
fn test_analyze_fixture_file() {
    let mut analyzer = Analyzer::new().expect("Failed to create analyzer");
    let record = analyzer
        .analyze_file(&fixtures_path("sample.py"))
        .expect("Analysis failed");

    assert_eq!(record.summary.total_classes, 2);
    assert_eq!(record.summary.total_functions, 1);
}

#[test]
fn test_analyze_broken_fixture_fails() {
    let mut analyzer = Analyzer::new().expect("Failed to create analyzer");
    let result = analyzer.analyze_file(&fixtures_path("broken.py"));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("syntax errors"));
}

// ============================================================================
// Serialization Contract Tests
// ============================================================================

#[test]
fn test_serialized_field_names() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");
    let value = serde_json::to_value(&record).expect("Serialization failed");

    assert_eq!(value["classes"][0]["name"], "Animal");
    assert!(value["classes"][0]["methods"].is_array());
    assert!(value["classes"][0]["bases"].is_array());
    assert!(value["classes"][0]["line"].is_number());

    assert_eq!(value["functions"][0]["name"], "create_animal");
    assert_eq!(value["functions"][0]["args"][0], "animal_type");

    assert_eq!(value["imports"][0]["type"], "import");
    assert_eq!(value["imports"][0]["module"], "os");
    assert_eq!(value["imports"][1]["type"], "from_import");
    assert_eq!(value["imports"][1]["name"], "FastAPI");

    assert_eq!(value["relationships"]["inheritance"][0]["child"], "Dog");
    assert_eq!(value["relationships"]["inheritance"][0]["parent"], "Animal");

    assert_eq!(value["summary"]["total_classes"], 2);
    assert_eq!(value["summary"]["total_functions"], 1);
    assert_eq!(value["summary"]["total_imports"], 2);
    assert_eq!(value["summary"]["complexity_score"], 5);
}

#[test]
fn test_call_edges_serialize_from_and_to() {
    let record = analyze_source("helper()\n").expect("Analysis failed");
    let value = serde_json::to_value(&record).expect("Serialization failed");

    assert_eq!(value["relationships"]["calls"][0]["from"], "global");
    assert_eq!(value["relationships"]["calls"][0]["to"], "helper");
    assert!(value["relationships"]["calls"][0]["line"].is_number());
}

// ============================================================================
// Diagram Tests
// ============================================================================

#[test]
fn test_class_diagram_for_sample() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");
    let diagram = render_class_diagram(&record.classes, &record.relationships.inheritance);

    let lines: Vec<&str> = diagram.lines().collect();
    assert_eq!(lines[0], "classDiagram");
    assert!(lines.contains(&"    class Animal {"));
    assert!(lines.contains(&"        +speak()"));
    assert!(lines.contains(&"        +fetch()"));
    assert!(lines.contains(&"    Animal <|-- Dog"));
}

#[test]
fn test_dependency_graph_edge_count() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");
    let graph = render_dependency_graph(&record.classes, &record.imports);

    let modules = top_level_modules(&record.imports);
    let edge_count = graph.lines().count() - 1;
    assert_eq!(edge_count, record.classes.len() * modules.len());
}

#[test]
fn test_dependency_graph_app_fallback() {
    let record = analyze_source("import os\nimport json\n").expect("Analysis failed");
    let graph = render_dependency_graph(&record.classes, &record.imports);

    let lines: Vec<&str> = graph.lines().collect();
    assert_eq!(lines.len() - 1, 2);
    assert!(lines.contains(&"    App --> os[os]"));
    assert!(lines.contains(&"    App --> json[json]"));
}

// ============================================================================
// Summary Tests
// ============================================================================

#[test]
fn test_summary_text_for_sample() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");
    let text = render_summary(&record);

    assert!(text.contains("This file contains 2 class(es) and 1 top-level function(s)."));
    assert!(text.contains("Inheritance: Dog extends Animal."));
    assert!(text.contains("Key dependencies: os, fastapi."));
    assert!(text.contains("Overall complexity: moderate (score: 5)."));
}

#[test]
fn test_summary_text_for_empty_source() {
    let record = analyze_source("").expect("Analysis failed");
    let text = render_summary(&record);

    assert!(text.contains("0 class(es) and 0 top-level function(s)"));
    assert!(text.contains("Overall complexity: simple (score: 0)."));
    assert!(!text.contains("Inheritance:"));
    assert!(!text.contains("Key dependencies:"));
}

// ============================================================================
// Report Generation Tests
// ============================================================================

#[test]
fn test_html_report_generation() {
    let record = analyze_source(SAMPLE).expect("Analysis failed");

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let generator = ReportGenerator::new(ReportConfig {
        output_dir: output_dir.path().to_path_buf(),
        title: "Sample".to_string(),
        include_diagrams: true,
    })
    .expect("Failed to create generator");

    let page = generator.generate(&record).expect("Generation failed");
    assert!(page.exists());

    let html = std::fs::read_to_string(&page).expect("Failed to read report");
    assert!(html.contains("Sample"));
    assert!(html.contains("Animal"));
    assert!(html.contains("classDiagram"));

    assert!(output_dir.path().join("class_diagram.mmd").exists());
    assert!(output_dir.path().join("dependency_graph.mmd").exists());

    let mmd = std::fs::read_to_string(output_dir.path().join("class_diagram.mmd")).unwrap();
    assert!(mmd.starts_with("classDiagram"));
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[test]
fn test_parallel_analyses_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("class C{}:\n    pass\n", i);
                analyze_source(&source).expect("Analysis failed")
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let record = handle.join().expect("Thread panicked");
        assert_eq!(record.classes.len(), 1);
        assert_eq!(record.classes[0].name, format!("C{}", i));
    }
}
