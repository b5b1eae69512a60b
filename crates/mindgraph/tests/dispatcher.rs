//! Tests for routing tool instances by category

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{bail, Result};
use mindgraph::plugins::dispatcher::{
    MemoryDocumentStore, TextToolForm, ToolRegistry, DIAGRAM_CATEGORY,
};
use mindgraph::prelude::*;

/// Metadata source that counts lookups
struct CountingSource {
    categories: HashMap<String, String>,
    lookups: RefCell<usize>,
}

impl CountingSource {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            categories: entries
                .iter()
                .map(|(id, category)| (id.to_string(), category.to_string()))
                .collect(),
            lookups: RefCell::new(0),
        }
    }
}

impl ToolMetadataSource for CountingSource {
    fn fetch(&self, tool_id: &str) -> Result<ToolMetadata> {
        *self.lookups.borrow_mut() += 1;
        match self.categories.get(tool_id) {
            Some(category) => Ok(ToolMetadata {
                id: tool_id.to_string(),
                name: String::new(),
                category: category.clone(),
            }),
            None => bail!("catalog has no tool {}", tool_id),
        }
    }
}

/// Store whose reads always fail
struct BrokenStore;

impl DocumentStore for BrokenStore {
    fn load(&self, _tool_id: &str) -> Result<Option<String>> {
        bail!("storage offline")
    }

    fn save(&mut self, _tool_id: &str, _contents: &str) -> Result<()> {
        bail!("storage offline")
    }
}

#[test]
fn test_diagram_category_opens_engine() {
    let dispatcher = Dispatcher::new(CountingSource::new(&[("map", DIAGRAM_CATEGORY)]));
    let view = dispatcher
        .dispatch("map", &MemoryDocumentStore::new())
        .unwrap();
    assert_eq!(view.kind(), "diagram");
    assert_eq!(*dispatcher.source().lookups.borrow(), 1);
}

#[test]
fn test_other_categories_fall_back_to_text_form() {
    let dispatcher = Dispatcher::new(CountingSource::new(&[
        ("blog", "blog"),
        ("upper", "DIAGRAM"),
        ("spaced", "diagram "),
        ("empty", ""),
    ]));
    let store = MemoryDocumentStore::new();

    for (id, category) in [
        ("blog", "blog"),
        ("upper", "DIAGRAM"),
        ("spaced", "diagram "),
        ("empty", ""),
    ] {
        match dispatcher.dispatch(id, &store).unwrap() {
            ToolView::TextForm(form) => {
                assert_eq!(form.tool_id(), id);
                assert_eq!(form.category(), category);
            }
            ToolView::Diagram(_) => panic!("{} should not open the diagram engine", id),
        }
    }
}

#[test]
fn test_categorize_does_not_open_documents() {
    let dispatcher = Dispatcher::new(CountingSource::new(&[("map", "diagram"), ("faq", "faq")]));
    assert_eq!(dispatcher.categorize("map").unwrap(), ToolCategory::Diagram);
    assert_eq!(
        dispatcher.categorize("faq").unwrap(),
        ToolCategory::TextForm {
            category: "faq".to_string()
        }
    );
}

#[test]
fn test_metadata_failure_propagates_with_context() {
    let dispatcher = Dispatcher::new(CountingSource::new(&[]));
    let err = dispatcher
        .dispatch("ghost", &MemoryDocumentStore::new())
        .unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("ghost"));
    assert!(message.contains("catalog has no tool"));
}

#[test]
fn test_store_failure_only_matters_for_diagrams() {
    let dispatcher = Dispatcher::new(CountingSource::new(&[("map", "diagram"), ("blog", "blog")]));
    assert!(dispatcher.dispatch("map", &BrokenStore).is_err());
    assert!(dispatcher.dispatch("blog", &BrokenStore).is_ok());
}

#[test]
fn test_session_edits_persist() {
    let registry = ToolRegistry::from_json(r#"[{"id":"map","category":"diagram"}]"#).unwrap();
    let dispatcher = Dispatcher::new(registry);
    let mut store = MemoryDocumentStore::new();

    let mut session = match dispatcher.dispatch("map", &store).unwrap() {
        ToolView::Diagram(session) => session,
        other => panic!("unexpected view {}", other.kind()),
    };
    let doc = session.document_mut();
    doc.graph_mut()
        .add_node(NodeAttributes::new().label("Kept"))
        .unwrap();
    doc.set_theme("ocean").unwrap();
    session.save(&mut store).unwrap();

    let stored = store.load("map").unwrap().unwrap();
    assert!(stored.contains("\"ocean\""));

    let reopened = DiagramSession::open("map", &store).unwrap();
    assert_eq!(reopened.document(), session.document());
    assert_eq!(reopened.tool_id(), "map");
}

#[test]
fn test_registry_loading() {
    let registry = ToolRegistry::from_json(
        r#"[{"id":"a","name":"A","category":"diagram"},{"id":"b","category":"blog"}]"#,
    )
    .unwrap();
    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());
    assert_eq!(registry.fetch("b").unwrap().name, "");

    assert!(ToolRegistry::from_json(r#"{"id":"a"}"#).is_err());
    assert!(ToolRegistry::new().is_empty());
}

#[test]
fn test_text_form_keeps_metadata() {
    let form = TextToolForm {
        metadata: ToolMetadata {
            id: "faq".to_string(),
            name: "FAQ Writer".to_string(),
            category: "faq".to_string(),
        },
    };
    assert_eq!(form.tool_id(), "faq");
    assert_eq!(form.metadata.name, "FAQ Writer");
}
