//! Category dispatcher for tool instances
//!
//! Given a tool id, the dispatcher fetches the tool's metadata and routes on
//! its category: `"diagram"` opens a mind-map session, every other category
//! falls back to the generic text-tool form. Metadata lookup and document
//! storage are external collaborators behind the [`ToolMetadataSource`] and
//! [`DocumentStore`] traits.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, span, Level};

use crate::plugins::mindmap::{deserialize, DiagramDocument};

/// Category name that selects the diagram engine
pub const DIAGRAM_CATEGORY: &str = "diagram";

/// Metadata describing one tool instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub category: String,
}

/// Source of tool metadata, e.g. a remote catalog
pub trait ToolMetadataSource {
    /// Fetch metadata for `tool_id`
    fn fetch(&self, tool_id: &str) -> Result<ToolMetadata>;
}

/// Storage of serialized documents keyed by tool id
pub trait DocumentStore {
    /// Load the stored document for `tool_id`, if any
    fn load(&self, tool_id: &str) -> Result<Option<String>>;

    /// Store `contents` as the document for `tool_id`
    fn save(&mut self, tool_id: &str, contents: &str) -> Result<()>;
}

/// Renderer family a tool is routed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToolCategory {
    /// The mind-map engine
    Diagram,
    /// Fallback: the generic text-tool form, keeping the original category name
    TextForm { category: String },
}

impl ToolCategory {
    /// Classify a category name; only an exact `"diagram"` selects the engine
    pub fn from_name(name: &str) -> Self {
        match name {
            DIAGRAM_CATEGORY => ToolCategory::Diagram,
            other => ToolCategory::TextForm {
                category: other.to_string(),
            },
        }
    }

    pub fn is_diagram(&self) -> bool {
        matches!(self, ToolCategory::Diagram)
    }
}

/// An open diagram editing session for one tool instance
#[derive(Debug, Clone)]
pub struct DiagramSession {
    tool_id: String,
    document: DiagramDocument,
}

impl DiagramSession {
    /// Open the stored document for `tool_id`, or start an empty one
    pub fn open(tool_id: &str, store: &dyn DocumentStore) -> Result<Self> {
        let document = match store.load(tool_id)? {
            Some(contents) => deserialize(&contents)
                .with_context(|| format!("Stored document for tool '{}' is invalid", tool_id))?,
            None => {
                debug!(tool_id, "No stored document, starting empty");
                DiagramDocument::new()
            }
        };
        Ok(Self {
            tool_id: tool_id.to_string(),
            document,
        })
    }

    pub fn tool_id(&self) -> &str {
        &self.tool_id
    }

    pub fn document(&self) -> &DiagramDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut DiagramDocument {
        &mut self.document
    }

    /// Persist the current document under this session's tool id
    pub fn save(&self, store: &mut dyn DocumentStore) -> Result<()> {
        let contents = self.document.to_json()?;
        store.save(&self.tool_id, &contents)?;
        info!(tool_id = %self.tool_id, bytes = contents.len(), "Diagram saved");
        Ok(())
    }
}

/// A tool routed to the generic text-tool form renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToolForm {
    pub metadata: ToolMetadata,
}

impl TextToolForm {
    pub fn tool_id(&self) -> &str {
        &self.metadata.id
    }

    pub fn category(&self) -> &str {
        &self.metadata.category
    }
}

/// Result of dispatching a tool id
#[derive(Debug, Clone)]
pub enum ToolView {
    Diagram(DiagramSession),
    TextForm(TextToolForm),
}

impl ToolView {
    /// Short name of the selected renderer
    pub fn kind(&self) -> &'static str {
        match self {
            ToolView::Diagram(_) => "diagram",
            ToolView::TextForm(_) => "text-form",
        }
    }
}

/// Routes tool ids to the renderer matching their category
pub struct Dispatcher<S> {
    source: S,
}

impl<S: ToolMetadataSource> Dispatcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Borrow the metadata source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Classify `tool_id` without opening anything
    pub fn categorize(&self, tool_id: &str) -> Result<ToolCategory> {
        let metadata = self.source.fetch(tool_id)?;
        Ok(ToolCategory::from_name(&metadata.category))
    }

    /// Fetch metadata for `tool_id` and open the matching view
    pub fn dispatch(&self, tool_id: &str, store: &dyn DocumentStore) -> Result<ToolView> {
        let dispatch_span = span!(Level::INFO, "dispatch_tool", tool_id);
        let _enter = dispatch_span.enter();

        let metadata = self
            .source
            .fetch(tool_id)
            .with_context(|| format!("Failed to fetch metadata for tool '{}'", tool_id))?;

        let view = match ToolCategory::from_name(&metadata.category) {
            ToolCategory::Diagram => ToolView::Diagram(DiagramSession::open(tool_id, store)?),
            ToolCategory::TextForm { .. } => ToolView::TextForm(TextToolForm { metadata }),
        };
        info!(renderer = view.kind(), "Tool dispatched");
        Ok(view)
    }
}

/// In-memory metadata catalog
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolMetadata>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a JSON array of tool metadata
    pub fn from_json(input: &str) -> Result<Self> {
        let tools: Vec<ToolMetadata> =
            serde_json::from_str(input).context("Tool registry is not a JSON array of tools")?;
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool);
        }
        Ok(registry)
    }

    /// Add or replace a tool's metadata
    pub fn register(&mut self, metadata: ToolMetadata) {
        self.tools.insert(metadata.id.clone(), metadata);
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl ToolMetadataSource for ToolRegistry {
    fn fetch(&self, tool_id: &str) -> Result<ToolMetadata> {
        self.tools
            .get(tool_id)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown tool: {}", tool_id))
    }
}

/// In-memory document store
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: HashMap<String, String>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn load(&self, tool_id: &str) -> Result<Option<String>> {
        Ok(self.documents.get(tool_id).cloned())
    }

    fn save(&mut self, tool_id: &str, contents: &str) -> Result<()> {
        self.documents
            .insert(tool_id.to_string(), contents.to_string());
        Ok(())
    }
}
