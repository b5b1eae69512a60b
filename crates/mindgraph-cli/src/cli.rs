//! Command-line interface for the mindgraph utility
//!
//! Each editing command loads a document file, applies one operation and
//! writes the document back. A failed operation leaves the file untouched.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::colorizer::{should_colorize, swatch, ColorChoice};
use mindgraph::core::logging::init_logging;
use mindgraph::core::{pad_to_width, single_line, truncate_label};
use mindgraph::plugins::dispatcher::ToolRegistry;
use mindgraph::plugins::mindmap::to_mermaid;
use mindgraph::prelude::*;

/// Widest label shown by `show` before truncation
const LABEL_COLUMN: usize = 24;

/// Mindgraph - Create, edit and export mind-map diagrams
#[derive(Parser)]
#[command(name = "mindgraph")]
#[command(about = "Create, edit, theme and export mind-map diagram documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (falls back to MINDGRAPH_LOG_LEVEL, RUST_LOG, then info)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (falls back to MINDGRAPH_LOG_FORMAT, then compact)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new document
    New {
        /// Output file for the document (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Starting content
        #[arg(long, value_enum, default_value_t = TemplateChoice::Blank)]
        template: TemplateChoice,

        /// Theme name
        #[arg(long, default_value = "default")]
        theme: String,
    },

    /// Add a node and print its id
    AddNode {
        /// Document file to edit
        file: PathBuf,

        #[command(flatten)]
        attributes: NodeOptions,
    },

    /// Change attributes of an existing node
    UpdateNode {
        /// Document file to edit
        file: PathBuf,

        /// Id of the node to change
        id: String,

        #[command(flatten)]
        attributes: NodeOptions,

        /// Remove the node's explicit color so it follows the theme
        #[arg(long, conflicts_with = "color")]
        clear_color: bool,
    },

    /// Remove a node and every edge touching it
    RemoveNode {
        /// Document file to edit
        file: PathBuf,

        /// Id of the node to remove
        id: String,
    },

    /// Connect two nodes and print the new edge id
    AddEdge {
        /// Document file to edit
        file: PathBuf,

        /// Source node id
        source: String,

        /// Target node id
        target: String,

        /// Edge label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Remove an edge
    RemoveEdge {
        /// Document file to edit
        file: PathBuf,

        /// Id of the edge to remove
        id: String,
    },

    /// Switch a document's theme
    Theme {
        /// Document file to edit
        file: PathBuf,

        /// Theme name (see `mindgraph themes`)
        name: String,
    },

    /// Print a document's nodes and edges
    Show {
        /// Document file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// When to paint color swatches
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Check that a document loads
    Validate {
        /// Document file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Export a document
    Export {
        /// Document file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Mermaid)]
        format: ExportFormat,
    },

    /// List available themes
    Themes {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Route a tool instance by its category
    Dispatch {
        /// Tool id to open
        #[arg(long)]
        tool: String,

        /// JSON file holding an array of tool metadata
        #[arg(long)]
        registry: PathBuf,

        /// Directory of stored documents, one `<tool id>.json` per tool
        #[arg(long)]
        store: PathBuf,
    },
}

/// Node attributes shared by `add-node` and `update-node`
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct NodeOptions {
    /// Node label
    #[arg(short, long)]
    pub label: Option<String>,

    /// Longer description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Explicit hex color such as #1e40af
    #[arg(long)]
    pub color: Option<String>,

    /// Label size
    #[arg(long, value_enum)]
    pub font_size: Option<FontSizeChoice>,

    /// Node outline
    #[arg(long, value_enum)]
    pub shape: Option<ShapeChoice>,

    /// Horizontal position
    #[arg(long, requires = "y", allow_hyphen_values = true)]
    pub x: Option<f64>,

    /// Vertical position
    #[arg(long, requires = "x", allow_hyphen_values = true)]
    pub y: Option<f64>,
}

impl NodeOptions {
    /// Convert to library attributes; unset options stay unset
    pub fn to_attributes(&self) -> NodeAttributes {
        let mut attributes = NodeAttributes::new();
        if let Some(label) = &self.label {
            attributes = attributes.label(label.as_str());
        }
        if let Some(description) = &self.description {
            attributes = attributes.description(description.as_str());
        }
        if let Some(color) = &self.color {
            attributes = attributes.color(color.as_str());
        }
        if let Some(font_size) = self.font_size {
            attributes = attributes.font_size(font_size.into());
        }
        if let Some(shape) = self.shape {
            attributes = attributes.shape(shape.into());
        }
        if let (Some(x), Some(y)) = (self.x, self.y) {
            attributes = attributes.position(x, y);
        }
        attributes
    }
}

/// Supported node shapes
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ShapeChoice {
    Rounded,
    Rectangle,
    Pill,
    Diamond,
    Hexagon,
}

impl From<ShapeChoice> for NodeShape {
    fn from(value: ShapeChoice) -> Self {
        match value {
            ShapeChoice::Rounded => NodeShape::Rounded,
            ShapeChoice::Rectangle => NodeShape::Rectangle,
            ShapeChoice::Pill => NodeShape::Pill,
            ShapeChoice::Diamond => NodeShape::Diamond,
            ShapeChoice::Hexagon => NodeShape::Hexagon,
        }
    }
}

/// Supported label sizes
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FontSizeChoice {
    Small,
    Medium,
    Large,
}

impl From<FontSizeChoice> for FontSize {
    fn from(value: FontSizeChoice) -> Self {
        match value {
            FontSizeChoice::Small => FontSize::Small,
            FontSizeChoice::Medium => FontSize::Medium,
            FontSizeChoice::Large => FontSize::Large,
        }
    }
}

/// Starter content for `new`
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum TemplateChoice {
    #[default]
    Blank,
    CentralIdea,
    Brainstorm,
}

impl From<TemplateChoice> for Template {
    fn from(value: TemplateChoice) -> Self {
        match value {
            TemplateChoice::Blank => Template::Blank,
            TemplateChoice::CentralIdea => Template::CentralIdea,
            TemplateChoice::Brainstorm => Template::Brainstorm,
        }
    }
}

/// Export formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Mermaid flowchart text
    #[default]
    Mermaid,
    /// Indented document JSON
    Json,
}

/// Document store backed by a directory of `<tool id>.json` files
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, tool_id: &str) -> Result<PathBuf> {
        if tool_id.is_empty() || tool_id.contains(['/', '\\']) || tool_id.starts_with('.') {
            return Err(anyhow!("Tool id '{}' cannot be used as a file name", tool_id));
        }
        Ok(self.root.join(format!("{}.json", tool_id)))
    }
}

impl DocumentStore for DirectoryStore {
    fn load(&self, tool_id: &str) -> Result<Option<String>> {
        let path = self.path_for(tool_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stored document '{}'", path.display()))?;
        Ok(Some(contents))
    }

    fn save(&mut self, tool_id: &str, contents: &str) -> Result<()> {
        let path = self.path_for(tool_id)?;
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create store '{}'", self.root.display()))?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write stored document '{}'", path.display()))
    }
}

/// Main CLI application
#[derive(Default)]
pub struct MindgraphApp {
    verbose: bool,
}

impl MindgraphApp {
    /// Create a new application instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        let log_level = cli.log_level.map(|l| l.as_str());
        let log_format = cli.log_format.map(|f| f.as_str());
        if let Err(e) = init_logging(log_level, log_format) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        self.verbose = cli.verbose;
        if self.verbose {
            eprintln!("Mindgraph v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::New {
                output,
                template,
                theme,
            } => self.new_command(output, template, &theme),
            Commands::AddNode { file, attributes } => {
                let id = self.edit_document(&file, |doc| {
                    doc.graph_mut().add_node(attributes.to_attributes())
                })?;
                println!("{}", id);
                Ok(())
            }
            Commands::UpdateNode {
                file,
                id,
                attributes,
                clear_color,
            } => {
                let mut update = attributes.to_attributes();
                if clear_color {
                    update = update.clear_color();
                }
                self.edit_document(&file, |doc| doc.graph_mut().update_node(&id, update))
            }
            Commands::RemoveNode { file, id } => {
                let removed = self.edit_document(&file, |doc| doc.graph_mut().remove_node(&id))?;
                if self.verbose {
                    eprintln!("Removed node {} ({})", removed.id, removed.data.label);
                }
                Ok(())
            }
            Commands::AddEdge {
                file,
                source,
                target,
                label,
            } => {
                let id = self.edit_document(&file, |doc| {
                    doc.graph_mut().add_edge(&source, &target, label.as_deref())
                })?;
                println!("{}", id);
                Ok(())
            }
            Commands::RemoveEdge { file, id } => {
                self.edit_document(&file, |doc| doc.graph_mut().remove_edge(&id).map(|_| ()))
            }
            Commands::Theme { file, name } => {
                self.edit_document(&file, |doc| doc.set_theme(&name))
            }
            Commands::Show { input, color } => self.show_command(input, color),
            Commands::Validate { input } => self.validate_command(input),
            Commands::Export {
                input,
                output,
                format,
            } => self.export_command(input, output, format),
            Commands::Themes { json } => self.themes_command(json),
            Commands::Dispatch {
                tool,
                registry,
                store,
            } => self.dispatch_command(&tool, &registry, store),
        }
    }

    /// Load `file`, apply `edit`, and write the document back on success
    pub fn edit_document<T>(
        &self,
        file: &Path,
        edit: impl FnOnce(&mut DiagramDocument) -> mindgraph::Result<T>,
    ) -> Result<T> {
        let mut document = self.load_file(file)?;
        let value = edit(&mut document)?;
        let contents = mindgraph::save(&document)?;
        fs::write(file, contents)
            .with_context(|| format!("Failed to write document '{}'", file.display()))?;
        debug!(file = %file.display(), "Document written");
        Ok(value)
    }

    fn load_file(&self, file: &Path) -> Result<DiagramDocument> {
        let contents = fs::read_to_string(file)
            .with_context(|| format!("Failed to read document '{}'", file.display()))?;
        if self.verbose {
            eprintln!("Read {} bytes of input", contents.len());
        }
        Ok(mindgraph::load(&contents)?)
    }

    fn load_input(&self, input: Option<PathBuf>) -> Result<DiagramDocument> {
        let contents = self.read_input(input)?;
        if self.verbose {
            eprintln!("Read {} bytes of input", contents.len());
        }
        Ok(mindgraph::load(&contents)?)
    }

    /// Handle the new command
    fn new_command(
        &self,
        output: Option<PathBuf>,
        template: TemplateChoice,
        theme: &str,
    ) -> Result<()> {
        let theme: Theme = theme.parse()?;
        let document = DiagramDocument::from_template(template.into(), theme)?;
        info!(template = ?template, theme = %theme, "Created document");
        self.write_output(output, &mindgraph::save(&document)?)
    }

    /// Handle the show command
    fn show_command(&self, input: Option<PathBuf>, color: ColorChoice) -> Result<()> {
        let document = self.load_input(input)?;
        let colorize = should_colorize(color, true);
        print!("{}", render_listing(&document, colorize));
        io::stdout().flush()?;
        Ok(())
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>) -> Result<()> {
        match self.load_input(input) {
            Ok(document) => {
                println!(
                    "✓ Valid document: {} nodes, {} edges, theme {}",
                    document.graph().node_count(),
                    document.graph().edge_count(),
                    document.theme()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid document: {}", e);
                Err(e)
            }
        }
    }

    /// Handle the export command
    fn export_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        format: ExportFormat,
    ) -> Result<()> {
        let document = self.load_input(input)?;
        let rendered = match format {
            ExportFormat::Mermaid => to_mermaid(&document),
            ExportFormat::Json => mindgraph::save(&document)?,
        };
        self.write_output(output, &rendered)
    }

    /// Handle the themes command
    fn themes_command(&self, json: bool) -> Result<()> {
        if json {
            let themes: Vec<_> = Theme::ALL
                .iter()
                .map(|theme| {
                    serde_json::json!({
                        "name": theme.as_str(),
                        "palette": theme.palette(),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "themes": themes,
                "total": Theme::ALL.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Available themes:");
            for theme in Theme::ALL {
                let palette = theme.palette();
                println!(
                    "  {} root {}  edge {}  background {}",
                    pad_to_width(theme.as_str(), 8),
                    palette.root,
                    palette.edge,
                    palette.background
                );
            }
            println!();
            println!("Total: {} themes", Theme::ALL.len());
        }
        Ok(())
    }

    /// Handle the dispatch command
    fn dispatch_command(&self, tool: &str, registry: &Path, store: PathBuf) -> Result<()> {
        let catalog = fs::read_to_string(registry)
            .with_context(|| format!("Failed to read registry '{}'", registry.display()))?;
        let dispatcher = Dispatcher::new(ToolRegistry::from_json(&catalog)?);
        let store = DirectoryStore::new(store);

        match dispatcher.dispatch(tool, &store)? {
            ToolView::Diagram(session) => {
                let document = session.document();
                println!(
                    "diagram: {} ({} nodes, {} edges, theme {})",
                    session.tool_id(),
                    document.graph().node_count(),
                    document.graph().edge_count(),
                    document.theme()
                );
            }
            ToolView::TextForm(form) => {
                println!("text-form: {} (category {})", form.tool_id(), form.category());
            }
        }
        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                if content.is_empty() || content.ends_with('\n') {
                    print!("{}", content);
                } else {
                    println!("{}", content);
                }
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

/// Human-readable listing of a document
pub fn render_listing(document: &DiagramDocument, colorize: bool) -> String {
    let graph = document.graph();
    let mut out = format!("Theme: {}\n", document.theme());

    out.push_str(&format!("Nodes ({}):\n", graph.node_count()));
    let id_width = graph
        .nodes()
        .map(|n| n.id.as_str().len())
        .chain(graph.edges().map(|e| e.id.as_str().len()))
        .max()
        .unwrap_or(0);
    for styled in document.styled_nodes() {
        let label = truncate_label(&single_line(&styled.node.data.label), LABEL_COLUMN);
        let marker = if styled.explicit { "*" } else { " " };
        out.push_str(&format!(
            "  {}  {}  {}  {}{}\n",
            pad_to_width(styled.node.id.as_str(), id_width),
            pad_to_width(&label, LABEL_COLUMN),
            pad_to_width(&styled.node.data.shape.to_string(), 9),
            swatch(&styled.effective_color, colorize),
            marker
        ));
    }

    out.push_str(&format!("Edges ({}):\n", graph.edge_count()));
    for edge in graph.edges() {
        let line = format!(
            "  {}  {} -> {}",
            pad_to_width(edge.id.as_str(), id_width),
            edge.source,
            edge.target
        );
        match &edge.label {
            Some(label) => out.push_str(&format!("{}  {}\n", line, single_line(label))),
            None => out.push_str(&format!("{}\n", line)),
        }
    }
    out
}
