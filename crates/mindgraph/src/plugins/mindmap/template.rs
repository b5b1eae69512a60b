//! Starter layouts for new documents

use std::fmt;
use std::str::FromStr;

use crate::core::{DiagramError, FontSize, NodeAttributes, NodeShape, Result};

use super::database::MindMapDatabase;

/// Starting content for a new document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Template {
    /// No nodes
    #[default]
    Blank,
    /// A single root idea at the origin
    CentralIdea,
    /// A root idea with three connected branches
    Brainstorm,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Blank, Template::CentralIdea, Template::Brainstorm];

    /// Build the template's graph
    ///
    /// Fails only if a template's own attributes are invalid.
    pub(crate) fn build(&self) -> Result<MindMapDatabase> {
        let mut graph = MindMapDatabase::new();
        match self {
            Template::Blank => {}
            Template::CentralIdea => {
                graph.add_node(root("Central Idea"))?;
            }
            Template::Brainstorm => {
                let root_id = graph.add_node(root("Main Topic"))?;
                let branches = [(-240.0, 160.0), (0.0, 200.0), (240.0, 160.0)];
                for (i, (x, y)) in branches.into_iter().enumerate() {
                    let branch = NodeAttributes::new()
                        .label(format!("Idea {}", i + 1))
                        .position(x, y);
                    let branch_id = graph.add_node(branch)?;
                    graph.add_edge(root_id.as_str(), branch_id.as_str(), None)?;
                }
            }
        }
        Ok(graph)
    }
}

fn root(label: &str) -> NodeAttributes {
    NodeAttributes::new()
        .label(label)
        .shape(NodeShape::Pill)
        .font_size(FontSize::Large)
        .position(0.0, 0.0)
}

impl FromStr for Template {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blank" => Ok(Template::Blank),
            "central-idea" => Ok(Template::CentralIdea),
            "brainstorm" => Ok(Template::Brainstorm),
            _ => Err(DiagramError::invalid_attribute(
                "template",
                s,
                "expected one of blank, central-idea, brainstorm",
            )),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Blank => write!(f, "blank"),
            Template::CentralIdea => write!(f, "central-idea"),
            Template::Brainstorm => write!(f, "brainstorm"),
        }
    }
}
