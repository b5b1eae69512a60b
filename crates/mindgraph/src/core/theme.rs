//! Theme catalog
//!
//! A fixed set of named palettes. Resolution is a pure lookup with no state,
//! so it can be called from any thread.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::{DiagramError, Result};

/// Named visual theme of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Theme {
    #[default]
    Default,
    Ocean,
    Forest,
    Sunset,
    Purple,
}

impl Theme {
    /// Every theme, in catalog order
    pub const ALL: [Theme; 5] = [
        Theme::Default,
        Theme::Ocean,
        Theme::Forest,
        Theme::Sunset,
        Theme::Purple,
    ];

    /// Wire name of the theme
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
            Theme::Sunset => "sunset",
            Theme::Purple => "purple",
        }
    }

    /// Default visual tokens for this theme
    pub fn palette(&self) -> &'static StylePalette {
        match self {
            Theme::Default => &DEFAULT_PALETTE,
            Theme::Ocean => &OCEAN_PALETTE,
            Theme::Forest => &FOREST_PALETTE,
            Theme::Sunset => &SUNSET_PALETTE,
            Theme::Purple => &PURPLE_PALETTE,
        }
    }
}

impl FromStr for Theme {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| DiagramError::unknown_theme(s))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default visual tokens of a theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylePalette {
    /// Color of the first (root) node
    pub root: &'static str,
    /// Colors cycled through for the remaining nodes
    pub branches: &'static [&'static str],
    /// Edge stroke color
    pub edge: &'static str,
    /// Canvas background
    pub background: &'static str,
    /// Label color
    pub text: &'static str,
}

impl StylePalette {
    /// Theme-derived color for the node at `index` in document order
    pub fn node_color(&self, index: usize) -> &'static str {
        if index == 0 || self.branches.is_empty() {
            self.root
        } else {
            self.branches[(index - 1) % self.branches.len()]
        }
    }
}

static DEFAULT_PALETTE: StylePalette = StylePalette {
    root: "#3b82f6",
    branches: &["#60a5fa", "#34d399", "#fbbf24", "#f87171", "#a78bfa"],
    edge: "#94a3b8",
    background: "#ffffff",
    text: "#1f2937",
};

static OCEAN_PALETTE: StylePalette = StylePalette {
    root: "#0369a1",
    branches: &["#0ea5e9", "#06b6d4", "#14b8a6", "#38bdf8", "#67e8f9"],
    edge: "#0284c7",
    background: "#f0f9ff",
    text: "#0c4a6e",
};

static FOREST_PALETTE: StylePalette = StylePalette {
    root: "#15803d",
    branches: &["#22c55e", "#65a30d", "#84cc16", "#4ade80", "#a3e635"],
    edge: "#166534",
    background: "#f0fdf4",
    text: "#14532d",
};

static SUNSET_PALETTE: StylePalette = StylePalette {
    root: "#c2410c",
    branches: &["#f97316", "#f59e0b", "#ef4444", "#fb923c", "#fcd34d"],
    edge: "#ea580c",
    background: "#fff7ed",
    text: "#7c2d12",
};

static PURPLE_PALETTE: StylePalette = StylePalette {
    root: "#7e22ce",
    branches: &["#a855f7", "#c084fc", "#8b5cf6", "#d946ef", "#e879f9"],
    edge: "#9333ea",
    background: "#faf5ff",
    text: "#581c87",
};

/// Resolve a theme name to its palette
///
/// Fails with `UnknownTheme` for names outside the fixed enumeration.
pub fn resolve(theme: &str) -> Result<&'static StylePalette> {
    Ok(theme.parse::<Theme>()?.palette())
}
