//! Terminal color swatches for node colors
//!
//! Node colors are hex tokens; when colors are enabled they are painted as
//! truecolor ANSI sequences using crossterm.

use crossterm::style::{Color, Stylize};

/// Swatch glyph printed next to a node's color token
pub const SWATCH: &str = "■";

/// When to colorize output
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Decide whether to colorize, given where output is going
pub fn should_colorize(choice: ColorChoice, to_stdout: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            to_stdout && crossterm::tty::IsTty::is_tty(&std::io::stdout())
        }
    }
}

/// Parse a hex color token into RGB, ignoring any alpha channel
pub fn hex_to_rgb(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 | 4 => {
            let digit = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        6 | 8 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// Render a color token followed by a swatch painted in that color
pub fn swatch(token: &str, colorize: bool) -> String {
    match hex_to_rgb(token) {
        Some((r, g, b)) if colorize => {
            format!("{} {}", token, SWATCH.to_string().with(Color::Rgb { r, g, b }))
        }
        _ => token.to_string(),
    }
}
