//! Core abstractions for mind-map diagrams
//!
//! Types, errors, the theme catalog and the database trait shared by every
//! part of the crate. Nothing in here performs I/O.

mod database;
mod error;
pub mod logging;
mod text;
pub mod theme;
mod types;

pub use database::*;
pub use error::*;
pub use logging::*;
pub use text::*;
pub use theme::{resolve, StylePalette, Theme};
pub use types::*;
