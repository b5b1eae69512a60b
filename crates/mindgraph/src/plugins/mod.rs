//! Plugin implementations built on the core types
//!
//! - `mindmap`: the diagram engine (Graph Store, document, persistence)
//! - `dispatcher`: routes tool instances to the diagram engine or the
//!   generic text-tool form

pub mod dispatcher;
pub mod mindmap;

pub use dispatcher::*;
pub use mindmap::*;
