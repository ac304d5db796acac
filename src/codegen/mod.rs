//! # Call Node Code Generation
//!
//! Python code generation for call nodes.

mod context;
mod node_handlers;
mod python_codegen;

pub use context::*;
pub use node_handlers::{callee_path, CalleePath, NO_VALUE};
pub use python_codegen::*;
