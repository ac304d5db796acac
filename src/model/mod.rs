//! # Block Graph Model
//!
//! Call nodes, the definitions and components they reference, and the closed
//! set of call kinds.

mod call_kind;
mod definition;
mod node;

pub use call_kind::CallKind;
pub use definition::{ComponentInstance, DefinitionNode};
pub use node::*;
