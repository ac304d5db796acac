//! Definition nodes and component instances owned by the graph.

use super::node::{FunctionArg, NodeId, ReturnType};
use serde::{Deserialize, Serialize};

/// A user-authored method signature. The single source of truth for the name,
/// return type and argument list of every call node that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionNode {
    pub id: NodeId,
    /// Label shown on call nodes.
    pub display_name: String,
    /// Identifier used in generated code.
    pub emitted_name: String,
    pub return_type: ReturnType,
    /// Implicit receiver (`self`), hidden from callers.
    pub receiver: Option<FunctionArg>,
    pub params: Vec<FunctionArg>,
}

impl DefinitionNode {
    /// A method with a `self` receiver.
    pub fn method(
        id: impl Into<NodeId>,
        display_name: impl Into<String>,
        emitted_name: impl Into<String>,
        return_type: ReturnType,
        params: Vec<FunctionArg>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            emitted_name: emitted_name.into(),
            return_type,
            receiver: Some(FunctionArg::new("self", "")),
            params,
        }
    }

    /// Every declared argument, receiver first.
    pub fn args(&self) -> impl Iterator<Item = &FunctionArg> {
        self.receiver.iter().chain(self.params.iter())
    }

    /// The arguments a caller supplies.
    pub fn caller_args(&self) -> &[FunctionArg] {
        &self.params
    }
}

/// A named, typed attachment point (a robot subsystem, a motor, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    #[serde(rename = "blockId")]
    pub id: NodeId,
    pub name: String,
    pub class_name: String,
}

impl ComponentInstance {
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class_name: class_name.into(),
        }
    }
}
