//! # Extra-State Codec
//!
//! Saves and loads the variant-specific payload of a call node. Saved records
//! omit every optional field that holds its empty value, and loading supplies
//! defaults for whatever an older payload lacks.

use crate::error::Result;
use crate::model::{
    CallKind, CallNode, ComponentInstance, FunctionArg, NodeId, ReturnType, FIELD_COMPONENT_NAME,
};
use serde::{Deserialize, Serialize};

/// Persisted payload of one call node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraState {
    /// One of the [`CallKind`] strings. Kept as a string so an unknown kind
    /// surfaces as [`crate::CompileError::UnknownCallKind`] on load.
    #[serde(alias = "kind")]
    pub function_kind: String,
    /// `"None"` for no return value, `""` for an untyped return value.
    pub return_type: String,
    #[serde(default)]
    pub args: Vec<FunctionArg>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tooltip: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub import_module: String,
    #[serde(default, alias = "actualCalleeName", skip_serializing_if = "String::is_empty")]
    pub actual_function_name: String,
    #[serde(default, alias = "calleeDefinitionId", skip_serializing_if = "Option::is_none")]
    pub class_method_def_block_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component_name: String,
    #[serde(default, alias = "componentTypeName", skip_serializing_if = "String::is_empty")]
    pub component_class_name: String,
    #[serde(default, alias = "componentId", skip_serializing_if = "Option::is_none")]
    pub component_block_id: Option<NodeId>,
}

impl ExtraState {
    pub fn new(kind: CallKind, return_type: &ReturnType) -> Self {
        Self {
            function_kind: kind.as_str().to_string(),
            return_type: return_type.as_persisted().to_string(),
            args: Vec::new(),
            tooltip: String::new(),
            import_module: String::new(),
            actual_function_name: String::new(),
            class_method_def_block_id: None,
            component_name: String::new(),
            component_class_name: String::new(),
            component_block_id: None,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Returns the state of a node as a record suitable for persisting.
pub fn save_extra_state(node: &CallNode) -> ExtraState {
    let mut state = ExtraState::new(node.kind, &node.return_type);
    state.args = node.args.clone();
    state.tooltip = node.tooltip.clone();
    state.import_module = node.import_module.clone();
    state.actual_function_name = node.actual_callee_name.clone();
    state.class_method_def_block_id = node.callee_definition_id.clone();
    state.component_class_name = node.component_type_name.clone();
    state.component_name = node.component_name().to_string();
    state.component_block_id = node.selected_component_id();
    state
}

/// Applies a persisted record to a node.
///
/// `live_components` is the host's current component list; the node's cached
/// choices are re-derived from it rather than trusted from the payload.
pub fn load_extra_state(
    node: &mut CallNode,
    state: &ExtraState,
    live_components: &[ComponentInstance],
) -> Result<()> {
    node.kind = state.function_kind.parse::<CallKind>()?;
    node.return_type = ReturnType::from_persisted(&state.return_type);
    node.args = state.args.clone();
    node.tooltip = state.tooltip.clone();
    node.import_module = state.import_module.clone();
    node.actual_callee_name = state.actual_function_name.clone();
    node.callee_definition_id = state.class_method_def_block_id.clone();
    node.component_type_name = state.component_class_name.clone();
    node.component_id = state.component_block_id.clone();

    node.components = live_components
        .iter()
        .filter(|component| component.class_name == node.component_type_name)
        .cloned()
        .collect();

    // A bound component that was renamed while the node was unloaded shows
    // its live name.
    let name = node
        .target_component()
        .map(|component| component.name.clone())
        .unwrap_or_else(|| state.component_name.clone());
    if !name.is_empty() {
        node.set_field(FIELD_COMPONENT_NAME, name);
    }

    tracing::debug!(
        "[CODEC] Loaded {} node {} ({} args, {} component choices)",
        node.kind,
        node.id,
        node.args.len(),
        node.components.len()
    );
    Ok(())
}

/// Builds a fresh node from a persisted record.
pub fn node_from_extra_state(
    id: impl Into<NodeId>,
    state: &ExtraState,
    live_components: &[ComponentInstance],
) -> Result<CallNode> {
    let kind = state.function_kind.parse::<CallKind>()?;
    let mut node = CallNode::new(id, kind);
    load_extra_state(&mut node, state, live_components)?;
    Ok(node)
}
