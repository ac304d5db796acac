//! # Call Node Factory
//!
//! Builds ready-to-place call nodes for each call kind from library function
//! metadata, method definitions in the graph, or robot components.

use crate::model::{
    CallKind, CallNode, ComponentInstance, DefinitionNode, FunctionArg, NodeId, ReturnType,
    FIELD_COMPONENT_NAME, FIELD_FUNCTION_NAME, FIELD_MODULE_OR_CLASS_NAME,
};
use serde::{Deserialize, Serialize};

/// Metadata for one library function, as published by the Python API
/// description files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionData {
    pub function_name: String,
    #[serde(default)]
    pub tooltip: String,
    pub return_type: String,
    #[serde(default)]
    pub args: Vec<ArgData>,
    /// Empty for module-level functions.
    #[serde(default)]
    pub declaring_class_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgData {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
}

impl ArgData {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Label for the receiver socket of an instance method: `wpilib.Timer`
/// gives `myTimer`.
pub fn self_arg_name(declaring_class_name: &str) -> String {
    let class = declaring_class_name
        .rsplit('.')
        .next()
        .unwrap_or(declaring_class_name);
    format!("my{}", class)
}

fn node(id: impl Into<NodeId>, kind: CallKind, return_type: &str, tooltip: &str) -> CallNode {
    let mut node = CallNode::new(id, kind);
    node.return_type = ReturnType::from_persisted(return_type);
    node.tooltip = tooltip.to_string();
    node
}

/// Converts library args, relabelling a leading `self` after its class.
fn process_args(args: &[ArgData], declaring_class_name: &str) -> Vec<FunctionArg> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| {
            let name = if i == 0 && arg.name == "self" && !declaring_class_name.is_empty() {
                self_arg_name(declaring_class_name)
            } else {
                arg.name.clone()
            };
            FunctionArg::new(name, arg.ty.clone())
        })
        .collect()
}

pub fn built_in_node(id: impl Into<NodeId>, function: &FunctionData) -> CallNode {
    let mut node = node(id, CallKind::BuiltIn, &function.return_type, &function.tooltip);
    node.set_field(FIELD_FUNCTION_NAME, function.function_name.as_str());
    node.args = process_args(&function.args, &function.declaring_class_name);
    node
}

pub fn module_function_node(
    id: impl Into<NodeId>,
    module_name: &str,
    function: &FunctionData,
) -> CallNode {
    qualified_node(id, CallKind::Module, module_name, module_name, function)
}

/// `None` when the function has no declaring class.
pub fn static_method_node(
    id: impl Into<NodeId>,
    import_module: &str,
    function: &FunctionData,
) -> Option<CallNode> {
    if function.declaring_class_name.is_empty() {
        return None;
    }
    Some(qualified_node(
        id,
        CallKind::Static,
        import_module,
        &function.declaring_class_name,
        function,
    ))
}

fn qualified_node(
    id: impl Into<NodeId>,
    kind: CallKind,
    import_module: &str,
    owner: &str,
    function: &FunctionData,
) -> CallNode {
    let mut node = node(id, kind, &function.return_type, &function.tooltip);
    node.import_module = import_module.to_string();
    node.set_field(FIELD_MODULE_OR_CLASS_NAME, owner);
    node.set_field(FIELD_FUNCTION_NAME, function.function_name.as_str());
    node.args = process_args(&function.args, &function.declaring_class_name);
    node
}

pub fn constructor_node(
    id: impl Into<NodeId>,
    import_module: &str,
    function: &FunctionData,
) -> CallNode {
    let mut node = node(id, CallKind::Constructor, &function.return_type, &function.tooltip);
    node.import_module = import_module.to_string();
    node.set_field(FIELD_MODULE_OR_CLASS_NAME, function.declaring_class_name.as_str());
    node.args = process_args(&function.args, &function.declaring_class_name);
    node
}

pub fn instance_method_node(id: impl Into<NodeId>, function: &FunctionData) -> CallNode {
    let mut node = node(id, CallKind::Instance, &function.return_type, &function.tooltip);
    node.set_field(FIELD_MODULE_OR_CLASS_NAME, function.declaring_class_name.as_str());
    node.set_field(FIELD_FUNCTION_NAME, function.function_name.as_str());
    node.args = process_args(&function.args, &function.declaring_class_name);
    node
}

/// A call to a method defined in the module being edited.
pub fn instance_within_node(id: impl Into<NodeId>, definition: &DefinitionNode) -> CallNode {
    let mut node = definition_node(id, CallKind::InstanceWithin, definition);
    node.actual_callee_name = definition.emitted_name.clone();
    node
}

/// A call to a method defined on the robot.
pub fn instance_robot_node(id: impl Into<NodeId>, definition: &DefinitionNode) -> CallNode {
    let mut node = definition_node(id, CallKind::InstanceRobot, definition);
    node.actual_callee_name = definition.emitted_name.clone();
    node
}

pub fn event_node(id: impl Into<NodeId>, definition: &DefinitionNode) -> CallNode {
    definition_node(id, CallKind::Event, definition)
}

fn definition_node(id: impl Into<NodeId>, kind: CallKind, definition: &DefinitionNode) -> CallNode {
    let mut node = CallNode::new(id, kind);
    node.return_type = definition.return_type.clone();
    node.callee_definition_id = Some(definition.id.clone());
    node.set_field(FIELD_FUNCTION_NAME, definition.display_name.as_str());
    node.args = definition.caller_args().to_vec();
    node
}

/// A call to `function` on `component`. The component itself is the
/// receiver, so the leading `self` argument is dropped.
pub fn component_method_node(
    id: impl Into<NodeId>,
    component: &ComponentInstance,
    function: &FunctionData,
) -> CallNode {
    let mut node = node(
        id,
        CallKind::InstanceComponent,
        &function.return_type,
        &function.tooltip,
    );
    node.component_id = Some(component.id.clone());
    node.component_type_name = component.class_name.clone();
    node.components = vec![component.clone()];
    node.set_field(FIELD_COMPONENT_NAME, component.name.as_str());
    node.set_field(FIELD_FUNCTION_NAME, function.function_name.as_str());
    node.args = process_args(function.args.get(1..).unwrap_or_default(), "");
    node
}
