//! # Call-Site Synchronization
//!
//! Keeps call nodes consistent with the definitions and components they
//! reference. Renames are repaired silently. Signature changes are repaired
//! and flagged. Lost references are flagged and the node is kept.
//!
//! Every repaired node is snapshotted before and after; when the persisted
//! state differs, exactly one [`StructuralChange`] is fired with undo
//! recording suspended.

use crate::codec::save_extra_state;
use crate::host::{BlockHost, StructuralChange, UndoSuppressed};
use crate::model::{
    CallKind, CallNode, ComponentInstance, DefinitionNode, NodeId, FIELD_COMPONENT_NAME,
    FIELD_FUNCTION_NAME,
};

pub const WARNING_COMPONENT_MISSING: &str =
    "This block calls a method on a component that no longer exists.";
pub const WARNING_METHOD_MISSING: &str = "This block calls a method that no longer exists.";
pub const WARNING_RETURN_TYPE_CHANGED: &str =
    "This block calls a method whose return type has changed.";
pub const WARNING_ARGS_CHANGED: &str = "This block calls a method whose arguments have changed.";

/// Result of synchronizing one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSync {
    pub node: NodeId,
    /// Whether the node's persisted state changed (and a change was fired).
    pub changed: bool,
    /// Whether a displayed label (function or component name) was updated.
    pub relabelled: bool,
    /// The node's warning after the pass.
    pub warning: Option<String>,
}

/// Per-node outcomes of one pass, in workspace order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub nodes: Vec<NodeSync>,
}

impl SyncReport {
    pub fn changed(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().filter(|n| n.changed).map(|n| &n.node)
    }

    pub fn relabelled(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().filter(|n| n.relabelled).map(|n| &n.node)
    }

    pub fn warned(&self) -> impl Iterator<Item = &NodeSync> {
        self.nodes.iter().filter(|n| n.warning.is_some())
    }

    pub fn is_clean(&self) -> bool {
        self.warned().next().is_none()
    }

    pub fn outcome(&self, id: &NodeId) -> Option<&NodeSync> {
        self.nodes.iter().find(|n| &n.node == id)
    }
}

/// Repairs every caller of `definition` after it was renamed or its
/// signature edited.
pub fn on_definition_changed<H: BlockHost + ?Sized>(
    host: &mut H,
    definition: &DefinitionNode,
) -> SyncReport {
    let callers = callers_of(host, &definition.id);
    tracing::info!(
        "[SYNC] Definition '{}' changed, {} caller(s)",
        definition.display_name,
        callers.len()
    );
    run_pass(host, &callers, |node| repair_from_definition(node, Some(definition)))
}

/// Flags every caller of a deleted definition.
pub fn on_definition_deleted<H: BlockHost + ?Sized>(host: &mut H, id: &NodeId) -> SyncReport {
    let callers = callers_of(host, id);
    tracing::info!("[SYNC] Definition {} deleted, {} caller(s)", id, callers.len());
    run_pass(host, &callers, |node| repair_from_definition(node, None))
}

/// Re-derives component choices on every component-method node and follows
/// renamed components.
pub fn on_components_changed<H: BlockHost + ?Sized>(host: &mut H) -> SyncReport {
    let live = host.components().to_vec();
    let targets: Vec<NodeId> = host
        .call_node_ids()
        .into_iter()
        .filter(|id| {
            host.call_node(id)
                .map_or(false, |node| node.kind == CallKind::InstanceComponent)
        })
        .collect();
    tracing::info!(
        "[SYNC] Components changed ({} live), {} component caller(s)",
        live.len(),
        targets.len()
    );
    run_pass(host, &targets, |node| repair_component(node, &live))
}

/// Full pass over every call node, as run after the graph is loaded.
pub fn synchronize<H: BlockHost + ?Sized>(host: &mut H) -> SyncReport {
    let live = host.components().to_vec();
    let definitions = host.definitions().to_vec();
    let ids = host.call_node_ids();
    tracing::info!(
        "[SYNC] Synchronizing {} call node(s) against {} definition(s)",
        ids.len(),
        definitions.len()
    );
    run_pass(host, &ids, |node| match node.kind {
        CallKind::InstanceComponent => repair_component(node, &live),
        kind if kind.is_definition_bound() => {
            let definition = node
                .callee_definition_id
                .as_ref()
                .and_then(|id| definitions.iter().find(|def| &def.id == id));
            repair_from_definition(node, definition)
        }
        _ => Vec::new(),
    })
}

fn callers_of<H: BlockHost + ?Sized>(host: &H, definition: &NodeId) -> Vec<NodeId> {
    host.call_node_ids()
        .into_iter()
        .filter(|id| {
            host.call_node(id).map_or(false, |node| {
                node.kind.is_definition_bound()
                    && node.callee_definition_id.as_ref() == Some(definition)
            })
        })
        .collect()
}

fn run_pass<H, F>(host: &mut H, ids: &[NodeId], mut repair: F) -> SyncReport
where
    H: BlockHost + ?Sized,
    F: FnMut(&mut CallNode) -> Vec<String>,
{
    let mut report = SyncReport::default();
    for id in ids {
        match sync_node(host, id, &mut repair) {
            Some(outcome) => report.nodes.push(outcome),
            None => tracing::warn!("[SYNC] Call node {} vanished during the pass", id),
        }
    }
    tracing::info!(
        "[SYNC] Pass complete: {} changed, {} with warnings",
        report.changed().count(),
        report.warned().count()
    );
    report
}

fn sync_node<H, F>(host: &mut H, id: &NodeId, repair: &mut F) -> Option<NodeSync>
where
    H: BlockHost + ?Sized,
    F: FnMut(&mut CallNode) -> Vec<String>,
{
    let node = host.call_node_mut(id)?;
    let before = save_extra_state(node);
    let labels_before = labels(node);
    let warnings = repair(node);
    node.set_warnings(&warnings);
    let after = save_extra_state(node);
    let relabelled = labels(node) != labels_before;
    let warning = node.warning().map(str::to_string);

    if let Some(text) = &warning {
        tracing::warn!("[SYNC] {} node {}: {}", node.kind, id, text.replace("\n\n", " "));
    }

    let changed = before != after;
    if changed {
        tracing::debug!("[SYNC] Node {} repaired", id);
        let mut host = UndoSuppressed::new(host);
        host.fire_structural_change(StructuralChange {
            node: id.clone(),
            before,
            after,
        });
    }

    Some(NodeSync {
        node: id.clone(),
        changed,
        relabelled,
        warning,
    })
}

fn labels(node: &CallNode) -> (String, String) {
    (node.function_name().to_string(), node.component_name().to_string())
}

/// Brings a definition-bound node in line with its definition and returns
/// the pass-scoped warnings it should carry. Signature changes are latched on
/// the node instead. `None` means the definition is gone.
fn repair_from_definition(node: &mut CallNode, definition: Option<&DefinitionNode>) -> Vec<String> {
    let Some(definition) = definition else {
        return vec![WARNING_METHOD_MISSING.to_string()];
    };

    node.set_field(FIELD_FUNCTION_NAME, definition.display_name.as_str());
    if node.kind == CallKind::InstanceRobot || !node.actual_callee_name.is_empty() {
        node.actual_callee_name = definition.emitted_name.clone();
    }

    // Latched until acknowledged.
    if node.return_type != definition.return_type {
        node.return_type = definition.return_type.clone();
        node.latch_warning(WARNING_RETURN_TYPE_CHANGED);
    }
    if node.args.as_slice() != definition.caller_args() {
        node.args = definition.caller_args().to_vec();
        node.latch_warning(WARNING_ARGS_CHANGED);
    }
    Vec::new()
}

fn repair_component(node: &mut CallNode, live: &[ComponentInstance]) -> Vec<String> {
    node.component_id = node.selected_component_id();

    node.components = live
        .iter()
        .filter(|c| c.class_name == node.component_type_name)
        .cloned()
        .collect();

    match node.target_component().map(|c| c.name.clone()) {
        Some(name) => {
            node.set_field(FIELD_COMPONENT_NAME, name);
            Vec::new()
        }
        None => vec![WARNING_COMPONENT_MISSING.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Workspace;
    use crate::model::{FunctionArg, ReturnType};

    fn definition(name: &str, params: Vec<FunctionArg>) -> DefinitionNode {
        DefinitionNode::method("def1", name, name, ReturnType::None, params)
    }

    fn caller(id: &str, def: &DefinitionNode) -> CallNode {
        let mut node = CallNode::new(id, CallKind::InstanceWithin);
        node.callee_definition_id = Some(def.id.clone());
        node.set_field(FIELD_FUNCTION_NAME, def.display_name.as_str());
        node.return_type = def.return_type.clone();
        node.args = def.caller_args().to_vec();
        node
    }

    fn workspace_with_callers(def: &DefinitionNode, count: usize) -> Workspace {
        let mut workspace = Workspace::new();
        workspace.upsert_definition(def.clone());
        for i in 0..count {
            workspace.add_call_node(caller(&format!("call{}", i), def));
        }
        workspace
    }

    #[test]
    fn test_rename_updates_every_caller_without_warnings() {
        let def = definition("drive", vec![FunctionArg::new("speed", "float")]);
        let mut workspace = workspace_with_callers(&def, 3);

        let renamed = definition("driveForward", def.params.clone());
        workspace.upsert_definition(renamed.clone());
        let report = on_definition_changed(&mut workspace, &renamed);

        assert_eq!(report.relabelled().count(), 3);
        assert!(report.is_clean());
        for node in workspace.call_nodes() {
            assert_eq!(node.function_name(), "driveForward");
            assert_eq!(node.warning(), None);
        }
        // Labels are fields, not part of the persisted extra state.
        assert_eq!(report.changed().count(), 0);
        assert!(workspace.fired_changes().is_empty());
    }

    #[test]
    fn test_arg_type_change_warns_once() {
        let def = definition("drive", vec![FunctionArg::new("speed", "float")]);
        let mut workspace = workspace_with_callers(&def, 1);

        let changed = definition("drive", vec![FunctionArg::new("speed", "int")]);
        on_definition_changed(&mut workspace, &changed);

        let node = workspace.call_node(&NodeId::from("call0")).unwrap();
        assert_eq!(node.args, vec![FunctionArg::new("speed", "int")]);
        assert_eq!(node.warning(), Some(WARNING_ARGS_CHANGED));
    }

    #[test]
    fn test_signature_warning_persists_until_acknowledged() {
        let def = definition("drive", vec![FunctionArg::new("speed", "float")]);
        let mut workspace = workspace_with_callers(&def, 1);

        let changed = definition("drive", vec![FunctionArg::new("speed", "int")]);
        workspace.upsert_definition(changed.clone());
        let first = on_definition_changed(&mut workspace, &changed);
        assert_eq!(first.nodes[0].warning.as_deref(), Some(WARNING_ARGS_CHANGED));

        let reload = synchronize(&mut workspace);
        assert_eq!(reload.nodes[0].warning.as_deref(), Some(WARNING_ARGS_CHANGED));
        assert!(!reload.nodes[0].changed);

        let renamed = definition("driveForward", changed.params.clone());
        workspace.upsert_definition(renamed.clone());
        let edit = on_definition_changed(&mut workspace, &renamed);
        assert_eq!(edit.nodes[0].warning.as_deref(), Some(WARNING_ARGS_CHANGED));

        workspace
            .call_node_mut(&NodeId::from("call0"))
            .unwrap()
            .acknowledge_warnings();
        assert!(synchronize(&mut workspace).is_clean());
    }

    #[test]
    fn test_return_and_arg_warnings_accumulate() {
        let def = definition("drive", vec![]);
        let mut workspace = workspace_with_callers(&def, 1);

        let mut retyped = definition("drive", vec![]);
        retyped.return_type = ReturnType::Typed("bool".to_string());
        workspace.upsert_definition(retyped.clone());
        on_definition_changed(&mut workspace, &retyped);

        let mut extended = retyped.clone();
        extended.params = vec![FunctionArg::new("speed", "float")];
        workspace.upsert_definition(extended.clone());
        on_definition_changed(&mut workspace, &extended);

        let node = workspace.call_node(&NodeId::from("call0")).unwrap();
        assert_eq!(
            node.warning(),
            Some("This block calls a method whose return type has changed.\n\nThis block calls a method whose arguments have changed.")
        );
    }

    #[test]
    fn test_deleted_definition_warns_on_every_pass() {
        let def = definition("drive", vec![]);
        let mut workspace = workspace_with_callers(&def, 2);
        workspace.remove_definition(&def.id);

        let report = on_definition_deleted(&mut workspace, &def.id);
        assert_eq!(report.warned().count(), 2);
        assert_eq!(report.changed().count(), 0);

        for _ in 0..3 {
            let report = synchronize(&mut workspace);
            assert_eq!(report.warned().count(), 2);
        }
        let node = workspace.call_node(&NodeId::from("call1")).unwrap();
        assert_eq!(node.warning(), Some(WARNING_METHOD_MISSING));
        assert_eq!(node.function_name(), "drive");
    }

    #[test]
    fn test_change_fires_without_undo_and_restores_mode() {
        let def = definition("drive", vec![]);
        let mut workspace = workspace_with_callers(&def, 1);
        let changed = definition("drive", vec![FunctionArg::new("distance", "float")]);

        on_definition_changed(&mut workspace, &changed);
        let fired = workspace.fired_changes();
        assert_eq!(fired.len(), 1);
        assert!(!fired[0].recorded_undo);
        assert_ne!(fired[0].change.before, fired[0].change.after);
        assert!(workspace.record_undo());
    }

    #[test]
    fn test_unchanged_callers_fire_nothing() {
        let def = definition("drive", vec![FunctionArg::new("speed", "float")]);
        let mut workspace = workspace_with_callers(&def, 2);

        let report = on_definition_changed(&mut workspace, &def);
        assert_eq!(report.nodes.len(), 2);
        assert_eq!(report.changed().count(), 0);
        assert_eq!(report.relabelled().count(), 0);
        assert!(workspace.fired_changes().is_empty());
    }

    #[test]
    fn test_robot_method_follows_emitted_name() {
        let def = DefinitionNode::method("def9", "Drive", "drive", ReturnType::None, vec![]);
        let mut node = caller("r1", &def);
        node.kind = CallKind::InstanceRobot;
        node.actual_callee_name = "drive".to_string();
        let mut workspace = Workspace::new();
        workspace.add_call_node(node);

        let renamed = DefinitionNode::method("def9", "Drive Fast", "drive_fast", ReturnType::None, vec![]);
        on_definition_changed(&mut workspace, &renamed);

        let node = workspace.call_node(&NodeId::from("r1")).unwrap();
        assert_eq!(node.function_name(), "Drive Fast");
        assert_eq!(node.callee_name(), "drive_fast");
    }

    #[test]
    fn test_component_rename_is_followed_silently() {
        let mut node = CallNode::new("c_call", CallKind::InstanceComponent);
        node.component_type_name = "rev.Motor".to_string();
        node.component_id = Some(NodeId::from("m1"));
        node.components = vec![ComponentInstance::new("m1", "arm", "rev.Motor")];
        node.set_field(FIELD_COMPONENT_NAME, "arm");
        node.set_field(FIELD_FUNCTION_NAME, "stop");

        let mut workspace = Workspace::new();
        workspace.add_call_node(node);
        workspace.set_components(vec![ComponentInstance::new("m1", "lift", "rev.Motor")]);

        let report = on_components_changed(&mut workspace);
        assert!(report.is_clean());
        assert_eq!(report.changed().count(), 1);
        assert_eq!(report.relabelled().count(), 1);
        let node = workspace.call_node(&NodeId::from("c_call")).unwrap();
        assert_eq!(node.component_name(), "lift");
    }

    #[test]
    fn test_removed_component_is_flagged() {
        let mut node = CallNode::new("c_call", CallKind::InstanceComponent);
        node.component_type_name = "rev.Motor".to_string();
        node.component_id = Some(NodeId::from("m1"));
        node.set_field(FIELD_COMPONENT_NAME, "arm");

        let mut workspace = Workspace::new();
        workspace.add_call_node(node);

        let report = synchronize(&mut workspace);
        assert_eq!(
            report.nodes[0].warning.as_deref(),
            Some(WARNING_COMPONENT_MISSING)
        );
        assert_eq!(
            workspace.call_node(&NodeId::from("c_call")).unwrap().component_name(),
            "arm"
        );
    }

    fn component_caller(component: &ComponentInstance) -> CallNode {
        let mut node = CallNode::new("c_call", CallKind::InstanceComponent);
        node.component_type_name = component.class_name.clone();
        node.component_id = Some(component.id.clone());
        node.components = vec![component.clone()];
        node.set_field(FIELD_COMPONENT_NAME, component.name.as_str());
        node
    }

    #[test]
    fn test_deleted_component_is_not_replaced_by_namesake() {
        let mut workspace = Workspace::new();
        workspace.add_call_node(component_caller(&ComponentInstance::new("c1", "arm", "rev.Motor")));
        workspace.set_components(vec![ComponentInstance::new("c2", "arm", "rev.Motor")]);

        let report = synchronize(&mut workspace);
        assert_eq!(
            report.nodes[0].warning.as_deref(),
            Some(WARNING_COMPONENT_MISSING)
        );
        let node = workspace.call_node(&NodeId::from("c_call")).unwrap();
        assert_eq!(node.component_id, Some(NodeId::from("c1")));
    }

    #[test]
    fn test_renamed_component_keeps_identity_when_name_is_reused() {
        let mut workspace = Workspace::new();
        workspace.add_call_node(component_caller(&ComponentInstance::new("c1", "arm", "rev.Motor")));
        workspace.set_components(vec![
            ComponentInstance::new("c1", "lift", "rev.Motor"),
            ComponentInstance::new("c2", "arm", "rev.Motor"),
        ]);

        let report = on_components_changed(&mut workspace);
        assert!(report.is_clean());
        let node = workspace.call_node(&NodeId::from("c_call")).unwrap();
        assert_eq!(node.component_name(), "lift");
        assert_eq!(node.component_id, Some(NodeId::from("c1")));
    }

    #[test]
    fn test_dropdown_switch_is_followed() {
        let arm = ComponentInstance::new("c1", "arm", "rev.Motor");
        let lift = ComponentInstance::new("c2", "lift", "rev.Motor");
        let mut node = component_caller(&arm);
        node.components = vec![arm.clone(), lift.clone()];
        node.set_field(FIELD_COMPONENT_NAME, "lift");

        let mut workspace = Workspace::new();
        workspace.add_call_node(node);
        workspace.set_components(vec![arm, lift]);

        let report = synchronize(&mut workspace);
        assert!(report.is_clean());
        let node = workspace.call_node(&NodeId::from("c_call")).unwrap();
        assert_eq!(node.component_id, Some(NodeId::from("c2")));
    }
}
