/// Extra-state round trips: every call kind survives save, JSON and load.

use rbgc::codec::{load_extra_state, node_from_extra_state, save_extra_state, ExtraState};
use rbgc::model::*;
use pretty_assertions::assert_eq;

fn sample_node(kind: CallKind) -> CallNode {
    let mut node = CallNode::new(format!("{}-node", kind), kind);
    node.return_type = ReturnType::Typed("float".to_string());
    node.args = vec![FunctionArg::new("distance", "float"), FunctionArg::new("speed", "")];
    node.tooltip = "Moves the robot.".to_string();
    node.import_module = "robot_lib".to_string();
    node.actual_callee_name = "move_robot".to_string();
    if kind.is_definition_bound() {
        node.callee_definition_id = Some(NodeId::from("def-7"));
    }
    if kind == CallKind::InstanceComponent {
        node.component_id = Some(NodeId::from("comp-1"));
        node.component_type_name = "rev.Motor".to_string();
        node.set_field(FIELD_COMPONENT_NAME, "arm");
    }
    node
}

#[test]
fn test_every_kind_round_trips_through_json() {
    let live = vec![ComponentInstance::new("comp-1", "arm", "rev.Motor")];

    for kind in CallKind::ALL {
        let original = sample_node(kind);
        let json = save_extra_state(&original).to_json().unwrap();
        let state = ExtraState::from_json(json).unwrap();
        let loaded = node_from_extra_state(original.id.clone(), &state, &live).unwrap();

        assert_eq!(loaded.kind, original.kind);
        assert_eq!(loaded.return_type, original.return_type);
        assert_eq!(loaded.args, original.args);
        assert_eq!(loaded.tooltip, original.tooltip);
        assert_eq!(loaded.import_module, original.import_module);
        assert_eq!(loaded.actual_callee_name, original.actual_callee_name);
        assert_eq!(loaded.callee_definition_id, original.callee_definition_id);
        assert_eq!(loaded.component_id, original.component_id);
        assert_eq!(loaded.component_type_name, original.component_type_name);
    }
}

#[test]
fn test_statement_and_untyped_return_types_round_trip() {
    for return_type in [ReturnType::None, ReturnType::Untyped] {
        let mut node = CallNode::new("n1", CallKind::Module);
        node.return_type = return_type.clone();

        let state = save_extra_state(&node);
        let mut loaded = CallNode::new("n1", CallKind::BuiltIn);
        load_extra_state(&mut loaded, &state, &[]).unwrap();
        assert_eq!(loaded.return_type, return_type);
        assert_eq!(loaded.kind, CallKind::Module);
    }
}

#[test]
fn test_component_cache_is_recomputed_not_persisted() {
    let node = sample_node(CallKind::InstanceComponent);
    let json = save_extra_state(&node).to_json().unwrap();
    assert!(json.get("components").is_none());

    let live = vec![
        ComponentInstance::new("comp-1", "arm", "rev.Motor"),
        ComponentInstance::new("comp-2", "intake", "rev.Motor"),
        ComponentInstance::new("comp-3", "camera", "vision.Camera"),
    ];
    let loaded =
        node_from_extra_state("n1", &ExtraState::from_json(json).unwrap(), &live).unwrap();
    let names: Vec<_> = loaded.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["arm", "intake"]);
}
