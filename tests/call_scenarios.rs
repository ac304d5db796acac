/// End-to-end scenarios: build call nodes, edit definitions, compile.

use rbgc::codegen::Order;
use rbgc::model::*;
use rbgc::sync::{WARNING_ARGS_CHANGED, WARNING_METHOD_MISSING};
use rbgc::{
    compile_module, emit, factory, on_definition_changed, on_definition_deleted, synchronize,
    BlockHost, Emitted, ModuleKind, PythonContext, Workspace,
};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_instance_method_scenario() {
    init_tracing();
    let mut node = CallNode::new("call", CallKind::Instance);
    node.return_type = ReturnType::Typed("int".to_string());
    node.args = vec![FunctionArg::new("self", "Foo"), FunctionArg::new("x", "int")];
    node.set_field(FIELD_MODULE_OR_CLASS_NAME, "Foo");
    node.set_field(FIELD_FUNCTION_NAME, "bar");

    let mut ctx = PythonContext::new(ModuleKind::Robot);
    ctx.set_input("call", "ARG0", "myFoo", Order::Atomic);
    ctx.set_input("call", "ARG1", "5", Order::Atomic);

    assert_eq!(
        emit(&node, &mut ctx).unwrap(),
        Emitted::Expression("myFoo.bar(5)".to_string(), Order::FunctionCall)
    );
}

#[test]
fn test_event_trigger_scenario() {
    init_tracing();
    let on_start = DefinitionNode {
        id: NodeId::from("ev1"),
        display_name: "onStart".to_string(),
        emitted_name: "on_start".to_string(),
        return_type: ReturnType::None,
        receiver: None,
        params: vec![],
    };
    let node = factory::event_node("fire", &on_start);

    let mut ctx = PythonContext::new(ModuleKind::Mechanism);
    let code = emit(&node, &mut ctx).unwrap();
    assert_eq!(
        code.code(),
        "if self.events.get(\"on_start\", None):\n    self.events[\"on_start\"]()\n"
    );
    assert_eq!(code.code().lines().count(), 2);
}

#[test]
fn test_component_scope_scenario() {
    init_tracing();
    let drive = ComponentInstance::new("c1", "drive", "drivetrain.Tank");
    let stop = factory::FunctionData {
        function_name: "stop".to_string(),
        tooltip: String::new(),
        return_type: "None".to_string(),
        args: vec![factory::ArgData::new("self", "drivetrain.Tank")],
        declaring_class_name: "drivetrain.Tank".to_string(),
    };
    let node = factory::component_method_node("call", &drive, &stop);

    for (kind, expected) in [
        (ModuleKind::Robot, "self.drive.stop()\n"),
        (ModuleKind::Mechanism, "self.drive.stop()\n"),
        (ModuleKind::OpMode, "self.robot.drive.stop()\n"),
    ] {
        let mut ctx = PythonContext::new(kind);
        assert_eq!(emit(&node, &mut ctx).unwrap().code(), expected);
    }
}

#[test]
fn test_edit_then_compile() {
    init_tracing();
    let drive = DefinitionNode::method(
        "def1",
        "drive",
        "drive",
        ReturnType::None,
        vec![FunctionArg::new("speed", "float")],
    );
    let mut workspace = Workspace::new();
    workspace.upsert_definition(drive.clone());
    for id in ["a", "b", "c"] {
        workspace.add_call_node(factory::instance_within_node(id, &drive));
    }

    // Rename only.
    let renamed = DefinitionNode::method(
        "def1",
        "driveForward",
        "drive_forward",
        ReturnType::None,
        drive.params.clone(),
    );
    workspace.upsert_definition(renamed.clone());
    let report = on_definition_changed(&mut workspace, &renamed);
    assert!(report.is_clean());
    assert_eq!(report.relabelled().count(), 3);

    // Type change on the only argument.
    let retyped = DefinitionNode::method(
        "def1",
        "driveForward",
        "drive_forward",
        ReturnType::None,
        vec![FunctionArg::new("speed", "int")],
    );
    workspace.upsert_definition(retyped.clone());
    let report = on_definition_changed(&mut workspace, &retyped);
    assert_eq!(report.warned().count(), 3);
    let node = workspace.call_node(&NodeId::from("a")).unwrap();
    assert_eq!(node.warning(), Some(WARNING_ARGS_CHANGED));
    assert_eq!(node.args[0].ty, "int");

    // Warnings do not stop compilation.
    let mut ctx = PythonContext::new(ModuleKind::Robot);
    ctx.set_input("b", "ARG0", "3", Order::Atomic);
    let module = compile_module(&workspace, &mut ctx);
    assert!(module.is_complete());
    assert_eq!(
        module.render(),
        "# Auto-generated code from robot blocks\n\
         # DO NOT EDIT - Changes will be overwritten\n\
         \n\
         self.drive_forward(None)\n\
         self.drive_forward(3)\n\
         self.drive_forward(None)\n"
    );

    // The reload pass keeps the signature warning.
    let report = synchronize(&mut workspace);
    assert_eq!(report.warned().count(), 3);
    assert_eq!(
        report.outcome(&NodeId::from("c")).and_then(|o| o.warning.as_deref()),
        Some(WARNING_ARGS_CHANGED)
    );
}

#[test]
fn test_deleted_definition_stays_flagged() {
    init_tracing();
    let score = DefinitionNode::method("def2", "score", "score", ReturnType::None, vec![]);
    let mut workspace = Workspace::new();
    workspace.upsert_definition(score.clone());
    workspace.add_call_node(factory::instance_robot_node("r1", &score));

    workspace.remove_definition(&score.id);
    on_definition_deleted(&mut workspace, &score.id);
    for _ in 0..5 {
        let report = synchronize(&mut workspace);
        assert_eq!(
            report.outcome(&NodeId::from("r1")).and_then(|o| o.warning.as_deref()),
            Some(WARNING_METHOD_MISSING)
        );
    }
    assert!(workspace.call_node(&NodeId::from("r1")).is_some());
    assert!(workspace.fired_changes().is_empty());
}
