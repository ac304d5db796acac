//! # Block Shape
//!
//! What the host draws for a call node: statement or value connection, the
//! title row, one socket per argument and the tooltip. Everything here is
//! derived from decoded node state.

use crate::error::{CompileError, Result};
use crate::model::{
    CallKind, CallNode, FIELD_COMPONENT_NAME, FIELD_FUNCTION_NAME, FIELD_MODULE_OR_CLASS_NAME,
};
use std::collections::HashMap;

/// One element of a title row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleItem {
    /// Fixed, non-editable text.
    Text(&'static str),
    /// A named field whose value comes from the node.
    Field(&'static str),
    /// The component dropdown.
    ComponentDropdown,
}

use TitleItem::{ComponentDropdown, Field, Text};

const BUILT_IN_TITLE: &[TitleItem] = &[Text("call"), Field(FIELD_FUNCTION_NAME)];
const QUALIFIED_TITLE: &[TitleItem] = &[
    Text("call"),
    Field(FIELD_MODULE_OR_CLASS_NAME),
    Text("."),
    Field(FIELD_FUNCTION_NAME),
];
const CONSTRUCTOR_TITLE: &[TitleItem] = &[Text("create"), Field(FIELD_MODULE_OR_CLASS_NAME)];
const EVENT_TITLE: &[TitleItem] = &[Text("fire"), Field(FIELD_FUNCTION_NAME)];
const COMPONENT_TITLE: &[TitleItem] = &[
    Text("call"),
    ComponentDropdown,
    Text("."),
    Field(FIELD_FUNCTION_NAME),
];
const ROBOT_TITLE: &[TitleItem] = &[
    Text("call"),
    Text("robot"),
    Text("."),
    Field(FIELD_FUNCTION_NAME),
];

fn title_layout(kind: CallKind) -> &'static [TitleItem] {
    match kind {
        CallKind::BuiltIn | CallKind::InstanceWithin => BUILT_IN_TITLE,
        CallKind::Module | CallKind::Static | CallKind::Instance => QUALIFIED_TITLE,
        CallKind::Constructor => CONSTRUCTOR_TITLE,
        CallKind::Event => EVENT_TITLE,
        CallKind::InstanceComponent => COMPONENT_TITLE,
        CallKind::InstanceRobot => ROBOT_TITLE,
    }
}

/// How the block connects to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connection {
    /// Plugs into a value socket. `check` constrains where it may plug in.
    Output { check: Option<String> },
    /// Stacks with previous and next statements.
    Statement,
}

/// A rendered title element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleField {
    Text(String),
    Value {
        name: &'static str,
        value: String,
    },
    Dropdown {
        name: &'static str,
        choices: Vec<String>,
        value: String,
    },
}

/// A value input for one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSocket {
    /// Input name, `ARG<i>`.
    pub input: String,
    pub label: String,
    pub check: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockShape {
    pub connection: Connection,
    pub title: Vec<TitleField>,
    pub sockets: Vec<ArgSocket>,
    pub tooltip: String,
    pub warning: Option<String>,
}

/// Title layouts by call kind, built once by [`setup`].
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    layouts: HashMap<CallKind, &'static [TitleItem]>,
}

/// Registers the title layout of every call kind.
pub fn setup() -> ShapeRegistry {
    let layouts: HashMap<_, _> = CallKind::ALL
        .iter()
        .map(|kind| (*kind, title_layout(*kind)))
        .collect();
    tracing::debug!("[SHAPE] Registered {} call block layouts", layouts.len());
    ShapeRegistry { layouts }
}

impl ShapeRegistry {
    pub fn layout(&self, kind: CallKind) -> Option<&'static [TitleItem]> {
        self.layouts.get(&kind).copied()
    }

    pub fn render(&self, node: &CallNode) -> Result<BlockShape> {
        let layout = self
            .layout(node.kind)
            .ok_or_else(|| CompileError::UnknownCallKind(node.kind.to_string()))?;

        let connection = if node.has_output() {
            Connection::Output {
                check: node.return_type.output_check().map(str::to_string),
            }
        } else {
            Connection::Statement
        };

        let title = layout
            .iter()
            .map(|item| match *item {
                Text(text) => TitleField::Text(text.to_string()),
                Field(name) => TitleField::Value {
                    name,
                    value: node.field(name).unwrap_or_default().to_string(),
                },
                ComponentDropdown => TitleField::Dropdown {
                    name: FIELD_COMPONENT_NAME,
                    choices: component_choices(node),
                    value: node.component_name().to_string(),
                },
            })
            .collect();

        let sockets = node
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| ArgSocket {
                input: format!("ARG{}", i),
                label: arg.name.clone(),
                check: (!arg.ty.is_empty()).then(|| arg.ty.clone()),
            })
            .collect();

        Ok(BlockShape {
            connection,
            title,
            sockets,
            tooltip: tooltip(node),
            warning: node.warning().map(str::to_string),
        })
    }
}

/// Names offered by the component dropdown. The current name stays
/// selectable even when no live component carries it.
pub fn component_choices(node: &CallNode) -> Vec<String> {
    let mut choices: Vec<String> = node.components.iter().map(|c| c.name.clone()).collect();
    let current = node.component_name();
    if !choices.iter().any(|c| c == current) {
        choices.push(current.to_string());
    }
    choices
}

pub fn tooltip(node: &CallNode) -> String {
    let owner = node.owner_name();
    let function = node.function_name();
    let mut text = match node.kind {
        CallKind::BuiltIn => format!("Calls the builtin function {}.", function),
        CallKind::Module => format!("Calls the module function {}.{}.", owner, function),
        CallKind::Static => format!("Calls the static method {}.{}.", owner, function),
        CallKind::Constructor => format!("Constructs an instance of the class {}.", owner),
        CallKind::Instance => format!("Calls the instance method {}.{}.", owner, function),
        CallKind::InstanceWithin => format!("Calls the instance method {}.", function),
        CallKind::Event => format!("Fires the event {}.", function),
        CallKind::InstanceComponent => format!(
            "Calls the instance method {}.{} on the component named {}.",
            node.component_type_name,
            function,
            node.component_name()
        ),
        CallKind::InstanceRobot => format!("Calls the robot method {}.", function),
    };
    if !node.tooltip.is_empty() {
        text.push_str("\n\n");
        text.push_str(&node.tooltip);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentInstance, FunctionArg, ReturnType};

    #[test]
    fn test_every_kind_has_a_layout() {
        let registry = setup();
        for kind in CallKind::ALL {
            let layout = registry.layout(kind).unwrap();
            assert!(!layout.is_empty(), "{kind}");
            assert!(registry.render(&CallNode::new("n", kind)).is_ok(), "{kind}");
        }
    }

    #[test]
    fn test_unregistered_kind_is_an_error() {
        let registry = ShapeRegistry::default();
        let err = registry.render(&CallNode::new("n", CallKind::Event)).unwrap_err();
        assert!(matches!(err, CompileError::UnknownCallKind(ref k) if k == "event"));
    }

    #[test]
    fn test_return_type_selects_connection() {
        let registry = setup();
        let mut node = CallNode::new("n", CallKind::BuiltIn);
        assert_eq!(registry.render(&node).unwrap().connection, Connection::Statement);

        node.return_type = ReturnType::Untyped;
        assert_eq!(
            registry.render(&node).unwrap().connection,
            Connection::Output { check: None }
        );

        node.return_type = ReturnType::Typed("int".to_string());
        assert_eq!(
            registry.render(&node).unwrap().connection,
            Connection::Output {
                check: Some("int".to_string())
            }
        );
    }

    #[test]
    fn test_sockets_follow_args() {
        let mut node = CallNode::new("n", CallKind::Instance);
        node.args = vec![FunctionArg::new("motor", "rev.Motor"), FunctionArg::new("speed", "")];
        let shape = setup().render(&node).unwrap();

        assert_eq!(
            shape.sockets,
            vec![
                ArgSocket {
                    input: "ARG0".to_string(),
                    label: "motor".to_string(),
                    check: Some("rev.Motor".to_string()),
                },
                ArgSocket {
                    input: "ARG1".to_string(),
                    label: "speed".to_string(),
                    check: None,
                },
            ]
        );
    }

    #[test]
    fn test_dropdown_keeps_missing_current_name() {
        let mut node = CallNode::new("n", CallKind::InstanceComponent);
        node.components = vec![
            ComponentInstance::new("c1", "arm", "rev.Motor"),
            ComponentInstance::new("c2", "lift", "rev.Motor"),
        ];
        node.set_field(FIELD_COMPONENT_NAME, "claw");
        assert_eq!(component_choices(&node), vec!["arm", "lift", "claw"]);

        node.set_field(FIELD_COMPONENT_NAME, "lift");
        assert_eq!(component_choices(&node), vec!["arm", "lift"]);
    }

    #[test]
    fn test_robot_title_has_fixed_robot_text() {
        let mut node = CallNode::new("n", CallKind::InstanceRobot);
        node.set_field(FIELD_FUNCTION_NAME, "stop");
        let shape = setup().render(&node).unwrap();
        assert_eq!(
            shape.title,
            vec![
                TitleField::Text("call".to_string()),
                TitleField::Text("robot".to_string()),
                TitleField::Text(".".to_string()),
                TitleField::Value {
                    name: FIELD_FUNCTION_NAME,
                    value: "stop".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_tooltip_appends_custom_text() {
        let mut node = CallNode::new("n", CallKind::Event);
        node.set_field(FIELD_FUNCTION_NAME, "onScore");
        assert_eq!(tooltip(&node), "Fires the event onScore.");

        node.tooltip = "Raised after a game piece is scored.".to_string();
        assert_eq!(
            tooltip(&node),
            "Fires the event onScore.\n\nRaised after a game piece is scored."
        );
    }

    #[test]
    fn test_component_tooltip_names_class_and_component() {
        let mut node = CallNode::new("n", CallKind::InstanceComponent);
        node.component_type_name = "rev.Motor".to_string();
        node.set_field(FIELD_COMPONENT_NAME, "arm");
        node.set_field(FIELD_FUNCTION_NAME, "set_speed");
        assert_eq!(
            tooltip(&node),
            "Calls the instance method rev.Motor.set_speed on the component named arm."
        );
    }
}
