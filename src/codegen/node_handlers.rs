//! # Call-Kind Handlers
//!
//! Builds the callee path (everything before the argument parentheses) for
//! each call kind.

use super::context::{GeneratorContext, ModuleKind, Order};
use crate::error::{CompileError, Result};
use crate::model::{
    CallKind, CallNode, FIELD_COMPONENT_NAME, FIELD_FUNCTION_NAME, FIELD_MODULE_OR_CLASS_NAME,
};

/// Placeholder emitted for an unplugged argument socket.
pub const NO_VALUE: &str = "None";

/// Callee path plus the index of the first argument inside the parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalleePath {
    pub code: String,
    pub first_arg: usize,
}

pub fn callee_path<C: GeneratorContext + ?Sized>(node: &CallNode, ctx: &C) -> Result<CalleePath> {
    let code = match node.kind {
        CallKind::BuiltIn => callee(node)?.to_string(),
        CallKind::Module | CallKind::Static => {
            format!("{}.{}", required_field(node, FIELD_MODULE_OR_CLASS_NAME)?, callee(node)?)
        }
        CallKind::Constructor => required_field(node, FIELD_MODULE_OR_CLASS_NAME)?.to_string(),
        CallKind::Instance => {
            let receiver = ctx
                .value_to_code(&node.id, "ARG0", Order::Member)
                .unwrap_or_else(|| NO_VALUE.to_string());
            format!("{}.{}", receiver, callee(node)?)
        }
        CallKind::InstanceWithin => {
            let label = required_field(node, FIELD_FUNCTION_NAME)?;
            format!("self.{}", ctx.procedure_name(label))
        }
        CallKind::Event => {
            let label = required_field(node, FIELD_FUNCTION_NAME)?;
            let name = ctx.procedure_name(label);
            format!(
                "if self.events.get(\"{name}\", None):\n{indent}self.events[\"{name}\"]",
                name = name,
                indent = ctx.indent(),
            )
        }
        CallKind::InstanceComponent => {
            let receiver = match ctx.module_kind() {
                ModuleKind::Robot | ModuleKind::Mechanism => "self.",
                ModuleKind::OpMode => "self.robot.",
            };
            format!(
                "{}{}.{}",
                receiver,
                required_field(node, FIELD_COMPONENT_NAME)?,
                callee(node)?
            )
        }
        CallKind::InstanceRobot => format!("self.robot.{}", callee(node)?),
    };

    Ok(CalleePath {
        code,
        first_arg: node.kind.first_call_arg(),
    })
}

fn callee(node: &CallNode) -> Result<&str> {
    let name = node.callee_name();
    if name.is_empty() {
        return Err(CompileError::MissingField {
            node: node.id.clone(),
            field: FIELD_FUNCTION_NAME,
        });
    }
    Ok(name)
}

fn required_field<'n>(node: &'n CallNode, field: &'static str) -> Result<&'n str> {
    match node.field(field) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(CompileError::MissingField {
            node: node.id.clone(),
            field,
        }),
    }
}
