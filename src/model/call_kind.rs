//! The nine ways a call node can invoke its callee.

use crate::error::CompileError;
use std::fmt;
use std::str::FromStr;

/// How a call node reaches its callee.
///
/// The kind is fixed when a node is created. Persisted payloads store it as
/// the string returned by [`CallKind::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CallKind {
    /// A Python builtin such as `print` or `len`.
    BuiltIn,
    /// A function defined at module level, called as `module.function`.
    Module,
    /// A static method, called as `Class.method`.
    Static,
    /// A class constructor; the class name itself is the callable.
    Constructor,
    /// An instance method whose receiver is the value plugged into `ARG0`.
    Instance,
    /// A method defined in the module being edited, called on `self`.
    InstanceWithin,
    /// A method on a named component instance.
    InstanceComponent,
    /// A method defined on the robot, called through `self.robot`.
    InstanceRobot,
    /// Fires a user-defined event through the per-instance event registry.
    Event,
}

impl CallKind {
    pub const ALL: [CallKind; 9] = [
        CallKind::BuiltIn,
        CallKind::Module,
        CallKind::Static,
        CallKind::Constructor,
        CallKind::Instance,
        CallKind::InstanceWithin,
        CallKind::InstanceComponent,
        CallKind::InstanceRobot,
        CallKind::Event,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CallKind::BuiltIn => "built-in",
            CallKind::Module => "module",
            CallKind::Static => "static",
            CallKind::Constructor => "constructor",
            CallKind::Instance => "instance",
            CallKind::InstanceWithin => "instance_within",
            CallKind::InstanceComponent => "instance_component",
            CallKind::InstanceRobot => "instance_robot",
            CallKind::Event => "event",
        }
    }

    /// Kinds whose callee is a definition node in the graph, referenced by
    /// `callee_definition_id`.
    pub fn is_definition_bound(self) -> bool {
        matches!(
            self,
            CallKind::InstanceWithin | CallKind::InstanceRobot | CallKind::Event
        )
    }

    /// Index of the first argument that is passed inside the parentheses.
    /// Instance calls use `ARG0` as the receiver.
    pub fn first_call_arg(self) -> usize {
        match self {
            CallKind::Instance => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallKind {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CallKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CompileError::UnknownCallKind(s.to_string()))
    }
}
