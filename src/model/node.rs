//! Call nodes and the values they carry.

use super::call_kind::CallKind;
use super::definition::ComponentInstance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field holding the function label shown on the node.
pub const FIELD_FUNCTION_NAME: &str = "FUNC";
/// Field holding the module or class name shown before the function label.
pub const FIELD_MODULE_OR_CLASS_NAME: &str = "MODULE_OR_CLASS";
/// Dropdown field holding the component a component-method node targets.
pub const FIELD_COMPONENT_NAME: &str = "COMPONENT_NAME";

/// Persisted spelling of "no return value".
pub const RETURN_TYPE_NONE: &str = "None";

/// Separator between warnings shown on a single node.
const WARNING_SEPARATOR: &str = "\n\n";

/// Opaque identifier assigned by the host editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The declared return type of a callee.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// No return value: the node is a statement.
    None,
    /// Returns a value of unknown type: an expression without an output check.
    Untyped,
    Typed(String),
}

impl ReturnType {
    pub fn from_persisted(value: &str) -> Self {
        match value {
            RETURN_TYPE_NONE => ReturnType::None,
            "" => ReturnType::Untyped,
            other => ReturnType::Typed(other.to_string()),
        }
    }

    pub fn as_persisted(&self) -> &str {
        match self {
            ReturnType::None => RETURN_TYPE_NONE,
            ReturnType::Untyped => "",
            ReturnType::Typed(name) => name,
        }
    }

    pub fn has_output(&self) -> bool {
        !matches!(self, ReturnType::None)
    }

    /// Type constraint placed on the output connection, if any.
    pub fn output_check(&self) -> Option<&str> {
        match self {
            ReturnType::Typed(name) => Some(name),
            _ => None,
        }
    }
}

/// One positional argument: a display label and a type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionArg {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
}

impl FunctionArg {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// One call site in the block graph.
///
/// Optional string state uses the empty string as "unset", mirroring how the
/// extra-state codec omits empty values.
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    pub id: NodeId,
    pub kind: CallKind,
    pub return_type: ReturnType,
    pub args: Vec<FunctionArg>,
    pub tooltip: String,
    pub import_module: String,
    /// Identifier emitted instead of the `FUNC` label, when set.
    pub actual_callee_name: String,
    pub callee_definition_id: Option<NodeId>,
    pub component_id: Option<NodeId>,
    pub component_type_name: String,
    /// Live components of type `component_type_name`. Recomputed on load.
    pub components: Vec<ComponentInstance>,
    fields: BTreeMap<String, String>,
    /// Signature-change warnings kept until acknowledged or the node is
    /// placed again.
    latched: Vec<String>,
    warning: Option<String>,
}

impl CallNode {
    pub fn new(id: impl Into<NodeId>, kind: CallKind) -> Self {
        Self {
            id: id.into(),
            kind,
            return_type: ReturnType::None,
            args: Vec::new(),
            tooltip: String::new(),
            import_module: String::new(),
            actual_callee_name: String::new(),
            callee_definition_id: None,
            component_id: None,
            component_type_name: String::new(),
            components: Vec::new(),
            fields: BTreeMap::new(),
            latched: Vec::new(),
            warning: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Sets a field value, returning true if it changed.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.field(name) == Some(value.as_str()) {
            return false;
        }
        self.fields.insert(name.to_string(), value);
        true
    }

    pub fn function_name(&self) -> &str {
        self.field(FIELD_FUNCTION_NAME).unwrap_or_default()
    }

    pub fn owner_name(&self) -> &str {
        self.field(FIELD_MODULE_OR_CLASS_NAME).unwrap_or_default()
    }

    pub fn component_name(&self) -> &str {
        self.field(FIELD_COMPONENT_NAME).unwrap_or_default()
    }

    /// The identifier to emit: `actual_callee_name` when set, else the label.
    pub fn callee_name(&self) -> &str {
        if self.actual_callee_name.is_empty() {
            self.function_name()
        } else {
            &self.actual_callee_name
        }
    }

    pub fn has_output(&self) -> bool {
        self.return_type.has_output()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Replaces the node's pass-scoped warnings with the given messages.
    /// Latched warnings come first and survive; an empty list with nothing
    /// latched clears the warning.
    pub fn set_warnings(&mut self, warnings: &[String]) {
        let all: Vec<&str> = self
            .latched
            .iter()
            .chain(warnings.iter().filter(|w| !self.latched.contains(*w)))
            .map(String::as_str)
            .collect();
        self.warning = if all.is_empty() {
            None
        } else {
            Some(all.join(WARNING_SEPARATOR))
        };
    }

    /// Keeps `warning` on the node across passes until
    /// [`acknowledge_warnings`](Self::acknowledge_warnings) is called.
    pub fn latch_warning(&mut self, warning: &str) {
        if !self.latched.iter().any(|w| w == warning) {
            self.latched.push(warning.to_string());
        }
    }

    pub fn latched_warnings(&self) -> &[String] {
        &self.latched
    }

    /// Drops latched warnings. Pass-scoped warnings return on the next pass.
    pub fn acknowledge_warnings(&mut self) {
        self.latched.clear();
        self.warning = None;
    }

    /// The component this node targets, looked up by id in the cached list.
    pub fn target_component(&self) -> Option<&ComponentInstance> {
        let id = self.component_id.as_ref()?;
        self.components.iter().find(|component| &component.id == id)
    }

    /// Id of the component the dropdown selects.
    ///
    /// The name is followed only while the bound component is still cached
    /// under another name, which means the dropdown was switched. A bound id
    /// missing from the cache is kept as is.
    pub fn selected_component_id(&self) -> Option<NodeId> {
        let Some(bound) = self.target_component() else {
            return self.component_id.clone();
        };
        let selected = self.field(FIELD_COMPONENT_NAME).filter(|name| *name != bound.name);
        let id = selected
            .and_then(|name| self.components.iter().find(|component| component.name == name))
            .unwrap_or(bound)
            .id
            .clone();
        Some(id)
    }
}
