//! # Generator Context
//!
//! What the emitter needs from the enclosing compilation unit: resolved
//! argument expressions, the indentation unit, the module kind, identifier
//! mangling and import collection.

use crate::config::ProjectConfig;
use crate::model::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Python operator precedence, tightest binding first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Order {
    Atomic,
    Collection,
    Member,
    FunctionCall,
    Exponentiation,
    UnarySign,
    Multiplicative,
    Additive,
    BitwiseShift,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    Relational,
    LogicalNot,
    LogicalAnd,
    LogicalOr,
    Conditional,
    Lambda,
    None,
}

/// The kind of module being generated. Changes how components are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Robot,
    Mechanism,
    OpMode,
}

/// Services the emitter consumes from the surrounding generator.
pub trait GeneratorContext {
    /// Code for the value plugged into `input` on `node`, parenthesized if it
    /// binds looser than `outer`. `None` when nothing is plugged in.
    fn value_to_code(&self, node: &NodeId, input: &str, outer: Order) -> Option<String>;

    /// One level of indentation.
    fn indent(&self) -> &str;

    fn module_kind(&self) -> ModuleKind;

    /// Python identifier for a user-visible procedure label.
    fn procedure_name(&self, label: &str) -> String;

    /// Requests `import <module>` once in the generated file.
    fn add_import(&mut self, module: &str);
}

/// In-memory [`GeneratorContext`] for one generated Python module.
#[derive(Debug, Clone)]
pub struct PythonContext {
    module_kind: ModuleKind,
    indent: String,
    inputs: HashMap<(NodeId, String), (String, Order)>,
    imports: BTreeSet<String>,
}

impl PythonContext {
    pub fn new(module_kind: ModuleKind) -> Self {
        Self {
            module_kind,
            indent: "    ".to_string(),
            inputs: HashMap::new(),
            imports: BTreeSet::new(),
        }
    }

    pub fn from_config(config: &ProjectConfig, module_kind: ModuleKind) -> Self {
        let mut ctx = Self::new(module_kind);
        ctx.indent = config.indent.clone();
        ctx
    }

    /// Records the code plugged into an input socket.
    pub fn set_input(
        &mut self,
        node: impl Into<NodeId>,
        input: impl Into<String>,
        code: impl Into<String>,
        order: Order,
    ) {
        self.inputs
            .insert((node.into(), input.into()), (code.into(), order));
    }

    /// Requested imports, sorted.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }
}

impl GeneratorContext for PythonContext {
    fn value_to_code(&self, node: &NodeId, input: &str, outer: Order) -> Option<String> {
        let (code, inner) = self.inputs.get(&(node.clone(), input.to_string()))?;
        if code.is_empty() {
            return None;
        }
        if *inner > outer {
            Some(format!("({})", code))
        } else {
            Some(code.clone())
        }
    }

    fn indent(&self) -> &str {
        &self.indent
    }

    fn module_kind(&self) -> ModuleKind {
        self.module_kind
    }

    fn procedure_name(&self, label: &str) -> String {
        python_identifier(label)
    }

    fn add_import(&mut self, module: &str) {
        if self.imports.insert(module.to_string()) {
            tracing::debug!("[CODEGEN] Import requested: {}", module);
        }
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Turns a display label into a snake_case Python identifier.
///
/// `onStart` becomes `on_start`, `Drive Forward` becomes `drive_forward`.
pub fn python_identifier(label: &str) -> String {
    let mut out = String::with_capacity(label.len() + 4);
    let mut prev_lower_or_digit = false;
    for ch in label.trim().chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else if ch.is_ascii_alphanumeric() {
            out.push(ch);
            prev_lower_or_digit = true;
        } else if !out.ends_with('_') {
            out.push('_');
            prev_lower_or_digit = false;
        }
    }

    if out.is_empty() {
        return "unnamed".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if PYTHON_KEYWORDS.contains(&out.as_str()) {
        out.push('_');
    }
    out
}
