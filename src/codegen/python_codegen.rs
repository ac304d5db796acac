//! # Python Code Generator for Call Nodes
//!
//! Turns one call node into a Python expression or statement.

use super::context::{GeneratorContext, Order};
use super::node_handlers::{callee_path, NO_VALUE};
use crate::error::Result;
use crate::model::CallNode;

/// Generated code for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// A value-producing expression and how tightly it binds.
    Expression(String, Order),
    /// A complete statement, newline-terminated.
    Statement(String),
}

impl Emitted {
    pub fn code(&self) -> &str {
        match self {
            Emitted::Expression(code, _) | Emitted::Statement(code) => code,
        }
    }
}

/// Generate Python for a call node
///
/// Registers the node's import module with the context, builds the callee
/// path for the node's kind and appends the argument list. Nodes with an
/// output become expressions at [`Order::FunctionCall`]; the rest become
/// statements.
///
/// # Errors
///
/// Fails only for this node, when a field the kind requires is empty.
pub fn emit<C: GeneratorContext + ?Sized>(node: &CallNode, ctx: &mut C) -> Result<Emitted> {
    if !node.import_module.is_empty() {
        ctx.add_import(&node.import_module);
    }

    let path = callee_path(node, &*ctx)?;
    let args = generate_arguments(node, &*ctx, path.first_arg);
    let code = format!("{}({})", path.code, args);

    tracing::debug!("[CODEGEN] {} node {} -> {}", node.kind, node.id, code);

    if node.has_output() {
        Ok(Emitted::Expression(code, Order::FunctionCall))
    } else {
        Ok(Emitted::Statement(code + "\n"))
    }
}

/// A single argument goes inline. Several go one per line, double-indented.
fn generate_arguments<C: GeneratorContext + ?Sized>(
    node: &CallNode,
    ctx: &C,
    start: usize,
) -> String {
    let value = |i: usize| {
        ctx.value_to_code(&node.id, &format!("ARG{}", i), Order::None)
            .unwrap_or_else(|| NO_VALUE.to_string())
    };

    let count = node.args.len().saturating_sub(start);
    if count == 1 {
        return value(start);
    }

    let line_indent = ctx.indent().repeat(2);
    let mut code = String::new();
    for i in start..node.args.len() {
        code.push_str(if i == start { "\n" } else { ",\n" });
        code.push_str(&line_indent);
        code.push_str(&value(i));
    }
    code
}
