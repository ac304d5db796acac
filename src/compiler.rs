//! # Module Compiler
//!
//! Main entry points for turning the call nodes of one module into Python.

use crate::codegen::{emit, Emitted, GeneratorContext, ModuleKind, PythonContext};
use crate::config::ProjectConfig;
use crate::error::CompileError;
use crate::host::BlockHost;
use crate::model::NodeId;

/// A node that could not be emitted. Other nodes are unaffected.
#[derive(Debug)]
pub struct NodeFailure {
    pub node: NodeId,
    pub error: CompileError,
}

/// Output of one module compilation.
#[derive(Debug)]
pub struct CompiledModule {
    pub module_kind: ModuleKind,
    /// Modules to import, sorted and deduplicated.
    pub imports: Vec<String>,
    /// Emitted code per node, in workspace order.
    pub fragments: Vec<(NodeId, Emitted)>,
    pub failures: Vec<NodeFailure>,
}

impl CompiledModule {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn fragment(&self, id: &NodeId) -> Option<&Emitted> {
        self.fragments
            .iter()
            .find(|(node, _)| node == id)
            .map(|(_, emitted)| emitted)
    }

    /// Import header followed by every statement fragment. Expression
    /// fragments are consumed by the node they plug into and are not
    /// repeated here.
    pub fn render(&self) -> String {
        let mut code = String::new();
        code.push_str("# Auto-generated code from robot blocks\n");
        code.push_str("# DO NOT EDIT - Changes will be overwritten\n\n");

        for module in &self.imports {
            code.push_str("import ");
            code.push_str(module);
            code.push('\n');
        }
        if !self.imports.is_empty() {
            code.push('\n');
        }

        for (_, emitted) in &self.fragments {
            if let Emitted::Statement(statement) = emitted {
                code.push_str(statement);
            }
        }
        code
    }
}

/// Compile every call node in `host`
///
/// Argument values are read from `ctx`, which the caller populates with the
/// code of whatever is plugged into each socket. A node that cannot be
/// emitted is recorded in [`CompiledModule::failures`] and the rest of the
/// module still compiles.
///
/// # Examples
///
/// ```rust
/// use rbgc::{compile_module, ModuleKind, PythonContext, Workspace};
///
/// let workspace = Workspace::new();
/// let mut ctx = PythonContext::new(ModuleKind::Robot);
/// let module = compile_module(&workspace, &mut ctx);
/// assert!(module.is_complete());
/// ```
pub fn compile_module<H: BlockHost + ?Sized>(host: &H, ctx: &mut PythonContext) -> CompiledModule {
    tracing::info!("[RBGC] Starting {:?} module compilation", ctx.module_kind());

    // Phase 1: Collect call nodes
    tracing::info!("[RBGC] Phase 1: Collecting call nodes...");
    let ids = host.call_node_ids();
    tracing::info!("[RBGC] Found {} call nodes", ids.len());

    // Phase 2: Emit each node
    tracing::info!("[RBGC] Phase 2: Generating Python code...");
    let mut fragments = Vec::with_capacity(ids.len());
    let mut failures = Vec::new();
    for id in ids {
        let result = match host.call_node(&id) {
            Some(node) => emit(node, ctx),
            None => Err(CompileError::NodeNotFound(id.clone())),
        };
        match result {
            Ok(emitted) => fragments.push((id, emitted)),
            Err(error) => {
                tracing::warn!("[RBGC] Node {} failed: {}", id, error);
                failures.push(NodeFailure { node: id, error });
            }
        }
    }

    // Phase 3: Collect imports
    tracing::info!("[RBGC] Phase 3: Collecting imports...");
    let imports: Vec<String> = ctx.imports().map(str::to_string).collect();
    tracing::info!("[RBGC]   - {} imports", imports.len());

    tracing::info!(
        "[RBGC] Compilation finished: {} nodes emitted, {} failed",
        fragments.len(),
        failures.len()
    );

    CompiledModule {
        module_kind: ctx.module_kind(),
        imports,
        fragments,
        failures,
    }
}

/// Compile with a fresh context built from project configuration
///
/// Every argument socket is treated as unplugged.
pub fn compile_module_with_config<H: BlockHost + ?Sized>(
    host: &H,
    config: &ProjectConfig,
    module_kind: ModuleKind,
) -> CompiledModule {
    let mut ctx = PythonContext::from_config(config, module_kind);
    compile_module(host, &mut ctx)
}
