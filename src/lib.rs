//! # Robot Blocks Graph Compiler (RBGC)
//!
//! Compiles the call nodes of a robot block graph into Python source code and
//! keeps those call nodes consistent with the method definitions and robot
//! components they reference while the graph is edited.
//!
//! RBGC provides:
//! - A closed model of the nine call kinds and their persisted extra state
//! - Python code generation with operator precedence and import collection
//! - Call-site synchronization with warnings for stale references
//! - Data-driven gamepad profiles for the driver station
//!
//! ## Quick Start
//!
//! ```rust
//! use rbgc::{compile_module, factory, ModuleKind, PythonContext, Workspace};
//! use rbgc::model::{DefinitionNode, ReturnType};
//!
//! let stop = DefinitionNode::method("def1", "stop", "stop", ReturnType::None, vec![]);
//! let mut workspace = Workspace::new();
//! workspace.upsert_definition(stop.clone());
//! workspace.add_call_node(factory::instance_robot_node("call1", &stop));
//!
//! let mut ctx = PythonContext::new(ModuleKind::OpMode);
//! let module = compile_module(&workspace, &mut ctx);
//! assert_eq!(module.render().lines().last(), Some("self.robot.stop()"));
//! ```
//!
//! ## Architecture
//!
//! 1. **Codec** - Load call nodes from their persisted extra state
//! 2. **Shape** - Derive what the editor draws for each node
//! 3. **Sync** - Repair or flag callers when definitions and components change
//! 4. **Code Generation** - Emit Python per node through a generator context

pub mod codec;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod devices;
pub mod error;
pub mod factory;
pub mod host;
pub mod model;
pub mod shape;
pub mod sync;

// Re-export the main compilation API
pub use compiler::{compile_module, compile_module_with_config, CompiledModule, NodeFailure};

pub use codec::{load_extra_state, save_extra_state, ExtraState};
pub use codegen::{emit, Emitted, GeneratorContext, ModuleKind, Order, PythonContext};
pub use config::ProjectConfig;
pub use error::{CompileError, Result};
pub use host::{BlockHost, StructuralChange, Workspace};
pub use sync::{on_components_changed, on_definition_changed, on_definition_deleted, synchronize, SyncReport};
