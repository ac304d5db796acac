//! # Host Editor Interface
//!
//! The operations the compiler and the synchronization protocol consume from
//! the editor that owns the block graph, plus an in-memory [`Workspace`] that
//! implements them.

use crate::codec::ExtraState;
use crate::model::{CallNode, ComponentInstance, DefinitionNode, NodeId};
use std::ops::{Deref, DerefMut};

/// Block type under which the host stores call nodes.
pub const CALL_BLOCK_TYPE: &str = "mrc_call_python_function";

/// A change to a node's persisted state, reported to the host so that other
/// listeners see it. `before` and `after` always differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralChange {
    pub node: NodeId,
    pub before: ExtraState,
    pub after: ExtraState,
}

/// Editor services.
pub trait BlockHost {
    /// Ids of every block of `block_type`, in workspace order.
    fn blocks_of_type(&self, block_type: &str) -> Vec<NodeId>;

    fn call_node(&self, id: &NodeId) -> Option<&CallNode>;

    fn call_node_mut(&mut self, id: &NodeId) -> Option<&mut CallNode>;

    fn fire_structural_change(&mut self, change: StructuralChange);

    /// Whether fired changes are recorded as undoable actions.
    fn record_undo(&self) -> bool;

    fn set_record_undo(&mut self, record: bool);

    /// Components currently attached to the robot or mechanism.
    fn components(&self) -> &[ComponentInstance];

    /// Method definitions currently in the graph.
    fn definitions(&self) -> &[DefinitionNode];

    fn call_node_ids(&self) -> Vec<NodeId> {
        self.blocks_of_type(CALL_BLOCK_TYPE)
    }

    fn definition(&self, id: &NodeId) -> Option<&DefinitionNode> {
        self.definitions().iter().find(|def| &def.id == id)
    }
}

/// Turns undo recording off until dropped, then restores the previous mode.
///
/// Derefs to the host so events can be fired through the guard.
pub struct UndoSuppressed<'h, H: BlockHost + ?Sized> {
    host: &'h mut H,
    previous: bool,
}

impl<'h, H: BlockHost + ?Sized> UndoSuppressed<'h, H> {
    pub fn new(host: &'h mut H) -> Self {
        let previous = host.record_undo();
        host.set_record_undo(false);
        Self { host, previous }
    }
}

impl<H: BlockHost + ?Sized> Deref for UndoSuppressed<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: BlockHost + ?Sized> DerefMut for UndoSuppressed<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: BlockHost + ?Sized> Drop for UndoSuppressed<'_, H> {
    fn drop(&mut self) {
        self.host.set_record_undo(self.previous);
    }
}

/// A fired change together with the recording mode in effect when it fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredChange {
    pub change: StructuralChange,
    pub recorded_undo: bool,
}

/// In-memory block graph.
#[derive(Debug, Clone)]
pub struct Workspace {
    call_nodes: Vec<CallNode>,
    components: Vec<ComponentInstance>,
    definitions: Vec<DefinitionNode>,
    fired: Vec<FiredChange>,
    record_undo: bool,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            call_nodes: Vec::new(),
            components: Vec::new(),
            definitions: Vec::new(),
            fired: Vec::new(),
            record_undo: true,
        }
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a call node, replacing any node with the same id.
    pub fn add_call_node(&mut self, node: CallNode) {
        match self.call_nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) => *existing = node,
            None => self.call_nodes.push(node),
        }
    }

    pub fn remove_call_node(&mut self, id: &NodeId) -> Option<CallNode> {
        let index = self.call_nodes.iter().position(|n| &n.id == id)?;
        Some(self.call_nodes.remove(index))
    }

    pub fn call_nodes(&self) -> impl Iterator<Item = &CallNode> {
        self.call_nodes.iter()
    }

    pub fn set_components(&mut self, components: Vec<ComponentInstance>) {
        self.components = components;
    }

    /// Adds a definition or replaces the one with the same id.
    pub fn upsert_definition(&mut self, definition: DefinitionNode) {
        match self.definitions.iter_mut().find(|d| d.id == definition.id) {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }

    pub fn remove_definition(&mut self, id: &NodeId) -> Option<DefinitionNode> {
        let index = self.definitions.iter().position(|d| &d.id == id)?;
        Some(self.definitions.remove(index))
    }

    /// Changes fired so far, oldest first.
    pub fn fired_changes(&self) -> &[FiredChange] {
        &self.fired
    }

    pub fn take_fired_changes(&mut self) -> Vec<FiredChange> {
        std::mem::take(&mut self.fired)
    }
}

impl BlockHost for Workspace {
    fn blocks_of_type(&self, block_type: &str) -> Vec<NodeId> {
        if block_type != CALL_BLOCK_TYPE {
            return Vec::new();
        }
        self.call_nodes.iter().map(|n| n.id.clone()).collect()
    }

    fn call_node(&self, id: &NodeId) -> Option<&CallNode> {
        self.call_nodes.iter().find(|n| &n.id == id)
    }

    fn call_node_mut(&mut self, id: &NodeId) -> Option<&mut CallNode> {
        self.call_nodes.iter_mut().find(|n| &n.id == id)
    }

    fn fire_structural_change(&mut self, change: StructuralChange) {
        self.fired.push(FiredChange {
            change,
            recorded_undo: self.record_undo,
        });
    }

    fn record_undo(&self) -> bool {
        self.record_undo
    }

    fn set_record_undo(&mut self, record: bool) {
        self.record_undo = record;
    }

    fn components(&self) -> &[ComponentInstance] {
        &self.components
    }

    fn definitions(&self) -> &[DefinitionNode] {
        &self.definitions
    }
}
