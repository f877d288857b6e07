use thiserror::Error;

use crate::domain::node::node::{NewNode, Node};
use crate::domain::node::node_kind::NodeKind;
use crate::domain::node::parameters::{ParameterBag, ParameterError, ParameterSchema};
use crate::domain::utils::id::{IdSequence, NodeId, NodeTag};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Node {0} does not exist")]
    NotFound(NodeId),

    #[error("Parameters for node {id} were rejected: {source}")]
    InvalidParameters { id: NodeId, source: ParameterError },
}

/// The ordered collection of placed nodes for one builder session.
///
/// Insertion order is kept for display and for payload serialization.
/// There is exactly one writer, so no synchronization is involved.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
    ids: IdSequence<NodeTag>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: NewNode) -> NodeId {
        let id = self.ids.next_id();
        let node = node.into_node(id);
        log::info!("Placed {} node {} at {:?}.", node.kind(), id, node.geometry().anchor());
        self.nodes.push(node);
        id
    }

    /// Replaces the parameter bag of `id`. The bag must satisfy the schema of
    /// the node's kind, otherwise the stored node is left untouched.
    pub fn update(&mut self, id: NodeId, parameters: ParameterBag) -> Result<(), StoreError> {
        let node = self.nodes.iter_mut().find(|node| node.id() == id).ok_or(StoreError::NotFound(id))?;

        ParameterSchema::for_kind(node.kind()).validate(&parameters).map_err(|source| StoreError::InvalidParameters { id, source })?;

        node.replace_parameters(parameters);
        log::info!("Updated parameters of {} node {}.", node.kind(), id);
        Ok(())
    }

    /// Removes `id` and returns it. Unknown ids are a no-op.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        match self.nodes.iter().position(|node| node.id() == id) {
            Some(index) => {
                let node = self.nodes.remove(index);
                log::info!("Removed {} node {}.", node.kind(), id);
                Some(node)
            }
            None => {
                log::debug!("Remove of unknown node {} ignored.", id);
                None
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Unchecked access for tests that need a node the schema would refuse.
    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id() == id)
    }

    pub fn list(&self) -> &[Node] {
        &self.nodes
    }

    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.kind() == kind)
    }

    pub fn clear(&mut self) {
        log::info!("Cleared {} nodes.", self.nodes.len());
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
