use crate::domain::node::node::Node;
use crate::domain::node::node_kind::NodeKind;
use crate::domain::node::parameters::{ParameterBag, ParameterError, ParameterSchema, ParameterValue};
use crate::domain::node_store::{NodeStore, StoreError};
use crate::domain::utils::id::NodeId;

/// An in-progress edit of one node's parameters.
///
/// The draft works on a copy of the stored bag. Nothing reaches the store
/// until [`ParameterDraft::save`]; dropping or cancelling the draft leaves
/// the stored node exactly as it was.
#[derive(Debug, Clone)]
pub struct ParameterDraft {
    node_id: NodeId,
    schema: ParameterSchema,
    original: ParameterBag,
    working: ParameterBag,
}

impl ParameterDraft {
    pub fn begin(node: &Node) -> Self {
        Self {
            node_id: node.id(),
            schema: ParameterSchema::for_kind(node.kind()),
            original: node.parameters().clone(),
            working: node.parameters().clone(),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn kind(&self) -> NodeKind {
        self.schema.kind()
    }

    pub fn parameters(&self) -> &ParameterBag {
        &self.working
    }

    pub fn is_dirty(&self) -> bool {
        self.working != self.original
    }

    /// Applies the raw text of a form field. On any error the field keeps
    /// its previous value.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), ParameterError> {
        match self.schema.parse_field(key, raw) {
            Ok(value) => {
                self.working.insert(key, value);
                Ok(())
            }
            Err(e) => {
                if e.is_recoverable() {
                    log::warn!("Node {}: {}. Keeping '{}'.", self.node_id, e, self.working.get(key).map(ToString::to_string).unwrap_or_default());
                }
                Err(e)
            }
        }
    }

    pub fn set_value(&mut self, key: &str, value: ParameterValue) -> Result<(), ParameterError> {
        self.schema.validate_value(key, &value)?;
        self.working.insert(key, value);
        Ok(())
    }

    /// Writes the edited bag back to the store.
    pub fn save(self, store: &mut NodeStore) -> Result<(), StoreError> {
        if !self.is_dirty() {
            log::debug!("Node {}: nothing changed, skipping save.", self.node_id);
            return match store.get(self.node_id) {
                Some(_) => Ok(()),
                None => Err(StoreError::NotFound(self.node_id)),
            };
        }
        store.update(self.node_id, self.working)
    }

    /// Drops the edits and hands back the untouched original bag.
    pub fn cancel(self) -> ParameterBag {
        log::debug!("Node {}: edit cancelled.", self.node_id);
        self.original
    }
}
