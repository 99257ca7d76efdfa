//! Relationship import.

use crate::clause::ImportStatement;
use crate::error::Result;
use crate::schema::NodeSchema;

/// Generates statements that connect already-imported nodes.
///
/// Kept apart from node import so edge generation can be added without
/// touching the node path.
pub trait RelationshipImport {
    /// Build a statement linking nodes matching `on_left` to nodes matching
    /// `on_right`.
    fn link_nodes(&mut self, on_left: &NodeSchema, on_right: &NodeSchema)
        -> Result<&ImportStatement>;
}
