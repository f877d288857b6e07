use crate::domain::geo::LatLng;
use crate::domain::node::node_kind::{NodeKind, PointKind};
use crate::domain::node::parameters::{ParameterBag, defaults_for};
use crate::domain::utils::id::NodeId;

/// Where a node sits on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeGeometry {
    /// Only vehicle routes use this, and both ends are always present.
    Route { origin: LatLng, destination: LatLng },
    Point(LatLng),
}

impl NodeGeometry {
    /// The point the node is anchored at (route origin for routes).
    pub fn anchor(&self) -> LatLng {
        match self {
            NodeGeometry::Route { origin, .. } => *origin,
            NodeGeometry::Point(point) => *point,
        }
    }

    pub fn destination(&self) -> Option<LatLng> {
        match self {
            NodeGeometry::Route { destination, .. } => Some(*destination),
            NodeGeometry::Point(_) => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            NodeGeometry::Route { origin, destination } => origin.is_valid() && destination.is_valid(),
            NodeGeometry::Point(point) => point.is_valid(),
        }
    }
}

/// A complete node that has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNode {
    kind: NodeKind,
    geometry: NodeGeometry,
    parameters: ParameterBag,
}

impl NewNode {
    pub fn route(origin: LatLng, destination: LatLng) -> Self {
        Self {
            kind: NodeKind::VehicleRoute,
            geometry: NodeGeometry::Route { origin, destination },
            parameters: defaults_for(NodeKind::VehicleRoute),
        }
    }

    pub fn point(kind: PointKind, at: LatLng) -> Self {
        let kind = NodeKind::from(kind);
        Self { kind, geometry: NodeGeometry::Point(at), parameters: defaults_for(kind) }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn geometry(&self) -> &NodeGeometry {
        &self.geometry
    }

    pub fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    pub(crate) fn into_node(self, id: NodeId) -> Node {
        Node { id, kind: self.kind, geometry: self.geometry, parameters: self.parameters }
    }
}

/// A placed topology entity as held by the node store.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    geometry: NodeGeometry,
    parameters: ParameterBag,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn geometry(&self) -> &NodeGeometry {
        &self.geometry
    }

    pub fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    pub(crate) fn replace_parameters(&mut self, parameters: ParameterBag) {
        self.parameters = parameters;
    }
}
