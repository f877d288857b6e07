use crate::domain::geo::LatLng;
use crate::domain::node::node::NewNode;
use crate::domain::node::node_kind::{NodeKind, PointKind};

/// Progress of the two-click route tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteStep {
    AwaitingOrigin,
    AwaitingDestination { origin: LatLng },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlacementState {
    /// No tool armed; clicks belong to the map's own pan/zoom handling.
    #[default]
    Idle,
    Point(PointKind),
    Route(RouteStep),
}

/// What a single map click produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Ignored,
    OriginCaptured(LatLng),
    Placed(NewNode),
}

/// The placement session: which tool is armed and, for routes, the origin
/// still waiting for its destination.
///
/// The controller knows nothing about rendering. A half-built route only
/// ever lives here, never in the node store.
#[derive(Debug, Clone, Default)]
pub struct PlacementController {
    state: PlacementState,
}

impl PlacementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn active_tool(&self) -> Option<NodeKind> {
        match self.state {
            PlacementState::Idle => None,
            PlacementState::Point(kind) => Some(kind.into()),
            PlacementState::Route(_) => Some(NodeKind::VehicleRoute),
        }
    }

    pub fn pending_origin(&self) -> Option<LatLng> {
        match self.state {
            PlacementState::Route(RouteStep::AwaitingDestination { origin }) => Some(origin),
            _ => None,
        }
    }

    /// Arms `tool` (or disarms with `None`).
    ///
    /// Re-selecting the armed tool changes nothing. Switching to any other
    /// tool discards a pending route origin, which is returned.
    pub fn select_tool(&mut self, tool: Option<NodeKind>) -> Option<LatLng> {
        if tool == self.active_tool() {
            return None;
        }

        let discarded = self.pending_origin();
        if let Some(origin) = discarded {
            log::info!("Discarded pending route origin {:?}.", origin);
        }

        self.state = match tool {
            None => PlacementState::Idle,
            Some(kind) => match kind.point_kind() {
                Some(point) => PlacementState::Point(point),
                None => PlacementState::Route(RouteStep::AwaitingOrigin),
            },
        };

        match tool {
            Some(kind) => log::debug!("Armed {} tool.", kind),
            None => log::debug!("Placement tool disarmed."),
        }
        discarded
    }

    /// Feeds one map click through the state machine.
    ///
    /// Point tools and completed routes stay armed so several entities can
    /// be placed without re-selecting the tool.
    pub fn click(&mut self, at: LatLng) -> ClickOutcome {
        if !at.is_valid() {
            log::warn!("Ignoring click at invalid coordinate {:?}.", at);
            return ClickOutcome::Ignored;
        }

        match self.state {
            PlacementState::Idle => ClickOutcome::Ignored,
            PlacementState::Point(kind) => ClickOutcome::Placed(NewNode::point(kind, at)),
            PlacementState::Route(RouteStep::AwaitingOrigin) => {
                self.state = PlacementState::Route(RouteStep::AwaitingDestination { origin: at });
                ClickOutcome::OriginCaptured(at)
            }
            PlacementState::Route(RouteStep::AwaitingDestination { origin }) => {
                self.state = PlacementState::Route(RouteStep::AwaitingOrigin);
                ClickOutcome::Placed(NewNode::route(origin, at))
            }
        }
    }

    pub fn reset(&mut self) {
        self.select_tool(None);
    }
}
