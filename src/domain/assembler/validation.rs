use thiserror::Error;

use crate::domain::global_config::global_config::{AuthoringMode, GlobalConfig};
use crate::domain::node::node_kind::NodeKind;
use crate::domain::node::parameters::{ParameterError, ParameterSchema};
use crate::domain::node_store::NodeStore;
use crate::domain::utils::id::NodeId;

/// Why a scenario cannot be submitted. Raised locally, before any network call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please select a map.")]
    MissingMap,

    #[error("Duration must be a positive number of seconds (got {0}).")]
    NonPositiveDuration(i64),

    #[error("The scenario needs at least one vehicle.")]
    NoVehicles,

    #[error("Place at least one vehicle route.")]
    NoVehicleRoute,

    #[error("Vehicle route {0} is missing a valid origin or destination.")]
    IncompleteRoute(NodeId),

    #[error("Node {id} is missing parameter '{key}'.")]
    MissingParameter { id: NodeId, key: String },

    #[error("Node {id} has unknown parameter '{key}'.")]
    UnknownParameter { id: NodeId, key: String },

    #[error("Node {id}: {source}")]
    InvalidParameter { id: NodeId, source: ParameterError },
}

/// Vehicle counts of the scenario, in the shape the mode uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traffic {
    Aggregate { total: u32 },
    Mixed { random: u32, fixed: u32 },
    Background { random: u32 },
}

/// Scalars the checks depend on, already passed through numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scalars {
    pub duration_s: i64,
    pub traffic: Traffic,
}

/// Runs the checks in order and stops at the first violation.
pub fn validate(config: &GlobalConfig, scalars: &Scalars, store: &NodeStore, mode: AuthoringMode) -> Result<(), ValidationError> {
    if config.map_name().trim().is_empty() {
        return Err(ValidationError::MissingMap);
    }

    if scalars.duration_s <= 0 {
        return Err(ValidationError::NonPositiveDuration(scalars.duration_s));
    }

    match scalars.traffic {
        Traffic::Aggregate { total } if total == 0 => return Err(ValidationError::NoVehicles),
        Traffic::Mixed { random, fixed } if random == 0 && fixed == 0 => return Err(ValidationError::NoVehicles),
        Traffic::Background { .. } if store.of_kind(NodeKind::VehicleRoute).next().is_none() => {
            return Err(ValidationError::NoVehicleRoute);
        }
        _ => {}
    }

    // Simplified scenarios never read the store.
    if mode == AuthoringMode::Simplified {
        return Ok(());
    }

    // Routes are complete by construction; this guards against coordinates
    // that were never valid in the first place.
    if let Some(route) = store.of_kind(NodeKind::VehicleRoute).find(|node| !node.geometry().is_complete()) {
        return Err(ValidationError::IncompleteRoute(route.id()));
    }

    if mode == AuthoringMode::Granular {
        for node in store.list() {
            ParameterSchema::for_kind(node.kind()).validate(node.parameters()).map_err(|e| match e {
                ParameterError::MissingKey { key, .. } => ValidationError::MissingParameter { id: node.id(), key },
                ParameterError::UnknownKey { key, .. } => ValidationError::UnknownParameter { id: node.id(), key },
                source => ValidationError::InvalidParameter { id: node.id(), source },
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::LatLng;
    use crate::domain::global_config::global_config::ConfigEdit;
    use crate::domain::node::node::NewNode;
    use crate::domain::node::node_kind::PointKind;
    use crate::domain::node::parameters::{ParameterValue, defaults_for};

    fn granular_config() -> GlobalConfig {
        let mut config = GlobalConfig::for_mode(AuthoringMode::Granular);
        config.apply(ConfigEdit::SelectMap("grid.net.xml".into()));
        config
    }

    fn scalars() -> Scalars {
        Scalars { duration_s: 120, traffic: Traffic::Background { random: 0 } }
    }

    fn store_with_route() -> (NodeStore, NodeId) {
        let mut store = NodeStore::new();
        let id = store.add(NewNode::route(LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)));
        (store, id)
    }

    #[test]
    fn route_with_invalid_end_is_incomplete() {
        let (mut store, _) = store_with_route();
        let broken = store.add(NewNode::route(LatLng::new(1.0, 1.0), LatLng::new(f64::NAN, 2.0)));

        let result = validate(&granular_config(), &scalars(), &store, AuthoringMode::Granular);
        assert_eq!(result, Err(ValidationError::IncompleteRoute(broken)));

        let manual = Scalars { duration_s: 120, traffic: Traffic::Mixed { random: 1, fixed: 1 } };
        assert_eq!(validate(&granular_config(), &manual, &store, AuthoringMode::Manual), Err(ValidationError::IncompleteRoute(broken)));
    }

    #[test]
    fn missing_parameter_is_not_filled_in() {
        let (mut store, route) = store_with_route();
        let mut bag = defaults_for(NodeKind::VehicleRoute);
        bag.remove("interval");
        store.node_mut(route).unwrap().replace_parameters(bag);

        let result = validate(&granular_config(), &scalars(), &store, AuthoringMode::Granular);
        assert_eq!(result, Err(ValidationError::MissingParameter { id: route, key: "interval".to_string() }));
    }

    #[test]
    fn foreign_parameter_is_rejected() {
        let (mut store, _) = store_with_route();
        let tower = store.add(NewNode::point(PointKind::StaticJammer, LatLng::new(1.5, 1.5)));
        let mut bag = defaults_for(NodeKind::StaticJammer);
        bag.insert("speed", ParameterValue::Number(10.0));
        store.node_mut(tower).unwrap().replace_parameters(bag);

        let result = validate(&granular_config(), &scalars(), &store, AuthoringMode::Granular);
        assert_eq!(result, Err(ValidationError::UnknownParameter { id: tower, key: "speed".to_string() }));
    }

    #[test]
    fn manual_mode_does_not_check_bags() {
        let (mut store, route) = store_with_route();
        store.node_mut(route).unwrap().replace_parameters(Default::default());

        let manual = Scalars { duration_s: 120, traffic: Traffic::Mixed { random: 0, fixed: 1 } };
        assert_eq!(validate(&granular_config(), &manual, &store, AuthoringMode::Manual), Ok(()));
    }
}
