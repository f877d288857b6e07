use crate::api::advanced_dto::{AdvancedSimulationPayloadDto, FixedRouteDto, JammerPlacementDto};
use crate::api::params_dto::JammingParamsDto;
use crate::domain::assembler::Coercer;
use crate::domain::geo::LatLng;
use crate::domain::global_config::global_config::GlobalConfig;
use crate::domain::node::node::NodeGeometry;
use crate::domain::node::node_kind::{JammerType, NodeKind};
use crate::domain::node_store::NodeStore;

const ATTACK_PLACEMENT: &str = "fixed";

pub(crate) fn build(
    config: &GlobalConfig,
    duration_s: i64,
    random: u32,
    fixed: u32,
    store: &NodeStore,
    coercer: &mut Coercer,
) -> AdvancedSimulationPayloadDto {
    let jammers_list: Vec<JammerPlacementDto> = store
        .list()
        .iter()
        .filter_map(|node| {
            let jammer_type = node.kind().jammer_type()?;
            let at = node.geometry().anchor();
            Some(JammerPlacementDto { lat: at.lat, lng: at.lng, jammer_type })
        })
        .collect();

    let rsus_list: Vec<LatLng> = store.of_kind(NodeKind::RoadsideUnit).map(|node| node.geometry().anchor()).collect();

    let schedule = config.jamming();
    let jamming_params = JammingParamsDto {
        start_time_s: coercer.take(&schedule.start_time_s),
        stop_time_s: coercer.take(&schedule.stop_time_s),
        power_dbm: coercer.take(&schedule.power_dbm),
        strategy: schedule.strategy,
        jammer_type: jammers_list.first().map(|jammer| jammer.jammer_type).unwrap_or(JammerType::DroneJammer),
        num_jammers: None,
    };

    AdvancedSimulationPayloadDto {
        simulation_name: config.name().to_string(),
        map_name: config.map_name().to_string(),
        simulation_time: duration_s,
        random_seed: coercer.take(config.seed()),
        num_fixed_vehicles: fixed,
        num_random_vehicles: random,
        vehicle_distribution: config.distribution().as_str().to_string(),
        communication_mode: config.communication_mode().to_string(),
        app_params: coercer.app_params(config),
        net_params: coercer.net_params(config),
        mitigation_active: config.mitigation_active(),
        reroute_on_attack: config.reroute_on_attack(),
        attack_placement: ATTACK_PLACEMENT.to_string(),
        jammers_list,
        jamming_params,
        rsus_list,
        fixed_routes_list: fixed_route(store, fixed).into_iter().collect(),
    }
}

/// The most recently placed route, carrying `count` vehicles. A zero count
/// drops the route entirely rather than sending it with some other count.
fn fixed_route(store: &NodeStore, count: u32) -> Option<FixedRouteDto> {
    if count == 0 {
        return None;
    }

    match store.of_kind(NodeKind::VehicleRoute).last()?.geometry() {
        NodeGeometry::Route { origin, destination } => Some(FixedRouteDto { start: *origin, end: *destination, count }),
        NodeGeometry::Point(_) => None,
    }
}
