use crate::api::expert_dto::{ExpertNodeDto, ExpertSimulationPayloadDto};
use crate::domain::assembler::Coercer;
use crate::domain::global_config::global_config::GlobalConfig;
use crate::domain::node::node::Node;
use crate::domain::node_store::NodeStore;

/// Every node in store order with its full parameter bag. Bags were checked
/// against their schema during validation; nothing is filled in here.
pub(crate) fn build(
    config: &GlobalConfig,
    duration_s: i64,
    num_random_vehicles: u32,
    store: &NodeStore,
    coercer: &mut Coercer,
) -> ExpertSimulationPayloadDto {
    ExpertSimulationPayloadDto {
        simulation_name: config.name().to_string(),
        map_name: config.map_name().to_string(),
        duration: duration_s,
        seed: coercer.take(config.seed()),
        num_random_vehicles,
        nodes_list: store.list().iter().map(to_dto).collect(),
    }
}

fn to_dto(node: &Node) -> ExpertNodeDto {
    let origin = node.geometry().anchor();
    let destination = node.geometry().destination();

    ExpertNodeDto {
        id: node.id().into(),
        kind: node.kind().wire_name().to_string(),
        lat: origin.lat,
        lng: origin.lng,
        dest_lat: destination.map(|point| point.lat),
        dest_lng: destination.map(|point| point.lng),
        params: node.parameters().clone(),
    }
}
