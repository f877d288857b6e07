use serde::{Deserialize, Serialize};

use crate::api::params_dto::{AppParamsDto, JammingParamsDto, NetParamsDto};
use crate::domain::geo::LatLng;
use crate::domain::node::node_kind::JammerType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JammerPlacementDto {
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub jammer_type: JammerType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedRouteDto {
    pub start: LatLng,
    pub end: LatLng,
    pub count: u32,
}

/// Body of `POST /api/simulations/generate_advanced_zip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedSimulationPayloadDto {
    pub simulation_name: String,
    pub map_name: String,
    pub simulation_time: i64,
    pub random_seed: i64,
    pub num_fixed_vehicles: u32,
    pub num_random_vehicles: u32,
    pub vehicle_distribution: String,
    pub communication_mode: String,
    pub app_params: AppParamsDto,
    pub net_params: NetParamsDto,
    pub mitigation_active: bool,
    pub reroute_on_attack: bool,
    pub attack_placement: String,
    pub jammers_list: Vec<JammerPlacementDto>,
    pub jamming_params: JammingParamsDto,
    pub rsus_list: Vec<LatLng>,
    pub fixed_routes_list: Vec<FixedRouteDto>,
}
