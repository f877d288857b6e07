use serde::{Deserialize, Serialize};

use crate::api::params_dto::{AppParamsDto, JammingParamsDto, NetParamsDto};

/// Body of `POST /api/simulations/generate_zip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPayloadDto {
    pub simulation_name: String,
    pub map_name: String,
    pub simulation_time: i64,
    pub total_vehicles: u32,
    pub vehicle_distribution: String,
    pub random_seed: i64,
    pub communication_mode: String,
    pub app_params: AppParamsDto,
    pub net_params: NetParamsDto,
    pub execute_with_attack: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jamming_params: Option<JammingParamsDto>,
}
