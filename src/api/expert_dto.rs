use serde::{Deserialize, Serialize};

use crate::domain::node::parameters::ParameterBag;

/// One node of a granular scenario. Routes carry their destination in
/// `dest_lat`/`dest_lng`; every other kind leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertNodeDto {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_lng: Option<f64>,
    pub params: ParameterBag,
}

/// Body of `POST /api/simulations/generate_expert_zip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertSimulationPayloadDto {
    pub simulation_name: String,
    pub map_name: String,
    pub duration: i64,
    pub seed: i64,
    pub num_random_vehicles: u32,
    pub nodes_list: Vec<ExpertNodeDto>,
}
