use serde::Serialize;

use crate::api::advanced_dto::AdvancedSimulationPayloadDto;
use crate::api::expert_dto::ExpertSimulationPayloadDto;
use crate::api::simple_dto::SimulationPayloadDto;
use crate::domain::global_config::global_config::AuthoringMode;
use crate::gateway::endpoint::SimulationEndpoint;

/// A fully assembled request for the generation service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    Simple(SimulationPayloadDto),
    Advanced(AdvancedSimulationPayloadDto),
    Expert(ExpertSimulationPayloadDto),
}

impl RequestBody {
    pub fn mode(&self) -> AuthoringMode {
        match self {
            RequestBody::Simple(_) => AuthoringMode::Simplified,
            RequestBody::Advanced(_) => AuthoringMode::Manual,
            RequestBody::Expert(_) => AuthoringMode::Granular,
        }
    }

    pub fn endpoint(&self) -> SimulationEndpoint {
        SimulationEndpoint::from(self.mode())
    }

    pub fn scenario_name(&self) -> &str {
        match self {
            RequestBody::Simple(body) => &body.simulation_name,
            RequestBody::Advanced(body) => &body.simulation_name,
            RequestBody::Expert(body) => &body.simulation_name,
        }
    }

    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
