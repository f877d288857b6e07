use crate::domain::global_config::global_config::AuthoringMode;

/// Routes of the generation service, relative to the API base url.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndpoint {
    Maps,
    GenerateZip,
    GenerateAdvancedZip,
    GenerateExpertZip,
}

impl SimulationEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Maps => "/api/maps",
            Self::GenerateZip => "/api/simulations/generate_zip",
            Self::GenerateAdvancedZip => "/api/simulations/generate_advanced_zip",
            Self::GenerateExpertZip => "/api/simulations/generate_expert_zip",
        }
    }

    pub fn method(&self) -> reqwest::Method {
        match self {
            Self::Maps => reqwest::Method::GET,
            _ => reqwest::Method::POST,
        }
    }
}

impl From<AuthoringMode> for SimulationEndpoint {
    fn from(mode: AuthoringMode) -> Self {
        match mode {
            AuthoringMode::Simplified => Self::GenerateZip,
            AuthoringMode::Manual => Self::GenerateAdvancedZip,
            AuthoringMode::Granular => Self::GenerateExpertZip,
        }
    }
}
