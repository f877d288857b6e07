use serde::Deserialize;
use std::collections::BTreeMap;

use crate::domain::geo::LatLng;
use crate::domain::global_config::global_config::{AuthoringMode, VehicleDistribution};
use crate::domain::node::node_kind::NodeKind;
use crate::domain::node::parameters::AttackStrategy;
use crate::domain::translator::{Density, Intensity};

/// A value as it would arrive from a form input. Numbers, flags and text are
/// all reduced to the raw text so they go through the same coercion rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormInputDto {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FormInputDto {
    pub fn raw(&self) -> String {
        match self {
            FormInputDto::Flag(flag) => flag.to_string(),
            FormInputDto::Number(number) => number.to_string(),
            FormInputDto::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfigDto {
    pub name: Option<String>,
    pub map: Option<String>,
    pub duration: Option<FormInputDto>,
    pub seed: Option<FormInputDto>,
    pub distribution: Option<VehicleDistribution>,
    pub communication_mode: Option<String>,
    pub send_interval: Option<FormInputDto>,
    pub packet_size: Option<FormInputDto>,
    pub tx_power: Option<FormInputDto>,
    pub bitrate: Option<FormInputDto>,

    pub random_vehicles: Option<FormInputDto>,
    pub fixed_vehicles: Option<FormInputDto>,
    pub mitigation_active: Option<bool>,
    pub reroute_on_attack: Option<bool>,
    pub jamming_start: Option<FormInputDto>,
    pub jamming_stop: Option<FormInputDto>,
    pub jamming_power: Option<FormInputDto>,
    pub jamming_strategy: Option<AttackStrategy>,

    pub total_vehicles: Option<FormInputDto>,
    pub intensity: Option<Intensity>,
    pub density: Option<Density>,
    pub attack_enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuilderActionDto {
    SelectTool(Option<NodeKind>),
    Click(LatLng),
    EditNode { node: u64, set: BTreeMap<String, FormInputDto> },
    DeleteNode(u64),
    ClearNodes,
}

/// A recorded authoring session: the configuration form plus the sequence
/// of map interactions, replayed through the builder by the CLI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioScriptDto {
    pub mode: AuthoringMode,
    #[serde(default)]
    pub config: ScenarioConfigDto,
    #[serde(default)]
    pub actions: Vec<BuilderActionDto>,
}
