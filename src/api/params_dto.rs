use serde::{Deserialize, Serialize};

use crate::domain::node::node_kind::JammerType;
use crate::domain::node::parameters::AttackStrategy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppParamsDto {
    pub send_interval_s: f64,
    pub packet_size_b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetParamsDto {
    pub tx_power_dbm: f64,
    pub bitrate_mbps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JammingParamsDto {
    pub start_time_s: f64,
    pub stop_time_s: f64,
    pub power_dbm: f64,
    pub strategy: AttackStrategy,
    pub jammer_type: JammerType,
    /// Only set when the generator has to synthesize the jammers itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_jammers: Option<u32>,
}
