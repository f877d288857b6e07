use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::global_config::form_field::{CoercionWarning, FormField};
use crate::domain::node::parameters::AttackStrategy;
use crate::domain::translator::{Density, Intensity};
use crate::error::ConversionError;

/// Which of the three authoring experiences produced the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthoringMode {
    /// Intensity/density knobs, no placed nodes.
    Simplified,
    /// Placed jammers, RSUs and one fixed route under shared parameters.
    Manual,
    /// Every node carries its own parameter bag.
    Granular,
}

impl fmt::Display for AuthoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthoringMode::Simplified => "simplified",
            AuthoringMode::Manual => "manual",
            AuthoringMode::Granular => "granular",
        };
        f.write_str(name)
    }
}

impl FromStr for AuthoringMode {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simplified" | "simple" => Ok(AuthoringMode::Simplified),
            "manual" | "advanced" => Ok(AuthoringMode::Manual),
            "granular" | "expert" => Ok(AuthoringMode::Granular),
            _ => Err(ConversionError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleDistribution {
    #[default]
    Heterogeneous,
    Homogeneous,
}

impl VehicleDistribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleDistribution::Heterogeneous => "heterogeneous",
            VehicleDistribution::Homogeneous => "homogeneous",
        }
    }
}

impl FromStr for VehicleDistribution {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heterogeneous" => Ok(VehicleDistribution::Heterogeneous),
            "homogeneous" => Ok(VehicleDistribution::Homogeneous),
            _ => Err(ConversionError::UnknownDistribution(s.to_string())),
        }
    }
}

/// Application-layer defaults shared by every vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDefaults {
    pub send_interval_s: FormField<f64>,
    pub packet_size_b: FormField<u32>,
}

/// Radio defaults shared by every vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDefaults {
    pub tx_power_dbm: FormField<f64>,
    pub bitrate_mbps: FormField<u32>,
}

/// Shared jamming profile applied to every manually placed jammer.
#[derive(Debug, Clone, PartialEq)]
pub struct JammingSchedule {
    pub start_time_s: FormField<f64>,
    pub stop_time_s: FormField<f64>,
    pub power_dbm: FormField<f64>,
    pub strategy: AttackStrategy,
}

/// The human-level knobs of the simplified mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifiedIntent {
    pub total_vehicles: FormField<u32>,
    pub intensity: Intensity,
    pub density: Density,
    pub attack_enabled: bool,
}

/// A single named change to the scenario configuration. Numeric edits carry
/// the raw text exactly as it was typed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEdit {
    Rename(String),
    SelectMap(String),
    SetDuration(String),
    SetSeed(String),
    SetDistribution(VehicleDistribution),
    SetCommunicationMode(String),
    SetSendInterval(String),
    SetPacketSize(String),
    SetTxPower(String),
    SetBitrate(String),
    SetRandomVehicles(String),
    SetFixedVehicles(String),
    SetMitigation { active: bool, reroute_on_attack: bool },
    SetJammingStart(String),
    SetJammingStop(String),
    SetJammingPower(String),
    SetJammingStrategy(AttackStrategy),
    SetTotalVehicles(String),
    SetIntensity(Intensity),
    SetDensity(Density),
    SetAttackEnabled(bool),
}

/// Scenario-wide settings. Mutated only through [`GlobalConfig::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalConfig {
    name: String,
    map_name: String,
    duration_s: FormField<i64>,
    seed: FormField<i64>,
    distribution: VehicleDistribution,
    communication_mode: String,
    application: ApplicationDefaults,
    network: NetworkDefaults,

    // manual mode (random_vehicles doubles as granular background traffic)
    random_vehicles: FormField<u32>,
    fixed_vehicles: FormField<u32>,
    mitigation_active: bool,
    reroute_on_attack: bool,
    jamming: JammingSchedule,

    // simplified mode
    simplified: SimplifiedIntent,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            name: "Scenario".to_string(),
            map_name: String::new(),
            duration_s: FormField::new("duration", 120),
            seed: FormField::new("seed", 1234),
            distribution: VehicleDistribution::default(),
            communication_mode: "D2D".to_string(),
            application: ApplicationDefaults {
                send_interval_s: FormField::new("send interval", 0.1),
                packet_size_b: FormField::new("packet size", 256),
            },
            network: NetworkDefaults { tx_power_dbm: FormField::new("tx power", 23.0), bitrate_mbps: FormField::new("bitrate", 6) },
            random_vehicles: FormField::new("random vehicles", 30),
            fixed_vehicles: FormField::new("fixed vehicles", 1),
            mitigation_active: false,
            reroute_on_attack: false,
            jamming: JammingSchedule {
                start_time_s: FormField::new("jamming start", 20.0),
                stop_time_s: FormField::new("jamming stop", 100.0),
                power_dbm: FormField::new("jamming power", 30.0),
                strategy: AttackStrategy::Constant,
            },
            simplified: SimplifiedIntent {
                total_vehicles: FormField::new("total vehicles", 50),
                intensity: Intensity::default(),
                density: Density::default(),
                attack_enabled: true,
            },
        }
    }
}

impl GlobalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults as the authoring surface of `mode` starts out. Granular
    /// scenarios start without background traffic.
    pub fn for_mode(mode: AuthoringMode) -> Self {
        let mut config = Self::default();
        if mode == AuthoringMode::Granular {
            config.random_vehicles.set(0);
        }
        config
    }

    /// Applies one edit. Returns a warning when numeric text did not parse;
    /// the field then keeps its previous value.
    pub fn apply(&mut self, edit: ConfigEdit) -> Option<CoercionWarning> {
        let warning = match edit {
            ConfigEdit::Rename(name) => {
                self.name = name;
                None
            }
            ConfigEdit::SelectMap(map_name) => {
                self.map_name = map_name;
                None
            }
            ConfigEdit::SetDuration(raw) => self.duration_s.edit(raw),
            ConfigEdit::SetSeed(raw) => self.seed.edit(raw),
            ConfigEdit::SetDistribution(distribution) => {
                self.distribution = distribution;
                None
            }
            ConfigEdit::SetCommunicationMode(mode) => {
                self.communication_mode = mode;
                None
            }
            ConfigEdit::SetSendInterval(raw) => self.application.send_interval_s.edit(raw),
            ConfigEdit::SetPacketSize(raw) => self.application.packet_size_b.edit(raw),
            ConfigEdit::SetTxPower(raw) => self.network.tx_power_dbm.edit(raw),
            ConfigEdit::SetBitrate(raw) => self.network.bitrate_mbps.edit(raw),
            ConfigEdit::SetRandomVehicles(raw) => self.random_vehicles.edit(raw),
            ConfigEdit::SetFixedVehicles(raw) => self.fixed_vehicles.edit(raw),
            ConfigEdit::SetMitigation { active, reroute_on_attack } => {
                self.mitigation_active = active;
                self.reroute_on_attack = reroute_on_attack;
                None
            }
            ConfigEdit::SetJammingStart(raw) => self.jamming.start_time_s.edit(raw),
            ConfigEdit::SetJammingStop(raw) => self.jamming.stop_time_s.edit(raw),
            ConfigEdit::SetJammingPower(raw) => self.jamming.power_dbm.edit(raw),
            ConfigEdit::SetJammingStrategy(strategy) => {
                self.jamming.strategy = strategy;
                None
            }
            ConfigEdit::SetTotalVehicles(raw) => self.simplified.total_vehicles.edit(raw),
            ConfigEdit::SetIntensity(intensity) => {
                self.simplified.intensity = intensity;
                None
            }
            ConfigEdit::SetDensity(density) => {
                self.simplified.density = density;
                None
            }
            ConfigEdit::SetAttackEnabled(enabled) => {
                self.simplified.attack_enabled = enabled;
                None
            }
        };

        if let Some(warning) = &warning {
            log::warn!("{}", warning);
        }
        warning
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    pub fn duration(&self) -> &FormField<i64> {
        &self.duration_s
    }

    pub fn seed(&self) -> &FormField<i64> {
        &self.seed
    }

    pub fn distribution(&self) -> VehicleDistribution {
        self.distribution
    }

    pub fn communication_mode(&self) -> &str {
        &self.communication_mode
    }

    pub fn application(&self) -> &ApplicationDefaults {
        &self.application
    }

    pub fn network(&self) -> &NetworkDefaults {
        &self.network
    }

    pub fn random_vehicles(&self) -> &FormField<u32> {
        &self.random_vehicles
    }

    pub fn fixed_vehicles(&self) -> &FormField<u32> {
        &self.fixed_vehicles
    }

    pub fn mitigation_active(&self) -> bool {
        self.mitigation_active
    }

    pub fn reroute_on_attack(&self) -> bool {
        self.reroute_on_attack
    }

    pub fn jamming(&self) -> &JammingSchedule {
        &self.jamming
    }

    pub fn simplified(&self) -> &SimplifiedIntent {
        &self.simplified
    }
}
