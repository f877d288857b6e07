use crate::api::params_dto::JammingParamsDto;
use crate::api::simple_dto::SimulationPayloadDto;
use crate::domain::assembler::Coercer;
use crate::domain::global_config::global_config::GlobalConfig;
use crate::domain::node::node_kind::JammerType;
use crate::domain::node::parameters::AttackStrategy;
use crate::domain::translator::{implied_jammer_count, intensity_to_power};

/// Aggregate traffic plus one synthesized attack block. The generator places
/// the jammers itself, so no node lists are sent.
pub(crate) fn build(config: &GlobalConfig, duration_s: i64, total_vehicles: u32, coercer: &mut Coercer) -> SimulationPayloadDto {
    let intent = config.simplified();

    let jamming_params = intent.attack_enabled.then(|| JammingParamsDto {
        start_time_s: 0.0,
        stop_time_s: duration_s as f64,
        power_dbm: intensity_to_power(intent.intensity),
        strategy: AttackStrategy::Constant,
        jammer_type: JammerType::DroneJammer,
        num_jammers: Some(implied_jammer_count(total_vehicles, intent.density)),
    });

    SimulationPayloadDto {
        simulation_name: config.name().to_string(),
        map_name: config.map_name().to_string(),
        simulation_time: duration_s,
        total_vehicles,
        vehicle_distribution: config.distribution().as_str().to_string(),
        random_seed: coercer.take(config.seed()),
        communication_mode: config.communication_mode().to_string(),
        app_params: coercer.app_params(config),
        net_params: coercer.net_params(config),
        execute_with_attack: jamming_params.is_some(),
        jamming_params,
    }
}
