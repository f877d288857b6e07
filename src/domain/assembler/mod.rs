//! Turns builder state into the request body of the generation service.
//!
//! All three authoring modes share one pipeline: numeric fields are coerced
//! (collecting warnings), the fail-fast checks in [`validation`] run, and the
//! mode-specific module shapes the body. The output depends only on the
//! inputs, so assembling unchanged state twice yields identical bytes.

pub mod granular;
pub mod manual;
pub mod simple;
pub mod validation;

use crate::api::params_dto::{AppParamsDto, NetParamsDto};
use crate::api::request_body::RequestBody;
use crate::domain::global_config::form_field::{CoercionWarning, FormField, FormValue};
use crate::domain::global_config::global_config::{AuthoringMode, GlobalConfig};
use crate::domain::node_store::NodeStore;

use self::validation::{Scalars, Traffic, ValidationError};

/// A request body ready for submission, plus any numeric fields that fell
/// back to their last valid value.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub body: RequestBody,
    pub warnings: Vec<CoercionWarning>,
}

/// Resolves form fields and remembers every fallback it had to take.
#[derive(Debug, Default)]
pub(crate) struct Coercer {
    warnings: Vec<CoercionWarning>,
}

impl Coercer {
    pub(crate) fn take<T: FormValue>(&mut self, field: &FormField<T>) -> T {
        let (value, warning) = field.resolve();
        if let Some(warning) = warning {
            self.warnings.push(warning);
        }
        value
    }

    pub(crate) fn app_params(&mut self, config: &GlobalConfig) -> AppParamsDto {
        let application = config.application();
        AppParamsDto { send_interval_s: self.take(&application.send_interval_s), packet_size_b: self.take(&application.packet_size_b) }
    }

    pub(crate) fn net_params(&mut self, config: &GlobalConfig) -> NetParamsDto {
        let network = config.network();
        NetParamsDto { tx_power_dbm: self.take(&network.tx_power_dbm), bitrate_mbps: self.take(&network.bitrate_mbps) }
    }
}

pub fn assemble(config: &GlobalConfig, store: &NodeStore, mode: AuthoringMode) -> Result<Assembly, ValidationError> {
    let mut coercer = Coercer::default();

    let duration_s = coercer.take(config.duration());
    let traffic = match mode {
        AuthoringMode::Simplified => Traffic::Aggregate { total: coercer.take(&config.simplified().total_vehicles) },
        AuthoringMode::Manual => Traffic::Mixed { random: coercer.take(config.random_vehicles()), fixed: coercer.take(config.fixed_vehicles()) },
        AuthoringMode::Granular => Traffic::Background { random: coercer.take(config.random_vehicles()) },
    };
    let scalars = Scalars { duration_s, traffic };

    if let Err(e) = validation::validate(config, &scalars, store, mode) {
        log::warn!("Scenario '{}' failed validation: {}", config.name(), e);
        return Err(e);
    }

    let body = match scalars.traffic {
        Traffic::Aggregate { total } => RequestBody::Simple(simple::build(config, duration_s, total, &mut coercer)),
        Traffic::Mixed { random, fixed } => RequestBody::Advanced(manual::build(config, duration_s, random, fixed, store, &mut coercer)),
        Traffic::Background { random } => RequestBody::Expert(granular::build(config, duration_s, random, store, &mut coercer)),
    };

    for warning in &coercer.warnings {
        log::warn!("{}", warning);
    }
    log::debug!("Assembled {} request for scenario '{}' with {} warning(s).", mode, config.name(), coercer.warnings.len());

    Ok(Assembly { body, warnings: coercer.warnings })
}
