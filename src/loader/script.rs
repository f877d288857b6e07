use std::path::Path;

use crate::api::script_dto::{BuilderActionDto, FormInputDto, ScenarioConfigDto, ScenarioScriptDto};
use crate::domain::builder::ScenarioBuilder;
use crate::domain::global_config::global_config::ConfigEdit;
use crate::domain::utils::id::NodeId;
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;

pub fn load_script(path: impl AsRef<Path>) -> Result<ScenarioScriptDto> {
    let path = path.as_ref();
    let script: ScenarioScriptDto = parse_json_file(path)?;
    log::info!("Loaded {} script '{}' with {} action(s).", script.mode, path.display(), script.actions.len());
    Ok(script)
}

/// Plays a recorded authoring session through a fresh builder, in the same
/// order a user would have produced it: configuration form first, then the
/// map interactions.
pub fn replay(script: ScenarioScriptDto) -> Result<ScenarioBuilder> {
    let mut builder = ScenarioBuilder::new(script.mode);

    for edit in config_edits(script.config) {
        builder.edit_config(edit);
    }

    for (step, action) in script.actions.into_iter().enumerate() {
        replay_action(&mut builder, action).map_err(|e| match e {
            Error::Script(message) => Error::Script(format!("action {}: {}", step + 1, message)),
            other => other,
        })?;
    }

    Ok(builder)
}

fn replay_action(builder: &mut ScenarioBuilder, action: BuilderActionDto) -> Result<()> {
    match action {
        BuilderActionDto::SelectTool(tool) => {
            builder.select_tool(tool)?;
        }
        BuilderActionDto::Click(at) => {
            if let Some(id) = builder.click(at) {
                log::debug!("Click at {:?} placed node {}.", at, id);
            }
        }
        BuilderActionDto::EditNode { node, set } => {
            let id = NodeId::new(node);
            let mut draft = builder.begin_edit(id).ok_or_else(|| Error::Script(format!("no node with id {}", node)))?;

            for (key, input) in set {
                if let Err(e) = draft.set(&key, &input.raw()) {
                    // Unparsable numbers keep the previous value, like a form input would.
                    if !e.is_recoverable() {
                        return Err(Error::Script(e.to_string()));
                    }
                }
            }
            builder.save_edit(draft)?;
        }
        BuilderActionDto::DeleteNode(node) => {
            if builder.remove_node(NodeId::new(node)).is_none() {
                log::debug!("Delete of unknown node {} ignored.", node);
            }
        }
        BuilderActionDto::ClearNodes => builder.clear_nodes(),
    }
    Ok(())
}

fn config_edits(config: ScenarioConfigDto) -> Vec<ConfigEdit> {
    let raw = |input: Option<FormInputDto>| input.map(|value| value.raw());
    let mut edits = Vec::new();

    edits.extend(config.name.map(ConfigEdit::Rename));
    edits.extend(config.map.map(ConfigEdit::SelectMap));
    edits.extend(raw(config.duration).map(ConfigEdit::SetDuration));
    edits.extend(raw(config.seed).map(ConfigEdit::SetSeed));
    edits.extend(config.distribution.map(ConfigEdit::SetDistribution));
    edits.extend(config.communication_mode.map(ConfigEdit::SetCommunicationMode));
    edits.extend(raw(config.send_interval).map(ConfigEdit::SetSendInterval));
    edits.extend(raw(config.packet_size).map(ConfigEdit::SetPacketSize));
    edits.extend(raw(config.tx_power).map(ConfigEdit::SetTxPower));
    edits.extend(raw(config.bitrate).map(ConfigEdit::SetBitrate));

    edits.extend(raw(config.random_vehicles).map(ConfigEdit::SetRandomVehicles));
    edits.extend(raw(config.fixed_vehicles).map(ConfigEdit::SetFixedVehicles));
    if config.mitigation_active.is_some() || config.reroute_on_attack.is_some() {
        edits.push(ConfigEdit::SetMitigation {
            active: config.mitigation_active.unwrap_or(false),
            reroute_on_attack: config.reroute_on_attack.unwrap_or(false),
        });
    }
    edits.extend(raw(config.jamming_start).map(ConfigEdit::SetJammingStart));
    edits.extend(raw(config.jamming_stop).map(ConfigEdit::SetJammingStop));
    edits.extend(raw(config.jamming_power).map(ConfigEdit::SetJammingPower));
    edits.extend(config.jamming_strategy.map(ConfigEdit::SetJammingStrategy));

    edits.extend(raw(config.total_vehicles).map(ConfigEdit::SetTotalVehicles));
    edits.extend(config.intensity.map(ConfigEdit::SetIntensity));
    edits.extend(config.density.map(ConfigEdit::SetDensity));
    edits.extend(config.attack_enabled.map(ConfigEdit::SetAttackEnabled));

    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parser::parse_json_str;

    #[test]
    fn unset_config_fields_produce_no_edits() {
        assert!(config_edits(ScenarioConfigDto::default()).is_empty());
    }

    #[test]
    fn numbers_and_text_both_become_raw_edits() {
        let config: ScenarioConfigDto = parse_json_str(r#"{ "duration": 300, "seed": "42", "sendInterval": 0.5 }"#).unwrap();
        assert_eq!(
            config_edits(config),
            vec![ConfigEdit::SetDuration("300".into()), ConfigEdit::SetSeed("42".into()), ConfigEdit::SetSendInterval("0.5".into())]
        );
    }

    #[test]
    fn editing_a_missing_node_is_a_script_error() {
        let script: ScenarioScriptDto =
            parse_json_str(r#"{ "mode": "granular", "actions": [ { "editNode": { "node": 9, "set": { "txPower": 10 } } } ] }"#).unwrap();
        assert!(matches!(replay(script), Err(Error::Script(_))));
    }
}
