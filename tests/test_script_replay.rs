use std::path::PathBuf;

use scenario_builder::api::request_body::RequestBody;
use scenario_builder::assemble_script;
use scenario_builder::domain::global_config::global_config::AuthoringMode;
use scenario_builder::domain::node::node_kind::NodeKind;
use scenario_builder::domain::node::parameters::TX_POWER;
use scenario_builder::error::Error;
use scenario_builder::loader::parser::parse_json_str;
use scenario_builder::loader::script::{load_script, replay};

fn write_script(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("scenario_builder_scripts");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}_{}.json", name, std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

const GRANULAR_SCRIPT: &str = r#"{
    "mode": "granular",
    "config": { "name": "Grid attack", "map": "grid.net.xml", "duration": "120", "seed": 7 },
    "actions": [
        { "selectTool": "vehicle_route" },
        { "click": { "lat": 1.0, "lng": 1.0 } },
        { "click": { "lat": 2.0, "lng": 2.0 } },
        { "selectTool": "drone" },
        { "click": { "lat": 1.5, "lng": 1.5 } },
        { "click": { "lat": 1.6, "lng": 1.6 } },
        { "editNode": { "node": 2, "set": { "txPower": 35, "strategy": "random", "speed": "fast" } } },
        { "deleteNode": 3 },
        { "selectTool": null }
    ]
}"#;

#[test]
fn script_file_replays_into_builder() {
    let path = write_script("granular", GRANULAR_SCRIPT);
    let builder = replay(load_script(&path).unwrap()).unwrap();

    assert_eq!(builder.mode(), AuthoringMode::Granular);
    assert_eq!(builder.config().name(), "Grid attack");
    assert_eq!(builder.config().seed().value(), 7);
    assert_eq!(builder.store().len(), 2);
    assert_eq!(builder.placement().active_tool(), None);

    let drone = builder.store().of_kind(NodeKind::MobileJammer).next().unwrap();
    assert_eq!(drone.parameters().number(TX_POWER), Some(35.0));
    assert_eq!(drone.parameters().text("strategy"), Some("random"));
    assert_eq!(drone.parameters().number("speed"), Some(10.0));

    std::fs::remove_file(path).unwrap();
}

#[test]
fn assemble_script_produces_expert_body() {
    let path = write_script("assemble", GRANULAR_SCRIPT);
    let assembly = assemble_script(&path).unwrap();

    let RequestBody::Expert(body) = assembly.body else {
        panic!("granular script must produce an expert body");
    };
    assert_eq!(body.simulation_name, "Grid attack");
    assert_eq!(body.seed, 7);
    assert_eq!(body.nodes_list.iter().map(|node| node.kind.as_str()).collect::<Vec<_>>(), vec!["car", "drone"]);

    std::fs::remove_file(path).unwrap();
}

#[test]
fn clear_nodes_accepts_bare_string_form() {
    let script = parse_json_str(
        r#"{ "mode": "manual", "actions": [ { "selectTool": "rsu" }, { "click": { "lat": 1.0, "lng": 1.0 } }, "clearNodes" ] }"#,
    )
    .unwrap();
    assert!(replay(script).unwrap().store().is_empty());
}

#[test]
fn placement_tool_in_simplified_script_is_rejected() {
    let script = parse_json_str(r#"{ "mode": "simplified", "actions": [ { "selectTool": "tower" } ] }"#).unwrap();
    assert!(matches!(replay(script), Err(Error::ToolUnavailable { mode: AuthoringMode::Simplified, kind: NodeKind::StaticJammer })));
}

#[test]
fn unknown_parameter_key_aborts_replay() {
    let script = parse_json_str(
        r#"{ "mode": "granular", "actions": [
            { "selectTool": "rsu" }, { "click": { "lat": 1.0, "lng": 1.0 } },
            { "editNode": { "node": 1, "set": { "speed": 3 } } }
        ] }"#,
    )
    .unwrap();
    assert!(matches!(replay(script), Err(Error::Script(_))));
}

#[test]
fn missing_script_file_is_an_io_error() {
    assert!(matches!(load_script("/nonexistent/script.json"), Err(Error::IoError(_))));
}
