use serde_json::json;

use scenario_builder::api::request_body::RequestBody;
use scenario_builder::domain::assembler::validation::ValidationError;
use scenario_builder::domain::builder::ScenarioBuilder;
use scenario_builder::domain::geo::LatLng;
use scenario_builder::domain::global_config::global_config::{AuthoringMode, ConfigEdit};
use scenario_builder::domain::node::node_kind::{JammerType, NodeKind};
use scenario_builder::domain::node::parameters::TX_POWER;
use scenario_builder::gateway::endpoint::SimulationEndpoint;

fn place_route(builder: &mut ScenarioBuilder, from: LatLng, to: LatLng) {
    builder.select_tool(Some(NodeKind::VehicleRoute)).unwrap();
    builder.click(from);
    builder.click(to).expect("route should be placed");
}

fn place_point(builder: &mut ScenarioBuilder, kind: NodeKind, at: LatLng) {
    builder.select_tool(Some(kind)).unwrap();
    builder.click(at).expect("node should be placed");
}

fn granular_grid_scenario() -> ScenarioBuilder {
    let mut builder = ScenarioBuilder::new(AuthoringMode::Granular);
    builder.select_map("grid.net.xml");
    builder.edit_config(ConfigEdit::SetDuration("120".into()));
    place_route(&mut builder, LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0));
    place_point(&mut builder, NodeKind::MobileJammer, LatLng::new(1.5, 1.5));
    builder
}

#[test]
fn granular_scenario_lists_every_node_with_its_bag() {
    let assembly = granular_grid_scenario().assemble().unwrap();
    assert!(assembly.warnings.is_empty());
    assert_eq!(assembly.body.endpoint(), SimulationEndpoint::GenerateExpertZip);

    let body = serde_json::to_value(&assembly.body).unwrap();
    assert_eq!(
        body,
        json!({
            "simulation_name": "Scenario",
            "map_name": "grid.net.xml",
            "duration": 120,
            "seed": 1234,
            "num_random_vehicles": 0,
            "nodes_list": [
                {
                    "id": 1, "type": "car", "lat": 1.0, "lng": 1.0, "dest_lat": 2.0, "dest_lng": 2.0,
                    "params": { "application": "voip", "interval": 0.1, "mitigation": false, "packetSize": 300, "txPower": 23.0 }
                },
                {
                    "id": 2, "type": "drone", "lat": 1.5, "lng": 1.5,
                    "params": { "speed": 10.0, "start": 20.0, "stop": 120.0, "strategy": "constant", "txPower": 30.0 }
                }
            ]
        })
    );
}

#[test]
fn assembling_unchanged_state_is_byte_identical() {
    let builder = granular_grid_scenario();
    let first = builder.assemble().unwrap().body.to_json_bytes().unwrap();
    let second = builder.assemble().unwrap().body.to_json_bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn route_packet_size_goes_out_as_whole_number() {
    let bytes = granular_grid_scenario().assemble().unwrap().body.to_json_bytes().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains(r#""packetSize":300,"#), "{}", text);
    assert!(!text.contains("300.0"), "{}", text);
}

#[test]
fn edited_bag_is_sent_as_saved() {
    let mut builder = granular_grid_scenario();
    let jammer = builder.store().of_kind(NodeKind::MobileJammer).next().unwrap().id();

    let mut draft = builder.begin_edit(jammer).unwrap();
    draft.set(TX_POWER, "33").unwrap();
    builder.save_edit(draft).unwrap();

    let RequestBody::Expert(body) = builder.assemble().unwrap().body else {
        panic!("granular mode must produce an expert body");
    };
    assert_eq!(body.nodes_list[1].params.number(TX_POWER), Some(33.0));
}

#[test]
fn manual_scenario_uses_latest_route_and_shared_schedule() {
    let mut builder = ScenarioBuilder::new(AuthoringMode::Manual);
    builder.select_map("grid.net.xml");
    place_route(&mut builder, LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0));
    place_route(&mut builder, LatLng::new(3.0, 3.0), LatLng::new(4.0, 4.0));
    place_point(&mut builder, NodeKind::StaticJammer, LatLng::new(1.2, 1.2));
    place_point(&mut builder, NodeKind::MobileJammer, LatLng::new(1.3, 1.3));
    place_point(&mut builder, NodeKind::RoadsideUnit, LatLng::new(1.4, 1.4));
    builder.edit_config(ConfigEdit::SetFixedVehicles("5".into()));

    let assembly = builder.assemble().unwrap();
    assert_eq!(assembly.body.endpoint(), SimulationEndpoint::GenerateAdvancedZip);
    let RequestBody::Advanced(body) = assembly.body else {
        panic!("manual mode must produce an advanced body");
    };

    assert_eq!(body.fixed_routes_list.len(), 1);
    assert_eq!(body.fixed_routes_list[0].start, LatLng::new(3.0, 3.0));
    assert_eq!(body.fixed_routes_list[0].end, LatLng::new(4.0, 4.0));
    assert_eq!(body.fixed_routes_list[0].count, 5);

    let types: Vec<JammerType> = body.jammers_list.iter().map(|jammer| jammer.jammer_type).collect();
    assert_eq!(types, vec![JammerType::NRJammer, JammerType::DroneJammer]);
    assert_eq!(body.jamming_params.jammer_type, JammerType::NRJammer);
    assert_eq!(body.jamming_params.start_time_s, 20.0);
    assert_eq!(body.jamming_params.stop_time_s, 100.0);
    assert_eq!(body.jamming_params.num_jammers, None);
    assert_eq!(body.rsus_list, vec![LatLng::new(1.4, 1.4)]);
    assert_eq!(body.attack_placement, "fixed");
}

#[test]
fn manual_route_is_omitted_without_fixed_vehicles() {
    let mut builder = ScenarioBuilder::new(AuthoringMode::Manual);
    builder.select_map("grid.net.xml");
    place_route(&mut builder, LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0));
    builder.edit_config(ConfigEdit::SetFixedVehicles("0".into()));

    let RequestBody::Advanced(body) = builder.assemble().unwrap().body else {
        panic!("manual mode must produce an advanced body");
    };
    assert!(body.fixed_routes_list.is_empty());
    assert_eq!(body.num_fixed_vehicles, 0);
    assert_eq!(body.num_random_vehicles, 30);
}

#[test]
fn simplified_scenario_synthesizes_jammers() {
    let mut builder = ScenarioBuilder::new(AuthoringMode::Simplified);
    builder.select_map("grid.net.xml");
    builder.edit_config(ConfigEdit::SetTotalVehicles("30".into()));
    builder.edit_config(ConfigEdit::SetDuration("300".into()));

    let RequestBody::Simple(body) = builder.assemble().unwrap().body else {
        panic!("simplified mode must produce a simple body");
    };
    assert!(body.execute_with_attack);
    let jamming = body.jamming_params.expect("attack block expected");
    assert_eq!(jamming.num_jammers, Some(3));
    assert_eq!(jamming.power_dbm, 23.0);
    assert_eq!(jamming.start_time_s, 0.0);
    assert_eq!(jamming.stop_time_s, 300.0);
    assert_eq!(jamming.jammer_type, JammerType::DroneJammer);
}

#[test]
fn simplified_scenario_without_attack_has_no_jamming_block() {
    let mut builder = ScenarioBuilder::new(AuthoringMode::Simplified);
    builder.select_map("grid.net.xml");
    builder.edit_config(ConfigEdit::SetAttackEnabled(false));

    let body = serde_json::to_value(builder.assemble().unwrap().body).unwrap();
    assert_eq!(body["execute_with_attack"], json!(false));
    assert!(body.get("jamming_params").is_none());
}

#[test]
fn missing_map_is_reported_before_anything_else() {
    let mut builder = ScenarioBuilder::new(AuthoringMode::Granular);
    builder.edit_config(ConfigEdit::SetDuration("0".into()));
    assert_eq!(builder.assemble().unwrap_err(), ValidationError::MissingMap);

    builder.select_map("grid.net.xml");
    assert_eq!(builder.assemble().unwrap_err(), ValidationError::NonPositiveDuration(0));

    builder.edit_config(ConfigEdit::SetDuration("60".into()));
    assert_eq!(builder.assemble().unwrap_err(), ValidationError::NoVehicleRoute);
}

#[test]
fn manual_scenario_without_vehicles_is_rejected() {
    let mut builder = ScenarioBuilder::new(AuthoringMode::Manual);
    builder.select_map("grid.net.xml");
    builder.edit_config(ConfigEdit::SetRandomVehicles("0".into()));
    builder.edit_config(ConfigEdit::SetFixedVehicles("0".into()));
    assert_eq!(builder.assemble().unwrap_err(), ValidationError::NoVehicles);
}

#[test]
fn unparsable_fields_fall_back_with_warnings() {
    let mut builder = granular_grid_scenario();
    assert!(builder.edit_config(ConfigEdit::SetDuration("12o".into())).is_some());
    assert!(builder.edit_config(ConfigEdit::SetSeed("".into())).is_some());

    let assembly = builder.assemble().unwrap();
    let fields: Vec<&str> = assembly.warnings.iter().map(|warning| warning.field).collect();
    assert_eq!(fields, vec!["duration", "seed"]);

    let RequestBody::Expert(body) = assembly.body else {
        panic!("granular mode must produce an expert body");
    };
    assert_eq!(body.duration, 120);
    assert_eq!(body.seed, 1234);
}

#[test]
fn vehicle_count_fallbacks_are_reported_once() {
    let mut builder = ScenarioBuilder::new(AuthoringMode::Manual);
    builder.select_map("grid.net.xml");
    assert!(builder.edit_config(ConfigEdit::SetRandomVehicles("many".into())).is_some());
    assert!(builder.edit_config(ConfigEdit::SetFixedVehicles("-2".into())).is_some());

    let assembly = builder.assemble().unwrap();
    let fields: Vec<&str> = assembly.warnings.iter().map(|warning| warning.field).collect();
    assert_eq!(fields, vec!["random vehicles", "fixed vehicles"]);

    let RequestBody::Advanced(body) = assembly.body else {
        panic!("manual mode must produce an advanced body");
    };
    assert_eq!(body.num_random_vehicles, 30);
    assert_eq!(body.num_fixed_vehicles, 1);
}
