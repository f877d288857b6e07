use serde_json::Value;

use crate::domain::assembler::validation::ValidationError;
use crate::domain::assembler::{self, Assembly};
use crate::domain::geo::LatLng;
use crate::domain::global_config::form_field::CoercionWarning;
use crate::domain::global_config::global_config::{AuthoringMode, ConfigEdit, GlobalConfig};
use crate::domain::node::node::Node;
use crate::domain::node::node_kind::NodeKind;
use crate::domain::node::parameter_draft::ParameterDraft;
use crate::domain::node_store::{NodeStore, StoreError};
use crate::domain::overlay::{NETWORK_EXTENSION, OverlayOutcome, OverlaySource, OverlayTicket, OverlayTracker, load_overlay};
use crate::domain::placement::{ClickOutcome, PlacementController};
use crate::domain::utils::id::NodeId;
use crate::error::{Error, Result};

/// One authoring session. Owns the configuration form, the placed nodes,
/// the armed placement tool and the map backdrop.
///
/// The mode is fixed for the lifetime of the session; switching modes means
/// starting a new builder.
#[derive(Debug)]
pub struct ScenarioBuilder {
    mode: AuthoringMode,
    config: GlobalConfig,
    store: NodeStore,
    placement: PlacementController,
    overlay: OverlayTracker,
    available_maps: Vec<String>,
}

impl ScenarioBuilder {
    pub fn new(mode: AuthoringMode) -> Self {
        log::info!("Starting {} scenario builder.", mode);
        Self {
            mode,
            config: GlobalConfig::for_mode(mode),
            store: NodeStore::new(),
            placement: PlacementController::new(),
            overlay: OverlayTracker::new(),
            available_maps: Vec::new(),
        }
    }

    pub fn mode(&self) -> AuthoringMode {
        self.mode
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn placement(&self) -> &PlacementController {
        &self.placement
    }

    pub fn overlay(&self) -> &OverlayTracker {
        &self.overlay
    }

    pub fn available_maps(&self) -> &[String] {
        &self.available_maps
    }

    /// Replaces the map list. Only road network files are offered.
    pub fn set_available_maps(&mut self, maps: Vec<String>) {
        self.available_maps = maps.into_iter().filter(|name| name.ends_with(NETWORK_EXTENSION)).collect();
        log::debug!("{} map(s) available.", self.available_maps.len());
    }

    pub fn edit_config(&mut self, edit: ConfigEdit) -> Option<CoercionWarning> {
        if let ConfigEdit::SelectMap(map_name) = edit {
            self.select_map(&map_name);
            return None;
        }
        self.config.apply(edit)
    }

    /// Selects a map and starts its overlay request. The previous backdrop is
    /// dropped right away; the returned ticket must be handed back to
    /// [`ScenarioBuilder::apply_overlay`] together with the fetch result.
    pub fn select_map(&mut self, map_name: &str) -> Option<OverlayTicket> {
        self.config.apply(ConfigEdit::SelectMap(map_name.to_string()));
        log::info!("Selected map '{}'.", map_name);
        self.overlay.begin(map_name)
    }

    pub fn apply_overlay(&mut self, ticket: &OverlayTicket, result: Result<Option<Value>>) -> OverlayOutcome {
        self.overlay.resolve(ticket, result)
    }

    /// Fetches the overlay of the request in flight, if any, and applies it.
    pub async fn load_pending_overlay<S: OverlaySource + ?Sized>(&mut self, source: &S) -> Option<OverlayOutcome> {
        let ticket = self.overlay.in_flight()?.clone();
        let result = load_overlay(source, &ticket).await;
        Some(self.apply_overlay(&ticket, result))
    }

    /// Arms a placement tool. Returns the route origin that was discarded by
    /// the switch, if any. Simplified scenarios have no placed nodes.
    pub fn select_tool(&mut self, tool: Option<NodeKind>) -> Result<Option<LatLng>> {
        if let (AuthoringMode::Simplified, Some(kind)) = (self.mode, tool) {
            return Err(Error::ToolUnavailable { mode: self.mode, kind });
        }
        Ok(self.placement.select_tool(tool))
    }

    /// Feeds a map click to the armed tool. Returns the id of the node the
    /// click completed, if any.
    pub fn click(&mut self, at: LatLng) -> Option<NodeId> {
        match self.placement.click(at) {
            ClickOutcome::Placed(node) => Some(self.store.add(node)),
            ClickOutcome::OriginCaptured(_) | ClickOutcome::Ignored => None,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.store.get(id)
    }

    /// Opens the parameter editor of a node. Edits stay in the draft until
    /// [`ScenarioBuilder::save_edit`].
    pub fn begin_edit(&self, id: NodeId) -> Option<ParameterDraft> {
        self.store.get(id).map(ParameterDraft::begin)
    }

    pub fn save_edit(&mut self, draft: ParameterDraft) -> std::result::Result<(), StoreError> {
        draft.save(&mut self.store)
    }

    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.store.remove(id)
    }

    pub fn clear_nodes(&mut self) {
        self.store.clear();
    }

    pub fn assemble(&self) -> std::result::Result<Assembly, ValidationError> {
        assembler::assemble(&self.config, &self.store, self.mode)
    }
}
