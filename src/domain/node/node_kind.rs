use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConversionError;

/// The kind of a placed topology entity. Fixed for the life of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[serde(alias = "car")]
    VehicleRoute,
    #[serde(alias = "drone")]
    MobileJammer,
    #[serde(alias = "tower")]
    StaticJammer,
    #[serde(alias = "rsu")]
    RoadsideUnit,
}

/// The kinds placed with a single click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    MobileJammer,
    StaticJammer,
    RoadsideUnit,
}

impl From<PointKind> for NodeKind {
    fn from(kind: PointKind) -> Self {
        match kind {
            PointKind::MobileJammer => NodeKind::MobileJammer,
            PointKind::StaticJammer => NodeKind::StaticJammer,
            PointKind::RoadsideUnit => NodeKind::RoadsideUnit,
        }
    }
}

/// Jammer model names understood by the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JammerType {
    DroneJammer,
    NRJammer,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [NodeKind::VehicleRoute, NodeKind::MobileJammer, NodeKind::StaticJammer, NodeKind::RoadsideUnit];

    /// Name used for the node `type` in granular request bodies.
    pub fn wire_name(&self) -> &'static str {
        match self {
            NodeKind::VehicleRoute => "car",
            NodeKind::MobileJammer => "drone",
            NodeKind::StaticJammer => "tower",
            NodeKind::RoadsideUnit => "rsu",
        }
    }

    /// `None` for vehicle routes, which need an origin and a destination.
    pub fn point_kind(&self) -> Option<PointKind> {
        match self {
            NodeKind::VehicleRoute => None,
            NodeKind::MobileJammer => Some(PointKind::MobileJammer),
            NodeKind::StaticJammer => Some(PointKind::StaticJammer),
            NodeKind::RoadsideUnit => Some(PointKind::RoadsideUnit),
        }
    }

    pub fn is_jammer(&self) -> bool {
        matches!(self, NodeKind::MobileJammer | NodeKind::StaticJammer)
    }

    pub fn jammer_type(&self) -> Option<JammerType> {
        match self {
            NodeKind::MobileJammer => Some(JammerType::DroneJammer),
            NodeKind::StaticJammer => Some(JammerType::NRJammer),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::VehicleRoute => "vehicle_route",
            NodeKind::MobileJammer => "mobile_jammer",
            NodeKind::StaticJammer => "static_jammer",
            NodeKind::RoadsideUnit => "roadside_unit",
        };
        f.write_str(name)
    }
}

impl FromStr for NodeKind {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vehicle_route" | "car" => Ok(NodeKind::VehicleRoute),
            "mobile_jammer" | "drone" => Ok(NodeKind::MobileJammer),
            "static_jammer" | "tower" => Ok(NodeKind::StaticJammer),
            "roadside_unit" | "rsu" => Ok(NodeKind::RoadsideUnit),
            _ => Err(ConversionError::UnknownNodeKind(s.to_string())),
        }
    }
}
