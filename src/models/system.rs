use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct System {
    pub symbol: String,
    #[serde(rename = "sectorSymbol")]
    pub sector_symbol: String,
    #[serde(rename = "type")]
    pub system_type: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub waypoints: Vec<SystemWaypoint>,
    #[serde(default)]
    pub factions: Vec<SystemFaction>,
}

/// Waypoint summary embedded in a system listing. Traits are only
/// available on the full waypoint endpoint.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemWaypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub waypoint_type: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemFaction {
    pub symbol: String,
}
