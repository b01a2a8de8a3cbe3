// Waypoint trait classification: market detection and deposit tallies
use crate::models::Waypoint;

pub const MARKET_TRAITS: [&str; 2] = ["MARKETPLACE", "BLACK_MARKET"];

pub const COMMON_METAL_DEPOSITS: &str = "COMMON_METAL_DEPOSITS";
pub const PRECIOUS_METAL_DEPOSITS: &str = "PRECIOUS_METAL_DEPOSITS";
pub const RARE_METAL_DEPOSITS: &str = "RARE_METAL_DEPOSITS";
pub const MINERAL_DEPOSITS: &str = "MINERAL_DEPOSITS";
pub const ICE_CRYSTALS: &str = "ICE_CRYSTALS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepositCounts {
    pub common_metal: u32,
    pub precious_metal: u32,
    pub rare_metal: u32,
    pub mineral: u32,
    pub ice_crystal: u32,
}

impl DepositCounts {
    pub fn add(&mut self, other: &DepositCounts) {
        self.common_metal += other.common_metal;
        self.precious_metal += other.precious_metal;
        self.rare_metal += other.rare_metal;
        self.mineral += other.mineral;
        self.ice_crystal += other.ice_crystal;
    }

    pub fn total(&self) -> u32 {
        self.common_metal + self.precious_metal + self.rare_metal + self.mineral + self.ice_crystal
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaypointTraits {
    pub is_market: bool,
    pub deposits: DepositCounts,
}

/// Scan a waypoint's traits once. A waypoint is a market at most once,
/// however many market traits it carries.
pub fn classify_waypoint(waypoint: &Waypoint) -> WaypointTraits {
    let mut traits = WaypointTraits::default();

    for waypoint_trait in &waypoint.traits {
        match waypoint_trait.symbol.as_str() {
            symbol if MARKET_TRAITS.contains(&symbol) => traits.is_market = true,
            COMMON_METAL_DEPOSITS => traits.deposits.common_metal += 1,
            PRECIOUS_METAL_DEPOSITS => traits.deposits.precious_metal += 1,
            RARE_METAL_DEPOSITS => traits.deposits.rare_metal += 1,
            MINERAL_DEPOSITS => traits.deposits.mineral += 1,
            ICE_CRYSTALS => traits.deposits.ice_crystal += 1,
            _ => {}
        }
    }

    traits
}
