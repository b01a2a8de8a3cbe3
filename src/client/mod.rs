// Client module - SpaceTraders API client
pub mod api;
pub mod error;

pub use api::SpaceTradersClient;
pub use error::ApiError;

use async_trait::async_trait;

use crate::models::{Market, SystemsPage, WaypointsPage};

/// Read-only endpoints the scan pipeline depends on.
#[async_trait]
pub trait GalaxyApi: Send + Sync {
    async fn list_systems(&self, page: u32, limit: u32) -> Result<SystemsPage, Box<dyn std::error::Error>>;

    async fn list_system_waypoints(
        &self,
        system_symbol: &str,
        page: u32,
        limit: u32,
    ) -> Result<WaypointsPage, Box<dyn std::error::Error>>;

    async fn get_market(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Market, Box<dyn std::error::Error>>;
}
