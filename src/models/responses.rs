use serde::Deserialize;

use crate::models::{Market, System, Waypoint};

/// Envelope shared by every endpoint: a payload plus optional paging
/// metadata. Market detail responses carry no `meta`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub page: u32,
    pub total: u32,
    pub limit: u32,
}

impl PageMeta {
    pub fn is_last_page(&self) -> bool {
        u64::from(self.page) * u64::from(self.limit) >= u64::from(self.total)
    }
}

pub type SystemsPage = ApiResponse<Vec<System>>;
pub type WaypointsPage = ApiResponse<Vec<Waypoint>>;
pub type MarketResponse = ApiResponse<Market>;
