// Models module - wire types for the systems, waypoints and market endpoints

pub mod system;
pub mod waypoint;
pub mod market;
pub mod responses;

pub use system::*;
pub use waypoint::*;
pub use market::*;
pub use responses::*;
