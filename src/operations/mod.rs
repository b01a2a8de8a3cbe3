// Operations module - scan pipeline stages

pub mod pagination;
pub mod classification;
pub mod market_report;
pub mod scanner;

pub use pagination::*;
pub use classification::*;
pub use market_report::*;
pub use scanner::*;
