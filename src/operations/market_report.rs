// Market detail aggregation: console listing and net resource balance
use std::fmt::Write;

use crate::models::Market;

pub const DEFAULT_RESOURCE: &str = "FUEL";

/// Net trade balance of `resource` at one market: each export of it
/// counts +1, each import -1. Exchange goods are not counted.
pub fn resource_balance(market: &Market, resource: &str) -> i64 {
    let exported = market.exports.iter().filter(|good| good.symbol == resource).count() as i64;
    let imported = market.imports.iter().filter(|good| good.symbol == resource).count() as i64;
    exported - imported
}

pub fn render_market_listing(waypoint_symbol: &str, market: &Market) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "----------- {} -----------", waypoint_symbol);

    for (label, goods) in [
        ("IMPORTS", &market.imports),
        ("EXPORTS", &market.exports),
        ("EXCHANGES", &market.exchange),
    ] {
        let _ = writeln!(out, "{}", label);
        for good in goods {
            let _ = writeln!(out, "\t{}", good.symbol);
        }
    }

    out.push('\n');
    out
}
