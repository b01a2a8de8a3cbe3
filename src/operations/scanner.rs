// Scan pipeline: systems -> waypoints -> markets -> summary rows
use std::io::Write;

use crate::client::GalaxyApi;
use crate::models::System;
use crate::operations::{classify_waypoint, fetch_all_waypoints, render_market_listing, resource_balance, SystemPages};
use crate::storage::{ReportWriter, SystemSummaryRow};
use crate::{v_debug, v_info};

#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Page size for both the systems and waypoint listings.
    pub page_limit: u32,
    /// Systems pages to read; 0 reads until the listing is exhausted.
    pub max_pages: u32,
    /// Trade good whose net export balance is tallied per system.
    pub resource: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub pages: u32,
    pub systems: usize,
    pub markets: u32,
}

pub struct SystemScanner<'a, A: GalaxyApi + ?Sized> {
    api: &'a A,
    settings: ScanSettings,
}

impl<'a, A: GalaxyApi + ?Sized> SystemScanner<'a, A> {
    pub fn new(api: &'a A, settings: ScanSettings) -> Self {
        Self { api, settings }
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Expand one system into its summary row. Market listings are printed
    /// as each market is fetched.
    pub async fn scan_system(&self, system: &System) -> Result<SystemSummaryRow, Box<dyn std::error::Error>> {
        let waypoints = fetch_all_waypoints(self.api, &system.symbol, self.settings.page_limit).await?;
        v_debug!("🛰️  {} has {} waypoints", system.symbol, waypoints.len());

        let mut row = SystemSummaryRow::new(&system.symbol, system.x, system.y);

        for waypoint in &waypoints {
            let traits = classify_waypoint(waypoint);
            row.add_deposits(&traits.deposits);

            if !traits.is_market {
                continue;
            }

            row.markets += 1;
            let market = self.api.get_market(&system.symbol, &waypoint.symbol).await?;
            print!("{}", render_market_listing(&waypoint.symbol, &market));
            row.resource_balance += resource_balance(&market, &self.settings.resource);
        }

        Ok(row)
    }

    /// Run the full scan, writing one row per system in encounter order and
    /// flushing after every page. Stops at the first error; the row of the
    /// system being processed is never written.
    pub async fn run<W: Write>(&self, writer: &mut ReportWriter<W>) -> Result<ScanReport, Box<dyn std::error::Error>> {
        let mut pages = SystemPages::new(self.api, self.settings.page_limit, self.settings.max_pages);
        let mut report = ScanReport::default();

        while let Some(systems) = pages.next_batch().await? {
            for system in &systems {
                let row = self.scan_system(system).await?;
                writer.write_row(&row)?;
                report.systems += 1;
                report.markets += row.markets;
            }

            writer.flush()?;
            report.pages += 1;
            v_info!(
                "📄 Page {} done: {} systems so far, {} markets",
                report.pages,
                report.systems,
                report.markets
            );
        }

        Ok(report)
    }
}
