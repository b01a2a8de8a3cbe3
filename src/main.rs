// SpaceTraders system scanner - Main Entry Point

use clap::Parser;
use system_scanner::cli::Cli;
use system_scanner::config::resolve_api_token;
use system_scanner::verbosity::set_verbosity_level;
use system_scanner::{
    ApiError, ReportWriter, ScanSettings, ScannerConfig, SpaceTradersClient, SystemScanner, v_error, v_info, v_summary,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    set_verbosity_level(cli.verbose);

    let mut config = ScannerConfig::load_or_create(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    config.print_summary();

    let token = resolve_api_token(cli.token.as_deref(), &config)?;
    let mut client = SpaceTradersClient::new(&config.api.base_url, &token, config.request_delay())?;
    client.set_api_logging(config.api.api_logging);

    let settings = ScanSettings {
        page_limit: config.scan.page_limit,
        max_pages: config.scan.max_pages,
        resource: config.scan.resource.clone(),
    };

    v_info!("🚀 Scanning systems into {}", config.output.results_file);
    let mut writer = ReportWriter::create(&config.output.results_file)?;
    let scanner = SystemScanner::new(&client, settings);

    let report = match scanner.run(&mut writer).await {
        Ok(report) => report,
        Err(e) => {
            if let Some(api_error) = e.downcast_ref::<ApiError>() {
                let kind = if api_error.is_transient() { "transient" } else { "permanent" };
                v_error!("❌ Scan aborted by {} API error: {}", kind, api_error);
            } else {
                v_error!("❌ Scan aborted: {}", e);
            }
            v_error!("💾 {} complete rows kept in {}", writer.rows_written(), config.output.results_file);
            writer.flush()?;
            return Err(e);
        }
    };

    writer.finish()?;
    v_summary!(
        "✅ Scanned {} systems across {} pages ({} markets) into {}",
        report.systems,
        report.pages,
        report.markets,
        config.output.results_file
    );

    Ok(())
}
