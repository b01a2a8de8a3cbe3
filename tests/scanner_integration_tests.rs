use httpmock::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::time::{Duration, Instant};
use system_scanner::{ApiError, GalaxyApi, ReportWriter, ScanSettings, SpaceTradersClient, SystemScanner};

/// Integration tests for the scan pipeline against a mock SpaceTraders API
const TOKEN: &str = "test-token";

fn system_json(symbol: &str, x: i32, y: i32) -> Value {
    json!({
        "symbol": symbol,
        "sectorSymbol": "X1",
        "type": "RED_STAR",
        "x": x,
        "y": y,
        "waypoints": [],
        "factions": []
    })
}

fn waypoint_json(system: &str, symbol: &str, traits: &[&str]) -> Value {
    let traits: Vec<Value> = traits
        .iter()
        .map(|t| json!({"symbol": t, "name": t, "description": "trait"}))
        .collect();
    json!({
        "symbol": symbol,
        "type": "PLANET",
        "systemSymbol": system,
        "x": 1,
        "y": 2,
        "orbitals": [],
        "traits": traits
    })
}

fn goods_json(symbols: &[&str]) -> Vec<Value> {
    symbols
        .iter()
        .map(|s| json!({"symbol": s, "name": s, "description": "good"}))
        .collect()
}

fn market_json(symbol: &str, imports: &[&str], exports: &[&str], exchange: &[&str]) -> Value {
    json!({
        "data": {
            "symbol": symbol,
            "imports": goods_json(imports),
            "exports": goods_json(exports),
            "exchange": goods_json(exchange)
        }
    })
}

fn page_json(data: Vec<Value>, page: u32, total: u32, limit: u32) -> Value {
    json!({"data": data, "meta": {"page": page, "total": total, "limit": limit}})
}

fn client_for(server: &MockServer, delay: Duration) -> SpaceTradersClient {
    SpaceTradersClient::new(&server.base_url(), TOKEN, delay).expect("client should build")
}

fn settings(page_limit: u32, max_pages: u32) -> ScanSettings {
    ScanSettings {
        page_limit,
        max_pages,
        resource: "FUEL".to_string(),
    }
}

#[tokio::test]
async fn test_single_market_system_row() {
    let server = MockServer::start_async().await;
    let systems = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/systems")
                .query_param("page", "1")
                .header("authorization", "Bearer test-token");
            then.status(200)
                .json_body(page_json(vec![system_json("X1-AA1", 10, -5)], 1, 1, 20));
        })
        .await;
    let waypoints = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints");
            then.status(200).json_body(page_json(
                vec![
                    waypoint_json("X1-AA1", "X1-AA1-A1", &["MARKETPLACE", "ICE_CRYSTALS"]),
                    waypoint_json("X1-AA1", "X1-AA1-B2", &[]),
                ],
                1,
                2,
                20,
            ));
        })
        .await;
    let market = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints/X1-AA1-A1/market");
            then.status(200)
                .json_body(market_json("X1-AA1-A1", &["IRON_ORE"], &["FUEL"], &["WATER"]));
        })
        .await;
    let untagged_market = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints/X1-AA1-B2/market");
            then.status(200).json_body(market_json("X1-AA1-B2", &[], &[], &[]));
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("systems.csv");
    let mut writer = ReportWriter::create(&path).unwrap();

    let client = client_for(&server, Duration::ZERO);
    let scanner = SystemScanner::new(&client, settings(20, 0));
    let report = scanner.run(&mut writer).await.expect("scan should succeed");
    writer.finish().unwrap();

    assert_eq!(report.pages, 1);
    assert_eq!(report.systems, 1);
    assert_eq!(report.markets, 1);
    assert_eq!(systems.hits_async().await, 1);
    assert_eq!(waypoints.hits_async().await, 1);
    assert_eq!(market.hits_async().await, 1);
    assert_eq!(untagged_market.hits_async().await, 0);

    let csv = fs::read_to_string(&path).unwrap();
    assert_eq!(csv, "X1-AA1,10,-5,1,0,0,0,0,1,1\n");
}

#[tokio::test]
async fn test_pagination_follows_metadata_and_keeps_duplicates() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems").query_param("page", "1");
            then.status(200).json_body(page_json(
                vec![system_json("X1-AA1", 0, 0), system_json("X1-BB2", 1, 1)],
                1,
                3,
                2,
            ));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems").query_param("page", "2");
            then.status(200)
                .json_body(page_json(vec![system_json("X1-AA1", 0, 0)], 2, 3, 2));
        })
        .await;
    let third = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems").query_param("page", "3");
            then.status(200).json_body(page_json(vec![], 3, 3, 2));
        })
        .await;
    for system in ["X1-AA1", "X1-BB2"] {
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/systems/{}/waypoints", system));
                then.status(200).json_body(page_json(vec![], 1, 0, 2));
            })
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("systems.csv");
    let mut writer = ReportWriter::create(&path).unwrap();

    let client = client_for(&server, Duration::ZERO);
    let scanner = SystemScanner::new(&client, settings(2, 0));
    let report = scanner.run(&mut writer).await.expect("scan should succeed");
    writer.finish().unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.systems, 3);
    assert_eq!(first.hits_async().await, 1);
    assert_eq!(second.hits_async().await, 1);
    assert_eq!(third.hits_async().await, 0);

    let csv = fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("X1-AA1,"));
    assert!(rows[1].starts_with("X1-BB2,"));
    assert!(rows[2].starts_with("X1-AA1,"));
}

#[tokio::test]
async fn test_page_cap_stops_before_listing_ends() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems").query_param("page", "1");
            then.status(200)
                .json_body(page_json(vec![system_json("X1-AA1", 0, 0)], 1, 100, 1));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/systems").query_param("page", "2");
            then.status(200)
                .json_body(page_json(vec![system_json("X1-BB2", 0, 0)], 2, 100, 1));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints");
            then.status(200).json_body(page_json(vec![], 1, 0, 1));
        })
        .await;

    let mut writer = ReportWriter::from_writer(Vec::new());
    let client = client_for(&server, Duration::ZERO);
    let scanner = SystemScanner::new(&client, settings(1, 1));
    let report = scanner.run(&mut writer).await.expect("scan should succeed");

    assert_eq!(report.pages, 1);
    assert_eq!(report.systems, 1);
    assert_eq!(first.hits_async().await, 1);
    assert_eq!(second.hits_async().await, 0);
}

#[tokio::test]
async fn test_waypoints_are_read_across_pages() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems").query_param("page", "1");
            then.status(200)
                .json_body(page_json(vec![system_json("X1-AA1", 3, 4)], 1, 1, 2));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints").query_param("page", "1");
            then.status(200).json_body(page_json(
                vec![
                    waypoint_json("X1-AA1", "X1-AA1-A1", &["COMMON_METAL_DEPOSITS"]),
                    waypoint_json("X1-AA1", "X1-AA1-A2", &["COMMON_METAL_DEPOSITS", "MINERAL_DEPOSITS"]),
                ],
                1,
                3,
                2,
            ));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints").query_param("page", "2");
            then.status(200).json_body(page_json(
                vec![waypoint_json(
                    "X1-AA1",
                    "X1-AA1-A3",
                    &["PRECIOUS_METAL_DEPOSITS", "RARE_METAL_DEPOSITS"],
                )],
                2,
                3,
                2,
            ));
        })
        .await;

    let mut writer = ReportWriter::from_writer(Vec::new());
    let client = client_for(&server, Duration::ZERO);
    let scanner = SystemScanner::new(&client, settings(2, 0));
    scanner.run(&mut writer).await.expect("scan should succeed");

    let csv = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert_eq!(csv, "X1-AA1,3,4,0,2,1,1,1,0,0\n");
}

#[tokio::test]
async fn test_fuel_exporter_and_importer_net_to_zero() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems");
            then.status(200)
                .json_body(page_json(vec![system_json("X1-AA1", 0, 0)], 1, 1, 20));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints");
            then.status(200).json_body(page_json(
                vec![
                    waypoint_json("X1-AA1", "X1-AA1-A1", &["MARKETPLACE"]),
                    waypoint_json("X1-AA1", "X1-AA1-A2", &["BLACK_MARKET", "MARKETPLACE"]),
                ],
                1,
                2,
                20,
            ));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints/X1-AA1-A1/market");
            then.status(200).json_body(market_json("X1-AA1-A1", &[], &["FUEL"], &[]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints/X1-AA1-A2/market");
            then.status(200).json_body(market_json("X1-AA1-A2", &["FUEL"], &[], &["FUEL"]));
        })
        .await;

    let mut writer = ReportWriter::from_writer(Vec::new());
    let client = client_for(&server, Duration::ZERO);
    let scanner = SystemScanner::new(&client, settings(20, 0));
    let report = scanner.run(&mut writer).await.expect("scan should succeed");

    assert_eq!(report.markets, 2);
    let csv = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert_eq!(csv, "X1-AA1,0,0,2,0,0,0,0,0,0\n");
}

#[tokio::test]
async fn test_waypoint_failure_aborts_before_row_is_written() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems");
            then.status(200).json_body(page_json(
                vec![system_json("X1-OK1", 5, 5), system_json("X1-BAD", 6, 6)],
                1,
                2,
                20,
            ));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-OK1/waypoints");
            then.status(200).json_body(page_json(vec![], 1, 0, 20));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-BAD/waypoints");
            then.status(500).body("internal error");
        })
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("systems.csv");
    let mut writer = ReportWriter::create(&path).unwrap();

    let client = client_for(&server, Duration::ZERO);
    let scanner = SystemScanner::new(&client, settings(20, 0));
    let err = scanner.run(&mut writer).await.expect_err("scan should fail");

    let api_error = err.downcast_ref::<ApiError>().expect("should be an API error");
    assert_eq!(api_error.status, 500);
    assert!(api_error.is_transient());
    assert_eq!(writer.rows_written(), 1);
    drop(writer);

    let csv = fs::read_to_string(&path).unwrap();
    assert_eq!(csv, "X1-OK1,5,5,0,0,0,0,0,0,0\n");
}

#[tokio::test]
async fn test_undecodable_body_is_fatal() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems");
            then.status(200).body("{not json");
        })
        .await;

    let client = client_for(&server, Duration::ZERO);
    let result = client.list_systems(1, 20).await;
    let err = result.expect_err("decode should fail");
    assert!(err.downcast_ref::<ApiError>().is_none());
    assert!(err.to_string().contains("Failed to decode"));
}

#[tokio::test]
async fn test_missing_token_is_rejected_by_server() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems").header("authorization", "Bearer test-token");
            then.status(200).json_body(page_json(vec![], 1, 0, 20));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems").header("authorization", "Bearer wrong");
            then.status(401).body("{\"error\":{\"message\":\"unauthorized\"}}");
        })
        .await;

    let good = client_for(&server, Duration::ZERO);
    let page = good.list_systems(1, 20).await.expect("authorized call should succeed");
    assert!(page.data.is_empty());

    let bad = SpaceTradersClient::new(&server.base_url(), "wrong", Duration::ZERO).unwrap();
    let err = bad.list_systems(1, 20).await.expect_err("unauthorized call should fail");
    let api_error = err.downcast_ref::<ApiError>().expect("should be an API error");
    assert_eq!(api_error.status, 401);
    assert!(!api_error.is_transient());
}

#[tokio::test]
async fn test_every_call_is_followed_by_the_request_delay() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems");
            then.status(200)
                .json_body(page_json(vec![system_json("X1-AA1", 0, 0)], 1, 1, 20));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints");
            then.status(200).json_body(page_json(
                vec![waypoint_json("X1-AA1", "X1-AA1-A1", &["MARKETPLACE"])],
                1,
                1,
                20,
            ));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/systems/X1-AA1/waypoints/X1-AA1-A1/market");
            then.status(200).json_body(market_json("X1-AA1-A1", &[], &[], &[]));
        })
        .await;

    let delay = Duration::from_millis(100);
    let client = client_for(&server, delay);
    assert_eq!(client.request_delay(), delay);

    let mut writer = ReportWriter::from_writer(Vec::new());
    let scanner = SystemScanner::new(&client, settings(20, 0));

    let started = Instant::now();
    scanner.run(&mut writer).await.expect("scan should succeed");
    let elapsed = started.elapsed();

    // systems page, waypoint page, market detail
    assert!(elapsed >= delay * 3, "expected at least 300ms, took {:?}", elapsed);
}
