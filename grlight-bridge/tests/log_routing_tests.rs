//! Debug flag routing of per-call diagnostics

mod common;

use common::{scripted_accessory, CapturedLogs, Reply, ScriptedTransport};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

async fn run_one_get_and_one_set(debug: bool) -> Vec<(Level, String)> {
    let capture = CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(capture.clone()));

    let transport = ScriptedTransport::new(vec![Reply::ok(r#"{"brightness": 33}"#), Reply::ok("")]);
    let accessory = scripted_accessory(transport, debug);

    accessory.brightness.get().await.unwrap();
    accessory.hue.set(120).await.unwrap();

    capture.entries()
}

#[tokio::test]
async fn test_debug_flag_routes_to_info() {
    let entries = run_one_get_and_one_set(true).await;

    assert_eq!(entries.len(), 2, "one line per call: {:?}", entries);
    assert!(entries.iter().all(|(level, _)| *level == Level::INFO));
    assert_eq!(entries[0].1, "[Desk] Get Characteristic Brightness -> 33");
    assert_eq!(entries[1].1, "[Desk] Set Characteristic Hue -> 120");
}

#[tokio::test]
async fn test_no_debug_flag_routes_to_debug() {
    let entries = run_one_get_and_one_set(false).await;

    assert_eq!(entries.len(), 2, "one line per call: {:?}", entries);
    assert!(entries.iter().all(|(level, _)| *level == Level::DEBUG));
}

#[tokio::test]
async fn test_failures_are_logged_on_the_routed_level() {
    let capture = CapturedLogs::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(capture.clone()));

    let transport = ScriptedTransport::new(vec![Reply::status(503), Reply::ok("{}")]);
    let accessory = scripted_accessory(transport, true);

    assert!(accessory.power.set(true).await.is_err());
    assert!(accessory.saturation.get().await.is_err());

    let entries = capture.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|(level, _)| *level == Level::INFO));
    assert!(entries[0].1.contains("Set Characteristic On -> true failed"));
    assert!(entries[1].1.contains("Get Characteristic Saturation failed"));
}
