#![allow(dead_code)]

use serde_json::{Map, Value, json};
use wicket::{WebhookEvent, testing::TestRequest};

// ============================================================================
// Fixtures
// ============================================================================

pub const LOGIN: &str = "TestUser";
pub const PASSWORD: &str = "TestPassword";

/// `base64("TestUser:TestPassword")`
pub const BASIC_TOKEN: &str = "VGVzdFVzZXI6VGVzdFBhc3N3b3Jk";

pub fn variables() -> Value {
    json!({
        "billing_entity_id": 1234,
        "prev_balance": 10.5,
        "curr_balance": 4.25,
    })
}

pub fn event(event_type: &str) -> WebhookEvent {
    WebhookEvent::new(event_type, Map::new())
}

/// A signed request for `event_type`.
pub fn signed(event_type: &str) -> TestRequest {
    TestRequest::event(event_type, variables())
        .header("Authorization", format!("Basic {BASIC_TOKEN}"))
        .header("Date", "Some Date String")
}

/// Install a test subscriber so `RUST_LOG` shows library logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
